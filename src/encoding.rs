use encoding_rs::Encoding;

use crate::utils::EscapeError;

fn lookup(label: &str) -> Result<&'static Encoding, EscapeError> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| EscapeError::UnknownEncoding(label.to_string()))
}

/// 检查文本能否无损编码为目标编码
pub fn can_encode(text: &str, label: &str) -> Result<bool, EscapeError> {
    let encoding = lookup(label)?;
    let (_, _, had_errors) = encoding.encode(text);
    Ok(!had_errors)
}

/// 丢弃目标编码无法表示的字符
pub fn normalize_encoding(text: &str, label: &str) -> Result<String, EscapeError> {
    let encoding = lookup(label)?;
    if !encoding.encode(text).2 {
        return Ok(text.to_string());
    }

    let mut output = String::with_capacity(text.len());
    let mut buffer = [0u8; 4];
    for c in text.chars() {
        let (_, _, had_errors) = encoding.encode(c.encode_utf8(&mut buffer));
        if had_errors {
            tracing::warn!(
                character = %c,
                encoding = encoding.name(),
                "character cannot be encoded, dropping it"
            );
        } else {
            output.push(c);
        }
    }

    tracing::warn!(from = text, to = %output, "output changed by encoding normalization");
    Ok(output)
}
