//! 按比例把译文切回原来的片段数，再把 Escaped 片段插回去
//!
//! 原文 `'but welcome back to {\i1}Elder Tale{\i0}, Naotsugu.'` 有 3 个 Plain 片段，
//! 译文会按各片段在原纯文本中所占的字符比例切成 3 段，切点吸附到最近的分隔符（默认空格）。
//! 这只是尽力而为的估计，永远不会失败。
use serde::{Deserialize, Serialize};

use crate::segment::{Segment, Segments};

/// 切点吸附方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapDirection {
    /// 向左找上一个分隔符
    Left,
    /// 向右找下一个分隔符
    #[default]
    Right,
}

/// 切分选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitOptions {
    /// 切点吸附的分隔符
    pub delimiter: String,
    pub direction: SnapDirection,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            delimiter: " ".to_string(),
            direction: SnapDirection::Right,
        }
    }
}

impl SplitOptions {
    pub fn new(delimiter: impl Into<String>, direction: SnapDirection) -> Self {
        Self {
            delimiter: delimiter.into(),
            direction,
        }
    }
}

/// 把译文切成与原文 Plain 片段数相同的若干段
///
/// 返回 `max(n, 1)` 段，`n` 为 Plain 片段数；所有段按顺序拼接等于 `translated`。
pub fn split_translation(segments: &Segments, translated: &str, options: &SplitOptions) -> Vec<String> {
    let parts: Vec<&str> = segments.plain_parts().collect();
    if parts.len() <= 1 {
        return vec![translated.to_string()];
    }

    let original_len: usize = parts.iter().map(|part| part.chars().count()).sum();
    let boundaries = char_boundaries(translated);
    let translated_len = boundaries.len() - 1;

    let mut pieces = Vec::with_capacity(parts.len());
    let mut target = 0;
    let mut start = 0;

    for part in &parts[..parts.len() - 1] {
        let length = proportional_length(part.chars().count(), original_len, translated_len);
        target = (target + length).min(translated_len);

        let approximate = boundaries[target].max(start);
        let end = snap_to_delimiter(translated, start, approximate, options);

        pieces.push(translated[start..end].to_string());
        start = end;
    }
    pieces.push(translated[start..].to_string());

    debug_assert_eq!(pieces.len(), parts.len());
    pieces
}

/// 把译文按比例切分后与原 Escaped 片段交错拼接
///
/// 原文没有任何 Plain 片段时，译文整体追加在所有 Escaped 片段之后。
pub fn reinsert(segments: &Segments, translated: &str, options: &SplitOptions) -> String {
    let mut pieces = split_translation(segments, translated, options).into_iter();
    let escaped_len: usize = segments.escaped_parts().map(str::len).sum();
    let mut output = String::with_capacity(translated.len() + escaped_len);

    for segment in segments {
        match segment {
            Segment::Plain(_) => {
                if let Some(piece) = pieces.next() {
                    output.push_str(&piece);
                }
            }
            Segment::Escaped(text) => output.push_str(text),
        }
    }

    for leftover in pieces {
        output.push_str(&leftover);
    }

    tracing::debug!(
        plain = segments.plain_count(),
        escaped = segments.len() - segments.plain_count(),
        "reinserted escapes"
    );

    output
}

/// 计算某一片段在译文中对应的字符数
///
/// 整数部分加上小数部分按银行家舍入（0.5 舍去），与累计游标配合减少漂移。
fn proportional_length(part_len: usize, original_len: usize, translated_len: usize) -> usize {
    if original_len == 0 {
        return 0;
    }
    let raw = part_len as f64 / original_len as f64 * translated_len as f64;
    let whole = raw.trunc();
    (whole + (raw - whole).round_ties_even()) as usize
}

/// 每个字符的起始字节偏移，末尾追加字符串长度
fn char_boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(index, _)| index)
        .chain(std::iter::once(text.len()))
        .collect()
}

/// 把近似切点吸附到分隔符上
///
/// `floor` 是上一段的结束位置，返回值不会小于它。找不到分隔符时返回近似切点。
fn snap_to_delimiter(text: &str, floor: usize, approximate: usize, options: &SplitOptions) -> usize {
    let delimiter = options.delimiter.as_str();
    if delimiter.is_empty() || text[approximate..].starts_with(delimiter) {
        return approximate;
    }

    let snapped = match options.direction {
        // 只在当前段内部向左找，段首的分隔符不算
        SnapDirection::Left => text[floor..approximate]
            .rfind(delimiter)
            .filter(|&index| index > 0)
            .map(|index| floor + index),
        SnapDirection::Right => text[approximate..]
            .find(delimiter)
            .map(|index| approximate + index),
    };

    match snapped {
        Some(index) => index,
        None => {
            tracing::trace!(
                approximate,
                delimiter,
                "no delimiter found, using unsnapped split point"
            );
            approximate
        }
    }
}
