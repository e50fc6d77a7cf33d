/// 自动换行选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapOptions {
    /// 每行最多字符数
    pub width: usize,
    /// 最多行数，最后一行承接所有剩余文本
    pub max_lines: usize,
    /// 行数不等于 `max_lines` 时按字符数平均重新切分
    pub force_line_count: bool,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            width: 60,
            max_lines: 3,
            force_line_count: false,
        }
    }
}

/// 按宽度在空格处换行，返回以 `\n` 连接的文本
///
/// 单词比 `width` 还长时直接截断。宽度按字符计算。
pub fn word_wrap(text: &str, options: &WrapOptions) -> String {
    let text = text.trim();
    if options.width == 0 || text.chars().count() <= options.width {
        return text.to_string();
    }

    let max_lines = options.max_lines.max(1);
    let mut lines: Vec<&str> = Vec::with_capacity(max_lines);
    let mut rest = text;

    while !rest.is_empty() {
        if lines.len() + 1 == max_lines {
            lines.push(rest);
            break;
        }

        let window_end = rest
            .char_indices()
            .nth(options.width)
            .map(|(index, _)| index)
            .unwrap_or(rest.len());
        if window_end == rest.len() {
            lines.push(rest);
            break;
        }

        let (line, next) = match rest[..window_end].rfind(' ') {
            Some(index) if index > 0 => rest.split_at(index),
            _ => {
                tracing::warn!(
                    width = options.width,
                    line = rest,
                    "no space within width, hard-breaking line"
                );
                rest.split_at(window_end)
            }
        };
        lines.push(line.trim_end());
        rest = next.trim_start();
    }

    if options.force_line_count && lines.len() != max_lines {
        return split_evenly(text, max_lines).join("\n");
    }

    lines.join("\n")
}

/// 按字符数平均切成 `count` 段，最后一段承接余数
fn split_evenly(text: &str, count: usize) -> Vec<&str> {
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(index, _)| index)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_count = boundaries.len() - 1;
    let chunk = char_count / count;

    (0..count)
        .map(|i| {
            let start = boundaries[(chunk * i).min(char_count)];
            let end = if i + 1 == count {
                text.len()
            } else {
                boundaries[(chunk * (i + 1)).min(char_count)]
            };
            &text[start..end]
        })
        .collect()
}
