//! 半角 / 全角 ASCII 互转
//!
//! `!`..`~` 对应 U+FF01..U+FF5E，空格对应 U+3000。
//! 双引号、单引号和连字符保持不变。

const FULL_WIDTH_OFFSET: u32 = 0xFEE0;
const FULL_WIDTH_SPACE: char = '\u{3000}';
const UNCHANGED: [char; 3] = ['"', '\'', '-'];

/// 半角转全角，无法转换的字符原样保留
pub fn to_full_width(text: &str) -> String {
    text.chars().map(full_width_char).collect()
}

/// 全角转半角，无法转换的字符原样保留
pub fn to_half_width(text: &str) -> String {
    text.chars().map(half_width_char).collect()
}

fn full_width_char(c: char) -> char {
    match c {
        ' ' => FULL_WIDTH_SPACE,
        '!'..='~' if !UNCHANGED.contains(&c) => {
            char::from_u32(c as u32 + FULL_WIDTH_OFFSET).unwrap_or(c)
        }
        _ => c,
    }
}

fn half_width_char(c: char) -> char {
    match c {
        FULL_WIDTH_SPACE => ' ',
        '\u{FF01}'..='\u{FF5E}' => match char::from_u32(c as u32 - FULL_WIDTH_OFFSET) {
            Some(half) if !UNCHANGED.contains(&half) => half,
            _ => c,
        },
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_full_width() {
        assert_eq!(to_full_width("Hello, World 42!"), "Ｈｅｌｌｏ，　Ｗｏｒｌｄ　４２！");
        assert_eq!(to_full_width("{}~"), "｛｝～");
    }

    #[test]
    fn test_excluded_characters_unchanged() {
        assert_eq!(to_full_width("\"it's-ok\""), "\"ｉｔ'ｓ-ｏｋ\"");
        assert_eq!(to_half_width("＂＇－"), "＂＇－");
    }

    #[test]
    fn test_to_half_width() {
        assert_eq!(to_half_width("Ｈｅｌｌｏ，　Ｗｏｒｌｄ　４２！"), "Hello, World 42!");
    }

    #[test]
    fn test_non_ascii_passes_through() {
        assert_eq!(to_full_width("日本語 é"), "日本語　é");
        assert_eq!(to_half_width("日本語"), "日本語");
        assert_eq!(to_full_width(""), "");
    }
}
