//! IO 抽象层模块
//!
//! 该模块提供了文本文件读写的抽象接口，支持依赖注入和测试 mock。
//! 文本按 UTF-8 读取，每行一条；提取结果以 JSON 保存。
//!
//! # 使用示例
//!
//! ```rust,no_run
//! use std::path::Path;
//! use escape_text::io::{DefaultTextReader, TextReader};
//!
//! let reader = DefaultTextReader;
//! let file = reader.read(Path::new("subtitles.txt"))?;
//! println!("{} 行", file.lines.len());
//! # Ok::<(), escape_text::EscapeError>(())
//! ```
use std::path::Path;

use crate::string_types::ExtractedLine;
use crate::utils::EscapeError;

/// 换行符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// 以第一个换行符为准
    pub fn detect(content: &str) -> Self {
        match content.find('\n') {
            Some(index) if content[..index].ends_with('\r') => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// 按行读取的文本文件
///
/// 记录原文件的换行符和末尾是否有换行，写回时原样还原。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFile {
    /// 所有行（不含换行符）
    pub lines: Vec<String>,
    pub line_ending: LineEnding,
    /// 最后一行之后是否有换行符
    pub trailing_newline: bool,
}

impl TextFile {
    /// 新文件：`\n` 换行，末尾有换行
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            line_ending: LineEnding::Lf,
            trailing_newline: true,
        }
    }

    /// 从文本内容解析
    pub fn parse(content: &str) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        Self {
            lines: content.lines().map(str::to_string).collect(),
            line_ending: LineEnding::detect(content),
            trailing_newline: content.ends_with('\n'),
        }
    }

    /// 换成新的行，保留换行格式
    pub fn with_lines(&self, lines: Vec<String>) -> Self {
        Self {
            lines,
            line_ending: self.line_ending,
            trailing_newline: self.trailing_newline,
        }
    }

    /// 还原为文本内容
    pub fn render(&self) -> String {
        let mut content = self.lines.join(self.line_ending.as_str());
        if self.trailing_newline && !self.lines.is_empty() {
            content.push_str(self.line_ending.as_str());
        }
        content
    }
}

/// 文本文件读取 trait
///
/// # 职责
/// - 从文件系统读取文本并按行切分
/// - 不负责切分转义内容，仅负责 IO
pub trait TextReader {
    /// 读取文件，记录换行格式
    fn read(&self, path: &Path) -> Result<TextFile, EscapeError>;
}

/// 文本文件写入 trait
pub trait TextWriter {
    /// 按文件记录的换行格式写入所有行
    fn write(&self, file: &TextFile, path: &Path) -> Result<(), EscapeError>;
}

/// 默认的文本读取器（基于 std::fs）
#[derive(Debug, Clone, Default)]
pub struct DefaultTextReader;

impl TextReader for DefaultTextReader {
    fn read(&self, path: &Path) -> Result<TextFile, EscapeError> {
        let content = std::fs::read_to_string(path)?;
        Ok(TextFile::parse(&content))
    }
}

/// 默认的文本写入器（基于 std::fs）
#[derive(Debug, Clone, Default)]
pub struct DefaultTextWriter;

impl TextWriter for DefaultTextWriter {
    fn write(&self, file: &TextFile, path: &Path) -> Result<(), EscapeError> {
        ensure_parent_dir(path)?;
        std::fs::write(path, file.render())?;
        Ok(())
    }
}

/// 从 JSON 文件加载提取结果或译文
pub fn load_extracted(path: &Path) -> Result<Vec<ExtractedLine>, EscapeError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// 将提取结果保存为 JSON 文件
pub fn save_extracted(lines: &[ExtractedLine], path: &Path) -> Result<(), EscapeError> {
    ensure_parent_dir(path)?;
    let json_output = serde_json::to_string_pretty(lines)?;
    std::fs::write(path, json_output)?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<(), EscapeError> {
    // 确保父目录存在
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_text_reader() {
        let dir = tempdir().unwrap();
        let test_file = dir.path().join("lines.txt");
        std::fs::write(&test_file, "\u{feff}first <b>line</b>\nsecond\n\nfourth").unwrap();

        let file = DefaultTextReader.read(&test_file).unwrap();

        assert_eq!(file.lines, vec!["first <b>line</b>", "second", "", "fourth"]);
        assert_eq!(file.line_ending, LineEnding::Lf);
        assert!(!file.trailing_newline);
    }

    #[test]
    fn test_crlf_round_trip() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("episode.ass");
        let output = dir.path().join("episode_translated.ass");
        std::fs::write(&input, "Dialogue: {\\i1}Hi{\\i0}\r\n\r\nBye").unwrap();

        let file = DefaultTextReader.read(&input).unwrap();
        assert_eq!(file.lines, vec![r"Dialogue: {\i1}Hi{\i0}", "", "Bye"]);
        assert_eq!(file.line_ending, LineEnding::CrLf);
        assert!(!file.trailing_newline);

        let translated = file.with_lines(vec![
            r"Dialogue: {\i1}Hola{\i0}".to_string(),
            String::new(),
            "Adiós".to_string(),
        ]);
        DefaultTextWriter.write(&translated, &output).unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "Dialogue: {\\i1}Hola{\\i0}\r\n\r\nAdiós"
        );
    }

    #[test]
    fn test_unchanged_file_is_byte_identical() {
        for content in ["a\r\nb\r\n", "a\nb", "a\n", "\n", ""] {
            assert_eq!(TextFile::parse(content).render(), content);
        }
    }

    #[test]
    fn test_writer_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let test_file = dir.path().join("nested").join("subdir").join("out.txt");
        let file = TextFile::new(vec!["a".to_string(), String::new(), "c".to_string()]);

        DefaultTextWriter.write(&file, &test_file).unwrap();

        assert_eq!(std::fs::read_to_string(&test_file).unwrap(), "a\n\nc\n");
        assert_eq!(DefaultTextReader.read(&test_file).unwrap(), file);
    }

    #[test]
    fn test_extracted_json_file() {
        let dir = tempdir().unwrap();
        let json_file = dir.path().join("out").join("lines.json");
        let extracted = vec![
            ExtractedLine::new(0, r"{\i1}Hi{\i0}".to_string(), "Hi".to_string()),
            ExtractedLine::new(2, "日本語".to_string(), "日本語".to_string()),
        ];

        save_extracted(&extracted, &json_file).unwrap();
        let content = std::fs::read_to_string(&json_file).unwrap();
        assert!(content.contains("\n  {"));

        assert_eq!(load_extracted(&json_file).unwrap(), extracted);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_extracted(&dir.path().join("missing.json"));

        assert!(matches!(result, Err(EscapeError::IoError(_))));
    }
}
