use thiserror::Error;
use std::path::Path;

/// 自定义错误类型
#[derive(Error, Debug)]
pub enum EscapeError {
    #[error("Unclosed delimiter '{open}' (expected '{close}') in: {input}")]
    UnclosedDelimiter {
        open: String,
        close: String,
        input: String,
    },

    #[error("Escape schema count mismatch: expected {expected}, found {found} in: {input}")]
    CountMismatch {
        expected: usize,
        found: usize,
        input: String,
    },

    #[error("Opening delimiter '{open}' is already mapped to '{existing}', cannot map it to '{new}'")]
    DuplicateSchema {
        open: String,
        existing: String,
        new: String,
    },

    #[error("Invalid escape schema: {0}")]
    InvalidSchema(String),

    #[error("Invalid escape sequence: {0}")]
    InvalidEscapeSequence(String),

    #[error("Unknown escape sequence preset: {0}")]
    UnknownPreset(String),

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// 判断纯文本是否值得送去翻译
///
/// 去掉首尾空白后不能为空，并且至少包含一个字母或数字（含 CJK 字符）。
pub fn is_translatable(text: &str) -> bool {
    let text = text.trim();

    if text.is_empty() {
        return false;
    }

    text.chars().any(char::is_alphanumeric)
}

/// 创建文件备份
pub fn create_backup(file_path: &Path) -> Result<std::path::PathBuf, EscapeError> {
    if !file_path.exists() {
        return Err(EscapeError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "原文件不存在"
        )));
    }

    let timestamp = chrono::Local::now().format("%Y-%m-%d-%H-%M-%S");
    let extension = match file_path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{}.{}.bak", ext, timestamp),
        None => format!("{}.bak", timestamp),
    };
    let backup_path = file_path.with_extension(extension);

    std::fs::copy(file_path, &backup_path)?;

    Ok(backup_path)
}

/// 测试辅助：捕获闭包执行期间输出的日志
#[cfg(test)]
pub(crate) fn capture_logs<F: FnOnce()>(f: F) -> String {
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let captured = Captured::default();
    let sink = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || sink.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = captured.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}
