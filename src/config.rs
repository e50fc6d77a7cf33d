use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::escapes::EscapeSequenceSet;
use crate::remap::SplitOptions;
use crate::schema::SchemaTable;
use crate::utils::EscapeError;

/// 转义处理配置
///
/// 所有字段都有默认值，JSON 配置文件可以只写需要修改的部分：
///
/// ```json
/// {
///   "schemas": [{"open": "{", "close": "}"}],
///   "escapes": {"preset": "ass"},
///   "split": {"delimiter": " ", "direction": "left"},
///   "encoding": "shift_jis"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EscapeConfig {
    /// 括号对
    pub schemas: SchemaTable,
    /// 字面转义序列
    pub escapes: EscapeSequenceSet,
    /// 译文切分方式
    pub split: SplitOptions,
    /// 输出目标编码（如 "shift_jis"），无法编码的字符会被丢弃
    pub encoding: Option<String>,
}

impl EscapeConfig {
    pub fn new(schemas: SchemaTable, escapes: EscapeSequenceSet) -> Self {
        Self {
            schemas,
            escapes,
            ..Self::default()
        }
    }

    pub fn with_split(mut self, split: SplitOptions) -> Self {
        self.split = split;
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// 从 JSON 字符串加载
    pub fn from_json(json: &str) -> Result<Self, EscapeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> Result<Self, EscapeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escapes::Preset;
    use crate::remap::SnapDirection;

    #[test]
    fn test_default_config() {
        let config = EscapeConfig::default();

        assert_eq!(config.schemas, SchemaTable::default());
        assert!(config.escapes.is_empty());
        assert_eq!(config.split.delimiter, " ");
        assert_eq!(config.split.direction, SnapDirection::Right);
        assert!(config.encoding.is_none());
    }

    #[test]
    fn test_partial_json() {
        let config = EscapeConfig::from_json(
            r#"{"escapes": {"preset": "ass"}, "split": {"direction": "left"}}"#,
        )
        .unwrap();

        assert_eq!(config.schemas, SchemaTable::default());
        assert_eq!(config.escapes, EscapeSequenceSet::preset(Preset::Ass));
        assert_eq!(config.split.delimiter, " ");
        assert_eq!(config.split.direction, SnapDirection::Left);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let result = EscapeConfig::from_json(
            r#"{"schemas": [{"open": "<", "close": ">"}, {"open": "<", "close": "}"}]}"#,
        );
        assert!(matches!(result, Err(EscapeError::JsonError(_))));

        let result = EscapeConfig::from_json(r#"{"escapes": {"preset": "klingon"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_builder() {
        let config = EscapeConfig::new(SchemaTable::new(), EscapeSequenceSet::preset(Preset::Python))
            .with_split(SplitOptions::new("、", SnapDirection::Left))
            .with_encoding("shift_jis");

        assert!(config.schemas.is_empty());
        assert_eq!(config.split.delimiter, "、");
        assert_eq!(config.encoding.as_deref(), Some("shift_jis"));
    }
}
