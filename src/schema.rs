use serde::{Deserialize, Serialize};

use crate::utils::EscapeError;

/// 一对转义括号（如 `{` 与 `}`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaPair {
    /// 开始符
    pub open: String,
    /// 结束符
    pub close: String,
}

impl SchemaPair {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

/// 转义括号表
///
/// 开始符唯一，按插入顺序保存。构造时即校验配置：
/// - 开始符与结束符都不能为空
/// - 开始符与结束符不能相同
/// - 同一个开始符不能映射到两个不同的结束符
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SchemaPair>", into = "Vec<SchemaPair>")]
pub struct SchemaTable {
    pairs: Vec<SchemaPair>,
}

impl SchemaTable {
    /// 创建空表（第一遍扫描将不做任何事）
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// 从括号对列表创建
    pub fn from_pairs<I, O, C>(pairs: I) -> Result<Self, EscapeError>
    where
        I: IntoIterator<Item = (O, C)>,
        O: Into<String>,
        C: Into<String>,
    {
        let mut table = Self::new();
        for (open, close) in pairs {
            table.insert(open, close)?;
        }
        Ok(table)
    }

    /// 添加一对括号
    pub fn insert(&mut self, open: impl Into<String>, close: impl Into<String>) -> Result<(), EscapeError> {
        let open = open.into();
        let close = close.into();

        if open.is_empty() || close.is_empty() {
            return Err(EscapeError::InvalidSchema(format!(
                "delimiters must not be empty ('{}' -> '{}')",
                open, close
            )));
        }

        if open == close {
            return Err(EscapeError::InvalidSchema(format!(
                "opening and closing delimiters must differ ('{}')",
                open
            )));
        }

        if let Some(existing) = self.closer(&open) {
            if existing == close {
                return Ok(());
            }
            return Err(EscapeError::DuplicateSchema {
                open,
                existing: existing.to_string(),
                new: close,
            });
        }

        self.pairs.push(SchemaPair { open, close });
        Ok(())
    }

    /// 获取开始符对应的结束符
    pub fn closer(&self, open: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|pair| pair.open == open)
            .map(|pair| pair.close.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SchemaPair> {
        self.pairs.iter()
    }

    pub(crate) fn pairs(&self) -> &[SchemaPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Default for SchemaTable {
    /// 默认表：半角与全角的 `<>`、`[]`、`{}`
    ///
    /// 圆括号在正文中太常见，不放进默认表。
    fn default() -> Self {
        let pairs = [
            ("<", ">"),
            ("＜", "＞"),
            ("[", "]"),
            ("［", "］"),
            ("{", "}"),
            ("｛", "｝"),
        ];

        Self {
            pairs: pairs
                .iter()
                .map(|(open, close)| SchemaPair::new(*open, *close))
                .collect(),
        }
    }
}

impl TryFrom<Vec<SchemaPair>> for SchemaTable {
    type Error = EscapeError;

    fn try_from(pairs: Vec<SchemaPair>) -> Result<Self, Self::Error> {
        Self::from_pairs(pairs.into_iter().map(|pair| (pair.open, pair.close)))
    }
}

impl From<SchemaTable> for Vec<SchemaPair> {
    fn from(table: SchemaTable) -> Self {
        table.pairs
    }
}

impl<'a> IntoIterator for &'a SchemaTable {
    type Item = &'a SchemaPair;
    type IntoIter = std::slice::Iter<'a, SchemaPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
