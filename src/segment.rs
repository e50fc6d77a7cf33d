//! 转义片段切分
//!
//! 把 `'pie {\i0}pies{\i}, piez'` 切成
//! `[Plain("pie "), Escaped("{\i0}"), Plain("pies"), Escaped("{\i}"), Plain(", piez")]`。
//!
//! 分两遍：
//! 1. 括号对：每次取剩余文本中位置最靠前的开始符，连同第一个匹配的结束符整体作为 Escaped。
//! 2. 字面转义序列：只在第一遍得到的 Plain 片段内部查找，括号内部不会再次扫描。
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::escapes::EscapeSequenceSet;
use crate::schema::{SchemaPair, SchemaTable};
use crate::utils::EscapeError;

/// 一个文本片段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Segment {
    /// 可翻译的纯文本
    Plain(String),
    /// 需要原样保留的控制内容
    Escaped(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain(text) | Segment::Escaped(text) => text,
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, Segment::Plain(_))
    }

    pub fn is_escaped(&self) -> bool {
        matches!(self, Segment::Escaped(_))
    }
}

/// 切分结果
///
/// 不包含空的 Plain 片段；按顺序拼接所有片段即得到原字符串。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Segments(Vec<Segment>);

impl Segments {
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Segment] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Segment> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Plain 片段数量
    pub fn plain_count(&self) -> usize {
        self.0.iter().filter(|segment| segment.is_plain()).count()
    }

    /// 按顺序遍历 Plain 片段的文本
    pub fn plain_parts(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|segment| match segment {
            Segment::Plain(text) => Some(text.as_str()),
            Segment::Escaped(_) => None,
        })
    }

    /// 按顺序遍历 Escaped 片段的文本
    pub fn escaped_parts(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|segment| match segment {
            Segment::Escaped(text) => Some(text.as_str()),
            Segment::Plain(_) => None,
        })
    }

    /// 去掉所有转义内容后的纯文本，即送去翻译的内容
    pub fn plain_text(&self) -> String {
        self.plain_parts().collect()
    }
}

impl fmt::Display for Segments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            f.write_str(segment.text())?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Segments {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Segments {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// 切分字符串
///
/// # 错误
/// - `UnclosedDelimiter`: 开始符之后找不到对应的结束符
/// - `CountMismatch`: 有开始符被包在另一个括号片段内部（嵌套或交叉）
pub fn segment(
    source: &str,
    schemas: &SchemaTable,
    escapes: &EscapeSequenceSet,
) -> Result<Segments, EscapeError> {
    let bracketed = split_schemas(source, schemas)?;

    let segments: Vec<Segment> = if escapes.is_empty() {
        bracketed
    } else {
        bracketed
            .into_iter()
            .flat_map(|segment| match segment {
                Segment::Plain(text) => split_literals(&text, escapes),
                escaped => vec![escaped],
            })
            .collect()
    };

    debug_assert_eq!(
        segments.iter().map(Segment::text).collect::<String>(),
        source
    );

    let segments: Vec<Segment> = segments
        .into_iter()
        .filter(|segment| !(segment.is_plain() && segment.text().is_empty()))
        .collect();

    tracing::debug!(
        segments = segments.len(),
        plain = segments.iter().filter(|s| s.is_plain()).count(),
        "segmented line"
    );

    Ok(Segments(segments))
}

/// 在 `haystack` 中查找位置最靠前的键
///
/// 同一位置有多个键匹配时，取最长的键；长度相同则取字典序最小的键。
pub(crate) fn find_leftmost<'k, T>(
    haystack: &str,
    items: &'k [T],
    key: impl Fn(&T) -> &str,
) -> Option<(usize, &'k T)> {
    items
        .iter()
        .filter_map(|item| haystack.find(key(item)).map(|index| (index, item)))
        .min_by(|a, b| {
            let (ka, kb) = (key(a.1), key(b.1));
            a.0.cmp(&b.0)
                .then_with(|| kb.len().cmp(&ka.len()))
                .then_with(|| ka.cmp(kb))
        })
}

/// 统计不重叠的最左最长匹配次数
fn count_matches<T>(haystack: &str, items: &[T], key: impl Fn(&T) -> &str + Copy) -> usize {
    let mut count = 0;
    let mut rest = haystack;
    while let Some((index, item)) = find_leftmost(rest, items, key) {
        count += 1;
        rest = &rest[index + key(item).len()..];
    }
    count
}

fn schema_open(pair: &SchemaPair) -> &str {
    &pair.open
}

/// 第一遍：括号对
///
/// 返回的列表可能含有空 Plain 片段，由调用方统一过滤。
fn split_schemas(source: &str, schemas: &SchemaTable) -> Result<Vec<Segment>, EscapeError> {
    let pairs = schemas.pairs();
    let expected = count_matches(source, pairs, schema_open);
    if expected == 0 {
        return Ok(vec![Segment::Plain(source.to_string())]);
    }

    let mut segments = Vec::with_capacity(expected * 2 + 1);
    let mut rest = source;
    let mut found = 0;

    for _ in 0..expected {
        let Some((index, pair)) = find_leftmost(rest, pairs, schema_open) else {
            break;
        };

        let body = index + pair.open.len();
        let Some(close_at) = rest[body..].find(pair.close.as_str()) else {
            return Err(EscapeError::UnclosedDelimiter {
                open: pair.open.clone(),
                close: pair.close.clone(),
                input: source.to_string(),
            });
        };
        let end = body + close_at + pair.close.len();

        segments.push(Segment::Plain(rest[..index].to_string()));
        segments.push(Segment::Escaped(rest[index..end].to_string()));
        rest = &rest[end..];
        found += 1;
    }

    if found != expected || find_leftmost(rest, pairs, schema_open).is_some() {
        return Err(EscapeError::CountMismatch {
            expected,
            found,
            input: source.to_string(),
        });
    }

    segments.push(Segment::Plain(rest.to_string()));
    Ok(segments)
}

/// 第二遍：字面转义序列
fn split_literals(text: &str, escapes: &EscapeSequenceSet) -> Vec<Segment> {
    let sequences = escapes.as_slice();
    let expected = count_matches(text, sequences, String::as_str);
    if expected == 0 {
        return vec![Segment::Plain(text.to_string())];
    }

    let mut segments = Vec::with_capacity(expected * 2 + 1);
    let mut rest = text;

    for _ in 0..expected {
        let Some((index, sequence)) = find_leftmost(rest, sequences, String::as_str) else {
            break;
        };
        let end = index + sequence.len();

        segments.push(Segment::Plain(rest[..index].to_string()));
        segments.push(Segment::Escaped(rest[index..end].to_string()));
        rest = &rest[end..];
    }

    debug_assert!(find_leftmost(rest, sequences, String::as_str).is_none());

    segments.push(Segment::Plain(rest.to_string()));
    segments
}
