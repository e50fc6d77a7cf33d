//! 批量提取与回填
//!
//! 每行相互独立，用 rayon 并行处理；输出顺序与输入行顺序一致。
use std::collections::HashMap;

use rayon::prelude::*;

use crate::config::EscapeConfig;
use crate::encoding::normalize_encoding;
use crate::remap::reinsert;
use crate::segment::segment;
use crate::string_types::ExtractedLine;
use crate::utils::{is_translatable, EscapeError};

/// 批量统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub line_count: usize,
    pub translatable_count: usize,
    pub escaped_count: usize,
    pub plain_count: usize,
}

impl std::fmt::Display for BatchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== 文本统计信息 ===")?;
        writeln!(f, "总行数: {}", self.line_count)?;
        writeln!(f, "可翻译行数: {}", self.translatable_count)?;
        writeln!(f, "转义片段数: {}", self.escaped_count)?;
        writeln!(f, "纯文本片段数: {}", self.plain_count)?;
        Ok(())
    }
}

impl std::ops::Add for BatchStats {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            line_count: self.line_count + other.line_count,
            translatable_count: self.translatable_count + other.translatable_count,
            escaped_count: self.escaped_count + other.escaped_count,
            plain_count: self.plain_count + other.plain_count,
        }
    }
}

/// 提取所有可翻译行的纯文本
///
/// 纯文本不可翻译的行（空行、只有标签或标点）会被跳过。
pub fn extract_lines(lines: &[String], config: &EscapeConfig) -> Result<Vec<ExtractedLine>, EscapeError> {
    let extracted = lines
        .par_iter()
        .enumerate()
        .map(|(index, line)| {
            let plain = segment(line, &config.schemas, &config.escapes)?.plain_text();
            if !is_translatable(&plain) {
                return Ok(None);
            }
            Ok(Some(ExtractedLine::new(index, line.clone(), plain)))
        })
        .collect::<Result<Vec<_>, EscapeError>>()?;

    let extracted: Vec<ExtractedLine> = extracted.into_iter().flatten().collect();
    tracing::debug!(lines = lines.len(), extracted = extracted.len(), "extracted lines");
    Ok(extracted)
}

/// 把译文插回原文各行
///
/// - 没有对应译文的行保持原样
/// - 记录的原文与当前行不一致时保持原样并给出警告
/// - 配置了 `encoding` 时丢弃译文中无法编码的字符
pub fn apply_translations(
    lines: &[String],
    translations: Vec<ExtractedLine>,
    config: &EscapeConfig,
) -> Result<Vec<String>, EscapeError> {
    let mut by_index: HashMap<usize, ExtractedLine> = HashMap::with_capacity(translations.len());
    for entry in translations {
        let key = entry.get_unique_key();
        if by_index.insert(entry.index, entry).is_some() {
            tracing::warn!(key = %key, "duplicate translation for line, keeping the last one");
        }
    }
    let translations = by_index;

    for entry in translations.values().filter(|entry| entry.index >= lines.len()) {
        tracing::warn!(key = %entry.get_unique_key(), "translation refers to a line that does not exist");
    }

    let output = lines
        .par_iter()
        .enumerate()
        .map(|(index, line)| {
            let Some(entry) = translations.get(&index) else {
                return Ok(line.clone());
            };

            if entry.source != *line {
                tracing::warn!(
                    key = %entry.get_unique_key(),
                    current = %line,
                    "source line changed since extraction, keeping it untranslated"
                );
                return Ok(line.clone());
            }

            let segments = segment(line, &config.schemas, &config.escapes)?;
            let translated = reinsert(&segments, entry.get_text_to_apply(), &config.split);
            match config.encoding.as_deref() {
                Some(label) => normalize_encoding(&translated, label),
                None => Ok(translated),
            }
        })
        .collect::<Result<Vec<_>, EscapeError>>()?;

    tracing::debug!(
        lines = lines.len(),
        translations = translations.len(),
        "applied translations"
    );
    Ok(output)
}

/// 统计所有行的片段信息
pub fn collect_stats(lines: &[String], config: &EscapeConfig) -> Result<BatchStats, EscapeError> {
    lines
        .par_iter()
        .map(|line| {
            let segments = segment(line, &config.schemas, &config.escapes)?;
            let plain_count = segments.plain_count();
            Ok(BatchStats {
                line_count: 1,
                translatable_count: usize::from(is_translatable(&segments.plain_text())),
                escaped_count: segments.len() - plain_count,
                plain_count,
            })
        })
        .try_reduce(BatchStats::default, |a, b| Ok(a + b))
}
