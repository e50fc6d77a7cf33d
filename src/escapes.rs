use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::EscapeError;

/// 内置转义序列预设
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Python 风格：`\n`、`\t`、`\u` 等
    Python,
    /// 反斜杠加任意一个英文字母
    Alphabet,
    /// ASS 字幕：`\N`、`\n`、`\h` 与细空格 U+200A
    Ass,
}

const PYTHON_SEQUENCES: &[&str] = &[
    r"\\", r"\'", r#"\""#, r"\a", r"\b", r"\f", r"\n", r"\r", r"\t", r"\v",
    r"\o", r"\x", r"\N", r"\u", r"\U",
];

const ASS_SEQUENCES: &[&str] = &[r"\N", r"\n", r"\h", "\u{200a}"];

impl Preset {
    /// 预设名称
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Python => "python",
            Preset::Alphabet => "alphabet",
            Preset::Ass => "ass",
        }
    }

    /// 预设包含的全部序列
    pub fn sequences(&self) -> Vec<String> {
        match self {
            Preset::Python => PYTHON_SEQUENCES.iter().map(|s| s.to_string()).collect(),
            Preset::Alphabet => ('a'..='z')
                .chain('A'..='Z')
                .map(|c| format!("\\{}", c))
                .collect(),
            Preset::Ass => ASS_SEQUENCES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FromStr for Preset {
    type Err = EscapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" => Ok(Preset::Python),
            "alphabet" => Ok(Preset::Alphabet),
            "ass" => Ok(Preset::Ass),
            _ => Err(EscapeError::UnknownPreset(s.to_string())),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 转义序列配置（序列化形式）
///
/// JSON 中写作 `{"preset":"python"}` 或 `{"explicit":["\\N"]}`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapeSequences {
    Preset(Preset),
    Explicit(Vec<String>),
}

impl Default for EscapeSequences {
    fn default() -> Self {
        EscapeSequences::Explicit(Vec::new())
    }
}

/// 已解析的转义序列集合
///
/// 每个序列都按字面匹配，作为一个整体的 Escaped 片段。
/// 保留首次出现的顺序，重复项会被忽略。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "EscapeSequences", into = "EscapeSequences")]
pub struct EscapeSequenceSet {
    sequences: Vec<String>,
}

impl EscapeSequenceSet {
    /// 从序列列表创建
    pub fn new<I, S>(sequences: I) -> Result<Self, EscapeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::empty();
        for sequence in sequences {
            set.insert(sequence)?;
        }
        Ok(set)
    }

    /// 空集合（第二遍扫描将不做任何事）
    pub fn empty() -> Self {
        Self { sequences: Vec::new() }
    }

    pub fn preset(preset: Preset) -> Self {
        Self {
            sequences: preset.sequences(),
        }
    }

    /// 将配置解析为集合
    pub fn resolve(config: &EscapeSequences) -> Result<Self, EscapeError> {
        match config {
            EscapeSequences::Preset(preset) => Ok(Self::preset(*preset)),
            EscapeSequences::Explicit(sequences) => Self::new(sequences.iter().cloned()),
        }
    }

    /// 添加一个序列
    pub fn insert(&mut self, sequence: impl Into<String>) -> Result<(), EscapeError> {
        let sequence = sequence.into();
        if sequence.is_empty() {
            return Err(EscapeError::InvalidEscapeSequence(
                "escape sequence must not be empty".to_string(),
            ));
        }
        if !self.contains(&sequence) {
            self.sequences.push(sequence);
        }
        Ok(())
    }

    pub fn contains(&self, sequence: &str) -> bool {
        self.sequences.iter().any(|s| s == sequence)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.sequences.iter().map(String::as_str)
    }

    pub(crate) fn as_slice(&self) -> &[String] {
        &self.sequences
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

impl TryFrom<EscapeSequences> for EscapeSequenceSet {
    type Error = EscapeError;

    fn try_from(config: EscapeSequences) -> Result<Self, Self::Error> {
        Self::resolve(&config)
    }
}

impl From<EscapeSequenceSet> for EscapeSequences {
    fn from(set: EscapeSequenceSet) -> Self {
        EscapeSequences::Explicit(set.sequences)
    }
}

impl From<Preset> for EscapeSequenceSet {
    fn from(preset: Preset) -> Self {
        Self::preset(preset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_from_str() {
        assert_eq!("python".parse::<Preset>().unwrap(), Preset::Python);
        assert_eq!("ASS".parse::<Preset>().unwrap(), Preset::Ass);
        assert!(matches!(
            "srt".parse::<Preset>(),
            Err(EscapeError::UnknownPreset(name)) if name == "srt"
        ));
    }

    #[test]
    fn test_python_preset() {
        let set = EscapeSequenceSet::preset(Preset::Python);

        assert_eq!(set.len(), 15);
        assert!(set.contains(r"\n"));
        assert!(set.contains(r"\\"));
        assert!(set.contains(r#"\""#));
        assert!(!set.contains("\n"));
    }

    #[test]
    fn test_alphabet_preset() {
        let set = EscapeSequenceSet::preset(Preset::Alphabet);

        assert_eq!(set.len(), 52);
        assert!(set.contains(r"\a"));
        assert!(set.contains(r"\Z"));
    }

    #[test]
    fn test_ass_preset() {
        let set = EscapeSequenceSet::preset(Preset::Ass);

        assert!(set.contains(r"\N"));
        assert!(set.contains("\u{200a}"));
    }

    #[test]
    fn test_new_dedups_and_rejects_empty() {
        let set = EscapeSequenceSet::new([r"\N", r"\n", r"\N"]).unwrap();
        let sequences: Vec<&str> = set.iter().collect();
        assert_eq!(sequences, vec![r"\N", r"\n"]);

        assert!(matches!(
            EscapeSequenceSet::new([r"\N", ""]),
            Err(EscapeError::InvalidEscapeSequence(_))
        ));
    }

    #[test]
    fn test_resolve_and_serde() {
        let config: EscapeSequences = serde_json::from_str(r#"{"preset":"ass"}"#).unwrap();
        assert_eq!(config, EscapeSequences::Preset(Preset::Ass));
        assert_eq!(
            EscapeSequenceSet::resolve(&config).unwrap(),
            EscapeSequenceSet::preset(Preset::Ass)
        );

        let set: EscapeSequenceSet = serde_json::from_str(r#"{"explicit":["\\z"]}"#).unwrap();
        assert!(set.contains(r"\z"));

        assert!(serde_json::from_str::<EscapeSequenceSet>(r#"{"preset":"srt"}"#).is_err());
        assert!(serde_json::from_str::<EscapeSequenceSet>(r#"{"explicit":[""]}"#).is_err());
    }
}
