use serde::{Serialize, Deserialize};

/// 提取的文本行
///
/// 此结构用于文本的提取和回填：
/// - 提取时：`text` 为去掉转义内容后的纯文本
/// - 应用时：`text` 为要插回原文的译文
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedLine {
    /// 行号（从 0 开始）
    pub index: usize,
    /// 原始行，包含所有标签和转义序列
    pub source: String,
    /// 文本内容
    /// - 提取时：纯文本
    /// - 应用时：译文
    pub text: String,
}

impl ExtractedLine {
    pub fn new(index: usize, source: String, text: String) -> Self {
        ExtractedLine {
            index,
            source,
            text,
        }
    }

    /// 获取要应用的文本
    pub fn get_text_to_apply(&self) -> &str {
        &self.text
    }

    /// 生成唯一标识符用于匹配
    ///
    /// 格式：{index}|{source}
    pub fn get_unique_key(&self) -> String {
        format!("{}|{}", self.index, self.source)
    }
}
