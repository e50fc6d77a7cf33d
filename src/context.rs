//! 逐行处理上下文
//!
//! 一个上下文对应一套配置，逐行绑定新的原文字符串。切分结果在第一次使用时计算，
//! 之后缓存到原文改变为止。上下文可变，不能跨线程共享；需要并行时每行各用一个
//! 上下文，或直接调用 [`crate::segment::segment`]。
//!
//! # 示例
//! ```rust
//! use escape_text::{EscapeConfig, EscapeText};
//!
//! let mut context = EscapeText::new(EscapeConfig::default());
//! context.set_subject(r"but welcome back to {\i1}Elder Tale{\i0}, Naotsugu.");
//!
//! assert_eq!(context.plain_text()?, "but welcome back to Elder Tale, Naotsugu.");
//!
//! let translated = context.reinsert("pero bienvenido de nuevo a Elder Tale, Naotsugu.")?;
//! assert_eq!(translated, r"pero bienvenido de nuevo{\i1} a Elder Tale,{\i0} Naotsugu.");
//! # Ok::<(), escape_text::EscapeError>(())
//! ```
use std::cell::OnceCell;

use crate::config::EscapeConfig;
use crate::remap;
use crate::segment::{segment, Segments};
use crate::utils::EscapeError;

#[derive(Debug, Clone)]
pub struct EscapeText {
    config: EscapeConfig,
    subject: String,
    segments: OnceCell<Segments>,
}

impl EscapeText {
    pub fn new(config: EscapeConfig) -> Self {
        Self {
            config,
            subject: String::new(),
            segments: OnceCell::new(),
        }
    }

    pub fn with_subject(config: EscapeConfig, subject: impl Into<String>) -> Self {
        let mut context = Self::new(config);
        context.set_subject(subject);
        context
    }

    /// 绑定新的原文，丢弃旧的切分缓存
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
        self.segments = OnceCell::new();
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn config(&self) -> &EscapeConfig {
        &self.config
    }

    /// 当前原文的切分结果
    pub fn segments(&self) -> Result<&Segments, EscapeError> {
        if let Some(segments) = self.segments.get() {
            return Ok(segments);
        }
        let segments = segment(&self.subject, &self.config.schemas, &self.config.escapes)?;
        Ok(self.segments.get_or_init(|| segments))
    }

    /// 送去翻译的纯文本
    pub fn plain_text(&self) -> Result<String, EscapeError> {
        Ok(self.segments()?.plain_text())
    }

    pub fn split_translation(&self, translated: &str) -> Result<Vec<String>, EscapeError> {
        Ok(remap::split_translation(self.segments()?, translated, &self.config.split))
    }

    /// 把原文的转义内容插回译文
    pub fn reinsert(&self, translated: &str) -> Result<String, EscapeError> {
        Ok(remap::reinsert(self.segments()?, translated, &self.config.split))
    }
}
