//! 注音（ruby / 振り仮名）标签剥离
//!
//! 把 `<span class='pie'><ruby>膳<rt>ぜ</rt>所<rt>ぜ</rt></ruby>から</span>` 还原为 `膳所から`：
//! - 可选地去掉最外层标签
//! - 每个 `<ruby …>…</ruby>` 元素替换为其内容，并删除内容里所有 `<rt …>…</rt>`

/// 剥离选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RubyOptions {
    /// 需要展开的标签名（如 "ruby"），为 `None` 时只处理外层标签
    pub inner_tag: Option<String>,
    /// 展开时整体删除的嵌套标签名（如 "rt"）
    pub nested_tag: Option<String>,
    /// 去掉第一个 `>` 之前和最后一个 `<` 之后的内容
    pub remove_outer: bool,
}

impl Default for RubyOptions {
    fn default() -> Self {
        Self {
            inner_tag: Some("ruby".to_string()),
            nested_tag: Some("rt".to_string()),
            remove_outer: false,
        }
    }
}

/// 提取注音标签中的正文
pub fn extract_ruby_base(text: &str, options: &RubyOptions) -> String {
    if !text.contains('<') || !text.contains('>') {
        return text.to_string();
    }

    let mut text = if options.remove_outer {
        strip_outer_tag(text)
    } else {
        text
    };

    let Some(inner_tag) = options.inner_tag.as_deref() else {
        return text.to_string();
    };

    let mut output = String::with_capacity(text.len());
    while let Some(element) = find_element(text, inner_tag) {
        output.push_str(&text[..element.start]);
        let body = &text[element.body.clone()];
        match options.nested_tag.as_deref() {
            Some(nested_tag) => output.push_str(&remove_elements(body, nested_tag)),
            None => output.push_str(body),
        }
        text = &text[element.end..];
    }
    output.push_str(text);
    output
}

/// 去掉最外层标签，如 `<span class='pie'>stuff</span>` -> `stuff`
fn strip_outer_tag(text: &str) -> &str {
    match (text.find('>'), text.rfind('<')) {
        (Some(open_end), Some(close_start)) if open_end < close_start => &text[open_end + 1..close_start],
        _ => "",
    }
}

/// 一个完整元素在文本中的位置
struct Element {
    start: usize,
    body: std::ops::Range<usize>,
    end: usize,
}

/// 查找第一个完整的 `<tag …>…</tag>` 元素
///
/// 没有结束标签的元素不算，保持原样。
fn find_element(text: &str, tag: &str) -> Option<Element> {
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);

    let mut search_from = 0;
    while let Some(found) = text[search_from..].find(&open) {
        let start = search_from + found;
        let after_name = start + open.len();

        // `<rt>` 不应匹配 `<rtc>`
        let boundary = text[after_name..].chars().next();
        if !matches!(boundary, Some(c) if c == '>' || c == '/' || c.is_whitespace()) {
            search_from = after_name;
            continue;
        }

        let open_end = after_name + text[after_name..].find('>')? + 1;
        let body_end = open_end + text[open_end..].find(&close)?;

        return Some(Element {
            start,
            body: open_end..body_end,
            end: body_end + close.len(),
        });
    }
    None
}

/// 删除所有完整的 `<tag …>…</tag>` 元素（连同内容）
fn remove_elements(text: &str, tag: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(element) = find_element(rest, tag) {
        output.push_str(&rest[..element.start]);
        rest = &rest[element.end..];
    }
    output.push_str(rest);
    output
}
