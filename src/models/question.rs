use serde::{Deserialize, Serialize};

/// 抽取出的一道题
///
/// `index` 在一次解析结果中从 0 开始连续递增，解析时确定后不再改变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuestion {
    pub index: usize,
    /// 属于这道题的完整文本块（含选项、表格上下文）
    pub raw_text: String,
    /// 去掉答案标记后的题面；兜底切分的块没有这一项
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    /// 内联答案标记中捕获的值（字母、选项序号或短语）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl ParsedQuestion {
    /// 展示给下游的文本：有题面用题面，否则原样使用 `raw_text`
    pub fn display_text(&self) -> &str {
        self.question_text.as_deref().unwrap_or(&self.raw_text)
    }
}

impl std::fmt::Display for ParsedQuestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let preview = crate::utils::truncate_text(self.display_text(), 80);
        match &self.answer {
            Some(answer) => write!(f, "#{} {} [答案: {}]", self.index, preview, answer),
            None => write!(f, "#{} {}", self.index, preview),
        }
    }
}
