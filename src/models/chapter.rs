use serde::{Deserialize, Serialize};

/// 检测到的一个章节/单元
///
/// `start_index..=end_index` 是属于本章的 `ParsedQuestion::index` 区间；
/// 章内没有题目时三项都为 0。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterMetadata {
    /// 文档中声明的章节序号（不一定从 1 开始，也不一定连续）
    pub chapter_number: u32,
    pub chapter_name: String,
    pub question_count: usize,
    pub start_index: usize,
    pub end_index: usize,
}

impl ChapterMetadata {
    /// 没有检测到任何章节标题时使用的合成章节
    pub const ALL_QUESTIONS: &'static str = "All Questions";

    /// 创建一个空章节（尚未分配题目）
    pub fn empty(chapter_number: u32, chapter_name: impl Into<String>) -> Self {
        Self {
            chapter_number,
            chapter_name: chapter_name.into(),
            question_count: 0,
            start_index: 0,
            end_index: 0,
        }
    }

    /// 覆盖整个题目列表的合成章节
    pub fn all_questions(total: usize) -> Self {
        Self {
            chapter_number: 1,
            chapter_name: Self::ALL_QUESTIONS.to_string(),
            question_count: total,
            start_index: 0,
            end_index: total.saturating_sub(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.question_count == 0
    }

    /// 本章是否包含指定题号
    pub fn contains(&self, index: usize) -> bool {
        !self.is_empty() && (self.start_index..=self.end_index).contains(&index)
    }
}
