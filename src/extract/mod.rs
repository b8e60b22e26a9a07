//! 题目抽取能力层
//!
//! 纯函数集合：输入一段文本，输出题目块。不做 I/O，不持有全局可变状态，
//! 可以对不同文档并发调用。
//!
//! ```text
//! raw ──normalizer──▶ normalized
//!  │                      │
//!  ├── pattern_mode ──────┤
//!  └── line_mode ─────────┘   四次抽取
//!              │
//!          arbiter（取题目最多的一次；不足时走 fallback 切分）
//!              │
//!     answer（拆答案） / chapters（章节区间）
//! ```

pub mod answer;
pub mod arbiter;
pub mod chapters;
pub mod digits;
pub mod fallback;
pub mod line_mode;
pub mod markers;
pub mod normalizer;
pub mod pattern_mode;
pub mod table;

use std::collections::HashSet;

pub use answer::{split_answer, AnswerSplit};
pub use arbiter::{arbitrate, ExtractOptions, Extraction, ExtractionPass};
pub use chapters::{assign_chapters, detect_headings, ChapterHeading};
pub use normalizer::normalize;
pub use table::is_table_line;

/// 结构化题目块长度窗口（字符数，两端都不含）
pub const MIN_BLOCK_CHARS: usize = 15;
pub const MAX_BLOCK_CHARS: usize = 8000;

/// 抽取出的一个题目块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBlock {
    /// 文档中声明的题号；兜底切分的块没有题号
    pub number: Option<u32>,
    /// 块起点在所扫描文本中的字节偏移
    pub offset: usize,
    pub text: String,
}

/// 结构化块长度是否落在 `(15, 8000)` 内
pub fn within_length_window(text: &str) -> bool {
    let len = text.chars().count();
    len > MIN_BLOCK_CHARS && len < MAX_BLOCK_CHARS
}

/// 按题号去重（先出现的保留），再按题号排序
///
/// `blocks` 需按文本位置排列。
pub(crate) fn dedupe_by_number(blocks: Vec<QuestionBlock>) -> Vec<QuestionBlock> {
    let mut seen = HashSet::new();
    let mut unique: Vec<QuestionBlock> = blocks
        .into_iter()
        .filter(|block| match block.number {
            Some(number) => seen.insert(number),
            None => true,
        })
        .collect();
    unique.sort_by_key(|block| block.number);
    unique
}

/// 按行切分并记录每行的字节偏移（行内容不含 `\n`）
pub(crate) fn lines_with_offsets(text: &str) -> Vec<(usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n')
        .map(|line| {
            let start = offset;
            offset += line.len();
            (start, line.strip_suffix('\n').unwrap_or(line))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(number: u32, offset: usize) -> QuestionBlock {
        QuestionBlock {
            number: Some(number),
            offset,
            text: format!("question text {}", number),
        }
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let blocks = vec![block(2, 0), block(1, 10), block(2, 20)];
        let unique = dedupe_by_number(blocks);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].number, Some(1));
        assert_eq!(unique[1].offset, 0);
    }

    #[test]
    fn test_length_window_is_exclusive() {
        assert!(!within_length_window(&"x".repeat(15)));
        assert!(within_length_window(&"x".repeat(16)));
        assert!(!within_length_window(&"x".repeat(8000)));
    }

    #[test]
    fn test_lines_with_offsets() {
        let lines = lines_with_offsets("ab\ncde\n\nf");
        assert_eq!(lines, vec![(0, "ab"), (3, "cde"), (7, ""), (8, "f")]);
    }
}
