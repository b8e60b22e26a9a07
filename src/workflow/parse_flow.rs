//! 文档解析流程 - 流程层
//!
//! 核心职责：定义"一份文档"的完整解析流程
//!
//! 流程顺序：
//! 1. 规范化文本
//! 2. 四次结构化抽取 + 仲裁（不足时兜底切分）
//! 3. 拆分答案、编号
//! 4. 在胜出抽取扫描的那份文本上切分章节

use tracing::{debug, info};

use crate::extract::{self, arbitrate, normalize, split_answer, ExtractOptions, Extraction, ExtractionPass};
use crate::models::{ChapterMetadata, ParsedDocument, ParsedQuestion};

/// 一次解析的完整结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub document: ParsedDocument,
    /// 产出题目的那次抽取
    pub pass: ExtractionPass,
    /// 每道题在所扫描文本中的字节偏移，与 `document.questions` 一一对应
    pub offsets: Vec<usize>,
}

/// 文档解析流程
///
/// - 只编排抽取能力层的纯函数
/// - 不做 I/O，可以在多个线程上同时使用
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseFlow {
    options: ExtractOptions,
}

impl ParseFlow {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// 执行完整流程（含章节）
    pub fn run(&self, raw: &str) -> ParseOutcome {
        let normalized = normalize(raw);
        let extraction = arbitrate(raw, &normalized, &self.options);
        let source = extraction.source_text(raw, &normalized);

        let offsets: Vec<usize> = extraction.blocks.iter().map(|b| b.offset).collect();
        let chapters = extract::chapters::segment(source, &offsets);
        log_chapters(&chapters);

        let pass = extraction.pass;
        ParseOutcome {
            document: ParsedDocument {
                questions: build_questions(extraction),
                chapters,
            },
            pass,
            offsets,
        }
    }

    /// 只抽题，不切章节
    pub fn parse(&self, raw: &str) -> Vec<ParsedQuestion> {
        let normalized = normalize(raw);
        build_questions(arbitrate(raw, &normalized, &self.options))
    }

    pub fn parse_with_chapters(&self, raw: &str) -> ParsedDocument {
        self.run(raw).document
    }
}

/// 题目块 → `ParsedQuestion`，下标按最终顺序从 0 连续编号
///
/// 兜底切分的块不拆答案，也不给题面。
fn build_questions(extraction: Extraction) -> Vec<ParsedQuestion> {
    let structured = extraction.pass.is_structured();

    extraction
        .blocks
        .into_iter()
        .enumerate()
        .map(|(index, block)| {
            if !structured {
                return ParsedQuestion {
                    index,
                    raw_text: block.text,
                    question_text: None,
                    answer: None,
                };
            }

            let split = split_answer(&block.text);
            ParsedQuestion {
                index,
                raw_text: block.text,
                question_text: Some(split.question_text),
                answer: split.answer,
            }
        })
        .collect()
}

fn log_chapters(chapters: &[ChapterMetadata]) {
    for chapter in chapters {
        debug!(
            "📑 第 {} 章 {}: {} 道题 ({}..={})",
            chapter.chapter_number,
            chapter.chapter_name,
            chapter.question_count,
            chapter.start_index,
            chapter.end_index
        );
    }
    info!("✓ 共 {} 个章节", chapters.len());
}

// ========== 便捷函数 ==========

/// 解析文档，返回题目列表（默认参数）
pub fn parse(raw: &str) -> Vec<ParsedQuestion> {
    ParseFlow::default().parse(raw)
}

pub fn parse_with_options(raw: &str, options: ExtractOptions) -> Vec<ParsedQuestion> {
    ParseFlow::new(options).parse(raw)
}

/// 解析文档，返回题目和章节（默认参数）
pub fn parse_with_chapters(raw: &str) -> ParsedDocument {
    ParseFlow::default().parse_with_chapters(raw)
}

pub fn parse_with_chapters_and_options(raw: &str, options: ExtractOptions) -> ParsedDocument {
    ParseFlow::new(options).parse_with_chapters(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_QUESTIONS: &str = "Question 1. What is 2+2?\nA) 3\nB) 4\nAnswer: B\nQuestion 2. Capital of France?\nA) Paris\nB) Lyon\nAnswer: A";

    #[test]
    fn test_answers_and_indices() {
        let _ = tracing_subscriber::fmt::try_init();

        let questions = parse(TWO_QUESTIONS);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].index, 0);
        assert_eq!(questions[1].index, 1);
        assert_eq!(questions[0].answer.as_deref(), Some("B"));
        assert_eq!(questions[1].answer.as_deref(), Some("A"));
        assert_eq!(questions[0].question_text.as_deref(), Some("What is 2+2?\nA) 3\nB) 4"));
        assert!(questions[0].raw_text.contains("Answer: B"));
    }

    #[test]
    fn test_fallback_chunks_have_no_question_text() {
        let raw = "Photosynthesis converts light energy into chemical energy stored in glucose molecules. ".repeat(6);
        let outcome = ParseFlow::default().run(&raw);
        assert_eq!(outcome.pass, ExtractionPass::Fallback);
        assert!(!outcome.document.questions.is_empty());
        assert!(outcome
            .document
            .questions
            .iter()
            .all(|q| q.question_text.is_none() && q.answer.is_none()));
    }

    #[test]
    fn test_offsets_follow_questions() {
        let outcome = ParseFlow::default().run(TWO_QUESTIONS);
        assert_eq!(outcome.offsets.len(), outcome.document.questions.len());
        assert_eq!(outcome.offsets[0], 0);
        assert!(outcome.offsets[1] > outcome.offsets[0]);
    }

    #[test]
    fn test_options_change_threshold() {
        let options = ExtractOptions {
            min_structured_questions: 1,
            ..ExtractOptions::default()
        };
        let document = parse_with_chapters_and_options(TWO_QUESTIONS, options);
        assert_eq!(document.questions.len(), 2);
        assert_eq!(document.chapters, vec![ChapterMetadata::all_questions(2)]);
        assert_eq!(parse_with_options(TWO_QUESTIONS, options), parse(TWO_QUESTIONS));
    }

    #[test]
    fn test_empty_input() {
        let document = parse_with_chapters("");
        assert!(document.questions.is_empty());
        assert_eq!(document.chapters, vec![ChapterMetadata::all_questions(0)]);
    }
}
