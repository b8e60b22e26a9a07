use crate::error::AppResult;
use crate::models::{ChapterMetadata, ParsedQuestion};
use serde::{Deserialize, Serialize};

/// 待解析的源文档（上游已从 PDF 中取出纯文本）
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// 文档名（不含扩展名），同时作为文档标识
    pub name: String,
    pub text: String,
    pub file_path: Option<String>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            file_path: None,
        }
    }

    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}

/// 一次带章节的解析结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub questions: Vec<ParsedQuestion>,
    pub chapters: Vec<ChapterMetadata>,
}

impl ParsedDocument {
    /// 序列化为持久层按文档存放的 JSON 块
    pub fn to_blob(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// 从持久层取回的 JSON 块还原
    pub fn from_blob(blob: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(blob)?)
    }

    /// 指定章节内的题目
    pub fn questions_in_chapter(&self, chapter_number: u32) -> Vec<&ParsedQuestion> {
        let Some(chapter) = self
            .chapters
            .iter()
            .find(|c| c.chapter_number == chapter_number)
        else {
            return Vec::new();
        };

        self.questions
            .iter()
            .filter(|q| chapter.contains(q.index))
            .collect()
    }
}

/// 批量重解析时写到输出目录的一条记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedRecord {
    pub source: String,
    pub parsed_at: String,
    pub question_count: usize,
    pub questions: Vec<ParsedQuestion>,
    pub chapters: Vec<ChapterMetadata>,
}

impl ParsedRecord {
    pub fn new(source: impl Into<String>, document: ParsedDocument) -> Self {
        Self {
            source: source.into(),
            parsed_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            question_count: document.questions.len(),
            questions: document.questions,
            chapters: document.chapters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParsedDocument {
        ParsedDocument {
            questions: vec![
                ParsedQuestion {
                    index: 0,
                    raw_text: "What is 2+2?\nAnswer: B".to_string(),
                    question_text: Some("What is 2+2?".to_string()),
                    answer: Some("B".to_string()),
                },
                ParsedQuestion {
                    index: 1,
                    raw_text: "Name the capital of France.".to_string(),
                    question_text: None,
                    answer: None,
                },
            ],
            chapters: vec![ChapterMetadata {
                chapter_number: 3,
                chapter_name: "Arithmetic".to_string(),
                question_count: 1,
                start_index: 1,
                end_index: 1,
            }],
        }
    }

    #[test]
    fn test_blob_uses_camel_case_and_skips_missing_fields() {
        let blob = sample().to_blob().unwrap();
        assert!(blob.contains("\"rawText\""));
        assert!(blob.contains("\"chapterNumber\":3"));
        assert_eq!(blob.matches("\"answer\"").count(), 1);

        let restored = ParsedDocument::from_blob(&blob).unwrap();
        assert_eq!(restored, sample());
    }

    #[test]
    fn test_questions_in_chapter() {
        let doc = sample();
        let in_chapter = doc.questions_in_chapter(3);
        assert_eq!(in_chapter.len(), 1);
        assert_eq!(in_chapter[0].index, 1);
        assert!(doc.questions_in_chapter(9).is_empty());
    }
}
