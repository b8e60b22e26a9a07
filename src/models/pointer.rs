use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 使用者类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsumerKind {
    Student,
    Guest,
}

impl ConsumerKind {
    pub fn name(self) -> &'static str {
        match self {
            ConsumerKind::Student => "student",
            ConsumerKind::Guest => "guest",
        }
    }
}

/// 指针的键：谁（使用者）在读哪份文档
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerKey {
    pub consumer_id: String,
    pub consumer_kind: ConsumerKind,
    pub document_id: String,
}

impl PointerKey {
    pub fn new(
        consumer_id: impl Into<String>,
        consumer_kind: ConsumerKind,
        document_id: impl Into<String>,
    ) -> Self {
        Self {
            consumer_id: consumer_id.into(),
            consumer_kind,
            document_id: document_id.into(),
        }
    }
}

impl Display for PointerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}#{} 文档#{}]",
            self.consumer_kind.name(),
            self.consumer_id,
            self.document_id
        )
    }
}

/// 每个（使用者, 文档）上次发到的题目位置
///
/// 第一次出题时创建，之后每次出题前读取、出题后覆盖。
/// 文档重新解析后题目数可能变化，读取时总是对新长度取模。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPointer {
    pub last_index: usize,
    pub key: PointerKey,
}

impl QuestionPointer {
    pub fn new(key: PointerKey, last_index: usize) -> Self {
        Self { key, last_index }
    }

    /// 下一次出题的起始位置
    pub fn next_start(&self, total: usize) -> usize {
        if total == 0 {
            0
        } else {
            (self.last_index % total + 1) % total
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_start_wraps_and_tolerates_shrunk_lists() {
        let key = PointerKey::new("1", ConsumerKind::Student, "doc");
        assert_eq!(QuestionPointer::new(key.clone(), 2).next_start(3), 0);
        assert_eq!(QuestionPointer::new(key.clone(), 0).next_start(3), 1);
        assert_eq!(QuestionPointer::new(key.clone(), 9).next_start(4), 2);
        assert_eq!(QuestionPointer::new(key, 5).next_start(0), 0);
    }

    #[test]
    fn test_key_display() {
        let key = PointerKey::new("42", ConsumerKind::Guest, "physics");
        assert_eq!(key.to_string(), "[guest#42 文档#physics]");
    }
}
