//! 顺序出题
//!
//! 从题目列表里按环形顺序取一批题，返回新的指针位置。
//! 纯函数，不读写任何存储；指针的持久化见 [`crate::services::pointer_store`]。

use serde::{Deserialize, Serialize};

/// 一次出题的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispenseResult<T> {
    pub questions: Vec<T>,
    /// 本批最后一道题的位置，下一批从它的下一个位置开始
    pub new_last_index: usize,
}

/// 从 `start` 开始取 `count` 道题，越过末尾时回到开头
///
/// 第 i 道题取 `(start + i) mod N`，新指针为 `(start + count - 1) mod N`。
/// `count` 可以大于 N，同一道题会按顺序重复出现。
/// 列表为空时返回空批次、指针 0；`count` 为 0 时指针停在 `start` 的前一个位置。
pub fn dispense<T: Clone>(questions: &[T], start: usize, count: usize) -> DispenseResult<T> {
    let total = questions.len();
    if total == 0 {
        return DispenseResult {
            questions: Vec::new(),
            new_last_index: 0,
        };
    }

    let start = start % total;
    let batch = (0..count)
        .map(|i| questions[(start + i) % total].clone())
        .collect();
    // count 为 0 时不能直接减 1
    let new_last_index = (start + count % total + total - 1) % total;

    DispenseResult {
        questions: batch,
        new_last_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_around_end() {
        let result = dispense(&["q0", "q1", "q2"], 2, 4);
        assert_eq!(result.questions, vec!["q2", "q0", "q1", "q2"]);
        assert_eq!(result.new_last_index, 2);
    }

    #[test]
    fn test_empty_list() {
        let result = dispense::<&str>(&[], 7, 3);
        assert!(result.questions.is_empty());
        assert_eq!(result.new_last_index, 0);
    }

    #[test]
    fn test_start_beyond_length_is_reduced() {
        let result = dispense(&[10, 11, 12, 13], 9, 2);
        assert_eq!(result.questions, vec![11, 12]);
        assert_eq!(result.new_last_index, 2);
    }

    #[test]
    fn test_zero_count_keeps_position() {
        let result = dispense(&[1, 2, 3], 0, 0);
        assert!(result.questions.is_empty());
        assert_eq!(result.new_last_index, 2);
    }

    #[test]
    fn test_full_rotations_return_each_item_equally() {
        let items: Vec<usize> = (0..5).collect();
        let result = dispense(&items, 3, 10);
        for item in &items {
            assert_eq!(result.questions.iter().filter(|q| *q == item).count(), 2);
        }
        assert_eq!(result.new_last_index, 2);
    }
}
