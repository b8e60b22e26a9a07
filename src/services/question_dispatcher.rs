//! 出题调度
//!
//! 把顺序出题和指针存储串起来：读取上次的位置，从下一个位置出题，写回新位置。
//! 整个过程在存储的一次原子更新里完成。

use crate::error::AppResult;
use crate::models::PointerKey;
use crate::services::dispenser::{dispense, DispenseResult};
use crate::services::pointer_store::PointerStore;
use tracing::{debug, info};

/// 出题调度器
pub struct QuestionDispatcher<S: PointerStore> {
    store: S,
}

impl<S: PointerStore> QuestionDispatcher<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 给指定使用者出下一批题
    ///
    /// # 参数
    /// - `key`: 使用者和文档
    /// - `questions`: 文档当前的题目列表（重新解析后长度可能变化）
    /// - `count`: 本批题数
    ///
    /// # 返回
    /// 本批题目和新的指针位置。第一次出题从 0 开始，之后从上次位置的下一个开始。
    pub fn next_batch<T: Clone>(
        &self,
        key: &PointerKey,
        questions: &[T],
        count: usize,
    ) -> AppResult<DispenseResult<T>> {
        let mut batch: Option<DispenseResult<T>> = None;

        self.store.update(key, &mut |current| {
            let start = current.map_or(0, |p| p.next_start(questions.len()));
            debug!("{} 从第 {} 题开始出题", key, start);

            let result = dispense(questions, start, count);
            let last_index = result.new_last_index;
            batch = Some(result);
            last_index
        })?;

        let result = batch.unwrap_or_else(|| dispense(questions, 0, 0));
        info!(
            "{} ✓ 出题 {} 道，指针移至 {}",
            key,
            result.questions.len(),
            result.new_last_index
        );
        Ok(result)
    }
}
