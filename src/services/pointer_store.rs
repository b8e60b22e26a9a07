//! 出题指针存储
//!
//! ## 职责
//!
//! 保存每个（使用者, 文档）上次发到的题目位置。
//! 同一个键的"读取-计算-写回"必须是原子的，否则并发出题会重复或跳题，
//! 所以接口只暴露 [`PointerStore::update`]，由实现方持锁完成整个过程。

use crate::error::{AppError, AppResult};
use crate::models::{PointerKey, QuestionPointer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;

/// 指针存储
pub trait PointerStore: Send + Sync {
    /// 读取指针，不存在时返回 `None`
    fn load(&self, key: &PointerKey) -> AppResult<Option<QuestionPointer>>;

    /// 原子地更新指针
    ///
    /// `compute` 拿到当前指针（可能不存在），返回要写回的 `last_index`。
    /// 返回写回后的值。
    fn update(
        &self,
        key: &PointerKey,
        compute: &mut dyn FnMut(Option<&QuestionPointer>) -> usize,
    ) -> AppResult<usize>;
}

/// 内存指针存储
#[derive(Debug, Default)]
pub struct InMemoryPointerStore {
    pointers: Mutex<HashMap<PointerKey, QuestionPointer>>,
}

impl InMemoryPointerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PointerStore for InMemoryPointerStore {
    fn load(&self, key: &PointerKey) -> AppResult<Option<QuestionPointer>> {
        let pointers = self
            .pointers
            .lock()
            .map_err(|_| AppError::lock_poisoned(key.to_string()))?;
        Ok(pointers.get(key).cloned())
    }

    fn update(
        &self,
        key: &PointerKey,
        compute: &mut dyn FnMut(Option<&QuestionPointer>) -> usize,
    ) -> AppResult<usize> {
        let mut pointers = self
            .pointers
            .lock()
            .map_err(|_| AppError::lock_poisoned(key.to_string()))?;

        let last_index = compute(pointers.get(key));
        pointers.insert(key.clone(), QuestionPointer::new(key.clone(), last_index));
        Ok(last_index)
    }
}

/// 指针文件的内容
#[derive(Debug, Default, Serialize, Deserialize)]
struct PointerFile {
    #[serde(default)]
    pointers: Vec<QuestionPointer>,
}

/// TOML 文件指针存储
///
/// 所有指针存在同一个文件里，每次更新整体重写。
/// 只保证同一进程内的原子性。
#[derive(Debug)]
pub struct TomlPointerStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl TomlPointerStore {
    /// # 参数
    /// - `path`: 指针文件路径，不存在时在第一次更新时创建
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_file(&self) -> AppResult<PointerFile> {
        let path_str = self.path.display().to_string();
        if !self.path.exists() {
            return Ok(PointerFile::default());
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| AppError::file_read_failed(&path_str, e))?;
        toml::from_str(&content).map_err(|e| AppError::toml_parse_failed(path_str, e))
    }

    fn write_file(&self, file: &PointerFile) -> AppResult<()> {
        let path_str = self.path.display().to_string();
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AppError::file_write_failed(&path_str, e))?;
        }

        let content = toml::to_string(file)?;
        fs::write(&self.path, content).map_err(|e| AppError::file_write_failed(path_str, e))
    }
}

impl PointerStore for TomlPointerStore {
    fn load(&self, key: &PointerKey) -> AppResult<Option<QuestionPointer>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| AppError::lock_poisoned(key.to_string()))?;

        let file = self.read_file()?;
        Ok(file.pointers.into_iter().find(|p| &p.key == key))
    }

    fn update(
        &self,
        key: &PointerKey,
        compute: &mut dyn FnMut(Option<&QuestionPointer>) -> usize,
    ) -> AppResult<usize> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| AppError::lock_poisoned(key.to_string()))?;

        let mut file = self.read_file()?;
        let position = file.pointers.iter().position(|p| &p.key == key);
        let last_index = compute(position.map(|i| &file.pointers[i]));

        match position {
            Some(i) => file.pointers[i].last_index = last_index,
            None => file
                .pointers
                .push(QuestionPointer::new(key.clone(), last_index)),
        }

        self.write_file(&file)?;
        debug!("{} 指针已写入 {}: {}", key, self.path.display(), last_index);
        Ok(last_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConsumerKind;

    fn key(consumer: &str) -> PointerKey {
        PointerKey::new(consumer, ConsumerKind::Student, "physics-ch1")
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "question_extract_{}_{}_{}.toml",
            name,
            std::process::id(),
            chrono::Local::now().timestamp_nanos_opt().unwrap_or_default()
        ))
    }

    #[test]
    fn test_in_memory_update_sees_previous_value() {
        let store = InMemoryPointerStore::new();
        assert!(store.load(&key("s1")).unwrap().is_none());

        store.update(&key("s1"), &mut |current| {
            assert!(current.is_none());
            4
        })
        .unwrap();
        let updated = store
            .update(&key("s1"), &mut |current| current.map_or(0, |p| p.last_index + 1))
            .unwrap();
        assert_eq!(updated, 5);
        assert_eq!(store.load(&key("s1")).unwrap().unwrap().last_index, 5);
        assert!(store.load(&key("s2")).unwrap().is_none());
    }

    #[test]
    fn test_toml_store_persists_across_instances() {
        let path = temp_path("pointer_store");

        let store = TomlPointerStore::new(&path);
        store.update(&key("s1"), &mut |_| 3).unwrap();
        store.update(&key("s2"), &mut |_| 7).unwrap();

        let reopened = TomlPointerStore::new(&path);
        assert_eq!(reopened.load(&key("s1")).unwrap().unwrap().last_index, 3);
        assert_eq!(reopened.load(&key("s2")).unwrap().unwrap().last_index, 7);

        reopened
            .update(&key("s1"), &mut |current| current.map_or(0, |p| p.last_index + 1))
            .unwrap();
        assert_eq!(store.load(&key("s1")).unwrap().unwrap().last_index, 4);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_toml_store_reports_corrupt_file() {
        let path = temp_path("corrupt");
        fs::write(&path, "pointers = [[[").unwrap();

        let store = TomlPointerStore::new(&path);
        let err = store.load(&key("s1")).unwrap_err();
        assert!(matches!(err, AppError::Serialize(_)));

        let _ = fs::remove_file(&path);
    }
}
