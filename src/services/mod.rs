//! 服务层（能力层）
//!
//! - `dispenser`：顺序出题（纯函数）
//! - `pointer_store`：出题指针的原子读写
//! - `question_dispatcher`：读指针、出题、写指针

pub mod dispenser;
pub mod pointer_store;
pub mod question_dispatcher;

pub use dispenser::{dispense, DispenseResult};
pub use pointer_store::{InMemoryPointerStore, PointerStore, TomlPointerStore};
pub use question_dispatcher::QuestionDispatcher;
