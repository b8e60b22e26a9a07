//! # Question Extract
//!
//! 从 PDF 抽出的纯文本中还原题目列表、内联答案和章节结构，
//! 并按环形顺序把题目分批发给使用者。
//!
//! ## 架构设计
//!
//! ### ① 能力层（Extract）
//! - `extract/` - 纯函数：规范化、两种题目边界抽取、仲裁、兜底切分、答案拆分、章节切分
//!
//! ### ② 服务层（Services）
//! - `services/` - 顺序出题 `dispense`，出题指针存储，`QuestionDispatcher`
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份文档"的完整解析流程
//! - `ParseFlow` - 规范化 → 抽取 → 仲裁 → 答案 → 章节
//! - `DocumentCtx` - 日志上下文
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量文档处理器，管理并发
//! - `orchestrator/document_processor` - 单个文档处理器，解析并写出结果
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, OutputFormat};
pub use error::{AppError, AppResult};
pub use extract::{ExtractOptions, ExtractionPass};
pub use models::{ChapterMetadata, ConsumerKind, ParsedDocument, ParsedQuestion, PointerKey, QuestionPointer};
pub use orchestrator::{App, ProcessingStats};
pub use services::{dispense, DispenseResult, InMemoryPointerStore, PointerStore, QuestionDispatcher, TomlPointerStore};
pub use workflow::{parse, parse_with_chapters, parse_with_chapters_and_options, parse_with_options, ParseFlow};
