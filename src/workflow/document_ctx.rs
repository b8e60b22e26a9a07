//! 文档处理上下文
//!
//! 封装"我正在处理第几份文档"这一信息

use std::fmt::Display;

/// 文档处理上下文
#[derive(Debug, Clone)]
pub struct DocumentCtx {
    /// 文档名
    pub document_name: String,

    /// 文档索引（从 1 开始，仅用于日志显示）
    pub document_index: usize,
}

impl DocumentCtx {
    pub fn new(document_name: impl Into<String>, document_index: usize) -> Self {
        Self {
            document_name: document_name.into(),
            document_index,
        }
    }
}

impl Display for DocumentCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[文档 #{} {}]", self.document_index, self.document_name)
    }
}
