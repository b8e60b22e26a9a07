//! 单个文档处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **解析**：在阻塞线程池上跑 `ParseFlow`（纯 CPU 工作，不占用异步运行时）
//! 2. **落盘**：把解析记录写入输出目录
//! 3. **统计输出**：记录题目数、章节数、答案数

use crate::config::Config;
use crate::models::{save_parsed_record, ParsedRecord, SourceDocument};
use crate::workflow::{DocumentCtx, ParseFlow};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// 单个文档的处理统计
#[derive(Debug, Clone, Default)]
pub struct DocumentStats {
    pub questions: usize,
    pub chapters: usize,
    pub answers: usize,
    /// 是否走了兜底切分
    pub fallback: bool,
    pub output_path: PathBuf,
}

/// 处理单个文档
///
/// # 参数
/// - `document`: 源文档
/// - `ctx`: 文档上下文（用于日志）
/// - `config`: 配置
///
/// # 返回
/// 返回处理统计
pub async fn process_document(
    document: SourceDocument,
    ctx: DocumentCtx,
    config: &Config,
) -> Result<DocumentStats> {
    info!("{} 开始解析，共 {} 个字符", ctx, document.text.chars().count());

    let flow = ParseFlow::new(config.into());
    let text = document.text;
    let outcome = tokio::task::spawn_blocking(move || flow.run(&text))
        .await
        .with_context(|| format!("{} 解析任务异常退出", ctx))?;

    let fallback = !outcome.pass.is_structured();
    if fallback {
        warn!("{} ⚠️ 未识别到题目格式，使用兜底切分", ctx);
    } else {
        info!("{} ✓ 采用 {} 的结果", ctx, outcome.pass);
    }

    let document = outcome.document;
    let mut stats = DocumentStats {
        questions: document.questions.len(),
        chapters: document.chapters.len(),
        answers: document.questions.iter().filter(|q| q.answer.is_some()).count(),
        fallback,
        output_path: PathBuf::new(),
    };

    let record = ParsedRecord::new(ctx.document_name.clone(), document);
    stats.output_path = save_parsed_record(&config.output_folder, &record, config.output_format)
        .await
        .with_context(|| format!("{} 写入解析结果失败", ctx))?;

    log_document_complete(&ctx, &stats);
    Ok(stats)
}

fn log_document_complete(ctx: &DocumentCtx, stats: &DocumentStats) {
    info!("{} {}", ctx, "─".repeat(40));
    info!("{} 📝 题目: {}", ctx, stats.questions);
    info!("{} 📑 章节: {}", ctx, stats.chapters);
    info!("{} ✅ 带答案: {}", ctx, stats.answers);
    info!("{} 💾 已保存至: {}", ctx, stats.output_path.display());
}
