//! 批量文档处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是"全部重新解析"的入口，负责批量文档的处理和并发控制。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：写日志文件头、输出启动信息
//! 2. **批量加载**：扫描并加载输入目录下所有 `.txt` 文档
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：将文档分批次处理，每批完成后再开始下一批
//! 5. **全局统计**：汇总所有文档的处理结果

use crate::config::Config;
use crate::models::SourceDocument;
use crate::orchestrator::document_processor::{self, DocumentStats};
use crate::utils::logging;
use crate::workflow::DocumentCtx;
use anyhow::{Context, Result};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)
            .with_context(|| format!("无法创建日志文件: {}", config.output_log_file))?;

        logging::log_startup(config.max_concurrent_documents, &config.input_folder);

        Ok(Self { config })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        // 加载所有待解析的文档
        let all_documents = self.load_documents().await?;

        if all_documents.is_empty() {
            warn!("⚠️ 没有找到待解析的文本文件，程序结束");
            return Ok(ProcessingStats::default());
        }

        logging::log_documents_loaded(all_documents.len(), self.config.max_concurrent_documents);

        // 处理所有文档
        let stats = self.process_all_documents(all_documents).await?;

        // 输出最终统计
        logging::print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            stats.questions,
            &self.config.output_log_file,
        );

        Ok(stats)
    }

    /// 加载文档
    async fn load_documents(&self) -> Result<Vec<SourceDocument>> {
        info!("\n📁 正在扫描待解析的文档...");
        let documents = crate::models::load_all_text_files(&self.config.input_folder)
            .await
            .with_context(|| format!("无法加载输入目录: {}", self.config.input_folder))?;
        Ok(documents)
    }

    /// 处理所有文档
    async fn process_all_documents(&self, all_documents: Vec<SourceDocument>) -> Result<ProcessingStats> {
        let max_concurrent = self.config.max_concurrent_documents.max(1);
        let semaphore = Arc::new(Semaphore::new(max_concurrent));
        let total_documents = all_documents.len();
        let total_batches = total_documents.div_ceil(max_concurrent);
        let mut stats = ProcessingStats {
            total: total_documents,
            ..Default::default()
        };

        // 分批处理
        for (batch_index, batch_documents) in all_documents.chunks(max_concurrent).enumerate() {
            let batch_start = batch_index * max_concurrent;
            let batch_num = batch_index + 1;

            logging::log_batch_start(
                batch_num,
                total_batches,
                batch_start + 1,
                batch_start + batch_documents.len(),
                total_documents,
            );

            // 处理本批
            let batch_result = self
                .process_batch(batch_documents, batch_start, semaphore.clone())
                .await?;

            stats.success += batch_result.success;
            stats.failed += batch_result.failed;
            stats.questions += batch_result.questions;
            stats.fallback += batch_result.fallback;

            logging::log_batch_complete(batch_num, batch_result.success, batch_result.success + batch_result.failed);
        }

        Ok(stats)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch_documents: &[SourceDocument],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<BatchResult> {
        let mut batch_handles = Vec::with_capacity(batch_documents.len());

        // 为本批创建并发任务
        for (idx, document) in batch_documents.iter().enumerate() {
            let ctx = DocumentCtx::new(document.name.clone(), batch_start + idx + 1);
            let permit = semaphore.clone().acquire_owned().await?;
            let document = document.clone();
            let config = self.config.clone();

            batch_handles.push(tokio::spawn(async move {
                let _permit = permit;
                let label = ctx.to_string();
                match document_processor::process_document(document, ctx, &config).await {
                    Ok(stats) => Ok(stats),
                    Err(e) => {
                        error!("{} ❌ 处理过程中发生错误: {:#}", label, e);
                        Err(e)
                    }
                }
            }));
        }

        // 等待本批所有任务完成
        let mut result = BatchResult::default();
        for outcome in join_all(batch_handles).await {
            match outcome {
                Ok(Ok(document_stats)) => result.record(&document_stats),
                Ok(Err(_)) => result.failed += 1,
                Err(e) => {
                    error!("任务执行失败: {}", e);
                    result.failed += 1;
                }
            }
        }

        Ok(result)
    }
}

/// 处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
    /// 累计抽取的题目数
    pub questions: usize,
    /// 走兜底切分的文档数
    pub fallback: usize,
}

/// 批次处理结果
#[derive(Debug, Default)]
struct BatchResult {
    success: usize,
    failed: usize,
    questions: usize,
    fallback: usize,
}

impl BatchResult {
    fn record(&mut self, stats: &DocumentStats) {
        self.success += 1;
        self.questions += stats.questions;
        if stats.fallback {
            self.fallback += 1;
        }
    }
}
