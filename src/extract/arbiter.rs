//! 抽取仲裁
//!
//! 两种抽取器分别跑规范化文本和原始文本，共四次；取题目最多的一次
//! （题目越多视为还原越完整，数量相同保留先跑的）。
//! 最优结果不足阈值时认为文档不是可识别的题目格式，改用兜底切分。

use tracing::{debug, info, warn};

use super::{fallback, line_mode, pattern_mode, QuestionBlock};
use crate::config::Config;

/// 抽取参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// 结构化结果至少需要的题目数
    pub min_structured_questions: usize,
    /// 兜底切分的目标块数
    pub fallback_chunk_target: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            min_structured_questions: 5,
            fallback_chunk_target: 150,
        }
    }
}

impl From<&Config> for ExtractOptions {
    fn from(config: &Config) -> Self {
        Self {
            min_structured_questions: config.min_structured_questions,
            fallback_chunk_target: config.fallback_chunk_target,
        }
    }
}

/// 产出结果的那一次抽取
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionPass {
    PatternNormalized,
    LineNormalized,
    PatternRaw,
    LineRaw,
    Fallback,
}

impl ExtractionPass {
    /// 参与比较的结构化抽取，按评估顺序排列
    pub const STRUCTURED: [ExtractionPass; 4] = [
        ExtractionPass::PatternNormalized,
        ExtractionPass::LineNormalized,
        ExtractionPass::PatternRaw,
        ExtractionPass::LineRaw,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExtractionPass::PatternNormalized => "全文模式/规范化文本",
            ExtractionPass::LineNormalized => "行模式/规范化文本",
            ExtractionPass::PatternRaw => "全文模式/原始文本",
            ExtractionPass::LineRaw => "行模式/原始文本",
            ExtractionPass::Fallback => "兜底切分",
        }
    }

    /// 是否带题号（兜底切分不带）
    pub fn is_structured(self) -> bool {
        self != ExtractionPass::Fallback
    }

    /// 这次抽取扫描的是原始文本
    pub fn scans_raw(self) -> bool {
        matches!(self, ExtractionPass::PatternRaw | ExtractionPass::LineRaw)
    }

    fn run(self, raw: &str, normalized: &str) -> Vec<QuestionBlock> {
        match self {
            ExtractionPass::PatternNormalized => pattern_mode::extract(normalized),
            ExtractionPass::LineNormalized => line_mode::extract(normalized),
            ExtractionPass::PatternRaw => pattern_mode::extract(raw),
            ExtractionPass::LineRaw => line_mode::extract(raw),
            ExtractionPass::Fallback => Vec::new(),
        }
    }
}

impl std::fmt::Display for ExtractionPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 仲裁结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub pass: ExtractionPass,
    /// 偏移量相对于 `pass` 扫描的那份文本
    pub blocks: Vec<QuestionBlock>,
}

impl Extraction {
    /// 块偏移量所对应的文本
    pub fn source_text<'a>(&self, raw: &'a str, normalized: &'a str) -> &'a str {
        if self.pass.scans_raw() {
            raw
        } else {
            normalized
        }
    }
}

/// 跑四次抽取并选出最优结果
pub fn arbitrate(raw: &str, normalized: &str, options: &ExtractOptions) -> Extraction {
    let mut best: Option<Extraction> = None;

    for pass in ExtractionPass::STRUCTURED {
        let blocks = pass.run(raw, normalized);
        debug!("🔍 {}: {} 道题", pass, blocks.len());

        if best.as_ref().map_or(true, |b| blocks.len() > b.blocks.len()) {
            best = Some(Extraction { pass, blocks });
        }
    }

    let best = best.unwrap_or(Extraction {
        pass: ExtractionPass::PatternNormalized,
        blocks: Vec::new(),
    });

    if best.blocks.len() >= options.min_structured_questions {
        info!("✓ 采用 {} 的结果: {} 道题", best.pass, best.blocks.len());
        return best;
    }

    let chunks = fallback::chunk(normalized, options.fallback_chunk_target);
    if chunks.len() > best.blocks.len() {
        warn!(
            "⚠️ 结构化抽取只找到 {} 道题（阈值 {}），改用兜底切分: {} 块",
            best.blocks.len(),
            options.min_structured_questions,
            chunks.len()
        );
        Extraction {
            pass: ExtractionPass::Fallback,
            blocks: chunks,
        }
    } else {
        warn!(
            "⚠️ 结构化抽取只找到 {} 道题，兜底切分也没有更多结果，原样返回",
            best.blocks.len()
        );
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::normalize;

    fn numbered_questions(count: usize) -> String {
        (1..=count)
            .map(|n| format!("Question {n}. Explain concept number {n} in your own words."))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_prefers_structured_result_above_threshold() {
        // 行模式同样找到 6 道，平手保留先跑的全文模式
        let raw = numbered_questions(6);
        let extraction = arbitrate(&raw, &normalize(&raw), &ExtractOptions::default());
        assert_eq!(extraction.pass, ExtractionPass::PatternNormalized);
        assert_eq!(extraction.blocks.len(), 6);
    }

    #[test]
    fn test_falls_back_for_unstructured_text() {
        let raw = "The mitochondria is the powerhouse of the cell and it produces energy. ".repeat(8);
        let extraction = arbitrate(&raw, &normalize(&raw), &ExtractOptions::default());
        assert_eq!(extraction.pass, ExtractionPass::Fallback);
        assert!(!extraction.blocks.is_empty());
    }

    #[test]
    fn test_keeps_small_structured_result_when_fallback_is_not_larger() {
        let raw = "Question 1. What is 2+2?\nA) 3\nB) 4\nAnswer: B\nQuestion 2. Capital of France?\nA) Paris\nB) Lyon\nAnswer: A";
        let extraction = arbitrate(raw, &normalize(raw), &ExtractOptions::default());
        assert!(extraction.pass.is_structured());
        assert_eq!(extraction.blocks.len(), 2);
    }

    #[test]
    fn test_custom_threshold() {
        let raw = numbered_questions(3);
        let options = ExtractOptions {
            min_structured_questions: 3,
            ..ExtractOptions::default()
        };
        let extraction = arbitrate(&raw, &normalize(&raw), &options);
        assert!(extraction.pass.is_structured());
        assert_eq!(extraction.blocks.len(), 3);
    }
}
