//! 题目边界抽取：全文模式
//!
//! 在全文上同时跑显式标记正则和行首裸题号正则，合并所有匹配位置，
//! 相邻两个边界之间的文本就是一道题；块内出现章节标题时截断在标题前。

use super::{chapters, dedupe_by_number, digits, markers, within_length_window, QuestionBlock};

/// 同一题号的两个匹配起点相差不超过这个字节数，视为同一个边界
const SAME_BOUNDARY_TOLERANCE: usize = 10;

/// 一个题目边界
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Boundary {
    number: u32,
    /// 标记起点
    start: usize,
    /// 标记终点（题干从这里开始）
    marker_end: usize,
}

/// 抽取题目块，按题号排序
pub fn extract(text: &str) -> Vec<QuestionBlock> {
    let mut candidates = collect_boundaries(text);
    candidates.sort_by_key(|b| (b.start, b.marker_end));
    let boundaries = resolve_overlaps(candidates);

    let mut blocks = Vec::with_capacity(boundaries.len());
    for (i, boundary) in boundaries.iter().enumerate() {
        let end = boundaries.get(i + 1).map_or(text.len(), |next| next.start);
        let body = chapters::cut_at_heading(&text[boundary.marker_end..end]).trim();

        if within_length_window(body) {
            blocks.push(QuestionBlock {
                number: Some(boundary.number),
                offset: boundary.start,
                text: body.to_string(),
            });
        }
    }

    dedupe_by_number(blocks)
}

fn collect_boundaries(text: &str) -> Vec<Boundary> {
    let mut boundaries = Vec::new();

    for regex in markers::EXPLICIT_MARKERS.iter() {
        for caps in regex.captures_iter(text) {
            let (Some(whole), Some(number)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            push_if_in_range(&mut boundaries, number.as_str(), whole.start(), whole.end());
        }
    }

    for caps in markers::BARE_LEADING_NUMBER.captures_iter(text) {
        let (Some(whole), Some(number), Some(first_letter)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        push_if_in_range(&mut boundaries, number.as_str(), whole.start(), first_letter.start());
    }

    boundaries
}

fn push_if_in_range(boundaries: &mut Vec<Boundary>, number: &str, start: usize, marker_end: usize) {
    match digits::parse_number(number) {
        Some(number) if markers::in_question_range(number) => boundaries.push(Boundary {
            number,
            start,
            marker_end,
        }),
        _ => {}
    }
}

/// 合并重复边界、丢弃与前一个标记重叠的边界
///
/// `candidates` 需按起点排序。
fn resolve_overlaps(candidates: Vec<Boundary>) -> Vec<Boundary> {
    let mut kept: Vec<Boundary> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let duplicate = kept.iter().rev().any(|k| {
            k.number == candidate.number
                && k.start.abs_diff(candidate.start) <= SAME_BOUNDARY_TOLERANCE
        });
        if duplicate {
            continue;
        }
        if kept.last().is_some_and(|last| candidate.start < last.marker_end) {
            continue;
        }
        kept.push(candidate);
    }

    kept
}
