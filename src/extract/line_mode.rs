//! 题目边界抽取：行模式
//!
//! 比全文模式保守：只在行首找题号，然后逐行决定是否吸收后续行。
//! 吸收规则是一张平铺的决策表（见 [`absorb`]），用显式下标循环实现，
//! 终止条件一目了然。

use std::collections::VecDeque;

use super::{chapters, dedupe_by_number, lines_with_offsets, markers, table, within_length_window, QuestionBlock};

/// 短于这个字符数且没有结构信号的行视为折行，用空格拼接
const MAX_WRAP_LINE_CHARS: usize = 200;

/// 表格上下文最多保留的行数
const MAX_TABLE_CONTEXT_LINES: usize = 20;

/// 前置表格上下文的标签，便于下游区分前言和题干
pub const TABLE_CONTEXT_OPEN: &str = "[TABLE]";
pub const TABLE_CONTEXT_CLOSE: &str = "[/TABLE]";

/// 抽取题目块，按题号排序
pub fn extract(text: &str) -> Vec<QuestionBlock> {
    let lines = lines_with_offsets(text);
    let mut table_context: VecDeque<&str> = VecDeque::new();
    let mut blocks = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let (offset, line) = lines[i];
        let trimmed = line.trim();

        let Some(opener) = markers::match_line_opener(trimmed) else {
            if table::is_table_line(trimmed) {
                table_context.push_back(trimmed);
                if table_context.len() > MAX_TABLE_CONTEXT_LINES {
                    table_context.pop_front();
                }
            } else if !trimmed.is_empty() {
                // 表格和题目之间隔了正文，上下文作废
                table_context.clear();
            }
            i += 1;
            continue;
        };

        let (body, next) = absorb(&lines, i + 1, opener.text);
        if let Some(text) = close_block(body, &table_context) {
            blocks.push(QuestionBlock {
                number: Some(opener.number),
                offset,
                text,
            });
        }
        table_context.clear();
        i = next;
    }

    dedupe_by_number(blocks)
}

/// 从 `start` 行开始吸收后续行，返回题目正文和第一个未消费的行号
///
/// | 行                         | 动作                                   |
/// |----------------------------|----------------------------------------|
/// | 空行                       | 跳过，继续                             |
/// | 分值标注 `[2 marks]`       | 跳过，继续                             |
/// | 新题开头                   | 停止，不消费                           |
/// | 章节标题首行               | 停止，不消费                           |
/// | 答案行                     | 吸收它和紧随的非空、非开题行，然后停止 |
/// | 表格行                     | 吸收，继续                             |
/// | < 200 字符、无结构信号     | 空格拼接吸收，继续                     |
/// | 其他                       | 停止                                   |
fn absorb(lines: &[(usize, &str)], start: usize, first_text: &str) -> (String, usize) {
    let mut body = first_text.to_string();
    let mut j = start;

    while j < lines.len() {
        let line = lines[j].1.trim();

        if line.is_empty() || markers::is_marks_annotation(line) {
            j += 1;
            continue;
        }

        if markers::match_line_opener(line).is_some() || chapters::starts_heading(line) {
            break;
        }

        if markers::is_answer_key_line(line) {
            push_line(&mut body, line);
            j += 1;
            while j < lines.len() {
                let next = lines[j].1.trim();
                if next.is_empty() || markers::match_line_opener(next).is_some() || chapters::starts_heading(next) {
                    break;
                }
                push_line(&mut body, next);
                j += 1;
            }
            break;
        }

        if table::is_table_line(line) {
            push_line(&mut body, line);
            j += 1;
            continue;
        }

        if line.chars().count() < MAX_WRAP_LINE_CHARS {
            if !body.is_empty() {
                body.push(' ');
            }
            body.push_str(line);
            j += 1;
            continue;
        }

        break;
    }

    (body, j)
}

fn push_line(body: &mut String, line: &str) {
    if !body.is_empty() {
        body.push('\n');
    }
    body.push_str(line);
}

/// 长度过滤，然后前置表格上下文
///
/// 加上上下文后超出长度窗口时只保留题目本身。
fn close_block(body: String, table_context: &VecDeque<&str>) -> Option<String> {
    if !within_length_window(&body) {
        return None;
    }
    if table_context.is_empty() {
        return Some(body);
    }

    let context = table_context.iter().copied().collect::<Vec<_>>().join("\n");
    let with_context = format!("{TABLE_CONTEXT_OPEN}\n{context}\n{TABLE_CONTEXT_CLOSE}\n{body}");
    if within_length_window(&with_context) {
        Some(with_context)
    } else {
        Some(body)
    }
}
