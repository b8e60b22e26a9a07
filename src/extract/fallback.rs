//! 兜底切分
//!
//! 文本不符合任何已知题目格式时使用：先按空行分段，段数够多就用段落；
//! 否则按字节长度大致均分。切出的块只有位置意义，没有题号。

use regex::Regex;
use std::sync::LazyLock;

use super::QuestionBlock;

/// 兜底块至少要超过的字符数
pub const MIN_CHUNK_CHARS: usize = 20;

/// 均分时每块的最小字节数，短文档不至于被切成碎末
pub const MIN_BYTE_CHUNK: usize = 200;

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t\r]*\n").expect("valid paragraph break regex"));

/// 切分文本，`target` 是目标块数
pub fn chunk(text: &str, target: usize) -> Vec<QuestionBlock> {
    let target = target.max(1);

    let paragraphs = split_paragraphs(text);
    if paragraphs.len() >= target {
        return paragraphs;
    }

    split_by_length(text, target)
}

fn split_paragraphs(text: &str) -> Vec<QuestionBlock> {
    let mut blocks = Vec::new();
    let mut start = 0;

    for m in PARAGRAPH_BREAK.find_iter(text) {
        push_chunk(&mut blocks, text, start, m.start());
        start = m.end();
    }
    push_chunk(&mut blocks, text, start, text.len());

    blocks
}

fn split_by_length(text: &str, target: usize) -> Vec<QuestionBlock> {
    let total = text.len();
    let chunk_len = total.div_ceil(target).max(MIN_BYTE_CHUNK);
    let mut blocks = Vec::new();
    let mut start = 0;

    while start < total && blocks.len() < target {
        // 最后一块吞掉剩余文本
        let mut end = if blocks.len() + 1 == target {
            total
        } else {
            (start + chunk_len).min(total)
        };
        while end < total && !text.is_char_boundary(end) {
            end += 1;
        }

        // 尽量在空白处断开，但不让块缩到一半以下
        if end < total {
            if let Some(ws) = text[start..end].rfind(char::is_whitespace) {
                if ws > (end - start) / 2 {
                    end = start + ws;
                }
            }
        }

        push_chunk(&mut blocks, text, start, end);
        start = end;
    }

    blocks
}

fn push_chunk(blocks: &mut Vec<QuestionBlock>, text: &str, start: usize, end: usize) {
    let piece = &text[start..end];
    let trimmed = piece.trim();
    if trimmed.chars().count() <= MIN_CHUNK_CHARS {
        return;
    }

    let leading = piece.len() - piece.trim_start().len();
    blocks.push(QuestionBlock {
        number: None,
        offset: start + leading,
        text: trimmed.to_string(),
    });
}
