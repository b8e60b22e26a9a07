//! 答案标记拆分
//!
//! 在题目块里找 `Answer: B` 一类的内联答案，拆成题面和答案两部分。
//! 单独成行且靠近块尾的答案优先；否则取第一个行内答案。

use regex::{Match, Regex};
use std::sync::LazyLock;

/// 题面最大长度（字符数）
pub const MAX_QUESTION_TEXT_CHARS: usize = 2000;

/// 单独一行的答案：`Answer: B`、`(Ans) - (c)`、`सही उत्तर: ख`、`答案：A`
static OWN_LINE_ANSWER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*[(\[【]?(?:correct\s+answer|correct\s+option|answer|ans|correct|सही\s+उत्तर|उत्तर|答案)[)\]】]?[ \t]*[:：.\-–=][ \t]*([^\n]{1,100}?)[ \t\r]*$",
    )
    .expect("valid own-line answer regex")
});

/// 行内答案：字母/数字、括号字母，或最多 100 个字符的短语
static INLINE_ANSWER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[(\[【]?(?:\b(?:correct\s+answer|answer|ans)\b|सही\s+उत्तर|उत्तर|答案)[)\]】]?[ \t]*[:：\-–=][ \t]*(\([A-Za-z0-9]\)|[A-Za-z0-9]\b|[^\n]{1,100})",
    )
    .expect("valid inline answer regex")
});

static EXTRA_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").expect("valid blank line regex"));

/// 拆分结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSplit {
    pub question_text: String,
    pub answer: Option<String>,
}

/// 拆分一个题目块
pub fn split_answer(block: &str) -> AnswerSplit {
    let found = last_own_line_answer(block).or_else(|| first_inline_answer(block));

    match found {
        Some((span, answer)) => {
            let remaining = format!("{}{}", &block[..span.start()], &block[span.end()..]);
            AnswerSplit {
                question_text: clean_question_text(&remaining),
                answer: Some(answer),
            }
        }
        None => AnswerSplit {
            question_text: clean_question_text(block),
            answer: None,
        },
    }
}

fn last_own_line_answer(block: &str) -> Option<(Match<'_>, String)> {
    OWN_LINE_ANSWER
        .captures_iter(block)
        .filter_map(|caps| {
            let span = caps.get(0)?;
            let value = clean_answer_value(caps.get(1)?.as_str())?;
            Some((span, value))
        })
        .last()
}

fn first_inline_answer(block: &str) -> Option<(Match<'_>, String)> {
    INLINE_ANSWER.captures_iter(block).find_map(|caps| {
        let span = caps.get(0)?;
        let value = clean_answer_value(caps.get(1)?.as_str())?;
        Some((span, value))
    })
}

/// 去掉包裹的括号，单个字母/数字后面的句点也去掉
fn clean_answer_value(raw: &str) -> Option<String> {
    let mut value = raw.trim();

    if let Some(inner) = value
        .strip_prefix('(')
        .and_then(|v| v.strip_suffix(')'))
        .or_else(|| value.strip_prefix('[').and_then(|v| v.strip_suffix(']')))
    {
        value = inner.trim();
    }

    if let Some(stripped) = value.strip_suffix('.') {
        if stripped.chars().count() == 1 {
            value = stripped;
        }
    }

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// 折叠多余空行、去首尾空白并截断
fn clean_question_text(text: &str) -> String {
    let collapsed = EXTRA_BLANK_LINES.replace_all(text.trim(), "\n\n");
    collapsed
        .chars()
        .take(MAX_QUESTION_TEXT_CHARS)
        .collect::<String>()
        .trim_end()
        .to_string()
}
