//! 题目/答案/章节标记词表与正则
//!
//! 两种题目边界抽取器和章节切分共用同一套词表。
//! 所有题号都在第 1 个捕获组，地区数字字形由 `digits::parse_number` 处理。

use regex::Regex;
use std::sync::LazyLock;

use super::digits;

/// 题号合理范围（排除年份、页码一类的误匹配）
pub const MIN_QUESTION_NUMBER: u32 = 1;
pub const MAX_QUESTION_NUMBER: u32 = 500;

/// 英文 "question" 及缩写（长的在前，正则按最左优先选择分支）
const QUESTION_WORDS_LATIN: &str = r"question|ques|qus|qno|qn|q";
/// 印地语 "प्रश्न" 及缩写
const QUESTION_WORDS_HINDI: &str = r"प्रश्न|प्र";

/// 标记词和题号之间的标点
const LEAD_PUNCT: &str = r"[ \t]*[.:\-–#)]*[ \t]*(?:no\.?|number|संख्या|सं\.?)?[ \t]*[.:\-–#]*[ \t]*";
/// 题号之后的标点
const TRAIL_PUNCT: &str = r"[ \t]*[.:：)\-–।、]*";

fn build(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid marker regex")
}

/// 全文扫描用的显式题目标记（英文/印地语/中文）
pub static EXPLICIT_MARKERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        build(&format!(
            r"(?i)\b(?:{QUESTION_WORDS_LATIN}){LEAD_PUNCT}(\d{{1,3}})\b{TRAIL_PUNCT}"
        )),
        build(&format!(
            r"(?:{QUESTION_WORDS_HINDI}){LEAD_PUNCT}(\d{{1,3}})\b{TRAIL_PUNCT}"
        )),
        build(&format!(r"第[ \t]*(\d{{1,3}})[ \t]*[题題]{TRAIL_PUNCT}")),
    ]
});

/// 行首裸题号：`12. Which ...`，题号后必须紧跟大写字母（或无大小写的文字）
///
/// 第 2 个捕获组是题干首字母，它的起点就是标记的终点。
pub static BARE_LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| build(r"(?m)^[ \t]*(\d{1,3})\.[ \t]+([\p{Lu}\p{Lo}])"));

/// 行模式：行首是显式标记，第 2 个捕获组是标记后的正文
pub static LINE_EXPLICIT_OPENERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        build(&format!(
            r"(?i)^(?:{QUESTION_WORDS_LATIN}){LEAD_PUNCT}(\d{{1,3}})\b{TRAIL_PUNCT}[ \t]*(.*)$"
        )),
        build(&format!(
            r"^(?:{QUESTION_WORDS_HINDI}){LEAD_PUNCT}(\d{{1,3}})\b{TRAIL_PUNCT}[ \t]*(.*)$"
        )),
        build(&format!(r"^第[ \t]*(\d{{1,3}})[ \t]*[题題]{TRAIL_PUNCT}[ \t]*(.*)$")),
    ]
});

/// 行模式：`12) text`、`(12) text`、`12. text`、`12、text`
pub static LINE_BARE_OPENER: LazyLock<Regex> =
    LazyLock::new(|| build(r"^\(?(\d{1,3})[ \t]*[.)、:：][ \t]*(.*)$"));

/// 答案行：`Answer: B`、`Ans.`、`(Answer)`、`उत्तर:`、`答案：`
pub static ANSWER_KEY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    build(
        r"(?i)^[(\[【]?(?:correct\s+answer|answer\s+key|answers?|ans|key|solution|सही\s+उत्तर|उत्तर|答案|解析)[)\]】]?[ \t]*(?:[.:：\-–=]|$)",
    )
});

/// 分值标注行：`[2 marks]`、`(5 Marks)`、`[3 अंक]`、`（4分）`
pub static MARKS_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    build(r"(?i)^[\[(（]?[ \t]*\d+(?:\.\d+)?[ \t]*(?:marks?|mks|अंक|分)[ \t]*[\])）]?$")
});

/// 章节/单元标记词
pub const CHAPTER_WORDS: &str = r"chapter|unit|lesson|ch\.?|अध्याय|इकाई|पाठ";

/// 单独一行的章节标记词（`Chapter`、`UNIT`、`अध्याय`）
pub static LONE_CHAPTER_WORD: LazyLock<Regex> =
    LazyLock::new(|| build(&format!(r"(?i)^(?:{CHAPTER_WORDS})[ \t]*(?:no\.?)?[ \t]*[.:\-–]?$")));

/// 一行行首匹配到的题目开头
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOpener<'a> {
    pub number: u32,
    /// 标记之后的同行正文
    pub text: &'a str,
}

/// 题号是否在合理范围内
pub fn in_question_range(number: u32) -> bool {
    (MIN_QUESTION_NUMBER..=MAX_QUESTION_NUMBER).contains(&number)
}

/// 判断一行（已 trim）是否开启新题
///
/// 题号需在范围内，且同行剩余文本超过 5 个字符。
pub fn match_line_opener(line: &str) -> Option<LineOpener<'_>> {
    for regex in LINE_EXPLICIT_OPENERS.iter() {
        if let Some(opener) = opener_from(regex, line) {
            return Some(opener);
        }
    }

    let opener = opener_from(&LINE_BARE_OPENER, line)?;
    // `2.5 kg` 这种小数不是题号
    if opener.text.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(opener)
}

fn opener_from<'a>(regex: &Regex, line: &'a str) -> Option<LineOpener<'a>> {
    let caps = regex.captures(line)?;
    let number = digits::parse_number(caps.get(1)?.as_str())?;
    let text = caps.get(2).map_or("", |m| m.as_str()).trim();

    if in_question_range(number) && text.chars().count() > 5 {
        Some(LineOpener { number, text })
    } else {
        None
    }
}

pub fn is_answer_key_line(line: &str) -> bool {
    ANSWER_KEY_LINE.is_match(line)
}

pub fn is_marks_annotation(line: &str) -> bool {
    MARKS_ANNOTATION.is_match(line)
}

pub fn is_lone_chapter_word(line: &str) -> bool {
    LONE_CHAPTER_WORD.is_match(line)
}
