//! 章节切分
//!
//! 逐行扫描章节/单元标题，然后按"最近的前置标题"把题目归到各章。
//!
//! 支持的标题排版：
//! - 单行：`Chapter 1: Real Numbers`、`UNIT 4 - Motion`、`第3章 函数`
//! - 编号单独成行：`Chapter 2` 后 1~3 行内是标题
//! - 大字号拆行：`CHAPTER` / `2` / `Polynomials`（编号在词后 1~2 行，标题在编号后 1~3 行）；
//!   极简排版 `Unit` / `3` / `Magnetism`（三行紧挨着）是它的特例
//!
//! 题目位置使用抽取时记录的偏移量，不做子串搜索，
//! 重复出现的样板文字不会把题目归错章。

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::{digits, lines_with_offsets, markers};
use crate::models::ChapterMetadata;

/// 章节编号合理范围
pub const MAX_CHAPTER_NUMBER: u32 = 100;

const MAX_TITLE_CHARS: usize = 120;

static SINGLE_LINE_HEADINGS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let words = markers::CHAPTER_WORDS;
    vec![
        Regex::new(&format!(
            r"(?i)^(?:{words})[ \t]*(?:no\.?)?[ \t]*[.:#\-–]?[ \t]*(\d{{1,3}})(?:[ \t]*[.:：\-–—)|][ \t]*|[ \t]+)(\S.*)$"
        ))
        .expect("valid chapter heading regex"),
        Regex::new(r"^第[ \t]*(\d{1,3})[ \t]*(?:章|单元|單元|课|課)[ \t]*[.:：、\-–—]?[ \t]*(\S.*)$")
            .expect("valid chapter heading regex"),
    ]
});

static NUMBERED_HEADINGS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let words = markers::CHAPTER_WORDS;
    vec![
        Regex::new(&format!(
            r"(?i)^(?:{words})[ \t]*(?:no\.?)?[ \t]*[.:#\-–]?[ \t]*(\d{{1,3}})[ \t]*[.:：\-–—]?$"
        ))
        .expect("valid numbered heading regex"),
        Regex::new(r"^第[ \t]*(\d{1,3})[ \t]*(?:章|单元|單元|课|課)$").expect("valid numbered heading regex"),
    ]
});

static BARE_NUMBER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3})[.:]?$").expect("valid bare number regex"));

/// 检测到的章节标题
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterHeading {
    pub number: u32,
    pub name: String,
    /// 标题（首行）在文本中的字节偏移
    pub offset: usize,
}

/// 检测全部章节标题；按章节号去重（先出现的保留），按位置排序
pub fn detect_headings(text: &str) -> Vec<ChapterHeading> {
    let lines: Vec<(usize, &str)> = lines_with_offsets(text)
        .into_iter()
        .map(|(offset, line)| (offset, line.trim()))
        .collect();

    let mut headings: Vec<ChapterHeading> = Vec::new();
    let mut push = |number: u32, name: &str, offset: usize| {
        if (1..=MAX_CHAPTER_NUMBER).contains(&number) && !headings.iter().any(|h| h.number == number) {
            headings.push(ChapterHeading {
                number,
                name: name.to_string(),
                offset,
            });
        }
    };

    for i in 0..lines.len() {
        let (offset, line) = lines[i];
        if line.is_empty() {
            continue;
        }

        if let Some((number, title)) = match_single_line(line) {
            push(number, title, offset);
            continue;
        }

        if let Some(number) = match_numbered(line) {
            if let Some(title) = find_title(&lines, i + 1, 3) {
                push(number, title, offset);
            }
            continue;
        }

        // 编号紧跟章节词、标题紧跟编号的极简排版也走这里
        if markers::is_lone_chapter_word(line) {
            let number_line = (i + 1..=i + 2)
                .take_while(|&k| k < lines.len())
                .find_map(|k| bare_number(lines[k].1).map(|number| (k, number)));
            if let Some((k, number)) = number_line {
                if let Some(title) = find_title(&lines, k + 1, 3) {
                    push(number, title, offset);
                }
            }
        }
    }

    headings.sort_by_key(|h| h.offset);
    headings
}

/// 一行（已 trim）是否是章节标题的首行
///
/// 抽取器用它截断题目块，标题文字不进入上一题的正文。
pub fn starts_heading(line: &str) -> bool {
    markers::is_lone_chapter_word(line) || match_single_line(line).is_some() || match_numbered(line).is_some()
}

/// 截掉块内从第一行标题起的内容（第一行是题干本身，不检查）
pub fn cut_at_heading(body: &str) -> &str {
    lines_with_offsets(body)
        .into_iter()
        .skip(1)
        .find(|(_, line)| starts_heading(line.trim()))
        .map_or(body, |(offset, _)| &body[..offset])
}

fn match_single_line(line: &str) -> Option<(u32, &str)> {
    SINGLE_LINE_HEADINGS.iter().find_map(|regex| {
        let caps = regex.captures(line)?;
        let number = digits::parse_number(caps.get(1)?.as_str())?;
        let title = caps.get(2)?.as_str().trim();
        is_plausible_title(title).then_some((number, title))
    })
}

fn match_numbered(line: &str) -> Option<u32> {
    NUMBERED_HEADINGS.iter().find_map(|regex| {
        let caps = regex.captures(line)?;
        digits::parse_number(caps.get(1)?.as_str())
    })
}

fn bare_number(line: &str) -> Option<u32> {
    let caps = BARE_NUMBER_LINE.captures(line)?;
    digits::parse_number(caps.get(1)?.as_str())
}

/// 在 `start` 起的 `window` 行内找第一行像标题的文本（跳过空行）
fn find_title<'a>(lines: &[(usize, &'a str)], start: usize, window: usize) -> Option<&'a str> {
    lines
        .iter()
        .skip(start)
        .take(window)
        .map(|&(_, line)| line)
        .filter(|line| !line.is_empty())
        .find(|line| is_plausible_title(line))
}

/// 标题：有字母、不是数字、不是题目开头或答案行，长度适中
fn is_plausible_title(line: &str) -> bool {
    let len = line.chars().count();
    (2..=MAX_TITLE_CHARS).contains(&len)
        && line.chars().any(char::is_alphabetic)
        && bare_number(line).is_none()
        && markers::match_line_opener(line).is_none()
        && !markers::is_answer_key_line(line)
}

/// 把题目分配到章节
///
/// `question_offsets[i]` 是第 i 道题在同一份文本中的偏移；
/// `headings` 需按位置排序。没有任何标题时返回一个覆盖全部题目的合成章节。
///
/// 按题目下标顺序分配，章节只进不退：题号顺序和文本位置不一致时
/// （例如正文里先提到了"见第 12 题"），落在前面章节的题归入当前章节。
/// 这样每章都是一段连续、互不重叠的下标区间，`question_count` 等于区间长度。
/// 第一个标题之前的题目不属于任何章节。
pub fn assign_chapters(headings: &[ChapterHeading], question_offsets: &[usize]) -> Vec<ChapterMetadata> {
    if headings.is_empty() {
        return vec![ChapterMetadata::all_questions(question_offsets.len())];
    }

    let mut chapters: Vec<ChapterMetadata> = headings
        .iter()
        .map(|h| ChapterMetadata::empty(h.number, h.name.clone()))
        .collect();
    let mut cursor: Option<usize> = None;
    let mut unassigned = 0usize;
    let mut reordered = 0usize;

    for (index, &offset) in question_offsets.iter().enumerate() {
        // 最后一个位置不晚于题目的标题
        let by_position = headings.partition_point(|h| h.offset <= offset).checked_sub(1);
        let slot = match (by_position, cursor) {
            (Some(found), Some(current)) if found < current => {
                reordered += 1;
                current
            }
            (None, Some(current)) => {
                reordered += 1;
                current
            }
            (Some(found), _) => found,
            (None, None) => {
                unassigned += 1;
                continue;
            }
        };
        cursor = Some(slot);

        let chapter = &mut chapters[slot];
        if chapter.question_count == 0 {
            chapter.start_index = index;
        }
        chapter.end_index = index;
        chapter.question_count += 1;
    }

    if unassigned > 0 {
        debug!("{} 道题位于第一个章节标题之前，未归入任何章节", unassigned);
    }
    if reordered > 0 {
        debug!("{} 道题的题号顺序与文本位置不一致，归入当前章节", reordered);
    }

    chapters.sort_by_key(|c| c.chapter_number);
    chapters
}

/// 检测标题并分配题目
pub fn segment(text: &str, question_offsets: &[usize]) -> Vec<ChapterMetadata> {
    let headings = detect_headings(text);
    debug!("📑 检测到 {} 个章节标题", headings.len());
    assign_chapters(&headings, question_offsets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers_and_names(text: &str) -> Vec<(u32, String)> {
        detect_headings(text)
            .into_iter()
            .map(|h| (h.number, h.name))
            .collect()
    }

    #[test]
    fn test_single_line_headings() {
        let text = "Chapter 1: Real Numbers\nsome text\nUNIT 4 - Motion\nअध्याय 5. प्रकाश\n第6章 函数与方程";
        assert_eq!(
            numbers_and_names(text),
            vec![
                (1, "Real Numbers".to_string()),
                (4, "Motion".to_string()),
                (5, "प्रकाश".to_string()),
                (6, "函数与方程".to_string()),
            ]
        );
    }

    #[test]
    fn test_multi_line_heading() {
        let text = "CHAPTER\n\n2\n\nPolynomials\nQuestion 1. Find the zeroes of the polynomial.";
        let headings = detect_headings(text);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].number, 2);
        assert_eq!(headings[0].name, "Polynomials");
        assert_eq!(headings[0].offset, 0);
    }

    #[test]
    fn test_numbered_heading_with_title_below() {
        let text = "Chapter 3\nLinear Equations in Two Variables";
        assert_eq!(
            numbers_and_names(text),
            vec![(3, "Linear Equations in Two Variables".to_string())]
        );
    }

    #[test]
    fn test_title_must_be_plausible() {
        // 标题位置是题目开头，不算章节
        assert!(detect_headings("Chapter 3\nQ1. What is a linear equation?").is_empty());
        assert!(detect_headings("Unit\n7\n42").is_empty());
    }

    #[test]
    fn test_dedupes_by_chapter_number() {
        let text = "Chapter 1: Real Numbers\nChapter 1: Real Numbers (continued)";
        let headings = detect_headings(text);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].name, "Real Numbers");
    }

    #[test]
    fn test_assign_by_nearest_preceding_heading() {
        let headings = vec![
            ChapterHeading { number: 2, name: "Polynomials".into(), offset: 100 },
            ChapterHeading { number: 1, name: "Real Numbers".into(), offset: 0 },
            ChapterHeading { number: 3, name: "Empty".into(), offset: 300 },
        ];
        let mut sorted = headings.clone();
        sorted.sort_by_key(|h| h.offset);

        let chapters = assign_chapters(&sorted, &[10, 50, 90, 150, 200]);
        assert_eq!(chapters.len(), 3);
        assert_eq!((chapters[0].chapter_number, chapters[0].question_count), (1, 3));
        assert_eq!((chapters[0].start_index, chapters[0].end_index), (0, 2));
        assert_eq!((chapters[1].start_index, chapters[1].end_index), (3, 4));
        assert_eq!(chapters[2], ChapterMetadata::empty(3, "Empty"));
    }

    #[test]
    fn test_minimal_layout() {
        assert_eq!(
            numbers_and_names("Some intro text\nUnit\n3\nMagnetism\nQ1. Define magnetic flux density."),
            vec![(3, "Magnetism".to_string())]
        );
    }

    #[test]
    fn test_out_of_order_numbering_keeps_ranges_disjoint() {
        // 题号排序后：Q1(第1章) Q2(第2章) Q3(第1章) Q4(第2章) Q5(第1章)
        let headings = vec![
            ChapterHeading { number: 1, name: "Alpha".into(), offset: 0 },
            ChapterHeading { number: 2, name: "Beta".into(), offset: 100 },
        ];
        let chapters = assign_chapters(&headings, &[10, 110, 30, 130, 50]);

        assert_eq!((chapters[0].start_index, chapters[0].end_index, chapters[0].question_count), (0, 0, 1));
        assert_eq!((chapters[1].start_index, chapters[1].end_index, chapters[1].question_count), (1, 4, 4));
        for chapter in &chapters {
            assert_eq!(chapter.end_index - chapter.start_index + 1, chapter.question_count);
        }
        assert!(chapters[0].end_index < chapters[1].start_index);
    }

    #[test]
    fn test_cut_at_heading() {
        let body = "Express 156 as a product of primes.\nChapter 2: Polynomials";
        assert_eq!(cut_at_heading(body), "Express 156 as a product of primes.\n");
        assert_eq!(cut_at_heading("CHAPTER 3 facts are listed.\nMore text"), "CHAPTER 3 facts are listed.\nMore text");
        assert_eq!(cut_at_heading("Name the planet.\nUNIT\n4\nMotion"), "Name the planet.\n");
    }

    #[test]
    fn test_questions_before_first_heading_are_unassigned() {
        let headings = vec![ChapterHeading { number: 1, name: "Only".into(), offset: 50 }];
        let chapters = assign_chapters(&headings, &[10, 60]);
        assert_eq!(chapters[0].question_count, 1);
        assert_eq!(chapters[0].start_index, 1);
    }

    #[test]
    fn test_no_headings_yields_synthetic_chapter() {
        let chapters = segment("Question 1. No chapters anywhere in here", &[0, 10, 20]);
        assert_eq!(chapters, vec![ChapterMetadata::all_questions(3)]);
        assert_eq!(chapters[0].chapter_name, "All Questions");
        assert_eq!(chapters[0].end_index, 2);
    }
}
