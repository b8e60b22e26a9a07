//! 文本规范化
//!
//! 清洗从 PDF 抽出的原始文本。步骤顺序有讲究：表格保留要在空白折叠之前，
//! 否则列结构会被抹掉；换行统一要在表格保留之前，单独的 `\r` 也是行边界。
//!
//! 1. 去掉零宽字符、BOM 和其他控制字符
//! 2. 统一换行符
//! 3. 表格行改写为 ` | ` 分隔（见 [`super::table`]）
//! 4. 剩余制表符 → 单个空格
//! 5. 3 个以上连续空格 → 2 个空格
//! 6. 丢弃只有页码、装饰线或孤立数字的行
//! 7. 连续空行折叠为一个空行
//! 8. 地区数字字形 → ASCII 数字
//! 9. 去掉首尾空白
//!
//! 本步骤不会拒绝任何输入，空输入返回空串。

use regex::Regex;
use std::sync::LazyLock;

use super::{digits, markers, table};

static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {3,}").expect("valid space run regex"));

static PAGE_ARTIFACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:page[ \t]*\d+(?:[ \t]*(?:of|/)[ \t]*\d+)?|-[ \t]*\d+[ \t]*-|\d+[ \t]*/[ \t]*\d+|पृष्ठ[ \t]*\d+|第[ \t]*\d+[ \t]*页(?:[ \t]*[，,]?[ \t]*共[ \t]*\d+[ \t]*页)?)$",
    )
    .expect("valid page artifact regex")
});

static RULE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-_=]{3,}$").expect("valid rule line regex"));

static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid bare number regex"));

/// 规范化整段文本
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    // 1. 零宽/控制字符
    let cleaned = strip_invisible(raw);

    // 2. 换行统一
    let unified = cleaned.replace("\r\n", "\n").replace('\r', "\n");

    // 3. 表格行
    let tabled = unified
        .split('\n')
        .map(table::preserve_line)
        .collect::<Vec<_>>()
        .join("\n");

    // 4 + 5. 制表符、长空格串
    let spaced = tabled.replace('\t', " ");
    let spaced = SPACE_RUN.replace_all(&spaced, "  ");

    // 6 + 7. 逐行过滤伪影、折叠空行
    let filtered = drop_artifact_lines(&spaced);

    // 8 + 9.
    digits::transliterate(&filtered).trim().to_string()
}

fn strip_invisible(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}' | '\u{00AD}' => None,
            '\u{00A0}' | '\u{2007}' | '\u{202F}' => Some(' '),
            '\n' | '\r' | '\t' => Some(c),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// 是否是页码、装饰线之类的伪影行（传入已 trim 的行）
fn is_artifact_line(line: &str) -> bool {
    PAGE_ARTIFACT.is_match(line) || RULE_LINE.is_match(line)
}

fn drop_artifact_lines(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut blank_run = 0usize;
    // 上一条保留的非空行，用来识别"章节词 + 孤立编号"的多行标题
    let mut previous_content: Option<&str> = None;

    for line in text.split('\n') {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            blank_run += 1;
            if blank_run == 1 {
                lines.push("");
            }
            continue;
        }

        if is_artifact_line(trimmed) {
            continue;
        }

        // 孤立数字一般是页码，但紧跟在单独章节词之后的是章节编号
        if BARE_NUMBER.is_match(trimmed)
            && !previous_content.is_some_and(markers::is_lone_chapter_word)
        {
            continue;
        }

        blank_run = 0;
        previous_content = Some(trimmed);
        lines.push(line.trim_end());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  \n\n "), "");
    }

    #[test]
    fn test_strips_zero_width_and_unifies_newlines() {
        assert_eq!(normalize("\u{FEFF}Ques\u{200B}tion 1\r\nNext\rLast"), "Question 1\nNext\nLast");
    }

    #[test]
    fn test_preserves_table_columns() {
        let out = normalize("Metal\tDensity\nIron   7.8\nSome prose    here");
        assert_eq!(out, "Metal | Density\nIron | 7.8\nSome prose | here");
    }

    #[test]
    fn test_collapses_leading_space_runs() {
        assert_eq!(normalize("x\n      indented"), "x\n  indented");
    }

    #[test]
    fn test_bare_carriage_return_ends_table_row() {
        assert_eq!(normalize("Name\tScore\r      indented"), "Name | Score\n  indented");
        assert_eq!(normalize("Metal\tDensity\r\nIron\t7.8"), "Metal | Density\nIron | 7.8");
    }

    #[test]
    fn test_drops_artifact_lines() {
        let raw = "Intro line\nPage 3 of 10\n-----\n42\n- 7 -\nकुछ पाठ\nपृष्ठ 4\nEnd";
        assert_eq!(normalize(raw), "Intro line\nकुछ पाठ\nEnd");
    }

    #[test]
    fn test_keeps_chapter_number_after_lone_heading_word() {
        let raw = "CHAPTER\n3\nMotion in a Plane\nPage 12";
        assert_eq!(normalize(raw), "CHAPTER\n3\nMotion in a Plane");
    }

    #[test]
    fn test_collapses_blank_lines() {
        assert_eq!(normalize("a\n\n\n\n\nb\n\nc"), "a\n\nb\n\nc");
        // 伪影行被丢弃后留下的空行也会折叠
        assert_eq!(normalize("a\n\n12\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_transliterates_regional_digits() {
        assert_eq!(normalize("प्रश्न १२. कोई प्रश्न"), "प्रश्न 12. कोई प्रश्न");
    }
}
