//! 表格结构保留
//!
//! 把看起来像表格的行统一改写成 ` | ` 分隔，
//! 避免后面的空白折叠把列合并、或者把列误当成题目边界。

use regex::Regex;
use std::sync::LazyLock;

/// 统一的列分隔符
pub const COLUMN_DELIMITER: &str = " | ";

/// 两个非空白字符之间的 3 个以上空格
static WIDE_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S {3,}\S").expect("valid wide gap regex"));

/// 制表符串（连同两侧空格）或 3 个以上空格
static COLUMN_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" *\t[\t ]*| {3,}").expect("valid column gap regex"));

/// 判断一行是否像表格
pub fn is_table_line(line: &str) -> bool {
    line.contains('|') || line.contains('\t') || WIDE_GAP.is_match(line) || is_separator_row(line)
}

/// `+-----+-----+` 一类的分隔行
fn is_separator_row(line: &str) -> bool {
    line.chars().count() > 10
        && line
            .chars()
            .all(|c| c.is_whitespace() || matches!(c, '-' | '|' | '+'))
}

/// 表格行改写列间隔，其余行原样返回
///
/// 传入的行不含换行符（`\r` 已在规范化时统一成 `\n`）。
pub fn preserve_line(line: &str) -> String {
    if !is_table_line(line) {
        return line.to_string();
    }
    COLUMN_GAP.replace_all(line.trim(), COLUMN_DELIMITER).into_owned()
}
