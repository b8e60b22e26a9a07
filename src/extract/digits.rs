//! 地区数字字形 → ASCII 数字
//!
//! 固定查找表，每种文字十个字形。新增文字只需在表里加条目。

use phf::phf_map;

static REGIONAL_DIGITS: phf::Map<char, char> = phf_map! {
    // 天城文（印地语）
    '०' => '0', '१' => '1', '२' => '2', '३' => '3', '४' => '4',
    '५' => '5', '६' => '6', '७' => '7', '८' => '8', '९' => '9',
    // 孟加拉文
    '০' => '0', '১' => '1', '২' => '2', '৩' => '3', '৪' => '4',
    '৫' => '5', '৬' => '6', '৭' => '7', '৮' => '8', '৯' => '9',
    // 古吉拉特文
    '૦' => '0', '૧' => '1', '૨' => '2', '૩' => '3', '૪' => '4',
    '૫' => '5', '૬' => '6', '૭' => '7', '૮' => '8', '૯' => '9',
    // 古鲁穆奇文
    '੦' => '0', '੧' => '1', '੨' => '2', '੩' => '3', '੪' => '4',
    '੫' => '5', '੬' => '6', '੭' => '7', '੮' => '8', '੯' => '9',
    // 泰米尔文
    '௦' => '0', '௧' => '1', '௨' => '2', '௩' => '3', '௪' => '4',
    '௫' => '5', '௬' => '6', '௭' => '7', '௮' => '8', '௯' => '9',
    // 泰卢固文
    '౦' => '0', '౧' => '1', '౨' => '2', '౩' => '3', '౪' => '4',
    '౫' => '5', '౬' => '6', '౭' => '7', '౮' => '8', '౯' => '9',
    // 卡纳达文
    '೦' => '0', '೧' => '1', '೨' => '2', '೩' => '3', '೪' => '4',
    '೫' => '5', '೬' => '6', '೭' => '7', '೮' => '8', '೯' => '9',
    // 阿拉伯-印度数字
    '٠' => '0', '١' => '1', '٢' => '2', '٣' => '3', '٤' => '4',
    '٥' => '5', '٦' => '6', '٧' => '7', '٨' => '8', '٩' => '9',
    // 扩展阿拉伯-印度数字（波斯/乌尔都）
    '۰' => '0', '۱' => '1', '۲' => '2', '۳' => '3', '۴' => '4',
    '۵' => '5', '۶' => '6', '۷' => '7', '۸' => '8', '۹' => '9',
    // 全角数字
    '０' => '0', '１' => '1', '２' => '2', '３' => '3', '４' => '4',
    '５' => '5', '６' => '6', '７' => '7', '８' => '8', '９' => '9',
};

/// 单个字符转写；不在表中的原样返回
pub fn to_ascii_digit(c: char) -> char {
    REGIONAL_DIGITS.get(&c).copied().unwrap_or(c)
}

/// 整段文本转写
pub fn transliterate(text: &str) -> String {
    text.chars().map(to_ascii_digit).collect()
}

/// 解析（可能含地区字形的）数字串
pub fn parse_number(digits: &str) -> Option<u32> {
    let ascii: String = digits.trim().chars().map(to_ascii_digit).collect();
    if ascii.is_empty() || !ascii.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    ascii.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transliterate_mixed_scripts() {
        assert_eq!(transliterate("प्रश्न १२"), "प्रश्न 12");
        assert_eq!(transliterate("第３题 ٤٥"), "第3题 45");
        assert_eq!(transliterate("Question 7"), "Question 7");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("४२"), Some(42));
        assert_eq!(parse_number(" 17 "), Some(17));
        assert_eq!(parse_number("1a"), None);
        assert_eq!(parse_number(""), None);
    }
}
