//! 八种标签体系的数值编解码。
//!
//! `to_numeric` 把展示标签解析为序号并捕获格式描述；`from_numeric` 按同一
//! 格式描述把序号还原成标签。同一范围内统一使用起始标签捕获的格式。

use domain::LabelType;
use tracing::debug;

use crate::error::LabelError;
use crate::letters::{
    extract_prefix_and_letter, extract_prefix_and_number, grid_letter_to_number,
    grid_number_to_letter,
};

/// 罗马数字的贪婪匹配表（两字符组合优先）。
const ROMAN_VALUES: [(&str, i64); 13] = [
    ("M", 1000),
    ("CM", 900),
    ("D", 500),
    ("CD", 400),
    ("C", 100),
    ("XC", 90),
    ("L", 50),
    ("XL", 40),
    ("X", 10),
    ("IX", 9),
    ("V", 5),
    ("IV", 4),
    ("I", 1),
];

/// 小写希腊字母表，序号 1..24。
pub const GREEK_LETTERS: &str = "αβγδεζηθικλμνξοπρστυφχψω";

/// 二进制/十六进制渲染的最小数字宽度。
const MIN_RADIX_DIGITS: usize = 4;

/// 解析标签时捕获的格式描述。
///
/// 每个体系只使用其中一部分字段，其余保持默认值。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelFormat {
    /// 数字段前的字母前缀（alphanumeric）或字母段前的数字前缀（numalpha）。
    pub prefix: String,
    /// 数字段是否带前导零。
    pub leading_zeros: bool,
    /// 数字段的原始宽度（补零还原用）。
    pub pad_width: usize,
    /// 捕获的数字串（alphanumeric 前缀递增模式下固定不变）。
    pub digits: String,
    /// 字母段长度（numalpha 非递增模式下重复渲染）。
    pub letter_run: usize,
    /// 希腊字母后的数字后缀（原样保留）。
    pub suffix: String,
}

/// 把标签解析为 `(序号, 格式)`。解析失败会记录解析失败计数。
pub fn to_numeric(
    label_type: LabelType,
    increment_letter: bool,
    label: &str,
) -> Result<(i64, LabelFormat), LabelError> {
    let result = match label_type {
        LabelType::Numbers => parse_numbers(label),
        LabelType::Alphanumeric => parse_alphanumeric(increment_letter, label),
        LabelType::Letters | LabelType::Numalpha => {
            parse_numalpha(label_type, increment_letter, label)
        }
        LabelType::Roman => parse_roman(label),
        LabelType::Greek => parse_greek(label),
        LabelType::Binary => parse_radix(LabelType::Binary, label),
        LabelType::Hex => parse_radix(LabelType::Hex, label),
    };
    if let Err(err) = &result {
        floorplan_telemetry::record_label_parse_failure();
        debug!(label_type = label_type.as_str(), label, error = %err, "label parse failed");
    }
    result
}

/// 把序号按捕获的格式渲染回标签。
pub fn from_numeric(
    label_type: LabelType,
    increment_letter: bool,
    value: i64,
    format: &LabelFormat,
) -> Result<String, LabelError> {
    match label_type {
        LabelType::Numbers => render_numbers(value, format),
        LabelType::Alphanumeric => render_alphanumeric(increment_letter, value, format),
        LabelType::Letters | LabelType::Numalpha => {
            render_numalpha(increment_letter, value, format)
        }
        LabelType::Roman => render_roman(value),
        LabelType::Greek => render_greek(value, format),
        LabelType::Binary => render_binary(value),
        LabelType::Hex => render_hex(value),
    }
}

fn invalid(label_type: LabelType, label: &str) -> LabelError {
    LabelError::InvalidLabel {
        label_type: label_type.as_str(),
        label: label.to_string(),
    }
}

fn parse_numbers(label: &str) -> Result<(i64, LabelFormat), LabelError> {
    if label.is_empty() || !label.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(LabelType::Numbers, label));
    }
    let value = label
        .parse::<i64>()
        .map_err(|_| invalid(LabelType::Numbers, label))?;
    let format = LabelFormat {
        leading_zeros: label.len() > 1 && label.starts_with('0'),
        pad_width: label.len(),
        ..LabelFormat::default()
    };
    Ok((value, format))
}

fn render_numbers(value: i64, format: &LabelFormat) -> Result<String, LabelError> {
    if value < 0 {
        return Err(LabelError::NonPositiveNumber(value));
    }
    if format.leading_zeros {
        Ok(format!("{value:0width$}", width = format.pad_width))
    } else {
        Ok(value.to_string())
    }
}

fn parse_alphanumeric(
    increment_letter: bool,
    label: &str,
) -> Result<(i64, LabelFormat), LabelError> {
    let (prefix, digits) = extract_prefix_and_number(label);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(LabelType::Alphanumeric, label));
    }

    let format = LabelFormat {
        prefix: prefix.to_string(),
        leading_zeros: digits.len() > 1 && digits.starts_with('0'),
        pad_width: digits.len(),
        digits: digits.to_string(),
        ..LabelFormat::default()
    };

    let value = if increment_letter {
        // 前缀递增模式：序号由字母前缀承载，数字段固定
        grid_letter_to_number(prefix).map_err(|_| invalid(LabelType::Alphanumeric, label))?
    } else {
        digits
            .parse::<i64>()
            .map_err(|_| invalid(LabelType::Alphanumeric, label))?
    };
    Ok((value, format))
}

fn render_alphanumeric(
    increment_letter: bool,
    value: i64,
    format: &LabelFormat,
) -> Result<String, LabelError> {
    if increment_letter {
        let prefix = grid_number_to_letter(value)?;
        let number = if format.leading_zeros {
            format.digits.clone()
        } else {
            format
                .digits
                .parse::<i64>()
                .map(|digits| digits.to_string())
                .unwrap_or_else(|_| format.digits.clone())
        };
        return Ok(format!("{prefix}{number}"));
    }

    if value < 0 {
        return Err(LabelError::NonPositiveNumber(value));
    }
    let number = if format.leading_zeros {
        format!("{value:0width$}", width = format.pad_width)
    } else {
        value.to_string()
    };
    Ok(format!("{}{}", format.prefix, number))
}

fn parse_numalpha(
    label_type: LabelType,
    increment_letter: bool,
    label: &str,
) -> Result<(i64, LabelFormat), LabelError> {
    let (prefix, letters) = extract_prefix_and_letter(label);
    if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(invalid(label_type, label));
    }

    let value = if prefix.is_empty() || increment_letter {
        // 纯字母标签或整段递增模式按完整 26 进制取值
        grid_letter_to_number(letters)?
    } else {
        i64::from(letters.as_bytes()[0] - b'A' + 1)
    };

    let format = LabelFormat {
        prefix: prefix.to_string(),
        letter_run: letters.len(),
        ..LabelFormat::default()
    };
    Ok((value, format))
}

fn render_numalpha(
    increment_letter: bool,
    value: i64,
    format: &LabelFormat,
) -> Result<String, LabelError> {
    let letter = grid_number_to_letter(value)?;
    // 非递增模式按起始标签的字母段宽度重复同一字母
    let letters = if !increment_letter && format.letter_run > 0 && letter.len() == 1 {
        letter.repeat(format.letter_run)
    } else {
        letter
    };
    Ok(format!("{}{}", format.prefix, letters))
}

fn parse_roman(label: &str) -> Result<(i64, LabelFormat), LabelError> {
    if label.is_empty() || !label.is_ascii() {
        return Err(invalid(LabelType::Roman, label));
    }
    let upper = label.to_ascii_uppercase();
    let mut index = 0;
    let mut total = 0_i64;

    'scan: while index < upper.len() {
        if index + 1 < upper.len() {
            let pair = &upper[index..index + 2];
            for (numeral, numeral_value) in ROMAN_VALUES {
                if numeral.len() == 2 && numeral == pair {
                    total += numeral_value;
                    index += 2;
                    continue 'scan;
                }
            }
        }
        let single = &upper[index..index + 1];
        for (numeral, numeral_value) in ROMAN_VALUES {
            if numeral.len() == 1 && numeral == single {
                total += numeral_value;
                index += 1;
                continue 'scan;
            }
        }
        return Err(invalid(LabelType::Roman, label));
    }
    Ok((total, LabelFormat::default()))
}

fn render_roman(value: i64) -> Result<String, LabelError> {
    if !(1..=3999).contains(&value) {
        return Err(LabelError::ValueOutOfRange {
            label_type: LabelType::Roman.as_str(),
            value,
            min: 1,
            max: 3999,
        });
    }
    let mut remaining = value;
    let mut numeral = String::new();
    for (roman, roman_value) in ROMAN_VALUES {
        while remaining >= roman_value {
            numeral.push_str(roman);
            remaining -= roman_value;
        }
    }
    Ok(numeral)
}

fn parse_greek(label: &str) -> Result<(i64, LabelFormat), LabelError> {
    if label.is_empty() {
        return Err(invalid(LabelType::Greek, label));
    }

    // 数字后缀原样保留，序号仅由希腊字母决定
    let (greek_part, suffix) = match label.find(|c: char| c.is_ascii_digit()) {
        Some(idx) => label.split_at(idx),
        None => (label, ""),
    };
    let lowered = greek_part.to_lowercase();
    let mut chars = lowered.chars();
    let value = match (chars.next(), chars.next()) {
        (Some(letter), None) => GREEK_LETTERS.chars().position(|c| c == letter),
        _ => None,
    }
    .map(|idx| idx as i64 + 1)
    .ok_or_else(|| invalid(LabelType::Greek, label))?;

    let format = LabelFormat {
        suffix: suffix.to_string(),
        ..LabelFormat::default()
    };
    Ok((value, format))
}

fn render_greek(value: i64, format: &LabelFormat) -> Result<String, LabelError> {
    let count = GREEK_LETTERS.chars().count() as i64;
    let letter = if (1..=count).contains(&value) {
        GREEK_LETTERS.chars().nth(value as usize - 1)
    } else {
        None
    };
    let letter = letter.ok_or(LabelError::ValueOutOfRange {
        label_type: LabelType::Greek.as_str(),
        value,
        min: 1,
        max: count,
    })?;
    Ok(format!("{letter}{}", format.suffix))
}

fn parse_radix(label_type: LabelType, label: &str) -> Result<(i64, LabelFormat), LabelError> {
    let value = match label_type {
        LabelType::Binary => match label.strip_prefix("0b") {
            Some(rest) => i64::from_str_radix(rest, 2),
            None => label.parse::<i64>(),
        },
        _ => match label.strip_prefix("0x") {
            Some(rest) => i64::from_str_radix(rest, 16),
            None => label.parse::<i64>(),
        },
    };
    value
        .map(|parsed| (parsed, LabelFormat::default()))
        .map_err(|_| invalid(label_type, label))
}

fn render_binary(value: i64) -> Result<String, LabelError> {
    if value < 0 {
        return Err(LabelError::NonPositiveNumber(value));
    }
    Ok(format!("0b{value:0width$b}", width = MIN_RADIX_DIGITS))
}

fn render_hex(value: i64) -> Result<String, LabelError> {
    if value < 0 {
        return Err(LabelError::NonPositiveNumber(value));
    }
    Ok(format!("0x{value:0width$X}", width = MIN_RADIX_DIGITS))
}
