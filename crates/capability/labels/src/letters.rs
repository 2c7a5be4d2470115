//! 26 进制字母坐标与默认轴换算。
//!
//! 字母坐标采用双射 26 进制：A=1 … Z=26，AA=27 … ZZZ=18278。
//! 字母轴的回绕周期固定为 18278（ZZZ），与标签宽度无关。

use crate::error::LabelError;

/// 字母轴回绕周期（AAA-ZZZ 共 18278 个格位）。
pub const LETTER_WRAP: i64 = 18278;

/// 数字转字母坐标：1 -> A，26 -> Z，27 -> AA，703 -> AAA。
pub fn grid_number_to_letter(number: i64) -> Result<String, LabelError> {
    if number < 1 {
        return Err(LabelError::NonPositiveNumber(number));
    }
    let mut remaining = number;
    let mut letters = String::new();
    while remaining > 0 {
        let mut remainder = remaining % 26;
        if remainder == 0 {
            remainder = 26;
        }
        letters.insert(0, (b'A' + remainder as u8 - 1) as char);
        remaining = (remaining - 1) / 26;
    }
    Ok(letters)
}

/// 字母坐标转数字：A -> 1，Z -> 26，AA -> 27。
pub fn grid_letter_to_number(letters: &str) -> Result<i64, LabelError> {
    if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(LabelError::InvalidLabel {
            label_type: "letters",
            label: letters.to_string(),
        });
    }
    Ok(letters
        .bytes()
        .fold(0_i64, |acc, b| acc * 26 + i64::from(b - b'A' + 1)))
}

/// 在首个字母处切分标签：`"02EE"` -> `("02", "EE")`，无字母时前缀为空。
pub fn extract_prefix_and_letter(label: &str) -> (&str, &str) {
    match label.find(|c: char| c.is_ascii_alphabetic()) {
        Some(idx) => label.split_at(idx),
        None => ("", label),
    }
}

/// 在首个数字处切分标签：`"A01"` -> `("A", "01")`，无数字时前缀为空。
pub fn extract_prefix_and_number(label: &str) -> (&str, &str) {
    match label.find(|c: char| c.is_ascii_digit()) {
        Some(idx) => label.split_at(idx),
        None => ("", label),
    }
}

/// 越界坐标按 18278 回绕后再转字母。
pub fn letter_conversion(location: i64) -> Result<String, LabelError> {
    let mut adjusted = location;
    if adjusted < 1 {
        adjusted += LETTER_WRAP;
    } else if adjusted > LETTER_WRAP {
        adjusted -= LETTER_WRAP;
    }
    grid_number_to_letter(adjusted)
}

/// 默认轴换算：种子空间的位置 -> 展示标签（考虑步长与字母回绕）。
pub fn axis_init_label_conversion(
    axis_origin: i64,
    axis_location: &str,
    step: i64,
    is_letters: bool,
) -> Result<String, LabelError> {
    let location = parse_axis_value(axis_location, is_letters)?;
    let converted = axis_origin + (location - axis_origin) * step;
    if is_letters {
        letter_conversion(converted)
    } else {
        Ok(converted.to_string())
    }
}

/// 默认轴换算的逆向：展示标签 -> 存储位置。
///
/// 命中某个自定义范围（仅比较起止的数值区间）时标签原样返回；
/// 否则反推步进并按 18278 处理字母回绕。
pub fn axis_clean_label_conversion(
    axis_origin: i64,
    axis_label: &str,
    step: i64,
    is_letters: bool,
    custom_ranges: &[(String, String)],
) -> Result<String, LabelError> {
    for (start, end) in custom_ranges {
        let bounds = if is_letters {
            (
                grid_letter_to_number(start),
                grid_letter_to_number(end),
                grid_letter_to_number(axis_label),
            )
        } else {
            (
                parse_axis_value(start, false),
                parse_axis_value(end, false),
                parse_axis_value(axis_label, false),
            )
        };
        if let (Ok(start_val), Ok(end_val), Ok(label_val)) = bounds
            && start_val <= label_val
            && label_val <= end_val
        {
            return Ok(axis_label.to_string());
        }
    }

    let label_value = parse_axis_value(axis_label, is_letters)?;
    let mut position_difference = label_value - axis_origin;
    if step < 0 {
        if label_value > axis_origin {
            position_difference -= LETTER_WRAP;
        }
    } else if label_value < axis_origin {
        position_difference += LETTER_WRAP;
    }

    let mut original_location = axis_origin + floor_div(position_difference, step);
    if is_letters {
        if original_location < 1 {
            original_location += LETTER_WRAP;
        } else if original_location > LETTER_WRAP {
            original_location -= LETTER_WRAP;
        }
    }
    Ok(original_location.to_string())
}

fn parse_axis_value(label: &str, is_letters: bool) -> Result<i64, LabelError> {
    if is_letters {
        grid_letter_to_number(label)
    } else {
        label.parse::<i64>().map_err(|_| LabelError::InvalidLabel {
            label_type: "numbers",
            label: label.to_string(),
        })
    }
}

/// 向负无穷取整的除法（步长可为负）。
fn floor_div(dividend: i64, divisor: i64) -> i64 {
    let quotient = dividend / divisor;
    if dividend % divisor != 0 && (dividend < 0) != (divisor < 0) {
        quotient - 1
    } else {
        quotient
    }
}
