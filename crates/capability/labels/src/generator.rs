//! 轴标签序列生成。
//!
//! 自定义范围按 `order` 依次展开；数量不足时从默认方案续接，
//! 默认起点为 `origin_seed + 已产出数 × axis_step`。

use domain::{Axis, AxisLabels, CustomAxisLabel, FloorPlan, LabelType};
use tracing::debug;

use crate::codec::{from_numeric, to_numeric};
use crate::error::LabelError;
use crate::letters::{
    LETTER_WRAP, extract_prefix_and_letter, extract_prefix_and_number, grid_letter_to_number,
    grid_number_to_letter,
};

/// 生成指定轴的前 `count` 个展示标签。
pub fn generate_labels(
    plan: &FloorPlan,
    ranges: &[CustomAxisLabel],
    axis: Axis,
    count: usize,
) -> Result<Vec<String>, LabelError> {
    let mut axis_ranges: Vec<&CustomAxisLabel> =
        ranges.iter().filter(|r| r.axis == axis).collect();
    axis_ranges.sort_by_key(|r| r.order);

    let seed = plan.origin_seed(axis);
    let step = plan.axis_step(axis);
    let is_letters = plan.axis_labels(axis) == AxisLabels::Letters;

    if axis_ranges.is_empty() {
        let labels = default_range(seed, step, count, is_letters)?;
        floorplan_telemetry::record_labels_generated(labels.len() as u64);
        return Ok(labels);
    }

    let mut labels: Vec<String> = Vec::new();
    for custom_range in &axis_ranges {
        labels.extend(labels_for_range(custom_range)?);
        if labels.len() >= count {
            labels.truncate(count);
            floorplan_telemetry::record_labels_generated(labels.len() as u64);
            return Ok(labels);
        }
    }

    // 范围不足时按默认方案续接
    if labels.len() < count {
        let remaining = count - labels.len();
        let start = seed + labels.len() as i64 * step;
        debug!(axis = axis.as_str(), produced = labels.len(), remaining, "custom ranges exhausted, filling with default labels");
        labels.extend(default_range(start, step, remaining, is_letters)?);
    }

    floorplan_telemetry::record_labels_generated(labels.len() as u64);
    Ok(labels)
}

/// 默认方案标签：从 `start` 按 `step` 递推，字母轴在 18278 处回绕。
fn default_range(
    start: i64,
    step: i64,
    count: usize,
    is_letters: bool,
) -> Result<Vec<String>, LabelError> {
    let mut labels = Vec::with_capacity(count);
    let mut current = start;
    for _ in 0..count {
        if is_letters {
            if current < 1 {
                current += LETTER_WRAP;
            } else if current > LETTER_WRAP {
                current -= LETTER_WRAP;
            }
            labels.push(grid_number_to_letter(current)?);
        } else {
            labels.push(current.to_string());
        }
        current += step;
    }
    Ok(labels)
}

fn labels_for_range(custom_range: &CustomAxisLabel) -> Result<Vec<String>, LabelError> {
    match custom_range.label_type {
        LabelType::Letters => letter_labels(
            &custom_range.start_label,
            &custom_range.end_label,
            custom_range.increment_letter,
            custom_range.step,
        ),
        LabelType::Numalpha => numalpha_labels(
            &custom_range.start_label,
            &custom_range.end_label,
            custom_range.increment_letter,
            custom_range.step,
        ),
        _ => numeric_labels(
            custom_range.label_type,
            custom_range.increment_letter,
            &custom_range.start_label,
            &custom_range.end_label,
            custom_range.step,
        ),
    }
}

/// numalpha 范围：数字前缀固定，字母段按步长方向推进。
fn numalpha_labels(
    start: &str,
    end: &str,
    increment_letter: bool,
    step: i64,
) -> Result<Vec<String>, LabelError> {
    let (start_prefix, start_letters) = extract_prefix_and_letter(start);
    let (end_prefix, end_letters) = extract_prefix_and_letter(end);

    if start_prefix != end_prefix {
        return Err(LabelError::PrefixMismatch {
            start: start_prefix.to_string(),
            end: end_prefix.to_string(),
        });
    }
    if start_letters.is_empty() || end_letters.is_empty() {
        return Err(LabelError::InvalidLabel {
            label_type: LabelType::Numalpha.as_str(),
            label: if start_letters.is_empty() { start } else { end }.to_string(),
        });
    }

    let mut labels = Vec::new();
    let mut current_letters = start_letters.to_string();

    loop {
        labels.push(format!("{start_prefix}{current_letters}"));
        if labels[labels.len() - 1] == end {
            break;
        }

        if step > 0 {
            current_letters = increment_letters(&current_letters, increment_letter)?;
            if should_stop(&current_letters, end_letters) {
                break;
            }
        } else {
            match decrement_letters(&current_letters, increment_letter, end_letters) {
                Some(next) => current_letters = next,
                None => break,
            }
        }
    }

    Ok(labels)
}

/// letters 范围：整个标签就是字母段。
fn letter_labels(
    start: &str,
    end: &str,
    increment_letter: bool,
    step: i64,
) -> Result<Vec<String>, LabelError> {
    let (prefix, start_letters) = extract_prefix_and_number(start);
    let (_, end_letters) = extract_prefix_and_number(end);

    if start_letters.is_empty() || end_letters.is_empty() {
        return Err(LabelError::InvalidLabel {
            label_type: LabelType::Letters.as_str(),
            label: if start_letters.is_empty() { start } else { end }.to_string(),
        });
    }

    let mut labels = Vec::new();
    let mut current_letters = start_letters.to_string();

    loop {
        labels.push(format!("{prefix}{current_letters}"));
        if current_letters == end_letters {
            break;
        }

        if step > 0 {
            current_letters = increment_letters(&current_letters, increment_letter)?;
            if should_stop(&current_letters, end_letters) {
                break;
            }
        } else {
            match decrement_letters(&current_letters, increment_letter, end_letters) {
                Some(next) => current_letters = next,
                None => break,
            }
        }
    }

    Ok(labels)
}

/// 字母段递增：整段 26 进制进位，或仅推进首字母并保持段宽。
fn increment_letters(current: &str, increment_letter: bool) -> Result<String, LabelError> {
    if increment_letter {
        let next = grid_letter_to_number(current)? + 1;
        return grid_number_to_letter(next);
    }
    let first = current.as_bytes()[0];
    // 首字母模式到 Z 仍未命中终点说明起止段宽不一致，拒绝而非越出字母表
    if first >= b'Z' {
        return Err(LabelError::InvalidLabel {
            label_type: "letters",
            label: current.to_string(),
        });
    }
    let next = (first + 1) as char;
    Ok(next.to_string().repeat(current.len()))
}

/// 字母段递减；到达 A 边界或越过终点时返回 None。
fn decrement_letters(letters: &str, increment_letter: bool, end_letters: &str) -> Option<String> {
    if letters.is_empty() {
        return None;
    }
    let mut bytes = letters.as_bytes().to_vec();

    if increment_letter {
        let last = bytes.len() - 1;
        if bytes[last] > b'A' {
            bytes[last] -= 1;
        } else {
            return None;
        }
    } else {
        for byte in &mut bytes {
            if *byte > b'A' {
                *byte -= 1;
            } else {
                return None;
            }
        }
    }

    let result = String::from_utf8(bytes).ok()?;
    if !end_letters.is_empty() && result.as_str() < end_letters {
        return None;
    }
    Some(result)
}

/// 升序推进的越界判定：段变长，或同宽且字典序超过终点。
fn should_stop(current: &str, end_letters: &str) -> bool {
    current.len() > end_letters.len()
        || (current.len() == end_letters.len() && current > end_letters)
}

/// 数值型范围：起始标签的格式贯穿整个范围。
fn numeric_labels(
    label_type: LabelType,
    increment_letter: bool,
    start: &str,
    end: &str,
    step: i64,
) -> Result<Vec<String>, LabelError> {
    let (mut current, start_format) = to_numeric(label_type, increment_letter, start)?;
    let (end_value, _) = to_numeric(label_type, increment_letter, end)?;

    let mut labels = Vec::new();
    loop {
        labels.push(from_numeric(label_type, increment_letter, current, &start_format)?);
        if current == end_value || step == 0 {
            break;
        }
        current += step;
        if (step > 0 && current > end_value) || (step < 0 && current < end_value) {
            break;
        }
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn plan() -> FloorPlan {
        FloorPlan::new(Uuid::new_v4(), 10, 10)
    }

    fn range(
        plan: &FloorPlan,
        label_type: LabelType,
        start: &str,
        end: &str,
        step: i64,
        increment_letter: bool,
        order: i64,
    ) -> CustomAxisLabel {
        CustomAxisLabel::new(
            plan.id,
            Axis::X,
            label_type,
            start,
            end,
            step,
            increment_letter,
            order,
        )
    }

    #[test]
    fn default_labels_without_ranges() {
        let plan = plan();
        let labels = generate_labels(&plan, &[], Axis::X, 5).unwrap();
        assert_eq!(labels, ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn default_letter_labels_wrap_in_reverse() {
        let mut plan = plan();
        plan.x_axis_labels = AxisLabels::Letters;
        plan.x_axis_step = -1;
        let labels = generate_labels(&plan, &[], Axis::X, 3).unwrap();
        assert_eq!(labels, ["A", "ZZZ", "ZZY"]);
    }

    #[test]
    fn number_range_with_leading_zeros() {
        let plan = plan();
        let ranges = vec![range(&plan, LabelType::Numbers, "01", "05", 1, false, 1)];
        let labels = generate_labels(&plan, &ranges, Axis::X, 5).unwrap();
        assert_eq!(labels, ["01", "02", "03", "04", "05"]);
    }

    #[test]
    fn number_range_negative_step() {
        let plan = plan();
        let ranges = vec![range(&plan, LabelType::Numbers, "05", "01", -1, false, 1)];
        let labels = generate_labels(&plan, &ranges, Axis::X, 5).unwrap();
        assert_eq!(labels, ["05", "04", "03", "02", "01"]);
    }

    #[test]
    fn number_ranges_keep_mixed_formats() {
        let plan = plan();
        let ranges = vec![
            range(&plan, LabelType::Numbers, "1", "3", 1, false, 1),
            range(&plan, LabelType::Numbers, "04", "06", 1, false, 2),
        ];
        let labels = generate_labels(&plan, &ranges, Axis::X, 6).unwrap();
        assert_eq!(labels, ["1", "2", "3", "04", "05", "06"]);
    }

    #[test]
    fn alphanumeric_number_increment() {
        let plan = plan();
        let ranges = vec![range(&plan, LabelType::Alphanumeric, "A01", "A05", 1, false, 1)];
        let labels = generate_labels(&plan, &ranges, Axis::X, 5).unwrap();
        assert_eq!(labels, ["A01", "A02", "A03", "A04", "A05"]);
    }

    #[test]
    fn alphanumeric_prefix_increment() {
        let plan = plan();
        let ranges = vec![range(&plan, LabelType::Alphanumeric, "A01", "E01", 1, true, 1)];
        let labels = generate_labels(&plan, &ranges, Axis::X, 5).unwrap();
        assert_eq!(labels, ["A01", "B01", "C01", "D01", "E01"]);
    }

    #[test]
    fn alphanumeric_prefix_increment_descending() {
        let plan = plan();
        let ranges = vec![range(&plan, LabelType::Alphanumeric, "E01", "A01", -1, true, 1)];
        let labels = generate_labels(&plan, &ranges, Axis::X, 5).unwrap();
        assert_eq!(labels, ["E01", "D01", "C01", "B01", "A01"]);
    }

    #[test]
    fn letter_ranges_ascending_and_multiple() {
        let plan = plan();
        let ranges = vec![
            range(&plan, LabelType::Letters, "A", "C", 1, true, 1),
            range(&plan, LabelType::Letters, "X", "Z", 1, true, 2),
        ];
        let labels = generate_labels(&plan, &ranges, Axis::X, 6).unwrap();
        assert_eq!(labels, ["A", "B", "C", "X", "Y", "Z"]);
    }

    #[test]
    fn letter_range_descending() {
        let plan = plan();
        let ranges = vec![range(&plan, LabelType::Letters, "E", "A", -1, true, 1)];
        let labels = generate_labels(&plan, &ranges, Axis::X, 5).unwrap();
        assert_eq!(labels, ["E", "D", "C", "B", "A"]);
    }

    #[test]
    fn numalpha_range_keeps_prefix() {
        let plan = plan();
        let ranges = vec![range(&plan, LabelType::Numalpha, "02A", "02E", 1, true, 1)];
        let labels = generate_labels(&plan, &ranges, Axis::X, 5).unwrap();
        assert_eq!(labels, ["02A", "02B", "02C", "02D", "02E"]);
    }

    #[test]
    fn numalpha_multi_letter_descending_last_letter() {
        let plan = plan();
        let ranges = vec![
            range(&plan, LabelType::Numalpha, "02EE", "02EA", -1, true, 1),
            range(&plan, LabelType::Numalpha, "02E", "02A", -1, false, 2),
        ];
        let labels = generate_labels(&plan, &ranges, Axis::X, 10).unwrap();
        assert_eq!(
            labels,
            ["02EE", "02ED", "02EC", "02EB", "02EA", "02E", "02D", "02C", "02B", "02A"]
        );
    }

    #[test]
    fn numalpha_multi_letter_descending_all_letters() {
        let plan = plan();
        let ranges = vec![range(&plan, LabelType::Numalpha, "02EE", "02AA", -1, false, 1)];
        let labels = generate_labels(&plan, &ranges, Axis::X, 5).unwrap();
        assert_eq!(labels, ["02EE", "02DD", "02CC", "02BB", "02AA"]);
    }

    #[test]
    fn numalpha_prefix_mismatch_is_rejected() {
        let plan = plan();
        let ranges = vec![range(&plan, LabelType::Numalpha, "07A", "08Z", 1, false, 1)];
        assert_eq!(
            generate_labels(&plan, &ranges, Axis::X, 5),
            Err(LabelError::PrefixMismatch {
                start: "07".to_string(),
                end: "08".to_string(),
            })
        );
    }

    #[test]
    fn width_mismatched_letter_walk_is_rejected() {
        let plan = plan();
        let ranges = vec![range(&plan, LabelType::Letters, "A", "AB", 1, false, 1)];
        let err = generate_labels(&plan, &ranges, Axis::X, 30).unwrap_err();
        assert!(matches!(err, LabelError::InvalidLabel { .. }), "{err:?}");

        let ranges = vec![range(&plan, LabelType::Numalpha, "02A", "02AB", 1, false, 1)];
        assert!(generate_labels(&plan, &ranges, Axis::X, 30).is_err());
    }

    #[test]
    fn ranges_truncate_at_count() {
        let plan = plan();
        let ranges = vec![range(&plan, LabelType::Numbers, "1", "9", 1, false, 1)];
        let labels = generate_labels(&plan, &ranges, Axis::X, 4).unwrap();
        assert_eq!(labels, ["1", "2", "3", "4"]);
    }

    #[test]
    fn default_fill_after_short_custom_range() {
        let plan = plan();
        let ranges = vec![range(&plan, LabelType::Numalpha, "02A", "02C", 1, true, 1)];
        let labels = generate_labels(&plan, &ranges, Axis::X, 5).unwrap();
        assert_eq!(labels, ["02A", "02B", "02C", "4", "5"]);
    }

    #[test]
    fn ranges_follow_order_field() {
        let plan = plan();
        let ranges = vec![
            range(&plan, LabelType::Numbers, "01", "05", 1, false, 2),
            range(&plan, LabelType::Alphanumeric, "A01", "A05", 1, false, 1),
        ];
        let labels = generate_labels(&plan, &ranges, Axis::X, 10).unwrap();
        assert_eq!(
            labels,
            ["A01", "A02", "A03", "A04", "A05", "01", "02", "03", "04", "05"]
        );
    }

    #[test]
    fn hex_and_binary_ranges_render_prefixed() {
        let plan = plan();
        let ranges = vec![range(&plan, LabelType::Hex, "1", "3", 1, false, 1)];
        let labels = generate_labels(&plan, &ranges, Axis::X, 3).unwrap();
        assert_eq!(labels, ["0x0001", "0x0002", "0x0003"]);

        let ranges = vec![range(&plan, LabelType::Binary, "1", "3", 1, false, 1)];
        let labels = generate_labels(&plan, &ranges, Axis::X, 3).unwrap();
        assert_eq!(labels, ["0b0001", "0b0010", "0b0011"]);
    }

    #[test]
    fn roman_and_greek_ranges() {
        let plan = plan();
        let ranges = vec![range(&plan, LabelType::Roman, "I", "V", 1, false, 1)];
        let labels = generate_labels(&plan, &ranges, Axis::X, 5).unwrap();
        assert_eq!(labels, ["I", "II", "III", "IV", "V"]);

        let ranges = vec![range(&plan, LabelType::Greek, "α", "ε", 1, false, 1)];
        let labels = generate_labels(&plan, &ranges, Axis::X, 5).unwrap();
        assert_eq!(labels, ["α", "β", "γ", "δ", "ε"]);
    }
}
