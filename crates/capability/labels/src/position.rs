//! 网格位置与展示标签的双向桥接。
//!
//! 同一轴上的自定义范围按 `order` 首尾相接，折叠时携带显式的运行偏移，
//! 偏移从 1 开始。范围尺寸统一按该范围的 `increment_letter` 模式取值。

use domain::{Axis, CustomAxisLabel, LabelType};
use tracing::debug;

use crate::codec::{from_numeric, to_numeric};
use crate::error::LabelError;
use crate::letters::{extract_prefix_and_letter, extract_prefix_and_number, grid_letter_to_number};

/// 范围覆盖的网格位置个数。
pub fn range_size(custom_range: &CustomAxisLabel) -> Result<i64, LabelError> {
    let (start, _) = to_numeric(
        custom_range.label_type,
        custom_range.increment_letter,
        &custom_range.start_label,
    )?;
    let (end, _) = to_numeric(
        custom_range.label_type,
        custom_range.increment_letter,
        &custom_range.end_label,
    )?;
    Ok((end - start).abs() + 1)
}

/// 网格位置 -> 展示标签；超出所有范围覆盖时返回 `None`。
pub fn position_to_label(
    ranges: &[CustomAxisLabel],
    axis: Axis,
    position: i64,
) -> Result<Option<String>, LabelError> {
    let mut offset = 1_i64;
    for custom_range in sorted_axis_ranges(ranges, axis) {
        let size = range_size(custom_range)?;
        if offset <= position && position < offset + size {
            let relative = position - offset + 1;
            return label_at(custom_range, relative).map(Some);
        }
        offset += size;
    }
    Ok(None)
}

/// 展示标签 -> `(网格位置, 规范化标签)`；不属于任何范围时报 `NotInRange`。
///
/// 规范化标签按命中范围的格式重渲染，供表单回显（如 "3" 在补零范围内
/// 回显为 "03"）。
pub fn label_to_position(
    ranges: &[CustomAxisLabel],
    axis: Axis,
    label: &str,
) -> Result<(i64, String), LabelError> {
    let mut offset = 1_i64;
    for custom_range in sorted_axis_ranges(ranges, axis) {
        let size = range_size(custom_range)?;
        if label_in_range(custom_range, label) {
            let position = position_in_range(custom_range, label, offset)?;
            let normalized = label_at(custom_range, position - offset + 1)?;
            return Ok((position, normalized));
        }
        offset += size;
    }
    debug!(label, axis = axis.as_str(), "label outside every custom range");
    Err(LabelError::NotInRange {
        label: label.to_string(),
    })
}

fn sorted_axis_ranges(ranges: &[CustomAxisLabel], axis: Axis) -> Vec<&CustomAxisLabel> {
    let mut axis_ranges: Vec<&CustomAxisLabel> =
        ranges.iter().filter(|r| r.axis == axis).collect();
    axis_ranges.sort_by_key(|r| r.order);
    axis_ranges
}

/// 范围内相对位次 -> 标签。非递增模式向终点截断，递增模式不截断。
fn label_at(custom_range: &CustomAxisLabel, relative: i64) -> Result<String, LabelError> {
    let increment = custom_range.increment_letter;
    let (start, start_format) =
        to_numeric(custom_range.label_type, increment, &custom_range.start_label)?;
    let (end, _) = to_numeric(custom_range.label_type, increment, &custom_range.end_label)?;

    let descending = start > end;
    let value = if increment {
        if descending {
            start - (relative - 1)
        } else {
            start + (relative - 1)
        }
    } else if descending {
        (start - (relative - 1)).max(end)
    } else {
        (start + (relative - 1)).min(end)
    };

    from_numeric(custom_range.label_type, increment, value, &start_format)
}

fn label_in_range(custom_range: &CustomAxisLabel, label: &str) -> bool {
    match custom_range.label_type {
        LabelType::Numbers | LabelType::Alphanumeric => {
            label_in_alphanumeric_range(custom_range, label)
        }
        LabelType::Letters => value_containment(custom_range, label),
        LabelType::Numalpha => label_in_numalpha_range(custom_range, label),
        _ => value_containment(custom_range, label),
    }
}

/// 按数值区间判定归属；标签解析失败视为不在范围内。
fn value_containment(custom_range: &CustomAxisLabel, label: &str) -> bool {
    let increment = custom_range.increment_letter;
    let parsed = (
        to_numeric(custom_range.label_type, increment, label),
        to_numeric(custom_range.label_type, increment, &custom_range.start_label),
        to_numeric(custom_range.label_type, increment, &custom_range.end_label),
    );
    match parsed {
        (Ok((value, _)), Ok((start, _)), Ok((end, _))) => {
            start.min(end) <= value && value <= start.max(end)
        }
        _ => false,
    }
}

/// numalpha 归属：数字前缀一致且字母段宽度一致。
fn label_in_numalpha_range(custom_range: &CustomAxisLabel, label: &str) -> bool {
    let (start_prefix, start_letters) = extract_prefix_and_letter(&custom_range.start_label);
    let (label_prefix, label_letters) = extract_prefix_and_letter(label);
    label_prefix == start_prefix && label_letters.len() == start_letters.len()
}

struct AlphanumericParts {
    label_prefix: String,
    label_number: i64,
    start_prefix: String,
    start_number: i64,
    end_number: i64,
    end_prefix: String,
}

fn alphanumeric_parts(custom_range: &CustomAxisLabel, label: &str) -> Option<AlphanumericParts> {
    let (label_prefix, label_digits) = extract_prefix_and_number(label);
    let (start_prefix, start_digits) = extract_prefix_and_number(&custom_range.start_label);
    let (end_prefix, end_digits) = extract_prefix_and_number(&custom_range.end_label);

    Some(AlphanumericParts {
        label_prefix: label_prefix.to_string(),
        label_number: label_digits.parse().ok()?,
        start_prefix: start_prefix.to_string(),
        start_number: start_digits.parse().ok()?,
        end_number: end_digits.parse().ok()?,
        end_prefix: end_prefix.to_string(),
    })
}

fn label_in_alphanumeric_range(custom_range: &CustomAxisLabel, label: &str) -> bool {
    let Some(parts) = alphanumeric_parts(custom_range, label) else {
        return false;
    };

    if custom_range.increment_letter {
        // 前缀递增：数字段必须与起点一致，前缀字母值落在区间内
        if parts.label_number != parts.start_number {
            return false;
        }
        let values = (
            grid_letter_to_number(&parts.label_prefix),
            grid_letter_to_number(&parts.start_prefix),
            grid_letter_to_number(&parts.end_prefix),
        );
        match values {
            (Ok(value), Ok(start), Ok(end)) => {
                start.min(end) <= value && value <= start.max(end)
            }
            _ => false,
        }
    } else {
        parts.label_prefix == parts.start_prefix
            && parts.start_number.min(parts.end_number) <= parts.label_number
            && parts.label_number <= parts.start_number.max(parts.end_number)
    }
}

fn position_in_range(
    custom_range: &CustomAxisLabel,
    label: &str,
    offset: i64,
) -> Result<i64, LabelError> {
    let (value, start, end) = match custom_range.label_type {
        LabelType::Numbers | LabelType::Alphanumeric => {
            let parts = alphanumeric_parts(custom_range, label).ok_or_else(|| {
                LabelError::InvalidLabel {
                    label_type: custom_range.label_type.as_str(),
                    label: label.to_string(),
                }
            })?;
            if custom_range.increment_letter {
                (
                    grid_letter_to_number(&parts.label_prefix)?,
                    grid_letter_to_number(&parts.start_prefix)?,
                    grid_letter_to_number(&parts.end_prefix)?,
                )
            } else {
                (parts.label_number, parts.start_number, parts.end_number)
            }
        }
        _ => {
            let increment = custom_range.increment_letter;
            let (value, _) = to_numeric(custom_range.label_type, increment, label)?;
            let (start, _) =
                to_numeric(custom_range.label_type, increment, &custom_range.start_label)?;
            let (end, _) =
                to_numeric(custom_range.label_type, increment, &custom_range.end_label)?;
            (value, start, end)
        }
    };

    let relative = if start > end {
        start - value + 1
    } else {
        value - start + 1
    };
    Ok(offset + relative - 1)
}
