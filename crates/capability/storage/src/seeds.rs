//! 默认轴的种子换算辅助
//!
//! 无自定义范围的轴上，存储位置与展示标签按种子/步长换算；
//! 字母轴的展示标签是双射 26 进制字母序列。

use crate::error::StorageError;
use domain::{Axis, AxisLabels, FloorPlan};
use floorplan_labels::letters::{
    axis_clean_label_conversion, axis_init_label_conversion, grid_letter_to_number,
    grid_number_to_letter,
};

/// 存储位置 -> 展示标签。
pub fn position_display_label(
    plan: &FloorPlan,
    axis: Axis,
    position: i64,
) -> Result<String, StorageError> {
    let is_letters = plan.axis_labels(axis) == AxisLabels::Letters;
    let location = if is_letters {
        grid_number_to_letter(position)?
    } else {
        position.to_string()
    };
    Ok(axis_init_label_conversion(
        plan.origin_seed(axis),
        &location,
        plan.axis_step(axis),
        is_letters,
    )?)
}

/// 展示标签 -> 存储位置（种子变更表单走这里）。
///
/// `custom_bounds` 为该轴各自定义范围的起止标签；落在自定义范围内的标签
/// 不能作为默认轴种子，直接拒绝。
pub fn position_from_display_label(
    plan: &FloorPlan,
    axis: Axis,
    label: &str,
    custom_bounds: &[(String, String)],
) -> Result<i64, StorageError> {
    let is_letters = plan.axis_labels(axis) == AxisLabels::Letters;
    if hits_custom_bounds(label, is_letters, custom_bounds) {
        return Err(StorageError::new(format!(
            "label '{label}' falls inside a custom range and cannot seed the axis"
        )));
    }
    let cleaned = axis_clean_label_conversion(
        plan.origin_seed(axis),
        label,
        plan.axis_step(axis),
        is_letters,
        &[],
    )?;
    cleaned
        .parse::<i64>()
        .map_err(|_| StorageError::new(format!("label '{label}' is not a grid position")))
}

/// 标签是否落在某个自定义范围的数值区间内（与换算层的区间判定一致）。
fn hits_custom_bounds(label: &str, is_letters: bool, custom_bounds: &[(String, String)]) -> bool {
    for (start, end) in custom_bounds {
        let parsed = if is_letters {
            (
                grid_letter_to_number(start).ok(),
                grid_letter_to_number(end).ok(),
                grid_letter_to_number(label).ok(),
            )
        } else {
            (
                start.parse::<i64>().ok(),
                end.parse::<i64>().ok(),
                label.parse::<i64>().ok(),
            )
        };
        if let (Some(start_val), Some(end_val), Some(label_val)) = parsed
            && start_val <= label_val
            && label_val <= end_val
        {
            return true;
        }
    }
    false
}
