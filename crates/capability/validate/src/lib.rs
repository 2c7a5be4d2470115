//! 自定义范围校验能力。
//!
//! 对提交的范围载荷做结构与语义校验：必填键、体系合法性、步长方向、
//! 有效尺寸上限，以及同体系范围间的重叠检测。
//! 错误跨范围聚合，单个范围内首个错误生效。

use domain::LabelType;
use floorplan_labels::codec::{from_numeric, to_numeric};
use floorplan_labels::error::LabelError;
use floorplan_labels::letters::{
    extract_prefix_and_letter, extract_prefix_and_number, grid_letter_to_number,
};
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;
use tracing::warn;

/// 表单提交的范围载荷（JSON 形式，字段允许缺失以便汇报缺键错误）。
#[derive(Debug, Clone, Deserialize)]
pub struct RangeSpec {
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(default)]
    pub step: Option<i64>,
    pub label_type: Option<String>,
    #[serde(default)]
    pub increment_letter: Option<bool>,
}

impl RangeSpec {
    /// 直接构造完整载荷（测试与程序化调用）。
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
        step: i64,
        label_type: &str,
        increment_letter: bool,
    ) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
            step: Some(step),
            label_type: Some(label_type.to_string()),
            increment_letter: Some(increment_letter),
        }
    }

    fn step(&self) -> i64 {
        self.step.unwrap_or(1)
    }

    fn increment_letter(&self) -> bool {
        self.increment_letter.unwrap_or(false)
    }
}

/// 范围配置错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeConfigError {
    #[error("range is missing required keys {{start, end, label_type}}")]
    MissingKeys,

    #[error("invalid label type '{label_type}'. Valid types are: {valid}")]
    UnknownLabelType { label_type: String, valid: String },

    #[error("step value must be a non-zero integer")]
    ZeroStep,

    #[error("increment_letter must be false when using numeric labels")]
    IncrementForNumbers,

    #[error(
        "invalid alphanumeric range: '{start}' to '{end}' must include alphabetic characters. \
         Use label_type 'numbers' if no letters are needed"
    )]
    AlphanumericNeedsLetters { start: String, end: String },

    #[error("invalid values for letters: '{start}, {end}'")]
    LettersOnly { start: String, end: String },

    #[error("range: '{start}' != '{end}'. Use separate ranges for different prefixes")]
    PrefixMismatch { start: String, end: String },

    #[error(
        "range from '{start}' to '{end}' must use the same number of letters \
         when increment_letter is false"
    )]
    MismatchedLetterRun { start: String, end: String },

    #[error("with negative step {step}, start value must be greater than end value")]
    NegativeStepDirection { step: i64 },

    #[error("with positive step {step}, start value must be less than end value")]
    PositiveStepDirection { step: i64 },

    #[error(
        "range from {start} to {end} has effective size {effective_size}, \
         exceeding maximum size of {max_size}"
    )]
    TooLarge {
        start: String,
        end: String,
        effective_size: i64,
        max_size: i64,
    },

    #[error("ranges overlap")]
    Overlap,

    #[error("invalid values for {label_type} - {source}")]
    InvalidValues {
        label_type: String,
        #[source]
        source: LabelError,
    },
}

/// 校验一条轴上提交的全部范围。
///
/// 返回 `Err` 时携带聚合的错误列表：每个范围至多贡献一个结构错误，
/// 随后是重叠检测发现的错误。
pub fn validate_ranges(ranges: &[RangeSpec], max_size: i64) -> Result<(), Vec<RangeConfigError>> {
    let mut errors = Vec::new();
    let mut validated: Vec<(&RangeSpec, LabelType)> = Vec::new();

    for spec in ranges {
        match validate_range(spec, max_size) {
            Ok(label_type) => validated.push((spec, label_type)),
            Err(err) => errors.push(err),
        }
    }

    if let Some(err) = check_pairwise_overlap(&validated) {
        errors.push(err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        floorplan_telemetry::record_range_validation_failure();
        warn!(count = errors.len(), "range validation failed");
        Err(errors)
    }
}

/// 单个范围的结构校验；通过时返回解析出的标签体系。
fn validate_range(spec: &RangeSpec, max_size: i64) -> Result<LabelType, RangeConfigError> {
    let (Some(start), Some(end), Some(type_name)) = (&spec.start, &spec.end, &spec.label_type)
    else {
        return Err(RangeConfigError::MissingKeys);
    };

    let label_type = LabelType::parse(type_name).ok_or_else(|| {
        let valid = LabelType::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        RangeConfigError::UnknownLabelType {
            label_type: type_name.clone(),
            valid,
        }
    })?;

    let step = spec.step();
    if step == 0 {
        return Err(RangeConfigError::ZeroStep);
    }

    if label_type == LabelType::Numbers && spec.increment_letter() {
        return Err(RangeConfigError::IncrementForNumbers);
    }

    match label_type {
        LabelType::Alphanumeric => {
            if !contains_letter(start) || !contains_letter(end) {
                return Err(RangeConfigError::AlphanumericNeedsLetters {
                    start: start.clone(),
                    end: end.clone(),
                });
            }
        }
        LabelType::Letters => {
            if !is_alpha(start) || !is_alpha(end) {
                return Err(RangeConfigError::LettersOnly {
                    start: start.clone(),
                    end: end.clone(),
                });
            }
            // 非递增模式逐位推进首字母，起止字母段必须等宽才能收敛
            if !spec.increment_letter() && start.len() != end.len() {
                return Err(RangeConfigError::MismatchedLetterRun {
                    start: start.clone(),
                    end: end.clone(),
                });
            }
        }
        LabelType::Numalpha => {
            let (start_prefix, start_letters) = extract_prefix_and_letter(start);
            let (end_prefix, end_letters) = extract_prefix_and_letter(end);
            if start_prefix != end_prefix {
                return Err(RangeConfigError::PrefixMismatch {
                    start: start_prefix.to_string(),
                    end: end_prefix.to_string(),
                });
            }
            if !spec.increment_letter() && start_letters.len() != end_letters.len() {
                return Err(RangeConfigError::MismatchedLetterRun {
                    start: start.clone(),
                    end: end.clone(),
                });
            }
        }
        _ => {}
    }

    let effective_size = effective_size(spec, label_type)?;
    if effective_size > max_size {
        return Err(RangeConfigError::TooLarge {
            start: start.clone(),
            end: end.clone(),
            effective_size,
            max_size,
        });
    }

    Ok(label_type)
}

fn contains_letter(label: &str) -> bool {
    label.chars().any(|c| c.is_ascii_alphabetic())
}

fn is_alpha(label: &str) -> bool {
    !label.is_empty() && label.chars().all(|c| c.is_ascii_alphabetic())
}

/// 范围覆盖的步进项数。
fn effective_size(spec: &RangeSpec, label_type: LabelType) -> Result<i64, RangeConfigError> {
    let start = spec.start.as_deref().unwrap_or_default();
    let end = spec.end.as_deref().unwrap_or_default();
    let step = spec.step();

    if label_type.is_letter_based() {
        return letter_range_size(spec, start, end);
    }

    let (start_num, _) = parse_value(label_type, spec.increment_letter(), start)?;
    let (end_num, _) = parse_value(label_type, spec.increment_letter(), end)?;
    stepped_size(start_num, end_num, step)
}

/// 字母类范围尺寸：递增模式按完整 26 进制，否则只看首字母。
/// 方向与步长不符时尺寸记 0。
fn letter_range_size(spec: &RangeSpec, start: &str, end: &str) -> Result<i64, RangeConfigError> {
    let (_, start_letters) = extract_prefix_and_letter(start);
    let (_, end_letters) = extract_prefix_and_letter(end);

    let (start_pos, end_pos) = if spec.increment_letter() {
        (
            letter_value(spec, start_letters)?,
            letter_value(spec, end_letters)?,
        )
    } else {
        (
            letter_value(spec, first_letter(start_letters))?,
            letter_value(spec, first_letter(end_letters))?,
        )
    };

    let range_size = end_pos - start_pos + 1;
    if spec.step() < 0 {
        Ok(if start_pos >= end_pos { range_size } else { 0 })
    } else {
        Ok(if start_pos <= end_pos { range_size } else { 0 })
    }
}

fn first_letter(letters: &str) -> &str {
    if letters.is_empty() {
        letters
    } else {
        &letters[..1]
    }
}

fn letter_value(spec: &RangeSpec, letters: &str) -> Result<i64, RangeConfigError> {
    grid_letter_to_number(letters).map_err(|source| RangeConfigError::InvalidValues {
        label_type: spec
            .label_type
            .clone()
            .unwrap_or_else(|| "letters".to_string()),
        source,
    })
}

fn parse_value(
    label_type: LabelType,
    increment_letter: bool,
    label: &str,
) -> Result<(i64, floorplan_labels::LabelFormat), RangeConfigError> {
    to_numeric(label_type, increment_letter, label).map_err(|source| {
        RangeConfigError::InvalidValues {
            label_type: label_type.as_str().to_string(),
            source,
        }
    })
}

/// 数值范围的步进项数，方向必须与步长一致。
fn stepped_size(start: i64, end: i64, step: i64) -> Result<i64, RangeConfigError> {
    if step < 0 {
        if start < end {
            return Err(RangeConfigError::NegativeStepDirection { step });
        }
        return Ok((start - end) / step.abs() + 1);
    }
    if start > end {
        return Err(RangeConfigError::PositiveStepDirection { step });
    }
    Ok((end - start) / step + 1)
}

/// 同体系范围两两重叠检测；发现首对重叠即报错。
fn check_pairwise_overlap(ranges: &[(&RangeSpec, LabelType)]) -> Option<RangeConfigError> {
    for (i, (first, first_type)) in ranges.iter().enumerate() {
        for (second, second_type) in &ranges[i + 1..] {
            if first_type != second_type {
                continue;
            }
            let overlap = match first_type {
                LabelType::Alphanumeric => alphanumeric_overlap(first, second),
                LabelType::Numalpha => numalpha_overlap(first, second),
                _ => label_set_overlap(first, second, *first_type),
            };
            if overlap {
                return Some(RangeConfigError::Overlap);
            }
        }
    }
    None
}

/// alphanumeric：前缀相同且数字区间相交。
fn alphanumeric_overlap(first: &RangeSpec, second: &RangeSpec) -> bool {
    let parts = |spec: &RangeSpec| -> Option<(String, i64, i64)> {
        let (prefix, start_digits) = extract_prefix_and_number(spec.start.as_deref()?);
        let (_, end_digits) = extract_prefix_and_number(spec.end.as_deref()?);
        Some((
            prefix.to_string(),
            start_digits.parse().ok()?,
            end_digits.parse().ok()?,
        ))
    };

    match (parts(first), parts(second)) {
        (Some((prefix1, start1, end1)), Some((prefix2, start2, end2))) => {
            prefix1 == prefix2 && !(end1 < start2 || end2 < start1)
        }
        _ => false,
    }
}

/// numalpha：数字前缀相同且按步长方向归一后的字母区间相交。
fn numalpha_overlap(first: &RangeSpec, second: &RangeSpec) -> bool {
    let parts = |spec: &RangeSpec| -> Option<(String, i64, i64)> {
        let (prefix, start_letters) = extract_prefix_and_letter(spec.start.as_deref()?);
        let (_, end_letters) = extract_prefix_and_letter(spec.end.as_deref()?);
        let mut start = grid_letter_to_number(start_letters).ok()?;
        let mut end = grid_letter_to_number(end_letters).ok()?;
        if spec.step() < 0 {
            std::mem::swap(&mut start, &mut end);
        }
        Some((prefix.to_string(), start, end))
    };

    match (parts(first), parts(second)) {
        (Some((prefix1, start1, end1)), Some((prefix2, start2, end2))) => {
            prefix1 == prefix2 && !(end1 < start2 || end2 < start1)
        }
        _ => false,
    }
}

/// 其余体系：物化两侧标签集合求交集。
fn label_set_overlap(first: &RangeSpec, second: &RangeSpec, label_type: LabelType) -> bool {
    match (
        materialize_labels(first, label_type),
        materialize_labels(second, label_type),
    ) {
        (Some(labels1), Some(labels2)) => !labels1.is_disjoint(&labels2),
        _ => false,
    }
}

/// 按步长方向物化范围的全部标签（首尾含）。
fn materialize_labels(spec: &RangeSpec, label_type: LabelType) -> Option<HashSet<String>> {
    let increment = spec.increment_letter();
    let (start, format) = to_numeric(label_type, increment, spec.start.as_deref()?).ok()?;
    let (end, _) = to_numeric(label_type, increment, spec.end.as_deref()?).ok()?;
    let step = spec.step();
    if step == 0 {
        return None;
    }

    let mut labels = HashSet::new();
    let mut current = start;
    loop {
        labels.insert(from_numeric(label_type, increment, current, &format).ok()?);
        if current == end {
            break;
        }
        current += step;
        if (step > 0 && current > end) || (step < 0 && current < end) {
            break;
        }
    }
    Some(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(start: &str, end: &str, step: i64, label_type: &str, increment: bool) -> RangeSpec {
        RangeSpec::new(start, end, step, label_type, increment)
    }

    #[test]
    fn accepts_valid_mixed_type_ranges() {
        let ranges = vec![
            spec("1", "10", 1, "hex", true),
            spec("3", "12", 1, "binary", true),
            spec("07A", "07J", 1, "numalpha", false),
        ];
        assert!(validate_ranges(&ranges, 12).is_ok());
    }

    #[test]
    fn missing_keys_are_reported() {
        let incomplete = RangeSpec {
            start: Some("1".to_string()),
            end: None,
            step: Some(1),
            label_type: Some("numbers".to_string()),
            increment_letter: None,
        };
        let errors = validate_ranges(&[incomplete], 10).unwrap_err();
        assert_eq!(errors, vec![RangeConfigError::MissingKeys]);
    }

    #[test]
    fn unknown_label_type_lists_valid_choices() {
        let errors = validate_ranges(&[spec("1", "10", 1, "let", true)], 10).unwrap_err();
        match &errors[0] {
            RangeConfigError::UnknownLabelType { label_type, valid } => {
                assert_eq!(label_type, "let");
                assert!(valid.contains("numalpha"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn zero_step_is_rejected() {
        let errors = validate_ranges(&[spec("1", "5", 0, "numbers", false)], 10).unwrap_err();
        assert_eq!(errors, vec![RangeConfigError::ZeroStep]);
    }

    #[test]
    fn increment_letter_forbidden_for_numbers() {
        let errors = validate_ranges(&[spec("01", "05", 1, "numbers", true)], 10).unwrap_err();
        assert_eq!(errors, vec![RangeConfigError::IncrementForNumbers]);
    }

    #[test]
    fn alphanumeric_must_contain_letters() {
        let errors = validate_ranges(&[spec("123", "456", 1, "alphanumeric", true)], 10).unwrap_err();
        assert!(matches!(
            errors[0],
            RangeConfigError::AlphanumericNeedsLetters { .. }
        ));
    }

    #[test]
    fn letters_must_be_alphabetic() {
        let errors = validate_ranges(&[spec("123", "456", 1, "letters", false)], 10).unwrap_err();
        assert_eq!(
            errors,
            vec![RangeConfigError::LettersOnly {
                start: "123".to_string(),
                end: "456".to_string(),
            }]
        );
    }

    #[test]
    fn numalpha_prefixes_must_match() {
        let errors = validate_ranges(&[spec("07A", "08Z", 1, "numalpha", false)], 10).unwrap_err();
        assert_eq!(
            errors,
            vec![RangeConfigError::PrefixMismatch {
                start: "07".to_string(),
                end: "08".to_string(),
            }]
        );
    }

    #[test]
    fn non_increment_letter_runs_must_match_width() {
        let errors = validate_ranges(&[spec("A", "AB", 1, "letters", false)], 10).unwrap_err();
        assert_eq!(
            errors,
            vec![RangeConfigError::MismatchedLetterRun {
                start: "A".to_string(),
                end: "AB".to_string(),
            }]
        );

        let errors =
            validate_ranges(&[spec("02A", "02AB", 1, "numalpha", false)], 10).unwrap_err();
        assert!(matches!(
            errors[0],
            RangeConfigError::MismatchedLetterRun { .. }
        ));

        // 递增模式按完整 26 进制推进，允许跨宽度
        assert!(validate_ranges(&[spec("A", "AB", 1, "letters", true)], 30).is_ok());
    }

    #[test]
    fn direction_must_match_step_sign() {
        let errors = validate_ranges(&[spec("1", "5", -1, "numbers", false)], 10).unwrap_err();
        assert_eq!(
            errors,
            vec![RangeConfigError::NegativeStepDirection { step: -1 }]
        );

        let errors = validate_ranges(&[spec("5", "1", 1, "numbers", false)], 10).unwrap_err();
        assert_eq!(
            errors,
            vec![RangeConfigError::PositiveStepDirection { step: 1 }]
        );
    }

    #[test]
    fn effective_size_respects_step() {
        // 1..20 步长 2 → 10 项，恰好等于上限
        assert!(validate_ranges(&[spec("1", "20", 2, "binary", true)], 10).is_ok());

        let errors = validate_ranges(&[spec("1", "20", 1, "binary", true)], 10).unwrap_err();
        match &errors[0] {
            RangeConfigError::TooLarge { effective_size, .. } => assert_eq!(*effective_size, 20),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn letter_range_sizes() {
        // 非递增模式只看首字母：02AA..02ZZ 记 26
        assert!(validate_ranges(&[spec("02AA", "02ZZ", 1, "numalpha", false)], 26).is_ok());
        assert!(validate_ranges(&[spec("AA", "ZZ", 1, "letters", false)], 26).is_ok());

        // 递增模式按完整 26 进制：A..AAA 记 703
        let errors = validate_ranges(&[spec("A", "AAA", 1, "letters", true)], 52).unwrap_err();
        assert_eq!(
            errors,
            vec![RangeConfigError::TooLarge {
                start: "A".to_string(),
                end: "AAA".to_string(),
                effective_size: 703,
                max_size: 52,
            }]
        );
    }

    #[test]
    fn overlapping_number_ranges_are_rejected() {
        let ranges = vec![
            spec("1", "5", 1, "numbers", false),
            spec("3", "7", 1, "numbers", false),
        ];
        let errors = validate_ranges(&ranges, 10).unwrap_err();
        assert_eq!(errors, vec![RangeConfigError::Overlap]);
    }

    #[test]
    fn disjoint_alphanumeric_prefixes_do_not_overlap() {
        let ranges = vec![
            spec("A1", "A5", 1, "alphanumeric", false),
            spec("B01", "B05", 1, "alphanumeric", false),
        ];
        assert!(validate_ranges(&ranges, 10).is_ok());
    }

    #[test]
    fn numalpha_overlap_normalizes_descending_ranges() {
        let ranges = vec![
            spec("02A", "02E", 1, "numalpha", true),
            spec("02E", "02A", -1, "numalpha", true),
        ];
        let errors = validate_ranges(&ranges, 10).unwrap_err();
        assert_eq!(errors, vec![RangeConfigError::Overlap]);
    }

    #[test]
    fn descending_range_tail_participates_in_overlap() {
        // 物化含首尾：10..6 与 6..1 在 6 处相交
        let ranges = vec![
            spec("10", "6", -1, "numbers", false),
            spec("6", "1", -1, "numbers", false),
        ];
        let errors = validate_ranges(&ranges, 10).unwrap_err();
        assert_eq!(errors, vec![RangeConfigError::Overlap]);
    }

    #[test]
    fn errors_aggregate_across_ranges() {
        let ranges = vec![
            spec("1", "5", 0, "numbers", false),
            spec("07A", "08Z", 1, "numalpha", false),
        ];
        let errors = validate_ranges(&ranges, 10).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn invalid_roman_values_are_wrapped() {
        let errors = validate_ranges(&[spec("ABC", "DEF", 1, "roman", true)], 10).unwrap_err();
        match &errors[0] {
            RangeConfigError::InvalidValues { label_type, .. } => assert_eq!(label_type, "roman"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
