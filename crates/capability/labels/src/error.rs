use thiserror::Error;

/// 标签编解码与桥接错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    /// 标签无法按指定体系解析。
    #[error("invalid {label_type} label: {label}")]
    InvalidLabel {
        label_type: &'static str,
        label: String,
    },

    /// 渲染要求正数序号。
    #[error("number must be positive, received {0}")]
    NonPositiveNumber(i64),

    /// 数值超出该体系可渲染的范围。
    #[error("value {value} out of range for {label_type} labels ({min}..={max})")]
    ValueOutOfRange {
        label_type: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// 范围起止标签的前缀不一致。
    #[error("prefix mismatch: {start} != {end}")]
    PrefixMismatch { start: String, end: String },

    /// 标签不落在任何已定义的范围内。
    #[error("value {label} is not within any defined range")]
    NotInRange { label: String },
}
