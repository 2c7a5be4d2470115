use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 网格轴。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
        }
    }
}

/// 轴默认标签方案（无自定义范围时整条轴采用的体系）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisLabels {
    Numbers,
    Letters,
}

/// 自定义范围可用的八种标签体系。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelType {
    Numbers,
    Alphanumeric,
    Letters,
    Numalpha,
    Roman,
    Greek,
    Binary,
    Hex,
}

impl LabelType {
    /// 全部合法体系（按校验错误提示中的展示顺序）。
    pub const ALL: [LabelType; 8] = [
        LabelType::Numbers,
        LabelType::Alphanumeric,
        LabelType::Letters,
        LabelType::Numalpha,
        LabelType::Roman,
        LabelType::Greek,
        LabelType::Binary,
        LabelType::Hex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelType::Numbers => "numbers",
            LabelType::Alphanumeric => "alphanumeric",
            LabelType::Letters => "letters",
            LabelType::Numalpha => "numalpha",
            LabelType::Roman => "roman",
            LabelType::Greek => "greek",
            LabelType::Binary => "binary",
            LabelType::Hex => "hex",
        }
    }

    /// 从表单字符串解析体系名；未知名称返回 None，由调用方汇报合法列表。
    pub fn parse(value: &str) -> Option<LabelType> {
        Self::ALL.iter().copied().find(|t| t.as_str() == value)
    }

    /// 该体系的标签是否由字母序列承载序号（letters / numalpha）。
    pub fn is_letter_based(&self) -> bool {
        matches!(self, LabelType::Letters | LabelType::Numalpha)
    }
}

/// 自定义轴标签范围：某条轴上一段连续的标签区间。
///
/// 同一轴上的多个范围按 `order` 排序后首尾相接地覆盖网格位置。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomAxisLabel {
    pub id: Uuid,
    pub floor_plan_id: Uuid,
    pub axis: Axis,
    pub label_type: LabelType,
    pub start_label: String,
    pub end_label: String,
    /// 步长（非零，可为负表示逆向枚举）。
    pub step: i64,
    /// 字母递增模式：整段字母序列按 26 进制推进，而非仅重复首字母。
    pub increment_letter: bool,
    /// 范围在轴上的排序位次。
    pub order: i64,
}

impl CustomAxisLabel {
    /// 构造单个范围（id 随机生成，order 由调用方指定）。
    pub fn new(
        floor_plan_id: Uuid,
        axis: Axis,
        label_type: LabelType,
        start_label: impl Into<String>,
        end_label: impl Into<String>,
        step: i64,
        increment_letter: bool,
        order: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            floor_plan_id,
            axis,
            label_type,
            start_label: start_label.into(),
            end_label: end_label.into(),
            step,
            increment_letter,
            order,
        }
    }
}
