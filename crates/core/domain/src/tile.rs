use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 瓦片的分配类型：承载具体对象，或划定机架组区域。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationType {
    Object,
    RackGroup,
}

impl AllocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationType::Object => "object",
            AllocationType::RackGroup => "rackgroup",
        }
    }
}

/// 对象在瓦片上的朝向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectOrientation {
    Up,
    Down,
    Left,
    Right,
}

/// 放置到瓦片上的对象引用。
///
/// 各变体携带协作方查询得到的放置判定输入（对象所在位置、机架组归属、
/// 设备是否已装入机架）。一个瓦片至多持有一个对象，由枚举结构保证。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ObjectRef {
    Rack {
        id: Uuid,
        location_id: Option<Uuid>,
        rack_group: Option<String>,
    },
    Device {
        id: Uuid,
        location_id: Option<Uuid>,
        installed_in_rack: bool,
    },
    PowerPanel {
        id: Uuid,
        location_id: Option<Uuid>,
    },
    PowerFeed {
        id: Uuid,
        /// 馈电所属配电盘的位置（馈电自身不直接挂位置）。
        panel_location_id: Option<Uuid>,
    },
}

impl ObjectRef {
    pub fn id(&self) -> Uuid {
        match self {
            ObjectRef::Rack { id, .. }
            | ObjectRef::Device { id, .. }
            | ObjectRef::PowerPanel { id, .. }
            | ObjectRef::PowerFeed { id, .. } => *id,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ObjectRef::Rack { .. } => "rack",
            ObjectRef::Device { .. } => "device",
            ObjectRef::PowerPanel { .. } => "power panel",
            ObjectRef::PowerFeed { .. } => "power feed",
        }
    }

    /// 对象用于位置一致性判定的位置 ID（馈电取其配电盘的位置）。
    pub fn location_id(&self) -> Option<Uuid> {
        match self {
            ObjectRef::Rack { location_id, .. }
            | ObjectRef::Device { location_id, .. }
            | ObjectRef::PowerPanel { location_id, .. } => *location_id,
            ObjectRef::PowerFeed { panel_location_id, .. } => *panel_location_id,
        }
    }

    /// 机架归属的机架组名（非机架对象为 None）。
    pub fn rack_group(&self) -> Option<&str> {
        match self {
            ObjectRef::Rack { rack_group, .. } => rack_group.as_deref(),
            _ => None,
        }
    }
}

/// 楼层平面上的一个瓦片：矩形占位，可承载对象或划定机架组。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorPlanTile {
    pub id: Uuid,
    pub floor_plan_id: Uuid,
    /// 左上角原点（相对坐标，随轴种子平移）。
    pub x_origin: i64,
    pub y_origin: i64,
    /// 瓦片跨度（≥ 1）。
    pub x_size: i64,
    pub y_size: i64,
    pub status: String,
    pub object: Option<ObjectRef>,
    /// 机架组名：组瓦片划定的区域，或组内对象瓦片继承的归属。
    pub rack_group: Option<String>,
    pub orientation: Option<ObjectOrientation>,
    /// 对象瓦片是否完整嵌套在同组的机架组瓦片内（放置校验时派生）。
    pub on_group_tile: bool,
}

impl FloorPlanTile {
    /// 构造 1×1 空瓦片（仅状态，无对象）。
    pub fn new(floor_plan_id: Uuid, x_origin: i64, y_origin: i64, status: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            floor_plan_id,
            x_origin,
            y_origin,
            x_size: 1,
            y_size: 1,
            status: status.into(),
            object: None,
            rack_group: None,
            orientation: None,
            on_group_tile: false,
        }
    }

    /// 瓦片的分配类型：持有对象即为对象瓦片，否则为机架组/状态瓦片。
    pub fn allocation_type(&self) -> AllocationType {
        if self.object.is_some() {
            AllocationType::Object
        } else {
            AllocationType::RackGroup
        }
    }
}
