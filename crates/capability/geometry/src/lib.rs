//! 网格几何能力。
//!
//! - `bounds`: 瓦片的闭区间矩形与相交/包含判定
//! - `placement`: 放置校验（边界、重叠、机架组嵌套、对象约束）与原点平移

pub mod bounds;
pub mod placement;

use thiserror::Error;

pub use bounds::TileBounds;
pub use placement::{PlacementOutcome, shift_tile_origins, validate_tile_placement};

/// 瓦片几何与放置校验错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// 原点小于该轴种子允许的最小值。
    #[error("{field} must be greater than or equal to {minimum}")]
    OriginTooSmall { field: &'static str, minimum: i64 },

    /// 瓦片伸出楼层平面边界。
    #[error("{field} of {value} exceeds the floor plan boundary ({maximum})")]
    OutOfBounds {
        field: &'static str,
        value: i64,
        maximum: i64,
    },

    /// 瓦片跨度必须至少为 1。
    #[error("{field} must be at least 1")]
    SizeTooSmall { field: &'static str },

    /// 对象瓦片之间不允许重叠。
    #[error("object tiles cannot overlap")]
    ObjectOverlap,

    /// 机架组瓦片之间不允许重叠。
    #[error("rack group tiles cannot overlap other rack group tiles")]
    RackGroupOverlap,

    /// 与机架组瓦片相交的对象瓦片必须完整落在组瓦片内。
    #[error("tile overlapping a rack group tile must fit entirely within it")]
    NotNestedInGroup,

    /// 机架所属机架组与瓦片划定的机架组不一致。
    #[error("rack group '{rack_group}' of the rack does not match tile rack group '{tile_group}'")]
    RackGroupMismatch {
        rack_group: String,
        tile_group: String,
    },

    /// 对象已放置在同一平面的其他瓦片上。
    #[error("{kind} is already placed on another tile of this floor plan")]
    ObjectAlreadyPlaced { kind: &'static str },

    /// 设备已装入机架，不能再单独放置。
    #[error("device is already installed in a rack")]
    DeviceAlreadyRacked,

    /// 对象所在位置与楼层平面位置不一致。
    #[error("{kind} must belong to the same location as the floor plan")]
    LocationMismatch { kind: &'static str },
}
