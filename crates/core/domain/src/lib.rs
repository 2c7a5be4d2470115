pub mod labels;
pub mod tile;

pub use labels::{Axis, AxisLabels, CustomAxisLabel, LabelType};
pub use tile::{AllocationType, FloorPlanTile, ObjectOrientation, ObjectRef};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 楼层平面：定义某个位置上的网格（尺寸、默认轴标签方案、种子与步长）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorPlan {
    pub id: Uuid,
    /// 所属位置（协作方提供的位置实体 ID）。
    pub location_id: Uuid,
    /// X/Y 方向网格尺寸（列数/行数，≥ 1）。
    pub x_size: i64,
    pub y_size: i64,
    /// 单个瓦片的物理宽度/深度（仅展示用途，不参与几何判定）。
    pub tile_width: i64,
    pub tile_depth: i64,
    /// 各轴默认标签方案（无自定义范围时生效）。
    pub x_axis_labels: AxisLabels,
    pub y_axis_labels: AxisLabels,
    /// 各轴起始种子与步长。
    pub x_origin_seed: i64,
    pub y_origin_seed: i64,
    pub x_axis_step: i64,
    pub y_axis_step: i64,
    /// 瓦片是否允许移动（关闭后放置位置冻结）。
    pub is_tile_movable: bool,
}

impl FloorPlan {
    /// 以默认轴配置（数字标签、种子 1、步长 1）构造楼层平面。
    pub fn new(location_id: Uuid, x_size: i64, y_size: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            location_id,
            x_size,
            y_size,
            tile_width: 100,
            tile_depth: 100,
            x_axis_labels: AxisLabels::Numbers,
            y_axis_labels: AxisLabels::Numbers,
            x_origin_seed: 1,
            y_origin_seed: 1,
            x_axis_step: 1,
            y_axis_step: 1,
            is_tile_movable: true,
        }
    }

    /// 指定轴的网格尺寸。
    pub fn size(&self, axis: Axis) -> i64 {
        match axis {
            Axis::X => self.x_size,
            Axis::Y => self.y_size,
        }
    }

    /// 指定轴的默认标签方案。
    pub fn axis_labels(&self, axis: Axis) -> AxisLabels {
        match axis {
            Axis::X => self.x_axis_labels,
            Axis::Y => self.y_axis_labels,
        }
    }

    /// 指定轴的起始种子。
    pub fn origin_seed(&self, axis: Axis) -> i64 {
        match axis {
            Axis::X => self.x_origin_seed,
            Axis::Y => self.y_origin_seed,
        }
    }

    /// 指定轴的步长。
    pub fn axis_step(&self, axis: Axis) -> i64 {
        match axis {
            Axis::X => self.x_axis_step,
            Axis::Y => self.y_axis_step,
        }
    }

    /// 覆写指定轴的种子。
    pub fn set_origin_seed(&mut self, axis: Axis, seed: i64) {
        match axis {
            Axis::X => self.x_origin_seed = seed,
            Axis::Y => self.y_origin_seed = seed,
        }
    }

    /// 覆写指定轴的步长。
    pub fn set_axis_step(&mut self, axis: Axis, step: i64) {
        match axis {
            Axis::X => self.x_axis_step = step,
            Axis::Y => self.y_axis_step = step,
        }
    }
}
