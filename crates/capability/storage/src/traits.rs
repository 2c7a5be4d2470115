//! 存储接口 Trait 定义
//!
//! 定义楼层平面资源存储的异步接口：
//! - FloorPlanStore：楼层平面存储（含种子变更事务）
//! - CustomLabelStore：自定义轴标签范围存储
//! - TileStore：瓦片存储（放置前执行几何校验）
//!
//! 设计原则：
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发
//! - 涉及多类资源的变更（种子平移、标签增删）必须整体提交或整体放弃

use crate::error::StorageError;
use async_trait::async_trait;
use domain::{Axis, CustomAxisLabel, FloorPlan, FloorPlanTile};
use uuid::Uuid;

/// 楼层平面存储接口
#[async_trait]
pub trait FloorPlanStore: Send + Sync {
    /// 创建新楼层平面
    async fn create_floor_plan(&self, plan: FloorPlan) -> Result<FloorPlan, StorageError>;

    /// 查找指定楼层平面
    async fn find_floor_plan(
        &self,
        floor_plan_id: Uuid,
    ) -> Result<Option<FloorPlan>, StorageError>;

    /// 列出全部楼层平面
    async fn list_floor_plans(&self) -> Result<Vec<FloorPlan>, StorageError>;

    /// 调整网格尺寸；已放置瓦片的平面拒绝调整
    async fn resize_floor_plan(
        &self,
        floor_plan_id: Uuid,
        x_size: i64,
        y_size: i64,
    ) -> Result<Option<FloorPlan>, StorageError>;

    /// 变更轴起始种子：按种子增量平移平面内全部瓦片并重新校验，
    /// 任一瓦片校验失败则整体放弃
    async fn update_origin_seeds(
        &self,
        floor_plan_id: Uuid,
        x_seed: Option<i64>,
        y_seed: Option<i64>,
    ) -> Result<Option<FloorPlan>, StorageError>;

    /// 以展示标签形式变更轴起始种子（字母轴接受字母标签）
    async fn update_origin_seed_labels(
        &self,
        floor_plan_id: Uuid,
        x_label: Option<String>,
        y_label: Option<String>,
    ) -> Result<Option<FloorPlan>, StorageError>;

    /// 删除楼层平面及其全部标签范围与瓦片
    async fn delete_floor_plan(&self, floor_plan_id: Uuid) -> Result<bool, StorageError>;
}

/// 自定义轴标签范围存储接口
///
/// 范围的增删会把所属轴的种子与步长重置为 1，并按种子增量平移该轴上的瓦片。
#[async_trait]
pub trait CustomLabelStore: Send + Sync {
    /// 按 order 排序列出指定轴的全部范围
    async fn list_custom_labels(
        &self,
        floor_plan_id: Uuid,
        axis: Axis,
    ) -> Result<Vec<CustomAxisLabel>, StorageError>;

    /// 新增范围
    async fn add_custom_label(
        &self,
        label: CustomAxisLabel,
    ) -> Result<CustomAxisLabel, StorageError>;

    /// 删除范围
    async fn remove_custom_label(&self, label_id: Uuid) -> Result<bool, StorageError>;
}

/// 瓦片存储接口
#[async_trait]
pub trait TileStore: Send + Sync {
    /// 列出指定平面的全部瓦片
    async fn list_tiles(&self, floor_plan_id: Uuid) -> Result<Vec<FloorPlanTile>, StorageError>;

    /// 查找指定瓦片
    async fn find_tile(&self, tile_id: Uuid) -> Result<Option<FloorPlanTile>, StorageError>;

    /// 放置新瓦片；提交前按当前快照执行几何校验
    async fn place_tile(&self, tile: FloorPlanTile) -> Result<FloorPlanTile, StorageError>;

    /// 更新既有瓦片；提交前按当前快照执行几何校验
    async fn update_tile(
        &self,
        tile: FloorPlanTile,
    ) -> Result<Option<FloorPlanTile>, StorageError>;

    /// 删除瓦片
    async fn delete_tile(&self, tile_id: Uuid) -> Result<bool, StorageError>;
}
