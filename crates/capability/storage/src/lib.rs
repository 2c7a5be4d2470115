//! # 楼层平面存储模块
//!
//! 本模块提供楼层平面网格数据的统一存储抽象层。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：楼层平面、标签范围、瓦片的异步 Trait 接口
//! 2. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 3. **种子换算层** (`seeds.rs`)：默认轴的展示标签 <-> 存储位置换算
//! 4. **实现层** (`in_memory/`)：`RwLock` 保护的内存实现，用于测试和本地替身
//!
//! ## 核心特性
//!
//! - **放置校验**：瓦片写入前按当前快照执行几何校验，校验不过不落盘
//! - **原子事务**：种子变更与标签范围增删在单次写锁内整体提交或整体放弃
//! - **类型安全**：资源以 `uuid` 标识，接口直接收发领域类型
//! - **异步支持**：基于 async_trait 的接口，便于替换为真实协作方存储
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use floorplan_storage::{FloorPlanStore, InMemoryGridStore, TileStore};
//! use domain::{FloorPlan, FloorPlanTile};
//! use uuid::Uuid;
//!
//! let store = InMemoryGridStore::new();
//! let plan = store
//!     .create_floor_plan(FloorPlan::new(Uuid::new_v4(), 10, 10))
//!     .await?;
//! let tile = store
//!     .place_tile(FloorPlanTile::new(plan.id, 1, 1, "Active"))
//!     .await?;
//! ```
//!
//! ## 事务约束
//!
//! - **种子变更**：`update_origin_seeds` 按增量平移平面内全部瓦片并逐一重新
//!   校验；任一瓦片越界或冲突时整个变更回退（`is_tile_movable` 关闭的平面
//!   瓦片原地校验，不随种子移动）
//! - **标签范围增删**：所属轴的种子与步长重置为 1，瓦片随种子增量平移
//! - **尺寸调整**：已放置瓦片的平面拒绝调整尺寸

pub mod error;
pub mod in_memory;
pub mod seeds;
pub mod traits;

pub use error::*;
pub use seeds::*;
pub use traits::*;

pub use in_memory::InMemoryGridStore;
