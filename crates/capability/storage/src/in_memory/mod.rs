//! 内存存储实现模块
//!
//! 仅用于测试和作为协作方存储的本地替身。
//!
//! 包含以下实现：
//! - FloorPlanStore / CustomLabelStore / TileStore: InMemoryGridStore

pub mod grid;

pub use grid::*;
