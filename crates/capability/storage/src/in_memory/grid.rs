//! 网格内存存储实现
//!
//! 仅用于测试和作为协作方存储的本地替身。
//!
//! 功能：
//! - 楼层平面 / 标签范围 / 瓦片 CRUD
//! - 放置前几何校验
//! - 种子变更与标签增删的原子事务（单写锁内完成）

use crate::error::StorageError;
use crate::seeds::position_from_display_label;
use crate::traits::{CustomLabelStore, FloorPlanStore, TileStore};
use domain::{Axis, CustomAxisLabel, FloorPlan, FloorPlanTile};
use floorplan_geometry::{shift_tile_origins, validate_tile_placement};
use floorplan_telemetry::{record_seed_shift, record_tile_placed};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Default)]
struct GridState {
    plans: HashMap<Uuid, FloorPlan>,
    labels: HashMap<Uuid, CustomAxisLabel>,
    tiles: HashMap<Uuid, FloorPlanTile>,
}

/// 网格内存存储
///
/// 三类资源共用一把 RwLock，跨资源事务在单次写锁内提交。
pub struct InMemoryGridStore {
    state: RwLock<GridState>,
}

impl InMemoryGridStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(GridState::default()),
        }
    }
}

impl Default for InMemoryGridStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GridState {
    fn plan_tiles(&self, floor_plan_id: Uuid) -> Vec<FloorPlanTile> {
        self.tiles
            .values()
            .filter(|t| t.floor_plan_id == floor_plan_id)
            .cloned()
            .collect()
    }

    fn axis_bounds(&self, floor_plan_id: Uuid, axis: Axis) -> Vec<(String, String)> {
        let mut ranges: Vec<&CustomAxisLabel> = self
            .labels
            .values()
            .filter(|l| l.floor_plan_id == floor_plan_id && l.axis == axis)
            .collect();
        ranges.sort_by_key(|l| l.order);
        ranges
            .iter()
            .map(|l| (l.start_label.clone(), l.end_label.clone()))
            .collect()
    }

    /// 种子变更事务：平移平面内全部瓦片并逐一重新校验，失败则不落任何改动。
    fn apply_seed_change(
        &mut self,
        floor_plan_id: Uuid,
        x_seed: Option<i64>,
        y_seed: Option<i64>,
    ) -> Result<Option<FloorPlan>, StorageError> {
        let Some(plan) = self.plans.get(&floor_plan_id) else {
            return Ok(None);
        };
        let mut updated = plan.clone();
        let delta_x = x_seed.map_or(0, |seed| seed - updated.x_origin_seed);
        let delta_y = y_seed.map_or(0, |seed| seed - updated.y_origin_seed);
        if let Some(seed) = x_seed {
            updated.x_origin_seed = seed;
        }
        if let Some(seed) = y_seed {
            updated.y_origin_seed = seed;
        }

        if delta_x == 0 && delta_y == 0 {
            self.plans.insert(floor_plan_id, updated.clone());
            return Ok(Some(updated));
        }

        let mut moved = self.plan_tiles(floor_plan_id);
        if updated.is_tile_movable {
            shift_tile_origins(&mut moved, delta_x, delta_y);
        }
        for tile in &moved {
            validate_tile_placement(tile, &moved, &updated)
                .map_err(StorageError::from)?;
        }

        self.plans.insert(floor_plan_id, updated.clone());
        for tile in moved {
            self.tiles.insert(tile.id, tile);
        }
        record_seed_shift();
        debug!(floor_plan = %floor_plan_id, delta_x, delta_y, "origin seeds updated");
        Ok(Some(updated))
    }

    /// 标签范围增删后的轴重置：种子与步长回到 1，瓦片随种子增量平移。
    fn reset_axis_after_label_change(
        &mut self,
        floor_plan_id: Uuid,
        axis: Axis,
    ) -> Result<(), StorageError> {
        let Some(plan) = self.plans.get(&floor_plan_id) else {
            return Err(StorageError::new("floor plan not found"));
        };
        let mut updated = plan.clone();
        let delta = 1 - updated.origin_seed(axis);
        updated.set_origin_seed(axis, 1);
        updated.set_axis_step(axis, 1);

        if delta != 0 {
            let mut moved = self.plan_tiles(floor_plan_id);
            match axis {
                Axis::X => shift_tile_origins(&mut moved, delta, 0),
                Axis::Y => shift_tile_origins(&mut moved, 0, delta),
            }
            for tile in moved {
                self.tiles.insert(tile.id, tile);
            }
            record_seed_shift();
        }
        self.plans.insert(floor_plan_id, updated);
        Ok(())
    }
}

#[async_trait::async_trait]
impl FloorPlanStore for InMemoryGridStore {
    async fn create_floor_plan(&self, plan: FloorPlan) -> Result<FloorPlan, StorageError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        if state.plans.contains_key(&plan.id) {
            return Err(StorageError::new("floor plan exists"));
        }
        state.plans.insert(plan.id, plan.clone());
        Ok(plan)
    }

    async fn find_floor_plan(
        &self,
        floor_plan_id: Uuid,
    ) -> Result<Option<FloorPlan>, StorageError> {
        let plan = self
            .state
            .read()
            .ok()
            .and_then(|state| state.plans.get(&floor_plan_id).cloned());
        Ok(plan)
    }

    async fn list_floor_plans(&self) -> Result<Vec<FloorPlan>, StorageError> {
        let plans = self
            .state
            .read()
            .map(|state| state.plans.values().cloned().collect())
            .unwrap_or_default();
        Ok(plans)
    }

    async fn resize_floor_plan(
        &self,
        floor_plan_id: Uuid,
        x_size: i64,
        y_size: i64,
    ) -> Result<Option<FloorPlan>, StorageError> {
        if x_size < 1 || y_size < 1 {
            return Err(StorageError::new("floor plan sizes must be at least 1"));
        }
        let mut state = self
            .state
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let Some(plan) = state.plans.get(&floor_plan_id) else {
            return Ok(None);
        };
        if state
            .tiles
            .values()
            .any(|t| t.floor_plan_id == floor_plan_id)
        {
            warn!(floor_plan = %floor_plan_id, "resize rejected, tiles are placed");
            return Err(StorageError::new(
                "cannot resize a floor plan with tiles placed on it",
            ));
        }
        let mut updated = plan.clone();
        updated.x_size = x_size;
        updated.y_size = y_size;
        state.plans.insert(floor_plan_id, updated.clone());
        Ok(Some(updated))
    }

    async fn update_origin_seeds(
        &self,
        floor_plan_id: Uuid,
        x_seed: Option<i64>,
        y_seed: Option<i64>,
    ) -> Result<Option<FloorPlan>, StorageError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        state.apply_seed_change(floor_plan_id, x_seed, y_seed)
    }

    async fn update_origin_seed_labels(
        &self,
        floor_plan_id: Uuid,
        x_label: Option<String>,
        y_label: Option<String>,
    ) -> Result<Option<FloorPlan>, StorageError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let Some(plan) = state.plans.get(&floor_plan_id).cloned() else {
            return Ok(None);
        };
        let x_seed = match x_label {
            Some(label) => Some(position_from_display_label(
                &plan,
                Axis::X,
                &label,
                &state.axis_bounds(floor_plan_id, Axis::X),
            )?),
            None => None,
        };
        let y_seed = match y_label {
            Some(label) => Some(position_from_display_label(
                &plan,
                Axis::Y,
                &label,
                &state.axis_bounds(floor_plan_id, Axis::Y),
            )?),
            None => None,
        };
        state.apply_seed_change(floor_plan_id, x_seed, y_seed)
    }

    async fn delete_floor_plan(&self, floor_plan_id: Uuid) -> Result<bool, StorageError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        if state.plans.remove(&floor_plan_id).is_none() {
            return Ok(false);
        }
        state.labels.retain(|_, l| l.floor_plan_id != floor_plan_id);
        state.tiles.retain(|_, t| t.floor_plan_id != floor_plan_id);
        Ok(true)
    }
}

#[async_trait::async_trait]
impl CustomLabelStore for InMemoryGridStore {
    async fn list_custom_labels(
        &self,
        floor_plan_id: Uuid,
        axis: Axis,
    ) -> Result<Vec<CustomAxisLabel>, StorageError> {
        let mut labels: Vec<CustomAxisLabel> = self
            .state
            .read()
            .map(|state| {
                state
                    .labels
                    .values()
                    .filter(|l| l.floor_plan_id == floor_plan_id && l.axis == axis)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        labels.sort_by_key(|l| l.order);
        Ok(labels)
    }

    async fn add_custom_label(
        &self,
        label: CustomAxisLabel,
    ) -> Result<CustomAxisLabel, StorageError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        if !state.plans.contains_key(&label.floor_plan_id) {
            return Err(StorageError::new("floor plan not found"));
        }
        if state.labels.contains_key(&label.id) {
            return Err(StorageError::new("custom label exists"));
        }
        state.labels.insert(label.id, label.clone());
        state.reset_axis_after_label_change(label.floor_plan_id, label.axis)?;
        Ok(label)
    }

    async fn remove_custom_label(&self, label_id: Uuid) -> Result<bool, StorageError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let Some(label) = state.labels.remove(&label_id) else {
            return Ok(false);
        };
        state.reset_axis_after_label_change(label.floor_plan_id, label.axis)?;
        Ok(true)
    }
}

#[async_trait::async_trait]
impl TileStore for InMemoryGridStore {
    async fn list_tiles(&self, floor_plan_id: Uuid) -> Result<Vec<FloorPlanTile>, StorageError> {
        let tiles = self
            .state
            .read()
            .map(|state| state.plan_tiles(floor_plan_id))
            .unwrap_or_default();
        Ok(tiles)
    }

    async fn find_tile(&self, tile_id: Uuid) -> Result<Option<FloorPlanTile>, StorageError> {
        let tile = self
            .state
            .read()
            .ok()
            .and_then(|state| state.tiles.get(&tile_id).cloned());
        Ok(tile)
    }

    async fn place_tile(&self, mut tile: FloorPlanTile) -> Result<FloorPlanTile, StorageError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let Some(plan) = state.plans.get(&tile.floor_plan_id) else {
            return Err(StorageError::new("floor plan not found"));
        };
        if state.tiles.contains_key(&tile.id) {
            return Err(StorageError::new("tile exists"));
        }
        let existing = state.plan_tiles(tile.floor_plan_id);
        let outcome = validate_tile_placement(&tile, &existing, plan)
            .map_err(StorageError::from)?;
        tile.on_group_tile = outcome.on_group_tile;
        state.tiles.insert(tile.id, tile.clone());
        record_tile_placed();
        Ok(tile)
    }

    async fn update_tile(
        &self,
        mut tile: FloorPlanTile,
    ) -> Result<Option<FloorPlanTile>, StorageError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let Some(stored) = state.tiles.get(&tile.id) else {
            return Ok(None);
        };
        if stored.floor_plan_id != tile.floor_plan_id {
            return Err(StorageError::new("tile cannot move between floor plans"));
        }
        let Some(plan) = state.plans.get(&tile.floor_plan_id) else {
            return Err(StorageError::new("floor plan not found"));
        };
        let existing = state.plan_tiles(tile.floor_plan_id);
        let outcome = validate_tile_placement(&tile, &existing, plan)
            .map_err(StorageError::from)?;
        tile.on_group_tile = outcome.on_group_tile;
        state.tiles.insert(tile.id, tile.clone());
        Ok(Some(tile))
    }

    async fn delete_tile(&self, tile_id: Uuid) -> Result<bool, StorageError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(state.tiles.remove(&tile_id).is_some())
    }
}
