//! 瓦片放置校验与原点平移。
//!
//! 放置规则：
//! - 原点与跨度必须落在种子相对的平面边界内
//! - 对象瓦片之间、机架组瓦片之间不允许重叠
//! - 对象瓦片与机架组瓦片相交时必须完整嵌套，且机架组归属一致
//! - 对象只能放置一次；已装入机架的设备不能再放置；对象位置须与平面一致

use domain::{AllocationType, FloorPlan, FloorPlanTile, ObjectRef};
use tracing::{debug, warn};

use crate::GeometryError;
use crate::bounds::TileBounds;

/// 放置校验通过时派生的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementOutcome {
    /// 候选对象瓦片是否完整嵌套在机架组瓦片内。
    pub on_group_tile: bool,
}

/// 校验候选瓦片能否放置到平面上；错误按候选聚合。
///
/// `existing` 为同一平面的既有瓦片快照；更新场景下与候选同 id 的记录被跳过。
pub fn validate_tile_placement(
    candidate: &FloorPlanTile,
    existing: &[FloorPlanTile],
    plan: &FloorPlan,
) -> Result<PlacementOutcome, Vec<GeometryError>> {
    let mut errors = Vec::new();
    let mut outcome = PlacementOutcome::default();

    check_extents(candidate, plan, &mut errors);
    check_object_constraints(candidate, existing, plan, &mut errors);

    let bounds = TileBounds::of_tile(candidate);
    let neighbors: Vec<&FloorPlanTile> = existing
        .iter()
        .filter(|t| t.floor_plan_id == candidate.floor_plan_id && t.id != candidate.id)
        .collect();

    for other in &neighbors {
        let other_bounds = TileBounds::of_tile(other);
        if !bounds.intersects(&other_bounds) {
            continue;
        }
        match (candidate.allocation_type(), other.allocation_type()) {
            (AllocationType::Object, AllocationType::Object) => {
                errors.push(GeometryError::ObjectOverlap);
            }
            (AllocationType::RackGroup, AllocationType::RackGroup) => {
                errors.push(GeometryError::RackGroupOverlap);
            }
            (AllocationType::Object, AllocationType::RackGroup) => {
                if other_bounds.contains(&bounds) {
                    outcome.on_group_tile = true;
                    check_group_identity(candidate, other, &mut errors);
                } else {
                    errors.push(GeometryError::NotNestedInGroup);
                }
            }
            (AllocationType::RackGroup, AllocationType::Object) => {
                if bounds.contains(&other_bounds) {
                    check_group_identity(other, candidate, &mut errors);
                } else {
                    errors.push(GeometryError::NotNestedInGroup);
                }
            }
        }
    }

    // 带机架组的机架还要对平面上所有异组的组瓦片做一次扫描
    if let Some(ObjectRef::Rack {
        rack_group: Some(rack_group),
        ..
    }) = &candidate.object
    {
        for other in &neighbors {
            if other.allocation_type() != AllocationType::RackGroup {
                continue;
            }
            let Some(tile_group) = &other.rack_group else {
                continue;
            };
            if tile_group != rack_group && TileBounds::of_tile(other).intersects(&bounds) {
                let mismatch = GeometryError::RackGroupMismatch {
                    rack_group: rack_group.clone(),
                    tile_group: tile_group.clone(),
                };
                if !errors.contains(&mismatch) {
                    errors.push(mismatch);
                }
            }
        }
    }

    if errors.is_empty() {
        debug!(tile = %candidate.id, on_group_tile = outcome.on_group_tile, "tile placement validated");
        Ok(outcome)
    } else {
        floorplan_telemetry::record_tile_validation_failure();
        warn!(tile = %candidate.id, errors = errors.len(), "tile placement rejected");
        Err(errors)
    }
}

/// 原点与跨度必须落在种子相对的平面范围内。
fn check_extents(candidate: &FloorPlanTile, plan: &FloorPlan, errors: &mut Vec<GeometryError>) {
    if candidate.x_size < 1 {
        errors.push(GeometryError::SizeTooSmall { field: "x_size" });
    }
    if candidate.y_size < 1 {
        errors.push(GeometryError::SizeTooSmall { field: "y_size" });
    }

    let x_minimum = plan.x_origin_seed;
    let x_maximum = plan.x_origin_seed + plan.x_size - 1;
    if candidate.x_origin < x_minimum {
        errors.push(GeometryError::OriginTooSmall {
            field: "x_origin",
            minimum: x_minimum,
        });
    } else if candidate.x_origin + candidate.x_size - 1 > x_maximum {
        errors.push(GeometryError::OutOfBounds {
            field: "x_origin",
            value: candidate.x_origin + candidate.x_size - 1,
            maximum: x_maximum,
        });
    }

    let y_minimum = plan.y_origin_seed;
    let y_maximum = plan.y_origin_seed + plan.y_size - 1;
    if candidate.y_origin < y_minimum {
        errors.push(GeometryError::OriginTooSmall {
            field: "y_origin",
            minimum: y_minimum,
        });
    } else if candidate.y_origin + candidate.y_size - 1 > y_maximum {
        errors.push(GeometryError::OutOfBounds {
            field: "y_origin",
            value: candidate.y_origin + candidate.y_size - 1,
            maximum: y_maximum,
        });
    }
}

/// 对象级约束：位置一致、设备未装架、对象未重复放置。
fn check_object_constraints(
    candidate: &FloorPlanTile,
    existing: &[FloorPlanTile],
    plan: &FloorPlan,
    errors: &mut Vec<GeometryError>,
) {
    let Some(object) = &candidate.object else {
        return;
    };

    if object.location_id() != Some(plan.location_id) {
        errors.push(GeometryError::LocationMismatch {
            kind: object.kind_name(),
        });
    }

    if let ObjectRef::Device {
        installed_in_rack: true,
        ..
    } = object
    {
        errors.push(GeometryError::DeviceAlreadyRacked);
    }

    let already_placed = existing.iter().any(|t| {
        t.floor_plan_id == candidate.floor_plan_id
            && t.id != candidate.id
            && t.object.as_ref().is_some_and(|o| o.id() == object.id())
    });
    if already_placed {
        errors.push(GeometryError::ObjectAlreadyPlaced {
            kind: object.kind_name(),
        });
    }
}

/// 对象瓦片与组瓦片的机架组归属必须一致（机架无组时继承组瓦片）。
fn check_group_identity(
    object_tile: &FloorPlanTile,
    group_tile: &FloorPlanTile,
    errors: &mut Vec<GeometryError>,
) {
    let Some(tile_group) = &group_tile.rack_group else {
        return;
    };
    let Some(object) = &object_tile.object else {
        return;
    };
    if let Some(rack_group) = object.rack_group()
        && rack_group != tile_group
    {
        let mismatch = GeometryError::RackGroupMismatch {
            rack_group: rack_group.to_string(),
            tile_group: tile_group.clone(),
        };
        if !errors.contains(&mismatch) {
            errors.push(mismatch);
        }
    }
}

/// 平移平面上全部瓦片的原点（种子变更时使用）。
pub fn shift_tile_origins(tiles: &mut [FloorPlanTile], delta_x: i64, delta_y: i64) {
    for tile in tiles {
        tile.x_origin += delta_x;
        tile.y_origin += delta_y;
    }
}
