use domain::{FloorPlan, FloorPlanTile, ObjectRef};
use floorplan_geometry::{GeometryError, shift_tile_origins, validate_tile_placement};
use uuid::Uuid;

fn rack(plan: &FloorPlan, group: Option<&str>) -> ObjectRef {
    ObjectRef::Rack {
        id: Uuid::new_v4(),
        location_id: Some(plan.location_id),
        rack_group: group.map(str::to_string),
    }
}

#[test]
fn rack_row_layout_builds_incrementally() {
    let plan = FloorPlan::new(Uuid::new_v4(), 6, 6);
    let mut placed: Vec<FloorPlanTile> = Vec::new();

    let mut group = FloorPlanTile::new(plan.id, 1, 1, "Active");
    group.x_size = 4;
    group.y_size = 2;
    group.rack_group = Some("row-1".to_string());
    assert!(validate_tile_placement(&group, &placed, &plan).is_ok());
    placed.push(group);

    for x in 1..=4 {
        let mut tile = FloorPlanTile::new(plan.id, x, 1, "Active");
        tile.object = Some(rack(&plan, Some("row-1")));
        let outcome = validate_tile_placement(&tile, &placed, &plan)
            .unwrap_or_else(|errors| panic!("rack at x={x}: {errors:?}"));
        assert!(outcome.on_group_tile);
        tile.on_group_tile = outcome.on_group_tile;
        placed.push(tile);
    }

    // 第五个机架落在组瓦片之外，可独立放置
    let mut outside = FloorPlanTile::new(plan.id, 5, 1, "Active");
    outside.object = Some(rack(&plan, None));
    let outcome = validate_tile_placement(&outside, &placed, &plan).unwrap();
    assert!(!outcome.on_group_tile);
    placed.push(outside);

    // 异组机架压在 row-1 组瓦片上被拒绝
    let mut foreign = FloorPlanTile::new(plan.id, 2, 2, "Active");
    foreign.object = Some(rack(&plan, Some("row-2")));
    let errors = validate_tile_placement(&foreign, &placed, &plan).unwrap_err();
    assert!(errors.contains(&GeometryError::RackGroupMismatch {
        rack_group: "row-2".to_string(),
        tile_group: "row-1".to_string(),
    }));
}

#[test]
fn shifted_layout_revalidates_against_new_seeds() {
    let mut plan = FloorPlan::new(Uuid::new_v4(), 3, 3);
    let mut tiles = vec![
        FloorPlanTile::new(plan.id, 1, 1, "Active"),
        FloorPlanTile::new(plan.id, 3, 3, "Active"),
    ];

    plan.x_origin_seed = 5;
    plan.y_origin_seed = 5;
    shift_tile_origins(&mut tiles, 4, 4);

    for (index, tile) in tiles.iter().enumerate() {
        let others: Vec<FloorPlanTile> = tiles
            .iter()
            .filter(|t| t.id != tile.id)
            .cloned()
            .collect();
        assert!(
            validate_tile_placement(tile, &others, &plan).is_ok(),
            "tile {index}"
        );
    }
    assert_eq!(tiles[0].x_origin, 5);
    assert_eq!(tiles[1].y_origin, 7);
}
