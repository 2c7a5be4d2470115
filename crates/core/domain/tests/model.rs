use domain::{AllocationType, Axis, FloorPlan, FloorPlanTile, LabelType, ObjectRef};
use uuid::Uuid;

#[test]
fn floor_plan_axis_accessors_follow_axis() {
    let mut plan = FloorPlan::new(Uuid::new_v4(), 10, 20);
    plan.x_origin_seed = 3;
    plan.y_axis_step = -1;

    assert_eq!(plan.size(Axis::X), 10);
    assert_eq!(plan.size(Axis::Y), 20);
    assert_eq!(plan.origin_seed(Axis::X), 3);
    assert_eq!(plan.origin_seed(Axis::Y), 1);
    assert_eq!(plan.axis_step(Axis::Y), -1);

    plan.set_origin_seed(Axis::Y, 7);
    plan.set_axis_step(Axis::X, 2);
    assert_eq!(plan.origin_seed(Axis::Y), 7);
    assert_eq!(plan.axis_step(Axis::X), 2);
}

#[test]
fn label_type_parse_round_trips_all_names() {
    for label_type in LabelType::ALL {
        assert_eq!(LabelType::parse(label_type.as_str()), Some(label_type));
    }
    assert_eq!(LabelType::parse("decimal"), None);
}

#[test]
fn allocation_type_derived_from_object_presence() {
    let plan_id = Uuid::new_v4();
    let mut tile = FloorPlanTile::new(plan_id, 1, 1, "Active");
    assert_eq!(tile.allocation_type(), AllocationType::RackGroup);

    tile.object = Some(ObjectRef::Rack {
        id: Uuid::new_v4(),
        location_id: None,
        rack_group: None,
    });
    assert_eq!(tile.allocation_type(), AllocationType::Object);
}

#[test]
fn power_feed_location_resolves_to_panel_location() {
    let panel_location = Uuid::new_v4();
    let feed = ObjectRef::PowerFeed {
        id: Uuid::new_v4(),
        panel_location_id: Some(panel_location),
    };
    assert_eq!(feed.location_id(), Some(panel_location));
    assert_eq!(feed.kind_name(), "power feed");
}
