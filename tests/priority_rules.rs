use intersection_sim::simulation::{
    next_active_lane, resolve_priority, PriorityReason,
    VehicleType::{self, Ambulance, Car, Fire, Police},
};

fn lanes(contents: [&[VehicleType]; 4]) -> Vec<Vec<VehicleType>> {
    contents.iter().map(|lane| lane.to_vec()).collect()
}

#[test]
fn ambulance_lane_goes_first() {
    let lanes = lanes([&[Car, Car], &[Ambulance], &[], &[Car, Car, Car]]);
    assert_eq!(next_active_lane(&lanes, None), 1);
}

#[test]
fn busiest_lane_goes_first_without_emergencies() {
    let lanes = lanes([&[Car, Car], &[], &[], &[Car, Car, Car]]);
    assert_eq!(next_active_lane(&lanes, None), 3);
}

#[test]
fn empty_lanes_fall_back_to_round_robin() {
    let lanes = lanes([&[], &[], &[], &[]]);
    assert_eq!(next_active_lane(&lanes, Some(2)), 3);
    assert_eq!(next_active_lane(&lanes, Some(3)), 0, "wraps around after the last lane");
    assert_eq!(next_active_lane(&lanes, None), 0, "no prior lane starts at the first");
}

#[test]
fn round_robin_never_reselects_current_lane() {
    let lanes = lanes([&[], &[], &[], &[]]);
    for current in 0..4 {
        assert_ne!(next_active_lane(&lanes, Some(current)), current);
    }
}

#[test]
fn ambulance_outranks_any_car_count() {
    let lanes = lanes([
        &[Car; 12],
        &[Car, Police, Fire],
        &[Car, Car, Ambulance],
        &[Car; 30],
    ]);
    let selected = next_active_lane(&lanes, Some(0));
    assert!(lanes[selected].contains(&Ambulance));
    assert_eq!(selected, 2);
}

#[test]
fn emergency_classes_are_strictly_ordered() {
    // fire beats police regardless of lane order
    let fire_and_police = lanes([&[Police], &[Car; 5], &[], &[Fire]]);
    assert_eq!(next_active_lane(&fire_and_police, None), 3);

    // police beats the busiest lane
    let police_and_cars = lanes([&[Car; 9], &[], &[Police], &[Car; 4]]);
    assert_eq!(next_active_lane(&police_and_cars, None), 2);
}

#[test]
fn ties_favour_the_lowest_lane_index() {
    let ambulances = lanes([&[], &[Ambulance], &[Car], &[Ambulance, Ambulance]]);
    assert_eq!(next_active_lane(&ambulances, None), 1);

    let cars = lanes([&[Car], &[Car, Car], &[], &[Car, Car]]);
    assert_eq!(next_active_lane(&cars, Some(1)), 1);
}

#[test]
fn resolution_is_deterministic() {
    let lanes = lanes([&[Car, Police], &[Car, Car], &[Fire], &[]]);
    for current in [None, Some(0), Some(1), Some(2), Some(3)] {
        let first = resolve_priority(&lanes, current);
        let second = resolve_priority(&lanes, current);
        assert_eq!(first, second);
    }
}

#[test]
fn selection_reports_its_reason() {
    let emergency = lanes([&[Car], &[Fire], &[], &[]]);
    assert_eq!(resolve_priority(&emergency, None).reason, PriorityReason::Emergency(Fire));

    let busiest = lanes([&[Car], &[Car, Car, Car], &[], &[]]);
    assert_eq!(resolve_priority(&busiest, None).reason, PriorityReason::CarCount(3));

    let empty = lanes([&[], &[], &[], &[]]);
    assert_eq!(resolve_priority(&empty, Some(1)).reason, PriorityReason::RoundRobin);
}

#[test]
fn accepts_borrowed_lane_slices() {
    let a = [Car, Car];
    let b = [Police];
    let borrowed: [&[VehicleType]; 2] = [&a, &b];
    assert_eq!(next_active_lane(&borrowed, None), 1);
}
