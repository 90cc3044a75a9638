use anyhow::Result;
use log::warn;
use std::collections::BTreeMap;
use std::path::Path;

use crate::simulation::{VehicleType, LANE_COUNT};

pub mod class_counts;
pub mod detector;

pub use class_counts::*;
pub use detector::*;

// Detector class name -> number of detections
pub type ClassCounts = BTreeMap<String, u32>;

pub trait VehicleCountSource {
    fn lane_counts(&mut self) -> Result<Vec<ClassCounts>>;
}

// Object-detection model, loaded once by the caller and reused per image
pub trait Detector {
    fn detect(&self, image: &Path) -> Result<ClassCounts>;
}

pub fn normalize_lanes(mut lanes: Vec<ClassCounts>) -> Vec<ClassCounts> {
    if lanes.len() > LANE_COUNT {
        warn!("Got counts for {} lanes, ignoring all but the first {}", lanes.len(), LANE_COUNT);
        lanes.truncate(LANE_COUNT);
    }
    lanes.resize_with(LANE_COUNT, ClassCounts::new);
    lanes
}

// Upper bound on vehicles queued per lane; a camera never sees more
pub const MAX_LANE_VEHICLES: u32 = 1000;

// Sum of all class counts, saturating instead of wrapping
pub fn total_count(counts: &ClassCounts) -> u32 {
    counts.values().fold(0u32, |total, &count| total.saturating_add(count))
}

// Emergency vehicles in priority order, then every other class as cars
pub fn lane_vehicles(counts: &ClassCounts) -> Vec<VehicleType> {
    let mut emergency = [0u32; 3];
    let mut cars = 0u32;

    for (class, &count) in counts {
        let vehicle_type = VehicleType::classify(class);
        match VehicleType::EMERGENCY_PRIORITY.iter().position(|t| *t == vehicle_type) {
            Some(rank) => emergency[rank] = emergency[rank].saturating_add(count),
            None => cars = cars.saturating_add(count),
        }
    }

    let total = emergency.iter().fold(cars, |total, &count| total.saturating_add(count));
    if total > MAX_LANE_VEHICLES {
        warn!("Lane reports {} vehicles, queueing only the first {}", total, MAX_LANE_VEHICLES);
    }

    // Emergency vehicles are kept ahead of cars when the cap bites
    let mut remaining = MAX_LANE_VEHICLES;
    let mut vehicles = Vec::new();
    let tiers = VehicleType::EMERGENCY_PRIORITY
        .into_iter()
        .zip(emergency)
        .chain(std::iter::once((VehicleType::Car, cars)));

    for (vehicle_type, count) in tiers {
        let take = count.min(remaining);
        vehicles.extend(std::iter::repeat(vehicle_type).take(take as usize));
        remaining -= take;
    }
    vehicles
}

pub fn lane_assignment(counts: &[ClassCounts]) -> Vec<Vec<VehicleType>> {
    counts.iter().map(lane_vehicles).collect()
}
