use serde::Serialize;
use std::collections::BTreeMap;

use crate::detection::{lane_assignment, normalize_lanes, ClassCounts};
use crate::simulation::{next_active_lane, LaneIndex, VehicleType};

const OTHER_CLASSES: [&str; 3] = ["bus", "car", "truck"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SignalStats {
    pub total_vehicles: u32,
    pub emergency_vehicles: u32,
    pub other_vehicles: u32,
}

impl SignalStats {
    pub fn from_counts(counts: &ClassCounts) -> Self {
        let mut stats = SignalStats::default();
        for (class, &count) in counts {
            // Unrecognised classes count towards the total only
            stats.total_vehicles = stats.total_vehicles.saturating_add(count);
            let class = class.trim().to_ascii_lowercase();
            if VehicleType::from_class_name(&class).is_ok_and(|t| t.is_emergency()) {
                stats.emergency_vehicles = stats.emergency_vehicles.saturating_add(count);
            } else if OTHER_CLASSES.contains(&class.as_str()) {
                stats.other_vehicles = stats.other_vehicles.saturating_add(count);
            }
        }
        stats
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SignalReport {
    pub signals: BTreeMap<String, SignalStats>,
    pub go_first: String,
}

pub fn signal_id(lane: LaneIndex) -> String {
    format!("signal{}", lane + 1)
}

impl SignalReport {
    pub fn from_counts(counts: &[ClassCounts]) -> Self {
        let lanes = normalize_lanes(counts.to_vec());

        let signals = lanes
            .iter()
            .enumerate()
            .map(|(lane, counts)| (signal_id(lane), SignalStats::from_counts(counts)))
            .collect();

        let go_first = next_active_lane(&lane_assignment(&lanes), None);

        Self {
            signals,
            go_first: signal_id(go_first),
        }
    }
}
