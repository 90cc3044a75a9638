use super::{LaneIndex, VehicleType, LANE_COUNT};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityReason {
    Emergency(VehicleType),
    CarCount(usize),
    RoundRobin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneSelection {
    pub lane: LaneIndex,
    pub reason: PriorityReason,
}

impl fmt::Display for PriorityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityReason::Emergency(vehicle_type) => write!(f, "{} waiting", vehicle_type),
            PriorityReason::CarCount(count) => write!(f, "{} cars queued", count),
            PriorityReason::RoundRobin => f.write_str("round-robin"),
        }
    }
}

// `current_active` is None when no lane has been active yet
pub fn resolve_priority<L: AsRef<[VehicleType]>>(lanes: &[L], current_active: Option<LaneIndex>) -> LaneSelection {
    // Ambulance, then fire, then police; first lane in index order wins
    for emergency in VehicleType::EMERGENCY_PRIORITY {
        if let Some(lane) = lanes.iter().position(|l| l.as_ref().contains(&emergency)) {
            return LaneSelection {
                lane,
                reason: PriorityReason::Emergency(emergency),
            };
        }
    }

    // Strictly greater keeps the lowest index on ties
    let mut busiest: Option<(LaneIndex, usize)> = None;
    for (lane, contents) in lanes.iter().enumerate() {
        let cars = contents.as_ref().iter().filter(|t| **t == VehicleType::Car).count();
        if cars > busiest.map_or(0, |(_, most)| most) {
            busiest = Some((lane, cars));
        }
    }
    if let Some((lane, cars)) = busiest {
        return LaneSelection {
            lane,
            reason: PriorityReason::CarCount(cars),
        };
    }

    // Nothing queued anywhere, rotate
    let lane_count = if lanes.is_empty() { LANE_COUNT } else { lanes.len() };
    LaneSelection {
        lane: current_active.map_or(0, |current| (current + 1) % lane_count),
        reason: PriorityReason::RoundRobin,
    }
}

pub fn next_active_lane<L: AsRef<[VehicleType]>>(lanes: &[L], current_active: Option<LaneIndex>) -> LaneIndex {
    resolve_priority(lanes, current_active).lane
}
