use nalgebra::{Vector2, Point2};
use serde::Serialize;
use std::fmt;

use crate::error::SimulationError;

pub mod geometry;
pub mod vehicle;
pub mod priority;
pub mod simulator;
pub mod performance;

pub use geometry::*;
pub use vehicle::*;
pub use priority::*;
pub use simulator::*;
pub use performance::*;

pub type Vec2 = Vector2<f32>;
pub type Point = Point2<f32>;

// Index of an approach lane, 0..LANE_COUNT
pub type LaneIndex = usize;

pub const LANE_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Ambulance,
    Fire,
    Police,
}

impl VehicleType {
    // Emergency classes, highest priority first
    pub const EMERGENCY_PRIORITY: [VehicleType; 3] = [
        VehicleType::Ambulance,
        VehicleType::Fire,
        VehicleType::Police,
    ];

    pub fn is_emergency(self) -> bool {
        !matches!(self, VehicleType::Car)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::Car => "car",
            VehicleType::Ambulance => "ambulance",
            VehicleType::Fire => "fire",
            VehicleType::Police => "police",
        }
    }

    // Buses and trucks are ordinary vehicles as far as priority goes
    pub fn from_class_name(name: &str) -> Result<Self, SimulationError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "car" | "bus" | "truck" => Ok(VehicleType::Car),
            "ambulance" => Ok(VehicleType::Ambulance),
            "fire" => Ok(VehicleType::Fire),
            "police" => Ok(VehicleType::Police),
            _ => Err(SimulationError::UnknownClass(name.to_string())),
        }
    }

    // Unknown class names become ordinary vehicles
    pub fn classify(name: &str) -> Self {
        match Self::from_class_name(name) {
            Ok(vehicle_type) => vehicle_type,
            Err(e) => {
                log::warn!("{}", e);
                VehicleType::Car
            }
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct SimulationState {
    pub lanes: Vec<LaneQueue>,
    pub active_lane: LaneIndex,
    pub tick: u64,
}

impl SimulationState {
    pub fn signals(&self) -> Vec<Vec<VehicleType>> {
        self.lanes.iter().map(|lane| lane.contents()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.iter().all(|lane| lane.is_empty())
    }

    pub fn total_vehicles(&self) -> usize {
        self.lanes.iter().map(|lane| lane.len()).sum()
    }

    pub fn lane(&self, index: LaneIndex) -> Option<&LaneQueue> {
        self.lanes.get(index)
    }
}
