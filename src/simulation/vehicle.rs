use super::{IntersectionGeometry, Lane, LaneIndex, Point, VehicleType};
use crate::config::{VehicleClassConfig, VehiclesConfig};
use nalgebra::Point2;

#[derive(Debug, Clone)]
pub struct Vehicle {
    pub vehicle_type: VehicleType,
    pub lane_index: LaneIndex,
    // 0 is the lead vehicle at the stop line
    pub queue_position: usize,
    // Centre of the footprint
    pub position: Point,
    pub length: f32,
    pub width: f32,
    pub speed: f32,
}

impl Vehicle {
    pub fn new(vehicle_type: VehicleType, lane_index: LaneIndex, queue_position: usize, class: &VehicleClassConfig) -> Self {
        Self {
            vehicle_type,
            lane_index,
            queue_position,
            position: Point2::origin(),
            length: class.length,
            width: class.width,
            speed: class.speed,
        }
    }

    pub fn from_config(vehicle_type: VehicleType, lane_index: LaneIndex, queue_position: usize, config: &VehiclesConfig) -> Self {
        let class = if vehicle_type.is_emergency() {
            &config.emergency
        } else {
            &config.car
        };
        Self::new(vehicle_type, lane_index, queue_position, class)
    }

    pub fn advance(&mut self, lane: &Lane) {
        self.position += lane.direction * self.speed;
    }
}

#[derive(Debug, Clone, Default)]
pub struct LaneQueue {
    vehicles: Vec<Vehicle>,
}

impl LaneQueue {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self { vehicles }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn lead(&self) -> Option<&Vehicle> {
        self.vehicles.first()
    }

    pub fn lead_mut(&mut self) -> Option<&mut Vehicle> {
        self.vehicles.first_mut()
    }

    pub fn contents(&self) -> Vec<VehicleType> {
        self.vehicles.iter().map(|v| v.vehicle_type).collect()
    }

    pub fn has_emergency(&self) -> bool {
        self.vehicles.iter().any(|v| v.vehicle_type.is_emergency())
    }

    // Re-index and park every vehicle behind the stop line, `gap` between bumpers
    pub fn restack(&mut self, geometry: &IntersectionGeometry, lane: &Lane, gap: f32) {
        let mut setback = 0.0;
        for (queue_position, vehicle) in self.vehicles.iter_mut().enumerate() {
            vehicle.queue_position = queue_position;
            vehicle.position = geometry.resting_position(lane, setback, vehicle.length);
            setback += vehicle.length + gap;
        }
    }

    pub fn pop_lead(&mut self, geometry: &IntersectionGeometry, lane: &Lane, gap: f32) -> Option<Vehicle> {
        if self.vehicles.is_empty() {
            return None;
        }
        let lead = self.vehicles.remove(0);
        self.restack(geometry, lane, gap);
        Some(lead)
    }
}
