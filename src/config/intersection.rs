use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use super::Validate;
use crate::simulation::LANE_COUNT;

pub const MIN_TICK_RATE: f32 = 1.0;
pub const MAX_TICK_RATE: f32 = 1000.0;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntersectionConfig {
    #[serde(default)]
    pub geometry: IntersectionGeometryConfig,
    #[serde(default = "default_lanes")]
    pub lanes: Vec<LaneConfig>,
    #[serde(default)]
    pub timing: TimingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntersectionGeometryConfig {
    pub center_x: f32,
    pub center_y: f32,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub road_width: f32,
    pub intersection_size: f32,
    // Distance between the edge of the intersection box and the stop line
    pub stop_line_margin: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LaneConfig {
    pub label: String,
    // Unit vector vehicles in this lane travel along
    pub direction: [f32; 2],
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimingConfig {
    pub tick_rate: f32,
    pub completion_pause_ms: u64,
}

impl IntersectionGeometryConfig {
    pub fn stop_line_distance(&self) -> f32 {
        self.intersection_size / 2.0 + self.stop_line_margin
    }
}

impl Default for IntersectionConfig {
    fn default() -> Self {
        Self {
            geometry: IntersectionGeometryConfig::default(),
            lanes: default_lanes(),
            timing: TimingConfig::default(),
        }
    }
}

impl Default for IntersectionGeometryConfig {
    fn default() -> Self {
        Self {
            center_x: 400.0,
            center_y: 400.0,
            canvas_width: 800.0,
            canvas_height: 800.0,
            road_width: 140.0,
            intersection_size: 180.0,
            stop_line_margin: 10.0,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_rate: 75.0,
            completion_pause_ms: 800,
        }
    }
}

fn default_lanes() -> Vec<LaneConfig> {
    // Top, right, bottom, left approaches; screen coordinates grow downwards
    [("A", [0.0, 1.0]), ("B", [-1.0, 0.0]), ("C", [0.0, -1.0]), ("D", [1.0, 0.0])]
        .into_iter()
        .map(|(label, direction)| LaneConfig {
            label: label.to_string(),
            direction,
        })
        .collect()
}

impl Validate for IntersectionConfig {
    fn validate(&self) -> Result<()> {
        let geometry = &self.geometry;

        if geometry.intersection_size <= 0.0 {
            return Err(anyhow!("Intersection size must be positive"));
        }

        if geometry.road_width <= 0.0 {
            return Err(anyhow!("Road width must be positive"));
        }

        if geometry.canvas_width <= 0.0 || geometry.canvas_height <= 0.0 {
            return Err(anyhow!("Canvas dimensions must be positive"));
        }

        // Stop lines sit strictly outside the intersection box
        if geometry.stop_line_margin <= 0.0 {
            return Err(anyhow!("Stop line margin must be positive"));
        }

        if geometry.road_width > geometry.intersection_size {
            return Err(anyhow!("Road width {} does not fit the intersection size {}", geometry.road_width, geometry.intersection_size));
        }

        if self.lanes.len() != LANE_COUNT {
            return Err(anyhow!("Exactly {} lanes are required, got {}", LANE_COUNT, self.lanes.len()));
        }

        for lane in &self.lanes {
            if lane.label.trim().is_empty() {
                return Err(anyhow!("Lane labels must not be empty"));
            }

            let [dx, dy] = lane.direction;
            let norm = (dx * dx + dy * dy).sqrt();
            if (norm - 1.0).abs() > 1e-3 {
                return Err(anyhow!("Direction of lane '{}' must be a unit vector, got length {:.3}", lane.label, norm));
            }
        }

        let timing = &self.timing;
        if !(MIN_TICK_RATE..=MAX_TICK_RATE).contains(&timing.tick_rate) {
            return Err(anyhow!(
                "Tick rate must be between {} and {} ticks per second, got {}",
                MIN_TICK_RATE, MAX_TICK_RATE, timing.tick_rate
            ));
        }

        Ok(())
    }
}
