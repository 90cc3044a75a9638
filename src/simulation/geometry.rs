use super::{LaneIndex, Point, Vec2};
use crate::config::IntersectionConfig;
use nalgebra::{Point2, Vector2};

// One approach to the intersection, static after setup
#[derive(Debug, Clone)]
pub struct Lane {
    pub index: LaneIndex,
    pub label: String,
    // Midpoint of the stop line on the approach side
    pub entry: Point,
    // Unit vector of travel towards and through the intersection
    pub direction: Vec2,
}

#[derive(Debug, Clone)]
pub struct IntersectionGeometry {
    pub canvas: [f32; 2],
    pub center: Point,
    // Side length of the square intersection footprint
    pub size: f32,
    pub road_width: f32,
    pub stop_line_distance: f32,
    pub lanes: Vec<Lane>,
}

impl IntersectionGeometry {
    pub fn from_config(config: &IntersectionConfig) -> Self {
        let geometry = &config.geometry;
        let center = Point2::new(geometry.center_x, geometry.center_y);
        let stop_line_distance = geometry.stop_line_distance();

        let lanes = config.lanes
            .iter()
            .enumerate()
            .map(|(index, lane)| {
                let direction = Vector2::new(lane.direction[0], lane.direction[1]);
                Lane {
                    index,
                    label: lane.label.clone(),
                    entry: center - direction * stop_line_distance,
                    direction,
                }
            })
            .collect();

        Self {
            canvas: [geometry.canvas_width, geometry.canvas_height],
            center,
            size: geometry.intersection_size,
            road_width: geometry.road_width,
            stop_line_distance,
            lanes,
        }
    }

    pub fn label(&self, index: LaneIndex) -> &str {
        self.lanes.get(index).map(|lane| lane.label.as_str()).unwrap_or("?")
    }

    // Signed distance past the centre along the lane's direction
    fn progress(&self, lane: &Lane, position: Point) -> f32 {
        (position - self.center).dot(&lane.direction)
    }

    pub fn has_crossed(&self, lane: &Lane, position: Point, length: f32) -> bool {
        // Rear edge past the far side means the footprint is clear
        let rear_edge = self.progress(lane, position) - length / 2.0;
        rear_edge > self.size / 2.0
    }

    // Centre of a vehicle whose front bumper sits `setback` behind the stop line
    pub fn resting_position(&self, lane: &Lane, setback: f32, length: f32) -> Point {
        lane.entry - lane.direction * (setback + length / 2.0)
    }
}
