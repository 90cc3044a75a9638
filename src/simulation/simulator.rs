use anyhow::Result;
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::time::Duration;

use super::{
    resolve_priority, IntersectionGeometry, LaneIndex, LaneQueue, PerformanceTracker,
    SimulationState, Vehicle, VehicleType, LANE_COUNT,
};
use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::render::{FrameSink, LaneFrame, RenderFrame, VehicleFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Running,
    // Every lane is empty, no further transitions
    Terminal,
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub max_ticks: Option<u64>,
    // Hold the configured tick rate instead of running flat out
    pub realtime: bool,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub ticks: u64,
    pub crossed: u64,
    pub lane_switches: u64,
    pub terminal: bool,
    pub average_tick_time: Duration,
}

pub struct IntersectionSimulator {
    geometry: IntersectionGeometry,
    queue_gap: f32,
    tick_interval: Duration,
    state: SimulationState,
    phase: Phase,
    crossed: u64,
    lane_switches: u64,
}

impl IntersectionSimulator {
    // One entry per lane, front of the queue first
    pub fn new(config: &SimulationConfig, assignment: Vec<Vec<VehicleType>>) -> Result<Self, SimulationError> {
        if assignment.len() != LANE_COUNT {
            return Err(SimulationError::LaneCount {
                expected: LANE_COUNT,
                found: assignment.len(),
            });
        }

        let geometry = IntersectionGeometry::from_config(&config.intersection);
        let queue_gap = config.vehicles.queue_gap;

        let lanes: Vec<LaneQueue> = assignment
            .iter()
            .zip(&geometry.lanes)
            .map(|(types, lane)| {
                let vehicles = types
                    .iter()
                    .enumerate()
                    .map(|(position, &vehicle_type)| {
                        Vehicle::from_config(vehicle_type, lane.index, position, &config.vehicles)
                    })
                    .collect();
                let mut queue = LaneQueue::new(vehicles);
                queue.restack(&geometry, lane, queue_gap);
                queue
            })
            .collect();

        let mut state = SimulationState {
            lanes,
            active_lane: 0,
            tick: 0,
        };

        let phase = if state.is_empty() {
            warn!("{}; simulation starts finished", SimulationError::EmptyInput);
            Phase::Terminal
        } else {
            let selection = resolve_priority(&state.signals(), None);
            info!("Lane {} starts with right-of-way ({})", geometry.label(selection.lane), selection.reason);
            state.active_lane = selection.lane;
            Phase::Running
        };

        let tick_rate = config.intersection.timing.tick_rate;
        let tick_interval = Duration::try_from_secs_f32(1.0 / tick_rate).unwrap_or_else(|e| {
            warn!("Cannot pace at {} ticks/s ({}), real-time runs go flat out", tick_rate, e);
            Duration::ZERO
        });

        Ok(Self {
            tick_interval,
            geometry,
            queue_gap,
            state,
            phase,
            crossed: 0,
            lane_switches: 0,
        })
    }

    pub fn shuffled<R: Rng + ?Sized>(
        config: &SimulationConfig,
        mut assignment: Vec<Vec<VehicleType>>,
        rng: &mut R,
    ) -> Result<Self, SimulationError> {
        for lane in assignment.iter_mut() {
            lane.shuffle(rng);
        }
        Self::new(config, assignment)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active_lane(&self) -> LaneIndex {
        self.state.active_lane
    }

    pub fn crossed(&self) -> u64 {
        self.crossed
    }

    pub fn tick(&mut self) -> Phase {
        if self.phase == Phase::Terminal {
            return self.phase;
        }
        self.state.tick += 1;

        let active = self.state.active_lane;
        let lane = &self.geometry.lanes[active];
        let queue = &mut self.state.lanes[active];

        // Only the lead vehicle of the active lane moves
        let crossed = match queue.lead_mut() {
            Some(lead) => {
                lead.advance(lane);
                self.geometry.has_crossed(lane, lead.position, lead.length)
            }
            None => false,
        };

        if crossed {
            if let Some(vehicle) = queue.pop_lead(&self.geometry, lane, self.queue_gap) {
                self.crossed += 1;
                debug!(
                    "Tick {}: {} cleared lane {}, {} left",
                    self.state.tick,
                    vehicle.vehicle_type,
                    lane.label,
                    queue.len()
                );
            }
        }

        // An emergency lane keeps right-of-way until its last emergency
        // vehicle is through; otherwise priority is re-evaluated.
        if queue.is_empty() || !queue.has_emergency() {
            self.reselect();
        }

        if self.state.is_empty() {
            info!("All lanes clear after {} ticks", self.state.tick);
            self.phase = Phase::Terminal;
        }
        self.phase
    }

    fn reselect(&mut self) {
        let current = self.state.active_lane;
        let selection = resolve_priority(&self.state.signals(), Some(current));
        if selection.lane != current {
            self.lane_switches += 1;
            if !self.state.is_empty() {
                info!(
                    "Tick {}: right-of-way {} -> {} ({})",
                    self.state.tick,
                    self.geometry.label(current),
                    self.geometry.label(selection.lane),
                    selection.reason
                );
            }
        }
        self.state.active_lane = selection.lane;
    }

    pub fn frame(&self) -> RenderFrame {
        let lanes = self.geometry.lanes
            .iter()
            .zip(&self.state.lanes)
            .map(|(lane, queue)| LaneFrame {
                index: lane.index,
                label: lane.label.clone(),
                entry: [lane.entry.x, lane.entry.y],
                direction: [lane.direction.x, lane.direction.y],
                green: self.phase == Phase::Running && lane.index == self.state.active_lane,
                vehicles: queue
                    .vehicles()
                    .iter()
                    .map(|v| VehicleFrame {
                        vehicle_type: v.vehicle_type,
                        queue_position: v.queue_position,
                        x: v.position.x,
                        y: v.position.y,
                        length: v.length,
                        width: v.width,
                    })
                    .collect(),
            })
            .collect();

        let geometry = &self.geometry;
        RenderFrame {
            tick: self.state.tick,
            active_lane: self.state.active_lane,
            phase: self.phase,
            canvas: geometry.canvas,
            center: [geometry.center.x, geometry.center.y],
            intersection_size: geometry.size,
            road_width: geometry.road_width,
            stop_line_distance: geometry.stop_line_distance,
            lanes,
        }
    }

    // Presents a frame before the first tick and after each one
    pub fn run(&mut self, sink: &mut dyn FrameSink, options: &RunOptions) -> Result<RunSummary> {
        let mut tracker = PerformanceTracker::new(256);
        sink.present(&self.frame())?;

        while self.phase == Phase::Running {
            if options.max_ticks.is_some_and(|max| self.state.tick >= max) {
                warn!("Stopping at tick cap {} with {} vehicles queued", self.state.tick, self.state.total_vehicles());
                break;
            }

            tracker.start_frame();
            tracker.start_simulation();
            self.tick();
            tracker.end_simulation();

            sink.present(&self.frame())?;

            if options.realtime {
                let elapsed = tracker.frame_elapsed();
                if elapsed < self.tick_interval {
                    std::thread::sleep(self.tick_interval - elapsed);
                }
            }
            tracker.end_frame();

            if options.realtime && self.state.tick % 300 == 0 {
                debug!("{:.1} ticks/s, {:.3}ms per tick", tracker.fps(), tracker.average_simulation_time().as_secs_f64() * 1000.0);
            }
        }

        Ok(RunSummary {
            ticks: self.state.tick,
            crossed: self.crossed,
            lane_switches: self.lane_switches,
            terminal: self.phase == Phase::Terminal,
            average_tick_time: tracker.average_simulation_time(),
        })
    }
}
