use anyhow::Result;
use log::info;
use serde::Serialize;
use std::io::Write;

use crate::simulation::{LaneIndex, Phase, VehicleType};

#[derive(Debug, Clone, Serialize)]
pub struct VehicleFrame {
    pub vehicle_type: VehicleType,
    pub queue_position: usize,
    pub x: f32,
    pub y: f32,
    pub length: f32,
    pub width: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LaneFrame {
    pub index: LaneIndex,
    pub label: String,
    // Stop-line midpoint
    pub entry: [f32; 2],
    pub direction: [f32; 2],
    pub green: bool,
    pub vehicles: Vec<VehicleFrame>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderFrame {
    pub tick: u64,
    pub active_lane: LaneIndex,
    pub phase: Phase,
    // [width, height]
    pub canvas: [f32; 2],
    pub center: [f32; 2],
    pub intersection_size: f32,
    pub road_width: f32,
    // Measured from the centre along each lane
    pub stop_line_distance: f32,
    pub lanes: Vec<LaneFrame>,
}

impl RenderFrame {
    pub fn vehicle_count(&self) -> usize {
        self.lanes.iter().map(|lane| lane.vehicles.len()).sum()
    }

    // e.g. "A[G] 3 (1 emergency) | B[R] 0"
    pub fn board(&self) -> String {
        self.lanes
            .iter()
            .map(|lane| {
                let light = if lane.green { 'G' } else { 'R' };
                let emergency = lane.vehicles
                    .iter()
                    .filter(|v| v.vehicle_type.is_emergency())
                    .count();
                if emergency > 0 {
                    format!("{}[{}] {} ({} emergency)", lane.label, light, lane.vehicles.len(), emergency)
                } else {
                    format!("{}[{}] {}", lane.label, light, lane.vehicles.len())
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

pub trait FrameSink {
    fn present(&mut self, frame: &RenderFrame) -> Result<()>;
}

impl FrameSink for Vec<RenderFrame> {
    fn present(&mut self, frame: &RenderFrame) -> Result<()> {
        self.push(frame.clone());
        Ok(())
    }
}

impl FrameSink for Vec<Box<dyn FrameSink>> {
    fn present(&mut self, frame: &RenderFrame) -> Result<()> {
        for sink in self.iter_mut() {
            sink.present(frame)?;
        }
        Ok(())
    }
}

// Logs the signal board every `every` ticks and on each lane switch
pub struct ConsoleRenderer {
    every: u64,
    last_active: Option<LaneIndex>,
}

impl ConsoleRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            last_active: None,
        }
    }
}

impl FrameSink for ConsoleRenderer {
    fn present(&mut self, frame: &RenderFrame) -> Result<()> {
        let switched = self.last_active != Some(frame.active_lane);
        self.last_active = Some(frame.active_lane);

        if frame.phase == Phase::Terminal {
            info!("Tick {}: all lanes clear", frame.tick);
        } else if switched || frame.tick % self.every == 0 {
            info!("Tick {}: {}", frame.tick, frame.board());
        }
        Ok(())
    }
}

pub struct JsonLinesWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> FrameSink for JsonLinesWriter<W> {
    fn present(&mut self, frame: &RenderFrame) -> Result<()> {
        serde_json::to_writer(&mut self.writer, frame)?;
        self.writer.write_all(b"\n")?;
        if frame.phase == Phase::Terminal {
            self.writer.flush()?;
        }
        Ok(())
    }
}
