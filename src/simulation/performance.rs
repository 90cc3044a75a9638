use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default)]
pub struct TickTiming {
    pub frame_time: Duration,
    pub simulation_time: Duration,
}

// Rolling window of frame timings for the fixed-rate tick loop
#[derive(Debug)]
pub struct PerformanceTracker {
    samples: VecDeque<TickTiming>,
    max_samples: usize,
    current_frame_start: Option<Instant>,
    current_sim_start: Option<Instant>,
    pending_simulation_time: Duration,
}

impl PerformanceTracker {
    pub fn new(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            samples: VecDeque::with_capacity(max_samples),
            max_samples,
            current_frame_start: None,
            current_sim_start: None,
            pending_simulation_time: Duration::ZERO,
        }
    }

    pub fn start_frame(&mut self) {
        self.current_frame_start = Some(Instant::now());
        self.pending_simulation_time = Duration::ZERO;
    }

    pub fn start_simulation(&mut self) {
        self.current_sim_start = Some(Instant::now());
    }

    pub fn end_simulation(&mut self) {
        if let Some(start) = self.current_sim_start.take() {
            self.pending_simulation_time += start.elapsed();
        }
    }

    pub fn frame_elapsed(&self) -> Duration {
        self.current_frame_start.map_or(Duration::ZERO, |start| start.elapsed())
    }

    pub fn end_frame(&mut self) -> Duration {
        let Some(start) = self.current_frame_start.take() else {
            return Duration::ZERO;
        };

        let frame_time = start.elapsed();
        if self.samples.len() >= self.max_samples {
            self.samples.pop_front();
        }
        self.samples.push_back(TickTiming {
            frame_time,
            simulation_time: self.pending_simulation_time,
        });
        frame_time
    }

    pub fn average_frame_time(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }

        let total: Duration = self.samples.iter().map(|s| s.frame_time).sum();
        total / self.samples.len() as u32
    }

    pub fn average_simulation_time(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }

        let total: Duration = self.samples.iter().map(|s| s.simulation_time).sum();
        total / self.samples.len() as u32
    }

    pub fn fps(&self) -> f32 {
        let avg_frame_time = self.average_frame_time();
        if avg_frame_time.is_zero() {
            return 0.0;
        }
        1.0 / avg_frame_time.as_secs_f32()
    }
}
