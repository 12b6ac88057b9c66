use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

#[derive(Debug, Clone)]
pub struct StageTiming {
    pub name: String,
    pub duration: Duration,
}

/// Per-image stage durations, logged once both tracks have joined.
#[derive(Debug, Default, Clone)]
pub struct StageTimings {
    steps: Vec<StageTiming>,
    step_map: HashMap<String, Duration>,
}

impl StageTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, name: impl Into<String>, duration: Duration) {
        let name = name.into();
        self.steps.push(StageTiming {
            name: name.clone(),
            duration,
        });
        *self.step_map.entry(name).or_insert(Duration::ZERO) += duration;
    }

    pub fn record(&mut self, timer: Timer) {
        let (name, duration) = timer.stop();
        self.add_step(name, duration);
    }

    pub fn merge(&mut self, other: StageTimings) {
        for step in other.steps {
            self.add_step(step.name, step.duration);
        }
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    pub fn get_step(&self, name: &str) -> Option<Duration> {
        self.step_map.get(name).copied()
    }

    pub fn steps(&self) -> &[StageTiming] {
        &self.steps
    }

    pub fn log_summary(&self, image_id: &str) {
        for step in &self.steps {
            debug!(
                image_id,
                stage = %step.name,
                ms = step.duration.as_secs_f64() * 1000.0,
                "Stage timing"
            );
        }
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    pub fn stop(self) -> (String, Duration) {
        (self.name, self.start.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_steps_accumulate() {
        let mut timings = StageTimings::new();
        timings.add_step("decode", Duration::from_millis(3));
        timings.add_step("decode", Duration::from_millis(2));
        timings.add_step("render", Duration::from_millis(5));

        assert_eq!(timings.steps().len(), 3);
        assert_eq!(timings.get_step("decode"), Some(Duration::from_millis(5)));
        assert_eq!(timings.total_duration(), Duration::from_millis(10));
        assert_eq!(timings.get_step("score"), None);
    }

    #[test]
    fn test_merge_keeps_order() {
        let mut heat = StageTimings::new();
        heat.add_step("saliency", Duration::from_millis(1));
        let mut score = StageTimings::new();
        score.add_step("score", Duration::from_millis(4));

        heat.merge(score);
        let names: Vec<&str> = heat.steps().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["saliency", "score"]);
    }
}
