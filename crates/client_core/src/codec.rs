//! Folds browser sensor callbacks into the sample a phone sends upstream.
//!
//! Orientation and motion arrive as separate events. Each event replaces the
//! sub-records it owns as a whole and leaves the others untouched. Anything
//! that is not a number where a number is expected reads as an unknown axis,
//! and a sub-record that is not an object reads as absent.

use serde_json::Value;
use shared::domain::{Acceleration, MotionSample, OrientationReading, RotationRate};

#[derive(Debug, Clone, Default)]
pub struct SampleCodec {
    current: Option<MotionSample>,
}

impl SampleCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a `deviceorientation` payload (`alpha`, `beta`, `gamma`, `absolute`).
    pub fn merge_orientation(&mut self, event: &Value) {
        let orientation = event.as_object().map(|_| OrientationReading {
            alpha: axis(event, "alpha"),
            beta: axis(event, "beta"),
            gamma: axis(event, "gamma"),
            absolute: event.get("absolute").and_then(Value::as_bool),
        });
        self.current.get_or_insert_with(MotionSample::default).orientation = orientation;
    }

    /// Applies a `devicemotion` payload. Rotation rate, both accelerations and
    /// the interval are replaced together.
    pub fn merge_motion(&mut self, event: &Value) {
        let sample = self.current.get_or_insert_with(MotionSample::default);
        sample.rotation_rate = sub_record(event, "rotationRate").map(|rate| RotationRate {
            alpha: axis(rate, "alpha"),
            beta: axis(rate, "beta"),
            gamma: axis(rate, "gamma"),
        });
        sample.acceleration = sub_record(event, "acceleration").map(acceleration);
        sample.acceleration_including_gravity =
            sub_record(event, "accelerationIncludingGravity").map(acceleration);
        sample.interval = axis(event, "interval");
    }

    /// The merged sample, or `None` until the first event has been seen.
    pub fn snapshot(&self) -> Option<MotionSample> {
        self.current
    }
}

fn axis(record: &Value, key: &str) -> Option<f64> {
    record.get(key).and_then(Value::as_f64)
}

fn sub_record<'a>(event: &'a Value, key: &str) -> Option<&'a Value> {
    event.get(key).filter(|value| value.is_object())
}

fn acceleration(record: &Value) -> Acceleration {
    Acceleration {
        x: axis(record, "x"),
        y: axis(record, "y"),
        z: axis(record, "z"),
    }
}

#[cfg(test)]
#[path = "tests/codec_tests.rs"]
mod tests;
