use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::SensorId;

/// One sensor sample: a present numeric value or an explicit absence.
///
/// "No sensor / sensor unavailable" and "sensor reads 0" are different
/// states: both contribute 0 kW to the arithmetic, but only the former may
/// hide a node. The distinction is kept in the type so callers never have to
/// encode absence as a magic zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Reading {
    /// The sensor reported a finite numeric value.
    Available(f64),
    /// No sensor, sensor offline, or a non-numeric state.
    Unavailable,
}

impl Reading {
    /// Normalize a raw optional value; non-finite numbers count as absent.
    pub fn from_raw(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Reading::Available(v),
            _ => Reading::Unavailable,
        }
    }

    /// Magnitude for arithmetic: absent readings degrade to 0.
    pub fn kw_or_zero(self) -> f64 {
        match self {
            Reading::Available(v) => v,
            Reading::Unavailable => 0.0,
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, Reading::Available(_))
    }
}

/// Capability to look up the current value of a sensor.
///
/// The host's live-state subscription sits behind this seam; the engine
/// never talks to the registry directly.
pub trait ReadingProvider {
    fn reading(&self, sensor: &SensorId) -> Reading;
}

/// Map-backed provider for tests and demos.
#[derive(Debug, Default, Clone)]
pub struct StaticReadings {
    values: HashMap<SensorId, f64>,
}

impl StaticReadings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a sensor's current value, builder style.
    pub fn with(mut self, sensor: impl Into<SensorId>, kw: f64) -> Self {
        self.values.insert(sensor.into(), kw);
        self
    }

    pub fn set(&mut self, sensor: impl Into<SensorId>, kw: f64) {
        self.values.insert(sensor.into(), kw);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl ReadingProvider for StaticReadings {
    fn reading(&self, sensor: &SensorId) -> Reading {
        Reading::from_raw(self.values.get(sensor).copied())
    }
}
