use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::flow::FlowEdge;

/// Configuration errors
///
/// Parsing the host-supplied card document is the only fallible operation in
/// this crate; everything downstream degrades instead of erroring.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid card configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Identifier of a sensor entity in the host's registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorId(pub String);

impl SensorId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SensorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SensorId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Card configuration, supplied once by the host and externally validated.
///
/// Every edge sensor is optional; an unset edge renders as "no flow", which
/// is distinct from a configured sensor currently reading 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    /// Card header text.
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub battery_to_home_entity: Option<SensorId>,

    #[serde(default)]
    pub grid_to_home_entity: Option<SensorId>,

    #[serde(default)]
    pub solar_to_battery_entity: Option<SensorId>,

    #[serde(default)]
    pub solar_to_grid_entity: Option<SensorId>,

    #[serde(default)]
    pub solar_to_home_entity: Option<SensorId>,

    #[serde(default)]
    pub battery_charge_entity: Option<SensorId>,

    /// Reserved for the simpler flow-rate variant of this card; unused here.
    #[serde(default)]
    pub min_flow_rate: Option<f64>,

    /// Reserved for the simpler flow-rate variant of this card; unused here.
    #[serde(default)]
    pub max_flow_rate: Option<f64>,
}

impl CardConfig {
    /// Parse a card configuration from the host's YAML document.
    pub fn from_yaml(document: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(document)?)
    }

    /// Sensor configured for a given flow edge, if any.
    pub fn sensor(&self, edge: FlowEdge) -> Option<&SensorId> {
        match edge {
            FlowEdge::BatteryToHome => self.battery_to_home_entity.as_ref(),
            FlowEdge::GridToHome => self.grid_to_home_entity.as_ref(),
            FlowEdge::SolarToBattery => self.solar_to_battery_entity.as_ref(),
            FlowEdge::SolarToGrid => self.solar_to_grid_entity.as_ref(),
            FlowEdge::SolarToHome => self.solar_to_home_entity.as_ref(),
            FlowEdge::BatteryCharge => self.battery_charge_entity.as_ref(),
        }
    }

    /// A battery node exists when any battery-side sensor is configured.
    pub fn has_battery(&self) -> bool {
        self.battery_charge_entity.is_some()
            || self.battery_to_home_entity.is_some()
            || self.solar_to_battery_entity.is_some()
    }

    /// A solar node exists when any solar-side sensor is configured.
    pub fn has_solar_production(&self) -> bool {
        self.solar_to_home_entity.is_some()
            || self.solar_to_grid_entity.is_some()
            || self.solar_to_battery_entity.is_some()
    }

    /// The consumption path back to the grid is always displayed.
    pub fn has_return_to_grid(&self) -> bool {
        true
    }
}
