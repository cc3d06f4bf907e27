use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Which optional subsystems exist this tick.
///
/// Connector anchors and curvature differ per combination so the lines
/// converge on whichever nodes are actually drawn. Exactly one variant is
/// valid per `(battery, solar)` pair; there is no interpolation between
/// shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum PresenceVariant {
    /// Neither battery nor solar: only the horizontal grid line.
    GridOnly,
    /// Solar row on top, no battery row.
    SolarOnly,
    /// Battery row at the bottom, no solar row.
    BatteryOnly,
    /// Both optional rows present.
    SolarAndBattery,
}

impl PresenceVariant {
    pub fn from_flags(has_battery: bool, has_solar: bool) -> Self {
        match (has_battery, has_solar) {
            (false, false) => PresenceVariant::GridOnly,
            (false, true) => PresenceVariant::SolarOnly,
            (true, false) => PresenceVariant::BatteryOnly,
            (true, true) => PresenceVariant::SolarAndBattery,
        }
    }

    pub fn has_battery(self) -> bool {
        matches!(
            self,
            PresenceVariant::BatteryOnly | PresenceVariant::SolarAndBattery
        )
    }

    pub fn has_solar(self) -> bool {
        matches!(
            self,
            PresenceVariant::SolarOnly | PresenceVariant::SolarAndBattery
        )
    }
}

/// Connector identifiers, one per drawable flow line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ConnectorId {
    /// Horizontal grid-to-home line. Always present.
    Grid,
    /// Solar export curving down to the grid node.
    GridReturn,
    /// Solar production curving down to the home node.
    Solar,
    /// Battery discharge curving up to the home node.
    BatteryHome,
    /// Battery-side line curving up to the grid node. Part of the fixed
    /// battery geometry; carries no flow in this card.
    BatteryGrid,
    /// Vertical solar-to-battery charge line.
    BatterySolar,
}

/// SVG path commands for a connector in a 100x100 viewbox, or `None` when
/// the connector does not exist under the given variant.
///
/// The paths are drawn in flow direction (source first), so particles
/// traverse them forward.
pub fn connector_path(variant: PresenceVariant, id: ConnectorId) -> Option<&'static str> {
    let battery = variant.has_battery();
    let solar = variant.has_solar();
    match id {
        ConnectorId::Grid => Some(match variant {
            PresenceVariant::GridOnly => "M0,53 H100",
            PresenceVariant::SolarOnly => "M0,56 H100",
            PresenceVariant::BatteryOnly | PresenceVariant::SolarAndBattery => "M0,50 H100",
        }),
        ConnectorId::GridReturn => {
            if !solar {
                return None;
            }
            Some(if battery {
                "M45,0 v15 c0,35 -10,30 -30,30 h-20"
            } else {
                "M47,0 v15 c0,40 -10,35 -30,35 h-20"
            })
        }
        ConnectorId::Solar => {
            if !solar {
                return None;
            }
            Some(if battery {
                "M55,0 v15 c0,35 10,30 30,30 h25"
            } else {
                "M53,0 v15 c0,40 10,35 30,35 h25"
            })
        }
        ConnectorId::BatteryHome => {
            battery.then_some("M55,100 v-15 c0,-35 10,-30 30,-30 h20")
        }
        ConnectorId::BatteryGrid => {
            battery.then_some("M45,100 v-15 c0,-35 -10,-30 -30,-30 h-20")
        }
        ConnectorId::BatterySolar => (battery && solar).then_some("M50,0 V100"),
    }
}
