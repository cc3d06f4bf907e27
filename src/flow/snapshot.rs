use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// The six directed flow quantities the card can be configured with.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum FlowEdge {
    BatteryToHome,
    GridToHome,
    SolarToBattery,
    SolarToGrid,
    SolarToHome,
    BatteryCharge,
}

/// Normalized view of all energy flows for a single update tick.
///
/// Magnitudes are rounded to one fractional digit; unconfigured or
/// unavailable edges resolve to 0. The snapshot is recomputed from scratch
/// every tick and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSnapshot {
    /// Battery discharge into the home (kW).
    pub battery_to_home_kw: f64,

    /// Grid import into the home (kW). May round to a negative value if the
    /// sensor misreports; aggregates clamp where sign matters.
    pub grid_to_home_kw: f64,

    /// Solar production charging the battery (kW).
    pub solar_to_battery_kw: f64,

    /// Solar production exported to the grid (kW).
    pub solar_to_grid_kw: f64,

    /// Solar production consumed by the home (kW).
    pub solar_to_home_kw: f64,

    /// Battery state of charge (%), rounded to one fractional digit. The
    /// whole-percent display label is derived separately at layout time.
    pub battery_charge_percent: f64,

    /// A battery subsystem is configured.
    pub has_battery: bool,

    /// A solar subsystem is configured.
    pub has_solar_production: bool,

    /// The consumption path back to the grid is displayed. Always true.
    pub has_return_to_grid: bool,
}

impl FlowSnapshot {
    /// Magnitude of a single edge.
    pub fn edge_kw(&self, edge: FlowEdge) -> f64 {
        match edge {
            FlowEdge::BatteryToHome => self.battery_to_home_kw,
            FlowEdge::GridToHome => self.grid_to_home_kw,
            FlowEdge::SolarToBattery => self.solar_to_battery_kw,
            FlowEdge::SolarToGrid => self.solar_to_grid_kw,
            FlowEdge::SolarToHome => self.solar_to_home_kw,
            FlowEdge::BatteryCharge => self.battery_charge_percent,
        }
    }

    /// Total solar production across all three solar edges. 0 when no solar
    /// subsystem is configured.
    pub fn total_solar_production_kw(&self) -> f64 {
        if !self.has_solar_production {
            return 0.0;
        }
        self.solar_to_battery_kw + self.solar_to_grid_kw + self.solar_to_home_kw
    }

    /// Denominator for relative animation speed.
    ///
    /// Deliberately includes the solar-to-grid export edge, not only
    /// home-bound energy: every moving particle shares one speed scale.
    pub fn total_consumption_kw(&self) -> f64 {
        self.battery_to_home_kw + self.grid_to_home_kw + self.solar_to_home_kw + self.solar_to_grid_kw
    }

    /// Total power the home is drawing. Grid import is clamped at 0 so a
    /// negative (exporting) reading is not subtracted from the home total.
    pub fn total_home_consumption_kw(&self) -> f64 {
        self.grid_to_home_kw.max(0.0) + self.solar_to_home_kw + self.battery_to_home_kw
    }
}

impl fmt::Display for FlowSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FlowSnapshot {{ solar: {:.1}kW, grid->home: {:.1}kW, battery->home: {:.1}kW, home: {:.1}kW, soc: {:.1}% }}",
            self.total_solar_production_kw(),
            self.grid_to_home_kw,
            self.battery_to_home_kw,
            self.total_home_consumption_kw(),
            self.battery_charge_percent,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> FlowSnapshot {
        FlowSnapshot {
            battery_to_home_kw: 0.5,
            grid_to_home_kw: 1.2,
            solar_to_battery_kw: 1.0,
            solar_to_grid_kw: 0.7,
            solar_to_home_kw: 2.0,
            battery_charge_percent: 50.0,
            has_battery: true,
            has_solar_production: true,
            has_return_to_grid: true,
        }
    }

    #[test]
    fn total_consumption_includes_export_edge() {
        let s = snapshot();
        assert!((s.total_consumption_kw() - (0.5 + 1.2 + 2.0 + 0.7)).abs() < 1e-9);
    }

    #[test]
    fn total_home_consumption_clamps_negative_import() {
        let mut s = snapshot();
        s.grid_to_home_kw = -0.8;
        assert!((s.total_home_consumption_kw() - (0.0 + 2.0 + 0.5)).abs() < 1e-9);
    }

    #[test]
    fn solar_total_is_zero_without_solar() {
        let mut s = snapshot();
        s.has_solar_production = false;
        assert_eq!(s.total_solar_production_kw(), 0.0);
    }

    #[test]
    fn edge_lookup_matches_fields() {
        let s = snapshot();
        assert_eq!(s.edge_kw(FlowEdge::GridToHome), 1.2);
        assert_eq!(s.edge_kw(FlowEdge::BatteryCharge), 50.0);
    }

    #[test]
    fn edges_display_snake_case() {
        assert_eq!(FlowEdge::SolarToGrid.to_string(), "solar_to_grid");
        assert_eq!(FlowEdge::BatteryCharge.to_string(), "battery_charge");
    }
}
