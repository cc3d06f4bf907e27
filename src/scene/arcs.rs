use serde::{Deserialize, Serialize};

use crate::flow::FlowSnapshot;

/// Stroke circumference of the home node's progress ring (radius 38 in the
/// 80x80 node viewbox).
pub const CIRCLE_CIRCUMFERENCE: f64 = 238.76104;

/// Dash lengths for the home ring segments showing where the home's inflow
/// comes from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomeArcs {
    /// Ring length for the solar share of home inflow.
    pub solar_dash: f64,
    /// Ring length for the battery share of home inflow.
    pub battery_dash: f64,
}

impl HomeArcs {
    /// Remainder of the ring not covered by either source.
    pub fn grid_dash(&self) -> f64 {
        (CIRCLE_CIRCUMFERENCE - self.solar_dash - self.battery_dash).max(0.0)
    }
}

/// Share of the home node's inflow supplied by solar and battery, as dash
/// lengths on the home ring.
///
/// Returns `None` when the home draws nothing this tick (no ring to
/// partition). The layout engine does not attach these arcs to the scene
/// yet; this is the extension point for that feature.
pub fn home_source_arcs(snapshot: &FlowSnapshot) -> Option<HomeArcs> {
    let total = snapshot.total_home_consumption_kw();
    if total <= 0.0 {
        return None;
    }
    let share = |kw: f64| (kw.max(0.0) / total) * CIRCLE_CIRCUMFERENCE;
    Some(HomeArcs {
        solar_dash: share(snapshot.solar_to_home_kw),
        battery_dash: share(snapshot.battery_to_home_kw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(grid: f64, solar: f64, battery: f64) -> FlowSnapshot {
        FlowSnapshot {
            battery_to_home_kw: battery,
            grid_to_home_kw: grid,
            solar_to_battery_kw: 0.0,
            solar_to_grid_kw: 0.0,
            solar_to_home_kw: solar,
            battery_charge_percent: 0.0,
            has_battery: battery > 0.0,
            has_solar_production: solar > 0.0,
            has_return_to_grid: true,
        }
    }

    #[test]
    fn no_inflow_means_no_ring() {
        assert_eq!(home_source_arcs(&snapshot(0.0, 0.0, 0.0)), None);
    }

    #[test]
    fn shares_partition_the_ring() {
        let arcs = home_source_arcs(&snapshot(1.0, 2.0, 1.0)).unwrap();
        assert!((arcs.solar_dash - CIRCLE_CIRCUMFERENCE * 0.5).abs() < 1e-6);
        assert!((arcs.battery_dash - CIRCLE_CIRCUMFERENCE * 0.25).abs() < 1e-6);
        assert!((arcs.grid_dash() - CIRCLE_CIRCUMFERENCE * 0.25).abs() < 1e-6);
    }

    #[test]
    fn shares_never_exceed_the_circumference() {
        let arcs = home_source_arcs(&snapshot(0.0, 3.0, 1.0)).unwrap();
        assert!(arcs.solar_dash + arcs.battery_dash <= CIRCLE_CIRCUMFERENCE + 1e-9);
        assert_eq!(arcs.grid_dash(), 0.0);
    }

    #[test]
    fn negative_import_does_not_inflate_shares() {
        let arcs = home_source_arcs(&snapshot(-1.0, 2.0, 0.0)).unwrap();
        assert!((arcs.solar_dash - CIRCLE_CIRCUMFERENCE).abs() < 1e-6);
    }
}
