use tracing::debug;

use crate::config::CardConfig;
use crate::flow::reading::{Reading, ReadingProvider};
use crate::flow::snapshot::{FlowEdge, FlowSnapshot};
use crate::locale::NumberFormat;

/// Resolve one tick's readings into a normalized [`FlowSnapshot`].
///
/// Total function: it never fails. Unconfigured edges, unavailable sensors
/// and non-numeric values all degrade to 0 kW, because a dashboard card must
/// degrade visually rather than interrupt the host.
///
/// Steps:
/// 1. Fetch the reading for each configured edge through the provider seam.
/// 2. Round every magnitude to one fractional digit via the host's
///    formatting capability.
/// 3. Derive the presence flags from which sensors are configured.
pub fn resolve(
    config: &CardConfig,
    provider: &dyn ReadingProvider,
    format: &dyn NumberFormat,
) -> FlowSnapshot {
    let edge = |e: FlowEdge| -> f64 {
        let reading = match config.sensor(e) {
            Some(sensor) => provider.reading(sensor),
            None => Reading::Unavailable,
        };
        format.round(reading.kw_or_zero(), 1)
    };

    let snapshot = FlowSnapshot {
        battery_to_home_kw: edge(FlowEdge::BatteryToHome),
        grid_to_home_kw: edge(FlowEdge::GridToHome),
        solar_to_battery_kw: edge(FlowEdge::SolarToBattery),
        solar_to_grid_kw: edge(FlowEdge::SolarToGrid),
        solar_to_home_kw: edge(FlowEdge::SolarToHome),
        battery_charge_percent: edge(FlowEdge::BatteryCharge),
        has_battery: config.has_battery(),
        has_solar_production: config.has_solar_production(),
        has_return_to_grid: config.has_return_to_grid(),
    };

    debug!(
        total_consumption_kw = snapshot.total_consumption_kw(),
        total_home_kw = snapshot.total_home_consumption_kw(),
        total_solar_kw = snapshot.total_solar_production_kw(),
        "resolved flow snapshot"
    );

    snapshot
}
