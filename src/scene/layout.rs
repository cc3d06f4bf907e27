use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::trace;

use crate::flow::FlowSnapshot;
use crate::locale::{LabelKey, Localizer, NumberFormat};
use crate::scene::arcs::HomeArcs;
use crate::scene::geometry::{connector_path, ConnectorId, PresenceVariant};

/// Scale for relative animation speed: a connector carrying the entire
/// consumption total animates in ~0s, a near-zero share in ~5s.
pub const SPEED_FACTOR_SECONDS: f64 = 5.0;

// Battery icon tier thresholds (% state of charge). Upper bound exclusive,
// lower bound inclusive per bracket.
const BATTERY_FULL_ABOVE_PERCENT: f64 = 72.0;
const BATTERY_MEDIUM_ABOVE_PERCENT: f64 = 44.0;
const BATTERY_LOW_ABOVE_PERCENT: f64 = 16.0;

/// Visual endpoints of the card.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum NodeId {
    Solar,
    Grid,
    Home,
    Battery,
}

/// Battery icon tier, a pure step function of the state of charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum BatteryIconTier {
    Full,
    Medium,
    Low,
    Empty,
}

impl BatteryIconTier {
    pub fn from_charge_percent(charge: f64) -> Self {
        if charge > BATTERY_FULL_ABOVE_PERCENT {
            BatteryIconTier::Full
        } else if charge > BATTERY_MEDIUM_ABOVE_PERCENT {
            BatteryIconTier::Medium
        } else if charge > BATTERY_LOW_ABOVE_PERCENT {
            BatteryIconTier::Low
        } else {
            BatteryIconTier::Empty
        }
    }
}

/// Icon drawn at the center of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeIcon {
    SolarPower,
    TransmissionTower,
    Home,
    Battery(BatteryIconTier),
}

/// Arrow glyph next to a badge value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ArrowDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Small arrow+value annotation inside a node circle (grid import/export,
/// battery charge/discharge).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeBadge {
    pub arrow: ArrowDirection,
    pub value_label: String,
}

/// One node to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: NodeId,
    /// Localized node label.
    pub label: String,
    pub icon: NodeIcon,
    /// Centered value text, e.g. "2.3 kW" or "50%". Hidden nodes and a
    /// zero-production solar node carry no value.
    pub value_label: Option<String>,
    pub badges: Vec<NodeBadge>,
    pub visible: bool,
    /// Source-share ring segments (home node only). Not populated yet.
    pub arcs: Option<HomeArcs>,
}

/// Particle travel direction along the path geometry. Paths are authored
/// source-first, so flow is forward everywhere in this card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowDirection {
    Forward,
    Reverse,
}

/// One connector line to draw, with its animation encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorSpec {
    pub id: ConnectorId,
    pub from_node: NodeId,
    pub to_node: NodeId,
    pub geometry_variant: PresenceVariant,
    /// SVG path commands in a 100x100 viewbox.
    pub path: String,
    /// Rounded flow magnitude this connector carries (kW).
    pub magnitude_kw: f64,
    pub animated: bool,
    /// Seconds per traversal of the path; 0 when not animated.
    pub animation_duration_seconds: f64,
    pub direction: FlowDirection,
}

/// The fully resolved drawing instructions for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Card header text, when configured.
    pub title: Option<String>,
    pub variant: PresenceVariant,
    pub nodes: Vec<NodeSpec>,
    pub connectors: Vec<ConnectorSpec>,
}

/// Map a [`FlowSnapshot`] to the scene to draw.
///
/// Never fails, even on inconsistent aggregates: a dashboard card must
/// render something odd rather than crash the host page.
pub fn layout(
    snapshot: &FlowSnapshot,
    format: &dyn NumberFormat,
    locale: &dyn Localizer,
) -> SceneDescription {
    let variant =
        PresenceVariant::from_flags(snapshot.has_battery, snapshot.has_solar_production);

    let nodes = vec![
        solar_node(snapshot, format, locale),
        grid_node(snapshot, format, locale),
        home_node(snapshot, format, locale),
        battery_node(snapshot, format, locale),
    ];

    let total_kw = snapshot.total_consumption_kw();
    let connectors = [
        (ConnectorId::GridReturn, NodeId::Solar, NodeId::Grid, snapshot.solar_to_grid_kw),
        (ConnectorId::Solar, NodeId::Solar, NodeId::Home, snapshot.solar_to_home_kw),
        (ConnectorId::BatteryHome, NodeId::Battery, NodeId::Home, snapshot.battery_to_home_kw),
        (ConnectorId::BatteryGrid, NodeId::Battery, NodeId::Grid, 0.0),
        (ConnectorId::BatterySolar, NodeId::Solar, NodeId::Battery, snapshot.solar_to_battery_kw),
        (ConnectorId::Grid, NodeId::Grid, NodeId::Home, snapshot.grid_to_home_kw),
    ]
    .into_iter()
    .filter_map(|(id, from_node, to_node, magnitude_kw)| {
        let path = connector_path(variant, id)?;
        let (animated, animation_duration_seconds) = animation(magnitude_kw, total_kw);
        Some(ConnectorSpec {
            id,
            from_node,
            to_node,
            geometry_variant: variant,
            path: path.to_string(),
            magnitude_kw,
            animated,
            animation_duration_seconds,
            direction: FlowDirection::Forward,
        })
    })
    .collect();

    trace!(%variant, total_kw, "laid out scene");

    SceneDescription {
        title: None,
        variant,
        nodes,
        connectors,
    }
}

/// Whether a connector animates and at what period.
///
/// A connector animates iff it carries flow and the consumption total is a
/// usable divisor; a zero (or nonsensical) total means "no flow this tick"
/// rather than a division by zero. Duration is clamped at 0 so inconsistent
/// aggregates cannot produce a negative or non-finite period.
fn animation(magnitude_kw: f64, total_kw: f64) -> (bool, f64) {
    if !(magnitude_kw > 0.0) || !(total_kw > 0.0) {
        return (false, 0.0);
    }
    let duration = ((1.0 - magnitude_kw / total_kw) * SPEED_FACTOR_SECONDS).max(0.0);
    (true, duration)
}

fn kw_label(format: &dyn NumberFormat, kw: f64) -> String {
    format!("{} kW", format.format(kw, 1))
}

fn solar_node(
    snapshot: &FlowSnapshot,
    format: &dyn NumberFormat,
    locale: &dyn Localizer,
) -> NodeSpec {
    let total = snapshot.total_solar_production_kw();
    // A configured but currently idle solar system keeps its node, only the
    // value is hidden.
    let value_label =
        (snapshot.has_solar_production && total > 0.0).then(|| kw_label(format, total));
    NodeSpec {
        id: NodeId::Solar,
        label: locale.localize(LabelKey::Solar),
        icon: NodeIcon::SolarPower,
        value_label,
        badges: Vec::new(),
        visible: snapshot.has_solar_production,
        arcs: None,
    }
}

fn grid_node(
    snapshot: &FlowSnapshot,
    format: &dyn NumberFormat,
    locale: &dyn Localizer,
) -> NodeSpec {
    let mut badges = Vec::new();
    if snapshot.solar_to_grid_kw > 0.0 {
        badges.push(NodeBadge {
            arrow: ArrowDirection::Left,
            value_label: kw_label(format, snapshot.solar_to_grid_kw),
        });
    }
    if snapshot.grid_to_home_kw > 0.0 {
        badges.push(NodeBadge {
            arrow: ArrowDirection::Right,
            value_label: kw_label(format, snapshot.grid_to_home_kw),
        });
    }
    NodeSpec {
        id: NodeId::Grid,
        label: locale.localize(LabelKey::Grid),
        icon: NodeIcon::TransmissionTower,
        value_label: None,
        badges,
        visible: true,
        arcs: None,
    }
}

fn home_node(
    snapshot: &FlowSnapshot,
    format: &dyn NumberFormat,
    locale: &dyn Localizer,
) -> NodeSpec {
    NodeSpec {
        id: NodeId::Home,
        label: locale.localize(LabelKey::Home),
        icon: NodeIcon::Home,
        value_label: Some(kw_label(format, snapshot.total_home_consumption_kw())),
        badges: Vec::new(),
        visible: true,
        // TODO: populate from arcs::home_source_arcs once the renderer
        // supports layered ring segments on the home node.
        arcs: None,
    }
}

fn battery_node(
    snapshot: &FlowSnapshot,
    format: &dyn NumberFormat,
    locale: &dyn Localizer,
) -> NodeSpec {
    let tier = BatteryIconTier::from_charge_percent(snapshot.battery_charge_percent);
    let mut badges = Vec::new();
    if snapshot.solar_to_battery_kw > 0.0 {
        badges.push(NodeBadge {
            arrow: ArrowDirection::Down,
            value_label: kw_label(format, snapshot.solar_to_battery_kw),
        });
    }
    if snapshot.battery_to_home_kw > 0.0 {
        badges.push(NodeBadge {
            arrow: ArrowDirection::Up,
            value_label: kw_label(format, snapshot.battery_to_home_kw),
        });
    }
    let value_label = snapshot
        .has_battery
        .then(|| format!("{}%", format.format(snapshot.battery_charge_percent, 0)));
    NodeSpec {
        id: NodeId::Battery,
        label: locale.localize(LabelKey::Battery),
        icon: NodeIcon::Battery(tier),
        value_label,
        badges,
        visible: snapshot.has_battery,
        arcs: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{EnglishLocale, PlainFormat};
    use rstest::rstest;

    fn snapshot() -> FlowSnapshot {
        FlowSnapshot {
            battery_to_home_kw: 0.0,
            grid_to_home_kw: 0.0,
            solar_to_battery_kw: 0.0,
            solar_to_grid_kw: 0.0,
            solar_to_home_kw: 0.0,
            battery_charge_percent: 0.0,
            has_battery: true,
            has_solar_production: true,
            has_return_to_grid: true,
        }
    }

    fn scene(snapshot: &FlowSnapshot) -> SceneDescription {
        layout(snapshot, &PlainFormat, &EnglishLocale)
    }

    fn node(scene: &SceneDescription, id: NodeId) -> NodeSpec {
        scene.nodes.iter().find(|n| n.id == id).unwrap().clone()
    }

    fn connector(scene: &SceneDescription, id: ConnectorId) -> ConnectorSpec {
        scene.connectors.iter().find(|c| c.id == id).unwrap().clone()
    }

    #[rstest]
    #[case(72.1, BatteryIconTier::Full)]
    #[case(72.0, BatteryIconTier::Medium)]
    #[case(44.1, BatteryIconTier::Medium)]
    #[case(44.0, BatteryIconTier::Low)]
    #[case(16.1, BatteryIconTier::Low)]
    #[case(16.0, BatteryIconTier::Empty)]
    #[case(0.0, BatteryIconTier::Empty)]
    fn battery_tier_boundaries(#[case] charge: f64, #[case] expected: BatteryIconTier) {
        assert_eq!(BatteryIconTier::from_charge_percent(charge), expected);
    }

    #[test]
    fn idle_solar_keeps_node_but_hides_value() {
        let s = snapshot();
        let solar = node(&scene(&s), NodeId::Solar);
        assert!(solar.visible);
        assert_eq!(solar.value_label, None);
    }

    #[test]
    fn producing_solar_shows_total() {
        let mut s = snapshot();
        s.solar_to_home_kw = 3.0;
        s.solar_to_grid_kw = 1.0;
        let solar = node(&scene(&s), NodeId::Solar);
        assert_eq!(solar.value_label.as_deref(), Some("4 kW"));
    }

    #[test]
    fn grid_badges_can_show_both_directions() {
        let mut s = snapshot();
        s.grid_to_home_kw = 1.2;
        s.solar_to_grid_kw = 0.4;
        let grid = node(&scene(&s), NodeId::Grid);
        assert_eq!(grid.badges.len(), 2);
        assert_eq!(grid.badges[0].arrow, ArrowDirection::Left);
        assert_eq!(grid.badges[0].value_label, "0.4 kW");
        assert_eq!(grid.badges[1].arrow, ArrowDirection::Right);
        assert_eq!(grid.badges[1].value_label, "1.2 kW");
    }

    #[test]
    fn home_shows_total_home_consumption() {
        let mut s = snapshot();
        s.grid_to_home_kw = 1.0;
        s.solar_to_home_kw = 0.5;
        let home = node(&scene(&s), NodeId::Home);
        assert!(home.visible);
        assert_eq!(home.value_label.as_deref(), Some("1.5 kW"));
    }

    #[test]
    fn battery_percent_label_uses_whole_digits() {
        let mut s = snapshot();
        s.battery_charge_percent = 49.6;
        let battery = node(&scene(&s), NodeId::Battery);
        assert_eq!(battery.value_label.as_deref(), Some("50%"));
        assert_eq!(battery.icon, NodeIcon::Battery(BatteryIconTier::Medium));
    }

    #[test]
    fn absent_battery_hides_node_and_connectors() {
        let mut s = snapshot();
        s.has_battery = false;
        let scene = scene(&s);
        assert!(!node(&scene, NodeId::Battery).visible);
        assert!(scene
            .connectors
            .iter()
            .all(|c| c.id != ConnectorId::BatteryHome && c.id != ConnectorId::BatterySolar));
    }

    #[test]
    fn animation_speed_encodes_share_of_total() {
        let mut s = snapshot();
        s.solar_to_home_kw = 3.0;
        s.solar_to_grid_kw = 1.0;
        let scene = scene(&s);
        let solar = connector(&scene, ConnectorId::Solar);
        assert!(solar.animated);
        assert!((solar.animation_duration_seconds - 1.25).abs() < 1e-9);
        let ret = connector(&scene, ConnectorId::GridReturn);
        assert!(ret.animated);
        assert!((ret.animation_duration_seconds - 3.75).abs() < 1e-9);
    }

    #[test]
    fn zero_total_disables_all_animation() {
        let scene = scene(&snapshot());
        assert!(scene.connectors.iter().all(|c| !c.animated));
        assert!(scene
            .connectors
            .iter()
            .all(|c| c.animation_duration_seconds == 0.0));
    }

    #[test]
    fn battery_grid_connector_never_animates() {
        let mut s = snapshot();
        s.battery_to_home_kw = 0.5;
        let c = connector(&scene(&s), ConnectorId::BatteryGrid);
        assert_eq!(c.magnitude_kw, 0.0);
        assert!(!c.animated);
    }

    #[test]
    fn inconsistent_aggregates_still_produce_a_scene() {
        let mut s = snapshot();
        s.grid_to_home_kw = -5.0;
        s.solar_to_home_kw = 1.0;
        let scene = scene(&s);
        // Total consumption is negative here; nothing animates and no
        // duration is non-finite.
        assert!(scene.connectors.iter().all(|c| !c.animated));
        assert!(scene
            .connectors
            .iter()
            .all(|c| c.animation_duration_seconds.is_finite()));
    }
}
