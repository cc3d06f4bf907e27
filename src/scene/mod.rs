/// Layout & encoding
///
/// Maps a [`crate::flow::FlowSnapshot`] to the set of nodes, connector
/// paths, ring arcs and animation parameters an external renderer draws.
pub mod arcs;
pub mod geometry;
pub mod layout;

pub use arcs::{home_source_arcs, HomeArcs, CIRCLE_CIRCUMFERENCE};
pub use geometry::{connector_path, ConnectorId, PresenceVariant};
pub use layout::{
    layout, ArrowDirection, BatteryIconTier, ConnectorSpec, FlowDirection, NodeBadge, NodeIcon,
    NodeId, NodeSpec, SceneDescription, SPEED_FACTOR_SECONDS,
};
