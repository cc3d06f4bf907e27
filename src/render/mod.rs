/// Rendering handoff
///
/// The engine does not draw; it hands a [`SceneDescription`] to an abstract
/// 2D surface. [`render`] walks a scene in draw order so surface
/// implementations stay dumb.
pub mod svg;

use crate::scene::{ConnectorSpec, NodeSpec, SceneDescription};
pub use svg::SvgSurface;

use crate::scene::arcs::{HomeArcs, CIRCLE_CIRCUMFERENCE};
use crate::scene::NodeId;

/// Circular progress arc parameters: dash pattern on a ring of `radius`,
/// rotated by `rotation_offset` along the stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    pub radius: f64,
    pub dash: f64,
    pub gap: f64,
    pub rotation_offset: f64,
}

/// Ring radius of the node circles' progress arcs.
const ARC_RADIUS: f64 = 38.0;

/// Expand home ring shares into drawable arcs: solar first, battery packed
/// directly after it along the stroke.
pub fn home_arc_specs(arcs: &HomeArcs) -> [ArcSpec; 2] {
    let solar = ArcSpec {
        radius: ARC_RADIUS,
        dash: arcs.solar_dash,
        gap: CIRCLE_CIRCUMFERENCE - arcs.solar_dash,
        rotation_offset: -(CIRCLE_CIRCUMFERENCE - arcs.solar_dash),
    };
    let battery = ArcSpec {
        radius: ARC_RADIUS,
        dash: arcs.battery_dash,
        gap: CIRCLE_CIRCUMFERENCE - arcs.battery_dash,
        rotation_offset: -(CIRCLE_CIRCUMFERENCE - arcs.battery_dash - arcs.solar_dash),
    };
    [solar, battery]
}

/// Abstract 2D vector surface the scene is drawn onto.
pub trait DrawSurface {
    /// Circular node with centered icon and text.
    fn draw_node(&mut self, node: &NodeSpec);

    /// Connector line given by SVG-style path commands.
    fn draw_path(&mut self, connector: &ConnectorSpec);

    /// Particle that traverses the named connector's path over the given
    /// duration, repeating while the flow persists.
    fn animate_particle(&mut self, connector: &ConnectorSpec);

    /// Progress arc on a node's ring.
    fn draw_arc(&mut self, node: NodeId, arc: &ArcSpec);
}

/// Draw a scene: lines first, then particles, then nodes and their arcs.
pub fn render(scene: &SceneDescription, surface: &mut dyn DrawSurface) {
    for connector in &scene.connectors {
        surface.draw_path(connector);
    }
    for connector in scene.connectors.iter().filter(|c| c.animated) {
        surface.animate_particle(connector);
    }
    for node in scene.nodes.iter().filter(|n| n.visible) {
        surface.draw_node(node);
        if let Some(arcs) = &node.arcs {
            for arc in home_arc_specs(arcs) {
                surface.draw_arc(node.id, &arc);
            }
        }
    }
}
