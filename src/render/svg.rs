use crate::render::{ArcSpec, DrawSurface};
use crate::scene::{ConnectorSpec, NodeIcon, NodeId, NodeSpec};

/// Standalone SVG emitter for demos and snapshot-style assertions.
///
/// Real dashboards bring their own surface; this one collapses the whole
/// card into a single 100x100 document with the node circles drawn at the
/// connector anchor points.
#[derive(Debug, Default)]
pub struct SvgSurface {
    lines: Vec<String>,
    overlay: Vec<String>,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the surface and produce the SVG document.
    pub fn finish(self) -> String {
        let mut out = String::from(
            "<svg viewBox=\"0 0 100 100\" xmlns=\"http://www.w3.org/2000/svg\" \
             xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
             preserveAspectRatio=\"xMidYMid slice\">\n",
        );
        for element in self.lines.iter().chain(self.overlay.iter()) {
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }

    fn anchor(node: NodeId) -> (f64, f64) {
        match node {
            NodeId::Solar => (50.0, 6.0),
            NodeId::Grid => (6.0, 50.0),
            NodeId::Home => (94.0, 50.0),
            NodeId::Battery => (50.0, 94.0),
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl DrawSurface for SvgSurface {
    fn draw_node(&mut self, node: &NodeSpec) {
        let (cx, cy) = Self::anchor(node.id);
        let class = match node.icon {
            NodeIcon::Battery(tier) => format!("{} {}", node.id, tier),
            _ => node.id.to_string(),
        };
        self.overlay.push(format!(
            "<circle class=\"{class}\" cx=\"{cx}\" cy=\"{cy}\" r=\"8\" fill=\"none\"/>"
        ));
        self.overlay.push(format!(
            "<text class=\"label\" x=\"{cx}\" y=\"{y}\" text-anchor=\"middle\">{}</text>",
            escape(&node.label),
            y = cy - 10.0,
        ));
        if let Some(value) = &node.value_label {
            self.overlay.push(format!(
                "<text class=\"value\" x=\"{cx}\" y=\"{cy}\" text-anchor=\"middle\">{}</text>",
                escape(value),
            ));
        }
        for (i, badge) in node.badges.iter().enumerate() {
            self.overlay.push(format!(
                "<text class=\"badge {arrow}\" x=\"{cx}\" y=\"{y}\" text-anchor=\"middle\">{}</text>",
                escape(&badge.value_label),
                arrow = badge.arrow,
                y = cy + 4.0 + 4.0 * i as f64,
            ));
        }
    }

    fn draw_path(&mut self, connector: &ConnectorSpec) {
        self.lines.push(format!(
            "<path id=\"{id}\" class=\"{id}\" d=\"{d}\" vector-effect=\"non-scaling-stroke\"/>",
            id = connector.id,
            d = connector.path,
        ));
    }

    fn animate_particle(&mut self, connector: &ConnectorSpec) {
        self.lines.push(format!(
            "<circle r=\"1\" class=\"{id}\" vector-effect=\"non-scaling-stroke\">\
             <animateMotion dur=\"{dur}s\" repeatCount=\"indefinite\" calcMode=\"linear\">\
             <mpath xlink:href=\"#{id}\"/></animateMotion></circle>",
            id = connector.id,
            dur = connector.animation_duration_seconds,
        ));
    }

    fn draw_arc(&mut self, node: NodeId, arc: &ArcSpec) {
        let (cx, cy) = Self::anchor(node);
        self.overlay.push(format!(
            "<circle class=\"arc\" cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" fill=\"none\" \
             stroke-dasharray=\"{dash} {gap}\" stroke-dashoffset=\"{offset}\" \
             shape-rendering=\"geometricPrecision\"/>",
            r = arc.radius,
            dash = arc.dash,
            gap = arc.gap,
            offset = arc.rotation_offset,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::FlowSnapshot;
    use crate::locale::{EnglishLocale, PlainFormat};
    use crate::render::render;
    use crate::scene::layout;

    #[test]
    fn emits_one_path_per_connector_and_one_particle_per_flow() {
        let snapshot = FlowSnapshot {
            battery_to_home_kw: 0.5,
            grid_to_home_kw: 0.0,
            solar_to_battery_kw: 1.0,
            solar_to_grid_kw: 0.0,
            solar_to_home_kw: 0.0,
            battery_charge_percent: 50.0,
            has_battery: true,
            has_solar_production: true,
            has_return_to_grid: true,
        };
        let scene = layout(&snapshot, &PlainFormat, &EnglishLocale);
        let mut surface = SvgSurface::new();
        render(&scene, &mut surface);
        let svg = surface.finish();

        assert_eq!(svg.matches("<path ").count(), scene.connectors.len());
        assert_eq!(svg.matches("animateMotion").count(), 2);
        assert!(svg.contains("xlink:href=\"#battery-home\""));
        assert!(svg.contains("xlink:href=\"#battery-solar\""));
        assert!(svg.contains(">50%<"));
    }

    #[test]
    fn hidden_nodes_are_not_emitted() {
        let snapshot = FlowSnapshot {
            battery_to_home_kw: 0.0,
            grid_to_home_kw: 2.3,
            solar_to_battery_kw: 0.0,
            solar_to_grid_kw: 0.0,
            solar_to_home_kw: 0.0,
            battery_charge_percent: 0.0,
            has_battery: false,
            has_solar_production: false,
            has_return_to_grid: true,
        };
        let scene = layout(&snapshot, &PlainFormat, &EnglishLocale);
        let mut surface = SvgSurface::new();
        render(&scene, &mut surface);
        let svg = surface.finish();

        assert!(!svg.contains(">Battery<"));
        assert!(!svg.contains(">Solar<"));
        assert!(svg.contains(">Home<"));
        assert!(svg.contains(">2.3 kW<"));
    }
}
