use eframe::egui::{Align2, Color32, FontId, Mesh, Painter, Pos2, Rect, Shape, Stroke, Vec2, vec2};

use crate::theory::TheoryNode;

pub(super) const TOPOLOGY_FILL: Color32 = Color32::from_rgb(0x93, 0x70, 0xdb);
pub(super) const RELATED_FILL: Color32 = Color32::from_rgb(0xb1, 0x9c, 0xd9);
pub(super) const SOLVED_GOLD: Color32 = Color32::from_rgb(0xff, 0xd7, 0x00);
pub(super) const SEARCH_HIGHLIGHT: Color32 = Color32::from_rgb(0xff, 0x33, 0x66);
pub(super) const TOPOLOGICAL_LINK: Color32 = Color32::from_rgb(0xe0, 0x66, 0xff);
pub(super) const STANDARD_LINK: Color32 = Color32::from_rgb(0x41, 0x69, 0xe1);
pub(super) const PANEL_ACCENT: Color32 = Color32::from_rgb(0xc9, 0xa0, 0xff);

const BACKGROUND_TOP_LEFT: Color32 = Color32::from_rgb(0x1a, 0x00, 0x33);
const BACKGROUND_BOTTOM_RIGHT: Color32 = Color32::from_rgb(0x00, 0x00, 0x20);

const TABLEAU10: [Color32; 10] = [
    Color32::from_rgb(0x4e, 0x79, 0xa7),
    Color32::from_rgb(0xf2, 0x8e, 0x2c),
    Color32::from_rgb(0xe1, 0x57, 0x59),
    Color32::from_rgb(0x76, 0xb7, 0xb2),
    Color32::from_rgb(0x59, 0xa1, 0x4f),
    Color32::from_rgb(0xed, 0xc9, 0x49),
    Color32::from_rgb(0xaf, 0x7a, 0xa1),
    Color32::from_rgb(0xff, 0x9d, 0xa7),
    Color32::from_rgb(0x9c, 0x75, 0x5f),
    Color32::from_rgb(0xba, 0xb0, 0xab),
];

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

pub(super) fn category_color(domain: &[String], category: &str) -> Color32 {
    let index = domain
        .iter()
        .position(|entry| entry == category)
        .unwrap_or(0);
    TABLEAU10[index % TABLEAU10.len()]
}

pub(super) fn node_radius(node: &TheoryNode) -> f32 {
    let quantum_fidelity = node.quantum_fidelity as f32;
    if node.is_topology {
        8.0 + quantum_fidelity / 4.0
    } else if node.is_topology_related {
        6.0 + quantum_fidelity / 5.0
    } else {
        4.0 + quantum_fidelity / 6.0
    }
}

pub(super) fn node_fill(node: &TheoryNode, domain: &[String]) -> Color32 {
    if node.is_topology {
        TOPOLOGY_FILL
    } else if node.is_topology_related {
        RELATED_FILL
    } else {
        category_color(domain, &node.category)
    }
}

pub(super) fn node_stroke(node: &TheoryNode, search_match: bool) -> (f32, Color32) {
    if search_match {
        (3.0, SEARCH_HIGHLIGHT)
    } else if node.is_solved() {
        (2.0, SOLVED_GOLD)
    } else {
        (0.5, Color32::WHITE)
    }
}

pub(super) fn label_offset(node: &TheoryNode) -> f32 {
    6.0 + node.quantum_fidelity as f32 / 6.0
}

pub(super) fn edge_stroke(strength: f64, is_topological: bool) -> (f32, Color32) {
    let color = if is_topological {
        with_opacity(TOPOLOGICAL_LINK, 0.6)
    } else {
        with_opacity(STANDARD_LINK, 0.3)
    };
    ((strength * 2.0) as f32, color)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    let middle = blend_color(BACKGROUND_TOP_LEFT, BACKGROUND_BOTTOM_RIGHT, 0.5);

    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.left_top(), BACKGROUND_TOP_LEFT);
    mesh.colored_vertex(rect.right_top(), middle);
    mesh.colored_vertex(rect.right_bottom(), BACKGROUND_BOTTOM_RIGHT);
    mesh.colored_vertex(rect.left_bottom(), middle);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(Shape::mesh(mesh));
}

enum LegendMark {
    Circle(Color32),
    Border(Color32),
    Line(Color32),
}

pub(super) fn draw_legend(painter: &Painter, rect: Rect) {
    let origin = rect.right_top() + vec2(-150.0, 20.0);
    let at = |x: f32, y: f32| origin + vec2(x, y);

    painter.rect_filled(
        Rect::from_min_size(origin, vec2(140.0, 160.0)),
        5.0,
        Color32::from_rgba_unmultiplied(26, 0, 51, 204),
    );
    painter.text(
        at(10.0, 16.0),
        Align2::LEFT_CENTER,
        "Network Legend",
        FontId::proportional(12.0),
        Color32::WHITE,
    );

    let items = [
        (LegendMark::Circle(TOPOLOGY_FILL), "Pure Topology"),
        (LegendMark::Circle(RELATED_FILL), "Related Fields"),
        (LegendMark::Border(SOLVED_GOLD), "Solved Problems"),
        (LegendMark::Line(TOPOLOGICAL_LINK), "Topological Link"),
        (LegendMark::Line(STANDARD_LINK), "Standard Link"),
    ];

    for (row, (mark, text)) in items.into_iter().enumerate() {
        let y = 50.0 + row as f32 * 25.0;
        match mark {
            LegendMark::Circle(color) => {
                painter.circle_filled(at(20.0, y), 6.0, color);
            }
            LegendMark::Border(color) => {
                painter.circle(at(20.0, y), 6.0, TOPOLOGY_FILL, Stroke::new(2.0, color));
            }
            LegendMark::Line(color) => {
                painter.line_segment([at(10.0, y), at(30.0, y)], Stroke::new(2.0, color));
            }
        }
        painter.text(
            at(35.0, y),
            Align2::LEFT_CENTER,
            text,
            FontId::proportional(10.0),
            Color32::WHITE,
        );
    }
}

pub(super) fn draw_caption(painter: &Painter, rect: Rect, nodes: usize, edges: usize) {
    painter.text(
        rect.left_top() + vec2(20.0, 26.0),
        Align2::LEFT_CENTER,
        format!("Showing {nodes} problems and {edges} connections"),
        FontId::proportional(12.0),
        Color32::WHITE,
    );
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

pub(super) fn ease_cubic_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;
    use crate::theory::TheoryRow;

    fn node(category: &str, quantum_fidelity: f64, known_result: &str) -> TheoryNode {
        TheoryNode::from_row(&TheoryRow {
            theory: "n".to_owned(),
            category: category.to_owned(),
            quantum_fidelity,
            known_result: known_result.to_owned(),
            ..TheoryRow::default()
        })
    }

    #[test]
    fn radius_depends_on_kind() {
        assert_eq!(node_radius(&node("Topology", 40.0, "")), 18.0);
        assert_eq!(node_radius(&node("Knot Theory", 40.0, "")), 14.0);
        assert_eq!(node_radius(&node("Number Theory", 30.0, "")), 9.0);
        assert_eq!(label_offset(&node("Number Theory", 30.0, "")), 11.0);
    }

    #[test]
    fn fill_uses_category_scale_for_plain_nodes() {
        let domain = vec![
            "Algebra".to_owned(),
            "Number Theory".to_owned(),
            "Topology".to_owned(),
        ];
        assert_eq!(node_fill(&node("Topology", 0.0, ""), &domain), TOPOLOGY_FILL);
        assert_eq!(node_fill(&node("Manifold Learning", 0.0, ""), &domain), RELATED_FILL);
        assert_eq!(node_fill(&node("Algebra", 0.0, ""), &domain), TABLEAU10[0]);
        assert_eq!(node_fill(&node("Number Theory", 0.0, ""), &domain), TABLEAU10[1]);
    }

    #[test]
    fn category_scale_wraps_after_ten() {
        let domain = (0..12).map(|index| format!("c{index:02}")).collect::<Vec<_>>();
        assert_eq!(category_color(&domain, "c10"), TABLEAU10[0]);
        assert_eq!(category_color(&domain, "c11"), TABLEAU10[1]);
    }

    #[test]
    fn stroke_priority() {
        let solved = node("Algebra", 0.0, "Solved (1994)");
        assert_eq!(node_stroke(&solved, false), (2.0, SOLVED_GOLD));
        assert_eq!(node_stroke(&solved, true), (3.0, SEARCH_HIGHLIGHT));
        assert_eq!(node_stroke(&node("Algebra", 0.0, "Open"), false), (0.5, Color32::WHITE));
        // "solved" in lower case does not count
        assert_eq!(node_stroke(&node("Algebra", 0.0, "unsolved"), false).1, Color32::WHITE);
    }

    #[test]
    fn edge_styles() {
        let (width, color) = edge_stroke(0.9, true);
        assert!((width - 1.8).abs() < 1e-6);
        assert_eq!(color.a(), 153);
        let (_, color) = edge_stroke(0.9, false);
        assert_eq!(color.a(), 77);
    }

    #[test]
    fn screen_round_trip() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 600.0));
        let world = vec2(12.0, -30.0);
        let screen = world_to_screen(rect, vec2(5.0, 7.0), 2.0, world);
        assert_eq!(screen, pos2(429.0, 247.0));
        assert_eq!(screen_to_world(rect, vec2(5.0, 7.0), 2.0, screen), world);
    }

    #[test]
    fn easing_hits_endpoints() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
    }
}
