use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};

use super::super::render_utils::{
    draw_background, draw_caption, draw_legend, edge_stroke, label_offset, node_stroke,
    world_to_screen,
};
use super::super::{RenderGraph, ViewModel};

impl ViewModel {
    fn update_screen_space(rect: egui::Rect, pan: egui::Vec2, zoom: f32, cache: &mut RenderGraph) {
        let scratch = &mut cache.view_scratch;
        scratch.screen_positions.clear();
        scratch.screen_radii.clear();
        for node in &cache.nodes {
            scratch
                .screen_positions
                .push(world_to_screen(rect, pan, zoom, node.world_pos));
            scratch.screen_radii.push(node.radius * zoom);
        }
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        if self.graph_dirty {
            self.rebuild_render_graph();
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let now = ui.input(|input| input.time);

        draw_background(&painter, rect);
        self.handle_canvas_resize(rect.size());
        self.handle_graph_zoom(ui, rect, &response);
        let resetting = self.step_view_reset(now);

        let search_matches = self.cached_search_matches();
        let live_physics = self.live_physics;

        let Some(cache) = self.graph_cache.as_mut() else {
            return;
        };

        let moving = if live_physics {
            cache
                .simulation
                .tick(&mut cache.nodes, &mut cache.physics_scratch)
        } else {
            false
        };

        Self::update_screen_space(rect, self.pan, self.zoom, cache);

        let pointer = ui.input(|input| input.pointer.hover_pos());
        let press_origin = ui.input(|input| input.pointer.press_origin());
        let hovered = self.dragging.or_else(|| {
            Self::node_at(
                rect,
                pointer.filter(|_| response.hovered()),
                &cache.view_scratch.screen_positions,
                &cache.view_scratch.screen_radii,
            )
        });
        let grabbed = Self::node_at(
            rect,
            press_origin,
            &cache.view_scratch.screen_positions,
            &cache.view_scratch.screen_radii,
        );

        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = if self.dragging.is_some() {
                    egui::CursorIcon::Grabbing
                } else {
                    egui::CursorIcon::Grab
                };
            });
        }

        let zoom = self.zoom;
        let positions = &cache.view_scratch.screen_positions;
        let radii = &cache.view_scratch.screen_radii;

        for edge in &cache.network.edges {
            let (width, color) = edge_stroke(edge.strength, edge.is_topological);
            painter.line_segment(
                [positions[edge.source], positions[edge.target]],
                Stroke::new(width * zoom, color),
            );
        }

        for (index, (node, render_node)) in cache.network.nodes.iter().zip(&cache.nodes).enumerate() {
            let position = positions[index];
            let radius = radii[index];
            let is_match = search_matches.contains(&index);
            let (stroke_width, stroke_color) = node_stroke(node, is_match);

            painter.circle(
                position,
                radius,
                render_node.fill,
                Stroke::new(stroke_width * zoom, stroke_color),
            );

            if is_match || hovered == Some(index) {
                painter.text(
                    position + vec2(label_offset(node) * zoom, 0.0),
                    Align2::LEFT_CENTER,
                    node.id.as_str(),
                    FontId::proportional(10.0 * zoom),
                    Color32::WHITE,
                );
            }
        }

        draw_legend(&painter, rect);
        draw_caption(
            &painter,
            rect,
            cache.network.node_count(),
            cache.network.edge_count(),
        );

        self.hovered = hovered;
        self.handle_graph_drag(ui, rect, &response, grabbed);

        if moving || resetting || self.dragging.is_some() {
            ui.ctx().request_repaint();
        }
    }
}
