use eframe::egui::{self, Pos2, Rect, Ui, Vec2};

use super::super::physics::{DRAG_ALPHA_TARGET, RESIZE_ALPHA};
use super::super::render_utils::{circle_visible, ease_cubic_in_out, screen_to_world};
use super::super::{ViewModel, ViewReset};

const MIN_ZOOM: f32 = 0.5;
const MAX_ZOOM: f32 = 5.0;
const RESET_DURATION_SECS: f64 = 0.75;

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        self.view_reset = None;
        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    pub(in crate::app) fn handle_graph_drag(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
        grabbed: Option<usize>,
    ) {
        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some(index) = grabbed
        {
            self.start_node_drag(index);
        }

        if let Some(index) = self.dragging {
            if response.dragged_by(egui::PointerButton::Primary)
                && let Some(pointer) = response.interact_pointer_pos()
            {
                let target = screen_to_world(rect, self.pan, self.zoom, pointer);
                self.move_dragged_node(index, target);
                ui.ctx().request_repaint();
            }

            if response.drag_stopped() || !ui.input(|input| input.pointer.primary_down()) {
                self.end_node_drag();
            }
            return;
        }

        if response.dragged_by(egui::PointerButton::Primary)
            || response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.view_reset = None;
            self.pan += response.drag_delta();
        }
    }

    fn start_node_drag(&mut self, index: usize) {
        let Some(cache) = self.graph_cache.as_mut() else {
            return;
        };
        let Some(node) = cache.nodes.get_mut(index) else {
            return;
        };

        node.pinned = Some(node.world_pos);
        if self.dragging.is_none() {
            cache
                .simulation
                .set_alpha_target(DRAG_ALPHA_TARGET)
                .restart();
        }
        self.dragging = Some(index);
    }

    // Positions are written here too, so a drag works while the layout is paused.
    fn move_dragged_node(&mut self, index: usize, target: Vec2) {
        if let Some(node) = self
            .graph_cache
            .as_mut()
            .and_then(|cache| cache.nodes.get_mut(index))
        {
            node.pinned = Some(target);
            node.world_pos = target;
            node.velocity = Vec2::ZERO;
        }
    }

    fn end_node_drag(&mut self) {
        let Some(index) = self.dragging.take() else {
            return;
        };
        let Some(cache) = self.graph_cache.as_mut() else {
            return;
        };

        cache.simulation.set_alpha_target(0.0);
        if let Some(node) = cache.nodes.get_mut(index) {
            node.pinned = None;
        }
    }

    pub(in crate::app) fn reset_view(&mut self, now: f64) {
        self.view_reset = Some(ViewReset {
            from_pan: self.pan,
            from_zoom: self.zoom,
            started_at: now,
        });

        if let Some(cache) = self.graph_cache.as_mut() {
            cache.simulation.set_alpha(1.0).restart();
        }
    }

    pub(in crate::app) fn step_view_reset(&mut self, now: f64) -> bool {
        let Some(reset) = self.view_reset else {
            return false;
        };

        let progress = ((now - reset.started_at) / RESET_DURATION_SECS).clamp(0.0, 1.0) as f32;
        let eased = ease_cubic_in_out(progress);
        self.pan = reset.from_pan * (1.0 - eased);
        self.zoom = reset.from_zoom + (1.0 - reset.from_zoom) * eased;

        if progress >= 1.0 {
            self.pan = Vec2::ZERO;
            self.zoom = 1.0;
            self.view_reset = None;
            return false;
        }
        true
    }

    pub(in crate::app) fn handle_canvas_resize(&mut self, size: Vec2) {
        let previous = self.canvas_size.replace(size);
        let Some(previous) = previous else {
            return;
        };
        if (previous - size).length_sq() <= 0.25 {
            return;
        }

        if let Some(cache) = self.graph_cache.as_mut() {
            cache.simulation.set_alpha(RESIZE_ALPHA).restart();
        }
    }

    pub(in crate::app) fn node_at(
        rect: Rect,
        pointer: Option<Pos2>,
        screen_positions: &[Pos2],
        screen_radii: &[f32],
    ) -> Option<usize> {
        let pointer = pointer?;
        (0..screen_positions.len())
            .filter(|&index| circle_visible(rect, screen_positions[index], screen_radii[index]))
            .filter_map(|index| {
                let distance = screen_positions[index].distance(pointer);
                (distance <= screen_radii[index].max(3.0)).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}
