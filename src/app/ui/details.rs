use eframe::egui::{self, Color32, RichText, Ui};

use crate::theory::TheoryNode;
use crate::util::{
    cqc_bar, entropy_bar, format_cqc, format_fixed, quantum_fidelity_bar, relationship_text,
    stability_bar,
};

use super::super::ViewModel;
use super::super::render_utils::{PANEL_ACCENT, SOLVED_GOLD};

const QUANTUM_FILL: Color32 = Color32::from_rgb(0x93, 0x70, 0xdb);
const STABILITY_FILL: Color32 = Color32::from_rgb(0x41, 0x69, 0xe1);
const ENTROPY_FILL: Color32 = Color32::from_rgb(0xe0, 0x66, 0xff);
const CQC_FILL: Color32 = Color32::from_rgb(0xff, 0xd7, 0x00);

fn metric_row(ui: &mut Ui, label: &str, value: String, fraction: f32, fill: Color32) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(value).strong());
        });
    });
    ui.add(egui::ProgressBar::new(fraction).fill(fill));
    ui.add_space(6.0);
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        let hovered = self
            .hovered
            .zip(self.graph_cache.as_ref())
            .and_then(|(index, cache)| cache.network.nodes.get(index));

        match hovered {
            Some(node) => draw_node_info(ui, node),
            None => draw_default_info(ui),
        }
    }
}

fn draw_default_info(ui: &mut Ui) {
    ui.heading("Theory Network");
    ui.add_space(6.0);
    ui.label("Each circle is a mathematical problem. Links join problems whose quantum fidelity and stability are similar.");
    ui.add_space(6.0);
    ui.label("Hover over a node to see its metrics.");
    ui.label("Drag nodes to rearrange them, scroll to zoom and drag the background to pan.");
    ui.label("Pick a field in the category menu or search by name to highlight problems.");
}

fn draw_node_info(ui: &mut Ui, node: &TheoryNode) {
    ui.heading(node.id.as_str());
    ui.label(format!("Field: {}", node.category));
    ui.add_space(10.0);

    metric_row(
        ui,
        "Quantum Fidelity",
        format_fixed(node.quantum_fidelity),
        quantum_fidelity_bar(node.quantum_fidelity),
        QUANTUM_FILL,
    );
    metric_row(
        ui,
        "Stability",
        format_fixed(node.stability),
        stability_bar(node.stability),
        STABILITY_FILL,
    );
    metric_row(
        ui,
        "Entropy",
        format_fixed(node.entropy),
        entropy_bar(node.entropy),
        ENTROPY_FILL,
    );
    metric_row(ui, "CQC", format_cqc(node.cqc), cqc_bar(node.cqc), CQC_FILL);

    if !node.result.is_empty() {
        ui.add_space(8.0);
        egui::Frame::new()
            .fill(Color32::from_rgba_unmultiplied(58, 34, 89, 128))
            .corner_radius(4.0)
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new("Status: ").color(PANEL_ACCENT));
                    let status_color = if node.is_solved() {
                        SOLVED_GOLD
                    } else {
                        Color32::WHITE
                    };
                    ui.label(RichText::new(node.result.as_str()).color(status_color));
                });
            });
    }

    ui.add_space(12.0);
    ui.label(
        RichText::new(relationship_text(node))
            .color(PANEL_ACCENT)
            .small(),
    );
}
