use eframe::egui::{self, Align, Context, Layout, Vec2};

use crate::theory::{CategoryFilter, DataSource, Dataset};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(dataset: Dataset, category: CategoryFilter) -> Self {
        let category = if dataset.has_category(&category) {
            category
        } else {
            tracing::warn!(%category, "unknown category, showing all theories");
            CategoryFilter::All
        };

        Self {
            dataset,
            category,
            search: String::new(),
            hovered: None,
            dragging: None,
            pan: Vec2::ZERO,
            zoom: 1.0,
            view_reset: None,
            canvas_size: None,
            live_physics: true,
            graph_dirty: true,
            render_graph_revision: 0,
            graph_cache: None,
            search_match_cache: None,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        source: &DataSource,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        if self.graph_dirty {
            self.rebuild_render_graph();
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Theory Network");
                    ui.separator();
                    self.draw_controls(ui);
                    ui.separator();
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload data"));
                    if reload_button.on_hover_text(source.to_string()).clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(layout_text) = self.layout_status_text() {
                            ui.label(layout_text);
                            ui.separator();
                        }
                        ui.label(format!(
                            "{} theories / {} categories",
                            self.dataset.row_count(),
                            self.dataset.color_domain().len()
                        ));
                    });
                });
            });

        egui::SidePanel::right("node_info")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                if is_loading {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Reloading theory data...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                } else {
                    self.draw_graph(ui);
                }
            });
    }

    fn layout_status_text(&self) -> Option<String> {
        self.graph_cache.as_ref().map(|cache| {
            if cache.simulation.is_running() {
                format!("layout settling (alpha {:.2})", cache.simulation.alpha())
            } else {
                "layout settled".to_owned()
            }
        })
    }
}
