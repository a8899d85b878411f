use eframe::egui::{self, Ui};

use crate::theory::CategoryFilter;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        let mut selected = self.category.clone();
        egui::ComboBox::from_id_salt("category_select")
            .selected_text(selected.label())
            .width(200.0)
            .show_ui(ui, |ui| {
                for category in self.dataset.categories() {
                    let option = CategoryFilter::from_label(category);
                    ui.selectable_value(&mut selected, option, category.as_str());
                }
            })
            .response
            .on_hover_text("Show only theories from one field.");
        self.set_category(selected);

        ui.add(
            egui::TextEdit::singleline(&mut self.search)
                .hint_text("Search theories...")
                .desired_width(200.0),
        )
        .on_hover_text("Highlight theories whose name contains this text.");

        if ui
            .button("Reset view")
            .on_hover_text("Return to the default zoom and restart the layout.")
            .clicked()
        {
            let now = ui.input(|input| input.time);
            self.reset_view(now);
        }

        ui.checkbox(&mut self.live_physics, "Live layout")
            .on_hover_text("Keep simulating layout forces while viewing the graph.");
    }
}
