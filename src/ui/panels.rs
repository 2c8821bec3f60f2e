use eframe::egui::{self, Align2, Color32, FontId, Sense, Ui, vec2};

use crate::color::day_color;
use crate::data::model::DayType;

// ---------------------------------------------------------------------------
// Legend row (above the bar plot)
// ---------------------------------------------------------------------------

/// One swatch per day type, laid out in a single row.
pub fn legend_row(ui: &mut Ui) {
    ui.add_space(4.0);
    ui.horizontal(|ui: &mut Ui| {
        for day in DayType::ALL {
            let (rect, _) = ui.allocate_exact_size(vec2(14.0, 14.0), Sense::hover());
            ui.painter().rect_filled(rect, 2.0, day_color(day));
            ui.label(day.title());
            ui.add_space(12.0);
        }
    });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Title banner
// ---------------------------------------------------------------------------

/// Large title centred at the top of `ui`, on a light grey box.
pub fn title_banner(ui: &mut Ui, title: &str) {
    let galley = ui.painter().layout_no_wrap(
        title.to_string(),
        FontId::proportional(20.0),
        Color32::BLACK,
    );
    let box_size = galley.size() + vec2(16.0, 10.0);
    let (row, _) = ui.allocate_exact_size(vec2(ui.available_width(), box_size.y + 12.0), Sense::hover());

    let rect = Align2::CENTER_CENTER.align_size_within_rect(box_size, row);
    let painter = ui.painter();
    painter.rect_filled(rect, 4.0, Color32::from_gray(230));
    painter.galley(rect.center() - galley.size() / 2.0, galley, Color32::BLACK);
}

/// Placeholder text centred in the remaining space.
pub fn empty_notice(ui: &mut Ui, text: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading(text);
    });
}

/// Close the window on Escape.
pub fn close_on_escape(ctx: &egui::Context) {
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}
