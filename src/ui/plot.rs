use std::f32::consts::FRAC_PI_2;

use eframe::egui::epaint::TextShape;
use eframe::egui::{FontId, Ui, pos2};
use egui_plot::{Bar, BarChart, Plot, PlotBounds, PlotPoint, PlotTransform};

use crate::chart::BarChartModel;
use crate::color::day_color;
use crate::data::model::DayType;

/// Space kept under the plot frame for the rotated station names.
const LABEL_MARGIN: f32 = 160.0;

// ---------------------------------------------------------------------------
// Grouped bar plot (central panel)
// ---------------------------------------------------------------------------

/// Render the station bars. Bounds are fixed by the model, so zooming and
/// dragging are off.
pub fn bar_plot(ui: &mut Ui, model: &BarChartModel) {
    let height = (ui.available_height() - LABEL_MARGIN).max(100.0);

    let response = Plot::new("station_bars")
        .height(height)
        .y_axis_label(model.y_label.clone())
        .show_axes([false, true])
        .show_x(false)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for day in DayType::ALL {
                let bars: Vec<Bar> = model
                    .bars_for(day)
                    .map(|b| {
                        Bar::new(b.center(), b.height)
                            .width(b.width)
                            .fill(b.color)
                            .name(&model.ticks[b.station].1)
                    })
                    .collect();

                plot_ui.bar_chart(BarChart::new(bars).name(day.title()).color(day_color(day)));
            }

            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [model.x_range[0], model.y_range[0]],
                [model.x_range[1], model.y_range[1]],
            ));
        });

    tick_labels(ui, &response.transform, model);
}

/// Station names under their bar groups, rotated to read top-down.
fn tick_labels(ui: &Ui, transform: &PlotTransform, model: &BarChartModel) {
    let painter = ui.painter();
    let color = ui.visuals().text_color();
    let top = transform.frame().bottom() + 6.0;

    for (x, label) in &model.ticks {
        let anchor = transform.position_from_point(&PlotPoint::new(*x, 0.0));
        let galley = painter.layout_no_wrap(label.clone(), FontId::proportional(12.0), color);
        // After a quarter turn the galley's height runs along -x.
        let pos = pos2(anchor.x + galley.size().y / 2.0, top);
        painter.add(TextShape::new(pos, galley, color).with_angle(FRAC_PI_2));
    }
}
