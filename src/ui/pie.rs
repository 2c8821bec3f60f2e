use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Sense, Shape, Stroke, Ui, Vec2, vec2};

use super::panels;
use crate::chart::PieChartModel;
use crate::chart::pie::Wedge;

/// Radius of the pie relative to the smaller side of the drawing area.
const RADIUS_FRACTION: f32 = 0.35;
const PCT_DISTANCE: f32 = 0.6;
const LABEL_DISTANCE: f32 = 1.05;
/// Angular resolution of wedge arcs, in degrees.
const ARC_STEP_DEG: f64 = 2.0;

// ---------------------------------------------------------------------------
// Pie chart (central panel)
// ---------------------------------------------------------------------------

pub fn pie_chart(ui: &mut Ui, model: &PieChartModel) {
    panels::title_banner(ui, &model.title);

    if model.wedges.is_empty() {
        panels::empty_notice(ui, "No entries recorded for these stations");
        return;
    }

    let (rect, _) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let radius = rect.width().min(rect.height()) * RADIUS_FRACTION;

    // Shadow first, offset down and to the left.
    let shadow = center + vec2(-0.02 * radius, 0.02 * radius);
    for wedge in &model.wedges {
        fill_sector(&painter, shadow, radius, wedge, Color32::from_black_alpha(90));
    }
    for wedge in &model.wedges {
        fill_sector(&painter, center, radius, wedge, wedge.color);
    }
    for wedge in &model.wedges {
        let mut outline = vec![center];
        outline.extend(arc(center, radius, wedge.start_deg, wedge.end_deg));
        painter.add(Shape::closed_line(outline, Stroke::new(1.5, Color32::WHITE)));
    }

    let text_color = ui.visuals().text_color();
    for wedge in &model.wedges {
        let dir = direction(wedge.mid_deg());

        painter.text(
            center + dir * radius * PCT_DISTANCE,
            Align2::CENTER_CENTER,
            wedge.percent_label(),
            FontId::proportional(14.0),
            Color32::BLACK,
        );

        let align = if dir.x >= 0.0 {
            Align2::LEFT_CENTER
        } else {
            Align2::RIGHT_CENTER
        };
        painter.text(
            center + dir * radius * LABEL_DISTANCE,
            align,
            &wedge.label,
            FontId::proportional(14.0),
            text_color,
        );
    }
}

/// Unit vector for a math angle (counter-clockwise, y up) in screen space.
fn direction(deg: f64) -> Vec2 {
    let rad = deg.to_radians();
    vec2(rad.cos() as f32, -(rad.sin() as f32))
}

/// Points along the arc from `start_deg` to `end_deg`, both ends included.
fn arc(center: Pos2, radius: f32, start_deg: f64, end_deg: f64) -> Vec<Pos2> {
    let steps = ((end_deg - start_deg) / ARC_STEP_DEG).ceil().max(1.0) as usize;
    (0..=steps)
        .map(|i| {
            let deg = start_deg + (end_deg - start_deg) * i as f64 / steps as f64;
            center + direction(deg) * radius
        })
        .collect()
}

/// Fill a wedge as convex pieces of at most 90°; a single polygon would not
/// be convex past 180°.
fn fill_sector(painter: &Painter, center: Pos2, radius: f32, wedge: &Wedge, color: Color32) {
    let mut from = wedge.start_deg;
    while from < wedge.end_deg {
        let to = (from + 90.0).min(wedge.end_deg);
        // Clockwise on screen: walk the arc backwards.
        let mut points = vec![center];
        points.extend(arc(center, radius, from, to).into_iter().rev());
        painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
        from = to;
    }
}
