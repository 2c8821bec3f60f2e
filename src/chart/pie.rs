use eframe::egui::Color32;

use super::plottable;
use crate::config::ChartConfig;

/// One slice of a pie chart. Angles are in degrees, counter-clockwise from
/// the +x axis, `end_deg > start_deg`.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub label: String,
    /// Share of the whole, in `[0, 1]`.
    pub fraction: f64,
    pub start_deg: f64,
    pub end_deg: f64,
    pub color: Color32,
}

impl Wedge {
    pub fn mid_deg(&self) -> f64 {
        (self.start_deg + self.end_deg) / 2.0
    }

    /// Percentage with one decimal, e.g. `"42.5%"`.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }
}

/// A pie comparing the selected stations for a single day type.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChartModel {
    pub title: String,
    /// Ascending by value. Empty when every value is zero.
    pub wedges: Vec<Wedge>,
    pub window_size: [f32; 2],
}

impl PieChartModel {
    /// Build wedges for `stations`/`values` (same length, same order).
    ///
    /// Stations and values are sorted together, ascending by value, so each
    /// wedge keeps its own station's label.
    pub fn new(stations: &[String], values: &[f64], title: &str, config: &ChartConfig) -> Self {
        let mut pairs: Vec<(String, f64)> = stations
            .iter()
            .zip(values)
            .map(|(name, &v)| (name.clone(), plottable(v, name, title)))
            .collect();
        pairs.sort_by(|a, b| a.1.total_cmp(&b.1));

        let total: f64 = pairs.iter().map(|(_, v)| v).sum();
        let wedges = if total > 0.0 {
            let colors = config.colormap.sample(pairs.len());
            let mut cursor = config.start_angle_deg;
            pairs
                .into_iter()
                .zip(colors)
                .map(|((label, value), color)| {
                    let fraction = value / total;
                    let start_deg = cursor;
                    cursor += fraction * 360.0;
                    Wedge {
                        label,
                        fraction,
                        start_deg,
                        end_deg: cursor,
                        color,
                    }
                })
                .collect()
        } else {
            log::warn!("No entries to chart for '{title}'");
            Vec::new()
        };

        Self {
            title: title.to_string(),
            wedges,
            window_size: [config.pie_size_px, config.pie_size_px],
        }
    }
}
