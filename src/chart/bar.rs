use eframe::egui::Color32;

use super::plottable;
use crate::color::day_color;
use crate::config::ChartConfig;
use crate::data::extract::ExtractedSeries;
use crate::data::model::DayType;

/// One rectangle of the grouped bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    pub station: usize,
    pub day: DayType,
    /// Left edge on the x axis; bars of a station sit side by side.
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color32,
}

impl BarSpec {
    pub fn center(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// Grouped bars: three per station (weekday, Saturday, Sunday).
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartModel {
    pub bars: Vec<BarSpec>,
    /// Tick position and station label, one per station.
    pub ticks: Vec<(f64, String)>,
    pub x_range: [f64; 2],
    /// Lower bound is always zero.
    pub y_range: [f64; 2],
    pub y_label: String,
    pub window_size: [f32; 2],
}

impl BarChartModel {
    pub fn new(stations: &[String], series: &ExtractedSeries, config: &ChartConfig) -> Self {
        let width = config.bar_width;
        let mut bars = Vec::with_capacity(stations.len() * DayType::ALL.len());

        for (k, day) in DayType::ALL.into_iter().enumerate() {
            for (i, (station, total)) in stations.iter().zip(series.totals(day)).enumerate() {
                bars.push(BarSpec {
                    station: i,
                    day,
                    left: i as f64 + k as f64 * width,
                    width,
                    height: plottable(total, station, day.title()),
                    color: day_color(day),
                });
            }
        }

        let ticks = stations
            .iter()
            .enumerate()
            .map(|(i, name)| (i as f64 + 1.5 * width, name.clone()))
            .collect();

        let max = bars.iter().map(|b| b.height).fold(0.0, f64::max);
        let top = if max > 0.0 { max * 1.1 } else { 1.0 };

        let n = stations.len() as f32;
        Self {
            bars,
            ticks,
            x_range: [-width, stations.len() as f64],
            y_range: [0.0, top],
            y_label: "Entries to the stations".to_string(),
            window_size: [
                (n * config.station_width_px).max(config.min_width_px),
                config.figure_height_px,
            ],
        }
    }

    /// Bars of one day type, in station order.
    pub fn bars_for(&self, day: DayType) -> impl Iterator<Item = &BarSpec> {
        self.bars.iter().filter(move |b| b.day == day)
    }
}
