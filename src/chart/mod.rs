//! Chart geometry, computed ahead of painting so it can be checked without
//! a window.

pub mod bar;
pub mod pie;

pub use bar::BarChartModel;
pub use pie::PieChartModel;

/// Anything the display can show.
#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Bar(BarChartModel),
    Pie(PieChartModel),
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::Bar(_) => "Station entries",
            Chart::Pie(pie) => &pie.title,
        }
    }

    /// Initial window size in logical pixels.
    pub fn window_size(&self) -> [f32; 2] {
        match self {
            Chart::Bar(bar) => bar.window_size,
            Chart::Pie(pie) => pie.window_size,
        }
    }
}

/// Counts that cannot be drawn (NaN, negative) are shown as zero.
pub(crate) fn plottable(value: f64, station: &str, what: &str) -> f64 {
    if value.is_nan() || value < 0.0 {
        log::warn!("{what} count for '{station}' is {value}; drawing it as 0");
        0.0
    } else {
        value
    }
}
