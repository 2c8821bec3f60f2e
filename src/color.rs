use std::f32::consts::PI;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use serde::Deserialize;

use crate::data::model::DayType;

// ---------------------------------------------------------------------------
// Fixed day-type palette
// ---------------------------------------------------------------------------

/// Bar colour of each day type: weekday red, Saturday blue, Sunday green.
pub fn day_color(day: DayType) -> Color32 {
    match day {
        DayType::Weekday => Color32::from_rgb(255, 0, 0),
        DayType::Saturday => Color32::from_rgb(0, 0, 255),
        DayType::Sunday => Color32::from_rgb(0, 128, 0),
    }
}

// ---------------------------------------------------------------------------
// Continuous colormaps for pie wedges
// ---------------------------------------------------------------------------

/// A continuous colormap over `t ∈ [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    /// Fast-cycling red/yellow/green/blue bands (gnuplot's `prism`).
    #[default]
    Prism,
    /// Hue sweep at fixed saturation and lightness.
    Rainbow,
}

impl Colormap {
    /// Colour at position `t`, clamped to `[0, 1]`.
    pub fn at(self, t: f32) -> Color32 {
        let t = t.clamp(0.0, 1.0);
        let rgb = match self {
            Colormap::Prism => {
                let phase = t * 20.9;
                Srgb::new(
                    0.75 * ((phase + 0.25) * PI).sin() + 0.67,
                    0.75 * ((phase - 0.25) * PI).sin() + 0.33,
                    -1.1 * (phase * PI).sin(),
                )
            }
            Colormap::Rainbow => {
                // Stop short of 360° so both ends stay distinguishable.
                let hsl = Hsl::new(t * 300.0, 0.75, 0.55);
                hsl.into_color()
            }
        };
        to_color32(rgb)
    }

    /// Sample `n` colours at evenly spaced points from 0 to 1 inclusive.
    pub fn sample(self, n: usize) -> Vec<Color32> {
        match n {
            0 => Vec::new(),
            1 => vec![self.at(0.0)],
            _ => (0..n)
                .map(|i| self.at(i as f32 / (n - 1) as f32))
                .collect(),
        }
    }
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}
