use anyhow::{Result, anyhow};
use eframe::egui;

use crate::chart::{BarChartModel, Chart, PieChartModel};
use crate::config::ChartConfig;
use crate::data::extract::ExtractedSeries;
use crate::data::model::DayType;
use crate::select::StationSelection;
use crate::ui::{panels, pie, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// A window showing a single chart.
pub struct ChartApp {
    chart: Chart,
}

impl ChartApp {
    pub fn new(chart: Chart) -> Self {
        Self { chart }
    }
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::close_on_escape(ctx);

        match &self.chart {
            Chart::Bar(model) => {
                // ---- Top panel: legend ----
                egui::TopBottomPanel::top("legend").show(ctx, |ui| {
                    panels::legend_row(ui);
                });

                // ---- Central panel: bars ----
                egui::CentralPanel::default().show(ctx, |ui| {
                    plot::bar_plot(ui, model);
                });
            }
            Chart::Pie(model) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    pie::pie_chart(ui, model);
                });
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Display surface
// ---------------------------------------------------------------------------

/// Something that can show a chart and return once the user is done with it.
pub trait ChartDisplay {
    fn show(&mut self, chart: &Chart) -> Result<()>;
}

/// Native window per chart. `show` blocks until the window is closed, and
/// the window is gone by the time it returns.
#[derive(Debug, Default)]
pub struct NativeDisplay;

impl ChartDisplay for NativeDisplay {
    fn show(&mut self, chart: &Chart) -> Result<()> {
        let title = chart.title().to_string();
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(&title)
                .with_inner_size(chart.window_size())
                .with_min_inner_size([300.0, 300.0]),
            // Hand control back after the window closes so the next chart can open.
            run_and_return: true,
            ..Default::default()
        };

        log::info!("Showing chart '{title}'");
        let chart = chart.clone();
        eframe::run_native(
            &title,
            options,
            Box::new(move |cc| {
                cc.egui_ctx.set_visuals(egui::Visuals::light());
                Ok(Box::new(ChartApp::new(chart)))
            }),
        )
        .map_err(|e| anyhow!("displaying chart '{title}': {e}"))?;
        log::debug!("Chart '{title}' closed");
        Ok(())
    }
}

/// Show the bar chart, then one pie per day type, each after the previous
/// one has been closed.
pub fn render_all(
    display: &mut impl ChartDisplay,
    selection: &StationSelection,
    series: &ExtractedSeries,
    config: &ChartConfig,
) -> Result<()> {
    let stations = selection.names();

    display.show(&Chart::Bar(BarChartModel::new(stations, series, config)))?;

    for day in DayType::ALL {
        let values = series.totals(day);
        let model = PieChartModel::new(stations, &values, day.title(), config);
        display.show(&Chart::Pie(model))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::extract::extract_data;
    use crate::data::model::tests::sample_table;
    use crate::select::tests::select;

    /// Records what would have been shown.
    #[derive(Default)]
    struct RecordingDisplay {
        shown: Vec<Chart>,
    }

    impl ChartDisplay for RecordingDisplay {
        fn show(&mut self, chart: &Chart) -> Result<()> {
            self.shown.push(chart.clone());
            Ok(())
        }
    }

    /// Fails on the first pie, as a window error would.
    struct FailingDisplay {
        calls: usize,
    }

    impl ChartDisplay for FailingDisplay {
        fn show(&mut self, chart: &Chart) -> Result<()> {
            self.calls += 1;
            match chart {
                Chart::Bar(_) => Ok(()),
                Chart::Pie(_) => Err(anyhow!("no display")),
            }
        }
    }

    #[test]
    fn charts_are_shown_in_order() {
        let table = sample_table();
        let selection = select(&["Oxford Circus, Victoria"]);
        let series = extract_data(&selection, &table).unwrap();

        let mut display = RecordingDisplay::default();
        render_all(&mut display, &selection, &series, &ChartConfig::default()).unwrap();

        let titles: Vec<&str> = display.shown.iter().map(|c| c.title()).collect();
        assert_eq!(titles, ["Station entries", "Weekday", "Saturday", "Sunday"]);
        assert!(matches!(&display.shown[0], Chart::Bar(bar) if bar.bars.len() == 6));
    }

    #[test]
    fn single_station_gives_three_bars_and_full_pies() {
        let table = sample_table();
        let selection = select(&["Victoria"]);
        let series = extract_data(&selection, &table).unwrap();

        let mut display = RecordingDisplay::default();
        render_all(&mut display, &selection, &series, &ChartConfig::default()).unwrap();

        let Chart::Bar(bar) = &display.shown[0] else {
            panic!("first chart should be the bar chart");
        };
        assert_eq!(bar.bars.len(), 3);

        for chart in &display.shown[1..] {
            let Chart::Pie(pie) = chart else {
                panic!("expected a pie chart");
            };
            assert_eq!(pie.wedges.len(), 1);
            assert_eq!(pie.wedges[0].label, "Victoria");
            assert_eq!(pie.wedges[0].percent_label(), "100.0%");
        }
    }

    #[test]
    fn display_errors_stop_the_sequence() {
        let table = sample_table();
        let selection = select(&["Victoria"]);
        let series = extract_data(&selection, &table).unwrap();

        let mut display = FailingDisplay { calls: 0 };
        let err = render_all(&mut display, &selection, &series, &ChartConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "no display");
        assert_eq!(display.calls, 2);
    }
}
