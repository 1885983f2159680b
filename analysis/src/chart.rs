//! 2x2 bar chart comparison rendered to a raster image

use crate::format::{bytes_or_zero, value_or_zero};
use benchcmp_ingest::{Metric, MetricSet, System};
use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart rendering was not compiled in, rebuild with the `charts` feature")]
    Unavailable,
    #[error("no usable font found for chart text, set chart.font in the configuration")]
    FontUnavailable,
    #[error("Failed to read font {path:?}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Font {0:?} is not a valid TrueType/OpenType font")]
    InvalidFont(PathBuf),
    #[error("Failed to draw chart: {0}")]
    Draw(String),
}

impl ChartError {
    /// charting can't run at all in this environment, as opposed to failing midway
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable | Self::FontUnavailable)
    }
}

pub const FIGURE_TITLE: &str = "CausalDB vs SQLite Performance Comparison";

/// figure size in inches, scaled by the DPI into pixels
pub const FIGURE_SIZE: (u32, u32) = (15, 12);

/// highest accepted resolution, 18000x14400 pixels
pub const MAX_DPI: u32 = 1200;

/// bar colors for CausalDB and SQLite
pub const PALETTE: [(u8, u8, u8); 2] = [(0x2E, 0x8B, 0x57), (0x46, 0x82, 0xB4)];

pub const BAR_OPACITY: f64 = 0.7;

/// Fonts probed when no font is configured
pub const FONT_CANDIDATES: [&str; 8] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub path: PathBuf,
    pub dpi: u32,
    pub font: Option<PathBuf>,
}

impl ChartOptions {
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            FIGURE_SIZE.0.saturating_mul(self.dpi),
            FIGURE_SIZE.1.saturating_mul(self.dpi),
        )
    }

    /// font size given in points, converted to pixels at the configured DPI
    pub fn points(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }
}

/// A single subplot of the figure
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPanel {
    pub title: &'static str,
    pub y_label: &'static str,
    /// bar heights, ordered as `System::ALL`
    pub values: [f64; 2],
    pub annotation: String,
}

impl ChartPanel {
    pub fn labels() -> [&'static str; 2] {
        System::ALL.map(System::label)
    }

    /// upper bound of the y axis, leaving headroom for the annotation
    pub fn y_max(&self) -> f64 {
        let max = self.values.iter().copied().fold(0.0, f64::max);

        if max > 0.0 {
            max * 1.25
        } else {
            1.0
        }
    }
}

/// Layout of the four subplots, row by row
///
/// Missing metrics are drawn as zero height bars. File sizes are shown in KB.
pub fn panels(metrics: &MetricSet) -> [ChartPanel; 4] {
    let annotation = |metric: Metric, suffix: &str| {
        format!("{:.2}x {suffix}", value_or_zero(metrics, metric))
    };

    [
        ChartPanel {
            title: "Insert Performance (seconds)",
            y_label: "Time (seconds)",
            values: [
                value_or_zero(metrics, Metric::CausalInsertTime),
                value_or_zero(metrics, Metric::SqliteInsertTime),
            ],
            annotation: annotation(Metric::InsertSpeedup, "faster"),
        },
        ChartPanel {
            title: "Query Performance (seconds)",
            y_label: "Time (seconds)",
            values: [
                value_or_zero(metrics, Metric::CausalQueryTime),
                value_or_zero(metrics, Metric::SqliteQueryTime),
            ],
            annotation: annotation(Metric::QuerySpeedup, "faster"),
        },
        ChartPanel {
            title: "Memory Usage (MB)",
            y_label: "Memory (MB)",
            values: [
                value_or_zero(metrics, Metric::CausalInsertMemory),
                value_or_zero(metrics, Metric::SqliteInsertMemory),
            ],
            annotation: annotation(Metric::InsertMemoryRatio, "more memory"),
        },
        ChartPanel {
            title: "File Size (KB)",
            y_label: "Size (KB)",
            values: [
                bytes_or_zero(metrics, Metric::CausalFileSize) as f64 / 1024.0,
                bytes_or_zero(metrics, Metric::SqliteFileSize) as f64 / 1024.0,
            ],
            annotation: annotation(Metric::FileSizeRatio, "larger file"),
        },
    ]
}

/// configured font, otherwise the first candidate present on this machine
pub fn locate_font(configured: Option<&Path>) -> Option<PathBuf> {
    match configured {
        Some(path) => Some(path.to_path_buf()),
        None => FONT_CANDIDATES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.is_file()),
    }
}

#[cfg(feature = "charts")]
mod render {
    use super::{locate_font, panels, ChartError, ChartOptions, ChartPanel};
    use super::{BAR_OPACITY, FIGURE_TITLE, PALETTE};
    use benchcmp_ingest::MetricSet;
    use once_cell::sync::OnceCell;
    use plotters::{
        coord::Shift,
        prelude::*,
        style::text_anchor::{HPos, Pos, VPos},
    };
    use std::{
        fmt::Display,
        fs::{self, File},
        io,
        path::{Path, PathBuf},
    };
    use tracing::{debug, info, warn};

    const FONT_FAMILY: &str = "sans-serif";

    /// font registered with the glyph backend, shared by all renders of this process
    static FONT: OnceCell<PathBuf> = OnceCell::new();

    fn draw_error<E: Display>(error: E) -> ChartError {
        ChartError::Draw(error.to_string())
    }

    fn font_read(path: &Path) -> impl FnOnce(io::Error) -> ChartError + '_ {
        move |source| ChartError::FontRead {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Register the requested font once per process
    ///
    /// Only one font can back `FONT_FAMILY`. A later request for a different
    /// font is still checked for readability, then drawn with the registered one.
    fn register_font(options: &ChartOptions) -> Result<&'static PathBuf, ChartError> {
        let path = locate_font(options.font.as_deref()).ok_or(ChartError::FontUnavailable)?;

        if let Some(registered) = FONT.get() {
            if *registered != path {
                File::open(&path).map_err(font_read(&path))?;
                warn!(
                    requested = ?path,
                    registered = ?registered,
                    "Another chart font is already registered, keeping it"
                );
            }

            return Ok(registered);
        }

        FONT.get_or_try_init(|| {
            let bytes = fs::read(&path).map_err(font_read(&path))?;
            // the glyph backend only accepts 'static data, fonts live for the whole process
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());

            for style in [FontStyle::Normal, FontStyle::Bold] {
                plotters::style::register_font(FONT_FAMILY, style, bytes)
                    .map_err(|_| ChartError::InvalidFont(path.clone()))?;
            }

            debug!(font = ?path, "Registered chart font");

            Ok(path)
        })
    }

    fn draw_panel(
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
        panel: &ChartPanel,
        options: &ChartOptions,
    ) -> Result<(), ChartError> {
        let labels = ChartPanel::labels();
        let (width, height) = area.dim_in_pixel();

        let mut chart = ChartBuilder::on(area)
            .caption(panel.title, (FONT_FAMILY, options.points(12.0)))
            .margin(options.points(8.0) as u32)
            .x_label_area_size(options.points(24.0) as u32)
            .y_label_area_size(options.points(48.0) as u32)
            .build_cartesian_2d((0usize..1usize).into_segmented(), 0.0..panel.y_max())
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc(panel.y_label)
            .x_label_formatter(&|value: &SegmentValue<usize>| match value {
                SegmentValue::CenterOf(index) => {
                    labels.get(*index).map(|label| label.to_string()).unwrap_or_default()
                }
                _ => String::new(),
            })
            .label_style((FONT_FAMILY, options.points(10.0)))
            .axis_desc_style((FONT_FAMILY, options.points(10.0)))
            .draw()
            .map_err(draw_error)?;

        let bar_margin = width / 16;

        chart
            .draw_series(panel.values.iter().enumerate().map(|(index, value)| {
                let (red, green, blue) = PALETTE[index];
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(index), 0.0),
                        (SegmentValue::Exact(index + 1), *value),
                    ],
                    RGBColor(red, green, blue).mix(BAR_OPACITY).filled(),
                );
                bar.set_margin(0, 0, bar_margin, bar_margin);

                bar
            }))
            .map_err(draw_error)?;

        let style = TextStyle::from((FONT_FAMILY, options.points(12.0), FontStyle::Bold).into_font())
            .pos(Pos::new(HPos::Center, VPos::Center));

        area.draw(&Text::new(
            panel.annotation.clone(),
            ((width / 2) as i32, (height as f64 * 0.18) as i32),
            style,
        ))
        .map_err(draw_error)
    }

    /// Render the comparison figure to `options.path`
    #[tracing::instrument(level = "debug", skip(metrics))]
    pub fn render(metrics: &MetricSet, options: &ChartOptions) -> Result<(), ChartError> {
        register_font(options)?;

        let (width, height) = options.pixel_size();
        debug!(width = width, height = height, "Drawing chart");

        let root = BitMapBackend::new(&options.path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let root = root
            .titled(
                FIGURE_TITLE,
                TextStyle::from(
                    (FONT_FAMILY, options.points(16.0), FontStyle::Bold).into_font(),
                ),
            )
            .map_err(draw_error)?;

        for (area, panel) in root.split_evenly((2, 2)).iter().zip(panels(metrics).iter()) {
            draw_panel(area, panel, options)?;
        }

        root.present().map_err(draw_error)?;
        info!(path = ?options.path, "Chart written");

        Ok(())
    }
}

#[cfg(feature = "charts")]
pub use render::render;

/// Render the comparison figure to `options.path`
///
/// Always fails with `ChartError::Unavailable` without the `charts` feature.
#[cfg(not(feature = "charts"))]
pub fn render(_metrics: &MetricSet, _options: &ChartOptions) -> Result<(), ChartError> {
    Err(ChartError::Unavailable)
}
