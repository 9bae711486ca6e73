//! PNG rendering of the three threshold-pipeline stages.

use std::io::BufRead;
use std::path::PathBuf;

use image::{Rgba, RgbaImage};
use tracing::info;

use super::{InspectError, InspectionSink, InspectionView};

const BACKGROUND: Rgba<u8> = Rgba([18, 18, 22, 255]);
const PANEL: Rgba<u8> = Rgba([28, 28, 34, 255]);
const AXIS: Rgba<u8> = Rgba([90, 90, 100, 255]);
const ORIGINAL: Rgba<u8> = Rgba([90, 170, 255, 255]);
const NORMALIZED: Rgba<u8> = Rgba([120, 220, 140, 255]);
const SQUARED: Rgba<u8> = Rgba([255, 190, 80, 255]);
const THRESHOLD: Rgba<u8> = Rgba([235, 70, 70, 255]);

const PANEL_COUNT: u32 = 3;
const MARGIN: u32 = 8;
const TICK_LENGTH: u32 = 4;
/// Largest accepted image side, in pixels.
const MAX_CANVAS_SIDE: u32 = 16_384;

/// Renders inspection views to a PNG and optionally shows it in the system viewer.
#[derive(Debug, Clone)]
pub struct PngInspectionRenderer {
    path: PathBuf,
    width: u32,
    height: u32,
    show: bool,
}

impl PngInspectionRenderer {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
            show: false,
        }
    }

    /// Open the rendered image and wait for Enter before returning.
    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Draw the three stacked panels for `view`.
    pub fn render(&self, view: &InspectionView<'_>) -> Result<RgbaImage, InspectError> {
        let min_panel_height = 2 * TICK_LENGTH + 4;
        let panel_height = self
            .height
            .saturating_sub(MARGIN * (PANEL_COUNT + 1))
            / PANEL_COUNT;
        if self.width <= 2 * MARGIN
            || panel_height < min_panel_height
            || self.width > MAX_CANVAS_SIDE
            || self.height > MAX_CANVAS_SIDE
        {
            return Err(InspectError::Canvas {
                width: self.width,
                height: self.height,
            });
        }
        let plot_width = self.width - 2 * MARGIN;
        let mut image = RgbaImage::from_pixel(self.width, self.height, BACKGROUND);
        let channels = view.channels.max(1) as usize;

        let (lo, hi) = series_bounds(view.original);
        let panels = [
            (view.original, lo, hi, ORIGINAL),
            (view.normalized, 0.0, 1.0, NORMALIZED),
            (view.squared, 0.0, 1.0, SQUARED),
        ];
        let ticks = tick_columns(view, plot_width);
        for (idx, (series, lo, hi, color)) in panels.into_iter().enumerate() {
            let top = MARGIN + idx as u32 * (panel_height + MARGIN);
            let panel = Panel {
                left: MARGIN,
                top,
                width: plot_width,
                height: panel_height - TICK_LENGTH,
                lo,
                hi,
            };
            panel.fill(&mut image, PANEL);
            let columns = column_envelope(series, channels, plot_width as usize);
            panel.draw_envelope(&mut image, &columns, color);
            if idx == 1 {
                panel.draw_level(&mut image, view.threshold, THRESHOLD);
            }
            panel.draw_ticks(&mut image, &ticks, AXIS);
        }
        Ok(image)
    }

    fn save(&self, image: &RgbaImage) -> Result<(), InspectError> {
        image.save(&self.path).map_err(|source| InspectError::Save {
            path: self.path.clone(),
            source,
        })
    }

    fn show_and_wait(&self) -> Result<(), InspectError> {
        open::that(&self.path).map_err(|source| InspectError::Show {
            path: self.path.clone(),
            source,
        })?;
        eprintln!("Inspecting {}; press Enter to continue.", self.path.display());
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|source| InspectError::Show {
                path: self.path.clone(),
                source,
            })?;
        Ok(())
    }
}

impl InspectionSink for PngInspectionRenderer {
    fn inspect(&mut self, view: &InspectionView<'_>) -> Result<(), InspectError> {
        let image = self.render(view)?;
        self.save(&image)?;
        info!(
            path = %self.path.display(),
            seconds = view.duration_seconds(),
            tick_seconds = tick_interval_seconds(view.duration_seconds()),
            "Rendered inspection image"
        );
        if self.show {
            self.show_and_wait()?;
        }
        Ok(())
    }
}

struct Panel {
    left: u32,
    top: u32,
    width: u32,
    height: u32,
    lo: f64,
    hi: f64,
}

impl Panel {
    fn fill(&self, image: &mut RgbaImage, color: Rgba<u8>) {
        for y in self.top..self.top + self.height {
            for x in self.left..self.left + self.width {
                image.put_pixel(x, y, color);
            }
        }
    }

    fn to_y(&self, value: f64) -> u32 {
        let span = self.hi - self.lo;
        let t = if span > 0.0 {
            ((value - self.lo) / span).clamp(0.0, 1.0)
        } else {
            0.5
        };
        let inner = f64::from(self.height.saturating_sub(1));
        self.top + (inner - t * inner).round() as u32
    }

    fn draw_envelope(
        &self,
        image: &mut RgbaImage,
        columns: &[Option<(f64, f64)>],
        color: Rgba<u8>,
    ) {
        for (x, column) in columns.iter().enumerate() {
            let Some((min, max)) = column else {
                continue;
            };
            let y_top = self.to_y(*max);
            let y_bottom = self.to_y(*min);
            for y in y_top..=y_bottom {
                image.put_pixel(self.left + x as u32, y, color);
            }
        }
    }

    fn draw_level(&self, image: &mut RgbaImage, value: f64, color: Rgba<u8>) {
        if !(self.lo..=self.hi).contains(&value) {
            return;
        }
        let y = self.to_y(value);
        for x in self.left..self.left + self.width {
            image.put_pixel(x, y, color);
        }
    }

    fn draw_ticks(&self, image: &mut RgbaImage, ticks: &[u32], color: Rgba<u8>) {
        let base = self.top + self.height;
        for &tick in ticks {
            for y in base..base + TICK_LENGTH {
                image.put_pixel(self.left + tick, y, color);
            }
        }
    }
}

fn series_bounds(series: &[f64]) -> (f64, f64) {
    series
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| {
            Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
        })
        .unwrap_or((0.0, 1.0))
}

/// Per-column min/max over all channels of the frames that fall into each column.
fn column_envelope(series: &[f64], channels: usize, width: usize) -> Vec<Option<(f64, f64)>> {
    let frame_count = series.len() / channels.max(1);
    let mut columns = vec![None; width];
    if frame_count == 0 {
        return columns;
    }
    let total = frame_count as f64;
    for (x, column) in columns.iter_mut().enumerate() {
        let start = ((x as f64 * total) / width as f64).floor() as usize;
        let end = (((x as f64 + 1.0) * total) / width as f64)
            .ceil()
            .max((start + 1) as f64)
            .min(total) as usize;
        if start >= frame_count {
            continue;
        }
        let frames = &series[start * channels..end * channels];
        *column = frames
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| {
                Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
            });
    }
    columns
}

/// Spacing of time-axis ticks: the smallest 1-2-5 step giving at most ten ticks.
pub fn tick_interval_seconds(duration_seconds: f64) -> f64 {
    if !(duration_seconds > 0.0) || !duration_seconds.is_finite() {
        return 1.0;
    }
    let raw = duration_seconds / 10.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    for step in [1.0, 2.0, 5.0, 10.0] {
        if step * magnitude >= raw {
            return step * magnitude;
        }
    }
    10.0 * magnitude
}

fn tick_columns(view: &InspectionView<'_>, plot_width: u32) -> Vec<u32> {
    let duration = view.duration_seconds();
    if duration <= 0.0 || plot_width == 0 {
        return Vec::new();
    }
    let interval = tick_interval_seconds(duration);
    let last = plot_width - 1;
    let mut ticks = Vec::new();
    let mut t = 0.0;
    while t <= duration {
        let x = ((t / duration) * f64::from(last)).round() as u32;
        ticks.push(x.min(last));
        t += interval;
    }
    ticks
}
