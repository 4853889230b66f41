//! Row-band render scheduling.
//!
//! The framebuffer is split into horizontal bands of whole rows. Each band
//! owns its slice of pixels and its own sampler stream, so bands can run in
//! parallel using rayon without sharing anything mutable. Because a band's
//! random stream depends only on where the band starts, the image is the same
//! whether the bands run on many threads or one after another.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::camera::Camera;
use crate::error::{RenderError, RenderResult};
use crate::integrator::trace;
use crate::sampler::Sampler;
use crate::settings::RenderSettings;
use lux_core::{Scene, Texture};
use lux_math::{clamp_color, linear_to_gamma, Color};

/// A contiguous range of image rows rendered by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// First row of the band
    pub start_row: u32,
    /// One past the last row of the band
    pub end_row: u32,
    /// Index of this band, top to bottom
    pub index: usize,
}

impl Band {
    /// Number of rows in the band.
    pub fn rows(&self) -> u32 {
        self.end_row - self.start_row
    }
}

/// Split `height` rows into `count` bands.
///
/// Every band gets `height / count` rows and the last band also takes the
/// remainder. `count` is clamped to `[1, height]`.
pub fn generate_bands(height: u32, count: usize) -> Vec<Band> {
    if height == 0 {
        return Vec::new();
    }

    let count = count.clamp(1, height as usize) as u32;
    let rows_per_band = height / count;

    (0..count)
        .map(|i| {
            let start_row = i * rows_per_band;
            let end_row = if i + 1 == count {
                height
            } else {
                start_row + rows_per_band
            };
            Band {
                start_row,
                end_row,
                index: i as usize,
            }
        })
        .collect()
}

/// Summary of a finished render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderStats {
    /// Wall-clock time spent rendering
    pub elapsed: Duration,
    /// Rows rendered
    pub rows: u32,
    /// Camera samples traced
    pub samples: u64,
    /// Number of row bands used
    pub bands: usize,
}

/// Shared row counter that reports progress as bands finish rows.
struct Progress {
    completed: AtomicUsize,
    total: usize,
    last_reported: Mutex<usize>,
}

impl Progress {
    fn new(total: usize) -> Self {
        Self {
            completed: AtomicUsize::new(0),
            total: total.max(1),
            last_reported: Mutex::new(0),
        }
    }

    fn row_done(&self, row: u32) {
        let done = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        log::trace!("Row {} finished ({}/{})", row, done, self.total);

        // Report every 10%
        let decile = done * 10 / self.total;
        let mut last = self
            .last_reported
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if decile > *last {
            *last = decile;
            log::info!("Rendering... {}%", decile * 10);
        }
    }
}

/// Render `scene` through `camera` into `framebuffer`.
///
/// Every pixel is written exactly once. If a band panics, the remaining bands
/// still finish and the first failure is returned.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
    framebuffer: &mut Texture,
) -> RenderResult<RenderStats> {
    settings.validate()?;

    let width = framebuffer.width();
    let height = framebuffer.height();
    let band_count = settings.bands.unwrap_or_else(rayon::current_num_threads);
    let bands = generate_bands(height, band_count);

    log::info!(
        "Rendering {}x{} at {} spp ({} bands, {})",
        width,
        height,
        settings.samples_per_pixel,
        bands.len(),
        if settings.multithreaded {
            "multithreaded"
        } else {
            "single-threaded"
        }
    );

    let start = Instant::now();
    run_bands(
        framebuffer,
        &bands,
        settings.multithreaded,
        settings.seed,
        |x, y, sampler| render_pixel(scene, camera, settings, x, y, width, height, sampler),
    )?;
    let elapsed = start.elapsed();

    log::info!("Render finished in {:.2?}", elapsed);

    Ok(RenderStats {
        elapsed,
        rows: height,
        samples: width as u64 * height as u64 * settings.samples_per_pixel as u64,
        bands: bands.len(),
    })
}

/// Average `samples_per_pixel` jittered samples for pixel `(x, y)`.
#[allow(clippy::too_many_arguments)]
pub fn render_pixel(
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    sampler: &mut Sampler,
) -> Color {
    let mut sum = Color::ZERO;

    for _ in 0..settings.samples_per_pixel {
        let u = (x as f32 + sampler.next_f32()) / width as f32;
        let v = (y as f32 + sampler.next_f32()) / height as f32;
        let ray = camera.generate_ray(u, v, sampler);
        sum += trace(&ray, scene, settings, sampler);
    }

    let mut color = sum / settings.samples_per_pixel as f32;
    if settings.gamma_correct {
        color = linear_to_gamma(color);
    }
    clamp_color(color)
}

/// Run `shade` for every pixel, one band per job.
fn run_bands<F>(
    framebuffer: &mut Texture,
    bands: &[Band],
    multithreaded: bool,
    seed: u64,
    shade: F,
) -> RenderResult<()>
where
    F: Fn(u32, u32, &mut Sampler) -> Color + Sync,
{
    let width = framebuffer.width();
    let progress = Progress::new(framebuffer.height() as usize);

    // Hand each band its own rows of the framebuffer
    let mut rest = framebuffer.pixels_mut();
    let mut jobs = Vec::with_capacity(bands.len());
    for band in bands {
        let len = band.rows() as usize * width as usize;
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(len);
        jobs.push((*band, head));
        rest = tail;
    }

    let run = |(band, pixels): (Band, &mut [Color])| -> RenderResult<()> {
        panic::catch_unwind(AssertUnwindSafe(|| {
            render_band(&band, pixels, width, seed, &shade, &progress)
        }))
        .map_err(|payload| {
            let message = panic_message(&*payload);
            log::error!(
                "Band {} (rows {}..{}) panicked: {}",
                band.index,
                band.start_row,
                band.end_row,
                message
            );
            RenderError::WorkerPanicked {
                start_row: band.start_row,
                end_row: band.end_row,
                message,
            }
        })
    };

    let results: Vec<RenderResult<()>> = if multithreaded {
        jobs.into_par_iter().map(run).collect()
    } else {
        jobs.into_iter().map(run).collect()
    };

    results.into_iter().collect()
}

fn render_band<F>(
    band: &Band,
    pixels: &mut [Color],
    width: u32,
    seed: u64,
    shade: &F,
    progress: &Progress,
) where
    F: Fn(u32, u32, &mut Sampler) -> Color,
{
    let mut sampler = Sampler::with_stream(seed, band.start_row as u64);

    for (row, y) in (band.start_row..band.end_row).enumerate() {
        let start = row * width as usize;
        let row_pixels = &mut pixels[start..start + width as usize];
        for (x, pixel) in row_pixels.iter_mut().enumerate() {
            *pixel = shade(x as u32, y, &mut sampler);
        }
        progress.row_done(y);
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
