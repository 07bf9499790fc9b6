use std::f64::consts::PI;
use log::debug;
use crate::wave::error::WaveError;
/// Number of gaps between sample points; the grid holds one more point than this.
pub const SAMPLING_SIZE: usize = 64;
/// Milliseconds per unit of phase. Phase wraps at 2, so one cycle is 1000ms.
const PHASE_DIVISOR_MS: u64 = 500;
const PHASE_PERIOD_MS: u64 = PHASE_DIVISOR_MS * 2;
/// Typical upper bound on extrema per frame; only a capacity hint.
const EXTREMA_HINT: usize = 9;
/// `(elapsed / 500) mod 2`, computed on the integer clock so that frames one
/// period apart produce bit-identical phases.
pub fn phase_at(elapsed_ms: u64) -> f64 {
    (elapsed_ms % PHASE_PERIOD_MS) as f64 / PHASE_DIVISOR_MS as f64
}
/// Damped sine evaluated at `x_norm` in [-2, 2].
///
/// The damping factor `(4 / (4 + x^4))^2.5` is 1 at the center and falls to
/// about 0.018 at the domain edges, so the product never exceeds 1 in magnitude.
pub fn wave_value(x_norm: f64, phase: f64) -> f64 {
    let sin_term = (0.75 * PI * x_norm - phase * PI).sin();
    let damping = (4.0 / (4.0 + x_norm.powi(4))).powf(2.5);
    damping * sin_term
}
/// Values derived from the surface size, cached until the size changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMetrics {
    pub width: u32,
    pub height: u32,
    pub center_height: f32,
    pub amplitude: f32,
}
impl SurfaceMetrics {
    /// Widths below 8 give a zero amplitude, a flat wave with no crest, so
    /// they are rejected along with empty surfaces.
    pub fn new(width: u32, height: u32) -> Result<Self, WaveError> {
        if width >> 3 == 0 || height == 0 {
            return Err(WaveError::InvalidGeometry { width, height });
        }
        Ok(Self {
            width,
            height,
            center_height: (height >> 1) as f32,
            amplitude: (width >> 3) as f32,
        })
    }
}
/// Evenly spaced sample positions across the surface width.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleGrid {
    xs: Vec<f32>,
    /// `xs` mapped onto [-2, 2].
    map_x: Vec<f64>,
}
impl SampleGrid {
    pub fn new(width: u32) -> Self {
        let width_f = width as f32;
        let gap = width_f / SAMPLING_SIZE as f32;
        let xs: Vec<f32> = (0..=SAMPLING_SIZE)
            .map(|i| if i == SAMPLING_SIZE { width_f } else { i as f32 * gap })
            .collect();
        let map_x = xs
            .iter()
            .map(|&x| (x as f64 / width as f64) * 4.0 - 2.0)
            .collect();
        Self { xs, map_x }
    }
    pub fn len(&self) -> usize {
        self.xs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
    pub fn xs(&self) -> &[f32] {
        &self.xs
    }
    pub fn map_x(&self) -> &[f64] {
        &self.map_x
    }
}
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvePoint {
    pub x: f32,
    pub y: f32,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtremumKind {
    /// Local minimum of |y|; amplitude is always zero.
    Crossing,
    /// Local maximum of |y|; amplitude keeps the sign of y.
    Crest,
}
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extremum {
    pub x: f32,
    pub amplitude: f32,
    pub kind: ExtremumKind,
}
impl Extremum {
    fn crossing(x: f32) -> Self {
        Self {
            x,
            amplitude: 0.0,
            kind: ExtremumKind::Crossing,
        }
    }
    fn crest(x: f32, amplitude: f32) -> Self {
        Self {
            x,
            amplitude,
            kind: ExtremumKind::Crest,
        }
    }
}
/// Geometry for a single frame. Nothing here outlives the frame.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveFrame {
    pub metrics: SurfaceMetrics,
    pub phase: f64,
    pub upper: Vec<CurvePoint>,
    pub lower: Vec<CurvePoint>,
    pub center: Vec<CurvePoint>,
    pub extrema: Vec<Extremum>,
}
struct GridCache {
    metrics: SurfaceMetrics,
    grid: SampleGrid,
}
/// Samples the damped sine for each frame, caching the grid per surface size.
#[derive(Default)]
pub struct Sampler {
    cache: Option<GridCache>,
}
impl Sampler {
    pub fn new() -> Self {
        Self::default()
    }
    /// Drops the cached grid; the next `sample` call rebuilds it.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }
    pub fn metrics(&self) -> Option<SurfaceMetrics> {
        self.cache.as_ref().map(|c| c.metrics)
    }
    pub fn grid(&self) -> Option<&SampleGrid> {
        self.cache.as_ref().map(|c| &c.grid)
    }
    pub fn sample(
        &mut self,
        elapsed_ms: u64,
        width: u32,
        height: u32,
    ) -> Result<WaveFrame, WaveError> {
        let cache = self.ensure_grid(width, height)?;
        let metrics = cache.metrics;
        let grid = &cache.grid;
        let phase = phase_at(elapsed_ms);
        let last = grid.len() - 1;
        let ys: Vec<f32> = grid
            .map_x()
            .iter()
            .enumerate()
            .map(|(i, &x_norm)| {
                if i == 0 || i == last {
                    0.0
                } else {
                    (metrics.amplitude as f64 * wave_value(x_norm, phase)) as f32
                }
            })
            .collect();
        let baseline = metrics.center_height;
        let curve = |offset: fn(f32) -> f32| -> Vec<CurvePoint> {
            grid.xs()
                .iter()
                .zip(&ys)
                .map(|(&x, &y)| CurvePoint {
                    x,
                    y: baseline + offset(y),
                })
                .collect()
        };
        Ok(WaveFrame {
            metrics,
            phase,
            upper: curve(|y| y),
            lower: curve(|y| -y),
            center: curve(|y| y / 5.0),
            extrema: classify_extrema(grid.xs(), &ys),
        })
    }
    fn ensure_grid(&mut self, width: u32, height: u32) -> Result<&GridCache, WaveError> {
        let stale = self
            .cache
            .as_ref()
            .map_or(true, |c| c.metrics.width != width || c.metrics.height != height);
        if stale {
            let metrics = SurfaceMetrics::new(width, height)?;
            debug!(
                "deriving sample grid for {width}x{height} (center {}, amplitude {})",
                metrics.center_height, metrics.amplitude
            );
            self.cache = Some(GridCache {
                metrics,
                grid: SampleGrid::new(width),
            });
        }
        self.cache
            .as_ref()
            .ok_or(WaveError::InvalidGeometry { width, height })
    }
}
#[derive(Clone, Copy, PartialEq, Eq)]
enum Awaiting {
    Crest,
    Crossing,
}
/// Single left-to-right pass picking out crests and crossings.
///
/// Which test applies depends on the kind recorded last, so the kinds
/// alternate. The first and last samples are always crossings, and the
/// neighbour beyond either end counts as zero.
fn classify_extrema(xs: &[f32], ys: &[f32]) -> Vec<Extremum> {
    let last = ys.len().saturating_sub(1);
    let mut extrema = Vec::with_capacity(EXTREMA_HINT);
    let mut state = Awaiting::Crest;
    for (i, (&x, &y)) in xs.iter().zip(ys).enumerate() {
        let prev = if i == 0 { 0.0 } else { ys[i - 1].abs() };
        let next = ys.get(i + 1).map_or(0.0, |v| v.abs());
        let cur = y.abs();
        state = match state {
            _ if i == 0 || i == last => {
                extrema.push(Extremum::crossing(x));
                Awaiting::Crest
            }
            Awaiting::Crossing if cur < prev && cur < next => {
                extrema.push(Extremum::crossing(x));
                Awaiting::Crest
            }
            Awaiting::Crest if cur > prev && cur > next => {
                extrema.push(Extremum::crest(x, y));
                Awaiting::Crossing
            }
            unchanged => unchanged,
        };
    }
    extrema
}
