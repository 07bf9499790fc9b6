use log::{debug, warn};
use crate::wave::compositor::Compositor;
use crate::wave::sampler::Sampler;
use crate::wave::style::WaveStyle;
use crate::wave::surface::Surface;
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Surface width or height is zero.
    InvalidGeometry,
    /// A drawing primitive failed part way through the frame.
    SurfaceError,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Drawn { extrema: usize },
    Skipped(SkipReason),
}
/// Per-frame entry point: samples the wave for the surface size and paints it.
///
/// Errors never escape a frame; a frame that cannot be drawn is skipped and
/// the next one starts from scratch.
pub struct WaveRenderer {
    sampler: Sampler,
    compositor: Compositor,
}
impl WaveRenderer {
    pub fn new(style: WaveStyle) -> Self {
        Self {
            sampler: Sampler::new(),
            compositor: Compositor::new(style),
        }
    }
    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }
    /// Called by the host when the surface size changed.
    pub fn notify_resize(&mut self) {
        self.sampler.invalidate();
    }
    pub fn render_frame<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        elapsed_ms: u64,
    ) -> FrameOutcome {
        let (width, height) = surface.size();
        let frame = match self.sampler.sample(elapsed_ms, width, height) {
            Ok(frame) => frame,
            Err(err) => {
                debug!("skipping frame at {elapsed_ms}ms: {err}");
                return FrameOutcome::Skipped(SkipReason::InvalidGeometry);
            }
        };
        match self.compositor.render(surface, &frame) {
            Ok(()) => FrameOutcome::Drawn {
                extrema: frame.extrema.len(),
            },
            Err(err) => {
                warn!("dropping frame at {elapsed_ms}ms: {err}");
                FrameOutcome::Skipped(SkipReason::SurfaceError)
            }
        }
    }
}
impl Default for WaveRenderer {
    fn default() -> Self {
        Self::new(WaveStyle::default())
    }
}
