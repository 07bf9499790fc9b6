// src/wave/mod.rs
pub mod bitmap;
pub mod compositor;
pub mod error;
pub mod renderer;
pub mod sampler;
pub mod style;
pub mod surface;
pub use bitmap::{render_frame_png, BitmapSurface};
pub use compositor::{gradient_bands, Compositor, GradientBand};
pub use error::WaveError;
pub use renderer::{FrameOutcome, SkipReason, WaveRenderer};
pub use sampler::{
    phase_at, wave_value, CurvePoint, Extremum, ExtremumKind, SampleGrid, Sampler,
    SurfaceMetrics, WaveFrame, SAMPLING_SIZE,
};
pub use style::{Rgba, WaveStyle};
pub use surface::{with_isolated_layer, LayerToken, Rect, Surface, VerticalGradient, WavePath};
