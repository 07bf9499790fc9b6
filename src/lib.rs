pub mod wave;
pub use wave::{
    render_frame_png, BitmapSurface, Compositor, FrameOutcome, Sampler, Surface, WaveError,
    WaveFrame, WaveRenderer, WaveStyle,
};
