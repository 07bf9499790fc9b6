use thiserror::Error;
#[derive(Debug, Error)]
pub enum WaveError {
    #[error("surface must have a non-zero size, got {width}x{height}")]
    InvalidGeometry { width: u32, height: u32 },
    #[error("layer mismatch: expected depth {expected}, got {actual}")]
    LayerMismatch { expected: usize, actual: usize },
    #[error("failed to rasterize: {0}")]
    Raster(String),
    #[error("failed to encode frame: {0}")]
    Encode(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for WaveError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        WaveError::Raster(format!("{value:?}"))
    }
}
impl From<image::ImageError> for WaveError {
    fn from(value: image::ImageError) -> Self {
        WaveError::Encode(value.to_string())
    }
}
