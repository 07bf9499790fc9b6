use crate::wave::error::WaveError;
use crate::wave::sampler::CurvePoint;
use crate::wave::style::Rgba;
/// Ordered polyline with explicit start and end points.
#[derive(Clone, Debug, PartialEq)]
pub struct WavePath {
    points: Vec<(f32, f32)>,
}
impl WavePath {
    pub fn new(points: Vec<(f32, f32)>) -> Self {
        Self { points }
    }
    /// Curve points bracketed by `(0, baseline)` and `(width, baseline)`, so the
    /// outline always starts and ends on the baseline whatever the samples say.
    pub fn closed_to_baseline(curve: &[CurvePoint], baseline: f32, width: f32) -> Self {
        let mut points = Vec::with_capacity(curve.len() + 2);
        points.push((0.0, baseline));
        points.extend(curve.iter().map(|p| (p.x, p.y)));
        points.push((width, baseline));
        Self { points }
    }
    pub fn points(&self) -> &[(f32, f32)] {
        &self.points
    }
}
/// Axis-aligned rectangle with `left <= right` and `top <= bottom`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}
impl Rect {
    /// Builds a rectangle from two opposite corners given in any order.
    pub fn from_corners(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            left: x0.min(x1),
            top: y0.min(y1),
            right: x0.max(x1),
            bottom: y0.max(y1),
        }
    }
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::from_corners(0.0, 0.0, width, height)
    }
    pub fn width(&self) -> f32 {
        self.right - self.left
    }
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}
/// Two-stop gradient along the y axis, clamped beyond the stops.
///
/// `y_start` may lie below `y_end`; the orientation follows the stops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalGradient {
    pub y_start: f32,
    pub y_end: f32,
    pub start: Rgba,
    pub end: Rgba,
}
impl VerticalGradient {
    pub fn color_at(&self, y: f32) -> Rgba {
        let span = self.y_end - self.y_start;
        if span == 0.0 {
            return self.start;
        }
        self.start.lerp(self.end, (y - self.y_start) / span)
    }
}
/// Handle for an open isolated layer; ending it flattens every layer opened
/// at or after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerToken(pub(crate) usize);
/// Drawing primitives a host surface must provide.
pub trait Surface {
    /// Pixel size of the surface.
    fn size(&self) -> (u32, u32);
    fn clear(&mut self, color: Rgba) -> Result<(), WaveError>;
    fn fill_path(&mut self, path: &WavePath, color: Rgba) -> Result<(), WaveError>;
    fn stroke_path(&mut self, path: &WavePath, color: Rgba, width: f32) -> Result<(), WaveError>;
    fn fill_rect_with_vertical_gradient(
        &mut self,
        rect: Rect,
        gradient: VerticalGradient,
    ) -> Result<(), WaveError>;
    fn begin_isolated_layer(&mut self, bounds: Rect) -> Result<LayerToken, WaveError>;
    /// Flattens the layer back onto its parent and turns masked compositing off.
    fn end_isolated_layer(&mut self, token: LayerToken) -> Result<(), WaveError>;
    /// While enabled, fills only land where the active layer is already opaque
    /// ("source-in").
    fn set_masked_compositing(&mut self, enabled: bool);
}
/// Runs `draw` inside an isolated layer. The layer is flattened even when
/// `draw` fails; the draw error wins over a flattening error.
pub fn with_isolated_layer<S, T>(
    surface: &mut S,
    bounds: Rect,
    draw: impl FnOnce(&mut S) -> Result<T, WaveError>,
) -> Result<T, WaveError>
where
    S: Surface + ?Sized,
{
    let token = surface.begin_isolated_layer(bounds)?;
    let result = draw(surface);
    let flattened = surface.end_isolated_layer(token);
    let value = result?;
    flattened?;
    Ok(value)
}
#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    #[derive(Clone, Debug, PartialEq)]
    pub enum DrawCall {
        Clear(Rgba),
        FillPath(WavePath, Rgba),
        StrokePath(WavePath, Rgba, f32),
        GradientRect {
            rect: Rect,
            gradient: VerticalGradient,
            masked: bool,
        },
        BeginLayer(Rect),
        EndLayer,
        Masked(bool),
    }
    /// Records every call; optionally fails gradient fills to exercise error paths.
    pub struct RecordingSurface {
        pub width: u32,
        pub height: u32,
        pub calls: Vec<DrawCall>,
        pub fail_gradients: bool,
        depth: usize,
        masked: bool,
    }
    impl RecordingSurface {
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                calls: Vec::new(),
                fail_gradients: false,
                depth: 0,
                masked: false,
            }
        }
        pub fn open_layers(&self) -> usize {
            self.depth
        }
    }
    impl Surface for RecordingSurface {
        fn size(&self) -> (u32, u32) {
            (self.width, self.height)
        }
        fn clear(&mut self, color: Rgba) -> Result<(), WaveError> {
            self.calls.push(DrawCall::Clear(color));
            Ok(())
        }
        fn fill_path(&mut self, path: &WavePath, color: Rgba) -> Result<(), WaveError> {
            self.calls.push(DrawCall::FillPath(path.clone(), color));
            Ok(())
        }
        fn stroke_path(&mut self, path: &WavePath, color: Rgba, width: f32) -> Result<(), WaveError> {
            self.calls.push(DrawCall::StrokePath(path.clone(), color, width));
            Ok(())
        }
        fn fill_rect_with_vertical_gradient(
            &mut self,
            rect: Rect,
            gradient: VerticalGradient,
        ) -> Result<(), WaveError> {
            if self.fail_gradients {
                return Err(WaveError::Raster("gradient rejected".into()));
            }
            self.calls.push(DrawCall::GradientRect {
                rect,
                gradient,
                masked: self.masked,
            });
            Ok(())
        }
        fn begin_isolated_layer(&mut self, bounds: Rect) -> Result<LayerToken, WaveError> {
            self.calls.push(DrawCall::BeginLayer(bounds));
            self.depth += 1;
            Ok(LayerToken(self.depth - 1))
        }
        fn end_isolated_layer(&mut self, token: LayerToken) -> Result<(), WaveError> {
            if token.0 >= self.depth {
                return Err(WaveError::LayerMismatch {
                    expected: token.0 + 1,
                    actual: self.depth,
                });
            }
            self.calls.push(DrawCall::EndLayer);
            self.depth = token.0;
            self.masked = false;
            Ok(())
        }
        fn set_masked_compositing(&mut self, enabled: bool) {
            self.masked = enabled;
            self.calls.push(DrawCall::Masked(enabled));
        }
    }
}
#[cfg(test)]
mod tests {
    use super::recording::{DrawCall, RecordingSurface};
    use super::*;
    #[test]
    fn baseline_path_brackets_curve() {
        let curve = [
            CurvePoint { x: 0.0, y: 12.0 },
            CurvePoint { x: 5.0, y: 3.0 },
            CurvePoint { x: 10.0, y: 7.0 },
        ];
        let path = WavePath::closed_to_baseline(&curve, 5.0, 10.0);
        assert_eq!(
            path.points(),
            &[(0.0, 5.0), (0.0, 12.0), (5.0, 3.0), (10.0, 7.0), (10.0, 5.0)]
        );
    }
    #[test]
    fn rect_normalizes_corners() {
        let rect = Rect::from_corners(10.0, 80.0, 2.0, 20.0);
        assert_eq!(rect.left, 2.0);
        assert_eq!(rect.right, 10.0);
        assert_eq!(rect.top, 20.0);
        assert_eq!(rect.bottom, 80.0);
        assert!(!rect.is_empty());
        assert!(Rect::from_corners(1.0, 5.0, 4.0, 5.0).is_empty());
    }
    #[test]
    fn gradient_follows_stop_order_and_clamps() {
        let down = VerticalGradient {
            y_start: 100.0,
            y_end: 200.0,
            start: Rgba::BLUE,
            end: Rgba::GREEN,
        };
        let up = VerticalGradient {
            y_start: 200.0,
            y_end: 100.0,
            ..down
        };
        assert_eq!(down.color_at(100.0), Rgba::BLUE);
        assert_eq!(down.color_at(250.0), Rgba::GREEN);
        assert_eq!(up.color_at(200.0), Rgba::BLUE);
        assert_eq!(up.color_at(50.0), Rgba::GREEN);
        let flat = VerticalGradient {
            y_end: 100.0,
            ..down
        };
        assert_eq!(flat.color_at(120.0), Rgba::BLUE);
    }
    #[test]
    fn scoped_layer_is_flattened_when_drawing_fails() {
        let mut surface = RecordingSurface::new(10, 10);
        let result: Result<(), WaveError> =
            with_isolated_layer(&mut surface, Rect::from_size(10.0, 10.0), |s| {
                s.set_masked_compositing(true);
                Err(WaveError::Raster("boom".into()))
            });
        assert!(matches!(result, Err(WaveError::Raster(_))));
        assert_eq!(surface.open_layers(), 0);
        assert_eq!(surface.calls.last(), Some(&DrawCall::EndLayer));
    }
}
