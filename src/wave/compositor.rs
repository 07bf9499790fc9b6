use crate::wave::error::WaveError;
use crate::wave::sampler::{Extremum, WaveFrame};
use crate::wave::style::WaveStyle;
use crate::wave::surface::{with_isolated_layer, Rect, Surface, VerticalGradient, WavePath};
/// Gradient rectangle spanning one crest, bounded by the crossings on either side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientBand {
    pub rect: Rect,
    /// `center + crest`, where the gradient starts.
    pub crest_y: f32,
    /// `center - crest`, the mirrored crest on the other curve.
    pub mirror_y: f32,
}
impl GradientBand {
    pub fn gradient(&self, style: &WaveStyle) -> VerticalGradient {
        VerticalGradient {
            y_start: self.crest_y,
            y_end: self.mirror_y,
            start: style.gradient_start,
            end: style.gradient_end,
        }
    }
}
/// One band per (crossing, crest, crossing) triple: entries `i - 2` and `i`
/// bound the band horizontally and the crest at `i - 1` sets its height.
pub fn gradient_bands(extrema: &[Extremum], center_height: f32) -> Vec<GradientBand> {
    (2..extrema.len())
        .step_by(2)
        .map(|i| {
            let crest = extrema[i - 1].amplitude;
            let crest_y = center_height + crest;
            let mirror_y = center_height - crest;
            GradientBand {
                rect: Rect::from_corners(extrema[i - 2].x, crest_y, extrema[i].x, mirror_y),
                crest_y,
                mirror_y,
            }
        })
        .collect()
}
/// Paints a sampled frame: solid wave fill, masked gradient, then outlines.
pub struct Compositor {
    style: WaveStyle,
}
impl Compositor {
    pub fn new(style: WaveStyle) -> Self {
        Self { style }
    }
    pub fn style(&self) -> &WaveStyle {
        &self.style
    }
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        frame: &WaveFrame,
    ) -> Result<(), WaveError> {
        let style = &self.style;
        let metrics = frame.metrics;
        let width = metrics.width as f32;
        let baseline = metrics.center_height;
        surface.clear(style.background)?;
        let upper = WavePath::closed_to_baseline(&frame.upper, baseline, width);
        let lower = WavePath::closed_to_baseline(&frame.lower, baseline, width);
        let center = WavePath::closed_to_baseline(&frame.center, baseline, width);
        let bounds = Rect::from_size(width, metrics.height as f32);
        with_isolated_layer(surface, bounds, |layer| {
            layer.fill_path(&upper, style.wave_fill)?;
            layer.fill_path(&lower, style.wave_fill)?;
            // Gradients only survive where the wave fill is already opaque.
            layer.set_masked_compositing(true);
            for band in gradient_bands(&frame.extrema, baseline) {
                if band.rect.is_empty() {
                    continue;
                }
                layer.fill_rect_with_vertical_gradient(band.rect, band.gradient(style))?;
            }
            layer.set_masked_compositing(false);
            Ok(())
        })?;
        surface.stroke_path(&upper, style.upper_stroke, style.upper_stroke_width)?;
        surface.stroke_path(&lower, style.lower_stroke, style.lower_stroke_width)?;
        surface.stroke_path(&center, style.center_stroke, style.center_stroke_width)?;
        Ok(())
    }
}
impl Default for Compositor {
    fn default() -> Self {
        Self::new(WaveStyle::default())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::sampler::{ExtremumKind, Sampler};
    use crate::wave::surface::recording::{DrawCall, RecordingSurface};
    fn crossing(x: f32) -> Extremum {
        Extremum {
            x,
            amplitude: 0.0,
            kind: ExtremumKind::Crossing,
        }
    }
    fn crest(x: f32, amplitude: f32) -> Extremum {
        Extremum {
            x,
            amplitude,
            kind: ExtremumKind::Crest,
        }
    }
    #[test]
    fn bands_pair_crossings_around_each_crest() {
        let extrema = [
            crossing(0.0),
            crest(50.0, 30.0),
            crossing(100.0),
            crest(150.0, -20.0),
            crossing(200.0),
        ];
        let bands = gradient_bands(&extrema, 240.0);
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].rect, Rect::from_corners(0.0, 210.0, 100.0, 270.0));
        assert_eq!(bands[0].crest_y, 270.0);
        assert_eq!(bands[0].mirror_y, 210.0);
        assert_eq!(bands[1].rect, Rect::from_corners(100.0, 220.0, 200.0, 260.0));
        assert_eq!(bands[1].crest_y, 220.0);
        assert_eq!(bands[1].mirror_y, 260.0);
    }
    #[test]
    fn too_few_extrema_produce_no_bands() {
        assert!(gradient_bands(&[], 10.0).is_empty());
        assert!(gradient_bands(&[crossing(0.0), crest(5.0, 1.0)], 10.0).is_empty());
    }
    #[test]
    fn gradient_orientation_follows_crest_sign() {
        let style = WaveStyle::default();
        let extrema = [crossing(0.0), crest(5.0, -8.0), crossing(10.0)];
        let band = gradient_bands(&extrema, 100.0)[0];
        let gradient = band.gradient(&style);
        assert_eq!(gradient.color_at(92.0), style.gradient_start);
        assert_eq!(gradient.color_at(108.0), style.gradient_end);
    }
    #[test]
    fn render_issues_calls_in_layer_order() {
        let frame = Sampler::new().sample(250, 640, 480).unwrap();
        let mut surface = RecordingSurface::new(640, 480);
        let compositor = Compositor::default();
        compositor.render(&mut surface, &frame).unwrap();
        let style = compositor.style();
        let calls = &surface.calls;
        assert_eq!(calls[0], DrawCall::Clear(style.background));
        assert_eq!(calls[1], DrawCall::BeginLayer(Rect::from_size(640.0, 480.0)));
        assert!(matches!(&calls[2], DrawCall::FillPath(_, c) if *c == style.wave_fill));
        assert!(matches!(&calls[3], DrawCall::FillPath(_, c) if *c == style.wave_fill));
        assert_eq!(calls[4], DrawCall::Masked(true));
        let gradients: Vec<_> = calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::GradientRect { masked, .. } => Some(*masked),
                _ => None,
            })
            .collect();
        assert_eq!(gradients.len(), (frame.extrema.len() - 1) / 2);
        assert!(gradients.iter().all(|masked| *masked));
        let end = calls.iter().position(|c| *c == DrawCall::EndLayer).unwrap();
        assert_eq!(calls[end - 1], DrawCall::Masked(false));
        let strokes: Vec<_> = calls[end + 1..]
            .iter()
            .map(|c| match c {
                DrawCall::StrokePath(_, color, width) => (*color, *width),
                other => panic!("unexpected call after layer: {other:?}"),
            })
            .collect();
        assert_eq!(
            strokes,
            vec![
                (style.upper_stroke, style.upper_stroke_width),
                (style.lower_stroke, style.lower_stroke_width),
                (style.center_stroke, style.center_stroke_width),
            ]
        );
        assert_eq!(surface.open_layers(), 0);
    }
    #[test]
    fn paths_start_and_end_on_baseline() {
        let frame = Sampler::new().sample(640, 320, 200).unwrap();
        let mut surface = RecordingSurface::new(320, 200);
        Compositor::default().render(&mut surface, &frame).unwrap();
        for call in &surface.calls {
            if let DrawCall::StrokePath(path, _, _) = call {
                let points = path.points();
                assert_eq!(points.len(), frame.upper.len() + 2);
                assert_eq!(points[0], (0.0, 100.0));
                assert_eq!(points[points.len() - 1], (320.0, 100.0));
            }
        }
    }
    #[test]
    fn failed_gradient_still_closes_layer() {
        let frame = Sampler::new().sample(100, 640, 480).unwrap();
        let mut surface = RecordingSurface::new(640, 480);
        surface.fail_gradients = true;
        let err = Compositor::default().render(&mut surface, &frame).unwrap_err();
        assert!(matches!(err, WaveError::Raster(_)));
        assert_eq!(surface.open_layers(), 0);
        assert!(!surface
            .calls
            .iter()
            .any(|c| matches!(c, DrawCall::StrokePath(..))));
    }
}
