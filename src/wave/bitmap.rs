use std::io::Cursor;
use image::{DynamicImage, ImageFormat, Rgba as Pixel, RgbaImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use crate::wave::compositor::Compositor;
use crate::wave::error::WaveError;
use crate::wave::sampler::Sampler;
use crate::wave::style::{Rgba, WaveStyle};
use crate::wave::surface::{LayerToken, Rect, Surface, VerticalGradient, WavePath};
/// Inclusive-exclusive pixel bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PixelBounds {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}
impl PixelBounds {
    fn clipped(rect: Rect, width: u32, height: u32) -> Self {
        let clamp = |v: f32, max: u32| v.round().clamp(0.0, max as f32) as u32;
        Self {
            x0: clamp(rect.left, width),
            y0: clamp(rect.top, height),
            x1: clamp(rect.right, width),
            y1: clamp(rect.bottom, height),
        }
    }
    fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}
struct Layer {
    pixels: RgbaImage,
    bounds: PixelBounds,
}
/// Software surface: shapes are rasterized by plotters into coverage masks,
/// then composited onto RGBA buffers here so layers keep real alpha.
pub struct BitmapSurface {
    base: RgbaImage,
    layers: Vec<Layer>,
    masked: bool,
}
impl BitmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, WaveError> {
        if width == 0 || height == 0 {
            return Err(WaveError::InvalidGeometry { width, height });
        }
        Ok(Self {
            base: RgbaImage::new(width, height),
            layers: Vec::new(),
            masked: false,
        })
    }
    /// Reallocates the pixel buffer when the size changes. Returns whether it did.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<bool, WaveError> {
        if (width, height) == self.base.dimensions() {
            return Ok(false);
        }
        *self = Self::new(width, height)?;
        Ok(true)
    }
    /// Flattened pixels of the base surface, straight RGBA.
    pub fn pixels(&self) -> &RgbaImage {
        &self.base
    }
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let Pixel([r, g, b, a]) = *self.base.get_pixel(x, y);
        Rgba::new(r, g, b, a)
    }
    pub fn open_layers(&self) -> usize {
        self.layers.len()
    }
    pub fn to_png(&self) -> Result<Vec<u8>, WaveError> {
        let mut output = Vec::new();
        let dynamic = DynamicImage::ImageRgba8(self.base.clone());
        dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
        Ok(output)
    }
    fn target_mut(&mut self) -> &mut RgbaImage {
        match self.layers.last_mut() {
            Some(layer) => &mut layer.pixels,
            None => &mut self.base,
        }
    }
    /// Draws white on black with plotters and reads back which pixels were hit.
    fn coverage(
        &self,
        draw: impl FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<(), WaveError>,
    ) -> Result<Vec<bool>, WaveError> {
        let (width, height) = self.size();
        let mut buffer = vec![0u8; rgb_buffer_len(width, height)];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            draw(&root)?;
            root.present()?;
        }
        Ok(buffer.chunks_exact(3).map(|px| px[0] > 0).collect())
    }
    fn paint(&mut self, coverage: &[bool], color_at: impl Fn(u32, u32) -> Rgba) {
        let masked = self.masked;
        let width = self.base.width() as usize;
        let target = self.target_mut();
        for (idx, _) in coverage.iter().enumerate().filter(|(_, hit)| **hit) {
            let (x, y) = ((idx % width) as u32, (idx / width) as u32);
            let dst = target.get_pixel_mut(x, y);
            *dst = blend(masked, *dst, color_at(x, y));
        }
    }
    /// Axis-aligned fill; walks only the pixels inside `bounds`.
    fn paint_rect(&mut self, bounds: PixelBounds, color_at: impl Fn(u32, u32) -> Rgba) {
        let masked = self.masked;
        let target = self.target_mut();
        for y in bounds.y0..bounds.y1 {
            for x in bounds.x0..bounds.x1 {
                let dst = target.get_pixel_mut(x, y);
                *dst = blend(masked, *dst, color_at(x, y));
            }
        }
    }
}
/// Byte length of an RGB buffer, computed in `usize` so large surfaces cannot
/// overflow `u32`.
fn rgb_buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}
fn blend(masked: bool, dst: Pixel<u8>, src: Rgba) -> Pixel<u8> {
    if masked {
        source_in(dst, src)
    } else {
        source_over(dst, src)
    }
}
fn to_backend(points: &[(f32, f32)]) -> Vec<(i32, i32)> {
    points
        .iter()
        .map(|&(x, y)| (x.round() as i32, y.round() as i32))
        .collect()
}
fn source_over(dst: Pixel<u8>, src: Rgba) -> Pixel<u8> {
    let sa = src.alpha_f32();
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Pixel([0, 0, 0, 0]);
    }
    let channel =
        |s: u8, d: u8| ((s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a).round() as u8;
    Pixel([
        channel(src.r, dst[0]),
        channel(src.g, dst[1]),
        channel(src.b, dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}
fn source_in(dst: Pixel<u8>, src: Rgba) -> Pixel<u8> {
    let alpha = src.alpha_f32() * (dst[3] as f32 / 255.0);
    Pixel([src.r, src.g, src.b, (alpha * 255.0).round() as u8])
}
impl Surface for BitmapSurface {
    fn size(&self) -> (u32, u32) {
        self.base.dimensions()
    }
    fn clear(&mut self, color: Rgba) -> Result<(), WaveError> {
        let target = self.target_mut();
        for pixel in target.pixels_mut() {
            *pixel = source_over(*pixel, color);
        }
        Ok(())
    }
    fn fill_path(&mut self, path: &WavePath, color: Rgba) -> Result<(), WaveError> {
        let points = to_backend(path.points());
        let coverage = self.coverage(|root| {
            root.draw(&Polygon::new(points, WHITE.filled()))?;
            Ok(())
        })?;
        self.paint(&coverage, |_, _| color);
        Ok(())
    }
    fn stroke_path(&mut self, path: &WavePath, color: Rgba, width: f32) -> Result<(), WaveError> {
        let points = to_backend(path.points());
        let stroke = width.round().max(1.0) as u32;
        let coverage = self.coverage(|root| {
            root.draw(&PathElement::new(points, WHITE.stroke_width(stroke)))?;
            Ok(())
        })?;
        self.paint(&coverage, |_, _| color);
        Ok(())
    }
    fn fill_rect_with_vertical_gradient(
        &mut self,
        rect: Rect,
        gradient: VerticalGradient,
    ) -> Result<(), WaveError> {
        let (width, height) = self.size();
        let bounds = PixelBounds::clipped(rect, width, height);
        self.paint_rect(bounds, |_, y| gradient.color_at(y as f32 + 0.5));
        Ok(())
    }
    fn begin_isolated_layer(&mut self, bounds: Rect) -> Result<LayerToken, WaveError> {
        let (width, height) = self.size();
        let token = LayerToken(self.layers.len());
        self.layers.push(Layer {
            pixels: RgbaImage::new(width, height),
            bounds: PixelBounds::clipped(bounds, width, height),
        });
        Ok(token)
    }
    fn end_isolated_layer(&mut self, token: LayerToken) -> Result<(), WaveError> {
        if token.0 >= self.layers.len() {
            return Err(WaveError::LayerMismatch {
                expected: token.0 + 1,
                actual: self.layers.len(),
            });
        }
        while self.layers.len() > token.0 {
            let Some(layer) = self.layers.pop() else {
                break;
            };
            let target = self.target_mut();
            for (x, y, src) in layer.pixels.enumerate_pixels() {
                if src[3] == 0 || !layer.bounds.contains(x, y) {
                    continue;
                }
                let dst = target.get_pixel_mut(x, y);
                *dst = source_over(*dst, Rgba::new(src[0], src[1], src[2], src[3]));
            }
        }
        self.masked = false;
        Ok(())
    }
    fn set_masked_compositing(&mut self, enabled: bool) {
        self.masked = enabled;
    }
}
/// Renders the frame at `elapsed_ms` offscreen and encodes it as PNG.
pub fn render_frame_png(
    elapsed_ms: u64,
    width: u32,
    height: u32,
    style: &WaveStyle,
) -> Result<Vec<u8>, WaveError> {
    let mut surface = BitmapSurface::new(width, height)?;
    let frame = Sampler::new().sample(elapsed_ms, width, height)?;
    Compositor::new(style.clone()).render(&mut surface, &frame)?;
    surface.to_png()
}
