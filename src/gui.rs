// src/gui.rs
use std::time::Instant;
use eframe::egui;
use egui::{pos2, Color32, ColorImage, Rect, TextureHandle, TextureOptions};
use log::debug;
use waveview::{BitmapSurface, FrameOutcome, WaveRenderer, WaveStyle};
/// Hosts the waveform in the central panel and redraws it every frame.
pub struct WaveViewApp {
    started: Instant,
    renderer: WaveRenderer,
    surface: Option<BitmapSurface>,
    texture: Option<TextureHandle>,
    dropped_frames: u64,
}
impl WaveViewApp {
    pub fn new(style: WaveStyle) -> Self {
        Self {
            started: Instant::now(),
            renderer: WaveRenderer::new(style),
            surface: None,
            texture: None,
            dropped_frames: 0,
        }
    }
    /// Renders into the offscreen surface, resizing it first if the panel changed.
    fn draw_frame(&mut self, width: u32, height: u32, elapsed_ms: u64) -> Option<ColorImage> {
        if width == 0 || height == 0 {
            return None;
        }
        if self.surface.is_none() {
            self.surface = Some(BitmapSurface::new(width, height).ok()?);
        }
        let surface = self.surface.as_mut()?;
        match surface.resize(width, height) {
            Ok(true) => {
                debug!("surface resized to {width}x{height}");
                self.renderer.notify_resize();
            }
            Ok(false) => {}
            Err(err) => {
                debug!("cannot resize surface: {err}");
                return None;
            }
        }
        match self.renderer.render_frame(surface, elapsed_ms) {
            FrameOutcome::Drawn { .. } => {
                let pixels = surface.pixels();
                Some(ColorImage::from_rgba_unmultiplied(
                    [width as usize, height as usize],
                    pixels.as_raw(),
                ))
            }
            FrameOutcome::Skipped(reason) => {
                self.dropped_frames += 1;
                debug!("frame skipped ({reason:?}), {} dropped so far", self.dropped_frames);
                None
            }
        }
    }
}
impl eframe::App for WaveViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let size = ui.available_size();
                let ppp = ui.ctx().pixels_per_point();
                let width = (size.x * ppp).round().max(0.0) as u32;
                let height = (size.y * ppp).round().max(0.0) as u32;
                let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
                if let Some(image) = self.draw_frame(width, height, elapsed_ms) {
                    match &mut self.texture {
                        Some(texture) => texture.set(image, TextureOptions::LINEAR),
                        None => {
                            self.texture = Some(ui.ctx().load_texture(
                                "waveview-frame",
                                image,
                                TextureOptions::LINEAR,
                            ))
                        }
                    }
                }
                // A skipped frame leaves the previous one on screen.
                if let Some(texture) = &self.texture {
                    painter.image(
                        texture.id(),
                        response.rect,
                        Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                        Color32::WHITE,
                    );
                }
            });
        ctx.request_repaint();
    }
}
