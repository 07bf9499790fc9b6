/// Straight (non-premultiplied) RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}
impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const RED: Rgba = Rgba::rgb(255, 0, 0);
    pub const GREEN: Rgba = Rgba::rgb(0, 255, 0);
    pub const BLUE: Rgba = Rgba::rgb(0, 0, 255);
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
    /// Linear interpolation between two colors, `t` clamped to [0, 1].
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgba::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
    pub fn alpha_f32(self) -> f32 {
        self.a as f32 / 255.0
    }
}
/// Colors and stroke widths used to paint one frame.
#[derive(Clone, Debug)]
pub struct WaveStyle {
    pub background: Rgba,
    /// Solid fill of the upper/lower wave regions inside the isolated layer.
    pub wave_fill: Rgba,
    /// Gradient color at `center + crest`.
    pub gradient_start: Rgba,
    /// Gradient color at `center - crest`.
    pub gradient_end: Rgba,
    pub upper_stroke: Rgba,
    pub lower_stroke: Rgba,
    pub center_stroke: Rgba,
    pub upper_stroke_width: f32,
    pub lower_stroke_width: f32,
    pub center_stroke_width: f32,
}
impl Default for WaveStyle {
    fn default() -> Self {
        Self {
            background: Rgba::rgb(24, 33, 41),
            wave_fill: Rgba::WHITE,
            gradient_start: Rgba::BLUE,
            gradient_end: Rgba::GREEN,
            upper_stroke: Rgba::RED,
            lower_stroke: Rgba::GREEN,
            center_stroke: Rgba::new(255, 255, 255, 64),
            upper_stroke_width: 3.0,
            lower_stroke_width: 3.0,
            center_stroke_width: 3.0,
        }
    }
}
