//! Draw facade handed to widgets.
//!
//! [`Painter`] wraps the runtime [`Surface`] for the duration of one
//! widget's draw: it owns the widget's scissor rectangle and the effective
//! opacity (the product of `1 − transparency` along the ancestor chain), so
//! widget draw code works in plain app coordinates and full-alpha colors.

use geom::{Point, Rect};

use crate::runtime::{ImageHandle, Surface};

/// An RGBA color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component.
    pub a: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// An opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// A color with explicit alpha.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// This color with its alpha scaled by `factor`.
    pub fn with_alpha_scaled(self, factor: f32) -> Self {
        Self {
            a: self.a * factor,
            ..self
        }
    }
}

/// Scissored, opacity-modulated draw access for one widget.
pub struct Painter<'a> {
    /// The runtime surface draw calls forward to.
    surface: &'a mut dyn Surface,
    /// The widget's visible bounds intersected with the dirty region.
    clip: Rect,
    /// Effective opacity applied to every color.
    alpha: f32,
}

impl<'a> Painter<'a> {
    /// Scissor `surface` to `clip` and modulate colors by `alpha`.
    pub(crate) fn new(surface: &'a mut dyn Surface, clip: Rect, alpha: f32) -> Self {
        surface.set_clip(Some(clip));
        Self {
            surface,
            clip,
            alpha,
        }
    }

    /// The scissor rectangle draw calls are clipped to.
    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// The opacity modulation applied to every color.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Fill a rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.surface
            .fill_rect(rect, color.with_alpha_scaled(self.alpha));
    }

    /// Stroke a rectangle outline.
    pub fn stroke_rect(&mut self, rect: Rect, width: f64, color: Color) {
        self.surface
            .stroke_rect(rect, width, color.with_alpha_scaled(self.alpha));
    }

    /// Stroke a line segment.
    pub fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color) {
        self.surface
            .stroke_line(from, to, width, color.with_alpha_scaled(self.alpha));
    }

    /// Composite `src` of `image` into `dst` with a tint.
    pub fn draw_image(&mut self, image: ImageHandle, src: Rect, dst: Rect, tint: Color) {
        self.surface
            .draw_image(image, src, dst, tint.with_alpha_scaled(self.alpha));
    }
}

impl Drop for Painter<'_> {
    fn drop(&mut self) {
        self.surface.set_clip(None);
    }
}
