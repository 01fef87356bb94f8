//! Recording surface and image registry for draw tests.

use geom::{Point, Rect, Size};

use crate::error::{Error, Result};
use crate::painter::Color;
use crate::runtime::{ImageHandle, ImageRegistry, Surface};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Scissor change.
    Clip(Option<Rect>),
    /// Filled rectangle.
    FillRect {
        /// The rectangle.
        rect: Rect,
        /// The fill color.
        color: Color,
    },
    /// Stroked rectangle outline.
    StrokeRect {
        /// The rectangle.
        rect: Rect,
        /// Stroke width.
        width: f64,
        /// Stroke color.
        color: Color,
    },
    /// Stroked line segment.
    StrokeLine {
        /// Segment start.
        from: Point,
        /// Segment end.
        to: Point,
        /// Stroke width.
        width: f64,
        /// Stroke color.
        color: Color,
    },
    /// Image composite.
    Image {
        /// The image.
        image: ImageHandle,
        /// Source rectangle within the image.
        src: Rect,
        /// Destination rectangle in app coordinates.
        dst: Rect,
        /// Color tint.
        tint: Color,
    },
}

/// A [`Surface`] that records every draw call for inspection.
#[derive(Debug, Default)]
pub struct TestSurface {
    /// Every call, in order.
    pub ops: Vec<DrawOp>,
}

impl TestSurface {
    /// An empty recording surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the recorded calls.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// The recorded rectangle fills, in order.
    pub fn fills(&self) -> Vec<(Rect, Color)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    /// The scissor in effect for each recorded fill, in order.
    pub fn clipped_fills(&self) -> Vec<(Option<Rect>, Rect, Color)> {
        let mut clip = None;
        let mut out = Vec::new();
        for op in &self.ops {
            match op {
                DrawOp::Clip(c) => clip = *c,
                DrawOp::FillRect { rect, color } => out.push((clip, *rect, *color)),
                _ => {}
            }
        }
        out
    }
}

impl Surface for TestSurface {
    fn set_clip(&mut self, clip: Option<Rect>) {
        self.ops.push(DrawOp::Clip(clip));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Color) {
        self.ops.push(DrawOp::StrokeRect { rect, width, color });
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color) {
        self.ops.push(DrawOp::StrokeLine {
            from,
            to,
            width,
            color,
        });
    }

    fn draw_image(&mut self, image: ImageHandle, src: Rect, dst: Rect, tint: Color) {
        self.ops.push(DrawOp::Image {
            image,
            src,
            dst,
            tint,
        });
    }
}

/// An [`ImageRegistry`] over a fixed name/size table.
#[derive(Debug, Default)]
pub struct TestImages {
    /// Registered images; the handle is the index.
    entries: Vec<(String, Size)>,
}

impl TestImages {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image and return its handle.
    pub fn add(&mut self, name: &str, size: Size) -> ImageHandle {
        self.entries.push((name.to_string(), size));
        ImageHandle(self.entries.len() as u64 - 1)
    }
}

impl ImageRegistry for TestImages {
    fn load(&mut self, name: &str) -> Result<ImageHandle> {
        self.entries
            .iter()
            .position(|(n, _)| n == name)
            .map(|index| ImageHandle(index as u64))
            .ok_or_else(|| Error::Resource(format!("unknown image {name:?}")))
    }

    fn size(&self, image: ImageHandle) -> Size {
        self.entries
            .get(image.0 as usize)
            .map_or(Size::ZERO, |(_, size)| *size)
    }
}
