//! Image-to-square placement strategies.
//!
//! Every strategy answers the same question: which rectangle of the source raster (`src`, in
//! raster pixels) lands on which rectangle of the square output (`dst`, in output pixels).
//! Which strategy applies to which layer is fixed by the plan compiler.

use crate::foundation::core::{Affine, Rect, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
/// Source crop and destination rectangle for one raster draw.
pub struct Placement {
    pub src: Rect,
    pub dst: Rect,
}

impl Placement {
    /// Nothing visible would be drawn.
    pub fn is_empty(&self) -> bool {
        self.src.width() <= 0.0
            || self.src.height() <= 0.0
            || self.dst.width() <= 0.0
            || self.dst.height() <= 0.0
    }

    /// Affine mapping raster pixel space onto output space.
    ///
    /// Only meaningful when [`Placement::is_empty`] is false.
    pub fn to_affine(self) -> Affine {
        let sx = self.dst.width() / self.src.width();
        let sy = self.dst.height() / self.src.height();
        Affine::translate(Vec2::new(self.dst.x0, self.dst.y0))
            * Affine::scale_non_uniform(sx, sy)
            * Affine::translate(Vec2::new(-self.src.x0, -self.src.y0))
    }
}

/// Aspect-preserving centered placement.
///
/// The larger raster dimension is scaled to `target_size`, the result is centered in the
/// `output_size` square and then displaced by `offset`. A zero-sized raster yields a
/// zero-sized draw.
pub fn letterbox_fit(
    width: u32,
    height: u32,
    output_size: u32,
    offset: Vec2,
    target_size: f64,
) -> Placement {
    let (draw_w, draw_h) = if width == 0 || height == 0 {
        (0.0, 0.0)
    } else {
        let ratio = f64::from(width) / f64::from(height);
        if ratio > 1.0 {
            (target_size, target_size / ratio)
        } else {
            (target_size * ratio, target_size)
        }
    };

    let out = f64::from(output_size);
    let x = (out - draw_w) / 2.0 + offset.x;
    let y = (out - draw_h) / 2.0 + offset.y;

    Placement {
        src: Rect::new(0.0, 0.0, f64::from(width), f64::from(height)),
        dst: Rect::new(x, y, x + draw_w, y + draw_h),
    }
}

/// Aspect-filling placement: the largest centered square of the raster fills the output.
pub fn cover_crop(width: u32, height: u32, output_size: u32) -> Placement {
    let size = f64::from(width.min(height));
    let sx = (f64::from(width) - size) / 2.0;
    let sy = (f64::from(height) - size) / 2.0;
    let out = f64::from(output_size);

    Placement {
        src: Rect::new(sx, sy, sx + size, sy + size),
        dst: Rect::new(0.0, 0.0, out, out),
    }
}

/// Whole raster stretched over the whole output, for graphics authored at output size.
pub fn full_frame(width: u32, height: u32, output_size: u32) -> Placement {
    let out = f64::from(output_size);
    Placement {
        src: Rect::new(0.0, 0.0, f64::from(width), f64::from(height)),
        dst: Rect::new(0.0, 0.0, out, out),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/fit.rs"]
mod tests;
