use std::sync::Arc;

use crate::{
    assets::decode::premultiply_rgba8_in_place,
    foundation::error::{CountryballError, CountryballResult},
};

/// Largest raster side the CPU rasterizer can sample from.
pub const MAX_RASTER_SIDE: u32 = u16::MAX as u32;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Decoded bitmap held in memory, premultiplied RGBA8, row-major.
///
/// Pixel data is shared behind an [`Arc`], so cloning a raster into a render plan is cheap and
/// replacing a layer simply drops the old reference.
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Raster {
    /// Wrap already premultiplied RGBA8 bytes.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> CountryballResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| CountryballError::validation("raster size overflow"))?;
        if data.len() != expected {
            return Err(CountryballError::validation(format!(
                "raster byte length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(data),
        })
    }

    /// Premultiply straight-alpha RGBA8 bytes and wrap them.
    pub fn from_straight_rgba8(
        width: u32,
        height: u32,
        mut data: Vec<u8>,
    ) -> CountryballResult<Self> {
        premultiply_rgba8_in_place(&mut data);
        Self::from_premul_rgba8(width, height, data)
    }

    /// Uniformly colored raster from a straight-alpha color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut px = rgba;
        premultiply_rgba8_in_place(&mut px);
        let n = width as usize * height as usize;
        Self {
            width,
            height,
            rgba8_premul: Arc::new(px.repeat(n)),
        }
    }

    /// Whether both sides fit [`MAX_RASTER_SIDE`].
    pub fn is_drawable(&self) -> bool {
        self.width <= MAX_RASTER_SIDE && self.height <= MAX_RASTER_SIDE
    }

    /// Reject rasters the compositor cannot draw.
    pub fn check_drawable(&self) -> CountryballResult<()> {
        if self.is_drawable() {
            return Ok(());
        }
        Err(CountryballError::validation(format!(
            "raster {}x{} exceeds the {MAX_RASTER_SIDE} px side limit",
            self.width, self.height
        )))
    }

    /// A raster with no pixels draws nothing.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Premultiplied pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.rgba8_premul[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }
}
