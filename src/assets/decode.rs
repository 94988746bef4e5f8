use anyhow::Context;

use crate::{assets::raster::Raster, foundation::error::CountryballResult};

/// Decode encoded image bytes (PNG, JPEG, WebP, ...) and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> CountryballResult<Raster> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let raster = Raster::from_straight_rgba8(width, height, rgba.into_raw())?;
    raster.check_drawable()?;
    Ok(raster)
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
