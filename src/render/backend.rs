use std::io::Cursor;
use std::path::Path;

use anyhow::Context;

use crate::{
    compile::plan::RenderPlan,
    foundation::error::{CountryballError, CountryballResult},
    foundation::math::unpremul_u8,
    render::passes::{PassBackend, execute_plan},
};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Rendered output pixels.
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)` in the frame's own alpha convention.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha RGBA8 bytes, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = px[3];
            px[0] = unpremul_u8(px[0], a);
            px[1] = unpremul_u8(px[1], a);
            px[2] = unpremul_u8(px[2], a);
        }
        out
    }

    /// PNG-encode the frame.
    pub fn encode_png(&self) -> CountryballResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.to_straight_rgba8())
            .ok_or_else(|| CountryballError::render("frame byte length mismatch"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }

    /// Encode as PNG and write to `path`, creating parent directories.
    pub fn save_png(&self, path: &Path) -> CountryballResult<()> {
        let bytes = self.encode_png()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

pub trait RenderBackend: PassBackend {
    fn render_plan(&mut self, plan: &RenderPlan) -> CountryballResult<FrameRGBA> {
        execute_plan(self, plan)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
