use std::{collections::HashMap, sync::Arc};

use crate::{
    assets::raster::Raster,
    compile::plan::{
        CompositeOp, CompositePass, DrawOp, RenderPlan, ScenePass, SurfaceDesc, SurfaceId,
    },
    effects::composite::{mask_in_place, over_in_place},
    foundation::core::Affine,
    foundation::error::{CountryballError, CountryballResult},
    render::backend::{FrameRGBA, RenderBackend},
    render::passes::PassBackend,
};

/// CPU backend: rasterises draws with `vello_cpu`, composites with the premultiplied kernels.
///
/// Surfaces are kept between renders and fully rewritten by every plan, so repeated renders of
/// the same state are pixel-identical.
#[derive(Default)]
pub struct CpuBackend {
    surfaces: HashMap<SurfaceId, CpuSurface>,
}

struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CpuBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PassBackend for CpuBackend {
    fn ensure_surface(&mut self, id: SurfaceId, desc: &SurfaceDesc) -> CountryballResult<()> {
        let width_u16: u16 = desc
            .width
            .try_into()
            .map_err(|_| CountryballError::render("surface width exceeds u16"))?;
        let height_u16: u16 = desc
            .height
            .try_into()
            .map_err(|_| CountryballError::render("surface height exceeds u16"))?;

        match self.surfaces.get_mut(&id) {
            Some(surface) if surface.width == width_u16 && surface.height == height_u16 => {
                clear_pixmap(&mut surface.pixmap);
            }
            _ => {
                self.surfaces.insert(
                    id,
                    CpuSurface {
                        width: width_u16,
                        height: height_u16,
                        pixmap: vello_cpu::Pixmap::new(width_u16, height_u16),
                    },
                );
            }
        }
        Ok(())
    }

    fn exec_scene(&mut self, pass: &ScenePass) -> CountryballResult<()> {
        let mut surface = self.surfaces.remove(&pass.target).ok_or_else(|| {
            CountryballError::render(format!(
                "scene target surface {:?} was not initialized",
                pass.target
            ))
        })?;

        let mut layer = vello_cpu::Pixmap::new(surface.width, surface.height);
        if !pass.ops.is_empty() {
            let mut ctx = vello_cpu::RenderContext::new(surface.width, surface.height);
            for op in &pass.ops {
                draw_op(&mut ctx, op)?;
            }
            ctx.flush();
            ctx.render_to_pixmap(&mut layer);
        }

        if pass.clear_to_transparent {
            surface.pixmap = layer;
        } else {
            over_in_place(surface.pixmap.data_as_u8_slice_mut(), layer.data_as_u8_slice())?;
        }

        self.surfaces.insert(pass.target, surface);
        Ok(())
    }

    fn exec_composite(&mut self, pass: &CompositePass) -> CountryballResult<()> {
        let mut dst = self.surfaces.remove(&pass.target).ok_or_else(|| {
            CountryballError::render(format!(
                "composite target surface {:?} was not initialized",
                pass.target
            ))
        })?;

        let result = self.apply_composite_ops(&mut dst, &pass.ops);
        self.surfaces.insert(pass.target, dst);
        result
    }

    fn readback_rgba8(
        &mut self,
        surface: SurfaceId,
        plan: &RenderPlan,
    ) -> CountryballResult<FrameRGBA> {
        let s = self.surfaces.get(&surface).ok_or_else(|| {
            CountryballError::render(format!(
                "readback surface {:?} was not initialized",
                surface
            ))
        })?;
        let frame_data = s.pixmap.data_as_u8_slice().to_vec();
        let surface_cap = plan.surfaces.len() as u32;
        self.surfaces.retain(|id, _| id.0 < surface_cap);

        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: frame_data,
            premultiplied: true,
        })
    }
}

impl RenderBackend for CpuBackend {}

impl CpuBackend {
    fn apply_composite_ops(
        &self,
        dst: &mut CpuSurface,
        ops: &[CompositeOp],
    ) -> CountryballResult<()> {
        for op in ops {
            match *op {
                CompositeOp::Over { src } => {
                    let src = self.surface(src)?;
                    over_in_place(
                        dst.pixmap.data_as_u8_slice_mut(),
                        src.pixmap.data_as_u8_slice(),
                    )?;
                }
                CompositeOp::MaskIn { mask } => {
                    let mask = self.surface(mask)?;
                    mask_in_place(
                        dst.pixmap.data_as_u8_slice_mut(),
                        mask.pixmap.data_as_u8_slice(),
                    )?;
                }
            }
        }
        Ok(())
    }

    fn surface(&self, id: SurfaceId) -> CountryballResult<&CpuSurface> {
        self.surfaces.get(&id).ok_or_else(|| {
            CountryballError::render(format!(
                "composite src surface {:?} was not initialized",
                id
            ))
        })
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, op: &DrawOp) -> CountryballResult<()> {
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match op {
        DrawOp::Image {
            layer,
            raster,
            placement,
        } => {
            tracing::trace!(?layer, dst = ?placement.dst, "draw image");
            let paint = image_paint(raster)?;
            ctx.set_transform(affine_to_cpu(placement.to_affine()));
            ctx.set_paint(paint);
            let src = placement.src;
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(src.x0, src.y0, src.x1, src.y1));
            Ok(())
        }
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn image_paint(raster: &Raster) -> CountryballResult<vello_cpu::Image> {
    let pixmap = raster_to_pixmap(raster)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn raster_to_pixmap(raster: &Raster) -> CountryballResult<vello_cpu::Pixmap> {
    let w: u16 = raster
        .width
        .try_into()
        .map_err(|_| CountryballError::render("image width exceeds u16"))?;
    let h: u16 = raster
        .height
        .try_into()
        .map_err(|_| CountryballError::render("image height exceeds u16"))?;
    if raster.rgba8_premul.len() != raster.width as usize * raster.height as usize * 4 {
        return Err(CountryballError::render("raster byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(raster.width as usize * raster.height as usize);
    for px in raster.rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
