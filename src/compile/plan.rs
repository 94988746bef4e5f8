use crate::{
    assets::raster::Raster,
    compile::fit::{Placement, cover_crop, full_frame, letterbox_fit},
    foundation::core::{Canvas, Vec2},
    foundation::error::CountryballResult,
    state::layer::{Background, EyeMode, LayerState},
};

#[derive(Clone, Debug)]
/// Backend-agnostic render plan for one composited image.
///
/// A plan consists of:
/// - surface declarations (`surfaces`)
/// - a sequence of passes (`passes`)
/// - a declared final surface (`final_surface`)
pub struct RenderPlan {
    pub canvas: Canvas,
    pub surfaces: Vec<SurfaceDesc>,
    pub passes: Vec<Pass>,
    pub final_surface: SurfaceId,
}

#[derive(Clone, Debug)]
/// A single pass in a [`RenderPlan`].
pub enum Pass {
    Scene(ScenePass),
    Composite(CompositePass),
}

#[derive(Clone, Debug)]
/// Draw operations into a surface.
///
/// With `clear_to_transparent` the drawn result replaces the surface, otherwise it is
/// composited over the existing contents.
pub struct ScenePass {
    pub target: SurfaceId,
    pub ops: Vec<DrawOp>,
    pub clear_to_transparent: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Identifier for a render surface declared in [`RenderPlan::surfaces`].
pub struct SurfaceId(pub u32);

#[derive(Clone, Debug, PartialEq, Eq)]
/// Surface declaration. Every surface holds premultiplied RGBA8.
pub struct SurfaceDesc {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug)]
/// Composite other surfaces into a target surface.
pub struct CompositePass {
    pub target: SurfaceId,
    pub ops: Vec<CompositeOp>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A compositing operation between surfaces.
pub enum CompositeOp {
    /// Source-over `src` onto the target.
    Over { src: SurfaceId },
    /// Keep the target only where `mask` alpha is non-zero. Mask color is ignored.
    MaskIn { mask: SurfaceId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which layer a draw belongs to.
pub enum Layer {
    Background,
    Mask,
    Template,
    Eyes,
}

#[derive(Clone, Debug)]
/// Draw operation emitted by the compiler.
pub enum DrawOp {
    Image {
        layer: Layer,
        raster: Raster,
        placement: Placement,
    },
}

pub(crate) const WORKING: SurfaceId = SurfaceId(0);
pub(crate) const SOURCE: SurfaceId = SurfaceId(1);
pub(crate) const MASK: SurfaceId = SurfaceId(2);

/// Compile the current layer state into a render plan for a `size`×`size` output.
///
/// Layer order is fixed: background (cut out by the mask) under template under eyes. Absent
/// layers emit nothing.
#[tracing::instrument(skip(state))]
pub fn compile_plan(state: &LayerState, size: u32) -> CountryballResult<RenderPlan> {
    let canvas = Canvas::square(size)?;
    let full = f64::from(size);
    let desc = SurfaceDesc {
        width: size,
        height: size,
    };

    let mut surfaces = vec![desc.clone(), desc.clone()];
    let mut passes = Vec::with_capacity(6);

    passes.push(Pass::Scene(ScenePass {
        target: WORKING,
        ops: vec![],
        clear_to_transparent: true,
    }));

    let background = match state.background() {
        Background::None => None,
        Background::Flag(r) => image_op(
            Layer::Background,
            r,
            letterbox_fit(r.width, r.height, size, Vec2::ZERO, full),
        ),
        Background::Uploaded(r) => image_op(
            Layer::Background,
            r,
            cover_crop(r.width, r.height, size),
        ),
    };
    passes.push(Pass::Scene(ScenePass {
        target: SOURCE,
        ops: background.into_iter().collect(),
        clear_to_transparent: true,
    }));

    if let Some(mask) = state.mask() {
        surfaces.push(desc);
        passes.push(Pass::Scene(ScenePass {
            target: MASK,
            ops: image_op(
                Layer::Mask,
                mask,
                letterbox_fit(mask.width, mask.height, size, Vec2::ZERO, full),
            )
            .into_iter()
            .collect(),
            clear_to_transparent: true,
        }));
        passes.push(Pass::Composite(CompositePass {
            target: SOURCE,
            ops: vec![CompositeOp::MaskIn { mask: MASK }],
        }));
    }

    passes.push(Pass::Composite(CompositePass {
        target: WORKING,
        ops: vec![CompositeOp::Over { src: SOURCE }],
    }));

    let mut overlays = Vec::new();
    if let Some(t) = state.template() {
        overlays.extend(image_op(
            Layer::Template,
            t,
            letterbox_fit(t.width, t.height, size, Vec2::ZERO, full),
        ));
    }
    if let Some(eyes) = state.eyes() {
        let placement = match state.eye_mode() {
            EyeMode::FullFrame => full_frame(eyes.width, eyes.height, size),
            EyeMode::Adjustable => {
                let p = state.eye_placement();
                letterbox_fit(
                    eyes.width,
                    eyes.height,
                    size,
                    Vec2::new(f64::from(p.offset_x), f64::from(p.offset_y)),
                    f64::from(p.size),
                )
            }
        };
        overlays.extend(image_op(Layer::Eyes, eyes, placement));
    }
    if !overlays.is_empty() {
        passes.push(Pass::Scene(ScenePass {
            target: WORKING,
            ops: overlays,
            clear_to_transparent: false,
        }));
    }

    tracing::debug!(
        surfaces = surfaces.len(),
        passes = passes.len(),
        "compiled render plan"
    );

    Ok(RenderPlan {
        canvas,
        surfaces,
        passes,
        final_surface: WORKING,
    })
}

fn image_op(layer: Layer, raster: &Raster, placement: Placement) -> Option<DrawOp> {
    if raster.is_empty() || placement.is_empty() {
        return None;
    }
    if !raster.is_drawable() {
        tracing::warn!(
            ?layer,
            width = raster.width,
            height = raster.height,
            "skipping oversized raster"
        );
        return None;
    }
    Some(DrawOp::Image {
        layer,
        raster: raster.clone(),
        placement,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
