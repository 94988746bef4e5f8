use crate::{
    compile::plan::{CompositePass, Pass, RenderPlan, ScenePass, SurfaceDesc, SurfaceId},
    foundation::error::{CountryballError, CountryballResult},
    render::backend::FrameRGBA,
};

pub trait PassBackend {
    fn ensure_surface(&mut self, id: SurfaceId, desc: &SurfaceDesc) -> CountryballResult<()>;

    fn exec_scene(&mut self, pass: &ScenePass) -> CountryballResult<()>;

    fn exec_composite(&mut self, pass: &CompositePass) -> CountryballResult<()>;

    fn readback_rgba8(
        &mut self,
        surface: SurfaceId,
        plan: &RenderPlan,
    ) -> CountryballResult<FrameRGBA>;
}

pub fn execute_plan<B: PassBackend + ?Sized>(
    backend: &mut B,
    plan: &RenderPlan,
) -> CountryballResult<FrameRGBA> {
    for (idx, desc) in plan.surfaces.iter().enumerate() {
        let id = SurfaceId(
            idx.try_into()
                .map_err(|_| CountryballError::render("surface id overflow"))?,
        );
        backend.ensure_surface(id, desc)?;
    }

    for pass in &plan.passes {
        match pass {
            Pass::Scene(p) => backend.exec_scene(p)?,
            Pass::Composite(p) => backend.exec_composite(p)?,
        }
    }

    backend.readback_rgba8(plan.final_surface, plan)
}

#[cfg(test)]
#[path = "../../tests/unit/render/passes.rs"]
mod tests;
