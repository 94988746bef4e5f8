use crate::{
    assets::{
        catalog::{EyeStyle, FlagLists, flag_path, template},
        decode::decode_image,
        loader::{ConnectivityNotice, ResourceLoader},
        raster::Raster,
    },
    compile::plan::compile_plan,
    foundation::core::{Canvas, Side},
    foundation::error::{CountryballError, CountryballResult},
    render::backend::{FrameRGBA, RenderBackend},
    render::cpu::CpuBackend,
    search::filter_names,
    state::layer::{EyeMode, LayerState, LoadSlot},
};

/// One editing session: layer state, the loader it pulls assets from and the last rendered
/// frame.
///
/// Every controller mutates the state, resolves the loads it started and redraws before
/// returning. Failed asset loads never fail a controller; the affected layer is left absent.
pub struct Session<L> {
    loader: L,
    state: LayerState,
    flags: FlagLists,
    notice: ConnectivityNotice,
    output_size: u32,
    backend: CpuBackend,
    frame: Option<FrameRGBA>,
}

impl<L: ResourceLoader> Session<L> {
    /// Create a session with default selections. Nothing is loaded until [`Session::init`].
    pub fn new(loader: L, output_size: u32) -> CountryballResult<Self> {
        Self::with_state(loader, LayerState::new(), output_size)
    }

    /// Create a session starting from a prepared layer state (selection indices, side, eye
    /// placement or an uploaded background).
    pub fn with_state(loader: L, state: LayerState, output_size: u32) -> CountryballResult<Self> {
        Canvas::square(output_size)?;
        Ok(Self {
            loader,
            state,
            flags: FlagLists::default(),
            notice: ConnectivityNotice::default(),
            output_size,
            backend: CpuBackend::new(),
            frame: None,
        })
    }

    /// Load the selected template, eyes, flag lists and flag, then draw.
    ///
    /// An uploaded background set through [`Session::with_state`] is kept.
    #[tracing::instrument(skip(self))]
    pub fn init(&mut self) -> CountryballResult<()> {
        self.reload_template()?;
        self.reload_eyes()?;
        self.fetch_flag_lists();
        if !self.state.background().is_uploaded() {
            self.reload_flag();
        }
        self.render()?;
        Ok(())
    }

    /// Toggle the facing side. Eyes always follow; the flag follows unless a photo is uploaded.
    #[tracing::instrument(skip(self))]
    pub fn flip(&mut self) -> CountryballResult<Side> {
        let side = self.state.flip_side();
        self.reload_eyes()?;
        if !self.state.background().is_uploaded() {
            self.reload_flag();
        }
        self.render()?;
        Ok(side)
    }

    #[tracing::instrument(skip(self))]
    pub fn select_template(&mut self, index: usize) -> CountryballResult<()> {
        template(index)?;
        self.state.set_template_index(index);
        self.reload_template()?;
        self.render()?;
        Ok(())
    }

    /// Switch eye style; the eye index resets to the first graphic of the new style.
    #[tracing::instrument(skip(self))]
    pub fn select_eye_style(&mut self, style: EyeStyle) -> CountryballResult<()> {
        self.state.set_eye_style(style);
        self.reload_eyes()?;
        self.render()?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub fn select_eye(&mut self, index: usize) -> CountryballResult<()> {
        let style = self.state.eye_style();
        if index >= style.count() {
            return Err(CountryballError::validation(format!(
                "eye index {index} out of range for {style} (0..{})",
                style.count()
            )));
        }
        self.state.set_eye_index(index);
        self.reload_eyes()?;
        self.render()?;
        Ok(())
    }

    /// Select flag `index` of the current side's list. Replaces an uploaded photo.
    #[tracing::instrument(skip(self))]
    pub fn select_flag(&mut self, index: usize) -> CountryballResult<()> {
        let len = self.flags.for_side(self.state.side()).len();
        if index >= len {
            return Err(CountryballError::validation(format!(
                "flag index {index} out of range for side {} (0..{len})",
                self.state.side()
            )));
        }
        self.state.set_flag_index(index);
        self.reload_flag();
        self.render()?;
        Ok(())
    }

    /// Select a flag by file name on the current side. Returns `false` and changes nothing
    /// when the name is not listed.
    #[tracing::instrument(skip(self))]
    pub fn select_flag_by_name(&mut self, name: &str) -> CountryballResult<bool> {
        match self.flags.index_on_side(self.state.side(), name) {
            Some(index) => {
                self.select_flag(index)?;
                Ok(true)
            }
            None => {
                tracing::debug!(name, side = %self.state.side(), "flag name not listed");
                Ok(false)
            }
        }
    }

    /// Use a decoded photo as the background.
    ///
    /// A raster the compositor cannot draw is rejected and the state is left untouched.
    #[tracing::instrument(skip_all, fields(width = raster.width, height = raster.height))]
    pub fn upload(&mut self, raster: Raster) -> CountryballResult<()> {
        raster.check_drawable()?;
        self.state.set_uploaded(raster);
        self.render()?;
        Ok(())
    }

    /// Decode encoded image bytes and use them as the background.
    ///
    /// On a decode failure the error is returned and the state is left untouched.
    pub fn upload_bytes(&mut self, bytes: &[u8]) -> CountryballResult<()> {
        let raster = decode_image(bytes)
            .map_err(|e| CountryballError::asset("<upload>", e.to_string()))?;
        self.upload(raster)
    }

    pub fn set_eye_offset_x(&mut self, offset_x: i32) -> CountryballResult<()> {
        self.state.set_eye_offset_x(offset_x);
        self.render()?;
        Ok(())
    }

    pub fn set_eye_offset_y(&mut self, offset_y: i32) -> CountryballResult<()> {
        self.state.set_eye_offset_y(offset_y);
        self.render()?;
        Ok(())
    }

    pub fn set_eye_size(&mut self, size: u32) -> CountryballResult<()> {
        self.state.set_eye_size(size)?;
        self.render()?;
        Ok(())
    }

    /// Offset and size controls only apply to user-positioned eye styles.
    pub fn eye_adjust_enabled(&self) -> bool {
        self.state.eye_mode() == EyeMode::Adjustable
    }

    pub fn state(&self) -> &LayerState {
        &self.state
    }

    pub fn flags(&self) -> &FlagLists {
        &self.flags
    }

    pub fn notice(&self) -> &ConnectivityNotice {
        &self.notice
    }

    pub fn output_size(&self) -> u32 {
        self.output_size
    }

    /// Last rendered frame, if any controller or [`Session::render`] ran.
    pub fn frame(&self) -> Option<&FrameRGBA> {
        self.frame.as_ref()
    }

    /// Composite the current state into a fresh frame.
    pub fn render(&mut self) -> CountryballResult<&FrameRGBA> {
        let plan = compile_plan(&self.state, self.output_size)?;
        let frame = self.backend.render_plan(&plan)?;
        Ok(self.frame.insert(frame))
    }

    /// PNG bytes of the current frame, rendering first if nothing was drawn yet.
    pub fn export_png(&mut self) -> CountryballResult<Vec<u8>> {
        if let Some(frame) = &self.frame {
            return frame.encode_png();
        }
        self.render()?.encode_png()
    }

    /// Current side's flag names matching `query`, with their list indices.
    pub fn filtered_flags(&self, query: &str) -> Vec<(usize, &str)> {
        filter_names(query, self.flags.for_side(self.state.side()))
    }

    /// Thumbnail names matching `query`, with their indices in the thumbnail list.
    pub fn filtered_thumbs(&self, query: &str) -> Vec<(usize, &str)> {
        filter_names(query, &self.flags.thumb)
    }

    fn fetch_flag_lists(&mut self) {
        self.flags = match self.loader.fetch_flag_lists() {
            Ok(lists) => {
                tracing::debug!(
                    left = lists.left.len(),
                    right = lists.right.len(),
                    thumb = lists.thumb.len(),
                    "fetched flag lists"
                );
                lists
            }
            Err(e) => {
                tracing::warn!(error = %e, "flag list fetch failed");
                self.notice.raise(e.to_string());
                FlagLists::default()
            }
        };
    }

    fn reload_template(&mut self) -> CountryballResult<()> {
        let asset = template(self.state.template_index())?;
        let ticket = self.state.begin_load(LoadSlot::Template);
        let base = self.load_raster(&asset.base_path());
        let mask = self.load_raster(&asset.mask_path());
        self.state.complete_template(ticket, base, mask);
        Ok(())
    }

    fn reload_eyes(&mut self) -> CountryballResult<()> {
        let path = self
            .state
            .eye_style()
            .eye_path(self.state.eye_index(), self.state.side())?;
        let ticket = self.state.begin_load(LoadSlot::Eyes);
        let eyes = self.load_raster(&path);
        self.state.complete_eyes(ticket, eyes);
        Ok(())
    }

    fn reload_flag(&mut self) {
        let side = self.state.side();
        let index = self.state.flag_index();
        let ticket = self.state.begin_load(LoadSlot::Flag);
        let path = self.flags.for_side(side).get(index).map(|f| flag_path(side, f));
        let flag = match path {
            Some(path) => self.load_raster(&path),
            None => {
                if !self.flags.for_side(side).is_empty() {
                    tracing::warn!(index, %side, "flag index not listed for side");
                }
                None
            }
        };
        self.state.complete_flag(ticket, flag);
    }

    fn load_raster(&mut self, path: &str) -> Option<Raster> {
        match self
            .loader
            .load(path)
            .and_then(|raster| raster.check_drawable().map(|()| raster))
        {
            Ok(raster) => Some(raster),
            Err(e) => {
                tracing::warn!(path, error = %e, "asset load failed");
                if e.is_connectivity() {
                    self.notice.raise(e.to_string());
                }
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/session.rs"]
mod tests;
