use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    assets::{catalog::EyeStyle, catalog::template, decode::decode_image, loader::FsLoader},
    foundation::core::{Canvas, DEFAULT_EXPORT_NAME, DEFAULT_OUTPUT_SIZE, Side},
    foundation::error::{CountryballError, CountryballResult},
    state::layer::{EyePlacement, LayerState},
    state::session::Session,
};

/// Environment variable that overrides [`SessionConfig::assets_root`].
pub const ASSETS_ROOT_ENV: &str = "COUNTRYBALL_ASSETS_ROOT";

/// Serializable description of a session: where assets live and what is selected.
///
/// Every field is optional in JSON; missing fields take the startup defaults.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub assets_root: PathBuf,
    pub output_size: u32,
    pub template: usize,
    pub eye_style: EyeStyle,
    pub eye_index: usize,
    pub side: Side,
    pub flag_index: usize,
    /// Flag file name on `side`; takes precedence over `flag_index` when listed.
    pub flag_name: Option<String>,
    /// Photo used as background instead of a flag.
    pub upload: Option<PathBuf>,
    pub eye_offset_x: i32,
    pub eye_offset_y: i32,
    pub eye_size: u32,
    pub out: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let placement = EyePlacement::default();
        Self {
            assets_root: PathBuf::from("."),
            output_size: DEFAULT_OUTPUT_SIZE,
            template: 0,
            eye_style: EyeStyle::default(),
            eye_index: 0,
            side: Side::default(),
            flag_index: 0,
            flag_name: None,
            upload: None,
            eye_offset_x: placement.offset_x,
            eye_offset_y: placement.offset_y,
            eye_size: placement.size,
            out: PathBuf::from(DEFAULT_EXPORT_NAME),
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(s: &str) -> CountryballResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| CountryballError::serde(format!("invalid session config: {e}")))
    }

    pub fn from_path(path: &Path) -> CountryballResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read session config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Apply [`ASSETS_ROOT_ENV`] if it is set and non-empty.
    pub fn apply_env(&mut self) {
        self.override_assets_root(std::env::var_os(ASSETS_ROOT_ENV).map(PathBuf::from));
    }

    pub(crate) fn override_assets_root(&mut self, root: Option<PathBuf>) {
        if let Some(root) = root.filter(|r| !r.as_os_str().is_empty()) {
            self.assets_root = root;
        }
    }

    pub fn validate(&self) -> CountryballResult<()> {
        Canvas::square(self.output_size)?;
        template(self.template)?;
        if self.eye_index >= self.eye_style.count() {
            return Err(CountryballError::validation(format!(
                "eye_index {} out of range for {} (0..{})",
                self.eye_index,
                self.eye_style,
                self.eye_style.count()
            )));
        }
        if self.eye_size == 0 {
            return Err(CountryballError::validation("eye_size must be > 0"));
        }
        Ok(())
    }

    /// Layer state carrying this config's selections, with no rasters loaded yet.
    pub fn layer_state(&self) -> CountryballResult<LayerState> {
        let mut state = LayerState::new();
        state.set_side(self.side);
        state.set_template_index(self.template);
        state.set_eye_style(self.eye_style);
        state.set_eye_index(self.eye_index);
        state.set_flag_index(self.flag_index);
        state.set_eye_offset_x(self.eye_offset_x);
        state.set_eye_offset_y(self.eye_offset_y);
        state.set_eye_size(self.eye_size)?;
        Ok(state)
    }

    /// Validate, load every selected asset from `assets_root` and draw the first frame.
    #[tracing::instrument(skip(self), fields(assets_root = %self.assets_root.display()))]
    pub fn build_session(&self) -> CountryballResult<Session<FsLoader>> {
        self.validate()?;
        let mut state = self.layer_state()?;

        if let Some(path) = &self.upload {
            let bytes = std::fs::read(path)
                .with_context(|| format!("read upload '{}'", path.display()))?;
            let raster = decode_image(&bytes)
                .map_err(|e| CountryballError::asset(path.display().to_string(), e.to_string()))?;
            state.set_uploaded(raster);
        }

        let mut session = Session::with_state(
            FsLoader::new(self.assets_root.clone()),
            state,
            self.output_size,
        )?;
        session.init()?;

        if let Some(name) = self.flag_name.as_deref().filter(|_| self.upload.is_none()) {
            if !session.select_flag_by_name(name)? {
                tracing::warn!(name, side = %self.side, "flag name not listed, keeping flag_index");
            }
        }

        Ok(session)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
