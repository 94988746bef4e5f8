//! Countryball is a layered image compositor for countryball avatars.
//!
//! A square image is built from a background (a curated flag or an uploaded photo), cut out by
//! the template's mask, overlaid with the template and an eye graphic:
//!
//! - Describe a session with a [`SessionConfig`] or drive a [`Session`] directly
//! - Pick layers through the session controllers; every change redraws
//! - Export the result with [`Session::export_png`]
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub(crate) mod compile;
/// Session configuration loaded from JSON.
pub mod config;
pub(crate) mod effects;
pub(crate) mod render;
/// Ordered-subsequence name search for the flag pickers.
pub mod search;
pub(crate) mod state;

pub use crate::foundation::core::{
    Affine, Canvas, DEFAULT_EXPORT_NAME, DEFAULT_OUTPUT_SIZE, Rect, Side, Vec2,
};
pub use crate::foundation::error::{CountryballError, CountryballResult};

pub use crate::assets::catalog::{
    EyeStyle, FlagLists, TEMPLATES, TemplateAsset, flag_path, flag_thumb_path, template,
};
pub use crate::assets::decode::decode_image;
pub use crate::assets::loader::{
    ConnectivityNotice, FLAG_LIST_PATH, FsLoader, ResourceLoader, normalize_rel_path,
};
pub use crate::assets::raster::{MAX_RASTER_SIDE, Raster};
pub use crate::compile::fit::{Placement, cover_crop, full_frame, letterbox_fit};
pub use crate::compile::plan::{
    CompositeOp, CompositePass, DrawOp, Layer, Pass, RenderPlan, ScenePass, SurfaceDesc,
    SurfaceId, compile_plan,
};
pub use crate::config::{ASSETS_ROOT_ENV, SessionConfig};
pub use crate::effects::composite::{mask_in, over};
pub use crate::render::backend::{FrameRGBA, RenderBackend};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::passes::{PassBackend, execute_plan};
pub use crate::search::{filter_names, ordered_match};
pub use crate::state::layer::{
    Background, EyeMode, EyePlacement, LayerState, LoadSlot, LoadTicket,
};
pub use crate::state::session::Session;
