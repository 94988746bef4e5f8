use std::path::{Path, PathBuf};

use crate::{
    assets::{catalog::FlagLists, decode::decode_image, raster::Raster},
    foundation::error::{CountryballError, CountryballResult},
};

/// Relative path of the flag list manifest under the assets root.
pub const FLAG_LIST_PATH: &str = "flags.json";

/// Source of rasters and asset lists.
///
/// A failed [`ResourceLoader::load`] is non-fatal: callers treat the layer as absent. Errors of
/// kind [`CountryballError::Connectivity`] additionally raise the [`ConnectivityNotice`].
pub trait ResourceLoader {
    /// Load and decode the raster at `path` (relative to the asset source).
    fn load(&self, path: &str) -> CountryballResult<Raster>;

    /// Fetch the per-side flag name lists.
    fn fetch_flag_lists(&self) -> CountryballResult<FlagLists>;
}

impl<L: ResourceLoader + ?Sized> ResourceLoader for &L {
    fn load(&self, path: &str) -> CountryballResult<Raster> {
        (**self).load(path)
    }

    fn fetch_flag_lists(&self) -> CountryballResult<FlagLists> {
        (**self).fetch_flag_lists()
    }
}

/// Loader that resolves asset paths under a directory on disk.
#[derive(Clone, Debug)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory used when resolving relative asset paths.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_bytes(&self, rel: &str) -> CountryballResult<Vec<u8>> {
        let norm = normalize_rel_path(rel)?;
        if !self.root.is_dir() {
            return Err(CountryballError::connectivity(format!(
                "asset root '{}' is not reachable",
                self.root.display()
            )));
        }
        let path = self.root.join(Path::new(&norm));
        std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CountryballError::asset(norm.clone(), "not found"),
            _ => CountryballError::connectivity(format!(
                "failed to read '{}': {e}",
                path.display()
            )),
        })
    }
}

impl ResourceLoader for FsLoader {
    fn load(&self, path: &str) -> CountryballResult<Raster> {
        let bytes = self.read_bytes(path)?;
        decode_image(&bytes).map_err(|e| CountryballError::asset(path, e.to_string()))
    }

    fn fetch_flag_lists(&self) -> CountryballResult<FlagLists> {
        let bytes = self.read_bytes(FLAG_LIST_PATH)?;
        FlagLists::from_json(&bytes)
    }
}

/// Persistent "no connection" banner state.
///
/// Once raised it stays raised for the rest of the session; nothing in the crate clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectivityNotice {
    message: Option<String>,
}

impl ConnectivityNotice {
    pub fn raise(&mut self, message: impl Into<String>) {
        if self.message.is_none() {
            self.message = Some(message.into());
        }
    }

    pub fn is_raised(&self) -> bool {
        self.message.is_some()
    }

    /// Message of the first failure that raised the notice.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Normalize and validate asset paths relative to the loader root.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> CountryballResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(CountryballError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(CountryballError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(CountryballError::validation(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(CountryballError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
