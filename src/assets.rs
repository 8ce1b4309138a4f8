//! Versioned offline cache of the application's static assets.
//!
//! Installing copies every listed asset from an [`AssetSource`] into
//! `<cache root>/low-calorie-draw-v<version>/`. Requests are answered from
//! that directory first and fall through to the source when the entry is
//! missing. Drawing state never goes here.

use crate::config::AssetsConfig;
use log::{debug, info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Prefix of every cache directory name; the version is appended.
pub const CACHE_NAME_PREFIX: &str = "low-calorie-draw-v";

/// Entry name standing in for a directory request such as `/`.
pub const ROOT_ENTRY: &str = "_root";

const LOCAL_ORIGIN: &str = "http://localhost/";

/// Asset cache and source failures.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Invalid asset request {request:?}: {reason}")]
    InvalidRequest { request: String, reason: String },

    #[error("Asset path {0:?} escapes the cache directory")]
    PathTraversal(String),

    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Could not determine a cache directory")]
    NoCacheDir,

    #[error("Asset I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Where assets come from when they are not cached (the "network").
pub trait AssetSource {
    /// Returns the bytes for an absolute request path like `/lib/util.js`.
    fn fetch(&self, path: &str) -> Result<Vec<u8>, AssetError>;
}

/// Serves assets from a local directory; directory requests serve `index.html`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirectorySource {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        let (relative, directory) = split_request_path(path)?;
        let mut file = self.root.join(relative);
        if directory {
            file.push("index.html");
        }

        match fs::read(&file) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(AssetError::NotFound(path.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Response to a [`AssetCache::fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Served {
    /// Answered from the cache.
    Cache(Vec<u8>),
    /// Cache miss, fetched from the source and not stored.
    Network(Vec<u8>),
}

impl Served {
    pub fn is_cached(&self) -> bool {
        matches!(self, Served::Cache(_))
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Served::Cache(bytes) | Served::Network(bytes) => bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Served::Cache(bytes) | Served::Network(bytes) => bytes,
        }
    }
}

/// One named, versioned cache directory.
#[derive(Debug, Clone)]
pub struct AssetCache {
    name: String,
    root: PathBuf,
    assets: Vec<String>,
}

impl AssetCache {
    /// Cache `low-calorie-draw-v<version>` under `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>, version: u32, assets: Vec<String>) -> Self {
        let name = format!("{CACHE_NAME_PREFIX}{version}");
        let root = base_dir.as_ref().join(&name);
        Self { name, root, assets }
    }

    /// Builds the cache from configuration, defaulting to the platform cache directory.
    pub fn from_config(config: &AssetsConfig) -> Result<Self, AssetError> {
        let base_dir = match &config.cache_dir {
            Some(dir) => dir.clone(),
            None => dirs::cache_dir()
                .ok_or(AssetError::NoCacheDir)?
                .join("low-calorie-draw"),
        };
        Ok(Self::new(base_dir, config.version, config.assets.clone()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    /// True when every listed asset has a cache entry.
    pub fn is_installed(&self) -> bool {
        self.assets.iter().all(|asset| {
            self.entry_path(asset)
                .map(|path| path.is_file())
                .unwrap_or(false)
        })
    }

    /// Fetches every listed asset from `source` and stores it.
    ///
    /// All assets are fetched before anything is written, so a failure leaves
    /// the cache untouched. Returns the number of entries stored.
    pub fn install(&self, source: &dyn AssetSource) -> Result<usize, AssetError> {
        let mut fetched = Vec::with_capacity(self.assets.len());
        for asset in &self.assets {
            let entry = self.entry_path(asset)?;
            let bytes = source.fetch(asset).inspect_err(|err| {
                warn!("Aborting install of {}: {}", self.name, err);
            })?;
            fetched.push((entry, bytes));
        }

        for (entry, bytes) in &fetched {
            if let Some(parent) = entry.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(entry, bytes)?;
            debug!("Cached {} ({} bytes)", entry.display(), bytes.len());
        }

        info!(
            "Installed {} asset(s) into {}",
            fetched.len(),
            self.root.display()
        );
        Ok(fetched.len())
    }

    /// Answers `request` (a path or absolute URL) from the cache, falling back to `source`.
    pub fn fetch(&self, request: &str, source: &dyn AssetSource) -> Result<Served, AssetError> {
        let path = request_path(request)?;
        let entry = self.entry_path(&path)?;

        match fs::read(&entry) {
            Ok(bytes) => {
                debug!("Cache hit for {path}");
                Ok(Served::Cache(bytes))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("Cache miss for {path}");
                source.fetch(&path).map(Served::Network)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Removes this cache's directory. Returns whether anything was removed.
    pub fn clear(&self) -> Result<bool, AssetError> {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => {
                info!("Removed asset cache {}", self.root.display());
                Ok(true)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn entry_path(&self, path: &str) -> Result<PathBuf, AssetError> {
        let (relative, directory) = split_request_path(path)?;
        let mut entry = self.root.join(relative);
        if directory {
            entry.push(ROOT_ENTRY);
        }
        Ok(entry)
    }
}

/// Normalizes a request to its absolute path; the query and fragment are dropped.
fn request_path(request: &str) -> Result<String, AssetError> {
    let invalid = |reason: String| AssetError::InvalidRequest {
        request: request.to_string(),
        reason,
    };

    let url = match Url::parse(request) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(LOCAL_ORIGIN)
            .and_then(|base| base.join(request))
            .map_err(|err| invalid(err.to_string()))?,
        Err(err) => return Err(invalid(err.to_string())),
    };

    if url.cannot_be_a_base() {
        return Err(invalid("URL has no path".to_string()));
    }
    Ok(url.path().to_string())
}

/// Splits `/a/b/` into (`a/b`, true) and `/a/b.js` into (`a/b.js`, false).
fn split_request_path(path: &str) -> Result<(PathBuf, bool), AssetError> {
    let Some(rest) = path.strip_prefix('/') else {
        return Err(AssetError::InvalidRequest {
            request: path.to_string(),
            reason: "path must start with '/'".to_string(),
        });
    };

    let mut relative = PathBuf::new();
    for segment in rest.split('/').filter(|s| !s.is_empty() && *s != ".") {
        if segment == ".." || segment.contains('\\') {
            return Err(AssetError::PathTraversal(path.to_string()));
        }
        relative.push(segment);
    }

    let directory = rest.is_empty() || rest.ends_with('/');
    Ok((relative, directory))
}
