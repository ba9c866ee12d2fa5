//! Locating the rres headers on disk
//!
//! Explicit paths win. Without them the Zig package cache is searched for the
//! most recently modified `N-V-*` package, and extra search directories are
//! walked as a fallback.

use anyhow::{Context, Result};
use glob::glob;
use rres_zig_core::{BindgenError, BindgenResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Name of the primary header inside a package
pub const PRIMARY_HEADER: &str = "rres.h";

/// Name of the raylib extension header inside a package
pub const EXTENSION_HEADER: &str = "rres-raylib.h";

/// Glob matching rres package directories in the Zig cache
pub const PACKAGE_PATTERN: &str = "N-V-*";

/// Resolved header files for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSources {
    pub primary: PathBuf,
    pub extension: Option<PathBuf>,
}

impl HeaderSources {
    /// Read the primary header, appending the extension header when present
    pub fn read(&self) -> BindgenResult<String> {
        let mut content = fs::read_to_string(&self.primary).map_err(|source| BindgenError::HeaderRead {
            path: self.primary.clone(),
            source,
        })?;

        if let Some(extension) = &self.extension {
            match fs::read_to_string(extension) {
                Ok(extra) => {
                    content.push('\n');
                    content.push_str(&extra);
                }
                Err(e) => log::warn!("Ignoring unreadable extension header {}: {}", extension.display(), e),
            }
        }

        Ok(content)
    }
}

/// Finds the primary and extension headers
#[derive(Debug, Clone, Default)]
pub struct HeaderLocator {
    primary: Option<PathBuf>,
    extension: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
    search_dirs: Vec<PathBuf>,
}

impl HeaderLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this primary header instead of searching
    pub fn with_primary<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.primary = Some(path.into());
        self
    }

    /// Use this extension header instead of the sibling of the primary one
    pub fn with_extension<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.extension = Some(path.into());
        self
    }

    /// Zig package cache to search (defaults to the user cache)
    pub fn with_cache_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.into());
        self
    }

    /// Add a directory to walk for `rres.h` when the cache has none
    pub fn add_search_dir<P: AsRef<Path>>(&mut self, path: P) {
        self.search_dirs.push(path.as_ref().to_path_buf());
    }

    /// Resolve the header files
    pub fn locate(&self) -> BindgenResult<HeaderSources> {
        let primary = match &self.primary {
            Some(path) => {
                if !path.is_file() {
                    return Err(BindgenError::header_not_found(path.clone()));
                }
                path.clone()
            }
            None => self.search_primary()?,
        };

        let extension = match &self.extension {
            Some(path) => Some(path.clone()),
            None => primary.parent().map(|dir| dir.join(EXTENSION_HEADER)),
        }
        .filter(|path| {
            let exists = path.is_file();
            if !exists {
                log::info!("No extension header at {}", path.display());
            }
            exists
        });

        log::info!("Using header {}", primary.display());
        if let Some(extension) = &extension {
            log::info!("Using extension header {}", extension.display());
        }

        Ok(HeaderSources { primary, extension })
    }

    fn search_primary(&self) -> BindgenResult<PathBuf> {
        let mut searched = Vec::new();

        if let Some(cache_dir) = self.cache_dir.clone().or_else(default_cache_dir) {
            let packages = newest_packages(&cache_dir)?;
            match packages.first() {
                Some(package) => {
                    let candidate = package.join("src").join(PRIMARY_HEADER);
                    if candidate.is_file() {
                        return Ok(candidate);
                    }
                    searched.push(candidate);
                }
                None => {
                    log::debug!("No {} packages in {}", PACKAGE_PATTERN, cache_dir.display());
                    searched.push(cache_dir.join(PACKAGE_PATTERN));
                }
            }
        }

        for dir in &self.search_dirs {
            if let Some(found) = find_in_tree(dir) {
                return Ok(found);
            }
            searched.push(dir.join("**").join(PRIMARY_HEADER));
        }

        let attempted = searched
            .first()
            .cloned()
            .unwrap_or_else(|| PathBuf::from(PRIMARY_HEADER));
        Err(BindgenError::header_not_found_in(attempted, searched))
    }
}

/// `$ZIG_GLOBAL_CACHE_DIR/p`, else `~/.cache/zig/p`
pub fn default_cache_dir() -> Option<PathBuf> {
    if let Some(global) = std::env::var_os("ZIG_GLOBAL_CACHE_DIR") {
        return Some(PathBuf::from(global).join("p"));
    }

    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(".cache").join("zig").join("p"))
}

/// Package directories in `cache_dir`, most recently modified first
pub fn newest_packages(cache_dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = cache_dir.join(PACKAGE_PATTERN);
    let pattern = pattern.to_string_lossy();

    let mut packages: Vec<(SystemTime, PathBuf)> = Vec::new();
    for entry in glob(&pattern).with_context(|| format!("Invalid cache pattern: {}", pattern))? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                log::debug!("Skipping unreadable cache entry: {}", e);
                continue;
            }
        };
        if !path.is_dir() {
            continue;
        }
        let modified = fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .with_context(|| format!("Failed to read modification time of {}", path.display()))?;
        packages.push((modified, path));
    }

    // Newest first; ties broken by path so repeated runs agree
    packages.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    Ok(packages.into_iter().map(|(_, path)| path).collect())
}

fn find_in_tree(dir: &Path) -> Option<PathBuf> {
    if !dir.exists() {
        log::warn!("Search directory does not exist: {}", dir.display());
        return None;
    }

    let mut matches: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.file_name() == PRIMARY_HEADER)
        .map(|e| e.into_path())
        .collect();

    matches.sort();
    matches.into_iter().next()
}
