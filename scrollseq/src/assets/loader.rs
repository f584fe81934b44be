use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::foundation::error::{ScrollSeqError, ScrollSeqResult};

/// Source of encoded frame bytes addressed by URL.
///
/// Loads are issued by the page and delivered back to sections one completion at a time, so a
/// loader only has to answer single requests.
pub trait FrameLoader {
    /// Fetch the encoded bytes behind `url`.
    fn fetch(&mut self, url: &str) -> ScrollSeqResult<Vec<u8>>;
}

/// Loader that resolves frame URLs as paths relative to an assets root directory.
#[derive(Clone, Debug)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    /// Loader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Assets root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FrameLoader for FsLoader {
    fn fetch(&mut self, url: &str) -> ScrollSeqResult<Vec<u8>> {
        let norm = normalize_rel_path(url)?;
        let p = self.root.join(Path::new(&norm));
        std::fs::read(&p).map_err(|e| {
            ScrollSeqError::asset(format!("failed to read frame '{}': {e}", p.display()))
        })
    }
}

/// In-memory loader keyed by exact URL.
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    /// Empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register encoded bytes for `url`.
    pub fn insert(&mut self, url: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(url.into(), bytes);
    }
}

impl FrameLoader for MemoryLoader {
    fn fetch(&mut self, url: &str) -> ScrollSeqResult<Vec<u8>> {
        self.entries
            .get(url)
            .cloned()
            .ok_or_else(|| ScrollSeqError::asset(format!("no frame registered for '{url}'")))
    }
}

/// Normalize and validate frame URLs relative to the assets root.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> ScrollSeqResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(ScrollSeqError::validation("frame paths must be relative"));
    }
    if s.is_empty() {
        return Err(ScrollSeqError::validation("frame path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ScrollSeqError::validation(
                "frame paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ScrollSeqError::validation(
            "frame path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
