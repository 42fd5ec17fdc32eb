//! On-disk cache of downloaded books.
//!
//! Each book is stored once, gzip-compressed, at `{root}/{id}.txt.gz`. The
//! stored text is the full UTF-8 document, boilerplate included. The mere
//! presence of the file is treated as a cache hit; entries never expire.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use flate2::{Compression, read::GzDecoder, write::GzEncoder};

use crate::{GutentextError, Result, WorkId};

/// Gzip-backed store mapping book ids to their normalized text.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// Creates a store rooted at `root`. Nothing is touched on disk until the first write.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    /// Directory holding the cached files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the cache file for `id`.
    pub fn path_for(&self, id: WorkId) -> PathBuf {
        self.root.join(format!("{}.txt.gz", id))
    }

    pub fn exists(&self, id: WorkId) -> bool {
        self.path_for(id).exists()
    }

    /// Reads and decompresses the entry for `id`.
    ///
    /// The content must be valid UTF-8; anything else is reported as
    /// [`GutentextError::CacheCorrupt`] and left on disk untouched.
    pub fn read(&self, id: WorkId) -> Result<Vec<u8>> {
        self.read_to_string(id).map(String::into_bytes)
    }

    /// String flavour of [`read`](Self::read).
    pub fn read_to_string(&self, id: WorkId) -> Result<String> {
        let path = self.path_for(id);
        let file = File::open(&path)?;

        let mut text = Vec::new();
        GzDecoder::new(file)
            .read_to_end(&mut text)
            .map_err(|e| GutentextError::CacheCorrupt { path: path.clone(), reason: e.to_string() })?;

        String::from_utf8(text).map_err(|e| GutentextError::CacheCorrupt { path, reason: e.to_string() })
    }

    /// Compresses `text` into the entry for `id`, replacing any previous file.
    ///
    /// A write that fails part-way removes the file again, so a failed write
    /// never leaves an entry behind.
    pub fn write(&self, id: WorkId, text: &[u8]) -> Result<()> {
        let path = self.path_for(id);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| GutentextError::CacheDir { path: parent.to_path_buf(), source })?;
        }

        let file = File::create(&path)?;
        if let Err(e) = compress_into(file, text) {
            if let Err(cleanup) = fs::remove_file(&path) {
                tracing::warn!(path = %path.display(), error = %cleanup, "failed to remove partial cache file");
            }
            return Err(e.into());
        }

        tracing::debug!(%id, path = %path.display(), size = text.len(), "cached text");
        Ok(())
    }
}

fn compress_into(file: File, text: &[u8]) -> std::io::Result<()> {
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(text)?;
    encoder.finish()?;
    Ok(())
}
