//! Download address resolution.
//!
//! The archive publishes each plain-text book under one of a few file names
//! depending on its encoding: `{id}.txt` (ASCII), `{id}-8.txt` (8-bit) or
//! `{id}-0.txt` (UTF-8). The only way to know which one exists is to ask.

use url::Url;

use crate::fetch::Transport;
use crate::{GutentextError, Result, WorkId};

/// Canonical root of the archive.
pub const ARCHIVE_ROOT: &str = "https://www.gutenberg.org";

/// File name suffixes, in preference order.
pub const EXTENSIONS: [&str; 3] = [".txt", "-8.txt", "-0.txt"];

/// Directory of a book relative to the archive root.
pub fn get_text_dir_from_index(id: WorkId) -> String {
    format!("files/{}", id)
}

/// Every candidate address for `id`, in the order they are probed.
pub fn candidate_uris(archive_root: &str, id: WorkId) -> Result<Vec<String>> {
    let root = Url::parse(archive_root).map_err(|e| GutentextError::InvalidUrl(e.to_string()))?;
    if root.cannot_be_a_base() {
        return Err(GutentextError::InvalidUrl(format!("{} cannot be used as a base URL", archive_root)));
    }

    let root = root.as_str().trim_end_matches('/');
    let dir = get_text_dir_from_index(id);

    Ok(EXTENSIONS
        .iter()
        .map(|extension| format!("{}/{}/{}{}", root, dir, id, extension))
        .collect())
}

/// Finds the first candidate address the archive answers for.
///
/// Candidates are probed strictly in [`EXTENSIONS`] order and probing stops
/// at the first status below 400. A transport error aborts the whole
/// resolution; an error status only rules out that one candidate.
pub fn resolve_download_uri<T: Transport + ?Sized>(transport: &T, archive_root: &str, id: WorkId) -> Result<String> {
    for uri in candidate_uris(archive_root, id)? {
        let status = transport.probe(&uri)?;
        if status < 400 {
            tracing::debug!(%id, %uri, status, "resolved download location");
            return Ok(uri);
        }
        tracing::debug!(%id, %uri, status, "candidate rejected");
    }

    Err(GutentextError::UnknownLocation { path: get_text_dir_from_index(id) })
}
