pub mod cache;
pub mod client;
pub mod encoding;
pub mod error;
pub mod fetch;
pub mod id;
pub mod markers;
pub mod resolve;
pub mod strip;

pub use cache::CacheStore;
pub use client::{TextClient, TextConfig, TextConfigBuilder, default_cache_dir};
#[cfg(feature = "fetch")]
pub use client::{get_text_by_id, get_text_string_by_id};
pub use encoding::{ChardetDetector, EncodingDetector, decode_with_label, detect_and_decode};
pub use error::{GutentextError, Result};
#[cfg(feature = "fetch")]
pub use fetch::HttpTransport;
pub use fetch::{FetchConfig, Transport};
pub use id::WorkId;
#[doc(hidden)]
pub use markers::{LEGALESE_END_MARKERS, LEGALESE_START_MARKERS, TEXT_END_MARKERS, TEXT_START_MARKERS};
pub use resolve::{ARCHIVE_ROOT, EXTENSIONS, candidate_uris, get_text_dir_from_index, resolve_download_uri};
pub use strip::{LINE_SEPARATOR, StripConfig, strip_headers, strip_headers_str, strip_headers_with_config};
