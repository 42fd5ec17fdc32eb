//! Library API integration tests
use std::cell::{Cell, RefCell};

use gutentext_core::*;
use tempfile::TempDir;

/// In-memory archive: serves one file name per id and can be switched off to
/// prove that later calls never reach the network.
struct FakeArchive {
    files: Vec<(String, Vec<u8>)>,
    offline: Cell<bool>,
    broken_downloads: Cell<bool>,
    requests: RefCell<Vec<String>>,
}

impl FakeArchive {
    fn new() -> Self {
        Self {
            files: Vec::new(),
            offline: Cell::new(false),
            broken_downloads: Cell::new(false),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn with_file(mut self, path: &str, body: impl Into<Vec<u8>>) -> Self {
        self.files.push((format!("{}/{}", ARCHIVE_ROOT, path), body.into()));
        self
    }

    fn lookup(&self, url: &str) -> Option<&Vec<u8>> {
        self.files.iter().find(|(u, _)| u == url).map(|(_, body)| body)
    }

    fn check_online(&self, url: &str) -> Result<()> {
        self.requests.borrow_mut().push(url.to_string());
        if self.offline.get() { Err(GutentextError::Transport("network disabled".into())) } else { Ok(()) }
    }
}

impl Transport for FakeArchive {
    fn probe(&self, url: &str) -> Result<u16> {
        self.check_online(url)?;
        Ok(if self.lookup(url).is_some() { 200 } else { 404 })
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.check_online(url)?;
        if self.broken_downloads.get() {
            return Err(GutentextError::Transport(format!("connection reset while reading {}", url)));
        }
        self.lookup(url)
            .cloned()
            .ok_or_else(|| GutentextError::Transport(format!("404 for {}", url)))
    }
}

fn config(dir: &TempDir) -> TextConfig {
    TextConfig::builder().cache_dir(dir.path().join("texts")).build()
}

fn id(n: u64) -> WorkId {
    WorkId::new(n).unwrap()
}

fn book(header: &[&str], body_lines: usize, footer: &[&str]) -> String {
    let mut lines: Vec<String> = header.iter().map(|s| s.to_string()).collect();
    lines.extend((1..=body_lines).map(|n| format!("Body line {}.", n)));
    lines.extend(footer.iter().map(|s| s.to_string()));
    lines.join("\n")
}

#[test]
fn test_second_call_is_served_from_cache() {
    let temp_dir = TempDir::new().unwrap();
    let archive = FakeArchive::new().with_file("files/1342/1342-0.txt", "It is a truth universally acknowledged.");
    let client = TextClient::with_transport(&config(&temp_dir), archive);

    let first = client.get_text_by_id(id(1342)).unwrap();
    client.transport().offline.set(true);
    let second = client.get_text_by_id(id(1342)).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, b"It is a truth universally acknowledged.");
}

#[test]
fn test_cache_survives_new_client() {
    let temp_dir = TempDir::new().unwrap();
    let archive = FakeArchive::new().with_file("files/11/11.txt", "Alice was beginning to get very tired");
    TextClient::with_transport(&config(&temp_dir), archive)
        .get_text_by_id(id(11))
        .unwrap();

    let offline = FakeArchive::new();
    offline.offline.set(true);
    let client = TextClient::with_transport(&config(&temp_dir), offline);

    assert_eq!(
        client.get_text_string_by_id(id(11)).unwrap(),
        "Alice was beginning to get very tired"
    );
    assert_eq!(client.transport().requests.borrow().len(), 0);
}

#[test]
fn test_resolver_probes_in_preference_order() {
    let temp_dir = TempDir::new().unwrap();
    let archive = FakeArchive::new().with_file("files/2701/2701-0.txt", "Call me Ishmael.");
    let client = TextClient::with_transport(&config(&temp_dir), archive);

    assert_eq!(client.get_text_string_by_id(id(2701)).unwrap(), "Call me Ishmael.");

    let requests = client.transport().requests.borrow();
    assert_eq!(
        *requests,
        vec![
            "https://www.gutenberg.org/files/2701/2701.txt",
            "https://www.gutenberg.org/files/2701/2701-8.txt",
            "https://www.gutenberg.org/files/2701/2701-0.txt",
            "https://www.gutenberg.org/files/2701/2701-0.txt",
        ]
    );
}

#[test]
fn test_resolver_prefers_earlier_variant() {
    let temp_dir = TempDir::new().unwrap();
    let archive = FakeArchive::new()
        .with_file("files/98/98-0.txt", "utf-8 edition")
        .with_file("files/98/98-8.txt", "8-bit edition");
    let client = TextClient::with_transport(&config(&temp_dir), archive);

    assert_eq!(client.get_text_string_by_id(id(98)).unwrap(), "8-bit edition");
    assert!(!client.transport().requests.borrow().iter().any(|url| url.ends_with("-0.txt")));
}

#[test]
fn test_unknown_id_probes_every_candidate_then_fails() {
    let temp_dir = TempDir::new().unwrap();
    let client = TextClient::with_transport(&config(&temp_dir), FakeArchive::new());

    let result = client.get_text_by_id(id(424242));

    assert!(matches!(result, Err(GutentextError::UnknownLocation { ref path }) if path == "files/424242"));
    assert_eq!(client.transport().requests.borrow().len(), 3);
    assert!(!client.cache().exists(id(424242)));
}

#[test]
fn test_transport_failure_propagates() {
    let temp_dir = TempDir::new().unwrap();
    let archive = FakeArchive::new();
    archive.offline.set(true);
    let client = TextClient::with_transport(&config(&temp_dir), archive);

    assert!(matches!(client.get_text_by_id(id(5)), Err(GutentextError::Transport(_))));
}

#[test]
fn test_download_failure_after_resolution_leaves_no_cache_entry() {
    let temp_dir = TempDir::new().unwrap();
    let archive = FakeArchive::new().with_file("files/76/76.txt", "You don't know about me");
    archive.broken_downloads.set(true);
    let client = TextClient::with_transport(&config(&temp_dir), archive);

    let result = client.get_text_by_id(id(76));

    assert!(
        matches!(result, Err(GutentextError::Transport(ref msg)) if msg == "connection reset while reading https://www.gutenberg.org/files/76/76.txt")
    );
    assert!(!client.cache().exists(id(76)));
    assert_eq!(client.transport().requests.borrow().len(), 2);
}

#[test]
fn test_latin1_download_normalized_to_utf8() {
    let temp_dir = TempDir::new().unwrap();
    let body: &[u8] = b"Les mis\xe9rables. Le p\xe8re \xe9tait tr\xe8s \xe2g\xe9, et la m\xe8re \xe9tait \xe0 l'\xe9glise.";
    let archive = FakeArchive::new().with_file("files/135/135-8.txt", body);
    let client = TextClient::with_transport(&config(&temp_dir), archive);

    let text = client.get_text_string_by_id(id(135)).unwrap();
    assert!(text.starts_with("Les misérables."));
    assert_eq!(client.cache().read(id(135)).unwrap(), text.as_bytes());
}

#[test]
fn test_bom_is_not_cached() {
    let temp_dir = TempDir::new().unwrap();
    let archive = FakeArchive::new().with_file("files/7/7-0.txt", b"\xEF\xBB\xBFHello".to_vec());
    let client = TextClient::with_transport(&config(&temp_dir), archive);

    assert_eq!(client.get_text_by_id(id(7)).unwrap(), b"Hello");
}

#[test]
fn test_corrupt_cache_is_reported_not_refetched() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(&temp_dir);
    std::fs::create_dir_all(&config.cache_dir).unwrap();
    std::fs::write(config.cache_dir.join("9.txt.gz"), b"garbage").unwrap();

    let archive = FakeArchive::new().with_file("files/9/9.txt", "fresh copy");
    let client = TextClient::with_transport(&config, archive);

    assert!(matches!(client.get_text_by_id(id(9)), Err(GutentextError::CacheCorrupt { .. })));
    assert!(client.transport().requests.borrow().is_empty());
}

#[test]
fn test_cache_store_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let store = CacheStore::new(temp_dir.path());
    let text = "Ünïcödé — “quoted” text\n\nwith blank lines\n".as_bytes();

    store.write(id(100), text).unwrap();
    assert_eq!(store.read(id(100)).unwrap(), text);
}

#[test]
fn test_fetch_then_strip() {
    let temp_dir = TempDir::new().unwrap();
    let text = book(
        &["The Project Gutenberg eBook of Sample", "", "*** START OF THE PROJECT GUTENBERG EBOOK SAMPLE ***"],
        150,
        &["*** END OF THE PROJECT GUTENBERG EBOOK SAMPLE ***", "License text."],
    );
    let archive = FakeArchive::new().with_file("files/1/1.txt", text);
    let client = TextClient::with_transport(&config(&temp_dir), archive);

    let body = strip_headers(client.get_text_by_id(id(1)).unwrap());
    let body = String::from_utf8(body).unwrap();

    assert!(body.starts_with("Body line 1."));
    assert!(body.ends_with("Body line 150."));
    assert!(!body.contains("License"));
}

#[test]
fn test_strip_concrete_scenario() {
    let mut lines: Vec<String> = (1..=650).map(|n| format!("Line {}", n)).collect();
    lines[4] = "*** START OF THE PROJECT GUTENBERG EBOOK EXAMPLE ***".to_string();
    lines[619] = "*** END OF THE PROJECT GUTENBERG EBOOK EXAMPLE ***".to_string();

    let expected = lines[5..619].join(LINE_SEPARATOR).into_bytes();
    assert_eq!(strip_headers(lines.join("\n")), expected);
}

#[test]
fn test_strip_header_reset_last_marker_wins() {
    let text = book(
        &["Header", "Produced by First", "filler one", "filler two", "*** START OF THIS PROJECT GUTENBERG EBOOK"],
        10,
        &[],
    );

    let stripped = strip_headers_str(&text);
    assert!(stripped.starts_with("Body line 1."));
    assert!(!stripped.contains("filler"));
}

#[test]
fn test_strip_footer_at_index_150() {
    let mut lines: Vec<String> = (0..200).map(|n| format!("Line {}", n)).collect();
    lines[150] = "End of Project Gutenberg's Example".to_string();

    assert_eq!(strip_headers_str(&lines.join("\n")), lines[..150].join(LINE_SEPARATOR));
}

#[test]
fn test_strip_legalese_block() {
    let text = [
        "Before",
        "<<THIS ELECTRONIC VERSION OF THE COMPLETE WORKS OF WILLIAM",
        "SHAKESPEARE IS COPYRIGHT 1990-1993 BY WORLD LIBRARY, INC.",
        "SERVICE THAT CHARGES FOR DOWNLOAD TIME OR FOR MEMBERSHIP.>>",
        "After",
    ]
    .join("\n");

    assert_eq!(strip_headers_str(&text), ["Before", "After"].join(LINE_SEPARATOR));
}

#[test]
fn test_strip_config_thresholds() {
    let mut lines: Vec<String> = (0..20).map(|n| format!("Line {}", n)).collect();
    lines[10] = "*** END OF THE PROJECT GUTENBERG EBOOK".to_string();

    let config = StripConfig { footer_threshold: 5, line_separator: "\n".into(), ..Default::default() };
    assert_eq!(
        strip_headers_with_config(lines.join("\n"), &config),
        lines[..10].join("\n").into_bytes()
    );
}

#[test]
fn test_get_text_dir_from_index() {
    assert_eq!(get_text_dir_from_index(id(84)), "files/84");
}
