//! Minimal HTTP/1.1 server standing in for the GitHub releases API.
//!
//! Serves one release for `acme/tool` under the latest route and under the
//! percent-encoded tag routes in [`TAGS`], plus the asset bytes under
//! `/download/<name>`. The release's `tag_name` echoes the tag it was
//! requested by.
//! Anything else is a 404. Every request line and its Authorization header
//! are recorded for assertions.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// Tags with a release, as (tag, encoded path segment)
pub const TAGS: &[(&str, &str)] = &[
    ("v1.0.0", "v1.0.0"),
    ("v1.0.0#nightly", "v1.0.0%23nightly"),
    ("release/1.0", "release%2F1.0"),
];

#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub authorization: Option<String>,
}

pub struct ReleaseServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl ReleaseServer {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

/// Start serving `assets` (name, bytes) in a background thread.
pub fn start(assets: Vec<(String, Vec<u8>)>) -> ReleaseServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base_url = format!("http://127.0.0.1:{}", port);
    let requests = Arc::new(Mutex::new(Vec::new()));

    let assets = Arc::new(assets);
    let recorded = Arc::clone(&requests);
    let base = base_url.clone();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let assets = Arc::clone(&assets);
            let recorded = Arc::clone(&recorded);
            let base = base.clone();
            thread::spawn(move || handle(stream, &base, &assets, &recorded));
        }
    });

    ReleaseServer { base_url, requests }
}

fn release_json(base: &str, tag: &str, assets: &[(String, Vec<u8>)]) -> String {
    let assets: Vec<serde_json::Value> = assets
        .iter()
        .map(|(name, body)| {
            serde_json::json!({
                "name": name,
                "browser_download_url": format!("{}/download/{}", base, name),
                "size": body.len(),
            })
        })
        .collect();
    serde_json::json!({ "tag_name": tag, "assets": assets }).to_string()
}

fn handle(
    mut stream: TcpStream,
    base: &str,
    assets: &[(String, Vec<u8>)],
    recorded: &Mutex<Vec<Recorded>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    let request = String::from_utf8_lossy(&request).to_string();

    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    let authorization = request
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("authorization")
                .then(|| value.trim().to_string())
        });
    recorded.lock().unwrap().push(Recorded {
        path: path.clone(),
        authorization,
    });

    let release_tag = if path == "/repos/acme/tool/releases/latest" {
        Some("v1.0.0")
    } else {
        path.strip_prefix("/repos/acme/tool/releases/tags/")
            .and_then(|segment| TAGS.iter().find(|(_, encoded)| *encoded == segment))
            .map(|(tag, _)| *tag)
    };
    let download = path
        .strip_prefix("/download/")
        .and_then(|name| assets.iter().find(|(n, _)| n == name));

    let (status, content_type, body) = match (release_tag, download) {
        (Some(tag), _) => (
            "200 OK",
            "application/json",
            release_json(base, tag, assets).into_bytes(),
        ),
        (None, Some((_, bytes))) => ("200 OK", "application/octet-stream", bytes.clone()),
        (None, None) => (
            "404 Not Found",
            "application/json",
            br#"{"message":"Not Found"}"#.to_vec(),
        ),
    };

    let header = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(&body);
    let _ = stream.flush();
}
