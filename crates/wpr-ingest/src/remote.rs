//! Remote tables behind share links.
//!
//! Share links from the usual hosting services point at a viewer page. They
//! are rewritten into direct-download URLs before fetching, and responses that
//! still look like HTML are rejected: that almost always means the file is not
//! shared publicly.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

static GOOGLE_SHEETS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"docs\.google\.com/spreadsheets/d/([A-Za-z0-9_-]+)").expect("valid regex")
});
static GOOGLE_DRIVE_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"drive\.google\.com/(?:file/d/|open\?id=|uc\?(?:.*&)?id=)([A-Za-z0-9_-]+)")
        .expect("valid regex")
});
static GID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[#&?]gid=(\d+)").expect("valid regex"));

/// What the downloaded body looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    Csv,
    Workbook,
}

/// Rewrites a share link into a direct-download URL.
///
/// Links that are not recognised are returned unchanged.
pub fn direct_download_url(url: &str) -> String {
    let url = url.trim();

    if let Some(caps) = GOOGLE_SHEETS.captures(url) {
        let id = &caps[1];
        let mut direct = format!("https://docs.google.com/spreadsheets/d/{id}/export?format=xlsx");
        if let Some(gid) = GID.captures(url) {
            direct.push_str("&gid=");
            direct.push_str(&gid[1]);
        }
        return direct;
    }

    if let Some(caps) = GOOGLE_DRIVE_FILE.captures(url) {
        return format!(
            "https://drive.google.com/uc?export=download&id={}",
            &caps[1]
        );
    }

    if url.contains("dropbox.com") {
        if url.contains("dl=0") {
            return url.replace("dl=0", "dl=1");
        }
        if !url.contains("dl=1") {
            return append_query(url, "dl=1");
        }
        return url.to_string();
    }

    let onedrive = ["1drv.ms", "onedrive.live.com", "sharepoint.com"]
        .iter()
        .any(|host| url.contains(host));
    if onedrive && !url.contains("download=1") {
        return append_query(url, "download=1");
    }

    url.to_string()
}

fn append_query(url: &str, param: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{param}")
}

/// Classifies a downloaded body by its leading bytes and content type.
///
/// ZIP (xlsx/ods) and OLE (xls) signatures are workbooks, HTML is an error,
/// anything else is treated as CSV.
pub fn sniff_payload(bytes: &[u8], content_type: Option<&str>, url: &str) -> Result<Payload> {
    if bytes.starts_with(b"PK\x03\x04") || bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0]) {
        return Ok(Payload::Workbook);
    }

    let html_type = content_type.is_some_and(|value| value.to_ascii_lowercase().contains("text/html"));
    let head: String = String::from_utf8_lossy(&bytes[..bytes.len().min(512)])
        .trim_start_matches('\u{feff}')
        .trim_start()
        .chars()
        .take(64)
        .collect::<String>()
        .to_ascii_lowercase();
    if html_type || head.starts_with("<!doctype html") || head.starts_with("<html") {
        return Err(IngestError::HtmlResponse {
            url: url.to_string(),
        });
    }

    Ok(Payload::Csv)
}

/// A successful download.
#[derive(Debug, Clone)]
pub struct Download {
    pub url: String,
    pub bytes: Vec<u8>,
    pub payload: Payload,
}

/// Blocking HTTP client with a fixed timeout. No retries.
pub struct RemoteClient {
    client: Client,
    max_size: u64,
}

impl RemoteClient {
    pub fn new(timeout: Duration, max_size: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IngestError::Network {
                url: String::new(),
                message: e.to_string(),
            })?;
        Ok(Self { client, max_size })
    }

    /// Downloads the table behind `share_url`.
    pub fn fetch(&self, share_url: &str) -> Result<Download> {
        let url = direct_download_url(share_url);
        if url != share_url.trim() {
            debug!(share_url, url = %url, "rewrote share link");
        }
        info!(url = %url, "downloading remote table");

        let network_error = |e: reqwest::Error| IngestError::Network {
            url: url.clone(),
            message: e.to_string(),
        };
        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, format!("wpr/{}", env!("CARGO_PKG_VERSION")))
            .send()
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().map_err(network_error)?.to_vec();

        let size = bytes.len() as u64;
        if size > self.max_size {
            return Err(IngestError::TooLarge {
                origin: url,
                size,
                max_size: self.max_size,
            });
        }

        let payload = sniff_payload(&bytes, content_type.as_deref(), &url)?;
        debug!(url = %url, bytes = size, ?payload, "download complete");
        Ok(Download {
            url,
            bytes,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn google_sheets_link_exports_xlsx() {
        let url = "https://docs.google.com/spreadsheets/d/1AbC-d_9/edit#gid=42";
        assert_eq!(
            direct_download_url(url),
            "https://docs.google.com/spreadsheets/d/1AbC-d_9/export?format=xlsx&gid=42"
        );
        let url = "https://docs.google.com/spreadsheets/d/1AbC/edit?usp=sharing";
        assert_eq!(
            direct_download_url(url),
            "https://docs.google.com/spreadsheets/d/1AbC/export?format=xlsx"
        );
    }

    #[test]
    fn google_drive_file_link() {
        let url = "https://drive.google.com/file/d/XYZ123/view?usp=sharing";
        assert_eq!(
            direct_download_url(url),
            "https://drive.google.com/uc?export=download&id=XYZ123"
        );
        let url = "https://drive.google.com/open?id=XYZ123";
        assert_eq!(
            direct_download_url(url),
            "https://drive.google.com/uc?export=download&id=XYZ123"
        );
    }

    #[test]
    fn dropbox_and_onedrive() {
        assert_eq!(
            direct_download_url("https://www.dropbox.com/s/abc/base.xlsx?dl=0"),
            "https://www.dropbox.com/s/abc/base.xlsx?dl=1"
        );
        assert_eq!(
            direct_download_url("https://www.dropbox.com/s/abc/base.xlsx"),
            "https://www.dropbox.com/s/abc/base.xlsx?dl=1"
        );
        assert_eq!(
            direct_download_url("https://contoso.sharepoint.com/:x:/g/abc?e=1"),
            "https://contoso.sharepoint.com/:x:/g/abc?e=1&download=1"
        );
    }

    #[test]
    fn unknown_links_unchanged() {
        assert_eq!(
            direct_download_url(" https://example.com/base.csv "),
            "https://example.com/base.csv"
        );
    }

    #[test]
    fn sniff_detects_formats() {
        assert_eq!(
            sniff_payload(b"PK\x03\x04rest", None, "u").unwrap(),
            Payload::Workbook
        );
        assert_eq!(
            sniff_payload(b"Data,Notas\n", Some("text/csv"), "u").unwrap(),
            Payload::Csv
        );
    }

    #[test]
    fn sniff_rejects_html() {
        let err = sniff_payload(b"  <!DOCTYPE html><html>", None, "u").unwrap_err();
        assert!(matches!(err, IngestError::HtmlResponse { .. }));
        let err = sniff_payload(b"Data,Notas", Some("text/html; charset=utf-8"), "u").unwrap_err();
        assert!(matches!(err, IngestError::HtmlResponse { .. }));
    }
}
