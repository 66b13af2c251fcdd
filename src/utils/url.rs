// src/utils/url.rs

//! URL helpers for manifest locations and download links.

use url::Url;

use crate::error::{AppError, Result};

/// Whether a manifest location should be fetched over HTTP.
pub fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Builds download links by appending artifact paths to a base URL.
#[derive(Debug, Clone)]
pub struct DownloadLinks {
    base: Url,
}

impl DownloadLinks {
    /// Create a link builder. The base must be a hierarchical URL.
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base)?;
        if base.cannot_be_a_base() {
            return Err(AppError::config(format!(
                "download base URL '{base}' cannot carry a path"
            )));
        }
        Ok(Self { base })
    }

    /// Download URL for a repository-relative artifact path.
    ///
    /// Slashes in `path` separate segments; everything inside a segment
    /// that is not allowed in a URL path segment is percent-encoded.
    ///
    /// # Examples
    /// ```
    /// use fwhub::utils::url::DownloadLinks;
    ///
    /// let links = DownloadLinks::new("https://example.com/fw/main/").unwrap();
    /// assert_eq!(
    ///     links.link("3A6000Series/A B/fw.fd"),
    ///     "https://example.com/fw/main/3A6000Series/A%20B/fw.fd"
    /// );
    /// ```
    pub fn link(&self, path: &str) -> String {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.trim_start_matches('/').split('/'));
        }
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://raw.githubusercontent.com/loongson/firmware/main/";

    fn download_url(base: &str, path: &str) -> Result<String> {
        Ok(DownloadLinks::new(base)?.link(path))
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com/manifest.json"));
        assert!(is_remote("HTTP://example.com/manifest.json"));
        assert!(!is_remote("web/manifest.json"));
        assert!(!is_remote("/srv/manifest.json"));
    }

    #[test]
    fn test_plain_path_is_appended() {
        assert_eq!(
            download_url(BASE, "3A6000Series/Desktop/XA61200/UDK2018_XA61200_V1.0_rel.fd").unwrap(),
            "https://raw.githubusercontent.com/loongson/firmware/main/3A6000Series/Desktop/XA61200/UDK2018_XA61200_V1.0_rel.fd"
        );
    }

    #[test]
    fn test_segments_are_escaped() {
        assert_eq!(
            download_url(BASE, "Multi/A B/fw#1?.fd").unwrap(),
            format!("{BASE}Multi/A%20B/fw%231%3F.fd")
        );
        assert_eq!(
            download_url(BASE, "a/100%.fd").unwrap(),
            format!("{BASE}a/100%25.fd")
        );
        assert_eq!(
            download_url(BASE, "中文/fw.bin").unwrap(),
            format!("{BASE}%E4%B8%AD%E6%96%87/fw.bin")
        );
    }

    #[test]
    fn test_base_without_trailing_slash() {
        assert_eq!(
            download_url("https://example.com/fw", "a/b.fd").unwrap(),
            "https://example.com/fw/a/b.fd"
        );
        assert_eq!(
            download_url("https://example.com", "/a/b.fd").unwrap(),
            "https://example.com/a/b.fd"
        );
    }

    #[test]
    fn test_rejects_bad_bases() {
        assert!(DownloadLinks::new("not a url").is_err());
        assert!(DownloadLinks::new("mailto:someone@example.com").is_err());
    }
}
