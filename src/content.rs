//! In-memory HTML documents addressed by local `blob:` URLs
//!
//! A URL handed out by [`ContentStore::generate_content_url`] stays valid until it is
//! revoked or the store is dropped. Callers own that lifetime.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONTENT_URL_PREFIX: &str = "blob:tv-carousel/";

/// Wrap an HTML fragment in the standalone document template
pub fn wrap_document(content: &str) -> String {
    format!(
        r#"
    <!DOCTYPE html>
    <html>
    <head>
      <title>Generated Content</title>
      <meta name="viewport" content="width=device-width, initial-scale=1.0">
      <style>
        body {{
          font-family: Arial, sans-serif;
          max-width: 800px;
          margin: 0 auto;
          padding: 20px;
          line-height: 1.6;
        }}
        h1, h2, h3 {{ color: #333; }}
        .content {{ background: #f9f9f9; padding: 20px; border-radius: 8px; }}
      </style>
    </head>
    <body>
      <div class="content">
        {content}
      </div>
    </body>
    </html>
  "#
    )
}

struct Document {
    html: String,
    exported: Option<PathBuf>,
}

#[derive(Default)]
pub struct ContentStore {
    documents: HashMap<String, Document>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize `content` as a full document and return a local URL for it
    pub fn generate_content_url(&mut self, content: &str) -> String {
        let url = format!("{}{}", CONTENT_URL_PREFIX, uuid::Uuid::new_v4());
        self.documents
            .insert(url.clone(), Document { html: wrap_document(content), exported: None });
        debug!(url = %url, "Content URL created");
        url
    }

    pub fn resolve(&self, url: &str) -> Option<&str> {
        self.documents.get(url).map(|d| d.html.as_str())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Release a URL and any file exported for it. Returns false for unknown URLs.
    pub fn revoke(&mut self, url: &str) -> bool {
        match self.documents.remove(url) {
            Some(doc) => {
                if let Some(path) = doc.exported {
                    let _ = std::fs::remove_file(path);
                }
                debug!(url = %url, "Content URL revoked");
                true
            }
            None => false,
        }
    }

    pub fn revoke_all(&mut self) {
        let urls: Vec<String> = self.documents.keys().cloned().collect();
        for url in urls {
            self.revoke(&url);
        }
    }

    /// Write the document to `dir` so an external viewer can open it
    pub fn export(&mut self, url: &str, dir: &Path) -> std::io::Result<PathBuf> {
        if let Some(path) = self.documents.get(url).and_then(|d| d.exported.clone()) {
            return Ok(path);
        }
        let html = self.resolve(url).ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, format!("unknown content URL {url}"))
        })?;
        let id = url.trim_start_matches(CONTENT_URL_PREFIX);
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{id}.html"));
        std::fs::write(&path, html)?;
        if let Some(doc) = self.documents.get_mut(url) {
            doc.exported = Some(path.clone());
        }
        Ok(path)
    }
}

impl Drop for ContentStore {
    fn drop(&mut self) {
        self.revoke_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_resolves_to_wrapped_content() {
        let mut store = ContentStore::new();
        let url = store.generate_content_url("<p>hi</p>");
        assert!(url.starts_with(CONTENT_URL_PREFIX));

        let html = store.resolve(&url).unwrap();
        assert!(html.contains("<p>hi</p>"));
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("<title>Generated Content</title>"));
        assert!(html.contains(r#"<meta name="viewport" content="width=device-width, initial-scale=1.0">"#));
        let body = html.find("<div class=\"content\">").unwrap();
        assert!(html[body..].contains("<p>hi</p>"));
    }

    #[test]
    fn each_call_gets_a_fresh_url() {
        let mut store = ContentStore::new();
        let a = store.generate_content_url("");
        let b = store.generate_content_url("");
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn revoked_url_no_longer_resolves() {
        let mut store = ContentStore::new();
        let url = store.generate_content_url("<b>x</b>");
        assert!(store.revoke(&url));
        assert!(store.resolve(&url).is_none());
        assert!(!store.revoke(&url));
        assert!(store.is_empty());
    }

    #[test]
    fn export_writes_file_and_revoke_removes_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ContentStore::new();
        let url = store.generate_content_url("<p>exported</p>");

        let path = store.export(&url, dir.path()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<p>exported</p>"));
        assert_eq!(store.export(&url, dir.path()).unwrap(), path);

        store.revoke_all();
        assert!(!path.exists());
    }

    #[test]
    fn export_writes_resolved_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ContentStore::new();
        let url = store.generate_content_url("<em>same</em>");
        let path = store.export(&url, dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), store.resolve(&url).unwrap());
    }

    #[test]
    fn export_unknown_url_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ContentStore::new();
        let err = store.export("blob:tv-carousel/nope", dir.path()).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
