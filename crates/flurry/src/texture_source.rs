//! Where the liquid texture comes from.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use flurry_background::{Texture, TextureError, TextureSource};

/// Timeout for texture downloads.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Texture fetched over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpTextureSource {
    url: String,
}

impl HttpTextureSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl TextureSource for HttpTextureSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn load(&self) -> Result<Texture, TextureError> {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .new_agent();

        let bytes = agent
            .get(&self.url)
            .call()
            .map_err(|e| TextureError::Fetch(format!("HTTP error: {e}")))?
            .body_mut()
            .read_to_vec()
            .map_err(|e| TextureError::Fetch(format!("body read error: {e}")))?;

        Texture::decode(&bytes)
    }
}

/// Texture read from a local file.
#[derive(Debug, Clone)]
pub struct FileTextureSource {
    path: PathBuf,
}

impl FileTextureSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TextureSource for FileTextureSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Texture, TextureError> {
        let bytes = fs::read(&self.path)?;
        Texture::decode(&bytes)
    }
}

/// Pick a source for a configured location: URLs are downloaded, anything
/// else is treated as a file path.
pub fn texture_source(location: &str) -> Arc<dyn TextureSource> {
    let location = location.trim();
    if location.starts_with("http://") || location.starts_with("https://") {
        Arc::new(HttpTextureSource::new(location))
    } else {
        Arc::new(FileTextureSource::new(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_selection() {
        let remote = texture_source("https://assets.codepen.io/33787/liquid.webp");
        assert_eq!(remote.describe(), "https://assets.codepen.io/33787/liquid.webp");

        let local = texture_source(" /tmp/liquid.png ");
        assert_eq!(local.describe(), "/tmp/liquid.png");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileTextureSource::new(dir.path().join("absent.webp"));
        assert!(matches!(source.load(), Err(TextureError::Io(_))));
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("liquid.png");
        fs::write(&path, b"definitely not a png").unwrap();
        let source = FileTextureSource::new(path);
        assert!(matches!(source.load(), Err(TextureError::Decode(_))));
    }
}
