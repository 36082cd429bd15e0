//! Local image intake: a file path typed into an image prompt becomes an
//! inline `data:` URL stored straight on the card.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Sniff the MIME type of a raster image from its leading bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.starts_with(b"BM") {
        Some("image/bmp")
    } else {
        None
    }
}

/// Encode image bytes as a data URL, or `None` when the bytes are not an image.
pub fn data_url(bytes: &[u8]) -> Option<String> {
    let mime = sniff_mime(bytes)?;
    Some(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// Load an image file as a data URL. Files that are not images are ignored and
/// yield `Ok(None)`; only failing to read the file is an error.
pub fn load_image(path: &Path) -> Result<Option<String>, ImageError> {
    let bytes = fs::read(path).map_err(|source| ImageError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let url = data_url(&bytes);
    if url.is_none() {
        debug!(path = %path.display(), "ignoring non-image file");
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    #[test]
    fn recognises_common_raster_formats() {
        assert_eq!(sniff_mime(PNG_HEADER), Some("image/png"));
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(sniff_mime(b"GIF89a...."), Some("image/gif"));
        assert_eq!(sniff_mime(b"RIFF\0\0\0\0WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff_mime(b"hello world"), None);
    }

    #[test]
    fn data_url_carries_mime_and_base64_payload() {
        let url = data_url(PNG_HEADER).expect("png");
        assert!(url.starts_with("data:image/png;base64,"));
        let payload = url.trim_start_matches("data:image/png;base64,");
        assert_eq!(STANDARD.decode(payload).expect("decode"), PNG_HEADER);
    }

    #[test]
    fn non_image_files_are_silently_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        fs::write(&path, "not an image").expect("write");
        assert!(load_image(&path).expect("readable").is_none());

        let image = dir.path().join("photo.png");
        fs::write(&image, PNG_HEADER).expect("write");
        assert!(load_image(&image).expect("readable").is_some());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_image(&dir.path().join("missing.png")).unwrap_err();
        assert!(err.to_string().contains("missing.png"));
    }
}
