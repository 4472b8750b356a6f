//! Image upload ingestion: file on disk to base64 data URI.
//!
//! Reads run on tokio tasks. A finished read is sent over an unbounded
//! channel as an [`ImageLoaded`] and applied to the session whenever the
//! session drains it, so an upload that completes after the user has
//! selected something else still lands on the element it was started for.

#[cfg(test)]
#[path = "image_test.rs"]
mod image_test;

use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use template_canvas::doc::ElementId;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not an image ({mime})")]
    NotAnImage { path: PathBuf, mime: String },
    #[error("image is {size} bytes; limit is {limit}")]
    TooLarge { size: u64, limit: u64 },
}

/// Where a loaded image goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTarget {
    /// `content` of an image element (`logo`).
    Element(ElementId),
    /// The page background.
    Background,
}

/// A finished read, successful or not.
#[derive(Debug)]
pub struct ImageLoaded {
    pub target: ImageTarget,
    pub path: PathBuf,
    pub result: Result<String, ImageError>,
}

/// Format raw bytes as a `data:` URI.
#[must_use]
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64_STANDARD.encode(bytes))
}

/// Read an image file into a data URI.
///
/// The MIME type comes from the file extension and must be `image/*`.
///
/// # Errors
///
/// `NotAnImage` for non-image extensions, `TooLarge` past `max_bytes`, and
/// `Io` when the file can't be read.
pub async fn read_data_uri(path: &Path, max_bytes: u64) -> Result<String, ImageError> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(ImageError::NotAnImage { path: path.to_path_buf(), mime: mime.to_string() });
    }

    let io_err = |source| ImageError::Io { path: path.to_path_buf(), source };
    let meta = tokio::fs::metadata(path).await.map_err(io_err)?;
    if meta.len() > max_bytes {
        return Err(ImageError::TooLarge { size: meta.len(), limit: max_bytes });
    }

    let bytes = tokio::fs::read(path).await.map_err(io_err)?;
    let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
    if size > max_bytes {
        return Err(ImageError::TooLarge { size, limit: max_bytes });
    }

    debug!(path = %path.display(), size, mime = %mime, "image read");
    Ok(encode_data_uri(mime.essence_str(), &bytes))
}

/// Read `path` on a background task and send the outcome on `tx`.
///
/// A closed receiver means the session is gone; the result is dropped.
pub fn spawn_image_read(
    path: PathBuf,
    target: ImageTarget,
    max_bytes: u64,
    tx: mpsc::UnboundedSender<ImageLoaded>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = read_data_uri(&path, max_bytes).await;
        if tx.send(ImageLoaded { target, path, result }).is_err() {
            debug!(?target, "image read finished after session closed");
        }
    })
}
