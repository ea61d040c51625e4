//! Converts locally selected image files into data URIs.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("reading image {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not an image (detected {mime})")]
    NotAnImage { path: PathBuf, mime: String },
}

pub fn is_data_uri(source: &str) -> bool {
    source.starts_with("data:")
}

/// Read `path` and encode it as `data:<mime>;base64,<payload>`.
pub async fn read_as_data_uri(path: impl AsRef<Path>) -> Result<String, ImageError> {
    let path = path.as_ref();
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(ImageError::NotAnImage {
            path: path.to_path_buf(),
            mime: mime.essence_str().to_string(),
        });
    }

    let bytes = tokio::fs::read(path).await.map_err(|source| ImageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("encoded {} ({} bytes)", path.display(), bytes.len());
    Ok(format!("data:{};base64,{}", mime.essence_str(), STANDARD.encode(bytes)))
}
