use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use thiserror::Error;

use crate::UploadFile;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("path has no file name: {0:?}")]
    NoFileName(PathBuf),
    #[error("{path:?} is {size} bytes, limit is {max_bytes}")]
    TooLarge {
        path: PathBuf,
        size: u64,
        max_bytes: u64,
    },
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read a file from disk into an [`UploadFile`], keeping its original name.
///
/// Files larger than `max_bytes` are refused from their metadata without
/// being read. The type check is left to selection validation.
pub fn load_upload(path: &Path, max_bytes: u64) -> Result<UploadFile, UploadError> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| UploadError::NoFileName(path.to_path_buf()))?;
    let io_error = |source: io::Error| UploadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let size = fs::metadata(path).map_err(io_error)?.len();
    if size > max_bytes {
        return Err(UploadError::TooLarge {
            path: path.to_path_buf(),
            size,
            max_bytes,
        });
    }
    let contents = fs::read(path).map_err(io_error)?;
    let mime_type = infer_mime_type(&name, &contents).to_string();
    Ok(UploadFile {
        name,
        mime_type,
        contents: Bytes::from(contents),
    })
}

/// MIME type from the file extension, falling back to the PDF signature.
pub fn infer_mime_type(name: &str, contents: &[u8]) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("txt") | Some("md") => "text/plain",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ if contents.starts_with(PDF_MAGIC) => "application/pdf",
        _ => "application/octet-stream",
    }
}
