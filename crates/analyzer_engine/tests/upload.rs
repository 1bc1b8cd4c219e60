use std::fs;

use analyzer_engine::{infer_mime_type, load_upload, UploadError};
use tempfile::TempDir;

#[test]
fn loads_pdf_with_original_name() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Jane Doe.pdf");
    fs::write(&path, b"%PDF-1.7 body").unwrap();

    let upload = load_upload(&path, 1024).unwrap();
    assert_eq!(upload.name, "Jane Doe.pdf");
    assert_eq!(upload.mime_type, "application/pdf");
    assert_eq!(&upload.contents[..], b"%PDF-1.7 body");
}

#[test]
fn missing_file_is_an_io_error() {
    let temp = TempDir::new().unwrap();
    let err = load_upload(&temp.path().join("absent.pdf"), 1024).unwrap_err();
    assert!(matches!(err, UploadError::Io { .. }));
}

#[test]
fn mime_type_follows_extension_then_signature() {
    assert_eq!(infer_mime_type("resume.PDF", b""), "application/pdf");
    assert_eq!(infer_mime_type("resume.txt", b"%PDF-1.4"), "text/plain");
    assert_eq!(infer_mime_type("resume", b"%PDF-1.4"), "application/pdf");
    assert_eq!(infer_mime_type("resume", b"hello"), "application/octet-stream");
    assert_eq!(infer_mime_type("photo.jpeg", b""), "image/jpeg");
}

#[test]
fn oversized_file_is_refused_from_metadata() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("huge.pdf");
    let file = fs::File::create(&path).unwrap();
    // Sparse file: nothing needs to be written for the length to count.
    file.set_len(6 * 1024 * 1024).unwrap();

    let err = load_upload(&path, 5 * 1024 * 1024).unwrap_err();
    match err {
        UploadError::TooLarge {
            size, max_bytes, ..
        } => {
            assert_eq!(size, 6 * 1024 * 1024);
            assert_eq!(max_bytes, 5 * 1024 * 1024);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn file_at_the_limit_is_loaded() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("exact.pdf");
    fs::write(&path, b"%PDF-").unwrap();

    let upload = load_upload(&path, 5).unwrap();
    assert_eq!(upload.contents.len(), 5);
}
