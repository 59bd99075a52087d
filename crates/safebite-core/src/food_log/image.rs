//! Embedding meal photos as opaque `data:` references.
//!
//! The journal never looks inside an image; it only stores the reference
//! produced here.

use base64::Engine;
use std::path::Path;

/// Guess a MIME type from a file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Encode raw bytes as a `data:<mime>;base64,...` reference.
pub fn encode_data_url(bytes: &[u8], mime: &str) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{payload}")
}

/// Read an image file and return its `data:` reference.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_image_ref(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(encode_data_url(&bytes, mime_for_path(path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn encodes_data_url() {
        assert_eq!(encode_data_url(b"hi", "image/png"), "data:image/png;base64,aGk=");
    }

    #[test]
    fn mime_from_extension() {
        assert_eq!(mime_for_path(Path::new("lunch.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("lunch")), "application/octet-stream");
    }

    #[test]
    fn loads_file_as_reference() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(&[0x89, b'P', b'N', b'G']).unwrap();
        let reference = load_image_ref(file.path()).unwrap();
        assert!(reference.starts_with("data:image/png;base64,"));
    }
}
