use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::{Error, Result};

fn mime_type_for_image(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if data.starts_with(b"\xff\xd8\xff")
        || matches!(data.get(6..10), Some(b"JFIF") | Some(b"Exif"))
    {
        Some("image/jpeg")
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if data.starts_with(b"RIFF") && data.get(8..12) == Some(&b"WEBP"[..]) {
        Some("image/webp")
    } else {
        None
    }
}

/// Encodes raw image bytes as a `data:` URI, the format the API takes for icons.
pub fn bytes_to_base64_data(data: &[u8]) -> Result<String> {
    let mime = mime_type_for_image(data).ok_or(Error::UnsupportedImageType)?;
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(data)))
}
