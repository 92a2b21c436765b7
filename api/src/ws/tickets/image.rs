//! Decoding and storing images sent over the chat socket.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::Utc;
use std::io::ErrorKind;
use std::path::Path;
use tokio::io::AsyncWriteExt;

use super::error::ChatError;

#[derive(Debug)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub extension: &'static str,
}

/// Decode a data URI (`data:image/png;base64,...`) or bare base64 string.
///
/// Everything after the first comma is the payload. The file extension comes
/// from the data-URI mime type and falls back to `jpg`.
pub fn decode_image(image: &str, max_bytes: usize) -> Result<DecodedImage, ChatError> {
    let (header, data) = match image.split_once(',') {
        Some((header, data)) => (Some(header), data),
        None => (None, image),
    };

    let data = data.trim();

    // Every 4 base64 chars decode to 3 bytes, less at most 2 bytes of padding.
    let min_size = (data.len() / 4 * 3).saturating_sub(2);
    if min_size > max_bytes {
        return Err(ChatError::TooLarge {
            size: min_size,
            limit: max_bytes,
        });
    }

    let bytes = STANDARD.decode(data)?;
    if bytes.len() > max_bytes {
        return Err(ChatError::TooLarge {
            size: bytes.len(),
            limit: max_bytes,
        });
    }

    Ok(DecodedImage {
        bytes,
        extension: header.map(extension_for).unwrap_or("jpg"),
    })
}

fn extension_for(header: &str) -> &'static str {
    let mime = header
        .trim_start_matches("data:")
        .split(';')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    match mime.as_str() {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "jpg",
    }
}

/// Write `image` into `root` as `image_{unix_millis}.{ext}` and return the file name.
///
/// `root` is created if missing. A name that already exists gets a numeric suffix.
pub async fn save_image(root: &Path, image: &DecodedImage) -> Result<String, ChatError> {
    tokio::fs::create_dir_all(root).await?;

    let stamp = Utc::now().timestamp_millis();
    let mut name = format!("image_{stamp}.{}", image.extension);
    let mut attempt = 1;

    loop {
        let opened = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(root.join(&name))
            .await;

        match opened {
            Ok(mut file) => {
                file.write_all(&image.bytes).await?;
                file.flush().await?;
                return Ok(name);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                name = format!("image_{stamp}_{attempt}.{}", image.extension);
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}
