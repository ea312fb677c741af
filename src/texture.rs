use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::RgbaImage;

/// Encodes raw file bytes as a data URL
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Splits a data URL back into its MIME type and raw bytes
pub fn parse_data_url(url: &str) -> Result<(&str, Vec<u8>)> {
    let rest = url
        .strip_prefix("data:")
        .context("not a data URL (missing data: prefix)")?;

    let (mime, payload) = rest
        .split_once(";base64,")
        .context("data URL is not base64 encoded")?;

    let bytes = STANDARD
        .decode(payload)
        .context("data URL payload is not valid base64")?;

    Ok((mime, bytes))
}

/// Decodes a data URL into an RGBA bitmap for the display material.
///
/// Rows are kept in decode order, top row first; no vertical flip is
/// applied, matching the UV layout of the phone asset.
pub fn decode_data_url(url: &str) -> Result<RgbaImage> {
    if url.is_empty() {
        bail!("empty texture payload");
    }

    let (_mime, bytes) = parse_data_url(url)?;

    let image = image::load_from_memory(&bytes).context("failed to decode image data")?;

    Ok(image.to_rgba8())
}
