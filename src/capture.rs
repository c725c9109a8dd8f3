//! 画像ファイルの取り込み
//!
//! ファイルを読み込み、形式を判定してData URLにする。ネットワークI/Oはしない。

use crate::error::{EcoWasteError, Result};
use ecowaste_common::EncodedImage;
use std::path::Path;

/// 画像ファイルをData URLにエンコード
pub fn encode_file(path: &Path) -> Result<EncodedImage> {
    if !path.is_file() {
        return Err(EcoWasteError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    encode_bytes(&bytes).map_err(|e| match e {
        EcoWasteError::UnsupportedImage(reason) => {
            EcoWasteError::UnsupportedImage(format!("{} ({})", path.display(), reason))
        }
        other => other,
    })
}

/// バイト列の先頭から画像形式を判定してエンコード
pub fn encode_bytes(bytes: &[u8]) -> Result<EncodedImage> {
    if bytes.is_empty() {
        return Err(EcoWasteError::UnsupportedImage("empty file".into()));
    }

    let format = image::guess_format(bytes)
        .map_err(|e| EcoWasteError::UnsupportedImage(e.to_string()))?;

    tracing::debug!(mime_type = format.to_mime_type(), bytes = bytes.len(), "image captured");
    Ok(EncodedImage::from_bytes(format.to_mime_type(), bytes))
}
