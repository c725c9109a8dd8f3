//! Data URL形式の画像エンコード
//!
//! "data:image/jpeg;base64,/9j/4AAQ..." の形でMIMEタイプとBase64本体を保持する。

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// MIMEタイプが読めない場合のデフォルト
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Data URLからBase64データ部分を抽出
///
/// # Arguments
/// * `data_url` - "data:image/jpeg;base64,/9j/4AAQ..." 形式のData URL
///
/// # Returns
/// Base64エンコードされたデータ部分、または抽出失敗時はNone
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split_once(',').map(|(_, payload)| payload)
}

/// Data URLからMIMEタイプを抽出
///
/// 抽出失敗時は"image/jpeg"をデフォルトとして返す
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    data_url
        .split_once(',')
        .map(|(prefix, _)| prefix)
        .and_then(|prefix| prefix.strip_prefix("data:"))
        .and_then(|rest| rest.split(';').next())
        .filter(|mime| !mime.is_empty())
        .unwrap_or(DEFAULT_MIME_TYPE)
}

/// エンコード済み画像（Data URL）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedImage(String);

impl EncodedImage {
    /// 生バイト列からData URLを組み立てる
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        let payload = general_purpose::STANDARD.encode(bytes);
        Self(format!("data:{};base64,{}", mime_type, payload))
    }

    /// カンマ区切りのプレフィックスと空でない本体を要求する
    pub fn parse(text: &str) -> Result<Self> {
        match text.split_once(',') {
            None => Err(Error::InvalidEncodedImage("missing comma-delimited prefix".into())),
            Some((_, payload)) if payload.trim().is_empty() => {
                Err(Error::InvalidEncodedImage("empty base64 payload".into()))
            }
            Some(_) => Ok(Self(text.to_string())),
        }
    }

    pub fn mime_type(&self) -> &str {
        extract_mime_type_from_data_url(&self.0)
    }

    /// 送信用にプレフィックスを外したBase64本体
    pub fn payload(&self) -> &str {
        extract_base64_from_data_url(&self.0).unwrap_or_default()
    }

    /// 本体をデコード（PDF埋め込み等）
    pub fn decode(&self) -> Result<Vec<u8>> {
        general_purpose::STANDARD
            .decode(self.payload().trim())
            .map_err(|e| Error::InvalidEncodedImage(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_base64_from_data_url_jpeg() {
        let data_url = "data:image/jpeg;base64,/9j/4AAQSkZJRg==";
        assert_eq!(extract_base64_from_data_url(data_url), Some("/9j/4AAQSkZJRg=="));
    }

    #[test]
    fn test_extract_base64_from_data_url_invalid() {
        assert_eq!(extract_base64_from_data_url("not a data url"), None);
        assert_eq!(extract_base64_from_data_url(""), None);
    }

    #[test]
    fn test_extract_mime_type() {
        assert_eq!(extract_mime_type_from_data_url("data:image/png;base64,iVBORw0KGgo="), "image/png");
        assert_eq!(extract_mime_type_from_data_url("data:image/webp;base64,UklGR"), "image/webp");
        assert_eq!(extract_mime_type_from_data_url("invalid"), "image/jpeg");
        assert_eq!(extract_mime_type_from_data_url("data:;base64,AAAA"), "image/jpeg");
    }

    #[test]
    fn test_from_bytes_has_mime_prefix_and_payload() {
        let encoded = EncodedImage::from_bytes("image/png", &[0x89, b'P', b'N', b'G']);
        let text = encoded.as_str();
        assert!(text.starts_with("data:image/png;base64,"));
        let (prefix, payload) = text.split_once(',').unwrap();
        assert_eq!(prefix, "data:image/png;base64");
        assert!(!payload.is_empty());
        assert_eq!(encoded.decode().unwrap(), vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_parse_rejects_missing_prefix() {
        let err = EncodedImage::parse("iVBORw0KGgo=").unwrap_err();
        assert!(matches!(err, Error::InvalidEncodedImage(_)));
    }

    #[test]
    fn test_parse_rejects_empty_payload() {
        assert!(EncodedImage::parse("data:image/png;base64,").is_err());
        assert!(EncodedImage::parse("data:image/png;base64,   ").is_err());
    }

    #[test]
    fn test_parse_strips_prefix_for_payload() {
        let encoded = EncodedImage::parse("data:image/jpeg;base64,/9j/4AAQ").unwrap();
        assert_eq!(encoded.payload(), "/9j/4AAQ");
        assert_eq!(encoded.mime_type(), "image/jpeg");
    }
}
