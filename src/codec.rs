//! Share-link payload encoding.
//!
//! A [`ListPayload`] travels as JSON, base64-encoded with the URL-safe
//! alphabet (`-` and `_`) and without trailing `=` padding, embedded as the
//! last path segment of `.../list/<token>`.

use crate::models::ListPayload;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use thiserror::Error;
use tracing::warn;

/// Path segment that precedes the encoded payload in a share link.
pub const LIST_SEGMENT: &str = "/list/";

/// URL-safe alphabet, no padding on encode, padding optional on decode.
const LINK_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Failure to turn a link or token back into a payload.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The link has no `/list/<token>` segment.
    #[error("link has no list segment")]
    MissingSegment,

    /// The token is not valid base64.
    #[error("invalid base64 in list token: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not UTF-8 text.
    #[error("list token is not UTF-8 text: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The decoded text is not a list payload.
    #[error("invalid list data: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    /// Message suitable for showing to whoever pasted the link.
    pub fn user_message(&self) -> &'static str {
        "Invalid or corrupted link"
    }
}

/// Encode a payload as a URL-safe token.
pub fn encode_payload(payload: &ListPayload) -> Result<String, CodecError> {
    let json = serde_json::to_string(payload)?;
    Ok(LINK_ENGINE.encode(json.as_bytes()))
}

/// Decode a token produced by [`encode_payload`].
///
/// Tokens using the standard alphabet (`+`, `/`) or carrying `=` padding are
/// accepted as well; older links were produced that way.
pub fn decode_payload(token: &str) -> Result<ListPayload, CodecError> {
    let normalized = normalize_token(token);

    let bytes = LINK_ENGINE.decode(normalized.as_bytes()).map_err(|e| {
        warn!("Failed to decode list token: {}", e);
        CodecError::from(e)
    })?;
    let text = String::from_utf8(bytes)?;

    serde_json::from_str(&text).map_err(|e| {
        warn!("Decoded list token is not a list payload: {}", e);
        CodecError::from(e)
    })
}

/// Map the standard alphabet onto the URL-safe one and pad to a multiple of
/// four characters.
fn normalize_token(token: &str) -> String {
    let trimmed = token.trim().trim_end_matches('=');
    let mut normalized: String = trimmed
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let padding = (4 - normalized.len() % 4) % 4;
    normalized.extend(std::iter::repeat('=').take(padding));
    normalized
}

/// Extract the token from a share link.
///
/// Accepts `https://host/list/<token>` (query string and fragment ignored)
/// or a bare token. A bare token may contain `/` when it uses the standard
/// alphabet. Input with a scheme or a leading `/` but no list segment is
/// rejected.
pub fn extract_token(link: &str) -> Result<&str, CodecError> {
    let link = link.trim();

    let token = match link.find(LIST_SEGMENT) {
        Some(pos) => &link[pos + LIST_SEGMENT.len()..],
        None if link.contains("://") || link.starts_with('/') => {
            return Err(CodecError::MissingSegment);
        }
        None => link,
    };

    let token = token
        .split(|c| c == '?' || c == '#')
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    if token.is_empty() {
        return Err(CodecError::MissingSegment);
    }
    Ok(token)
}

/// Decode the payload carried by a share link or bare token.
pub fn payload_from_link(link: &str) -> Result<ListPayload, CodecError> {
    decode_payload(extract_token(link)?)
}

/// Build a share link for `payload` under `base_url`.
pub fn share_link(base_url: &str, payload: &ListPayload) -> Result<String, CodecError> {
    let token = encode_payload(payload)?;
    Ok(format!(
        "{}{}{}",
        base_url.trim_end_matches('/'),
        LIST_SEGMENT,
        token
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    fn payload(title: &str, items: &[&str]) -> ListPayload {
        ListPayload {
            title: title.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_round_trip_ascii() {
        let original = payload("Top films", &["Alien", "Heat", "Ran, 1985"]);
        let token = encode_payload(&original).unwrap();
        assert_eq!(decode_payload(&token).unwrap(), original);
    }

    #[test]
    fn test_round_trip_multibyte() {
        let original = payload("Café ☕", &["naïve", "日本語", "🚀 launch", "Ωmega"]);
        let token = encode_payload(&original).unwrap();
        assert_eq!(decode_payload(&token).unwrap(), original);
    }

    #[test]
    fn test_token_is_url_safe() {
        // "?>?" style bytes produce '+' and '/' in the standard alphabet.
        let original = payload("??>>", &["~~~", "???"]);
        let token = encode_payload(&original).unwrap();
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
        assert!(!token.ends_with('='));
    }

    #[test]
    fn test_known_encoding() {
        let token = encode_payload(&payload("T", &["x"])).unwrap();
        // {"title":"T","items":["x"]}
        assert_eq!(token, "eyJ0aXRsZSI6IlQiLCJpdGVtcyI6WyJ4Il19");
    }

    #[test]
    fn test_decodes_standard_padded_token() {
        let original = payload("Legacy?", &["a>b", "ü"]);
        let json = serde_json::to_string(&original).unwrap();
        let legacy = STANDARD.encode(json.as_bytes());
        assert_eq!(decode_payload(&legacy).unwrap(), original);
    }

    #[test]
    fn test_invalid_base64() {
        assert!(matches!(
            decode_payload("not*base64!"),
            Err(CodecError::Base64(_))
        ));
    }

    #[test]
    fn test_invalid_json() {
        let token = LINK_ENGINE.encode(b"{\"title\": 3}");
        let err = decode_payload(&token).unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
        assert_eq!(err.user_message(), "Invalid or corrupted link");
    }

    #[test]
    fn test_extract_token() {
        assert_eq!(
            extract_token("https://listjiggler.com/list/abc123").unwrap(),
            "abc123"
        );
        assert_eq!(
            extract_token("https://x.test/list/abc?utm=1#top").unwrap(),
            "abc"
        );
        assert_eq!(extract_token("  abc_-9 ").unwrap(), "abc_-9");
        assert!(matches!(
            extract_token("https://listjiggler.com/create"),
            Err(CodecError::MissingSegment)
        ));
        assert!(matches!(
            extract_token("https://x.test/list/"),
            Err(CodecError::MissingSegment)
        ));
        assert!(matches!(
            extract_token("/create"),
            Err(CodecError::MissingSegment)
        ));
    }

    #[test]
    fn test_bare_standard_token_with_slash_from_link() {
        let original = payload("t100?", &["x100>~"]);
        let json = serde_json::to_string(&original).unwrap();
        let legacy = STANDARD.encode(json.as_bytes());
        assert_eq!(legacy, "eyJ0aXRsZSI6InQxMDA/IiwiaXRlbXMiOlsieDEwMD5+Il19");

        assert_eq!(extract_token(&legacy).unwrap(), legacy);
        assert_eq!(payload_from_link(&legacy).unwrap(), original);

        let link = format!("https://listjiggler.com/list/{}", legacy);
        assert_eq!(payload_from_link(&link).unwrap(), original);
    }

    #[test]
    fn test_share_link_round_trip() {
        let original = payload("Snacks", &["chips", "popcorn"]);
        let link = share_link("https://listjiggler.com/", &original).unwrap();
        assert!(link.starts_with("https://listjiggler.com/list/"));
        assert_eq!(payload_from_link(&link).unwrap(), original);
    }
}
