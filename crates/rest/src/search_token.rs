//! Search token codec.
//!
//! Search templates travel inside the URL path as URL-safe base64 without
//! padding, wrapping the template's raw JSON bytes. Only the base64 layer
//! lives here; whether the decoded bytes fit a table's record type is
//! decided later by the table itself.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde_json::Value;

/// Encodes raw template bytes into a path-safe search token.
pub fn encode(template: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(template)
}

/// Encodes a JSON template into a path-safe search token.
pub fn encode_json(template: &Value) -> String {
    let json = serde_json::to_vec(template).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(&json)
}

/// Decodes a search token back into template bytes.
///
/// Fails when the token is not valid URL-safe base64.
pub fn decode(token: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip() {
        let template = json!({"title": "Dune", "pages": 412});
        let token = encode_json(&template);
        let bytes = decode(&token).unwrap();
        let back: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, template);
    }

    #[test]
    fn test_empty_template_encodes_to_e30() {
        assert_eq!(encode_json(&json!({})), "e30");
        assert_eq!(decode("e30").unwrap(), b"{}");
    }

    #[test]
    fn test_tokens_are_path_safe() {
        // Enough entropy to exercise the URL-safe alphabet
        let template = json!({"blob": "\u{00ff}\u{00fe}??>>~~"});
        let token = encode_json(&template);
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
        assert!(!token.contains('='));
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        assert!(decode("not-valid-base64!!!").is_err());
    }

    #[test]
    fn test_decode_rejects_padded_tokens() {
        assert!(decode("e30=").is_err());
    }
}
