use serde::{Deserialize, Serialize, de::DeserializeOwned};

use storefront_core::RecordId;

// -------------------------
// Response envelopes
// -------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct DataBody<T> {
    pub data: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// -------------------------
// Request parsing helpers
// -------------------------

/// Decode a request body as JSON, whatever `Content-Type` claims.
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(body)
}

pub fn parse_id(raw: &str) -> Option<RecordId> {
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_products::ProductInput;

    #[test]
    fn body_parsing_is_strict_about_shape() {
        assert!(parse_body::<ProductInput>(br#"{"name":"Widget","price":9.99}"#).is_ok());
        assert!(parse_body::<ProductInput>(b"").is_err());
        assert!(parse_body::<ProductInput>(b"{").is_err());
        assert!(parse_body::<ProductInput>(b"[]").is_err());
        assert!(parse_body::<ProductInput>(br#"{"name":1,"price":9.99}"#).is_err());
    }

    #[test]
    fn id_parsing() {
        assert_eq!(parse_id("42"), Some(RecordId::new(42)));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("-1"), None);
    }
}
