use serde::{Serialize, de::DeserializeOwned};

use crate::{ApiResponse, DecodeError, EncodeError, WordSearchResult};

/// Converts puzzle payloads between JSON text and typed values.
///
/// The converter holds only output settings, so it is cheap to copy and can
/// be shared between threads as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Converter {
    pretty: bool,
}

const COMPACT: Converter = Converter::compact();

impl Converter {
    pub const fn compact() -> Self {
        Self { pretty: false }
    }

    pub const fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Decode a word search payload. Unknown fields are ignored.
    pub fn parse(&self, json: &str) -> Result<WordSearchResult, DecodeError> {
        self.decode(json)
    }

    /// Decode a full API response, envelope included.
    pub fn parse_response(&self, json: &str) -> Result<ApiResponse<WordSearchResult>, DecodeError> {
        self.decode(json)
    }

    pub fn serialize(&self, result: &WordSearchResult) -> Result<String, EncodeError> {
        self.encode(result)
    }

    pub fn serialize_response(
        &self,
        response: &ApiResponse<WordSearchResult>,
    ) -> Result<String, EncodeError> {
        self.encode(response)
    }

    fn decode<T: DeserializeOwned>(&self, json: &str) -> Result<T, DecodeError> {
        serde_json::from_str(json).map_err(|e| {
            let err = DecodeError::from(e);
            tracing::debug!(error = %err, "failed to decode payload");
            err
        })
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<String, EncodeError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        tracing::trace!(bytes = json.len(), pretty = self.pretty, "encoded payload");
        Ok(json)
    }
}

/// [`Converter::parse`] with the compact converter.
pub fn from_json_str(json: &str) -> Result<WordSearchResult, DecodeError> {
    COMPACT.parse(json)
}

/// [`Converter::serialize`] with the compact converter.
pub fn to_json_string(result: &WordSearchResult) -> Result<String, EncodeError> {
    COMPACT.serialize(result)
}
