use serde::{Deserialize, Serialize};

use crate::ApiError;

/// The wrapper the API puts around every payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

impl<T> ApiResponse<T> {
    pub const STATUS_OK: &'static str = "ok";

    pub fn ok(data: T) -> Self {
        Self {
            status: Self::STATUS_OK.to_owned(),
            error: None,
            data: Some(data),
            code: Some(200),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case(Self::STATUS_OK) && self.error.is_none()
    }

    /// The payload of a successful response.
    ///
    /// A non-ok status, an error message, or a missing payload all become an
    /// [`ApiError`].
    pub fn into_data(self) -> Result<T, ApiError> {
        let ok = self.is_ok();
        match self.data {
            Some(data) if ok => Ok(data),
            _ => Err(ApiError {
                message: self
                    .error
                    .unwrap_or_else(|| "response carried no data".to_owned()),
                status: self.status,
                code: self.code,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_response_yields_data() {
        let response: ApiResponse<u32> =
            serde_json::from_str(r#"{"status":"ok","error":null,"data":7,"code":200}"#).unwrap();
        assert!(response.is_ok());
        assert_eq!(response.into_data(), Ok(7));
    }

    #[test]
    fn error_response_keeps_message_and_code() {
        let response: ApiResponse<u32> = serde_json::from_str(
            r#"{"status":"error","error":"Invalid API key","data":null,"code":401}"#,
        )
        .unwrap();
        let err = response.into_data().unwrap_err();
        assert_eq!(err.status, "error");
        assert_eq!(err.message, "Invalid API key");
        assert_eq!(err.code, Some(401));
    }

    #[test]
    fn ok_status_without_data_is_an_error() {
        let response: ApiResponse<u32> = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        let err = response.into_data().unwrap_err();
        assert_eq!(err.message, "response carried no data");
        assert_eq!(err.code, None);
    }

    #[test]
    fn ok_constructor_serializes_full_envelope() {
        let json = serde_json::to_string(&ApiResponse::ok(3u32)).unwrap();
        assert_eq!(json, r#"{"status":"ok","error":null,"data":3,"code":200}"#);
    }
}
