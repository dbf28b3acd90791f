use crate::core::errors::{ErrorDetails, MudrexError, UNKNOWN_CODE};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Envelope wrapping every response from the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
    pub error: Option<ApiErrorBody>,
}

const fn default_success() -> bool {
    true
}

/// Structured error carried inside a failed envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: Option<i32>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Fail when the envelope reports `success: false`, whatever the payload.
    pub fn ensure_success(&self, http_status: u16) -> Result<(), MudrexError> {
        if self.success {
            return Ok(());
        }

        let code = self
            .error
            .as_ref()
            .and_then(|e| e.code)
            .unwrap_or(UNKNOWN_CODE);
        let message = self
            .message
            .clone()
            .or_else(|| self.error.as_ref().and_then(|e| e.message.clone()))
            .unwrap_or_else(|| "request was not successful".to_string());

        Err(MudrexError::Api(ErrorDetails::new(
            message,
            code,
            i32::from(http_status),
        )))
    }

    /// Extract `data`, treating a missing or null payload as a contract violation
    pub fn into_data(self, http_status: u16) -> Result<T, MudrexError> {
        self.ensure_success(http_status)?;
        self.data.ok_or_else(|| {
            MudrexError::InvalidResponse("response envelope contains no data".to_string())
        })
    }
}

/// The parts of an envelope needed to classify a failed response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEnvelope {
    pub message: Option<String>,
    pub error: Option<ApiErrorBody>,
}

/// Page selection for list endpoints. Zero means "server default" and is not sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    pub const fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        if self.page > 0 {
            params.push(("page", self.page.to_string()));
        }
        if self.per_page > 0 {
            params.push(("per_page", self.per_page.to_string()));
        }
        params
    }
}

/// Append URL-encoded query parameters to a path. No `?` is added for an empty list.
pub fn path_with_query(path: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{}?{}", path, query)
}

/// Serde adapter for the string-encoded decimals used on the wire.
///
/// Values are written as strings. Null, missing and empty strings read as
/// `None`; any other value must parse as a decimal.
pub mod decimal_str {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::str_option::serialize(value, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => Decimal::from_str(value)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ErrorKind;
    use rust_decimal::Decimal;

    #[test]
    fn test_pagination_omits_zero_values() {
        let path = path_with_query("/fees/history", &Pagination::new(0, 0).query_pairs());
        assert_eq!(path, "/fees/history");

        let path = path_with_query("/fees/history", &Pagination::new(2, 50).query_pairs());
        assert_eq!(path, "/fees/history?page=2&per_page=50");

        let path = path_with_query("/fees/history", &Pagination::new(0, 25).query_pairs());
        assert_eq!(path, "/fees/history?per_page=25");
    }

    #[test]
    fn test_query_values_are_encoded() {
        let params = [("sort_by", "24h volume&x".to_string())];
        assert_eq!(
            path_with_query("/assets", &params),
            "/assets?sort_by=24h+volume%26x"
        );
    }

    #[test]
    fn test_null_data_is_invalid_response() {
        let envelope: ApiResponse<serde_json::Value> =
            serde_json::from_str(r#"{"success":true,"message":null,"data":null,"error":null}"#)
                .unwrap();
        let err = envelope.into_data(200).unwrap_err();
        assert!(matches!(err, MudrexError::InvalidResponse(_)));
    }

    #[test]
    fn test_missing_data_is_invalid_response() {
        let envelope: ApiResponse<Vec<String>> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(matches!(
            envelope.into_data(200),
            Err(MudrexError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_unsuccessful_envelope_fails_even_with_data() {
        let envelope: ApiResponse<Vec<u32>> = serde_json::from_str(
            r#"{"success":false,"message":"halted","data":[1,2],"error":{"code":77,"message":"x"}}"#,
        )
        .unwrap();
        let err = envelope.into_data(200).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.code(), 77);
        assert_eq!(err.http_status(), 200);
        assert!(err.to_string().contains("halted"));
    }

    #[test]
    fn test_successful_envelope_yields_data() {
        let envelope: ApiResponse<Vec<u32>> =
            serde_json::from_str(r#"{"success":true,"data":[1,2,3]}"#).unwrap();
        assert_eq!(envelope.into_data(200).unwrap(), vec![1, 2, 3]);
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Priced {
        #[serde(default, with = "decimal_str")]
        price: Option<Decimal>,
    }

    #[test]
    fn test_decimal_strings() {
        let priced: Priced = serde_json::from_str(r#"{"price":" 65000.50 "}"#).unwrap();
        assert_eq!(priced.price, Some(Decimal::new(6500050, 2)));
        assert_eq!(
            serde_json::to_string(&priced).unwrap(),
            r#"{"price":"65000.50"}"#
        );

        for body in [r#"{}"#, r#"{"price":null}"#, r#"{"price":""}"#] {
            let priced: Priced = serde_json::from_str(body).unwrap();
            assert_eq!(priced.price, None, "{}", body);
        }

        assert!(serde_json::from_str::<Priced>(r#"{"price":"abc"}"#).is_err());
        assert!(serde_json::from_str::<Priced>(r#"{"price":12.5}"#).is_err());
    }
}
