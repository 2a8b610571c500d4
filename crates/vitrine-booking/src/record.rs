#![forbid(unsafe_code)]

//! Request and response records.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder shown for a missing name or phone.
pub const NOT_PROVIDED: &str = "未提供";

/// Message of a successful submission.
pub const SUCCESS_MESSAGE: &str = "預約資料已成功送出";

/// Message of the health check.
pub const HEALTH_MESSAGE: &str = "Google Apps Script 運作正常";

/// A submitted booking form. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BookingRequest {
    /// Visitor name.
    #[serde(deserialize_with = "loose_text")]
    pub username: Option<String>,
    /// Contact phone.
    #[serde(deserialize_with = "loose_text")]
    pub phone: Option<String>,
    /// County or city.
    #[serde(deserialize_with = "loose_text")]
    pub county: Option<String>,
    /// District within the county.
    #[serde(deserialize_with = "loose_text")]
    pub district: Option<String>,
    /// Privacy-policy consent. Any truthy JSON value counts.
    #[serde(deserialize_with = "truthy")]
    pub agree: bool,
}

fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// Form fields arrive as whatever the page posted: strings as-is, numbers and
/// bools in their JSON spelling, null as absent.
fn loose_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other @ (Value::Array(_) | Value::Object(_)) => Some(other.to_string()),
    })
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

impl BookingRequest {
    /// Parse a request body.
    ///
    /// # Errors
    ///
    /// Returns the JSON error for malformed bodies.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Name, or [`NOT_PROVIDED`].
    #[must_use]
    pub fn display_name(&self) -> &str {
        non_empty(&self.username).unwrap_or(NOT_PROVIDED)
    }

    /// Phone, or [`NOT_PROVIDED`].
    #[must_use]
    pub fn display_phone(&self) -> &str {
        non_empty(&self.phone).unwrap_or(NOT_PROVIDED)
    }

    /// `"{county} {district}"`, blanks kept as empty.
    #[must_use]
    pub fn address(&self) -> String {
        format!(
            "{} {}",
            self.county.as_deref().unwrap_or_default(),
            self.district.as_deref().unwrap_or_default()
        )
    }

    /// `是` or `否`.
    #[must_use]
    pub fn consent(&self) -> &'static str {
        if self.agree { "是" } else { "否" }
    }

    /// Sheet row for this request stamped with `timestamp`.
    #[must_use]
    pub fn to_row(&self, timestamp: &str) -> Vec<String> {
        let cell = |field: &Option<String>| field.clone().unwrap_or_default();
        vec![
            timestamp.to_owned(),
            cell(&self.username),
            cell(&self.phone),
            cell(&self.county),
            cell(&self.district),
            self.consent().to_owned(),
        ]
    }
}

/// Response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Submission stored and announced.
    Success,
    /// Submission failed.
    Error,
    /// Health check.
    Ok,
}

/// JSON body returned to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    /// Outcome.
    pub status: Status,
    /// Human-readable message.
    pub message: String,
    /// Sheet row of the stored submission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_number: Option<usize>,
}

impl BookingResponse {
    /// Stored as row `row_number`.
    #[must_use]
    pub fn success(row_number: usize) -> Self {
        Self {
            status: Status::Success,
            message: SUCCESS_MESSAGE.to_owned(),
            row_number: Some(row_number),
        }
    }

    /// Failed with `message`.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            row_number: None,
        }
    }

    /// Health check reply.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: Status::Ok,
            message: HEALTH_MESSAGE.to_owned(),
            row_number: None,
        }
    }

    /// Serialize to the wire body.
    #[must_use]
    pub fn to_json(&self) -> String {
        // Only strings, a unit enum and an integer: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default() {
        let req = BookingRequest::from_json("{}").unwrap();
        assert_eq!(req, BookingRequest::default());
        assert_eq!(req.display_name(), NOT_PROVIDED);
        assert_eq!(req.to_row("t"), ["t", "", "", "", "", "否"]);
    }

    #[test]
    fn agree_accepts_truthy_values() {
        for (raw, expected) in [
            ("true", true),
            ("\"on\"", true),
            ("1", true),
            ("false", false),
            ("\"\"", false),
            ("0", false),
            ("null", false),
        ] {
            let req = BookingRequest::from_json(&format!(r#"{{"agree":{raw}}}"#)).unwrap();
            assert_eq!(req.agree, expected, "agree = {raw}");
        }
    }

    #[test]
    fn non_string_fields_are_kept_as_text() {
        let req =
            BookingRequest::from_json(r#"{"username":null,"phone":912345678,"county":true}"#)
                .unwrap();
        assert_eq!(req.username, None);
        assert_eq!(req.phone.as_deref(), Some("912345678"));
        assert_eq!(req.county.as_deref(), Some("true"));
    }

    #[test]
    fn empty_name_is_not_provided() {
        let req = BookingRequest::from_json(r#"{"username":"","phone":"0912"}"#).unwrap();
        assert_eq!(req.display_name(), NOT_PROVIDED);
        assert_eq!(req.display_phone(), "0912");
    }

    #[test]
    fn responses_serialize_camel_case() {
        assert_eq!(
            BookingResponse::success(7).to_json(),
            r#"{"status":"success","message":"預約資料已成功送出","rowNumber":7}"#
        );
        assert_eq!(
            BookingResponse::error("boom").to_json(),
            r#"{"status":"error","message":"boom"}"#
        );
        assert_eq!(
            BookingResponse::ok().to_json(),
            r#"{"status":"ok","message":"Google Apps Script 運作正常"}"#
        );
    }
}
