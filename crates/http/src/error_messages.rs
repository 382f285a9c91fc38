//! User-facing error messages
//!
//! Failed requests surface as structurally unknown JSON values. The helpers
//! here dig the most specific backend-authored text out of such a value
//! without ever echoing raw structure back to the user.
//!
//! The expected (but never enforced) shape is
//!
//! ```json
//! {
//!   "message": "Request failed with status code 400",
//!   "response": {
//!     "status": 400,
//!     "data": {
//!       "detail": "..." | { "message": "...", "error": "...", "code": "..." },
//!       "error": "...",
//!       "code": "..."
//!     }
//!   }
//! }
//! ```

use serde_json::Value;

/// Convert an arbitrary error value into a display-safe message
///
/// Candidates are tried from the most specific to the most generic:
///
/// 1. `response.data.detail`: its `message` or `error` field when it is an
///    object, or the detail itself when it is a string. An object without
///    either field yields `default_message`; it is never serialized.
/// 2. `response.data.error`
/// 3. `response.data` when the body is a plain string
/// 4. `message` on the error itself
///
/// Anything else, including a non-object `error`, yields `default_message`.
/// Empty strings count as missing.
///
/// # Examples
///
/// ```
/// use booking_http::error_messages::normalize_error;
/// use serde_json::json;
///
/// let error = json!({ "response": { "data": { "detail": "Zone is closed" } } });
/// assert_eq!(normalize_error(&error, "Something went wrong"), "Zone is closed");
///
/// let error = json!({ "response": { "data": { "detail": { "code": 42 } } } });
/// assert_eq!(normalize_error(&error, "Something went wrong"), "Something went wrong");
/// ```
pub fn normalize_error(error: &Value, default_message: &str) -> String {
    if !error.is_object() {
        return default_message.to_string();
    }

    let data = response_data(error);

    if let Some(detail) = data.and_then(|data| data.get("detail")) {
        match detail {
            Value::Object(_) | Value::Array(_) => {
                return string_field(detail, "message")
                    .or_else(|| string_field(detail, "error"))
                    .unwrap_or(default_message)
                    .to_string();
            }
            Value::String(text) if !text.is_empty() => return text.clone(),
            _ => {}
        }
    }

    if let Some(text) = data.and_then(|data| string_field(data, "error")) {
        return text.to_string();
    }

    if let Some(text) = data.and_then(non_empty_str) {
        return text.to_string();
    }

    string_field(error, "message")
        .unwrap_or(default_message)
        .to_string()
}

/// Extract a machine-readable error code, if the backend sent one
///
/// Looks at `response.data.detail.code`, then `response.data.code`. Strings,
/// numbers and `true` are rendered as strings; empty strings, `0`, `false`
/// and structured values count as absent.
pub fn extract_error_code(error: &Value) -> Option<String> {
    let data = response_data(error)?;

    data.get("detail")
        .and_then(|detail| detail.get("code"))
        .and_then(code_to_string)
        .or_else(|| data.get("code").and_then(code_to_string))
}

fn response_data(error: &Value) -> Option<&Value> {
    error.get("response")?.get("data")
}

fn string_field<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value.get(field).and_then(non_empty_str)
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|text| !text.is_empty())
}

fn code_to_string(code: &Value) -> Option<String> {
    match code {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DEFAULT: &str = "Something went wrong";

    fn with_data(data: Value) -> Value {
        json!({ "response": { "status": 400, "data": data } })
    }

    #[test]
    fn non_objects_yield_default() {
        for error in [
            Value::Null,
            json!(true),
            json!(17),
            json!("boom"),
            json!(["detail", "message"]),
        ] {
            assert_eq!(normalize_error(&error, DEFAULT), DEFAULT, "input: {error}");
        }
    }

    #[test]
    fn empty_object_yields_custom_default() {
        assert_eq!(normalize_error(&json!({}), "Oops"), "Oops");
    }

    #[test]
    fn detail_message_wins() {
        let error = with_data(json!({ "detail": { "message": "X", "error": "ignored" } }));
        assert_eq!(normalize_error(&error, DEFAULT), "X");
    }

    #[test]
    fn detail_error_used_without_message() {
        let error = with_data(json!({ "detail": { "error": "Y" } }));
        assert_eq!(normalize_error(&error, DEFAULT), "Y");
    }

    #[test]
    fn unrecognized_detail_object_is_not_serialized() {
        let error = with_data(json!({ "detail": { "code": 42 }, "error": "not reached" }));
        let message = normalize_error(&error, DEFAULT);
        assert_eq!(message, DEFAULT);
        assert!(!message.contains('{'));
    }

    #[test]
    fn detail_list_yields_default() {
        // validation errors arrive as a list of objects
        let error = with_data(json!({
            "detail": [{ "loc": ["body", "email"], "msg": "field required" }]
        }));
        assert_eq!(normalize_error(&error, DEFAULT), DEFAULT);
    }

    #[test]
    fn non_string_detail_fields_are_skipped() {
        let error = with_data(json!({ "detail": { "message": 5, "error": "Y" } }));
        assert_eq!(normalize_error(&error, DEFAULT), "Y");
    }

    #[test]
    fn string_detail_returned_verbatim() {
        let error = with_data(json!({ "detail": "plain string" }));
        assert_eq!(normalize_error(&error, DEFAULT), "plain string");
    }

    #[test]
    fn scalar_detail_falls_through() {
        let error = with_data(json!({ "detail": 404, "error": "Z" }));
        assert_eq!(normalize_error(&error, DEFAULT), "Z");

        let error = with_data(json!({ "detail": null, "error": "Z" }));
        assert_eq!(normalize_error(&error, DEFAULT), "Z");
    }

    #[test]
    fn data_error_string() {
        let error = with_data(json!({ "error": "Z" }));
        assert_eq!(normalize_error(&error, DEFAULT), "Z");
    }

    #[test]
    fn data_error_must_be_a_string() {
        let error = json!({
            "message": "Request failed with status code 500",
            "response": { "data": { "error": { "kind": "internal" } } }
        });
        assert_eq!(
            normalize_error(&error, DEFAULT),
            "Request failed with status code 500"
        );
    }

    #[test]
    fn raw_string_body() {
        let error = with_data(json!("raw string body"));
        assert_eq!(normalize_error(&error, DEFAULT), "raw string body");
    }

    #[test]
    fn transport_message_is_last_resort() {
        let error = json!({ "message": "Network Error" });
        assert_eq!(normalize_error(&error, DEFAULT), "Network Error");

        let error = json!({
            "message": "Network Error",
            "response": { "data": { "detail": "D" } },
        });
        assert_eq!(normalize_error(&error, DEFAULT), "D");
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let error = json!({
            "message": "",
            "response": { "data": { "detail": "", "error": "" } }
        });
        assert_eq!(normalize_error(&error, DEFAULT), DEFAULT);

        let error = json!({ "message": "fallback", "response": { "data": "" } });
        assert_eq!(normalize_error(&error, DEFAULT), "fallback");
    }

    #[test]
    fn malformed_nesting_yields_default() {
        for error in [
            json!({ "response": null }),
            json!({ "response": "gateway timeout" }),
            json!({ "response": { "data": null } }),
            json!({ "response": { "data": [1, 2, 3] } }),
            json!({ "message": { "text": "nested" } }),
        ] {
            assert_eq!(normalize_error(&error, DEFAULT), DEFAULT, "input: {error}");
        }
    }

    #[test]
    fn code_from_detail() {
        let error = with_data(json!({ "detail": { "code": "E1" }, "code": "E2" }));
        assert_eq!(extract_error_code(&error).as_deref(), Some("E1"));
    }

    #[test]
    fn code_from_data() {
        let error = with_data(json!({ "detail": "Slot taken", "code": "SLOT_TAKEN" }));
        assert_eq!(extract_error_code(&error).as_deref(), Some("SLOT_TAKEN"));
    }

    #[test]
    fn code_is_coerced_to_string() {
        let error = with_data(json!({ "detail": { "code": 42 } }));
        assert_eq!(extract_error_code(&error).as_deref(), Some("42"));
    }

    #[test]
    fn code_skips_structured_values() {
        let error = with_data(json!({ "detail": { "code": { "nested": 1 } }, "code": null }));
        assert_eq!(extract_error_code(&error), None);

        let error = with_data(json!({ "detail": { "code": null }, "code": "E2" }));
        assert_eq!(extract_error_code(&error).as_deref(), Some("E2"));
    }

    #[test]
    fn falsy_detail_code_falls_through() {
        for code in [json!(false), json!(0), json!(0.0), json!("")] {
            let error = with_data(json!({ "detail": { "code": code }, "code": "E2" }));
            assert_eq!(extract_error_code(&error).as_deref(), Some("E2"), "code {code}");
        }

        let error = with_data(json!({ "detail": { "code": true } }));
        assert_eq!(extract_error_code(&error).as_deref(), Some("true"));
        assert_eq!(extract_error_code(&with_data(json!({ "code": 0 }))), None);
    }

    #[test]
    fn code_absent() {
        assert_eq!(extract_error_code(&Value::Null), None);
        assert_eq!(extract_error_code(&json!({ "message": "Network Error" })), None);
        assert_eq!(extract_error_code(&with_data(json!({ "detail": "x" }))), None);
    }
}
