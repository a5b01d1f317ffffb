//! Assertion helpers over a [`Capture`].
//!
//! Each helper returns `Err(ScenarioError::Assertion)` with a message that
//! states expected vs actual, so scenario bodies stay linear `?` chains.

use std::time::Duration;

use serde_json::Value;
use verso_kernel::scenario::ScenarioResult;
use verso_kernel::ScenarioError;

use crate::capture::Capture;

/// Exact status code expectation.
pub fn status(cap: &Capture, expected: u16) -> ScenarioResult {
    let actual = cap.status().as_u16();
    if actual == expected {
        Ok(())
    } else {
        Err(ScenarioError::assertion(format!(
            "expected status {expected} but got {actual}"
        )))
    }
}

/// Membership in a documented set of acceptable statuses. Used where the
/// remote service's real behavior is ambiguous and the accepted set is all
/// that can be promised.
pub fn status_in(cap: &Capture, allowed: &[u16]) -> ScenarioResult {
    let actual = cap.status().as_u16();
    if allowed.contains(&actual) {
        Ok(())
    } else {
        Err(ScenarioError::assertion(format!(
            "expected status in {allowed:?} but got {actual}"
        )))
    }
}

/// The captured call stayed within the timing budget.
pub fn elapsed_within(cap: &Capture, budget: Duration) -> ScenarioResult {
    if cap.elapsed() <= budget {
        Ok(())
    } else {
        Err(ScenarioError::assertion(format!(
            "expected response within {}ms but took {}ms",
            budget.as_millis(),
            cap.elapsed().as_millis()
        )))
    }
}

/// The response carries no header of this name.
pub fn header_absent(cap: &Capture, name: &str) -> ScenarioResult {
    if cap.has_header(name) {
        Err(ScenarioError::assertion(format!(
            "expected no '{name}' response header, but one is present"
        )))
    } else {
        Ok(())
    }
}

/// The raw body does not contain the given fragment.
pub fn body_lacks(cap: &Capture, needle: &str) -> ScenarioResult {
    if cap.body().contains(needle) {
        Err(ScenarioError::assertion(format!(
            "response body must not contain {needle:?}"
        )))
    } else {
        Ok(())
    }
}

/// The body's JSON value at `path` equals `expected`.
pub fn field_eq(cap: &Capture, path: &str, expected: impl Into<Value>) -> ScenarioResult {
    let expected = expected.into();
    match cap.pointer(path)? {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => Err(ScenarioError::assertion(format!(
            "field '{path}' - expected {expected}, actual {actual}"
        ))),
        None => Err(ScenarioError::assertion(format!(
            "field '{path}' missing; expected {expected}"
        ))),
    }
}

/// The body's JSON value at `path` exists and is not null.
pub fn field_present(cap: &Capture, path: &str) -> ScenarioResult {
    match cap.pointer(path)? {
        Some(Value::Null) | None => Err(ScenarioError::assertion(format!(
            "expected field '{path}' to be present"
        ))),
        Some(_) => Ok(()),
    }
}

/// Free-form condition with an explicit message.
pub fn that(condition: bool, message: impl Into<String>) -> ScenarioResult {
    if condition {
        Ok(())
    } else {
        Err(ScenarioError::assertion(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue};
    use reqwest::StatusCode;

    fn capture(status: u16, body: &str) -> Capture {
        Capture::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            Duration::from_millis(100),
            body.to_string(),
        )
    }

    #[test]
    fn status_reports_expected_vs_actual() {
        let cap = capture(404, "");
        assert!(status(&cap, 404).is_ok());
        let err = status(&cap, 200).unwrap_err();
        assert_eq!(
            err.to_string(),
            "assertion failed: expected status 200 but got 404"
        );
    }

    #[test]
    fn status_in_accepts_any_documented_outcome() {
        let cap = capture(409, "");
        assert!(status_in(&cap, &[200, 400, 409]).is_ok());
        assert!(status_in(&cap, &[200, 400]).is_err());
    }

    #[test]
    fn elapsed_within_enforces_the_budget() {
        let cap = capture(200, "");
        assert!(elapsed_within(&cap, Duration::from_millis(100)).is_ok());
        assert!(elapsed_within(&cap, Duration::from_millis(99)).is_err());
    }

    #[test]
    fn header_absent_flags_present_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("set-cookie", HeaderValue::from_static("evil=true"));
        let cap = Capture::new(
            StatusCode::OK,
            headers,
            Duration::from_millis(1),
            String::new(),
        );
        assert!(header_absent(&cap, "set-cookie").is_err());
        assert!(header_absent(&cap, "location").is_ok());
    }

    #[test]
    fn field_checks_read_json_pointers() {
        let cap = capture(200, r#"{"id": 5, "title": "t", "excerpt": null}"#);
        assert!(field_eq(&cap, "/id", 5).is_ok());
        assert!(field_eq(&cap, "/title", "t").is_ok());
        assert!(field_eq(&cap, "/id", 6).is_err());
        assert!(field_present(&cap, "/title").is_ok());
        assert!(field_present(&cap, "/excerpt").is_err());
        assert!(field_present(&cap, "/missing").is_err());
    }

    #[test]
    fn body_lacks_scans_the_raw_body() {
        let cap = capture(200, r#"{"title": "<script>alert(1)</script>"}"#);
        assert!(body_lacks(&cap, "<script>").is_err());
        assert!(body_lacks(&cap, "onerror=").is_ok());
    }
}
