//! The recorded outcome of one HTTP call.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use verso_kernel::ScenarioError;

/// Status, headers, timing, and raw body of a single call. Built once per
/// round trip; read-only afterward. Typed decoding is on demand, with
/// [`Capture::json`] and [`Capture::pointer`] as the untyped escape hatch.
#[derive(Debug, Clone)]
pub struct Capture {
    status: StatusCode,
    headers: HeaderMap,
    elapsed: Duration,
    body: String,
}

impl Capture {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, elapsed: Duration, body: String) -> Self {
        Self {
            status,
            headers,
            elapsed,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// Header value as UTF-8, if present and decodable.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Parse the body as arbitrary JSON.
    pub fn json(&self) -> Result<Value, ScenarioError> {
        serde_json::from_str(&self.body)
            .map_err(|err| ScenarioError::decode("Json", err.to_string()))
    }

    /// Body value at a JSON pointer path (e.g. `/id`, `/0/title`).
    pub fn pointer(&self, path: &str) -> Result<Option<Value>, ScenarioError> {
        Ok(self.json()?.pointer(path).cloned())
    }

    /// Decode the body into a typed resource. Failure names the target type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ScenarioError> {
        serde_json::from_str(&self.body)
            .map_err(|err| ScenarioError::decode(short_type_name::<T>(), err.to_string()))
    }

    /// Decode the body into a list of typed resources.
    pub fn decode_list<T: DeserializeOwned>(&self) -> Result<Vec<T>, ScenarioError> {
        serde_json::from_str(&self.body).map_err(|err| {
            ScenarioError::decode(format!("Vec<{}>", short_type_name::<T>()), err.to_string())
        })
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Author, Book};

    fn capture(status: u16, body: &str) -> Capture {
        Capture::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            Duration::from_millis(42),
            body.to_string(),
        )
    }

    #[test]
    fn decodes_a_typed_resource() {
        let cap = capture(200, r#"{"id": 1, "title": "t", "pageCount": 10}"#);
        let book: Book = cap.decode().unwrap();
        assert_eq!(book.id, 1);
        assert_eq!(book.page_count, 10);
    }

    #[test]
    fn decodes_a_typed_list() {
        let cap = capture(200, r#"[{"id": 1}, {"id": 2, "idBook": 7}]"#);
        let authors: Vec<Author> = cap.decode_list().unwrap();
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[1].id_book, 7);
    }

    #[test]
    fn decode_failure_names_the_target_type() {
        let cap = capture(200, "not json at all");
        let err = cap.decode::<Book>().unwrap_err();
        assert!(err.to_string().contains("Book"), "got: {err}");
        let err = cap.decode_list::<Author>().unwrap_err();
        assert!(err.to_string().contains("Vec<Author>"), "got: {err}");
    }

    #[test]
    fn pointer_reads_arbitrary_paths() {
        let cap = capture(200, r#"[{"id": 9, "title": "first"}]"#);
        let title = cap.pointer("/0/title").unwrap();
        assert_eq!(title, Some(Value::String("first".into())));
        assert_eq!(cap.pointer("/0/missing").unwrap(), None);
    }

    #[test]
    fn capture_exposes_status_and_timing() {
        let cap = capture(404, "");
        assert_eq!(cap.status().as_u16(), 404);
        assert_eq!(cap.elapsed(), Duration::from_millis(42));
        assert!(!cap.has_header("set-cookie"));
    }
}
