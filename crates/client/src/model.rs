//! Typed representations of the two API resources.
//!
//! Decoding is deliberately permissive: unknown response fields are ignored
//! and absent fields fall back to zero values, mirroring the API's loose
//! contract. Validity is a property the scenarios test, never something the
//! model enforces.

use serde::{Deserialize, Serialize};

/// Book resource as exchanged with `/api/v1/Books`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Book {
    /// Assigned by the remote service on creation; zero on new payloads.
    pub id: i32,
    pub title: String,
    pub description: String,
    pub page_count: i32,
    pub excerpt: String,
    /// RFC 3339 timestamp string; the service stores it opaquely.
    pub publish_date: String,
}

impl Book {
    /// Book payload for a create request. The service assigns the id.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        page_count: i32,
        excerpt: impl Into<String>,
        publish_date: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            page_count,
            excerpt: excerpt.into(),
            publish_date: publish_date.into(),
        }
    }

    /// Same value with an explicit id, for update payloads.
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }
}

/// Author resource as exchanged with `/api/v1/Authors`. `id_book` is a
/// foreign-key-style reference the service does not visibly enforce.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Author {
    pub id: i32,
    pub id_book: i32,
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    /// Author payload for a create request. The service assigns the id.
    pub fn new(id_book: i32, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: 0,
            id_book,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Same value with an explicit id, for update payloads.
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_round_trips_through_json() {
        let book = Book::new("Dune", "Desert planet", 412, "Fear is", "1965-08-01T00:00:00.000Z")
            .with_id(7);
        let encoded = serde_json::to_value(&book).unwrap();
        assert_eq!(encoded["pageCount"], 412);
        assert_eq!(encoded["publishDate"], "1965-08-01T00:00:00.000Z");

        let decoded: Book = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, book);
    }

    #[test]
    fn author_round_trips_through_json() {
        let author = Author::new(3, "Ursula", "Le Guin").with_id(11);
        let encoded = serde_json::to_value(&author).unwrap();
        assert_eq!(encoded["idBook"], 3);
        assert_eq!(encoded["firstName"], "Ursula");

        let decoded: Author = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, author);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let decoded: Book = serde_json::from_str(
            r#"{"id": 1, "title": "t", "etag": "abc123", "links": {"self": "/Books/1"}}"#,
        )
        .unwrap();
        assert_eq!(decoded.id, 1);
        assert_eq!(decoded.title, "t");
    }

    #[test]
    fn absent_fields_fall_back_to_zero_values() {
        let decoded: Book = serde_json::from_str(r#"{"title": "only a title"}"#).unwrap();
        assert_eq!(decoded.id, 0);
        assert_eq!(decoded.page_count, 0);
        assert_eq!(decoded.description, "");

        let decoded: Author = serde_json::from_str("{}").unwrap();
        assert_eq!(decoded, Author::default());
    }

    #[test]
    fn create_payloads_carry_a_zero_id() {
        assert_eq!(Book::new("t", "d", 100, "e", "p").id, 0);
        assert_eq!(Author::new(1, "a", "b").id, 0);
    }
}
