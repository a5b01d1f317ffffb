//! Resource clients: one HTTP round trip per domain operation.
//!
//! The clients never pre-validate payloads and never interpret status codes;
//! both are the scenarios' business. An id in the path and an id embedded in
//! a body are forwarded independently and may legitimately disagree.

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;

use crate::api;
use crate::capture::Capture;
use crate::error::ClientError;
use crate::model::{Author, Book};
use crate::transport::Transport;

#[derive(Clone, Copy)]
pub struct BookClient {
    transport: &'static Transport,
}

impl BookClient {
    pub fn new(transport: &'static Transport) -> Self {
        Self { transport }
    }

    /// GET the whole collection.
    pub async fn list(&self) -> Result<Capture, ClientError> {
        self.transport
            .execute(Method::GET, api::BOOKS_ENDPOINT, |rb| rb)
            .await
    }

    /// GET one book; the caller interprets 200 vs 404 vs anything else.
    pub async fn get(&self, id: i32) -> Result<Capture, ClientError> {
        self.transport
            .execute(Method::GET, &api::book_path(id), |rb| rb)
            .await
    }

    /// POST a new book as given.
    pub async fn create(&self, book: &Book) -> Result<Capture, ClientError> {
        self.transport
            .execute(Method::POST, api::BOOKS_ENDPOINT, |rb| rb.json(book))
            .await
    }

    /// PUT a book under the path id, body forwarded as given.
    pub async fn update(&self, id: i32, book: &Book) -> Result<Capture, ClientError> {
        self.transport
            .execute(Method::PUT, &api::book_path(id), |rb| rb.json(book))
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<Capture, ClientError> {
        self.transport
            .execute(Method::DELETE, &api::book_path(id), |rb| rb)
            .await
    }

    /// GET the collection with one query parameter appended; probes
    /// undocumented filtering.
    pub async fn list_with_query(&self, key: &str, value: &str) -> Result<Capture, ClientError> {
        self.transport
            .execute(Method::GET, api::BOOKS_ENDPOINT, |rb| rb.query(&[(key, value)]))
            .await
    }

    /// POST an arbitrary body with an arbitrary content type. For probing
    /// malformed JSON, explicit nulls, and content-type handling.
    pub async fn create_raw(
        &self,
        body: String,
        content_type: &'static str,
    ) -> Result<Capture, ClientError> {
        self.transport
            .execute(Method::POST, api::BOOKS_ENDPOINT, |rb| {
                rb.header(CONTENT_TYPE, content_type).body(body)
            })
            .await
    }

    /// PUT an arbitrary JSON body under the path id.
    pub async fn update_raw(&self, id: i32, body: String) -> Result<Capture, ClientError> {
        self.transport
            .execute(Method::PUT, &api::book_path(id), |rb| {
                rb.header(CONTENT_TYPE, "application/json").body(body)
            })
            .await
    }
}

#[derive(Clone, Copy)]
pub struct AuthorClient {
    transport: &'static Transport,
}

impl AuthorClient {
    pub fn new(transport: &'static Transport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Capture, ClientError> {
        self.transport
            .execute(Method::GET, api::AUTHORS_ENDPOINT, |rb| rb)
            .await
    }

    pub async fn get(&self, id: i32) -> Result<Capture, ClientError> {
        self.transport
            .execute(Method::GET, &api::author_path(id), |rb| rb)
            .await
    }

    pub async fn create(&self, author: &Author) -> Result<Capture, ClientError> {
        self.transport
            .execute(Method::POST, api::AUTHORS_ENDPOINT, |rb| rb.json(author))
            .await
    }

    pub async fn update(&self, id: i32, author: &Author) -> Result<Capture, ClientError> {
        self.transport
            .execute(Method::PUT, &api::author_path(id), |rb| rb.json(author))
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<Capture, ClientError> {
        self.transport
            .execute(Method::DELETE, &api::author_path(id), |rb| rb)
            .await
    }

    pub async fn list_with_query(&self, key: &str, value: &str) -> Result<Capture, ClientError> {
        self.transport
            .execute(Method::GET, api::AUTHORS_ENDPOINT, |rb| {
                rb.query(&[(key, value)])
            })
            .await
    }

    pub async fn create_raw(
        &self,
        body: String,
        content_type: &'static str,
    ) -> Result<Capture, ClientError> {
        self.transport
            .execute(Method::POST, api::AUTHORS_ENDPOINT, |rb| {
                rb.header(CONTENT_TYPE, content_type).body(body)
            })
            .await
    }

    pub async fn update_raw(&self, id: i32, body: String) -> Result<Capture, ClientError> {
        self.transport
            .execute(Method::PUT, &api::author_path(id), |rb| {
                rb.header(CONTENT_TYPE, "application/json").body(body)
            })
            .await
    }
}
