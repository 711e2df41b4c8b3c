//! HTTP implementation of [`LibraryApi`] on top of reqwest

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use crate::{
    config::ServiceConfig,
    error::{ClientError, ClientResult},
    models::{ApiResponse, Book, SearchRequest, WriteAck},
};

use super::{endpoints, LibraryApi};

#[derive(Clone)]
pub struct HttpLibraryApi {
    client: Client,
    base_url: String,
}

impl HttpLibraryApi {
    /// Build a client for the configured service origin
    pub fn new(config: &ServiceConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!("GET {}", path);
        self.execute(self.client.get(self.url(path))).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("POST {}", path);
        self.execute(self.client.post(self.url(path)).json(body)).await
    }

    /// Send the request and decode the envelope.
    /// A non-2xx response still counts when it carries a well-formed envelope.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        match serde_json::from_slice::<T>(&body) {
            Ok(decoded) => Ok(decoded),
            Err(e) if status.is_success() => {
                tracing::warn!("Malformed response body: {}", e);
                Err(ClientError::Json(e))
            }
            Err(_) => Err(ClientError::Http {
                status: status.as_u16(),
            }),
        }
    }
}

#[async_trait]
impl LibraryApi for HttpLibraryApi {
    async fn list_books(&self) -> ClientResult<ApiResponse<Vec<Book>>> {
        self.get(endpoints::LIST_BOOKS).await
    }

    async fn create_book(&self, book: &Book) -> ClientResult<WriteAck> {
        self.post(endpoints::CREATE_BOOK, book).await
    }

    async fn update_book(&self, book: &Book) -> ClientResult<WriteAck> {
        self.post(endpoints::UPDATE_BOOK, book).await
    }

    async fn search_books(&self, request: &SearchRequest) -> ClientResult<ApiResponse<Vec<Book>>> {
        self.post(endpoints::SEARCH_BOOKS, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let api = HttpLibraryApi::new(&ServiceConfig {
            base_url: "http://localhost:8081/".to_string(),
            timeout_seconds: Some(3),
        })
        .unwrap();

        assert_eq!(api.base_url(), "http://localhost:8081");
        assert_eq!(api.url(endpoints::LIST_BOOKS), "http://localhost:8081/book/data");
    }
}
