//! OMDb metadata client
//!
//! `GET <base>?t=<title>&apikey=<key>` returns the best match for a title.
//! OMDb reports "not found" in-band: a 200 response whose `Response` field is
//! the string "False".

use crate::{
    error::{AppError, AppResult},
    models::{MovieMetadata, OmdbResponse},
    services::providers::{read_json, validate_base_url, MetadataSource},
};
use reqwest::Client as HttpClient;

const PROVIDER: &str = "omdb";

#[derive(Clone)]
pub struct OmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbClient {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String) -> AppResult<Self> {
        validate_base_url(&api_url, PROVIDER)?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }
}

#[async_trait::async_trait]
impl MetadataSource for OmdbClient {
    async fn fetch_metadata(&self, title: &str) -> AppResult<MovieMetadata> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[("t", title), ("apikey", self.api_key.as_str())])
            .send()
            .await?;

        let body: OmdbResponse = read_json(response, PROVIDER).await?;
        let reason = body.error.clone();

        match body.into_metadata() {
            Some(metadata) => {
                tracing::info!(
                    title = %title,
                    matched_title = %metadata.title,
                    year = %metadata.year,
                    provider = PROVIDER,
                    "Metadata fetched"
                );
                Ok(metadata)
            }
            None => {
                tracing::info!(
                    title = %title,
                    reason = reason.as_deref().unwrap_or("unspecified"),
                    provider = PROVIDER,
                    "Metadata not found"
                );
                Err(AppError::NotFound(
                    reason.unwrap_or_else(|| format!("No metadata for {}", title)),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn create_test_client(api_url: String) -> OmdbClient {
        OmdbClient::new(HttpClient::new(), "test_key".to_string(), api_url).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let result = OmdbClient::new(HttpClient::new(), "k".to_string(), "not a url".to_string());
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_fetch_metadata_found() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("t".into(), "The Dark Knight".into()),
                Matcher::UrlEncoded("apikey".into(), "test_key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"Title":"The Dark Knight","Year":"2008","Poster":"https://img/dk.jpg","Response":"True"}"#,
            )
            .create_async()
            .await;

        let client = create_test_client(format!("{}/", server.url()));
        let metadata = client.fetch_metadata("The Dark Knight").await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            metadata,
            MovieMetadata {
                title: "The Dark Knight".to_string(),
                year: "2008".to_string(),
                poster_url: "https://img/dk.jpg".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_metadata_false_response_is_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"Response":"False","Error":"Movie not found!"}"#)
            .create_async()
            .await;

        let client = create_test_client(format!("{}/", server.url()));
        let result = client.fetch_metadata("zzzzqqq").await;

        match result {
            Err(AppError::NotFound(reason)) => assert_eq!(reason, "Movie not found!"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_metadata_missing_response_flag_is_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"Error":"Something went wrong."}"#)
            .create_async()
            .await;

        let client = create_test_client(format!("{}/", server.url()));
        let err = client.fetch_metadata("Inception").await.unwrap_err();

        assert!(!err.is_transport());
        assert!(matches!(err, AppError::NotFound(reason) if reason == "Something went wrong."));
    }

    #[tokio::test]
    async fn test_fetch_metadata_server_error_is_transport() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("upstream unavailable")
            .create_async()
            .await;

        let client = create_test_client(format!("{}/", server.url()));
        let err = client.fetch_metadata("Inception").await.unwrap_err();

        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_fetch_metadata_malformed_json_is_transport() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let client = create_test_client(format!("{}/", server.url()));
        let err = client.fetch_metadata("Inception").await.unwrap_err();

        assert!(matches!(err, AppError::ExternalApi(_)));
    }
}
