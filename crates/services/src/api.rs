use std::time::Duration;

use async_trait::async_trait;
use exam_core::model::StatusSnapshot;
use reqwest::{Client, Response};
use url::Url;

use crate::error::ExamApiError;

/// Network calls the engine makes to the exam server.
#[async_trait]
pub trait ExamApi: Send + Sync {
    /// Fetch the authoritative status snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ExamApiError` on transport failure, non-success status, or an
    /// undecodable body.
    async fn fetch_statuses(&self, url: &Url) -> Result<StatusSnapshot, ExamApiError>;

    /// Fetch a question page as HTML.
    ///
    /// # Errors
    ///
    /// Returns `ExamApiError` on transport failure or non-success status.
    async fn fetch_page(&self, url: &Url) -> Result<String, ExamApiError>;

    /// Post form-encoded answer fields. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns `ExamApiError` on transport failure or non-success status.
    async fn save_answer(
        &self,
        url: &Url,
        fields: &[(&'static str, String)],
    ) -> Result<(), ExamApiError>;
}

/// `ExamApi` over HTTP. Session cookies are kept in the client's own jar
/// between calls; the page host's webview does not share it.
#[derive(Clone)]
pub struct HttpExamApi {
    client: Client,
}

impl HttpExamApi {
    /// Build a client with a cookie store and a request timeout.
    ///
    /// # Errors
    ///
    /// Returns `ExamApiError::Http` if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self, ExamApiError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ExamApi for HttpExamApi {
    async fn fetch_statuses(&self, url: &Url) -> Result<StatusSnapshot, ExamApiError> {
        let response = checked(url, self.client.get(url.clone()).send().await?)?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_page(&self, url: &Url) -> Result<String, ExamApiError> {
        let response = checked(url, self.client.get(url.clone()).send().await?)?;
        Ok(response.text().await?)
    }

    async fn save_answer(
        &self,
        url: &Url,
        fields: &[(&'static str, String)],
    ) -> Result<(), ExamApiError> {
        checked(url, self.client.post(url.clone()).form(fields).send().await?)?;
        Ok(())
    }
}

fn checked(url: &Url, response: Response) -> Result<Response, ExamApiError> {
    let status = response.status();
    tracing::trace!(target: "exam.api", url = %url, status = status.as_u16(), "response");
    if status.is_success() {
        Ok(response)
    } else {
        Err(ExamApiError::HttpStatus(status))
    }
}
