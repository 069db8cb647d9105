//! HTTP client for the Huntflow v1 API

use std::path::Path;

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode, Url, multipart};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{ApiError, messages};
use super::models::{
    Account, CandidatePayload, CandidateRecord, LinkPayload, Listing, Opening, ResumeUpload, Stage,
};

/// The subset of the recruiting platform the importer talks to
///
/// Every call is a single round trip; nothing here retries.
#[async_trait]
pub trait RecruitingApi: Send + Sync {
    /// Identifier of the first account the token can act on
    async fn account_id(&self) -> Result<i64, ApiError>;

    async fn openings(&self, account_id: i64) -> Result<Vec<Opening>, ApiError>;

    async fn stages(&self, account_id: i64) -> Result<Vec<Stage>, ApiError>;

    /// Upload a resume file and have the platform parse it
    async fn upload_resume(&self, account_id: i64, path: &Path) -> Result<ResumeUpload, ApiError>;

    async fn create_candidate(
        &self,
        account_id: i64,
        payload: &CandidatePayload,
    ) -> Result<CandidateRecord, ApiError>;

    /// Put a candidate on an opening at a stage, returning the raw response body
    async fn link_candidate(
        &self,
        account_id: i64,
        candidate_id: i64,
        payload: &LinkPayload,
    ) -> Result<Value, ApiError>;
}

/// Maximum number of response body characters kept in an error
const BODY_EXCERPT_LEN: usize = 500;

/// Huntflow API client authenticated with a bearer token
pub struct HuntflowClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl HuntflowClient {
    pub fn new(base_url: &str, token: impl Into<String>) -> anyhow::Result<Self> {
        // Url::join drops the last path segment unless the base ends with '/'
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| anyhow::anyhow!("Invalid API base URL '{}': {}", base_url, e))?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("huntflow-import/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            token: token.into(),
        })
    }

    fn url(&self, path: &str, message: &'static str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::new(message, format!("invalid URL for '{}': {}", path, e)))
    }

    fn get(&self, url: Url) -> RequestBuilder {
        self.http.get(url).bearer_auth(&self.token)
    }

    fn post(&self, url: Url) -> RequestBuilder {
        self.http.post(url).bearer_auth(&self.token)
    }

    fn upload_request(
        &self,
        account_id: i64,
        path: &Path,
        bytes: Vec<u8>,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.url(&format!("account/{}/upload", account_id), messages::UPLOAD)?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        let mime = mime_guess::from_path(path).first_or_octet_stream();

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime.as_ref())
            .map_err(|e| ApiError::new(messages::UPLOAD, format!("invalid MIME type: {}", e)))?;
        let form = multipart::Form::new().part("file", part);

        Ok(self
            .post(url)
            .header("X-File-Parse", "true")
            .multipart(form))
    }

    fn create_request(
        &self,
        account_id: i64,
        payload: &CandidatePayload,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.url(&format!("account/{}/applicants", account_id), messages::CREATE)?;
        Ok(self.post(url).json(payload))
    }

    fn link_request(
        &self,
        account_id: i64,
        candidate_id: i64,
        payload: &LinkPayload,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.url(
            &format!("account/{}/applicants/{}/vacancy", account_id, candidate_id),
            messages::LINK,
        )?;
        Ok(self.post(url).json(payload))
    }

    /// Send a request and decode a JSON body, mapping every failure to `message`
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        message: &'static str,
    ) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::new(message, format!("request failed: {}", e)))?;

        let status = response.status();
        log::debug!("{} {}", status, response.url());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(message, status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| {
                ApiError::with_status(
                    message,
                    status.as_u16(),
                    format!("invalid response body: {}", e),
                )
            })
    }
}

/// Error for a non-2xx response, keeping the start of the body
fn status_error(message: &'static str, status: StatusCode, body: &str) -> ApiError {
    let excerpt: String = body.chars().take(BODY_EXCERPT_LEN).collect();
    ApiError::with_status(message, status.as_u16(), excerpt)
}

#[async_trait]
impl RecruitingApi for HuntflowClient {
    async fn account_id(&self) -> Result<i64, ApiError> {
        let url = self.url("accounts", messages::ACCOUNT)?;
        let listing: Listing<Account> = self.send_json(self.get(url), messages::ACCOUNT).await?;

        let account = listing
            .items
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::new(messages::ACCOUNT, "token has no accessible accounts"))?;

        log::debug!(
            "Acting as account {} ({})",
            account.id,
            account.name.as_deref().unwrap_or("unnamed")
        );
        Ok(account.id)
    }

    async fn openings(&self, account_id: i64) -> Result<Vec<Opening>, ApiError> {
        let url = self.url(&format!("account/{}/vacancies", account_id), messages::OPENINGS)?;
        let listing: Listing<Opening> = self.send_json(self.get(url), messages::OPENINGS).await?;
        Ok(listing.items)
    }

    async fn stages(&self, account_id: i64) -> Result<Vec<Stage>, ApiError> {
        let url = self.url(
            &format!("account/{}/vacancy/statuses", account_id),
            messages::STAGES,
        )?;
        let listing: Listing<Stage> = self.send_json(self.get(url), messages::STAGES).await?;
        Ok(listing.items)
    }

    async fn upload_resume(&self, account_id: i64, path: &Path) -> Result<ResumeUpload, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ApiError::new(messages::UPLOAD, format!("failed to read {}: {}", path.display(), e))
        })?;
        let request = self.upload_request(account_id, path, bytes)?;
        self.send_json(request, messages::UPLOAD).await
    }

    async fn create_candidate(
        &self,
        account_id: i64,
        payload: &CandidatePayload,
    ) -> Result<CandidateRecord, ApiError> {
        let request = self.create_request(account_id, payload)?;
        self.send_json(request, messages::CREATE).await
    }

    async fn link_candidate(
        &self,
        account_id: i64,
        candidate_id: i64,
        payload: &LinkPayload,
    ) -> Result<Value, ApiError> {
        let request = self.link_request(account_id, candidate_id, payload)?;
        self.send_json(request, messages::LINK).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::FileRef;

    #[test]
    fn test_base_url_without_trailing_slash_keeps_prefix() {
        let client = HuntflowClient::new("https://api.example.com/v1", "token").unwrap();
        let url = client.url("accounts", messages::ACCOUNT).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/accounts");
    }

    #[test]
    fn test_account_scoped_url() {
        let client = HuntflowClient::new("https://dev-100-api.huntflow.dev/", "token").unwrap();
        let url = client
            .url("account/42/applicants/7/vacancy", messages::LINK)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://dev-100-api.huntflow.dev/account/42/applicants/7/vacancy"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(HuntflowClient::new("not a url", "token").is_err());
    }

    fn client() -> HuntflowClient {
        HuntflowClient::new("https://api.example.com/v1", "secret").unwrap()
    }

    fn header<'a>(request: &'a reqwest::Request, name: &str) -> Option<&'a str> {
        request.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_upload_request_parses_file() {
        let request = client()
            .upload_request(42, Path::new("Engineer/Ivanov Petr.pdf"), b"%PDF".to_vec())
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.url().as_str(), "https://api.example.com/v1/account/42/upload");
        assert_eq!(header(&request, "authorization"), Some("Bearer secret"));
        assert_eq!(header(&request, "x-file-parse"), Some("true"));
        assert!(
            header(&request, "content-type")
                .unwrap()
                .starts_with("multipart/form-data; boundary=")
        );
    }

    #[test]
    fn test_link_request_sends_json_body() {
        let payload = LinkPayload {
            vacancy: 10,
            status: 20,
            comment: "Good fit".to_string(),
            files: vec![FileRef { id: 700 }],
        };
        let request = client()
            .link_request(42, 500, &payload)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://api.example.com/v1/account/42/applicants/500/vacancy"
        );
        assert_eq!(header(&request, "authorization"), Some("Bearer secret"));
        assert_eq!(header(&request, "content-type"), Some("application/json"));

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        let sent: Value = serde_json::from_slice(body).unwrap();
        assert_eq!(
            sent,
            serde_json::json!({
                "vacancy": 10,
                "status": 20,
                "comment": "Good fit",
                "files": [{ "id": 700 }]
            })
        );
    }

    #[test]
    fn test_status_error_keeps_status_and_truncated_body() {
        let body = "x".repeat(BODY_EXCERPT_LEN + 100);
        let err = status_error(messages::CREATE, StatusCode::BAD_REQUEST, &body);

        assert_eq!(err.message, messages::CREATE);
        assert_eq!(err.status, Some(400));
        assert_eq!(err.detail.chars().count(), BODY_EXCERPT_LEN);
    }
}
