use std::time::Duration;

use engine_logging::{engine_debug, engine_info};
use matcher_core::{FileHandle, MatchResult};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{FailureKind, MatchRequest, MatchResponse, ServiceError, UploadReply};

pub const DEFAULT_BASE_ADDRESS: &str = "http://127.0.0.1:8000";

const SINGLE_UPLOAD_PATH: &str = "/resume/upload";
const BATCH_UPLOAD_PATH: &str = "/resumes/upload";
const MATCH_PATH: &str = "/match";

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_address: String,
    /// `None` waits indefinitely for the service.
    pub request_timeout: Option<Duration>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_address: DEFAULT_BASE_ADDRESS.to_string(),
            request_timeout: None,
        }
    }
}

impl ServiceSettings {
    pub fn with_base_address(base_address: impl Into<String>) -> Self {
        Self {
            base_address: base_address.into(),
            ..Self::default()
        }
    }
}

/// The remote scoring service.
#[async_trait::async_trait]
pub trait ResumeService: Send + Sync {
    async fn upload_single(&self, file: &FileHandle) -> Result<UploadReply, ServiceError>;

    async fn upload_batch(&self, files: &[FileHandle]) -> Result<UploadReply, ServiceError>;

    async fn match_job_description(
        &self,
        text: &str,
        top_k: u32,
    ) -> Result<Vec<MatchResult>, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestService {
    base_address: String,
    client: reqwest::Client,
}

impl ReqwestService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let base_address = settings.base_address.trim().trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_address)
            .map_err(|err| ServiceError::new(FailureKind::InvalidAddress, err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ServiceError::new(
                FailureKind::InvalidAddress,
                format!("unsupported scheme {}", parsed.scheme()),
            ));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ServiceError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            base_address,
            client,
        })
    }

    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        Url::parse(&format!("{}{}", self.base_address, path))
            .map_err(|err| ServiceError::new(FailureKind::InvalidAddress, err.to_string()))
    }

    async fn post_form<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, ServiceError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_response(path, response).await
    }
}

#[async_trait::async_trait]
impl ResumeService for ReqwestService {
    async fn upload_single(&self, file: &FileHandle) -> Result<UploadReply, ServiceError> {
        let form = Form::new().part("file", file_part(file));
        self.post_form(SINGLE_UPLOAD_PATH, form).await
    }

    async fn upload_batch(&self, files: &[FileHandle]) -> Result<UploadReply, ServiceError> {
        let form = files
            .iter()
            .fold(Form::new(), |form, file| form.part("files", file_part(file)));
        self.post_form(BATCH_UPLOAD_PATH, form).await
    }

    async fn match_job_description(
        &self,
        text: &str,
        top_k: u32,
    ) -> Result<Vec<MatchResult>, ServiceError> {
        let url = self.endpoint(MATCH_PATH)?;
        let body = serde_json::to_vec(&MatchRequest { text, top_k })
            .map_err(|err| ServiceError::new(FailureKind::Encode, err.to_string()))?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let reply: MatchResponse = decode_response(MATCH_PATH, response).await?;
        Ok(reply.into_results())
    }
}

fn file_part(file: &FileHandle) -> Part {
    Part::bytes(file.bytes.clone()).file_name(file.name.clone())
}

/// Any status is accepted as long as the body is the expected JSON.
async fn decode_response<T: DeserializeOwned>(
    path: &str,
    response: reqwest::Response,
) -> Result<T, ServiceError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_reqwest_error)?;
    engine_info!("POST {} -> {} ({} bytes)", path, status.as_u16(), body.len());

    serde_json::from_slice(&body).map_err(|err| {
        engine_debug!("POST {} returned undecodable body: {}", path, err);
        ServiceError::new(
            FailureKind::Decode,
            format!("status {}: {}", status.as_u16(), err),
        )
    })
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::new(FailureKind::Timeout, err.to_string());
    }
    ServiceError::new(FailureKind::Network, err.to_string())
}
