use consts::paths::{AVATARS_CATALOG, GENERATE_SPEECH, GENERATE_VIDEO};
use consts::AVATAR_API_BASE;
use reqwest::Url;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::types::{
    CatalogResponse, GenerateSpeechRequest, GenerateVideoRequest, GenerationAck, SpeechResponse,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(String),
    #[error("{context} (status {status})")]
    Status { context: &'static str, status: u16 },
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
}

/// The backend endpoints the studio talks to.
#[allow(async_fn_in_trait)]
pub trait StudioApi {
    async fn fetch_catalog(&self) -> Result<CatalogResponse, ApiError>;
    async fn generate_video(&self, req: &GenerateVideoRequest) -> Result<GenerationAck, ApiError>;
    async fn generate_speech(
        &self,
        req: &GenerateSpeechRequest,
    ) -> Result<SpeechResponse, ApiError>;
}

#[derive(Clone)]
pub struct HttpStudioApi {
    client: reqwest::Client,
    base: Url,
}

impl Default for HttpStudioApi {
    fn default() -> Self {
        Self::new(AVATAR_API_BASE.clone())
    }
}

impl HttpStudioApi {
    pub fn new(base: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Endpoint(e.to_string()))
    }

    async fn decode<T: DeserializeOwned>(
        res: reqwest::Response,
        context: &'static str,
    ) -> Result<T, ApiError> {
        if !res.status().is_success() {
            return Err(ApiError::Status {
                context,
                status: res.status().as_u16(),
            });
        }
        res.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        context: &'static str,
    ) -> Result<T, ApiError> {
        let res = self
            .client
            .post(self.endpoint(path)?)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("{context}: {e}")))?;
        Self::decode(res, context).await
    }
}

impl StudioApi for HttpStudioApi {
    async fn fetch_catalog(&self) -> Result<CatalogResponse, ApiError> {
        const CONTEXT: &str = "Failed to fetch avatars";
        let res = self
            .client
            .get(self.endpoint(AVATARS_CATALOG)?)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("{CONTEXT}: {e}")))?;
        Self::decode(res, CONTEXT).await
    }

    async fn generate_video(&self, req: &GenerateVideoRequest) -> Result<GenerationAck, ApiError> {
        self.post(GENERATE_VIDEO, req, "Failed to generate video")
            .await
    }

    async fn generate_speech(
        &self,
        req: &GenerateSpeechRequest,
    ) -> Result<SpeechResponse, ApiError> {
        self.post(GENERATE_SPEECH, req, "Failed to generate speech")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_under_base() {
        let api = HttpStudioApi::new(Url::parse("http://studio.test/api/").unwrap());
        assert_eq!(
            api.endpoint(AVATARS_CATALOG).unwrap().as_str(),
            "http://studio.test/api/avatars-catalog"
        );
        assert_eq!(
            api.endpoint(GENERATE_VIDEO).unwrap().as_str(),
            "http://studio.test/api/generate-video"
        );
    }

    #[test]
    fn status_error_reads_like_the_failed_action() {
        let err = ApiError::Status {
            context: "Failed to generate video",
            status: 500,
        };
        assert_eq!(err.to_string(), "Failed to generate video (status 500)");
    }
}
