use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AppError, Result};
use crate::intake::validate::{UniquenessOutcome, UniquenessReport};
use crate::models::ImageUpload;

use super::{ItemImage, MarketItem, SubmissionPayload};

#[derive(Debug, Serialize)]
struct CheckIdentifiersRequest<'a> {
    identifiers: &'a [String],
}

#[derive(Debug, Serialize)]
struct RegisterImagesRequest<'a> {
    images: &'a [ImageUpload],
}

#[derive(Debug, Deserialize)]
struct RegisterImagesResponse {
    images: Vec<ItemImage>,
}

/// HTTP client for the VendorHub marketplace backend.
#[derive(Debug, Clone)]
pub struct MarketClient {
    client: Client,
    base_url: String,
    service_token: String,
}

impl MarketClient {
    pub fn new(base_url: &str, service_token: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_token: service_token.to_string(),
        }
    }

    /// Advisory uniqueness pre-check. Any transport or server failure maps
    /// to `Unreachable` — the caller logs it and proceeds, since the
    /// backend's unique index is the authoritative constraint.
    pub async fn check_identifiers(&self, identifiers: &[String]) -> UniquenessOutcome {
        let result = self
            .client
            .post(format!("{}/products/check-imeis", self.base_url))
            .bearer_auth(&self.service_token)
            .json(&CheckIdentifiersRequest { identifiers })
            .send()
            .await;

        let response = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "uniqueness check unreachable");
                return UniquenessOutcome::Unreachable;
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "uniqueness check returned an error status");
            return UniquenessOutcome::Unreachable;
        }

        match response.json::<UniquenessReport>().await {
            Ok(report) => UniquenessOutcome::Verified(report),
            Err(e) => {
                warn!(error = %e, "uniqueness check response unreadable");
                UniquenessOutcome::Unreachable
            }
        }
    }

    /// Forward base64 images to the backend, returning hosted references for
    /// the submission payload.
    pub async fn register_images(&self, images: &[ImageUpload]) -> Result<Vec<ItemImage>> {
        let response = self
            .client
            .post(format!("{}/uploads", self.base_url))
            .bearer_auth(&self.service_token)
            .json(&RegisterImagesRequest { images })
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("image upload failed: {}", e)))?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("image upload failed: {}", text)));
        }

        let body: RegisterImagesResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("unreadable upload response: {}", e)))?;

        Ok(body.images)
    }

    pub async fn create_item(&self, payload: &SubmissionPayload) -> Result<MarketItem> {
        let response = self
            .client
            .post(format!("{}/products", self.base_url))
            .bearer_auth(&self.service_token)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("item submission failed: {}", e)))?;

        Self::read_item(response).await
    }

    pub async fn update_item(&self, id: &str, payload: &SubmissionPayload) -> Result<MarketItem> {
        let response = self
            .client
            .put(format!("{}/products/{}", self.base_url, id))
            .bearer_auth(&self.service_token)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("item update failed: {}", e)))?;

        Self::read_item(response).await
    }

    pub async fn get_item(&self, id: &str) -> Result<MarketItem> {
        let response = self
            .client
            .get(format!("{}/products/{}", self.base_url, id))
            .bearer_auth(&self.service_token)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("item fetch failed: {}", e)))?;

        Self::read_item(response).await
    }

    async fn read_item(response: reqwest::Response) -> Result<MarketItem> {
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound("Item not found".into()));
        }
        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "marketplace rejected the request: {}",
                text
            )));
        }
        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("unreadable marketplace response: {}", e)))
    }
}
