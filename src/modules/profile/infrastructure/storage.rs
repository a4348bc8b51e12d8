use crate::modules::profile::domain::AvatarStorage;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::http::SupabaseClient;
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;

/// Supabase Storage REST backend
pub struct SupabaseAvatarStorage {
    client: Arc<SupabaseClient>,
}

impl SupabaseAvatarStorage {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }

    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        self.client
            .url(&format!("storage/v1/object/public/{}/{}", bucket, path))
    }
}

#[async_trait]
impl AvatarStorage for SupabaseAvatarStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        access_token: Option<&str>,
    ) -> AppResult<String> {
        let endpoint = format!("storage/v1/object/{}/{}", bucket, path);
        let request = self
            .client
            .request(Method::POST, &endpoint, access_token)
            .header("Content-Type", content_type)
            .header("x-upsert", "true")
            .body(bytes);

        let response = self.client.execute(request, &endpoint).await?;
        let status = response.status();
        if !status.is_success() {
            let message = SupabaseClient::error_message(response).await;
            return Err(match status.as_u16() {
                401 | 403 => AppError::Forbidden(format!("Avatar upload rejected: {}", message)),
                413 => AppError::ValidationError("Avatar file is too large".to_string()),
                code => AppError::from_status(code, format!("Avatar upload failed: {}", message)),
            });
        }

        Ok(self.public_url(bucket, path))
    }
}
