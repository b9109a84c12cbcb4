use std::path::Path;
use std::time::Duration;

use reqwest::multipart;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::error::VkError;
use super::types::{PublishedPost, SavedPhoto, UploadServer, UploadedPhoto, VkEnvelope, WallPost};

const API_URL: &str = "https://api.vk.com/method";

pub struct VkClient {
    access_token: String,
    api_version: String,
    client: Client,
    base_url: String,
}

impl VkClient {
    pub fn new(access_token: String, api_version: String) -> Self {
        Self::with_base_url(access_token, api_version, API_URL.to_string())
    }

    /// Create a client pointing at a custom base URL (useful for testing).
    pub fn with_base_url(access_token: String, api_version: String, base_url: String) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            access_token,
            api_version,
            client,
            base_url,
        }
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Shared decoding for `api.vk.com` methods: a non-success status and an
    /// `{"error": ...}` payload both become typed failures.
    async fn decode<T>(response: reqwest::Response) -> Result<T, VkError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(VkError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        let envelope = response.json::<VkEnvelope<T>>().await?;
        envelope.into_result()
    }

    /// Ask for the one-time upload endpoint scoped to the group's wall album.
    pub async fn get_wall_upload_server(&self, group_id: u64) -> Result<UploadServer, VkError> {
        let url = format!("{}/photos.getWallUploadServer", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", self.bearer())
            .query(&[
                ("group_id", group_id.to_string()),
                ("v", self.api_version.clone()),
            ])
            .send()
            .await?;
        Self::decode(response).await
    }

    /// POST the raw image bytes to the one-time upload endpoint. The body of
    /// the reply is the bare `{server, photo, hash}` triple, outside the
    /// usual envelope; anything else is surfaced verbatim as `Unexpected`.
    pub async fn upload_photo(
        &self,
        upload_url: &str,
        file: &Path,
    ) -> Result<UploadedPhoto, VkError> {
        let bytes = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("photo.png")
            .to_string();

        let part = multipart::Part::bytes(bytes).file_name(file_name);
        let form = multipart::Form::new().part("photo", part);

        let response = self.client.post(upload_url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(VkError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|_| VkError::Unexpected(body))
    }

    /// Register the uploaded bytes as a permanent photo in the group's wall
    /// album. VK answers with a list; only its first entry is meaningful
    /// here, and an empty list is an error.
    pub async fn save_wall_photo(
        &self,
        group_id: u64,
        upload: &UploadedPhoto,
    ) -> Result<SavedPhoto, VkError> {
        let url = format!("{}/photos.saveWallPhoto", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", self.bearer())
            .query(&[
                ("server", upload.server.to_string()),
                ("photo", upload.photo.clone()),
                ("hash", upload.hash.clone()),
                ("group_id", group_id.to_string()),
                ("v", self.api_version.clone()),
            ])
            .send()
            .await?;

        let photos: Vec<SavedPhoto> = Self::decode(response).await?;
        photos
            .into_iter()
            .next()
            .ok_or_else(|| VkError::Unexpected("saveWallPhoto returned no photos".to_string()))
    }

    /// Create the visible wall post with the photo attached and the caption
    /// as the message, published from the group rather than from a personal
    /// account.
    pub async fn post_to_wall(
        &self,
        group_id: u64,
        photo: &SavedPhoto,
        message: &str,
    ) -> Result<WallPost, VkError> {
        let url = format!("{}/wall.post", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", self.bearer())
            .query(&[
                ("attachments", photo.attachment()),
                ("message", message.to_string()),
                ("from_group", "1".to_string()),
                ("owner_id", format!("-{group_id}")),
                ("group_id", group_id.to_string()),
                ("v", self.api_version.clone()),
            ])
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Run the four upload steps strictly in order: obtain the upload server,
    /// upload the raw bytes, save the photo to the wall album, post to the
    /// wall. Each step consumes data returned by the previous one, and a
    /// failure aborts the rest immediately. There is no compensation: a
    /// photo uploaded before a failing save stays orphaned on VK's side.
    pub async fn publish_photo(
        &self,
        group_id: u64,
        file: &Path,
        message: &str,
    ) -> Result<PublishedPost, VkError> {
        let server = self.get_wall_upload_server(group_id).await?;
        let upload = self.upload_photo(&server.upload_url, file).await?;
        let saved = self.save_wall_photo(group_id, &upload).await?;
        let post = self.post_to_wall(group_id, &saved, message).await?;

        Ok(PublishedPost {
            media_id: saved.id,
            owner_id: saved.owner_id,
            post_id: post.post_id,
        })
    }
}
