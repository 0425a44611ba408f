use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, de::DeserializeOwned};
use url::Url;

use crate::drive::{
    DocumentRef, DriveApi, DriveError, DriveResult,
    auth::TokenProvider,
    types::{GoogleDocument, SheetValues, Spreadsheet},
};

const DRIVE_API_URL: &str = "https://www.googleapis.com/drive/v3";
const DOCS_API_URL: &str = "https://docs.googleapis.com/v1";
const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4";

const FILE_FIELDS: &str = "files(id, name, mimeType, webViewLink)";

/// Base URLs of the Google APIs, overridable for tests.
#[derive(Debug, Clone)]
pub struct GoogleApiUrls {
    pub drive: String,
    pub docs: String,
    pub sheets: String,
}

impl Default for GoogleApiUrls {
    fn default() -> Self {
        Self {
            drive: DRIVE_API_URL.to_string(),
            docs: DOCS_API_URL.to_string(),
            sheets: SHEETS_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DocumentRef>,
}

pub struct GoogleDriveClient {
    client: Client,
    auth: Arc<TokenProvider>,
    urls: GoogleApiUrls,
}

impl GoogleDriveClient {
    pub fn new(client: Client, auth: Arc<TokenProvider>) -> Self {
        Self::with_urls(client, auth, GoogleApiUrls::default())
    }

    pub fn with_urls(client: Client, auth: Arc<TokenProvider>, urls: GoogleApiUrls) -> Self {
        Self { client, auth, urls }
    }

    /// Sends an authorized GET request and fails on non-success statuses.
    async fn get(&self, url: Url, query: &[(&str, &str)]) -> DriveResult<Response> {
        tracing::debug!("GET {}", url.path());
        let token = self.auth.access_token().await?;

        let response = self.client.get(url).query(query).bearer_auth(token).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Google API returned {status}: {body}");
            return Err(DriveError::Status { status, body });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> DriveResult<T> {
        Ok(self.get(url, query).await?.json::<T>().await?)
    }
}

#[async_trait]
impl DriveApi for GoogleDriveClient {
    async fn list_files(&self, query: &str, page_size: usize) -> DriveResult<Vec<DocumentRef>> {
        let url = endpoint(&self.urls.drive, &["files"])?;
        let page_size = page_size.to_string();

        let list: FileList = self
            .get_json(url, &[("q", query), ("pageSize", &page_size), ("fields", FILE_FIELDS)])
            .await?;

        Ok(list.files)
    }

    async fn get_document(&self, document_id: &str) -> DriveResult<GoogleDocument> {
        let url = endpoint(&self.urls.docs, &["documents", document_id])?;
        self.get_json(url, &[]).await
    }

    async fn get_spreadsheet(&self, spreadsheet_id: &str) -> DriveResult<Spreadsheet> {
        let url = endpoint(&self.urls.sheets, &["spreadsheets", spreadsheet_id])?;
        self.get_json(url, &[("fields", "sheets.properties.title")]).await
    }

    async fn get_values(&self, spreadsheet_id: &str, range: &str) -> DriveResult<SheetValues> {
        let url = endpoint(&self.urls.sheets, &["spreadsheets", spreadsheet_id, "values", range])?;
        self.get_json(url, &[]).await
    }

    async fn download_file(&self, file_id: &str) -> DriveResult<Vec<u8>> {
        let url = endpoint(&self.urls.drive, &["files", file_id])?;
        let bytes = self.get(url, &[("alt", "media")]).await?.bytes().await?;

        Ok(bytes.to_vec())
    }
}

/// Appends percent-encoded path segments to a base URL.
fn endpoint(base: &str, segments: &[&str]) -> DriveResult<Url> {
    let mut url = Url::parse(base).map_err(|e| DriveError::InvalidUrl(format!("{base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| DriveError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}
