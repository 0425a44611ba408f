
pub mod auth;
pub mod client;
mod extract;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::drive::types::SheetValues;

/// Maximum number of files requested from the folder listing.
pub const PAGE_SIZE: usize = 100;

const GOOGLE_DOC_MIME_TYPE: &str = "application/vnd.google-apps.document";
const GOOGLE_SHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";
const PDF_MIME_TYPE: &str = "application/pdf";

/// Cell range read from every sheet of a spreadsheet.
const SHEET_CELL_RANGE: &str = "A1:Z1000";

/// MIME type to extraction strategy.
const KIND_BY_MIME_TYPE: [(&str, DocumentKind); 3] = [
    (GOOGLE_DOC_MIME_TYPE, DocumentKind::Document),
    (GOOGLE_SHEET_MIME_TYPE, DocumentKind::Spreadsheet),
    (PDF_MIME_TYPE, DocumentKind::Pdf),
];

#[derive(Debug, Error)]
pub enum DriveError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Google API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Authorization failed: {0}")]
    Auth(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
}

pub type DriveResult<T> = Result<T, DriveError>;

/// The kinds of files the bot knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Document,
    Spreadsheet,
    Pdf,
    Unsupported,
}

impl DocumentKind {
    pub fn from_mime_type(mime_type: &str) -> Self {
        KIND_BY_MIME_TYPE
            .iter()
            .find(|(mime, _)| *mime == mime_type)
            .map(|(_, kind)| *kind)
            .unwrap_or(DocumentKind::Unsupported)
    }

    /// Human readable name used when listing documents.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Document => "Google Doc",
            DocumentKind::Spreadsheet => "Google Sheet",
            DocumentKind::Pdf => "PDF",
            DocumentKind::Unsupported => "Unsupported",
        }
    }
}

/// A file in the configured Drive folder, without its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRef {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    #[serde(default)]
    pub web_view_link: String,
}

impl DocumentRef {
    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_mime_type(&self.mime_type)
    }
}

/// Low level access to the Drive, Docs and Sheets REST APIs.
#[automock]
#[async_trait]
pub trait DriveApi: Send + Sync {
    /// Lists files matching a Drive search query.
    async fn list_files(&self, query: &str, page_size: usize) -> DriveResult<Vec<DocumentRef>>;

    /// Fetches a Google Doc.
    async fn get_document(&self, document_id: &str) -> DriveResult<types::GoogleDocument>;

    /// Fetches spreadsheet metadata (sheet titles).
    async fn get_spreadsheet(&self, spreadsheet_id: &str) -> DriveResult<types::Spreadsheet>;

    /// Fetches the values of a range in A1 notation.
    async fn get_values(&self, spreadsheet_id: &str, range: &str) -> DriveResult<SheetValues>;

    /// Downloads the raw bytes of a file.
    async fn download_file(&self, file_id: &str) -> DriveResult<Vec<u8>>;
}

/// Lists the documents of a folder and extracts their text.
#[automock]
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Lists readable documents in the folder, in the order Drive returns them.
    async fn list_documents(&self) -> DriveResult<Vec<DocumentRef>>;

    /// Extracts the text of a document.
    async fn fetch_content(&self, document: &DocumentRef) -> DriveResult<String>;
}

pub struct DriveDocumentSource {
    api: Arc<dyn DriveApi>,
    folder_id: String,
}

impl DriveDocumentSource {
    pub fn new(api: Arc<dyn DriveApi>, folder_id: impl Into<String>) -> Self {
        Self { api, folder_id: folder_id.into() }
    }

    async fn fetch_spreadsheet(&self, spreadsheet_id: &str) -> DriveResult<String> {
        let spreadsheet = self.api.get_spreadsheet(spreadsheet_id).await?;

        let mut sheets = Vec::with_capacity(spreadsheet.sheets.len());
        for sheet in spreadsheet.sheets {
            let title = sheet.properties.title;
            let values = self.api.get_values(spreadsheet_id, &sheet_range(&title)).await?;
            sheets.push((title, values.values));
        }

        Ok(extract::spreadsheet_text(&sheets))
    }
}

#[async_trait]
impl DocumentSource for DriveDocumentSource {
    async fn list_documents(&self) -> DriveResult<Vec<DocumentRef>> {
        let query = folder_query(&self.folder_id);
        let files = self.api.list_files(&query, PAGE_SIZE).await?;
        tracing::debug!("Drive returned {} files for folder {}", files.len(), self.folder_id);

        Ok(files
            .into_iter()
            .filter(|file| file.kind() != DocumentKind::Unsupported)
            .take(PAGE_SIZE)
            .collect())
    }

    async fn fetch_content(&self, document: &DocumentRef) -> DriveResult<String> {
        tracing::debug!("Fetching content of {} ({})", document.name, document.mime_type);

        match document.kind() {
            DocumentKind::Document => {
                let google_doc = self.api.get_document(&document.id).await?;
                Ok(extract::document_text(&google_doc))
            }
            DocumentKind::Spreadsheet => self.fetch_spreadsheet(&document.id).await,
            DocumentKind::Pdf => {
                let bytes = self.api.download_file(&document.id).await?;
                Ok(extract::pdf_placeholder(bytes.len()))
            }
            DocumentKind::Unsupported => {
                Err(DriveError::UnsupportedType(document.mime_type.clone()))
            }
        }
    }
}

/// Builds the Drive search query for readable files directly under a folder.
pub fn folder_query(folder_id: &str) -> String {
    let mime_filter = KIND_BY_MIME_TYPE
        .iter()
        .map(|(mime, _)| format!("mimeType = '{mime}'"))
        .collect::<Vec<_>>()
        .join(" or ");

    format!(
        "'{}' in parents and trashed = false and ({mime_filter})",
        escape_query_literal(folder_id)
    )
}

/// A1 range covering the readable cells of a sheet.
pub fn sheet_range(title: &str) -> String {
    format!("'{}'!{SHEET_CELL_RANGE}", title.replace('\'', "''"))
}

fn escape_query_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
