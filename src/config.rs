use std::env::{self, VarError};

const DEFAULT_DATABASE_URL: &str = "sqlite:users.db";
const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_GOOGLE_CREDENTIALS_PATH: &str = "credentials.json";
const DEFAULT_GOOGLE_TOKEN_PATH: &str = "token.json";
const DEFAULT_MAX_SEARCH_DOCUMENTS: usize = 5;
const DEFAULT_MAX_CONTENT_CHARS: usize = 1000;
const DEFAULT_MAX_LISTED_DOCUMENTS: usize = 10;
const DEFAULT_ADMIN_TG_ID: i64 = 123456789;
const DEFAULT_ADMIN_NAME: &str = "Admin";
const DEFAULT_ADMIN_DEPARTMENT: &str = "IT";
const DEFAULT_ADMIN_ROLE: &str = "admin";

/// Represents the application configuration.
#[derive(Debug)]
pub struct Config {
    /// The Telegram bot token.
    pub telegram_bot_token: String,
    /// The API key of the completion API.
    pub openai_api_key: String,
    /// The base URL of the OpenAI compatible completion API.
    pub openai_api_url: String,
    /// The completion model name.
    pub openai_model: String,
    /// The Google Drive folder the documents are read from.
    pub drive_folder_id: String,
    /// Path to the OAuth client secrets file.
    pub google_credentials_path: String,
    /// Path to the cached OAuth token, rewritten on refresh.
    pub google_token_path: String,
    /// The URL of the user database.
    pub database_url: String,
    /// The number of documents fetched to answer a question.
    pub max_search_documents: usize,
    /// The number of characters of each document put into a prompt.
    pub max_content_chars: usize,
    /// The number of documents shown by `/docs`.
    pub max_listed_documents: usize,
    /// The user inserted into the database on startup.
    pub admin: AdminSeed,
}

/// The administrative user seeded on every startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSeed {
    pub tg_id: i64,
    pub name: String,
    pub department: String,
    pub role: String,
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    pub fn from_env() -> Result<Self, VarError> {
        Ok(Self {
            telegram_bot_token: env::var("TELOXIDE_TOKEN")?,
            openai_api_key: env::var("OPENAI_API_KEY")?,
            openai_api_url: env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_API_URL.to_string()),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            drive_folder_id: env::var("GOOGLE_DRIVE_FOLDER_ID")?,
            google_credentials_path: env::var("GOOGLE_CREDENTIALS_PATH")
                .unwrap_or_else(|_| DEFAULT_GOOGLE_CREDENTIALS_PATH.to_string()),
            google_token_path: env::var("GOOGLE_TOKEN_PATH")
                .unwrap_or_else(|_| DEFAULT_GOOGLE_TOKEN_PATH.to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            max_search_documents: parse_or("MAX_SEARCH_DOCUMENTS", DEFAULT_MAX_SEARCH_DOCUMENTS),
            max_content_chars: parse_or("MAX_CONTENT_CHARS", DEFAULT_MAX_CONTENT_CHARS),
            max_listed_documents: parse_or("MAX_LISTED_DOCUMENTS", DEFAULT_MAX_LISTED_DOCUMENTS),
            admin: AdminSeed {
                tg_id: parse_or("ADMIN_TG_ID", DEFAULT_ADMIN_TG_ID),
                name: env::var("ADMIN_NAME").unwrap_or_else(|_| DEFAULT_ADMIN_NAME.to_string()),
                department: env::var("ADMIN_DEPARTMENT")
                    .unwrap_or_else(|_| DEFAULT_ADMIN_DEPARTMENT.to_string()),
                role: env::var("ADMIN_ROLE").unwrap_or_else(|_| DEFAULT_ADMIN_ROLE.to_string()),
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
