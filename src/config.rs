use std::path::PathBuf;

pub const DEFAULT_TOKEN_FILE: &str = "oauth2.json";
pub const GAME_CODE: &str = "nba";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
    Table,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub output_mode: OutputMode,
    pub verbose: bool,
    pub auth: AuthConfig,
}

/// OAuth2 application identifiers issued by the Yahoo developer console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    /// Both halves must be present and non-empty.
    pub fn from_parts(client_id: Option<String>, client_secret: Option<String>) -> Option<Self> {
        let client_id = client_id.filter(|s| !s.is_empty())?;
        let client_secret = client_secret.filter(|s| !s.is_empty())?;
        Some(Self {
            client_id,
            client_secret,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub client: Option<ClientCredentials>,
    pub token_file: PathBuf,
}

impl AuthConfig {
    pub fn new(client: Option<ClientCredentials>, token_file: Option<PathBuf>) -> Self {
        Self {
            client,
            token_file: token_file.unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE)),
        }
    }
}
