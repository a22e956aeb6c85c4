#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid token file {path}: {message}")]
    Token { path: String, message: String },

    #[error("Authorization failed: {message}")]
    AuthFlow {
        message: String,
        status: Option<u16>,
    },

    #[error("No {0} leagues found on this Yahoo account")]
    NoLeagueFound(String),

    #[error("Failed to fetch {what}: {message}")]
    Fetch { what: String, message: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::AuthFlow { .. } | AppError::Token { .. } => 2,
            AppError::Config(_) => 3,
            AppError::NoLeagueFound(_) => 4,
            _ => 1,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Token { .. } => "token",
            AppError::AuthFlow { .. } => "auth_flow",
            AppError::NoLeagueFound(_) => "no_league_found",
            AppError::Fetch { .. } => "fetch",
            AppError::Api { .. } => "api",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Http(_) => "network",
            AppError::Json(_) => "json",
            AppError::Csv(_) => "csv",
            AppError::Io(_) => "io",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::json!({
            "error": self.error_type(),
            "message": self.to_string(),
        });
        if let Some(status) = self.http_status() {
            obj["status"] = serde_json::json!(status);
        }
        obj
    }

    fn http_status(&self) -> Option<u16> {
        match self {
            AppError::AuthFlow { status, .. } | AppError::Api { status, .. } => *status,
            AppError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Wrap a failure of one fetch unit (a team roster, a position query) so
    /// the caller can log it and move on.
    pub fn fetch(what: impl Into<String>, source: AppError) -> Self {
        AppError::Fetch {
            what: what.into(),
            message: source.to_string(),
        }
    }
}
