use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub credentials: Option<CredentialsConfig>,
}

/// Connection settings for the ANOTRACK REST backend
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to (no trailing slash)
    pub base_url: String,
    /// Upper bound on a whole request, including the response body
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

/// Sign-in credentials for the driver binary
#[derive(Clone)]
pub struct CredentialsConfig {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            api: ApiConfig::from_env()?,
            credentials: CredentialsConfig::from_env(),
        })
    }
}

impl ApiConfig {
    const DEFAULT_BASE_URL: &'static str = "http://localhost:8080/api";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("ANOTRACK_API_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());

        let request_timeout_secs = env::var("ANOTRACK_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "ANOTRACK_REQUEST_TIMEOUT_SECS must be a valid number".to_string())?;

        let connect_timeout_secs = env::var("ANOTRACK_CONNECT_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_CONNECT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "ANOTRACK_CONNECT_TIMEOUT_SECS must be a valid number".to_string())?;

        let user_agent = env::var("ANOTRACK_USER_AGENT")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(default_user_agent);

        Self::new(
            &base_url,
            Duration::from_secs(request_timeout_secs),
            Duration::from_secs(connect_timeout_secs),
            user_agent,
        )
    }

    pub fn new(
        base_url: &str,
        request_timeout: Duration,
        connect_timeout: Duration,
        user_agent: String,
    ) -> Result<Self, String> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err("ANOTRACK_API_BASE_URL must not be empty".to_string());
        }
        if request_timeout.is_zero() {
            return Err("Request timeout must be greater than zero".to_string());
        }

        Ok(Self {
            base_url,
            request_timeout,
            connect_timeout,
            user_agent,
        })
    }

    /// Join an endpoint path such as `/blocs` onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(Self::DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(Self::DEFAULT_CONNECT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        }
    }
}

impl CredentialsConfig {
    /// Both variables must be set and non-empty, otherwise no credentials
    pub fn from_env() -> Option<Self> {
        let username = env::var("ANOTRACK_USERNAME").ok().filter(|s| !s.is_empty())?;
        let password = env::var("ANOTRACK_PASSWORD").ok().filter(|s| !s.is_empty())?;
        Some(Self { username, password })
    }
}

fn default_user_agent() -> String {
    format!("anotrack-client/{}", env!("CARGO_PKG_VERSION"))
}
