use std::path::PathBuf;

use sha2::{Digest, Sha256};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory served under the media URL (default: `media`).
    pub media_root: PathBuf,
    /// Public prefix of uploaded files (default: `/media/`).
    pub media_url: String,
    /// TrueType font used for chart text.
    pub chart_font_path: PathBuf,
    /// SHA-256 of `ADMIN_TOKEN`; `None` disables the admin API.
    pub admin_token_sha256: Option<[u8; 32]>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                            |
    /// |------------------------|----------------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                          |
    /// | `PORT`                 | `8000`                                             |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`                            |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                               |
    /// | `MEDIA_ROOT`           | `media`                                            |
    /// | `MEDIA_URL`            | `/media/`                                          |
    /// | `CHART_FONT_PATH`      | `/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf`  |
    /// | `ADMIN_TOKEN`          | unset                                              |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let media_root = std::env::var("MEDIA_ROOT")
            .unwrap_or_else(|_| "media".into())
            .into();

        let media_url = std::env::var("MEDIA_URL").unwrap_or_else(|_| "/media/".into());

        let chart_font_path = std::env::var("CHART_FONT_PATH")
            .unwrap_or_else(|_| "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf".into())
            .into();

        let admin_token_sha256 = std::env::var("ADMIN_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .map(|t| hash_token(t.trim()));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            media_root,
            media_url,
            chart_font_path,
            admin_token_sha256,
        }
    }

    /// Path the media directory is mounted at, when the media URL is local.
    ///
    /// Returns `None` for absolute URLs (files served elsewhere).
    pub fn media_mount_path(&self) -> Option<String> {
        let trimmed = self.media_url.trim_end_matches('/');
        if trimmed.starts_with('/') && trimmed.len() > 1 {
            Some(trimmed.to_string())
        } else {
            None
        }
    }
}

/// SHA-256 digest of a bearer token.
pub fn hash_token(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_media_url(media_url: &str) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_origins: vec![],
            request_timeout_secs: 30,
            media_root: "media".into(),
            media_url: media_url.into(),
            chart_font_path: "font.ttf".into(),
            admin_token_sha256: None,
        }
    }

    #[test]
    fn local_media_url_is_mounted() {
        assert_eq!(
            config_with_media_url("/media/").media_mount_path().as_deref(),
            Some("/media")
        );
    }

    #[test]
    fn remote_or_root_media_url_is_not_mounted() {
        assert_eq!(
            config_with_media_url("https://cdn.example.com/media/").media_mount_path(),
            None
        );
        assert_eq!(config_with_media_url("/").media_mount_path(), None);
    }

    #[test]
    fn token_hash_is_stable() {
        assert_eq!(hash_token("secret"), hash_token("secret"));
        assert_ne!(hash_token("secret"), hash_token("Secret"));
    }
}
