use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for `--api` mode.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub max_sessions: usize,
    pub cors_max_age: Duration,
    /// Uploads are staged here as `<session id>.jpg`.
    pub upload_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let max_sessions = env::var("LUMINE_MAX_SESSIONS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(256);

        let cors_max_age = env::var("LUMINE_CORS_MAX_AGE")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(3600));

        let upload_dir = env::var("LUMINE_UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir());

        Self {
            max_sessions,
            cors_max_age,
            upload_dir,
        }
    }
}
