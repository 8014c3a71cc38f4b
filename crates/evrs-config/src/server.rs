use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Built frontend served behind the route gate. `None` disables static serving.
    pub static_dir: Option<PathBuf>,
    pub log_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: None,
            log_dir: PathBuf::from("storage/logs"),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: crate::env_opt("SERVER_HOST").unwrap_or(defaults.host),
            port: crate::env_or("SERVER_PORT", defaults.port),
            static_dir: crate::env_opt("STATIC_DIR").map(PathBuf::from),
            log_dir: crate::env_opt("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
