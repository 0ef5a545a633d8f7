use once_cell::sync::Lazy;

#[derive(Debug)]
pub struct Config {
    pub gree_recv_timeout_secs: u64,
    pub gree_dump_on_error: bool,
    pub log_gree_payloads: bool,
}

impl Config {
    fn from_env() -> Self {
        let gree_recv_timeout_secs = std::env::var("GREE_RECV_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(15u64);
        let gree_dump_on_error = std::env::var("GREE_DUMP_ON_ERROR")
            .map(|v| v == "1")
            .unwrap_or(false);
        let log_gree_payloads = std::env::var("LOG_GREE_PAYLOADS")
            .map(|v| v == "1")
            .unwrap_or(false);
        Self {
            gree_recv_timeout_secs,
            gree_dump_on_error,
            log_gree_payloads,
        }
    }
}

/// Global config loaded once from environment at first access.
pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

/// Convenience accessor
pub fn config() -> &'static Config {
    &GLOBAL_CONFIG
}
