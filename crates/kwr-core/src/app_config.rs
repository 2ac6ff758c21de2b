use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub searchad_base_url: String,
    pub searchad_api_key: String,
    pub searchad_secret_key: String,
    pub searchad_customer_id: String,
    pub searchad_timeout_secs: u64,
    pub inter_request_delay_ms: u64,
    pub accounts_path: PathBuf,
    pub presets_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub company_info_path: Option<PathBuf>,
    pub admin_account: String,
    pub export_filename_prefix: String,
    pub dupcheck_search_url: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("searchad_base_url", &self.searchad_base_url)
            .field("searchad_api_key", &"[redacted]")
            .field("searchad_secret_key", &"[redacted]")
            .field("searchad_customer_id", &self.searchad_customer_id)
            .field("searchad_timeout_secs", &self.searchad_timeout_secs)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("accounts_path", &self.accounts_path)
            .field("presets_dir", &self.presets_dir)
            .field("templates_dir", &self.templates_dir)
            .field("company_info_path", &self.company_info_path)
            .field("admin_account", &self.admin_account)
            .field("export_filename_prefix", &self.export_filename_prefix)
            .field("dupcheck_search_url", &self.dupcheck_search_url)
            .finish()
    }
}
