use clap::{ArgAction, Parser};
use once_cell::sync::Lazy;

pub const JWT_EXPRIED_TIME: i64 = 86400i64;

pub const STUDENT_PAGE_SIZE: u64 = 20;
pub const EXAM_PAGE_SIZE: u64 = 20;
pub const RESULT_PAGE_SIZE: u64 = 50;
pub const RECENT_UPLOAD_LIMIT: u64 = 5;

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value_t = true, action = ArgAction::Set)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env)]
    pub jwt_secret: String,

    #[clap(long, env, default_value = "admin")]
    pub admin_username: String,

    #[clap(long, env)]
    pub admin_email: String,

    #[clap(long, env)]
    pub admin_password: String,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    /// Upper bound for multipart result uploads, in bytes
    #[clap(long, env, default_value_t = 10 * 1024 * 1024)]
    pub max_upload_bytes: usize,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,
}
