pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: i64 = 8080;
pub const DEFAULT_RUST_LOG: &str = "info,tower_http=info";
pub const DEFAULT_DB_MAX_CONNECTIONS: i64 = 5;
pub const DEFAULT_DB_MIN_IDLE: i64 = 1;
pub const IN_MEMORY_PATH: &str = ":memory:";
pub const LEGACY_DATABASE_PATH_VAR: &str = "DATABASE_PATH";
