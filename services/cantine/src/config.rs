/// Canteen service configuration loaded from environment variables.
#[derive(Debug)]
pub struct CantineConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3220). Env var: `CANTINE_PORT`.
    pub cantine_port: u16,
    /// HS256 signing secret for access/refresh tokens.
    pub jwt_secret: String,
}

impl CantineConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            cantine_port: std::env::var("CANTINE_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3220),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
        }
    }
}
