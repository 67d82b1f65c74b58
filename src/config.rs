use std::env;

pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
    pub jwt: JwtConfig,
    pub smtp: SmtpConfig,
}

/// Signing secrets and lifetimes for the two signed token families.
///
/// Access and refresh tokens are signed with different secrets so that a
/// leaked access secret cannot be used to forge refresh tokens.
#[derive(Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_expiry_minutes: i64,
    pub refresh_expiry_days: i64,
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    /// Base URL embedded in verification and reset links.
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            jwt: JwtConfig::from_env(),
            smtp: SmtpConfig::from_env(),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            access_secret: env::var("JWT_ACCESS_SECRET").expect("JWT_ACCESS_SECRET must be set"),
            refresh_secret: env::var("JWT_REFRESH_SECRET").expect("JWT_REFRESH_SECRET must be set"),
            access_expiry_minutes: env::var("JWT_ACCESS_EXPIRY_MINUTES")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .expect("JWT_ACCESS_EXPIRY_MINUTES must be a number"),
            refresh_expiry_days: env::var("JWT_REFRESH_EXPIRY_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .expect("JWT_REFRESH_EXPIRY_DAYS must be a number"),
        }
    }
}

impl SmtpConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .expect("SMTP_PORT must be a number"),
            username: env::var("SMTP_USERNAME").unwrap_or_default(),
            password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            from: env::var("SMTP_FROM").unwrap_or_else(|_| "noreply@localhost".to_string()),
            base_url: env::var("APP_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required environment variables
        env::set_var("DATABASE_URL", "postgres://test");
        env::set_var("JWT_ACCESS_SECRET", "access-secret");
        env::set_var("JWT_REFRESH_SECRET", "refresh-secret");

        let config = Config::from_env();

        assert_eq!(config.database_url, "postgres://test");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.jwt.access_secret, "access-secret");
        assert_eq!(config.jwt.refresh_secret, "refresh-secret");
        assert_eq!(config.jwt.access_expiry_minutes, 15);
        assert_eq!(config.jwt.refresh_expiry_days, 7);

        // Test custom values
        env::set_var("SERVER_PORT", "3000");
        env::set_var("SERVER_HOST", "0.0.0.0");
        env::set_var("JWT_ACCESS_EXPIRY_MINUTES", "30");

        let config = Config::from_env();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.jwt.access_expiry_minutes, 30);
    }
}
