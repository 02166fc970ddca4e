use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key. When absent the mailer is a no-op and every
    /// dispatch reports `emailSent: false`.
    pub api_key: Option<String>,
    pub from: String,
    /// Base URL the verification link points at; the raw token is appended
    /// as a `token` query parameter.
    pub verify_base_url: String,
    pub send_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub email: EmailConfig,
}

impl AppConfig {
    /// Reads configuration from the environment. `DATABASE_URL` and
    /// `JWT_SECRET` are required; startup fails without them rather than
    /// falling back to a weak default.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "raadhealth".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "raadhealth-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 7),
        };
        let email = EmailConfig {
            api_key: std::env::var("RESEND_API_KEY").ok(),
            from: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "Raad Health <onboarding@resend.dev>".into()),
            verify_base_url: std::env::var("EMAIL_VERIFY_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:4000/verify-success".into()),
            send_timeout_secs: std::env::var("EMAIL_SEND_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(10),
        };
        Ok(Self {
            database_url,
            jwt,
            email,
        })
    }
}
