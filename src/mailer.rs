use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::state::AppState;

/// Outgoing email delivery. Implementations must be safe to share across
/// request handlers.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> anyhow::Result<()>;
}

/// Delivers mail through the Resend HTTP API.
pub struct ResendMailer {
    http: reqwest::Client,
    api_key: String,
    from: String,
}

impl ResendMailer {
    pub fn new(api_key: &str, from: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            from: from.to_string(),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> anyhow::Result<()> {
        let resp = self
            .http
            .post("https://api.resend.com/emails")
            .bearer_auth(&self.api_key)
            .json(&json!({
                "from": self.from,
                "to": [to],
                "subject": subject,
                "html": html,
            }))
            .send()
            .await?;
        resp.error_for_status()?;
        Ok(())
    }
}

/// Stands in when no API key is configured; every send fails, which the
/// callers report as `emailSent: false` rather than an error.
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, to: &str, _subject: &str, _html: &str) -> anyhow::Result<()> {
        anyhow::bail!("email delivery is not configured (no RESEND_API_KEY); skipped mail to {to}")
    }
}

fn verification_body(verification_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <style>
    body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
    .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
    .header {{ background: #1D9EBD; color: #ffffff; padding: 20px; text-align: center; }}
    .button {{ background: #1D9EBD; color: #ffffff; padding: 12px 24px; text-decoration: none; border-radius: 6px; display: inline-block; }}
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>Raad Health</h1>
    </div>
    <h2>Verify Your Email Address</h2>
    <p>Click the button below to verify your email:</p>
    <p>
      <a href="{verification_url}" class="button">Verify Email</a>
    </p>
    <p>Or copy this link: {verification_url}</p>
  </div>
</body>
</html>"#
    )
}

/// Attempts to deliver the verification link. Dispatch is best-effort with a
/// bounded timeout so a slow provider never stalls the HTTP response; any
/// failure or timeout degrades to `false`.
pub async fn send_verification_email(state: &AppState, to: &str, token: &str) -> bool {
    let cfg = &state.config.email;
    let url = format!("{}?token={}", cfg.verify_base_url, token);
    let html = verification_body(&url);
    let timeout = Duration::from_secs(cfg.send_timeout_secs);

    match tokio::time::timeout(
        timeout,
        state
            .mailer
            .send(to, "Verify Your Email - Raad Health", &html),
    )
    .await
    {
        Ok(Ok(())) => {
            info!(%to, "verification email sent");
            true
        }
        Ok(Err(e)) => {
            warn!(%to, error = %e, "verification email failed");
            false
        }
        Err(_) => {
            warn!(%to, timeout_secs = cfg.send_timeout_secs, "verification email timed out");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_embeds_the_verification_url() {
        let body = verification_body("http://localhost:4000/verify-success?token=abc123");
        assert!(body.contains("http://localhost:4000/verify-success?token=abc123"));
        assert!(body.contains("Verify Your Email Address"));
    }

    #[tokio::test]
    async fn noop_mailer_always_fails() {
        let err = NoopMailer
            .send("x@example.com", "s", "<p>hi</p>")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not configured"));
    }

    #[tokio::test]
    async fn dispatch_degrades_to_false_without_a_configured_mailer() {
        let state = AppState::fake_with_mailer(std::sync::Arc::new(NoopMailer));
        let sent = send_verification_email(&state, "x@example.com", "deadbeef").await;
        assert!(!sent);
    }
}
