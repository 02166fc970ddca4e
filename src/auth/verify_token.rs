use rand::{rngs::OsRng, RngCore};
use time::{Duration, OffsetDateTime};

pub const VERIFICATION_TTL_HOURS: i64 = 24;

/// Single-use opaque token proving control of an email address.
#[derive(Debug, Clone)]
pub struct VerificationToken {
    pub token: String,
    pub expires_at: OffsetDateTime,
}

impl VerificationToken {
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        Self {
            token: hex::encode(bytes),
            expires_at: OffsetDateTime::now_utc() + Duration::hours(VERIFICATION_TTL_HOURS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_64_hex_chars() {
        let t = VerificationToken::generate();
        assert_eq!(t.token.len(), 64);
        assert!(t.token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_are_unique() {
        let a = VerificationToken::generate();
        let b = VerificationToken::generate();
        assert_ne!(a.token, b.token);
    }

    #[test]
    fn expiry_is_about_24_hours_out() {
        let t = VerificationToken::generate();
        let delta = t.expires_at - OffsetDateTime::now_utc();
        assert!(delta > Duration::hours(23));
        assert!(delta <= Duration::hours(24));
    }
}
