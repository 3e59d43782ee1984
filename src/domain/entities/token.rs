//! OAuth2 access token entity.

use chrono::{DateTime, Duration, Utc};

/// A bearer token obtained from the 23andMe token endpoint.
#[derive(Clone)]
pub struct AccessToken {
    pub value: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub obtained_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(
        value: String,
        refresh_token: Option<String>,
        scope: Option<String>,
        expires_in: Option<u64>,
        obtained_at: DateTime<Utc>,
    ) -> Self {
        // Lifetimes too large to represent are treated as unknown.
        let expires_at = expires_in
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| obtained_at.checked_add_signed(lifetime));

        Self {
            value,
            refresh_token,
            scope,
            obtained_at,
            expires_at,
        }
    }

    /// Tokens without a known lifetime never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"***")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "***"))
            .field("scope", &self.scope)
            .field("obtained_at", &self.obtained_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let token = AccessToken::new("abc".into(), None, None, Some(60), now);

        assert!(!token.is_expired(now));
        assert!(token.is_expired(now + Duration::seconds(60)));
    }

    #[test]
    fn test_no_lifetime_never_expires() {
        let now = Utc::now();
        let token = AccessToken::new("abc".into(), None, None, None, now);
        assert!(!token.is_expired(now + Duration::days(365)));
    }

    #[test]
    fn test_huge_lifetime_means_no_expiry() {
        let now = Utc::now();
        let token = AccessToken::new("abc".into(), None, None, Some(u64::MAX / 2), now);
        assert!(token.expires_at.is_none());

        let token = AccessToken::new("abc".into(), None, None, Some(10_000_000_000_000_000), now);
        assert!(token.expires_at.is_none());
        assert!(!token.is_expired(now));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let token = AccessToken::new("secret".into(), Some("refresh".into()), None, None, Utc::now());
        let printed = format!("{token:?}");
        assert!(!printed.contains("secret"));
        assert!(!printed.contains("refresh\""));
    }
}
