use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::{config::JwtConfig, state::AppState};

/// Which of the two key domains a token belongs to. Access and refresh
/// tokens are signed with independent secrets, so a token of one kind can
/// never pass verification as the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Signed token payload: subject identity plus issue/expiry timestamps.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub id: Uuid,
    pub username: String,
    pub iat: usize,
    pub exp: usize,
}

/// The identity carried by a verified token.
#[derive(Debug, Clone)]
pub struct Subject {
    pub id: Uuid,
    pub username: String,
}

impl From<Claims> for Subject {
    fn from(claims: Claims) -> Self {
        Subject {
            id: claims.id,
            username: claims.username,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signing and verification material for both token kinds.
#[derive(Clone)]
pub struct JwtKeys {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        JwtKeys::from_config(&state.config.jwt)
    }
}

impl JwtKeys {
    pub fn from_config(config: &JwtConfig) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl: Duration::from_secs((config.access_ttl_hours as u64) * 3600),
            refresh_ttl: Duration::from_secs((config.refresh_ttl_hours as u64) * 3600),
        }
    }

    fn encoding_for(&self, kind: TokenKind) -> (&EncodingKey, Duration) {
        match kind {
            TokenKind::Access => (&self.access_encoding, self.access_ttl),
            TokenKind::Refresh => (&self.refresh_encoding, self.refresh_ttl),
        }
    }

    fn decoding_for(&self, kind: TokenKind) -> &DecodingKey {
        match kind {
            TokenKind::Access => &self.access_decoding,
            TokenKind::Refresh => &self.refresh_decoding,
        }
    }

    pub fn sign(&self, kind: TokenKind, subject: &Subject) -> anyhow::Result<String> {
        let (key, ttl) = self.encoding_for(kind);
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(ttl.as_secs() as i64);
        let claims = Claims {
            id: subject.id,
            username: subject.username.clone(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, key)?;
        debug!(user_id = %subject.id, kind = ?kind, "jwt signed");
        Ok(token)
    }

    /// Signs a fresh access/refresh pair for the subject. Used by register,
    /// login and refresh alike; refresh rotation is just a new pair.
    pub fn sign_pair(&self, subject: &Subject) -> anyhow::Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.sign(TokenKind::Access, subject)?,
            refresh_token: self.sign(TokenKind::Refresh, subject)?,
        })
    }

    /// Verifies signature and expiry under the kind's secret. Callers
    /// surface any failure uniformly as unauthorized, so signature and
    /// expiry errors stay indistinguishable to clients.
    pub fn verify(&self, kind: TokenKind, token: &str) -> anyhow::Result<Claims> {
        let validation = Validation::default();
        let data = decode::<Claims>(token, self.decoding_for(kind), &validation)?;
        debug!(user_id = %data.claims.id, kind = ?kind, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;

    fn make_keys() -> JwtKeys {
        JwtKeys::from_config(&JwtConfig {
            access_secret: "test-access-secret".into(),
            refresh_secret: "test-refresh-secret".into(),
            access_ttl_hours: 24,
            refresh_ttl_hours: 24 * 30,
        })
    }

    fn make_subject() -> Subject {
        Subject {
            id: Uuid::new_v4(),
            username: "alice".into(),
        }
    }

    #[test]
    fn sign_and_verify_access_token() {
        let keys = make_keys();
        let subject = make_subject();
        let token = keys.sign(TokenKind::Access, &subject).expect("sign access");
        let claims = keys.verify(TokenKind::Access, &token).expect("verify");
        assert_eq!(claims.id, subject.id);
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn sign_and_verify_refresh_token() {
        let keys = make_keys();
        let subject = make_subject();
        let token = keys
            .sign(TokenKind::Refresh, &subject)
            .expect("sign refresh");
        let claims = keys.verify(TokenKind::Refresh, &token).expect("verify");
        assert_eq!(claims.id, subject.id);
    }

    #[test]
    fn access_token_rejected_under_refresh_kind() {
        let keys = make_keys();
        let token = keys
            .sign(TokenKind::Access, &make_subject())
            .expect("sign access");
        assert!(keys.verify(TokenKind::Refresh, &token).is_err());
    }

    #[test]
    fn refresh_token_rejected_under_access_kind() {
        let keys = make_keys();
        let token = keys
            .sign(TokenKind::Refresh, &make_subject())
            .expect("sign refresh");
        assert!(keys.verify(TokenKind::Access, &token).is_err());
    }

    #[test]
    fn expired_token_rejected() {
        let keys = make_keys();
        let subject = make_subject();
        // Encode claims that expired well outside the default leeway.
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            id: subject.id,
            username: subject.username,
            iat: (now - 7200) as usize,
            exp: (now - 3600) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-access-secret"),
        )
        .expect("encode");
        assert!(keys.verify(TokenKind::Access, &token).is_err());
    }

    #[tokio::test]
    async fn rotation_yields_distinct_valid_pairs() {
        let keys = make_keys();
        let subject = make_subject();
        let first = keys.sign_pair(&subject).expect("first pair");
        // iat has one-second resolution; step past it so the pairs differ.
        tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
        let second = keys.sign_pair(&subject).expect("second pair");

        assert_ne!(first.access_token, second.access_token);
        assert_ne!(first.refresh_token, second.refresh_token);
        // Both pairs stay valid: rotation reissues, it does not revoke.
        for pair in [&first, &second] {
            keys.verify(TokenKind::Access, &pair.access_token)
                .expect("access valid");
            keys.verify(TokenKind::Refresh, &pair.refresh_token)
                .expect("refresh valid");
        }
    }
}
