use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use base64::Engine;
use hmac::Mac;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::debug;

type HmacSha256 = hmac::Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "mindgate_session";

/// HMAC key the session cookie is signed with.
#[derive(Clone)]
pub struct SessionKey(Arc<Vec<u8>>);

impl SessionKey {
    pub fn new(secret: &[u8]) -> Self {
        Self(Arc::new(secret.to_vec()))
    }

    fn sign(&self, payload: &str) -> Option<String> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.0).ok()?;
        mac.update(payload.as_bytes());
        Some(hex::encode(mac.finalize().into_bytes()))
    }
}

/// Per-browser state carried in a signed cookie. Extracting it never fails:
/// a missing, tampered or unreadable cookie yields an empty session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub mind_name: Option<String>,
}

impl Session {
    pub fn bound_to(mind_name: impl Into<String>) -> Self {
        Self {
            mind_name: Some(mind_name.into()),
        }
    }

    pub fn encode(&self, key: &SessionKey) -> String {
        let json = serde_json::to_vec(self).unwrap_or_default();
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(json);
        let signature = key.sign(&payload).unwrap_or_default();
        format!("{}.{}", payload, signature)
    }

    pub fn decode(value: &str, key: &SessionKey) -> Option<Self> {
        let (payload, signature) = value.rsplit_once('.')?;
        let expected = key.sign(payload)?;
        if !constant_time_eq(signature.as_bytes(), expected.as_bytes()) {
            return None;
        }
        let json = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(payload)
            .ok()?;
        serde_json::from_slice(&json).ok()
    }

    /// Value for a `Set-Cookie` header storing this session.
    pub fn to_cookie(&self, key: &SessionKey) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE,
            self.encode(key)
        )
    }
}

fn cookie_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v)
}

impl<S> FromRequestParts<S> for Session
where
    SessionKey: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let key = SessionKey::from_ref(state);
        let Some(raw) = cookie_value(parts, SESSION_COOKIE) else {
            return Ok(Session::default());
        };
        match Session::decode(raw, &key) {
            Some(session) => Ok(session),
            None => {
                debug!("Ignoring session cookie with a bad signature");
                Ok(Session::default())
            }
        }
    }
}

/// Constant-time comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn key() -> SessionKey {
        SessionKey::new(b"test-secret")
    }

    async fn extract(cookie: Option<&str>) -> Session {
        let mut builder = Request::builder().uri("/send");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        Session::from_request_parts(&mut parts, &key()).await.unwrap()
    }

    #[tokio::test]
    async fn signed_cookie_is_read_back() {
        let session = Session::bound_to("postgresql_mind_1700000000");
        let cookie = format!("theme=dark; {}={}", SESSION_COOKIE, session.encode(&key()));
        assert_eq!(extract(Some(&cookie)).await, session);
    }

    #[tokio::test]
    async fn missing_cookie_is_an_empty_session() {
        assert_eq!(extract(None).await, Session::default());
    }

    #[tokio::test]
    async fn tampered_cookie_is_ignored() {
        let encoded = Session::bound_to("mine").encode(&key());
        let (_, signature) = encoded.rsplit_once('.').unwrap();
        let forged_payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .encode(br#"{"mind_name":"someone_elses_mind"}"#);
        let cookie = format!("{}={}.{}", SESSION_COOKIE, forged_payload, signature);
        assert_eq!(extract(Some(&cookie)).await, Session::default());
    }

    #[test]
    fn cookie_signed_with_another_key_is_rejected() {
        let encoded = Session::bound_to("mine").encode(&SessionKey::new(b"other"));
        assert_eq!(Session::decode(&encoded, &key()), None);
    }

    #[test]
    fn set_cookie_value_is_http_only() {
        let cookie = Session::bound_to("m").to_cookie(&key());
        assert!(cookie.starts_with("mindgate_session="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
    }
}
