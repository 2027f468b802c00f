use std::collections::HashMap;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Registered claims we use plus a flattened map for anything else.
///
/// Identity tokens carry `sub` (the numeric identity id), `iat`, `exp`, a
/// random `jti`, and `email` in `extra`. Absent claims are omitted from the
/// encoded payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Claims {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Unix seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Unix seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims asserting `identity_id` from `issued_at` until `issued_at + ttl`.
    ///
    /// Two logins in the same second still get different tokens because
    /// `jti` is random.
    pub fn for_identity(
        identity_id: i64,
        email: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let expiration = issued_at + ttl;

        Self::new()
            .with_subject(identity_id)
            .with_expiration(expiration.timestamp())
            .with_issued_at(issued_at.timestamp())
            .with_token_id(Uuid::new_v4())
            .with_extra("email", email.to_string())
    }

    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    pub fn with_token_id(mut self, jti: impl ToString) -> Self {
        self.jti = Some(jti.to_string());
        self
    }

    /// Values that fail to serialize are dropped.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Identity id carried in `sub`, if present and numeric.
    pub fn identity_id(&self) -> Option<i64> {
        self.sub.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn email(&self) -> Option<String> {
        self.extra
            .get("email")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }

    /// True once `current_timestamp` reaches `exp`. Claims without `exp`
    /// never expire here.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| exp <= current_timestamp)
    }
}
