//! ==============================================================================
//! token.rs - hs256 tokens for control units
//! ==============================================================================
//!
//! purpose:
//!     mints the bearer tokens a control unit presents to the backend.
//!     the secret is read raw from disk and used verbatim as the hmac key.
//!
//! profiles:
//!     two credential shapes exist and are kept apart on purpose:
//!     - control-unit: carries the unit id, valid for 365 days
//!     - short-lived:  no unit id, valid for 30 minutes
//!
//! nothing here verifies tokens.
//!
//! ==============================================================================

use crate::config::TokenConfig;
use crate::error::{Error, Result};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SUBJECT: &str = "controlunits";
pub const ROLE: &str = "sensorgateway";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TokenProfile {
    /// long-lived credential bound to one control unit
    #[default]
    ControlUnit,
    /// 30 minute credential without a unit id
    ShortLived,
}

impl TokenProfile {
    pub fn lifetime(self) -> Duration {
        match self {
            Self::ControlUnit => Duration::days(365),
            Self::ShortLived => Duration::minutes(30),
        }
    }

    pub fn needs_unit_id(self) -> bool {
        matches!(self, Self::ControlUnit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn for_profile(profile: TokenProfile, unit_id: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            sub: SUBJECT.to_string(),
            role: ROLE.to_string(),
            unit_id: if profile.needs_unit_id() { unit_id } else { None },
            iat: now.timestamp(),
            exp: (now + profile.lifetime()).timestamp(),
        }
    }
}

/// sign claims with HS256
pub fn sign(claims: &Claims, secret: &[u8]) -> Result<String> {
    Ok(encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret),
    )?)
}

/// what `mint-token` prints: a header line, then the token on its own line
pub fn stdout_lines(token: &str) -> String {
    format!("JWT Token:\n{token}\n")
}

/// raw secret bytes, untrimmed
pub fn load_secret(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| Error::io(path, e))
}

/// unit id with surrounding whitespace removed
pub fn load_unit_id(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map(|raw| raw.trim().to_string())
        .map_err(|e| Error::io(path, e))
}

/// read the files a profile needs, build its claims as of `now`, and sign them.
///
/// every file is read before anything is signed; a missing file aborts.
pub fn mint(profile: TokenProfile, files: &TokenConfig, now: DateTime<Utc>) -> Result<String> {
    let secret = load_secret(&files.secret_file)?;
    let unit_id = if profile.needs_unit_id() {
        Some(load_unit_id(&files.unit_id_file)?)
    } else {
        None
    };

    let claims = Claims::for_profile(profile, unit_id, now);
    tracing::debug!(?profile, sub = %claims.sub, role = %claims.role, exp = claims.exp, "signing token");
    sign(&claims, &secret)
}
