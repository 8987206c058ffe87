//! Test access tokens signed with the generated credentials.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;

use super::AppError;
use super::credentials::CredentialPair;

/// Participant and room a printed test token grants access to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestGrant {
    pub identity: &'static str,
    pub name: &'static str,
    pub room: &'static str,
}

impl TestGrant {
    pub const PRODUCTION: TestGrant =
        TestGrant { identity: "test-user", name: "Test User", room: "my-first-room" };
    pub const LOCAL: TestGrant =
        TestGrant { identity: "tony_stark", name: "Tony Stark", room: "stark-tower" };
}

const VALID_FOR_HOURS: i64 = 10_000;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoGrant<'a> {
    room: &'a str,
    room_join: bool,
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    sub: &'a str,
    name: &'a str,
    nbf: i64,
    exp: i64,
    video: VideoGrant<'a>,
}

/// Sign an HS256 access token for `grant`, valid from `now` for 10000 hours.
pub fn sign_test_token(
    credentials: &CredentialPair,
    grant: &TestGrant,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    let claims = Claims {
        iss: credentials.identifier(),
        sub: grant.identity,
        name: grant.name,
        nbf: now.timestamp(),
        exp: (now + Duration::hours(VALID_FOR_HOURS)).timestamp(),
        video: VideoGrant { room: grant.room, room_join: true },
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(credentials.secret().as_bytes()))
        .map_err(|e| AppError::Token(e.to_string()))
}
