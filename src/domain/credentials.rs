use std::fmt;

use rand::Rng;
use rand::distr::Alphanumeric;

/// Prefix marking an identifier as an API key.
pub const IDENTIFIER_PREFIX: &str = "API";

const IDENTIFIER_RANDOM_LEN: usize = 12;
// 43 alphanumerics carry ~256 bits of entropy.
const SECRET_LEN: usize = 43;

/// The identifier/secret pair shared by the primary service and its add-ons.
///
/// One pair is issued per composition run and threaded to every renderer that needs service
/// authentication. Renderers must never issue their own.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialPair {
    identifier: String,
    secret: String,
}

impl CredentialPair {
    /// Draw a fresh pair from the thread-local CSPRNG.
    pub fn issue() -> Self {
        let identifier =
            format!("{IDENTIFIER_PREFIX}{}", random_alphanumeric(IDENTIFIER_RANDOM_LEN));
        let secret = random_alphanumeric(SECRET_LEN);
        Self { identifier, secret }
    }

    /// Construct a pair from known values, e.g. in tests or fixtures.
    pub fn from_parts(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self { identifier: identifier.into(), secret: secret.into() }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

fn random_alphanumeric(len: usize) -> String {
    rand::rng().sample_iter(&Alphanumeric).take(len).map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_is_prefixed() {
        let pair = CredentialPair::issue();
        assert!(pair.identifier().starts_with(IDENTIFIER_PREFIX));
        assert_eq!(pair.identifier().len(), IDENTIFIER_PREFIX.len() + IDENTIFIER_RANDOM_LEN);
    }

    #[test]
    fn secret_has_fixed_length_and_charset() {
        let pair = CredentialPair::issue();
        assert_eq!(pair.secret().len(), SECRET_LEN);
        assert!(pair.secret().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn pairs_are_unique() {
        let a = CredentialPair::issue();
        let b = CredentialPair::issue();
        assert_ne!(a.identifier(), b.identifier());
        assert_ne!(a.secret(), b.secret());
    }

    #[test]
    fn debug_redacts_secret() {
        let pair = CredentialPair::from_parts("APIkey", "supersecret");
        let rendered = format!("{pair:?}");
        assert!(rendered.contains("APIkey"));
        assert!(!rendered.contains("supersecret"));
    }
}
