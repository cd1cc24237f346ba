//! Login gate: a username plus an argon2-hashed password from configuration.
//!
//! This only guards the local dashboard. There are no sessions; a successful
//! login lasts until the program exits.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use rand_core::OsRng;

/// Credentials accepted by this instance.
#[derive(Clone)]
pub struct AuthConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidCredentials;

/// Check a username/password pair.
pub fn verify(
  username: &str,
  password: &str,
  config: &AuthConfig,
) -> Result<(), InvalidCredentials> {
  if username != config.username {
    return Err(InvalidCredentials);
  }

  let parsed_hash =
    PasswordHash::new(&config.password_hash).map_err(|_| InvalidCredentials)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| InvalidCredentials)
}

/// Produce the PHC string to put in `auth_password_hash`.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Ok(
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?
      .to_string(),
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  fn config(password: &str) -> AuthConfig {
    AuthConfig {
      username:      "admin".to_string(),
      password_hash: hash_password(password).unwrap(),
    }
  }

  #[test]
  fn correct_credentials() {
    assert!(verify("admin", "secret", &config("secret")).is_ok());
  }

  #[test]
  fn wrong_password() {
    assert_eq!(
      verify("admin", "wrong", &config("secret")),
      Err(InvalidCredentials)
    );
  }

  #[test]
  fn wrong_username() {
    assert_eq!(
      verify("root", "secret", &config("secret")),
      Err(InvalidCredentials)
    );
  }

  #[test]
  fn malformed_hash() {
    let cfg = AuthConfig {
      username:      "admin".into(),
      password_hash: "not-a-phc-string".into(),
    };
    assert_eq!(verify("admin", "secret", &cfg), Err(InvalidCredentials));
  }
}
