//! Operator authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::admin::AdminClaims,
};

#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Authenticate an operator against the configured allow-list and
    /// return a signed token.
    pub fn login(&self, email: &str, password: &str) -> AppResult<String> {
        if self.config.admins.is_empty() {
            return Err(AppError::Configuration(
                "Admin not configured on server".to_string(),
            ));
        }

        let account = self
            .config
            .admins
            .iter()
            .find(|account| account.email == email)
            .ok_or_else(|| AppError::InvalidCredentials("Invalid credentials".to_string()))?;

        if !verify_password(&account.password_hash, password) {
            return Err(AppError::InvalidCredentials("Invalid credentials".to_string()));
        }

        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            sub: account.email.clone(),
            is_admin: true,
            exp: now + (self.config.jwt_expiration_hours as i64 * 3600),
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }
}

fn verify_password(stored_hash: &str, password: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Hash a password for the operator allow-list (used when provisioning
/// admin accounts).
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdminAccount;

    fn service_with(email: &str, password: &str) -> AuthService {
        AuthService::new(AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_expiration_hours: 24,
            admins: vec![AdminAccount {
                email: email.to_string(),
                password_hash: hash_password(password).unwrap(),
            }],
            admin_api_key: None,
        })
    }

    #[test]
    fn valid_credentials_yield_admin_token() {
        let service = service_with("ops@namgailtours.com", "trekking123");
        let token = service.login("ops@namgailtours.com", "trekking123").unwrap();

        let claims = AdminClaims::from_token(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, "ops@namgailtours.com");
        assert!(claims.is_admin);
    }

    #[test]
    fn wrong_password_is_rejected() {
        let service = service_with("ops@namgailtours.com", "trekking123");
        assert!(matches!(
            service.login("ops@namgailtours.com", "wrong"),
            Err(AppError::InvalidCredentials(_))
        ));
    }

    #[test]
    fn unknown_email_is_rejected() {
        let service = service_with("ops@namgailtours.com", "trekking123");
        assert!(matches!(
            service.login("other@namgailtours.com", "trekking123"),
            Err(AppError::InvalidCredentials(_))
        ));
    }

    #[test]
    fn empty_allow_list_is_a_configuration_error() {
        let service = AuthService::new(AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_expiration_hours: 24,
            admins: Vec::new(),
            admin_api_key: None,
        });
        assert!(matches!(
            service.login("ops@namgailtours.com", "x"),
            Err(AppError::Configuration(_))
        ));
    }
}
