use validator::Validate;
use zeroize::Zeroizing;

use crate::auth::jwt::JwtService;
use crate::auth::password::verify_password;
use crate::entities::token::{AuthResponse, LoginRequest};
use crate::errors::AuthError;
use crate::settings::AppConfig;

/// Single configured administrator; there is no user table.
pub struct AdminAuthHandler {
    pub jwt_service: JwtService,
    admin_username: String,
    admin_password_hash: Option<Zeroizing<String>>,
}

impl AdminAuthHandler {
    pub fn new(config: &AppConfig) -> Self {
        AdminAuthHandler {
            jwt_service: JwtService::new(config),
            admin_username: config.admin_username.clone(),
            admin_password_hash: config
                .admin_password_hash
                .as_ref()
                .filter(|hash| !hash.trim().is_empty())
                .map(|hash| Zeroizing::new(hash.trim().to_string())),
        }
    }

    /// Verifies the configured admin credentials and issues an access token.
    pub fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        request.validate()?;

        let Some(hash) = self.admin_password_hash.as_ref() else {
            tracing::warn!("Admin login attempted but no password hash is configured");
            return Err(AuthError::LoginDisabled);
        };

        let password = Zeroizing::new(request.password);
        let password_ok = verify_password(&password, hash)?;

        if request.username != self.admin_username || !password_ok {
            tracing::warn!(username = %request.username, "Rejected admin login");
            return Err(AuthError::WrongCredentials);
        }

        let access_token = self.jwt_service.create_admin_token(&self.admin_username).map_err(|e| {
            tracing::warn!("Failed to create JWT: {}", e);
            AuthError::TokenCreation
        })?;

        tracing::info!(username = %self.admin_username, "Admin logged in");
        Ok(AuthResponse::new(access_token, self.jwt_service.expires_in()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use crate::test_support::test_config;

    fn handler_with_password(password: &str) -> AdminAuthHandler {
        let mut config = test_config();
        config.admin_password_hash = Some(hash_password(password).unwrap());
        AdminAuthHandler::new(&config)
    }

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    #[test]
    fn correct_credentials_issue_token() {
        let handler = handler_with_password("s3cret-pass");

        let response = handler.login(login("admin", "s3cret-pass")).unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 3600);
        let claims = handler.jwt_service.decode_jwt(&response.access_token).unwrap().claims;
        assert!(claims.admin);
    }

    #[test]
    fn wrong_password_or_username_is_rejected() {
        let handler = handler_with_password("s3cret-pass");

        assert!(matches!(handler.login(login("admin", "nope")), Err(AuthError::WrongCredentials)));
        assert!(matches!(handler.login(login("root", "s3cret-pass")), Err(AuthError::WrongCredentials)));
    }

    #[test]
    fn login_disabled_without_hash() {
        let handler = AdminAuthHandler::new(&test_config());

        assert!(matches!(handler.login(login("admin", "anything")), Err(AuthError::LoginDisabled)));
    }

    #[test]
    fn blank_credentials_are_missing() {
        let handler = handler_with_password("s3cret-pass");

        assert!(matches!(handler.login(login("", "")), Err(AuthError::MissingCredentials)));
    }
}
