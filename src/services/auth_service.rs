use std::sync::OnceLock;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use bson::oid::ObjectId;
use regex::Regex;

use crate::config::AuthSettings;
use crate::db::UserStore;
use crate::error::ApiError;
use crate::middleware::auth::Claims;
use crate::models::user::{RegisterRequest, User};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| {
            Regex::new(
                r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*$",
            )
            .expect("email pattern compiles")
        })
        .is_match(email)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Creates the account and returns the stored user. Profile fields are
/// optional and only kept when non-blank.
pub async fn register(
    store: &dyn UserStore,
    settings: &AuthSettings,
    input: RegisterRequest,
) -> Result<User, ApiError> {
    let username = input.username.trim().to_string();
    if username.is_empty() || username.chars().any(char::is_whitespace) {
        return Err(ApiError::BadRequest(
            "Username is required and cannot contain spaces".to_string(),
        ));
    }
    if input.password.is_empty() {
        return Err(ApiError::BadRequest("Password is required".to_string()));
    }

    let email = non_blank(input.email);
    if let Some(email) = &email {
        if !is_valid_email(email) {
            return Err(ApiError::BadRequest("Invalid email address".to_string()));
        }
    }

    let password_hash = bcrypt::hash(&input.password, settings.bcrypt_cost)?;

    let mut user = User::new(username, password_hash);
    user.first_name = non_blank(input.first_name);
    user.last_name = non_blank(input.last_name);
    user.email = email;

    let user = store.insert(user).await?;
    log::info!("Registered user {}", user.username);
    Ok(user)
}

/// Local strategy: checks the password against the stored hash and keeps the
/// sign-in counters on the user document up to date.
pub async fn authenticate_local(
    store: &dyn UserStore,
    username: &str,
    password: &str,
) -> Result<User, ApiError> {
    let mut user = match store.find_by_username(username.trim()).await? {
        Some(user) => user,
        None => {
            log::debug!("Sign-in for unknown user {}", username);
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
    };

    if bcrypt::verify(password, &user.password_hash).unwrap_or(false) {
        user.last_signin = Some(Utc::now());
        user.failed_signins = Some(0);
        store.save(&user).await?;
        Ok(user)
    } else {
        let failed_signins = user.failed_signins.unwrap_or(0) + 1;
        user.failed_signins = Some(failed_signins);
        store.save(&user).await?;
        log::warn!(
            "Failed sign-in for {} ({} consecutive)",
            user.username,
            failed_signins
        );
        Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))
    }
}

pub fn issue_token(user: &User, settings: &AuthSettings) -> Result<String, ApiError> {
    let user_id = user
        .id
        .ok_or_else(|| ApiError::Internal("cannot issue a token for an unsaved user".to_string()))?;
    let now = Utc::now();
    let expires_at = Duration::try_seconds(settings.token_ttl_secs)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| {
            ApiError::Internal(format!("token lifetime {}s is out of range", settings.token_ttl_secs))
        })?;

    let claims = Claims {
        sub: user_id.to_hex(),
        username: user.username.clone(),
        iat: now.timestamp() as usize,
        exp: expires_at.timestamp() as usize,
    };

    Ok(sign_claims(&claims, &settings.jwt_secret)?)
}

pub fn sign_claims(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let header = Header::new(Algorithm::HS256);
    encode(&header, claims, &EncodingKey::from_secret(secret.as_bytes()))
}

/// Verifies signature and expiry and returns the embedded claims.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "sub"]);

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
}

impl Claims {
    pub fn user_id(&self) -> Option<ObjectId> {
        ObjectId::parse_str(&self.sub).ok()
    }
}
