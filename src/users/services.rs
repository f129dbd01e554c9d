use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use super::{
    dto::{LoginRequest, PublicUser, RegisterRequest},
    repo_types::NewUser,
};
use crate::{
    auth::{
        password::{burn_verify, hash_password, verify_password},
        JwtKeys,
    },
    db::{DbError, Repository},
    error::{ApiError, ApiResult},
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Registration input that passed validation.
#[derive(Debug)]
pub struct ValidRegistration {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

pub fn validate_registration(req: RegisterRequest) -> ApiResult<ValidRegistration> {
    let email = normalize_email(&req.email);
    if !is_valid_email(&email) {
        return Err(ApiError::validation("Invalid email"));
    }
    if req.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::validation("Name is required"));
    }
    Ok(ValidRegistration {
        email,
        password: req.password,
        name,
    })
}

/// Input that cannot match any account fails like a wrong password.
pub fn validate_login(req: LoginRequest) -> ApiResult<Credentials> {
    let email = normalize_email(&req.email);
    if !is_valid_email(&email) || req.password.is_empty() {
        warn!(email = %email, "login with unusable credentials");
        return Err(ApiError::unauthorized("Invalid credentials"));
    }
    Ok(Credentials {
        email,
        password: req.password,
    })
}

pub async fn register(repo: &dyn Repository, input: ValidRegistration) -> ApiResult<PublicUser> {
    if repo.find_user_by_email(&input.email).await?.is_some() {
        warn!(email = %input.email, "email already registered");
        return Err(ApiError::Conflict("User already exists".into()));
    }

    let password_hash = hash_password(&input.password)?;
    let user = repo
        .create_user(NewUser {
            email: input.email,
            name: input.name,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            // lost a race with a concurrent registration
            DbError::Duplicate(_) => ApiError::Conflict("User already exists".into()),
            other => other.into(),
        })?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(user.into())
}

/// Checks credentials and issues a bearer token.
pub async fn login(
    repo: &dyn Repository,
    keys: &JwtKeys,
    creds: Credentials,
) -> ApiResult<(PublicUser, String)> {
    let Some(user) = repo.find_user_by_email(&creds.email).await? else {
        burn_verify(&creds.password);
        warn!(email = %creds.email, "login unknown email");
        return Err(ApiError::unauthorized("Invalid credentials"));
    };

    if !verify_password(&creds.password, &user.password_hash)? {
        warn!(email = %creds.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = keys.sign(user.id)?;
    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok((user.into(), token))
}
