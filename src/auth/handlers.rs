use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{info, warn};

use crate::auth::jwt::Claims;
use crate::auth::registrar::RegistrationRequest;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token envelope returned by both login and registration.
#[derive(Debug, Serialize)]
pub struct JwtResponse {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub username: String,
    pub email: String,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    pub roles: BTreeSet<String>,
}

impl JwtResponse {
    fn from_claims(token: String, claims: Claims) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            username: claims.sub,
            email: claims.email,
            first_name: claims.first_name,
            last_name: claims.last_name,
            roles: claims.roles,
        }
    }
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::ValidationError(
            "username and password are required".into(),
        ));
    }

    info!("received login request for username: {}", req.username);
    match state.auth.login(&req.username, &req.password).await {
        Ok(token) => {
            let claims = state.auth.verify_token(&token)?;
            Ok(HttpResponse::Ok().json(JwtResponse::from_claims(token, claims)))
        }
        Err(e) => {
            warn!("login failed for username {}: {}", req.username, e);
            Err(e)
        }
    }
}

pub async fn register(
    req: web::Json<RegistrationRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::ValidationError(
            "username and password are required".into(),
        ));
    }
    if !req.email.contains('@') {
        return Err(AppError::ValidationError("invalid email address".into()));
    }

    info!("received registration request for username: {}", req.username);
    let username = req.username.clone();
    match state.auth.sign_up(req).await {
        Ok(token) => {
            info!("registration successful for username: {}", username);
            let claims = state.auth.verify_token(&token)?;
            Ok(HttpResponse::Created().json(JwtResponse::from_claims(token, claims)))
        }
        Err(e) => {
            warn!("registration failed for username {}: {}", username, e);
            Err(e)
        }
    }
}
