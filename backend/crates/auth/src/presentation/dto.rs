//! API DTOs (Data Transfer Objects)

use serde::Deserialize;

use crate::application::contract::{
    ForgotPasswordParams, LoginParams, RegisterParams, UpdateAccountParams, UpdatePasswordParams,
};

// ============================================================================
// Login / Register
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// "Remember me"; durable session when true
    #[serde(default)]
    pub remember: bool,
}

impl From<LoginRequest> for LoginParams {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            remember: req.remember,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl From<RegisterRequest> for RegisterParams {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            display_name: req.display_name,
        }
    }
}

// ============================================================================
// Passwords
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl From<ForgotPasswordRequest> for ForgotPasswordParams {
    fn from(req: ForgotPasswordRequest) -> Self {
        Self { email: req.email }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    #[serde(alias = "newPassword")]
    pub password: String,
    #[serde(default)]
    pub confirm_password: Option<String>,
}

impl From<UpdatePasswordRequest> for UpdatePasswordParams {
    fn from(req: UpdatePasswordRequest) -> Self {
        Self {
            password: req.password,
            confirm_password: req.confirm_password,
        }
    }
}

// ============================================================================
// Account
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateAccountRequest {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub password: Option<String>,
}

impl From<UpdateAccountRequest> for UpdateAccountParams {
    fn from(req: UpdateAccountRequest) -> Self {
        Self {
            email: req.email,
            display_name: req.display_name,
            password: req.password,
        }
    }
}
