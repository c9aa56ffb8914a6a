//! Application Layer
//!
//! Use cases, the provider contract and its adapter.

pub mod adapter;
pub mod check_session;
pub mod config;
pub mod contract;
pub mod hooks;
pub mod identity;
pub mod login;
pub mod logout;
pub mod password;
pub mod register;
pub mod update_account;

// Re-exports
pub use adapter::AuthAdapter;
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use contract::{
    AuthActionResponse, AuthProvider, CheckResponse, ForgotPasswordParams, Identity,
    LocalAuthProvider, LoginParams, OnErrorResponse, RegisterParams, UpdateAccountParams,
    UpdatePasswordParams,
};
pub use hooks::{AuthHooks, NoHooks};
pub use identity::{GetIdentityUseCase, GetPermissionsUseCase};
pub use login::{LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use password::{ForgotPasswordUseCase, UpdatePasswordUseCase};
pub use register::RegisterUseCase;
pub use update_account::UpdateAccountUseCase;
