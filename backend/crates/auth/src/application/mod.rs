//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod current_user;
pub mod notifications;
pub mod password_reset;
pub mod refresh;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod token;
pub mod verify_email;

// Re-exports
pub use authenticate::{Authenticated, AuthenticateUseCase};
pub use config::AuthConfig;
pub use current_user::CurrentUserUseCase;
pub use password_reset::{RequestPasswordResetUseCase, ResetPasswordUseCase};
pub use refresh::RefreshTokenUseCase;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use token::{Claims, TokenError, TokenKind, TokenPair, TokenService};
pub use verify_email::{ResendVerificationUseCase, VerifyEmailUseCase};
