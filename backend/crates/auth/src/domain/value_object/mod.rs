//! Value Objects

pub mod email;
pub mod one_time_token;
pub mod user_password;
