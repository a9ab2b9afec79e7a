//! Value Object Module

pub mod avatar_url;
pub mod display_name;
pub mod email;
pub mod user_password;
