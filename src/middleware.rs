pub mod tier_auth;
pub mod tier_context;
