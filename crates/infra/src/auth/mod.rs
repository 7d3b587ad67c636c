//! Access token signing

pub mod jwt;

pub use jwt::JwtTokenService;
