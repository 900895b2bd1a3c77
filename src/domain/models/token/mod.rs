//! 토큰 관련 값 객체

pub mod claims;
pub mod token;

pub use claims::*;
pub use token::*;
