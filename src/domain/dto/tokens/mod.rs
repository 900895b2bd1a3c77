//! 토큰 관련 요청 DTO

pub mod request;

pub use request::*;
