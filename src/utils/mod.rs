//! 공통 유틸리티 함수 모듈
//!
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리 유틸리티
//! - [`display_terminal`] - 시작 시 초기화 과정 터미널 출력
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::validate_required_string;
//! use crate::utils::display_terminal::print_boxed_title;
//!
//! let first_name = validate_required_string("  Jane  ", "First name")?;
//! print_boxed_title("IDENTITY STORE SEEDED");
//! ```

pub mod string_utils;
pub mod display_terminal;
