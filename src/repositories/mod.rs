//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 계정/역할 영속화를 [`accounts::AccountRepository`] trait 뒤에 두고,
//! MongoDB 구현과 프로세스 메모리 구현을 제공합니다.
//! 어떤 구현을 사용할지는 `STORE_BACKEND` 설정으로 결정됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::accounts::{AccountRepository, InMemoryAccountRepository};
//!
//! let repository: Arc<dyn AccountRepository> = Arc::new(InMemoryAccountRepository::new());
//! let account = repository.find_by_normalized_user_name("JANE").await?;
//! ```

pub mod accounts;
