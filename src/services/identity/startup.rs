//! 시작 시 신원 저장소 시딩
//!
//! 기본 역할(`Administrator`, `PowerUser`, `User`)을 생성하고,
//! 설정된 경우 기본 관리자 계정을 생성합니다. 여러 번 실행해도 결과는 같습니다.

use crate::config::DefaultAdmin;
use crate::core::errors::AppResult;
use crate::domain::entities::{Account, ADMINISTRATOR, DEFAULT_ROLES};
use crate::services::identity::CredentialStore;
use crate::utils::display_terminal::{
    print_boxed_title, print_seed_summary, print_step_complete, print_step_start, print_sub_task,
};
use crate::utils::string_utils::validate_required_string;

/// 시딩 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub roles_created: usize,
    pub admin_created: bool,
}

pub async fn seed_identity(store: &CredentialStore, default_admin: Option<&DefaultAdmin>) -> AppResult<SeedReport> {
    print_boxed_title("🌱 IDENTITY STORE SEEDING");

    print_step_start(1, "Ensuring default roles");
    let mut roles_created = 0;
    for role in DEFAULT_ROLES {
        let created = store.ensure_role(role).await?;
        if created {
            roles_created += 1;
        }
        print_sub_task(role, if created { "created" } else { "exists" });
    }
    print_step_complete(1, "Default roles", DEFAULT_ROLES.len());

    print_step_start(2, "Ensuring default administrator");
    let admin_created = match default_admin {
        Some(admin) => ensure_admin(store, admin).await?,
        None => {
            print_sub_task("administrator", "not configured");
            false
        }
    };
    print_step_complete(2, "Default administrator", usize::from(admin_created));

    print_seed_summary(roles_created, admin_created);

    Ok(SeedReport {
        roles_created,
        admin_created,
    })
}

async fn ensure_admin(store: &CredentialStore, admin: &DefaultAdmin) -> AppResult<bool> {
    let user_name = validate_required_string(&admin.user_name, "Default administrator user name")?;

    if store.find_by_user_name(&user_name).await?.is_some() {
        print_sub_task(&user_name, "exists");
        return Ok(false);
    }

    let account = Account::new(
        "Administrator".to_string(),
        None,
        admin.email.trim().to_string(),
        user_name.clone(),
    );
    let mut account = store.create(account, &admin.password).await?;
    store.assign_role(&mut account, ADMINISTRATOR).await?;

    print_sub_task(&user_name, "created");
    log::info!("👤 기본 관리자 계정 생성: {}", user_name);
    Ok(true)
}
