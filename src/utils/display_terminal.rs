//! 터미널 출력 포맷팅 유틸리티
//!
//! 서버 시작 시 역할/기본 관리자 시딩 과정을 터미널에 표시합니다.

/// 박스 형태의 제목 출력
pub fn print_boxed_title(title: &str) {
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^50}║", title);
    println!("╚{}╝", border);
}

pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 시딩 결과 요약 출력
pub fn print_seed_summary(roles_created: usize, admin_created: bool) {
    println!();
    print_boxed_title("🎉 IDENTITY STORE READY");
    println!("   🛡️ Roles created: {}", roles_created);
    println!(
        "   👤 Default administrator: {}",
        if admin_created { "created" } else { "unchanged" }
    );
    println!();
}
