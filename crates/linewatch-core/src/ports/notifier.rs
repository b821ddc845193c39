//! 알림 포트.
//!
//! 구현: `linewatch-app` crate (notify-rust + 터미널 벨)

use async_trait::async_trait;

use crate::error::CoreError;

/// 사용자 알림 인터페이스: 모두 best-effort
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    /// 데스크톱 알림 표시 (제목 + 본문)
    async fn notify(&self, title: &str, message: &str) -> Result<(), CoreError>;

    /// 비프음 재생
    ///
    /// `frequency_hz`/`duration_ms`는 권장값이다. 지정할 수 없는 어댑터(터미널 벨 등)는
    /// 무시해도 된다.
    async fn beep(&self, frequency_hz: u32, duration_ms: u64) -> Result<(), CoreError>;
}
