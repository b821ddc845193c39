//! 데스크톱 알림 어댑터.
//!
//! `AlertNotifier` 포트 구현. notify-rust 기반 알림 + 터미널 벨.

use async_trait::async_trait;
use linewatch_core::error::CoreError;
use linewatch_core::ports::notifier::AlertNotifier;
use notify_rust::Notification;
use std::io::Write;
use tracing::debug;

/// 앱 이름 (알림 센터 표시용)
const APP_NAME: &str = "linewatch";

/// 데스크톱 알림 어댑터
pub struct DesktopAlertNotifier;

impl DesktopAlertNotifier {
    /// 새 알림 어댑터 생성
    pub fn new() -> Self {
        Self
    }
}

impl Default for DesktopAlertNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AlertNotifier for DesktopAlertNotifier {
    async fn notify(&self, title: &str, message: &str) -> Result<(), CoreError> {
        debug!("알림: {title}");

        Notification::new()
            .summary(title)
            .body(message)
            .appname(APP_NAME)
            .show()
            .map_err(|e| CoreError::Notify(format!("알림 표시 실패: {e}")))?;

        Ok(())
    }

    async fn beep(&self, frequency_hz: u32, duration_ms: u64) -> Result<(), CoreError> {
        // 터미널 벨은 주파수/길이를 지정할 수 없음
        debug!(frequency_hz, duration_ms, "비프음");

        let mut stdout = std::io::stdout();
        stdout
            .write_all(b"\x07")
            .and_then(|_| stdout.flush())
            .map_err(|e| CoreError::Notify(format!("비프음 출력 실패: {e}")))?;

        Ok(())
    }
}
