//! 프레임 소스 포트.
//!
//! 구현: `linewatch-vision` crate (xcap)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::frame::Frame;

/// 현재 화면 프레임 공급자
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// 화면 1장 캡처. 활성 디스플레이가 없으면 `CoreError::Capture`
    async fn capture_frame(&self) -> Result<Frame, CoreError>;
}
