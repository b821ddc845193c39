//! 가격 분류 서비스 포트.
//!
//! 구현: `linewatch-network` crate (reqwest)

use async_trait::async_trait;

use crate::error::CoreError;

/// 스크린샷에서 현재 가격을 읽어오는 외부 분류 서비스
///
/// 결과는 로그/리포트용이며 알림 판단에는 사용하지 않는다.
#[async_trait]
pub trait PriceClassifier: Send + Sync {
    /// PNG 바이트를 전송하고 인식된 가격 반환
    async fn classify(&self, png: &[u8]) -> Result<f64, CoreError>;
}
