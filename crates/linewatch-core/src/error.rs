//! linewatch 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 외부 라이브러리 에러를 `CoreError` 변형으로 매핑한다.
//! 어떤 에러도 폴링 루프를 종료시키지 않는다 (컨트롤러가 로그 후 다음 틱으로 넘김).

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 스크린 캡처 실패 (디스플레이 없음, 캡처 API 오류)
    #[error("캡처 에러: {0}")]
    Capture(String),

    /// 분류 서비스 응답 오류 (비정상 상태 코드, 응답 형식 오류)
    #[error("분류 서비스 에러: {0}")]
    Classification(String),

    /// 네트워크 에러 (연결 실패, 전송 실패)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 서비스 일시 불가 (503)
    #[error("서비스 일시 불가: {0}")]
    ServiceUnavailable(String),

    /// 스냅샷 인코딩/저장 실패
    #[error("스냅샷 저장 에러: {0}")]
    Snapshot(String),

    /// 알림/비프음 전달 실패
    #[error("알림 에러: {0}")]
    Notify(String),

    /// 실행 타임아웃
    #[error("실행 타임아웃: {timeout_ms}ms 초과")]
    Timeout {
        /// 초과된 타임아웃 시간 (밀리초)
        timeout_ms: u64,
    },

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패: {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),
}
