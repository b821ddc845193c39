//! linewatch 도메인 모델.
//!
//! 캡처 프레임, 정수 영역, 사이클별 감지 결과를 정의한다.

pub mod detection;
pub mod frame;
