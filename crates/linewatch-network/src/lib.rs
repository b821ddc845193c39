//! # linewatch-network
//!
//! 외부 가격 분류 서비스(HTTP) 어댑터.
//! 스크린샷 PNG를 POST로 전송하고 `{"stockPrice": <float>}` 응답을 파싱한다.

pub mod price_client;
