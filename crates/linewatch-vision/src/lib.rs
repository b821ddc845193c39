//! # linewatch-vision
//!
//! 감지 파이프라인 크레이트.
//! ROI 계산 → 행 단위 라인 색상 스캔 → 라인 근처 밝기 스캔(마커)을 담당하며,
//! 프레임을 공급하는 xcap 캡처 / 파일 소스와 PNG 스냅샷 어댑터를 포함한다.

pub mod capture;
pub mod encoder;
pub mod line_detector;
pub mod marker_detector;
pub mod pipeline;
pub mod pixel;
pub mod roi;
pub mod snapshot;

#[cfg(any(test, feature = "test-util"))]
pub mod synthetic;
