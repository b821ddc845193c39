//! 프레임 감지 파이프라인.
//!
//! ROI 계산 → 라인 감지 → (라인 발견 시) 마커 감지.

use linewatch_core::config::DetectionConfig;
use linewatch_core::models::detection::FrameDetection;
use linewatch_core::models::frame::Frame;

use crate::line_detector::find_line;
use crate::marker_detector::find_marker;
use crate::roi::central_roi;

/// 한 프레임에 전체 감지 파이프라인 실행 (순수 함수)
pub fn detect_frame(frame: &Frame, config: DetectionConfig) -> FrameDetection {
    let roi = central_roi(frame.bounds(), config.roi_margin_percent);
    let line = find_line(frame, roi, config);
    let marker = line.row.map(|row| find_marker(frame, roi, row, config));

    FrameDetection { roi, line, marker }
}
