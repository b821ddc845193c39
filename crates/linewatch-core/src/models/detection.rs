//! 감지 결과 모델.
//!
//! 사이클마다 새로 생성되며 사이클 간 유지되지 않는다.

use serde::{Deserialize, Serialize};

use super::frame::Rect;

/// 라인 감지 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDetectionResult {
    /// 라인 행 (Y). 임계값을 넘긴 행이 없으면 `None`
    pub row: Option<i32>,
    /// 선택된 행의 라인 색상 픽셀 수 (미발견 시 0)
    pub pixel_count: u32,
}

impl LineDetectionResult {
    pub const fn not_found() -> Self {
        Self {
            row: None,
            pixel_count: 0,
        }
    }

    pub fn found(&self) -> bool {
        self.row.is_some()
    }
}

/// 마커(버블) 감지 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerDetectionResult {
    pub found: bool,
    /// 탐색 창 안의 밝은 픽셀 수
    pub bright_pixels: u32,
}

/// 한 프레임에 대한 전체 파이프라인 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDetection {
    /// 사용된 ROI
    pub roi: Rect,
    pub line: LineDetectionResult,
    /// 라인이 발견된 경우에만 `Some`
    pub marker: Option<MarkerDetectionResult>,
}

impl FrameDetection {
    /// 라인 + 마커가 함께 확인되었는지
    pub fn should_alert(&self) -> bool {
        self.line.found() && self.marker.is_some_and(|m| m.found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_alert_requires_both() {
        let roi = Rect::new(0, 0, 10, 10);
        let line = LineDetectionResult {
            row: Some(5),
            pixel_count: 9,
        };

        let none = FrameDetection {
            roi,
            line: LineDetectionResult::not_found(),
            marker: None,
        };
        assert!(!none.should_alert());

        let line_only = FrameDetection {
            roi,
            line,
            marker: Some(MarkerDetectionResult {
                found: false,
                bright_pixels: 3,
            }),
        };
        assert!(!line_only.should_alert());

        let both = FrameDetection {
            roi,
            line,
            marker: Some(MarkerDetectionResult {
                found: true,
                bright_pixels: 30,
            }),
        };
        assert!(both.should_alert());
    }
}
