//! 마커(버블) 감지기.
//!
//! 라인 행 근처, ROI 오른쪽 20% 구간에서 밝은 픽셀 수를 센다.
//! 마커는 차트 오른쪽 끝, 라인과 가까운 높이에 나타난다고 가정하는 고정 형상 휴리스틱.

use linewatch_core::config::DetectionConfig;
use linewatch_core::models::detection::MarkerDetectionResult;
use linewatch_core::models::frame::{Frame, Rect};
use tracing::{debug, info};

use crate::pixel::{count_matching, is_bright};

/// 탐색 창 시작 X 비율 (ROI 너비 기준, 오른쪽 20%)
const MARKER_WINDOW_START: f64 = 0.8;

/// `line_y` 기준 마커 탐색 창
///
/// X: `[roi.min_x + floor(0.8·width), roi.max_x)`,
/// Y: `[line_y − d, line_y + d)`를 ROI 안으로 클램프.
pub fn marker_window(roi: Rect, line_y: i32, config: &DetectionConfig) -> Rect {
    let distance = config.max_distance_bubble_to_line.max(0);
    let x_start = roi.min_x + (roi.width() as f64 * MARKER_WINDOW_START).floor() as i32;

    let y_min = line_y.saturating_sub(distance).max(roi.min_y);
    let y_max = line_y.saturating_add(distance).min(roi.max_y);

    Rect::new(
        x_start.min(roi.max_x),
        y_min.min(roi.max_y),
        roi.max_x,
        y_max.max(y_min).min(roi.max_y),
    )
    .intersect(&roi)
}

/// 라인 근처 마커 확인
///
/// 창 안의 밝은 픽셀 수가 `bubble_min_bright_pixels` 이상이면 확인.
/// 창은 ROI(그리고 프레임) 밖을 읽지 않는다.
pub fn find_marker(
    frame: &Frame,
    roi: Rect,
    line_y: i32,
    config: DetectionConfig,
) -> MarkerDetectionResult {
    let window = marker_window(roi, line_y, &config).intersect(&frame.bounds());

    let mut bright_pixels = 0u32;
    for y in window.min_y..window.max_y {
        if let Some(span) = frame.row_span(y, window.min_x, window.max_x) {
            bright_pixels += count_matching(span, |r, g, b| is_bright(r, g, b, &config));
        }
    }

    let found = bright_pixels >= config.bubble_min_bright_pixels;
    if found {
        info!(line_y, bright_pixels, "라인 근처 버블 감지");
    } else {
        debug!(line_y, bright_pixels, "버블 미감지");
    }

    MarkerDetectionResult {
        found,
        bright_pixels,
    }
}
