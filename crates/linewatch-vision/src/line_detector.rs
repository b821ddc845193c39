//! 라인 감지기.
//!
//! ROI를 행 단위로 스캔하여 라인 색상 픽셀이 가장 많은 행을 고른다.
//! 최초 매치가 아니라 전역 최대값 탐색이며, 동률이면 먼저 스캔된(위쪽) 행이 남는다.

use linewatch_core::config::DetectionConfig;
use linewatch_core::models::detection::LineDetectionResult;
use linewatch_core::models::frame::{Frame, Rect};
use tracing::debug;

use crate::pixel::{count_matching, is_line_colored};

/// ROI 안에서 라인 행 탐색
///
/// 행 카운트가 현재 최대값보다 **크고** `min_red_pixels_per_row` 이상일 때만
/// 후보를 교체한다. 보조 저장소 없이 O(ROI 면적) 1회 스캔.
pub fn find_line(frame: &Frame, roi: Rect, config: DetectionConfig) -> LineDetectionResult {
    let area = roi.intersect(&frame.bounds());

    let mut best_count = 0u32;
    let mut best_row: Option<i32> = None;

    for y in area.min_y..area.max_y {
        let Some(span) = frame.row_span(y, area.min_x, area.max_x) else {
            continue;
        };
        let count = count_matching(span, |r, g, b| is_line_colored(r, g, b, &config));

        if count > best_count && count >= config.min_red_pixels_per_row {
            best_count = count;
            best_row = Some(y);
        }
    }

    match best_row {
        Some(row) => {
            debug!(row, pixels = best_count, "라인 후보 발견");
            LineDetectionResult {
                row: Some(row),
                pixel_count: best_count,
            }
        }
        None => LineDetectionResult::not_found(),
    }
}
