//! ROI(관심 영역) 계산.
//!
//! 메뉴 바 / 독 등 화면 외곽을 비율만큼 잘라낸다.

use linewatch_core::models::frame::Rect;

/// 상하좌우에서 `floor(width·m)`, `floor(height·m)`만큼 줄인 중앙 영역
///
/// 에러 없음. `m >= 0.5`이면 빈 영역이 될 수 있으며(`max == min`으로 접힘),
/// 이후 스캔은 매치 0건으로 처리된다. 결과는 항상 `bounds` 안에 있다.
pub fn central_roi(bounds: Rect, margin_percent: f64) -> Rect {
    let w = bounds.width();
    let h = bounds.height();
    let m = margin_percent.clamp(0.0, 1.0);

    let margin_x = ((w as f64 * m).floor() as i32).min(w);
    let margin_y = ((h as f64 * m).floor() as i32).min(h);

    let min_x = bounds.min_x + margin_x;
    let min_y = bounds.min_y + margin_y;
    Rect::new(
        min_x,
        min_y,
        (bounds.max_x - margin_x).max(min_x),
        (bounds.max_y - margin_y).max(min_y),
    )
}
