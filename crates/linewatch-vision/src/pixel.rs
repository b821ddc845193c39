//! 픽셀 분류기.
//!
//! 0–255 범위 `(r, g, b)`에 대한 순수 판정 함수.

use linewatch_core::config::DetectionConfig;

/// 라인 색상 판정: 강한 R, 제한된 G/B
///
/// 순수 빨강뿐 아니라 주황/노랑까지 허용하는 허용 대역.
#[inline]
pub fn is_line_colored(r: u8, g: u8, b: u8, config: &DetectionConfig) -> bool {
    r >= config.red_min_r && g <= config.red_max_g && b <= config.red_max_b
}

/// 밝은 픽셀 판정: 채널 합 (휘도 가중치 없음)
#[inline]
pub fn is_bright(r: u8, g: u8, b: u8, config: &DetectionConfig) -> bool {
    r as u32 + g as u32 + b as u32 >= config.bubble_bright_threshold
}

/// RGBA8 슬라이스에서 `predicate`를 만족하는 픽셀 수
#[inline]
pub(crate) fn count_matching<F>(rgba: &[u8], predicate: F) -> u32
where
    F: Fn(u8, u8, u8) -> bool,
{
    rgba.chunks_exact(4)
        .filter(|px| predicate(px[0], px[1], px[2]))
        .count() as u32
}
