//! 캡처 프레임 모델.
//!
//! 픽셀 공간 바운딩 박스 + RGBA8 픽셀 버퍼. 사이클 단위로 생성/폐기된다.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// 축 정렬 정수 영역: `[min, max)` 반개구간
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Rect {
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// `(0, 0)` 원점의 `width x height` 영역
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    /// 너비 (`max_x - min_x`, 음수면 0)
    pub fn width(&self) -> i32 {
        (self.max_x - self.min_x).max(0)
    }

    /// 높이 (`max_y - min_y`, 음수면 0)
    pub fn height(&self) -> i32 {
        (self.max_y - self.min_y).max(0)
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// `other`가 완전히 포함되는지 (빈 영역은 항상 포함)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.is_empty()
            || (other.min_x >= self.min_x
                && other.min_y >= self.min_y
                && other.max_x <= self.max_x
                && other.max_y <= self.max_y)
    }

    /// 교집합. 겹치지 않으면 `max == min`인 빈 영역
    pub fn intersect(&self, other: &Rect) -> Rect {
        let min_x = self.min_x.max(other.min_x);
        let min_y = self.min_y.max(other.min_y);
        let max_x = self.max_x.min(other.max_x).max(min_x);
        let max_y = self.max_y.min(other.max_y).max(min_y);
        Rect::new(min_x, min_y, max_x, max_y)
    }
}

/// 캡처 프레임 (불변)
///
/// 좌표는 `bounds` 기준 절대 좌표. 픽셀은 행 우선 RGBA8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bounds: Rect,
    data: Vec<u8>,
}

impl Frame {
    /// RGBA8 버퍼로 프레임 생성. 버퍼 길이가 `width * height * 4`가 아니면 에러
    pub fn from_rgba8(
        origin_x: i32,
        origin_y: i32,
        width: u32,
        height: u32,
        data: Vec<u8>,
    ) -> Result<Self, CoreError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(CoreError::Capture(format!(
                "픽셀 버퍼 크기 불일치: expected={expected}, actual={}",
                data.len()
            )));
        }

        Ok(Self {
            bounds: Rect::new(
                origin_x,
                origin_y,
                origin_x + width as i32,
                origin_y + height as i32,
            ),
            data,
        })
    }

    /// 프레임 바운딩 박스
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn width(&self) -> u32 {
        self.bounds.width() as u32
    }

    pub fn height(&self) -> u32 {
        self.bounds.height() as u32
    }

    /// 원시 RGBA8 버퍼
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// `y` 행의 `[x_start, x_end)` 구간 RGBA8 슬라이스
    ///
    /// 구간은 프레임 안으로 잘린다. 프레임 밖 행이면 `None`.
    pub fn row_span(&self, y: i32, x_start: i32, x_end: i32) -> Option<&[u8]> {
        if y < self.bounds.min_y || y >= self.bounds.max_y {
            return None;
        }
        let x_start = x_start.max(self.bounds.min_x);
        let x_end = x_end.min(self.bounds.max_x);
        if x_start >= x_end {
            return Some(&self.data[..0]);
        }

        let stride = self.width() as usize * 4;
        let row = (y - self.bounds.min_y) as usize * stride;
        let start = row + (x_start - self.bounds.min_x) as usize * 4;
        let end = row + (x_end - self.bounds.min_x) as usize * 4;
        Some(&self.data[start..end])
    }

    /// 단일 픽셀 `(r, g, b)`. 프레임 밖이면 `None`
    pub fn rgb(&self, x: i32, y: i32) -> Option<(u8, u8, u8)> {
        let px = self.row_span(y, x, x + 1)?;
        match px {
            [r, g, b, _] => Some((*r, *g, *b)),
            _ => None,
        }
    }
}
