//! 합성 프레임 빌더.
//!
//! 색 띠/밝은 블록을 원하는 좌표에 그려 감지기를 결정적으로 검증할 때 사용한다.

use linewatch_core::models::frame::{Frame, Rect};

/// 합성 프레임 빌더 (단색 배경 + 사각형 채우기)
#[derive(Debug, Clone)]
pub struct SyntheticFrame {
    origin_x: i32,
    origin_y: i32,
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl SyntheticFrame {
    /// `width x height` 단색 프레임
    pub fn new(width: u32, height: u32, background: [u8; 3]) -> Self {
        let [r, g, b] = background;
        let data = [r, g, b, 255].repeat(width as usize * height as usize);
        Self {
            origin_x: 0,
            origin_y: 0,
            width,
            height,
            data,
        }
    }

    /// 바운딩 박스 원점 지정
    pub fn with_origin(mut self, x: i32, y: i32) -> Self {
        self.origin_x = x;
        self.origin_y = y;
        self
    }

    /// 절대 좌표 `area`를 채움 (프레임 밖은 무시)
    pub fn fill(mut self, area: Rect, color: [u8; 3]) -> Self {
        let bounds = self.bounds();
        let clipped = bounds.intersect(&area);
        for y in clipped.min_y..clipped.max_y {
            for x in clipped.min_x..clipped.max_x {
                self.put(x, y, color);
            }
        }
        self
    }

    /// `y` 행의 `[x_start, x_start + count)` 픽셀을 채움
    pub fn fill_row(self, y: i32, x_start: i32, count: u32, color: [u8; 3]) -> Self {
        self.fill(
            Rect::new(x_start, y, x_start + count as i32, y + 1),
            color,
        )
    }

    /// 좌표 목록의 픽셀만 채움
    pub fn points(mut self, points: &[(i32, i32)], color: [u8; 3]) -> Self {
        let bounds = self.bounds();
        for &(x, y) in points {
            if x >= bounds.min_x && x < bounds.max_x && y >= bounds.min_y && y < bounds.max_y {
                self.put(x, y, color);
            }
        }
        self
    }

    pub fn build(self) -> Frame {
        let expected = self.width as usize * self.height as usize * 4;
        debug_assert_eq!(self.data.len(), expected);
        match Frame::from_rgba8(
            self.origin_x,
            self.origin_y,
            self.width,
            self.height,
            self.data,
        ) {
            Ok(frame) => frame,
            Err(e) => unreachable!("합성 프레임 버퍼 크기는 항상 일치: {e}"),
        }
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.origin_x,
            self.origin_y,
            self.origin_x + self.width as i32,
            self.origin_y + self.height as i32,
        )
    }

    fn put(&mut self, x: i32, y: i32, [r, g, b]: [u8; 3]) {
        let col = (x - self.origin_x) as usize;
        let row = (y - self.origin_y) as usize;
        let offset = (row * self.width as usize + col) * 4;
        self.data[offset..offset + 4].copy_from_slice(&[r, g, b, 255]);
    }
}
