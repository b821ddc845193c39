//! PNG 인코더.
//!
//! 스냅샷 파일과 분류 서비스 요청 본문이 같은 인코더를 거친다.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use linewatch_core::error::CoreError;
use linewatch_core::models::frame::Frame;
use tracing::debug;

/// 프레임을 PNG 바이트로 인코딩
pub fn encode_png(frame: &Frame) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(
            frame.as_raw(),
            frame.width(),
            frame.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| CoreError::Snapshot(format!("PNG 인코딩 실패: {e}")))?;

    debug!(
        "PNG 인코딩 완료: {}x{} → {} bytes",
        frame.width(),
        frame.height(),
        buf.len()
    );
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::frame_from_image;
    use crate::synthetic::SyntheticFrame;
    use linewatch_core::models::frame::Rect;

    #[test]
    fn png_signature_and_pixels_preserved() {
        let frame = SyntheticFrame::new(16, 8, [1, 2, 3])
            .fill(Rect::new(4, 4, 6, 6), [250, 60, 10])
            .build();

        let bytes = encode_png(&frame).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).unwrap();
        let restored = frame_from_image(&decoded).unwrap();
        assert_eq!(restored, frame);
    }
}
