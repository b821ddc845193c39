//! 스냅샷 저장 포트.
//!
//! 구현: `linewatch-vision` crate (image PNG 인코더)

use std::path::Path;

use crate::error::CoreError;
use crate::models::frame::Frame;

/// 프레임 스냅샷 저장: 부수 효과 전용, 실패는 로그만 남긴다
pub trait SnapshotWriter: Send + Sync {
    /// 프레임을 인코딩해 `path`에 저장 (기존 파일 덮어씀)
    fn write_snapshot(&self, frame: &Frame, path: &Path) -> Result<(), CoreError>;

    /// 이미 인코딩된 PNG 바이트를 `path`에 저장
    ///
    /// 컨트롤러는 사이클당 1회 인코딩한 바이트를 분류 서비스와 공유하므로 이 경로를 쓴다.
    fn write_png(&self, png: &[u8], path: &Path) -> Result<(), CoreError>;
}
