//! PNG 스냅샷 저장소.
//!
//! `SnapshotWriter` 포트 구현. 매 사이클 같은 경로를 덮어쓴다.

use linewatch_core::error::CoreError;
use linewatch_core::models::frame::Frame;
use linewatch_core::ports::snapshot::SnapshotWriter;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::encoder::encode_png;

/// PNG 파일 스냅샷 저장소
#[derive(Debug, Default)]
pub struct PngSnapshotWriter;

impl PngSnapshotWriter {
    pub fn new() -> Self {
        Self
    }
}

impl SnapshotWriter for PngSnapshotWriter {
    fn write_snapshot(&self, frame: &Frame, path: &Path) -> Result<(), CoreError> {
        let png = encode_png(frame)?;
        self.write_png(&png, path)
    }

    fn write_png(&self, png: &[u8], path: &Path) -> Result<(), CoreError> {
        fs::write(path, png).map_err(|e| {
            CoreError::Snapshot(format!("파일 저장 실패: {}: {e}", path.display()))
        })?;
        debug!("스냅샷 저장: {}", path.display());
        Ok(())
    }
}
