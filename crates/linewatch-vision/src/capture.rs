//! 프레임 소스.
//!
//! xcap 기반 화면 캡처와 저장된 이미지 파일 소스. 둘 다 `FrameSource` 포트 구현.

use async_trait::async_trait;
use image::DynamicImage;
use linewatch_core::error::CoreError;
use linewatch_core::models::frame::Frame;
use linewatch_core::ports::frame_source::FrameSource;
use std::path::PathBuf;
use tracing::debug;
use xcap::Monitor;

/// 임의 이미지를 RGBA8 프레임으로 변환 (16비트 채널은 0–255로 정규화)
pub fn frame_from_image(image: &DynamicImage) -> Result<Frame, CoreError> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Frame::from_rgba8(0, 0, width, height, rgba.into_raw())
}

/// 스크린 캡처: xcap 기반, 단일 모니터
#[derive(Debug, Clone, Default)]
pub struct ScreenCapture {
    /// `None`이면 주 모니터 (없으면 첫 번째 모니터)
    monitor_index: Option<usize>,
}

impl ScreenCapture {
    /// 새 캡처 인스턴스 생성
    pub fn new(monitor_index: Option<usize>) -> Self {
        Self { monitor_index }
    }

    /// 동기 캡처 (블로킹)
    pub fn capture_blocking(&self) -> Result<Frame, CoreError> {
        let monitors = Monitor::all()
            .map_err(|e| CoreError::Capture(format!("모니터 목록 조회 실패: {e}")))?;

        if monitors.is_empty() {
            return Err(CoreError::Capture("no active displays found".to_string()));
        }

        let monitor = match self.monitor_index {
            Some(index) => monitors
                .into_iter()
                .nth(index)
                .ok_or_else(|| CoreError::Capture(format!("모니터 인덱스 {index} 없음")))?,
            None => {
                let mut monitors = monitors;
                let primary = monitors
                    .iter()
                    .position(|m| m.is_primary().unwrap_or(false))
                    .unwrap_or(0);
                monitors.swap_remove(primary)
            }
        };

        let image = monitor
            .capture_image()
            .map_err(|e| CoreError::Capture(format!("스크린 캡처 실패: {e}")))?;

        debug!("스크린 캡처 완료: {}x{}", image.width(), image.height());

        let (width, height) = image.dimensions();
        Frame::from_rgba8(0, 0, width, height, image.into_raw())
    }
}

#[async_trait]
impl FrameSource for ScreenCapture {
    async fn capture_frame(&self) -> Result<Frame, CoreError> {
        let capture = self.clone();
        tokio::task::spawn_blocking(move || capture.capture_blocking())
            .await
            .map_err(|e| CoreError::Capture(format!("캡처 작업 실패: {e}")))?
    }
}

/// 이미지 파일 프레임 소스: 저장된 스크린샷 재분석용
#[derive(Debug, Clone)]
pub struct ImageFileSource {
    path: PathBuf,
}

impl ImageFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load_blocking(&self) -> Result<Frame, CoreError> {
        let image = image::open(&self.path).map_err(|e| {
            CoreError::Capture(format!("이미지 로드 실패: {}: {e}", self.path.display()))
        })?;
        debug!(
            "이미지 로드 완료: {} ({}x{})",
            self.path.display(),
            image.width(),
            image.height()
        );
        frame_from_image(&image)
    }
}

#[async_trait]
impl FrameSource for ImageFileSource {
    async fn capture_frame(&self) -> Result<Frame, CoreError> {
        let source = self.clone();
        tokio::task::spawn_blocking(move || source.load_blocking())
            .await
            .map_err(|e| CoreError::Capture(format!("이미지 로드 작업 실패: {e}")))?
    }
}
