//! 애플리케이션 설정 구조체.
//!
//! 감지 임계값, 캡처/스냅샷, 분류 서비스, 알림 설정을 정의한다.
//! 모든 값은 프로세스 시작 시 1회 로드되며 런타임에 변경되지 않는다.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::CoreError;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 감지 임계값
    #[serde(default)]
    pub detection: DetectionConfig,
    /// 캡처/스냅샷 설정
    #[serde(default)]
    pub capture: CaptureConfig,
    /// 분류 서비스 설정
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// 알림 설정
    #[serde(default)]
    pub alert: AlertConfig,
}

// ============================================================
// 감지 설정
// ============================================================

/// 감지 임계값: 값 객체 (Copy), 모든 감지 호출에 값으로 전달
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// 폴링 주기 (밀리초)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// 라인 색상 판정: R 하한
    #[serde(default = "default_red_min_r")]
    pub red_min_r: u8,
    /// 라인 색상 판정: G 상한 (주황/노랑 허용)
    #[serde(default = "default_red_max_g")]
    pub red_max_g: u8,
    /// 라인 색상 판정: B 상한
    #[serde(default = "default_red_max_b")]
    pub red_max_b: u8,
    /// 라인으로 인정할 행당 최소 픽셀 수 (화면 크기에 맞춰 조정)
    #[serde(default = "default_min_red_pixels_per_row")]
    pub min_red_pixels_per_row: u32,
    /// 라인 위/아래 마커 탐색 거리 (픽셀)
    #[serde(default = "default_max_distance_bubble_to_line")]
    pub max_distance_bubble_to_line: i32,
    /// 밝은 픽셀 판정: r+g+b 하한
    #[serde(default = "default_bubble_bright_threshold")]
    pub bubble_bright_threshold: u32,
    /// 마커로 인정할 최소 밝은 픽셀 수
    #[serde(default = "default_bubble_min_bright_pixels")]
    pub bubble_min_bright_pixels: u32,
    /// 화면 외곽 제외 비율 (0.0 ~ 1.0 미만)
    #[serde(default = "default_roi_margin_percent")]
    pub roi_margin_percent: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            red_min_r: default_red_min_r(),
            red_max_g: default_red_max_g(),
            red_max_b: default_red_max_b(),
            min_red_pixels_per_row: default_min_red_pixels_per_row(),
            max_distance_bubble_to_line: default_max_distance_bubble_to_line(),
            bubble_bright_threshold: default_bubble_bright_threshold(),
            bubble_min_bright_pixels: default_bubble_min_bright_pixels(),
            roi_margin_percent: default_roi_margin_percent(),
        }
    }
}

impl DetectionConfig {
    /// 폴링 주기를 Duration으로 반환
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// 값 범위 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.poll_interval_ms == 0 {
            return Err(CoreError::Validation {
                field: "poll_interval_ms".to_string(),
                message: "0보다 커야 함".to_string(),
            });
        }
        if !(0.0..1.0).contains(&self.roi_margin_percent) {
            return Err(CoreError::Validation {
                field: "roi_margin_percent".to_string(),
                message: format!("[0, 1) 범위 밖: {}", self.roi_margin_percent),
            });
        }
        if self.max_distance_bubble_to_line < 0 {
            return Err(CoreError::Validation {
                field: "max_distance_bubble_to_line".to_string(),
                message: "음수 불가".to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================
// 캡처 설정
// ============================================================

/// 캡처/스냅샷 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// 캡처할 모니터 인덱스 (None이면 주 모니터)
    #[serde(default)]
    pub monitor_index: Option<usize>,
    /// 매 사이클 스냅샷 저장 여부
    #[serde(default = "default_true")]
    pub snapshot_enabled: bool,
    /// 스냅샷 경로 (매 사이클 덮어씀)
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
    /// 캡처 타임아웃 (밀리초, None이면 무제한 대기)
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            monitor_index: None,
            snapshot_enabled: true,
            snapshot_path: default_snapshot_path(),
            timeout_ms: None,
        }
    }
}

impl CaptureConfig {
    /// 캡처 타임아웃을 Duration으로 반환
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

// ============================================================
// 분류 서비스 설정
// ============================================================

/// 분류 서비스 (가격 인식 API) 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// 분류 서비스 호출 여부
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// POST 엔드포인트 URL
    #[serde(default = "default_classifier_endpoint")]
    pub endpoint: String,
    /// 요청 타임아웃 (밀리초, None이면 무제한 대기)
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_classifier_endpoint(),
            timeout_ms: None,
        }
    }
}

// ============================================================
// 알림 설정
// ============================================================

/// 알림 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertConfig {
    /// 알림 제목
    #[serde(default = "default_alert_title")]
    pub title: String,
    /// 비프음 주파수 (Hz)
    #[serde(default = "default_beep_frequency_hz")]
    pub beep_frequency_hz: u32,
    /// 비프음 길이 (밀리초)
    #[serde(default = "default_beep_duration_ms")]
    pub beep_duration_ms: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            title: default_alert_title(),
            beep_frequency_hz: default_beep_frequency_hz(),
            beep_duration_ms: default_beep_duration_ms(),
        }
    }
}

// ============================================================
// AppConfig impl
// ============================================================

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self {
            detection: DetectionConfig::default(),
            capture: CaptureConfig::default(),
            classifier: ClassifierConfig::default(),
            alert: AlertConfig::default(),
        }
    }

    /// 전체 설정 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        self.detection.validate()?;
        if self.classifier.enabled && self.classifier.endpoint.trim().is_empty() {
            return Err(CoreError::Validation {
                field: "classifier.endpoint".to_string(),
                message: "분류 서비스 활성화 시 필수".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_true() -> bool {
    true
}

fn default_poll_interval_ms() -> u64 {
    10_000
}
fn default_red_min_r() -> u8 {
    180
}
fn default_red_max_g() -> u8 {
    120
}
fn default_red_max_b() -> u8 {
    120
}
fn default_min_red_pixels_per_row() -> u32 {
    500
}
fn default_max_distance_bubble_to_line() -> i32 {
    10
}
fn default_bubble_bright_threshold() -> u32 {
    600
}
fn default_bubble_min_bright_pixels() -> u32 {
    150
}
fn default_roi_margin_percent() -> f64 {
    0.10
}
fn default_snapshot_path() -> PathBuf {
    PathBuf::from("current_screenshot.png")
}
fn default_classifier_endpoint() -> String {
    "http://localhost:8000/api/detect-stock-price".to_string()
}
fn default_alert_title() -> String {
    "Bookmap alert".to_string()
}
fn default_beep_frequency_hz() -> u32 {
    880
}
fn default_beep_duration_ms() -> u64 {
    500
}
