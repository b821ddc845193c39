//! 폴링 컨트롤러.
//!
//! Idle(대기) → Cycle(감지 1회) → Idle 상태 기계.
//! 사이클 실패는 로그만 남기고 다음 틱으로 넘긴다. 종료 신호 외에는 루프가 멈추지 않는다.

use chrono::{DateTime, Utc};
use linewatch_core::config::AppConfig;
use linewatch_core::error::CoreError;
use linewatch_core::models::detection::FrameDetection;
use linewatch_core::models::frame::Frame;
use linewatch_core::ports::classifier::PriceClassifier;
use linewatch_core::ports::frame_source::FrameSource;
use linewatch_core::ports::snapshot::SnapshotWriter;
use linewatch_vision::encoder::encode_png;
use linewatch_vision::pipeline::detect_frame;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::alert::AlertDispatcher;

/// 컨트롤러 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PollState {
    /// 다음 틱 대기
    Idle,
    /// 감지 1회 실행
    Cycle,
}

/// 사이클 요약
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    /// 캡처 시각
    pub captured_at: DateTime<Utc>,
    pub detection: FrameDetection,
    /// 분류 서비스 결과 (비활성/실패 시 None). 알림 판단에는 쓰지 않음
    pub stock_price: Option<f64>,
    pub snapshot_written: bool,
    pub alert_dispatched: bool,
}

/// 폴링 컨트롤러
pub struct PollController {
    config: AppConfig,
    frame_source: Arc<dyn FrameSource>,
    snapshot_writer: Option<Arc<dyn SnapshotWriter>>,
    classifier: Option<Arc<dyn PriceClassifier>>,
    dispatcher: AlertDispatcher,
}

impl PollController {
    /// 새 컨트롤러 생성
    pub fn new(
        config: AppConfig,
        frame_source: Arc<dyn FrameSource>,
        dispatcher: AlertDispatcher,
    ) -> Self {
        Self {
            config,
            frame_source,
            snapshot_writer: None,
            classifier: None,
            dispatcher,
        }
    }

    /// 스냅샷 저장소 설정
    pub fn with_snapshot_writer(mut self, writer: Arc<dyn SnapshotWriter>) -> Self {
        self.snapshot_writer = Some(writer);
        self
    }

    /// 가격 분류 서비스 설정
    pub fn with_classifier(mut self, classifier: Arc<dyn PriceClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// 종료 신호까지 폴링 루프 실행
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) {
        let poll = self.config.detection.poll_interval();
        info!("폴링 시작: 주기={}ms", poll.as_millis());

        let mut state = PollState::Cycle;
        loop {
            match state {
                PollState::Cycle => {
                    if let Err(e) = self.run_cycle().await {
                        warn!("사이클 실패: {e}");
                    }
                    state = PollState::Idle;
                }
                PollState::Idle => {
                    tokio::select! {
                        _ = tokio::time::sleep(poll) => {
                            state = PollState::Cycle;
                        }
                        _ = shutdown_rx.changed() => {
                            info!("폴링 루프 종료");
                            break;
                        }
                    }
                }
            }
        }
    }

    /// 사이클 1회 실행. 알림 태스크는 분리(detach)된다
    pub async fn run_cycle(&self) -> Result<CycleReport, CoreError> {
        let (report, _alert) = self.cycle().await?;
        Ok(report)
    }

    /// 사이클 1회 실행 후 알림 전달 완료까지 대기 (`--once` 모드)
    pub async fn run_once(&self) -> Result<CycleReport, CoreError> {
        let (report, alert) = self.cycle().await?;
        if let Some(handle) = alert {
            if let Err(e) = handle.await {
                warn!("알림 태스크 실패: {e}");
            }
        }
        Ok(report)
    }

    async fn cycle(&self) -> Result<(CycleReport, Option<JoinHandle<()>>), CoreError> {
        let frame = self.capture().await?;
        let captured_at = Utc::now();

        let detection = detect_frame(&frame, self.config.detection);
        debug!(
            roi = ?detection.roi,
            line_found = detection.line.found(),
            "감지 완료"
        );

        // 스냅샷과 분류 서비스는 같은 PNG 바이트를 공유
        let png = self.encode_for_side_effects(&frame);
        let snapshot_written = match &png {
            Some(png) => self.write_snapshot(png),
            None => false,
        };
        let stock_price = match &png {
            Some(png) => self.classify(png).await,
            None => None,
        };

        let alert = match detection.line.row {
            Some(row) if detection.should_alert() => Some(self.dispatcher.dispatch(row)),
            _ => None,
        };

        let report = CycleReport {
            captured_at,
            detection,
            stock_price,
            snapshot_written,
            alert_dispatched: alert.is_some(),
        };
        Ok((report, alert))
    }

    async fn capture(&self) -> Result<Frame, CoreError> {
        match self.config.capture.timeout() {
            Some(limit) => tokio::time::timeout(limit, self.frame_source.capture_frame())
                .await
                .map_err(|_| CoreError::Timeout {
                    timeout_ms: limit.as_millis() as u64,
                })?,
            None => self.frame_source.capture_frame().await,
        }
    }

    /// 스냅샷/분류 서비스 중 하나라도 설정된 경우에만 1회 인코딩
    fn encode_for_side_effects(&self, frame: &Frame) -> Option<Vec<u8>> {
        if self.snapshot_writer.is_none() && self.classifier.is_none() {
            return None;
        }
        match encode_png(frame) {
            Ok(png) => Some(png),
            Err(e) => {
                warn!("PNG 인코딩 실패: {e}");
                None
            }
        }
    }

    /// 스냅샷 저장 (실패는 로그만)
    fn write_snapshot(&self, png: &[u8]) -> bool {
        let Some(writer) = &self.snapshot_writer else {
            return false;
        };
        let path = &self.config.capture.snapshot_path;
        match writer.write_png(png, path) {
            Ok(()) => true,
            Err(e) => {
                warn!("스냅샷 저장 실패: {e}");
                false
            }
        }
    }

    /// 가격 분류 (실패는 로그만, 감지를 막지 않음)
    async fn classify(&self, png: &[u8]) -> Option<f64> {
        let classifier = self.classifier.as_ref()?;

        match classifier.classify(png).await {
            Ok(price) => {
                info!("Stock price detected: ${price:.2}");
                Some(price)
            }
            Err(e) => {
                warn!("가격 분류 실패: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use linewatch_core::config::DetectionConfig;
    use linewatch_core::models::frame::Rect;
    use linewatch_core::ports::notifier::AlertNotifier;
    use linewatch_vision::synthetic::SyntheticFrame;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::mpsc;

    // ── 테스트 더블 ──

    struct StaticSource {
        frame: Frame,
        calls: AtomicUsize,
    }

    impl StaticSource {
        fn new(frame: Frame) -> Arc<Self> {
            Arc::new(Self {
                frame,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl FrameSource for StaticSource {
        async fn capture_frame(&self) -> Result<Frame, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.frame.clone())
        }
    }

    /// 첫 N회는 실패, 이후 성공
    struct FlakySource {
        failures_left: Mutex<usize>,
        frame: Frame,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FrameSource for FlakySource {
        async fn capture_frame(&self) -> Result<Frame, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut left = self.failures_left.lock().unwrap();
            if *left > 0 {
                *left -= 1;
                return Err(CoreError::Capture("no active displays found".to_string()));
            }
            Ok(self.frame.clone())
        }
    }

    struct HangingSource;

    #[async_trait]
    impl FrameSource for HangingSource {
        async fn capture_frame(&self) -> Result<Frame, CoreError> {
            std::future::pending().await
        }
    }

    struct ChannelNotifier {
        tx: mpsc::UnboundedSender<String>,
    }

    #[async_trait]
    impl AlertNotifier for ChannelNotifier {
        async fn notify(&self, _title: &str, message: &str) -> Result<(), CoreError> {
            let _ = self.tx.send(message.to_string());
            Ok(())
        }

        async fn beep(&self, _frequency_hz: u32, _duration_ms: u64) -> Result<(), CoreError> {
            Ok(())
        }
    }

    struct FixedClassifier(Result<f64, ()>);

    #[async_trait]
    impl PriceClassifier for FixedClassifier {
        async fn classify(&self, png: &[u8]) -> Result<f64, CoreError> {
            assert_eq!(&png[..4], b"\x89PNG");
            self.0
                .map_err(|_| CoreError::Network("connection refused".to_string()))
        }
    }

    struct FailingWriter;

    impl SnapshotWriter for FailingWriter {
        fn write_snapshot(&self, _frame: &Frame, path: &Path) -> Result<(), CoreError> {
            Err(CoreError::Snapshot(format!("read-only: {}", path.display())))
        }

        fn write_png(&self, _png: &[u8], path: &Path) -> Result<(), CoreError> {
            Err(CoreError::Snapshot(format!("read-only: {}", path.display())))
        }
    }

    /// 컨트롤러가 넘긴 PNG 바이트 기록. 프레임 재인코딩 경로는 쓰이면 안 됨
    #[derive(Default)]
    struct RecordingWriter {
        written: Mutex<Vec<Vec<u8>>>,
    }

    impl SnapshotWriter for RecordingWriter {
        fn write_snapshot(&self, _frame: &Frame, _path: &Path) -> Result<(), CoreError> {
            panic!("controller must pass pre-encoded bytes");
        }

        fn write_png(&self, png: &[u8], _path: &Path) -> Result<(), CoreError> {
            self.written.lock().unwrap().push(png.to_vec());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingClassifier {
        received: Mutex<Vec<Vec<u8>>>,
    }

    #[async_trait]
    impl PriceClassifier for RecordingClassifier {
        async fn classify(&self, png: &[u8]) -> Result<f64, CoreError> {
            self.received.lock().unwrap().push(png.to_vec());
            Ok(1.0)
        }
    }

    // ── 헬퍼 ──

    fn test_config() -> AppConfig {
        let mut config = AppConfig::default_config();
        config.detection = DetectionConfig {
            poll_interval_ms: 10,
            min_red_pixels_per_row: 60,
            bubble_min_bright_pixels: 20,
            max_distance_bubble_to_line: 6,
            roi_margin_percent: 0.1,
            ..DetectionConfig::default()
        };
        config
    }

    /// 200x100, 행 50에 라인 색상 띠
    fn band_frame() -> SyntheticFrame {
        SyntheticFrame::new(200, 100, [0, 0, 0]).fill_row(50, 20, 160, [255, 40, 0])
    }

    /// 띠 + 오른쪽 창 안의 밝은 블록
    fn band_with_marker_frame() -> Frame {
        band_frame()
            .fill(Rect::new(160, 47, 170, 52), [255, 255, 255])
            .build()
    }

    fn controller(
        source: Arc<dyn FrameSource>,
    ) -> (PollController, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = AlertDispatcher::new(
            test_config().alert,
            Arc::new(ChannelNotifier { tx }),
        );
        (PollController::new(test_config(), source, dispatcher), rx)
    }

    // ── 테스트 ──

    #[tokio::test]
    async fn band_without_marker_dispatches_nothing() {
        let (controller, mut rx) = controller(StaticSource::new(band_frame().build()));

        let report = controller.run_once().await.unwrap();
        assert_eq!(report.detection.line.row, Some(50));
        assert!(!report.alert_dispatched);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn band_with_marker_dispatches_exactly_once() {
        let (controller, mut rx) = controller(StaticSource::new(band_with_marker_frame()));

        let report = controller.run_once().await.unwrap();
        assert!(report.alert_dispatched);
        assert_eq!(
            rx.try_recv().unwrap(),
            "Price bubble reached red line (Y=50)"
        );
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn detached_alert_is_delivered() {
        let (controller, mut rx) = controller(StaticSource::new(band_with_marker_frame()));

        let report = controller.run_cycle().await.unwrap();
        assert!(report.alert_dispatched);

        let message = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(message.contains("Y=50"));
    }

    #[tokio::test]
    async fn repeated_frames_give_identical_results() {
        let (controller, mut rx) = controller(StaticSource::new(band_with_marker_frame()));

        let first = controller.run_once().await.unwrap();
        for _ in 0..3 {
            let next = controller.run_once().await.unwrap();
            assert_eq!(next.detection, first.detection);
            assert!(next.alert_dispatched);
        }

        let mut alerts = 0;
        while rx.try_recv().is_ok() {
            alerts += 1;
        }
        assert_eq!(alerts, 4);
    }

    #[tokio::test]
    async fn side_collaborator_failures_do_not_block_detection() {
        let (controller, mut rx) = controller(StaticSource::new(band_with_marker_frame()));
        let controller = controller
            .with_snapshot_writer(Arc::new(FailingWriter))
            .with_classifier(Arc::new(FixedClassifier(Err(()))));

        let report = controller.run_once().await.unwrap();
        assert!(!report.snapshot_written);
        assert!(report.stock_price.is_none());
        assert!(report.alert_dispatched);
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn price_is_reported_but_does_not_gate_alert() {
        let (controller, mut rx) = controller(StaticSource::new(band_frame().build()));
        let controller = controller.with_classifier(Arc::new(FixedClassifier(Ok(4321.5))));

        let report = controller.run_once().await.unwrap();
        assert_eq!(report.stock_price, Some(4321.5));
        assert!(!report.alert_dispatched);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn snapshot_is_written_to_configured_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut config = test_config();
        config.capture.snapshot_path = temp.path().join("current_screenshot.png");

        let (tx, _rx) = mpsc::unbounded_channel();
        let dispatcher = AlertDispatcher::new(config.alert.clone(), Arc::new(ChannelNotifier { tx }));
        let controller = PollController::new(
            config.clone(),
            StaticSource::new(band_frame().build()),
            dispatcher,
        )
        .with_snapshot_writer(Arc::new(linewatch_vision::snapshot::PngSnapshotWriter::new()));

        let report = controller.run_once().await.unwrap();
        assert!(report.snapshot_written);
        assert!(config.capture.snapshot_path.exists());
    }

    #[tokio::test]
    async fn snapshot_and_classifier_share_one_encoding() {
        let writer = Arc::new(RecordingWriter::default());
        let classifier = Arc::new(RecordingClassifier::default());
        let frame = band_with_marker_frame();
        let expected = encode_png(&frame).unwrap();

        let (controller, _rx) = controller(StaticSource::new(frame));
        let controller = controller
            .with_snapshot_writer(writer.clone())
            .with_classifier(classifier.clone());

        let report = controller.run_once().await.unwrap();
        assert!(report.snapshot_written);
        assert_eq!(report.stock_price, Some(1.0));

        let written = writer.written.lock().unwrap().clone();
        let received = classifier.received.lock().unwrap().clone();
        assert_eq!(written, vec![expected.clone()]);
        assert_eq!(received, vec![expected]);
    }

    #[tokio::test]
    async fn cycle_matches_standalone_pipeline() {
        let frame = band_with_marker_frame();
        let expected = detect_frame(&frame, test_config().detection);
        let (controller, _rx) = controller(StaticSource::new(frame));

        let report = controller.run_once().await.unwrap();
        assert_eq!(report.detection, expected);
    }

    #[tokio::test]
    async fn capture_error_aborts_cycle() {
        let source = Arc::new(FlakySource {
            failures_left: Mutex::new(1),
            frame: band_with_marker_frame(),
            calls: AtomicUsize::new(0),
        });
        let (controller, mut rx) = controller(source);

        let err = controller.run_once().await.unwrap_err();
        assert!(matches!(err, CoreError::Capture(_)));
        assert!(rx.try_recv().is_err());

        // 다음 틱이 재시도 역할
        let report = controller.run_once().await.unwrap();
        assert!(report.alert_dispatched);
    }

    #[tokio::test]
    async fn capture_timeout_is_reported() {
        let mut config = test_config();
        config.capture.timeout_ms = Some(20);
        let (tx, _rx) = mpsc::unbounded_channel();
        let dispatcher = AlertDispatcher::new(config.alert.clone(), Arc::new(ChannelNotifier { tx }));
        let controller = PollController::new(config, Arc::new(HangingSource), dispatcher);

        let err = controller.run_cycle().await.unwrap_err();
        assert!(matches!(err, CoreError::Timeout { timeout_ms: 20 }));
    }

    #[tokio::test]
    async fn loop_survives_failures_and_stops_on_shutdown() {
        let source = Arc::new(FlakySource {
            failures_left: Mutex::new(2),
            frame: band_frame().build(),
            calls: AtomicUsize::new(0),
        });
        let (controller, _rx) = controller(source.clone());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let stopper = async {
            while source.calls.load(Ordering::SeqCst) < 4 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            let _ = shutdown_tx.send(true);
        };

        tokio::time::timeout(
            Duration::from_secs(5),
            async { tokio::join!(controller.run(shutdown_rx), stopper) },
        )
        .await
        .unwrap();

        assert!(source.calls.load(Ordering::SeqCst) >= 4);
    }
}
