//! # linewatch-app
//!
//! linewatch 바이너리 진입점.
//! 설정 로드, 어댑터 와이어링(DI), 폴링 루프 실행.

mod alert;
mod lifecycle;
mod notifier;
mod poll_controller;

use anyhow::Result;
use clap::Parser;
use linewatch_core::config::AppConfig;
use linewatch_core::config_manager::ConfigManager;
use linewatch_core::ports::frame_source::FrameSource;
use linewatch_network::price_client::HttpPriceClassifier;
use linewatch_vision::capture::{ImageFileSource, ScreenCapture};
use linewatch_vision::snapshot::PngSnapshotWriter;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::alert::AlertDispatcher;
use crate::lifecycle::LifecycleManager;
use crate::notifier::DesktopAlertNotifier;
use crate::poll_controller::PollController;

/// 차트 가격 라인 감시기
///
/// 화면을 주기적으로 캡처해 가격 버블이 빨간 라인에 닿으면 알린다.
#[derive(Parser, Debug)]
#[command(name = "linewatch")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 config.json)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    /// 폴링 주기 (밀리초)
    #[arg(long)]
    poll_interval: Option<u64>,

    /// 사이클 1회 실행 후 결과를 JSON으로 출력하고 종료
    #[arg(long)]
    once: bool,

    /// 화면 대신 저장된 스크린샷 분석
    #[arg(long)]
    image: Option<PathBuf>,

    /// 캡처할 모니터 인덱스
    #[arg(long, short = 'm')]
    monitor: Option<usize>,

    /// 가격 분류 서비스 호출 끄기
    #[arg(long)]
    no_classifier: bool,

    /// 스냅샷 저장 끄기
    #[arg(long)]
    no_snapshot: bool,
}

/// CLI 인자로 설정 오버라이드
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(ms) = args.poll_interval {
        config.detection.poll_interval_ms = ms;
    }
    if args.monitor.is_some() {
        config.capture.monitor_index = args.monitor;
    }
    if args.no_classifier {
        config.classifier.enabled = false;
    }
    if args.no_snapshot {
        config.capture.snapshot_enabled = false;
    }
}

/// 설정 파일 로드 → CLI 오버라이드 → 검증
///
/// 검증은 오버라이드 이후 1회만 실행한다. 파일의 잘못된 값도 CLI 인자로 덮어쓸 수 있다.
fn load_config(args: &Args) -> Result<AppConfig> {
    let config_manager = match &args.config {
        Some(path) => ConfigManager::with_path(path.clone())?,
        None => ConfigManager::new()?,
    };
    info!("설정 파일: {}", config_manager.config_path().display());

    let mut config = config_manager.get();
    apply_overrides(&mut config, args);
    config.validate()?;
    Ok(config)
}

/// 설정에 맞춰 컨트롤러 조립
fn build_controller(config: AppConfig, image: Option<PathBuf>) -> Result<PollController> {
    let frame_source: Arc<dyn FrameSource> = match image {
        Some(path) => {
            info!("이미지 파일 모드: {}", path.display());
            Arc::new(ImageFileSource::new(path))
        }
        None => Arc::new(ScreenCapture::new(config.capture.monitor_index)),
    };

    let dispatcher = AlertDispatcher::new(
        config.alert.clone(),
        Arc::new(DesktopAlertNotifier::new()),
    );

    let mut controller = PollController::new(config.clone(), frame_source, dispatcher);

    if config.capture.snapshot_enabled {
        controller = controller.with_snapshot_writer(Arc::new(PngSnapshotWriter::new()));
    }

    if config.classifier.enabled {
        let classifier = HttpPriceClassifier::new(&config.classifier)?;
        controller = controller.with_classifier(Arc::new(classifier));
    } else {
        info!("가격 분류 서비스 비활성화");
    }

    Ok(controller)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let lvl = &args.log_level;
    let log_filter = format!(
        "linewatch={lvl},linewatch_app={lvl},linewatch_core={lvl},linewatch_vision={lvl},linewatch_network={lvl}"
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    // 설정 로드 (시작 시 1회)
    let config = load_config(&args)?;

    info!(
        "linewatch 시작: 주기={}ms, 분류={}, 스냅샷={}",
        config.detection.poll_interval_ms,
        config.classifier.enabled,
        config.capture.snapshot_enabled
    );

    let controller = build_controller(config, args.image.clone())?;

    if args.once {
        let report = controller.run_once().await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let lifecycle = Arc::new(LifecycleManager::new());
    let shutdown_rx = lifecycle.subscribe();

    let signal_waiter = lifecycle.clone();
    tokio::spawn(async move {
        signal_waiter.wait_for_signal().await;
    });

    controller.run(shutdown_rx).await;

    info!("linewatch 종료");
    Ok(())
}
