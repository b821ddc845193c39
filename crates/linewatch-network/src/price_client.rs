//! 가격 분류 서비스 클라이언트.
//!
//! `PriceClassifier` 포트 구현. PNG 원본 바이트를 `image/png`로 POST한다.
//! 재시도 없음. 다음 폴링 틱이 재시도 역할을 한다.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use linewatch_core::config::ClassifierConfig;
use linewatch_core::error::CoreError;
use linewatch_core::ports::classifier::PriceClassifier;

/// 분류 서비스 응답 (HTTP 200)
#[derive(Debug, Deserialize)]
struct PriceResponse {
    #[serde(rename = "stockPrice")]
    stock_price: f64,
}

/// HTTP 가격 분류 클라이언트
#[derive(Debug)]
pub struct HttpPriceClassifier {
    client: reqwest::Client,
    endpoint: String,
    /// 설정된 요청 타임아웃 (None이면 무제한)
    timeout_ms: Option<u64>,
}

impl HttpPriceClassifier {
    /// 새 분류 클라이언트 생성
    pub fn new(config: &ClassifierConfig) -> Result<Self, CoreError> {
        if config.endpoint.trim().is_empty() {
            return Err(CoreError::Config("분류 서비스 엔드포인트 미설정".into()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {}", e)))?;

        debug!(
            endpoint = %config.endpoint,
            timeout_ms = ?config.timeout_ms,
            "HttpPriceClassifier 초기화"
        );

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            timeout_ms: config.timeout_ms,
        })
    }

    /// 응답 본문 파싱
    fn parse_response(body: &str) -> Result<f64, CoreError> {
        let response: PriceResponse = serde_json::from_str(body)
            .map_err(|e| CoreError::Classification(format!("응답 디코딩 실패: {}", e)))?;
        Ok(response.stock_price)
    }

    fn map_send_error(&self, e: reqwest::Error) -> CoreError {
        match self.timeout_ms {
            Some(timeout_ms) if e.is_timeout() => CoreError::Timeout { timeout_ms },
            _ => CoreError::Network(format!("분류 서비스 요청 실패: {}", e)),
        }
    }
}

#[async_trait]
impl PriceClassifier for HttpPriceClassifier {
    async fn classify(&self, png: &[u8]) -> Result<f64, CoreError> {
        debug!(endpoint = %self.endpoint, image_size = png.len(), "분류 서비스 호출");

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "image/png")
            .body(png.to_vec())
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        match status.as_u16() {
            200 => {}
            503 => {
                warn!(status = %status, "분류 서비스 일시 불가");
                return Err(CoreError::ServiceUnavailable(
                    body.chars().take(200).collect(),
                ));
            }
            code => {
                warn!(status = %status, "분류 서비스 오류 응답");
                return Err(CoreError::Classification(format!(
                    "service returned status {code}"
                )));
            }
        }

        let price = Self::parse_response(&body)?;
        debug!(price, "분류 결과 수신");
        Ok(price)
    }
}

// ============================================================
// 테스트
// ============================================================
