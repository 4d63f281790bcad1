//! 분석 업로드 HTTP 클라이언트.
//!
//! `AnalysisUploader` 포트 구현. 필드 하나(`image`, `image.jpg`, `image/jpeg`)를 가진
//! multipart 요청을 설정된 엔드포인트로 POST 한다. 재시도 없음.

use async_trait::async_trait;
use framefit_core::config::ServerConfig;
use framefit_core::error::CoreError;
use framefit_core::ports::uploader::AnalysisUploader;
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

/// multipart 필드명
pub const IMAGE_FIELD: &str = "image";
/// 업로드 파일명
pub const IMAGE_FILE_NAME: &str = "image.jpg";
/// 업로드 MIME 타입
pub const IMAGE_MIME: &str = "image/jpeg";

/// 분석 서버 업로드 클라이언트: `AnalysisUploader` 포트 구현
#[derive(Debug)]
pub struct HttpAnalysisClient {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

impl HttpAnalysisClient {
    /// 새 업로드 클라이언트 생성
    ///
    /// 엔드포인트가 설정되지 않았으면 `Config` 에러.
    pub fn new(config: &ServerConfig) -> Result<Self, CoreError> {
        let endpoint = config
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| {
                CoreError::Config("분석 엔드포인트 미설정 (server.endpoint)".to_string())
            })?
            .to_string();

        // reqwest에는 쓰기 타임아웃이 없으므로 전체 요청 상한에 포함시킨다
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .read_timeout(config.read_timeout())
            .timeout(config.total_timeout())
            .user_agent(concat!("framefit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        debug!(
            endpoint = %endpoint,
            connect_timeout = config.connect_timeout_secs,
            read_timeout = config.read_timeout_secs,
            write_timeout = config.write_timeout_secs,
            "HttpAnalysisClient 초기화"
        );

        Ok(Self {
            client,
            endpoint,
            api_token: config.api_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(jpeg: Vec<u8>) -> Result<Form, CoreError> {
        let part = Part::bytes(jpeg)
            .file_name(IMAGE_FILE_NAME)
            .mime_str(IMAGE_MIME)
            .map_err(|e| CoreError::Internal(format!("multipart 파트 생성 실패: {e}")))?;
        Ok(Form::new().part(IMAGE_FIELD, part))
    }
}

#[async_trait]
impl AnalysisUploader for HttpAnalysisClient {
    async fn upload(&self, jpeg: Vec<u8>) -> Result<String, CoreError> {
        let size = jpeg.len();
        let form = Self::build_form(jpeg)?;

        debug!(endpoint = %self.endpoint, size, "분석 이미지 업로드");

        let mut request = self.client.post(&self.endpoint).multipart(form);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("업로드 요청 실패: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "분석 서버 오류 응답");
            return Err(CoreError::UploadFailed {
                status_code: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CoreError::Network(format!("응답 읽기 실패: {e}")))?;

        debug!(status = %status, body_len = body.len(), "업로드 응답 수신");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use mockito::Matcher;
    use std::time::{Duration, Instant};

    fn server_config(endpoint: &str) -> ServerConfig {
        ServerConfig {
            endpoint: Some(endpoint.to_string()),
            connect_timeout_secs: 5,
            read_timeout_secs: 5,
            write_timeout_secs: 5,
            ..ServerConfig::default()
        }
    }

    #[test]
    fn missing_endpoint_is_config_error() {
        let result = HttpAnalysisClient::new(&ServerConfig::default());
        assert_matches!(result, Err(CoreError::Config(msg)) if msg.contains("미설정"));

        let blank = server_config("   ");
        assert_matches!(HttpAnalysisClient::new(&blank), Err(CoreError::Config(_)));
    }

    #[test]
    fn client_creation() {
        let client = HttpAnalysisClient::new(&server_config("http://localhost:8000/analyze")).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8000/analyze");
    }

    #[tokio::test]
    async fn upload_sends_single_image_part() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/analyze")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=.+".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="image"; filename="image.jpg""#.to_string()),
                Matcher::Regex("(?i)content-type: image/jpeg".to_string()),
                Matcher::Regex("fake-jpeg-payload".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"frame_type":"round"}"#)
            .create_async()
            .await;

        let client = HttpAnalysisClient::new(&server_config(&format!("{}/analyze", server.url()))).unwrap();
        let body = client.upload(b"fake-jpeg-payload".to_vec()).await.unwrap();

        assert_eq!(body, r#"{"frame_type":"round"}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn bearer_token_is_sent_when_configured() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/analyze")
            .match_header("authorization", "Bearer secret-token")
            .with_status(201)
            .with_body("{}")
            .create_async()
            .await;

        let mut config = server_config(&format!("{}/analyze", server.url()));
        config.api_token = Some("secret-token".to_string());
        let client = HttpAnalysisClient::new(&config).unwrap();

        assert_eq!(client.upload(vec![1, 2, 3]).await.unwrap(), "{}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_2xx_is_upload_failed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/analyze")
            .with_status(500)
            .with_body(r#"{"frame_type":"round"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = HttpAnalysisClient::new(&server_config(&format!("{}/analyze", server.url()))).unwrap();
        let result = client.upload(vec![0xFF, 0xD8]).await;

        assert_matches!(result, Err(CoreError::UploadFailed { status_code: 500 }));
        // 재시도 없음
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn not_found_is_upload_failed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/analyze")
            .with_status(404)
            .create_async()
            .await;

        let client = HttpAnalysisClient::new(&server_config(&format!("{}/analyze", server.url()))).unwrap();
        assert_matches!(
            client.upload(vec![1]).await,
            Err(CoreError::UploadFailed { status_code: 404 })
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        // 포트 1은 대부분 환경에서 연결 거부
        let client = HttpAnalysisClient::new(&server_config("http://127.0.0.1:1/analyze")).unwrap();
        assert_matches!(client.upload(vec![1]).await, Err(CoreError::Network(_)));
    }

    #[tokio::test]
    async fn silent_server_hits_read_timeout() {
        // 연결만 받고 응답하지 않는 서버
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let holder = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(60)).await;
            drop(socket);
        });

        let config = ServerConfig {
            endpoint: Some(format!("http://{addr}/analyze")),
            connect_timeout_secs: 1,
            read_timeout_secs: 1,
            write_timeout_secs: 1,
            ..ServerConfig::default()
        };
        let client = HttpAnalysisClient::new(&config).unwrap();

        let started = Instant::now();
        let result = client.upload(vec![0xFF, 0xD8, 0xFF, 0xD9]).await;

        assert_matches!(result, Err(CoreError::Network(_)));
        assert!(started.elapsed() < Duration::from_secs(10));
        holder.abort();
    }
}
