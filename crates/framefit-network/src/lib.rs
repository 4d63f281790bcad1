//! # framefit-network
//!
//! 분석 서버 네트워크 어댑터.
//! 인코딩된 사진을 multipart/form-data로 한 번 업로드하고 원본 응답 본문을 돌려준다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use framefit_network::http_client::HttpAnalysisClient;
//!
//! let client = HttpAnalysisClient::new(&config.server)?;
//! let body = client.upload(jpeg_bytes).await?;
//! ```

pub mod http_client;
