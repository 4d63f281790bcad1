//! # framefit-vision
//!
//! 이미지 획득 및 처리 어댑터.
//!
//! ## 구조
//!
//! - [`capture`]: 촬영 파일 할당 + `ImageAcquirer` 구현
//! - [`resolver`]: 이미지 참조(경로/`file://` URI) → 바이트
//! - [`encoder`]: JPEG 품질 90 재인코딩

pub mod capture;
pub mod encoder;
pub mod resolver;
