//! 도메인 모델.
//!
//! 워크플로우가 소유하는 값 객체들. 프레젠테이션 레이어는 읽기만 한다.

pub mod analysis;
pub mod image;
pub mod permission;
pub mod workflow;
