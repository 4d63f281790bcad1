//! # framefit-app
//!
//! FrameFit 애플리케이션 레이어.
//! 권한 게이트, 분석 워크플로우 오케스트레이션, 데스크톱 플랫폼 어댑터를 제공하며
//! `framefit` 바이너리가 이들을 와이어링한다.

pub mod gate;
pub mod lifecycle;
pub mod platform;
pub mod surface;
pub mod workflow;
