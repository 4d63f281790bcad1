//! 플랫폼 권한 포트.
//!
//! 구현: `framefit-app` crate (콘솔 프롬프트)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::permission::{Capability, PermissionStatus};

/// 플랫폼 권한 API
#[async_trait]
pub trait PermissionPlatform: Send + Sync {
    /// 현재 권한 상태 (프롬프트 없음)
    fn status(&self, capability: Capability) -> PermissionStatus;

    /// 사용자에게 권한 요청. 사용자가 응답할 때까지 대기한다.
    async fn request(&self, capability: Capability) -> Result<PermissionStatus, CoreError>;
}
