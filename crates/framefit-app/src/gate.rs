//! 권한 게이트.
//!
//! 이미지 획득 전에 권한을 확인하고, 없으면 플랫폼에 한 번 요청한다.
//! 동시에 하나의 요청만 진행된다. 거부는 해당 동작에 대해 종결이며 재시도하지 않는다.

use framefit_core::error::CoreError;
use framefit_core::models::permission::{Capability, PermissionStatus};
use framefit_core::ports::permission::PermissionPlatform;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// 권한 게이트
pub struct PermissionGate {
    platform: Arc<dyn PermissionPlatform>,
    /// 진행 중인 권한 요청 직렬화
    request_lock: Mutex<()>,
}

impl PermissionGate {
    pub fn new(platform: Arc<dyn PermissionPlatform>) -> Self {
        Self {
            platform,
            request_lock: Mutex::new(()),
        }
    }

    /// 권한 확보. 이미 허용되어 있으면 즉시 반환, 아니면 사용자 응답을 기다린다.
    pub async fn ensure(&self, capability: Capability) -> Result<PermissionStatus, CoreError> {
        if self.platform.status(capability).is_granted() {
            debug!("권한 이미 허용됨: {capability}");
            return Ok(PermissionStatus::Granted);
        }

        let _guard = self.request_lock.lock().await;

        // 대기 중에 앞선 요청으로 허용됐을 수 있다
        if self.platform.status(capability).is_granted() {
            return Ok(PermissionStatus::Granted);
        }

        info!("권한 요청: {capability}");
        let status = self.platform.request(capability).await?;
        match status {
            PermissionStatus::Granted => info!("권한 허용: {capability}"),
            PermissionStatus::Denied => info!("권한 거부: {capability}"),
        }
        Ok(status)
    }
}
