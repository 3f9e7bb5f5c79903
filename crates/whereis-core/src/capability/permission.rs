//! Permission prompts
//!
//! Denial is an ordinary answer, not a failure of the prompt itself.

use async_trait::async_trait;
use tracing::info;

use super::CapabilityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Camera,
    Location,
}

impl Permission {
    pub fn title(&self) -> &'static str {
        match self {
            Permission::Camera => "Camera Permission",
            Permission::Location => "Location Access Permission",
        }
    }

    /// Why the app is asking
    pub fn rationale(&self) -> &'static str {
        match self {
            Permission::Camera => "The application needs access to the camera.",
            Permission::Location => {
                "The application needs location access permission to save GPS coordinates."
            }
        }
    }

    /// What the user is told after declining
    pub fn denied_message(&self) -> &'static str {
        match self {
            Permission::Camera => "You need to grant camera access to take a photo.",
            Permission::Location => "You need to grant location access to save GPS coordinates.",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Permission::Camera => write!(f, "camera"),
            Permission::Location => write!(f, "location"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Asks the user for a permission
#[async_trait]
pub trait PermissionPrompt: Send + Sync {
    async fn request(&self, permission: Permission) -> PermissionStatus;
}

/// Grants every request without asking
#[derive(Debug, Clone, Copy, Default)]
pub struct GrantAll;

#[async_trait]
impl PermissionPrompt for GrantAll {
    async fn request(&self, _permission: Permission) -> PermissionStatus {
        PermissionStatus::Granted
    }
}

/// Ask once and turn a denial into an error carrying the user-facing message
pub async fn require_permission(
    prompt: &dyn PermissionPrompt,
    permission: Permission,
) -> Result<(), CapabilityError> {
    match prompt.request(permission).await {
        PermissionStatus::Granted => Ok(()),
        PermissionStatus::Denied => {
            info!(%permission, "permission denied");
            Err(CapabilityError::PermissionDenied {
                permission,
                message: permission.denied_message(),
            })
        }
    }
}
