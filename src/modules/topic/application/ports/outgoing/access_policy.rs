use async_trait::async_trait;

use crate::modules::topic::application::domain::entities::UserId;

/// Capability checks delegated to the surrounding application's
/// authorization layer. Implementations decide what a role means; this
/// module only asks the two questions it needs answered.
#[async_trait]
pub trait AccessPolicy: Send + Sync {
    /// May this actor see soft-deleted topics in listings and lookups?
    async fn can_view_deleted_topics(&self, actor: Option<&UserId>) -> bool;

    /// May this actor perform moderator state changes on topics?
    async fn can_moderate_topics(&self, actor: &UserId) -> bool;
}

//
// ──────────────────────────────────────────────────────────
// Deleted-topic visibility mode
// ──────────────────────────────────────────────────────────
//

/// How the view-deleted capability is decided.
///
/// The forum this module was extracted from shipped with the policy check
/// short-circuited to "everyone may see deleted topics", with the real
/// delegation left unreachable below it. Both behaviors are kept and the
/// choice is a configuration field: `AlwaysVisible` reproduces the shipped
/// behavior, `PolicyChecked` restores the delegated check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletedVisibility {
    #[default]
    AlwaysVisible,
    PolicyChecked,
}

impl DeletedVisibility {
    /// Resolve the capability for one request. `AlwaysVisible` never
    /// consults the policy.
    pub async fn resolve<P>(&self, policy: &P, actor: Option<&UserId>) -> bool
    where
        P: AccessPolicy + ?Sized,
    {
        match self {
            DeletedVisibility::AlwaysVisible => true,
            DeletedVisibility::PolicyChecked => policy.can_view_deleted_topics(actor).await,
        }
    }
}
