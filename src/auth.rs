use async_trait::async_trait;

use crate::schema::ContentTypeModel;

/// What a sanitization pass wants to do with a relation's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationAction {
    Read,
    Write,
}

/// External policy decision point for relation visibility.
///
/// Implementations live with the host application. This crate only asks
/// whether a relation's target model is permitted for an action; how that is
/// decided is none of its business.
#[async_trait]
pub trait AuthPolicy: Send + Sync {
    async fn allows(&self, target: &ContentTypeModel, action: RelationAction) -> bool;
}
