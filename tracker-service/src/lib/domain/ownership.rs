use thiserror::Error;

use crate::identity::models::IdentityContext;

/// A resource that records its owning identity.
pub trait Owned {
    fn owner_id(&self) -> i64;
}

/// Denial returned when a resource belongs to another identity.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Resource belongs to another identity")]
pub struct Forbidden;

/// Allow the operation only when the requester owns the resource.
///
/// Pure comparison of the resource's owner against the request identity.
/// The role in the context never bypasses ownership.
pub fn authorize(context: &IdentityContext, resource: &dyn Owned) -> Result<(), Forbidden> {
    if resource.owner_id() == context.subject_id {
        Ok(())
    } else {
        Err(Forbidden)
    }
}
