//! Entity primitives: identity and audit metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Audit metadata carried by every entity.
///
/// All four fields are written exclusively by the commit session as part of
/// a successful save; handler code never touches them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditInfo {
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub last_modified_at: Option<DateTime<Utc>>,
    pub last_modified_by: Option<String>,
}

/// An entity with a typed identity and audit metadata.
pub trait Entity {
    /// The typed identifier for this entity.
    type Id: Copy + Into<Uuid>;

    /// Returns the entity's identifier.
    fn id(&self) -> Self::Id;

    /// Returns the audit metadata.
    fn audit(&self) -> &AuditInfo;

    /// Returns the audit metadata for stamping by the commit session.
    fn audit_mut(&mut self) -> &mut AuditInfo;
}
