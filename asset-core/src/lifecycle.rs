//! Archive/restore (soft-delete) lifecycle shared by every entity type.
//!
//! Records are never hard-deleted. Archiving marks a record inactive and
//! stamps who archived it and when; restoring reverses both. Assets carry
//! the archive marker in their status and remember the status they held
//! before archiving, so a restore returns them to exactly that status.
//!
//! Archiving does not cascade: maintenance records, purchase orders and
//! tasks keep pointing at an archived asset's id.

use chrono::{DateTime, Utc};

use crate::models::{
    Asset, AssetStatus, AuditInfo, Category, Employee, MaintenanceRecord, PurchaseOrder, Room,
    Task, Tenant,
};

/// An entity that can be archived and restored in place.
pub trait Archivable {
    fn is_archived(&self) -> bool;

    /// Flips the entity's own archive marker. Audit stamps are handled by
    /// [`archive`] and [`restore`].
    fn set_archived(
        &mut self,
        archived: bool,
    );

    fn audit(&self) -> &AuditInfo;

    fn audit_mut(&mut self) -> &mut AuditInfo;
}

/// Archives `entity`, stamping `actor` and `at`. Already archived entities
/// are returned unchanged.
pub fn archive<T: Archivable>(
    mut entity: T,
    actor: &str,
    at: DateTime<Utc>,
) -> T {
    if entity.is_archived() {
        return entity;
    }
    entity.set_archived(true);
    let audit = entity.audit_mut();
    audit.archived_at = Some(at);
    audit.archived_by = Some(actor.to_string());
    audit.updated_at = at;
    entity
}

/// Restores an archived `entity`. Active entities are returned unchanged.
pub fn restore<T: Archivable>(
    mut entity: T,
    at: DateTime<Utc>,
) -> T {
    if !entity.is_archived() {
        return entity;
    }
    entity.set_archived(false);
    let audit = entity.audit_mut();
    audit.archived_at = None;
    audit.archived_by = None;
    audit.updated_at = at;
    entity
}

/// Archives an active entity or restores an archived one.
///
/// Toggling twice returns the entity to its original lifecycle state.
pub fn toggle_archived<T: Archivable>(
    entity: T,
    actor: &str,
    at: DateTime<Utc>,
) -> T {
    if entity.is_archived() {
        restore(entity, at)
    } else {
        archive(entity, actor, at)
    }
}

/// Drops archived records, keeping the order of the rest.
pub fn retain_active<T: Archivable>(items: Vec<T>) -> Vec<T> {
    items.into_iter().filter(|item| !item.is_archived()).collect()
}

impl Archivable for Asset {
    fn is_archived(&self) -> bool {
        self.status == AssetStatus::Archived
    }

    fn set_archived(
        &mut self,
        archived: bool,
    ) {
        if archived && self.status != AssetStatus::Archived {
            self.status_before_archive = Some(self.status);
            self.status = AssetStatus::Archived;
        } else if !archived && self.status == AssetStatus::Archived {
            self.status = self
                .status_before_archive
                .take()
                .unwrap_or(AssetStatus::Available);
        }
    }

    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }
}

/// Entities whose lifecycle is a plain `archived` flag.
macro_rules! flag_archivable {
    ($($entity:ty),+ $(,)?) => {
        $(
            impl Archivable for $entity {
                fn is_archived(&self) -> bool {
                    self.archived
                }

                fn set_archived(&mut self, archived: bool) {
                    self.archived = archived;
                }

                fn audit(&self) -> &AuditInfo {
                    &self.audit
                }

                fn audit_mut(&mut self) -> &mut AuditInfo {
                    &mut self.audit
                }
            }
        )+
    };
}

flag_archivable!(
    Category,
    Room,
    Employee,
    MaintenanceRecord,
    PurchaseOrder,
    Tenant,
    Task,
);
