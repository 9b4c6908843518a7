//! Business operations that span more than one record.
//!
//! Every function takes the [`InventoryStore`](crate::db::InventoryStore)
//! it works against, checks lifecycle and status rules, then writes through
//! the per-entity repositories. Writes are not transactional: the last
//! write wins, and a multi-record operation that fails halfway leaves the
//! records it already wrote in place.

pub mod allocation;
pub mod maintenance;
pub mod procurement;

use thiserror::Error;

use crate::calculations::DepreciationError;
use crate::db::RepositoryError;
use crate::drafts::DraftError;

pub use allocation::{assign_employee, assign_room, dispose, release};
pub use maintenance::{
    cancel_maintenance, complete_maintenance, overdue_maintenance, schedule_maintenance,
    start_maintenance, upcoming_maintenance,
};
pub use procurement::{Procurement, approve_order, cancel_order, place_order, receive_order};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Depreciation(#[from] DepreciationError),

    #[error("{kind} #{id} is archived")]
    Archived { kind: &'static str, id: i64 },

    #[error("cannot {action} {kind} #{id} while it is {status}")]
    InvalidTransition {
        kind: &'static str,
        id: i64,
        status: String,
        action: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Rejects an archived record with [`ServiceError::Archived`].
pub(crate) fn ensure_active<E: crate::db::Entity>(entity: &E) -> Result<()> {
    if entity.is_archived() {
        return Err(ServiceError::Archived {
            kind: E::KIND,
            id: entity.id(),
        });
    }
    Ok(())
}
