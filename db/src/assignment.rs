//! Least-loaded admin selection.
//!
//! A new ticket goes to the admin of its department who currently has the
//! fewest `pending` tickets. Ties go to the admin registered first.

use sea_orm::{DbConn, DbErr};
use thiserror::Error;

use crate::models::{admin, tickets};

#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("No admins found in department '{0}'")]
    NoAdmins(String),

    #[error("Error finding admin with least pending tickets: {0}")]
    Db(#[from] DbErr),
}

/// Picks the candidate with the strictly smallest load; the first one seen
/// wins ties.
pub fn pick_least_loaded<T>(candidates: impl IntoIterator<Item = (T, u64)>) -> Option<(T, u64)> {
    candidates.into_iter().fold(None, |best, (candidate, load)| match best {
        Some((_, best_load)) if best_load <= load => best,
        _ => Some((candidate, load)),
    })
}

/// Finds the admin of `department` with the fewest pending tickets.
///
/// This is a read-only scan; callers that go on to insert a ticket should
/// hold a lock across both steps or accept load skew under concurrency.
pub async fn least_loaded_admin(
    db: &DbConn,
    department: &str,
) -> Result<admin::Model, AssignmentError> {
    let admins = admin::Model::find_by_department(db, department).await?;
    if admins.is_empty() {
        return Err(AssignmentError::NoAdmins(department.to_owned()));
    }

    let mut loads = Vec::with_capacity(admins.len());
    for admin in admins {
        let pending = tickets::Model::count_pending_for_admin(db, admin.id).await?;
        tracing::debug!(admin_id = admin.id, pending, "admin load");
        loads.push((admin, pending));
    }

    let (admin, pending) = pick_least_loaded(loads)
        .ok_or_else(|| AssignmentError::NoAdmins(department.to_owned()))?;
    tracing::info!(
        admin_id = admin.id,
        department,
        pending,
        "Selected least loaded admin"
    );
    Ok(admin)
}
