use crate::domain::HabitId;

/// Error type for ledger operations
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// No habit with this id; nothing was changed or persisted
    #[error("Habit not found: {0}")]
    HabitNotFound(HabitId),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The store rejected the write; the ledger kept its previous state
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
