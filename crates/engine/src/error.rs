//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`IntegrityError`] thrown when a flat account list cannot form a valid
//!   forest. The caller keeps its previous tree.
//! - [`NavigationError`] thrown when a report navigation event does not
//!   describe a valid descent path. The navigation state is left untouched.
use thiserror::Error;

use crate::accounts::AccountId;

/// Account data that violates the tree invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("account {0} is listed more than once")]
    DuplicateAccount(AccountId),
    #[error("account {account} references missing parent {parent}")]
    DanglingParent {
        account: AccountId,
        parent: AccountId,
    },
    #[error("account {0} is part of a parent cycle")]
    Cycle(AccountId),
}

/// Rejected report navigation event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no report selected")]
    NoReport,
    #[error("\"{series}\" is not a child of \"{parent}\"")]
    UnknownSeries { parent: String, series: String },
    #[error("breadcrumb {index} is deeper than the current level {depth}")]
    BreadcrumbOutOfRange { index: usize, depth: usize },
    #[error("invalid traversal: \"{0}\" not found")]
    InvalidTraversal(String),
}

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Integrity(#[from] IntegrityError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}
