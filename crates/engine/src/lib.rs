//! Hierarchical data model behind the account list and the report viewer.
//!
//! - [`AccountTree`] turns the flat account list into a validated forest.
//! - [`ReportNavigator`] tracks drill-down state over a report's series tree.
//!
//! Both are pure and synchronous: callers hand in data they already fetched
//! and get back immutable snapshots.

pub use accounts::{Account, AccountBranch, AccountId, AccountTree};
pub use error::{EngineError, IntegrityError, NavigationError};
pub use navigator::{Breadcrumb, ChartRow, ReportNavigator, SelectedReport};
pub use reports::{DEFAULT_TOP_LEVEL_NAME, Report, ReportId, Series};

mod accounts;
mod error;
pub mod index;
mod navigator;
mod reports;
