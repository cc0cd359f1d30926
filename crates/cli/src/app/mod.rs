use std::sync::Arc;

use api_types::error::{ErrorCode, ErrorResponse};
use engine::{Account, AccountTree, Report, ReportNavigator};

use crate::{
    error::{AppError, Result},
    events::NavEvent,
};

/// Error banner shown above the current view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notice {
    pub code: Option<ErrorCode>,
    pub message: Option<String>,
}

impl Notice {
    pub fn server_error(&mut self, err: &ErrorResponse) {
        self.code = Some(err.code());
        self.message = Some(err.error_string.clone());
    }

    pub fn request_failed(&mut self, reason: &str) {
        self.code = Some(ErrorCode::RequestFailed);
        self.message = Some(format!("Request Failed: {reason}"));
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_set(&self) -> bool {
        self.message.is_some()
    }

    /// Records a host-side failure in the banner.
    pub fn report(&mut self, err: &AppError) {
        match err {
            AppError::Backend(code, message) => self.server_error(&ErrorResponse {
                error_id: code.id(),
                error_string: message.clone(),
            }),
            AppError::Io(_) | AppError::Json(_) => self.request_failed(&err.to_string()),
            other => {
                self.code = None;
                self.message = Some(other.to_string());
            }
        }
    }
}

/// Host state: the last good account tree, the report navigation snapshot
/// and the error banner.
#[derive(Debug, Default)]
pub struct AppState {
    pub accounts: AccountTree,
    pub navigator: ReportNavigator,
    pub notice: Notice,
}

impl AppState {
    /// Rebuilds the account tree. On failure the previous tree stays in place.
    pub fn apply_accounts(&mut self, accounts: Vec<Account>) -> Result<()> {
        match AccountTree::build(accounts) {
            Ok(tree) => {
                self.accounts = tree;
                Ok(())
            }
            Err(err) => {
                tracing::error!("account data rejected: {err}");
                let err = AppError::from(err);
                self.notice.report(&err);
                Err(err)
            }
        }
    }

    pub fn apply_report(&mut self, report: Report) {
        self.navigator = self.navigator.refresh(Arc::new(report));
    }

    /// Routes a navigation event. A rejected event leaves navigation as is.
    pub fn handle(&mut self, event: &NavEvent) -> Result<()> {
        let next = match event {
            NavEvent::Drill(series) => self.navigator.drill_into(series),
            NavEvent::Up(level) => self.navigator.breadcrumb_to(*level),
            NavEvent::Top => self.navigator.breadcrumb_to(0),
            NavEvent::Quit => return Ok(()),
        };
        match next {
            Ok(navigator) => {
                self.navigator = navigator;
                self.notice.clear();
                Ok(())
            }
            Err(err) => {
                let err = AppError::from(err);
                self.notice.report(&err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use engine::{AccountId, Series};

    use super::*;

    fn report() -> Report {
        Report::new(1, "Expenses", "Expenses").with_series(
            "Food",
            Series::default().with_child("Groceries", Series::leaf(vec![1.0])),
        )
    }

    #[test]
    fn bad_accounts_keep_last_good_tree() {
        let mut state = AppState::default();
        state
            .apply_accounts(vec![
                Account::new(1, None, "Expenses"),
                Account::new(2, Some(1), "Food"),
            ])
            .unwrap();

        let err = state
            .apply_accounts(vec![Account::new(3, Some(9), "Orphan")])
            .unwrap_err();
        assert!(matches!(err, AppError::Engine(_)));
        assert_eq!(state.accounts.len(), 2);
        assert!(state.accounts.contains(AccountId(2)));
        assert_eq!(state.notice.code, None);
        assert!(
            state
                .notice
                .message
                .as_deref()
                .is_some_and(|m| m.contains("missing parent 9"))
        );
    }

    #[test]
    fn reporting_a_recorded_failure_keeps_one_notice() {
        let mut state = AppState::default();
        let err = state
            .apply_accounts(vec![Account::new(3, Some(9), "Orphan")])
            .unwrap_err();
        let recorded = state.notice.clone();

        state.notice.report(&err);
        assert_eq!(state.notice, recorded);
        assert_eq!(
            crate::view::notice(&state.notice).map(|line| line.lines().count()),
            Some(1)
        );
    }

    #[test]
    fn rejected_drill_keeps_state_and_sets_notice() {
        let mut state = AppState::default();
        state.apply_report(report());
        state.handle(&NavEvent::Drill("Food".to_string())).unwrap();

        assert!(state.handle(&NavEvent::Drill("Rent".to_string())).is_err());
        assert_eq!(state.navigator.series_traversal(), ["Food"]);
        assert!(state.notice.is_set());

        state.handle(&NavEvent::Top).unwrap();
        assert!(state.navigator.series_traversal().is_empty());
        assert!(!state.notice.is_set());
    }

    #[test]
    fn server_error_then_clear() {
        let mut notice = Notice::default();
        notice.server_error(&ErrorResponse {
            error_id: 3,
            error_string: "Invalid Request".to_string(),
        });
        assert_eq!(notice.code, Some(ErrorCode::InvalidRequest));

        notice.clear();
        assert_eq!(notice, Notice::default());
    }
}
