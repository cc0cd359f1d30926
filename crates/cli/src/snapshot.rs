//! Decoding of backend responses the host already fetched.
//!
//! Payloads are checked here, before anything reaches the engine: error
//! bodies are surfaced as [`AppError::Backend`] and malformed records as
//! [`AppError::Validation`].

use std::{
    fs,
    io::{self, Read},
};

use api_types::{
    account::{Account as AccountView, AccountList, NO_PARENT},
    error::ErrorResponse,
    report::{Series as SeriesView, Tabulation},
};
use engine::{Account, Report};
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};

pub fn read_source(path: &str) -> Result<String> {
    if path == "-" {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        return Ok(content);
    }
    Ok(fs::read_to_string(path)?)
}

/// Decodes `content` as `T` unless the backend answered with an error body.
///
/// Both passes read the raw text, so a repeated key is a decode error rather
/// than an entry silently overwritten.
pub fn decode<T: DeserializeOwned>(content: &str) -> Result<T> {
    if let Ok(err) = serde_json::from_str::<ErrorResponse>(content)
        && err.is_error()
    {
        return Err(AppError::Backend(err.code(), err.error_string));
    }
    Ok(serde_json::from_str(content)?)
}

pub fn parse_accounts(content: &str) -> Result<Vec<Account>> {
    let list: AccountList = decode(content)?;
    list.accounts.iter().try_for_each(validate_account)?;
    tracing::debug!(accounts = list.accounts.len(), "account list decoded");
    Ok(list.accounts.into_iter().map(Account::from).collect())
}

fn validate_account(account: &AccountView) -> Result<()> {
    if account.account_id <= 0 {
        return Err(AppError::Validation(format!(
            "account id must be positive, got {}",
            account.account_id
        )));
    }
    if let Some(parent) = account.parent_account_id
        && parent <= 0
        && parent != NO_PARENT
    {
        return Err(AppError::Validation(format!(
            "account {} has invalid parent {parent}",
            account.account_id
        )));
    }
    if account.name.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "account {} has an empty name",
            account.account_id
        )));
    }
    Ok(())
}

pub fn parse_tabulation(content: &str) -> Result<Report> {
    let tabulation: Tabulation = decode(content)?;
    if tabulation.title.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "report {} has an empty title",
            tabulation.report_id
        )));
    }
    for (name, series) in &tabulation.series {
        validate_series(name, series, tabulation.labels.len())?;
    }
    Ok(Report::from_tabulation(tabulation))
}

fn validate_series(name: &str, series: &SeriesView, labels: usize) -> Result<()> {
    if name.is_empty() {
        return Err(AppError::Validation("series with an empty name".to_string()));
    }
    if series.values.len() > labels {
        return Err(AppError::Validation(format!(
            "series \"{name}\" has {} values for {labels} labels",
            series.values.len()
        )));
    }
    for (child, nested) in &series.series {
        validate_series(child, nested, labels)?;
    }
    Ok(())
}

pub fn load_accounts(path: &str) -> Result<Vec<Account>> {
    parse_accounts(&read_source(path)?)
}

pub fn load_tabulation(path: &str) -> Result<Report> {
    parse_tabulation(&read_source(path)?)
}

#[cfg(test)]
mod tests {
    use api_types::error::ErrorCode;

    use super::*;

    #[test]
    fn accounts_decode_and_convert() {
        let accounts = parse_accounts(
            r#"{"accounts":[
                {"AccountId":1,"ParentAccountId":-1,"Name":"Expenses"},
                {"AccountId":2,"ParentAccountId":1,"Name":"Food"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(accounts[0], Account::new(1, None, "Expenses"));
        assert_eq!(accounts[1], Account::new(2, Some(1), "Food"));
    }

    #[test]
    fn error_body_is_surfaced() {
        let err = parse_accounts(r#"{"ErrorId":1,"ErrorString":"Not Signed In"}"#).unwrap_err();
        assert!(matches!(err, AppError::Backend(ErrorCode::NotSignedIn, ref msg) if msg == "Not Signed In"));
    }

    #[test]
    fn rejects_malformed_accounts() {
        let err = parse_accounts(r#"{"accounts":[{"AccountId":0,"Name":"Zero"}]}"#).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = parse_accounts(r#"{"accounts":[{"AccountId":3,"ParentAccountId":-7,"Name":"X"}]}"#)
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = parse_accounts(r#"{"accounts":[{"AccountId":3,"Name":"  "}]}"#).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = parse_accounts(r#"{"accounts":[{"AccountId":"3","Name":"X"}]}"#).unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }

    #[test]
    fn rejects_series_with_extra_values() {
        let err = parse_tabulation(
            r#"{"ReportId":1,"Title":"Expenses","Labels":["Jan"],
                "Series":{"Food":{"Values":[1],"Series":{"Groceries":{"Values":[1,2]}}}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("Groceries")));
    }

    #[test]
    fn rejects_repeated_keys() {
        let err = parse_tabulation(
            r#"{"ReportId":1,"Title":"Expenses","Labels":["Jan"],
                "Series":{"Food":{"Values":[1]},"Food":{"Values":[99]}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Json(ref e) if e.to_string().contains("Food")));

        let err = parse_accounts(r#"{"accounts":[{"AccountId":1,"AccountId":2,"Name":"X"}]}"#)
            .unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }

    #[test]
    fn tabulation_becomes_report() {
        let report = parse_tabulation(
            r#"{"ReportId":4,"Title":"Expenses","Labels":["Jan","Feb"],
                "Series":{"Food":{"Values":[1,2]}}}"#,
        )
        .unwrap();
        assert_eq!(report.title, "Expenses");
        assert_eq!(report.child_names::<&str>(&[]), vec!["Food"]);
    }
}
