use serde::{Deserialize, Serialize};

pub mod account {
    use super::*;

    /// Parent id the backend stores for top-level accounts.
    pub const NO_PARENT: i64 = -1;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct Account {
        pub account_id: i64,
        /// `-1` or `null` for top-level accounts.
        #[serde(default)]
        pub parent_account_id: Option<i64>,
        pub name: String,
    }

    impl Account {
        /// Returns the parent id, folding both root encodings into `None`.
        pub fn parent(&self) -> Option<i64> {
            self.parent_account_id.filter(|id| *id != NO_PARENT)
        }
    }

    /// Response body of the account list endpoint.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct AccountList {
        pub accounts: Vec<Account>,
    }
}

pub mod report {
    use std::collections::BTreeMap;

    use super::*;

    /// Stored report definition. The script body is opaque to clients.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct Report {
        pub report_id: i64,
        pub name: String,
        #[serde(default)]
        pub lua: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ReportList {
        pub reports: Vec<Report>,
    }

    /// One node of a tabulated report. `values` has one entry per label.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct Series {
        #[serde(default)]
        pub values: Vec<f64>,
        #[serde(default, deserialize_with = "unique_keys")]
        pub series: BTreeMap<String, Series>,
    }

    /// Output of running a report.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct Tabulation {
        pub report_id: i64,
        pub title: String,
        #[serde(default)]
        pub subtitle: String,
        #[serde(default)]
        pub units: String,
        #[serde(default)]
        pub labels: Vec<String>,
        #[serde(default, deserialize_with = "unique_keys")]
        pub series: BTreeMap<String, Series>,
    }

    /// Decodes a name-keyed series map, failing on a repeated name instead
    /// of keeping the last one.
    fn unique_keys<'de, D>(deserializer: D) -> Result<BTreeMap<String, Series>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct UniqueKeys;

        impl<'de> serde::de::Visitor<'de> for UniqueKeys {
            type Value = BTreeMap<String, Series>;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of series keyed by unique name")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut out = BTreeMap::new();
                while let Some((name, series)) = map.next_entry::<String, Series>()? {
                    if out.contains_key(&name) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate series \"{name}\""
                        )));
                    }
                    out.insert(name, series);
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(UniqueKeys)
    }
}

pub mod error {
    use super::*;

    /// Error codes the backend puts in `ErrorId`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum ErrorCode {
        NotSignedIn,
        Unauthorized,
        InvalidRequest,
        UserExists,
        /// Raised client side when a request never produced a response.
        RequestFailed,
        Internal,
        Unknown(i32),
    }

    impl ErrorCode {
        pub fn from_id(id: i32) -> Self {
            match id {
                1 => Self::NotSignedIn,
                2 => Self::Unauthorized,
                3 => Self::InvalidRequest,
                4 => Self::UserExists,
                5 => Self::RequestFailed,
                999 => Self::Internal,
                other => Self::Unknown(other),
            }
        }

        pub fn id(self) -> i32 {
            match self {
                Self::NotSignedIn => 1,
                Self::Unauthorized => 2,
                Self::InvalidRequest => 3,
                Self::UserExists => 4,
                Self::RequestFailed => 5,
                Self::Internal => 999,
                Self::Unknown(id) => id,
            }
        }
    }

    /// Error payload. The backend answers with this body instead of the
    /// expected resource, so clients check for it before decoding.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct ErrorResponse {
        #[serde(default)]
        pub error_id: i32,
        #[serde(default)]
        pub error_string: String,
    }

    impl ErrorResponse {
        pub fn is_error(&self) -> bool {
            self.error_id != 0 || !self.error_string.is_empty()
        }

        pub fn code(&self) -> ErrorCode {
            ErrorCode::from_id(self.error_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_account_accepts_null_and_sentinel() {
        let accounts: account::AccountList = serde_json::from_str(
            r#"{"accounts":[
                {"AccountId":1,"ParentAccountId":-1,"Name":"Assets"},
                {"AccountId":2,"ParentAccountId":null,"Name":"Expenses"},
                {"AccountId":3,"Name":"Income"},
                {"AccountId":4,"ParentAccountId":2,"Name":"Food"}
            ]}"#,
        )
        .unwrap();

        let parents: Vec<_> = accounts.accounts.iter().map(|a| a.parent()).collect();
        assert_eq!(parents, vec![None, None, None, Some(2)]);
    }

    #[test]
    fn tabulation_nested_series() {
        let tab: report::Tabulation = serde_json::from_str(
            r#"{"ReportId":7,"Title":"Monthly Expenses","Labels":["Jan","Feb"],
                "Series":{"Food":{"Values":[1,2],"Series":{"Groceries":{"Values":[3,4]}}}}}"#,
        )
        .unwrap();

        assert_eq!(tab.report_id, 7);
        assert_eq!(tab.series["Food"].series["Groceries"].values, vec![3.0, 4.0]);
        assert!(tab.series["Food"].series["Groceries"].series.is_empty());
    }

    #[test]
    fn duplicate_sibling_series_are_rejected() {
        let err = serde_json::from_str::<report::Tabulation>(
            r#"{"ReportId":1,"Title":"Expenses","Labels":["Jan"],
                "Series":{"Food":{"Values":[1]},"Food":{"Values":[99]}}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate series \"Food\""));

        let nested = serde_json::from_str::<report::Series>(
            r#"{"Series":{"Groceries":{},"Rent":{},"Groceries":{}}}"#,
        );
        assert!(nested.is_err());
    }

    #[test]
    fn error_payload_detection() {
        let ok: error::ErrorResponse = serde_json::from_str(r#"{"accounts":[]}"#).unwrap();
        assert!(!ok.is_error());

        let err: error::ErrorResponse =
            serde_json::from_str(r#"{"ErrorId":1,"ErrorString":"Not Signed In"}"#).unwrap();
        assert!(err.is_error());
        assert_eq!(err.code(), error::ErrorCode::NotSignedIn);
        assert_eq!(error::ErrorCode::from_id(42), error::ErrorCode::Unknown(42));
    }
}
