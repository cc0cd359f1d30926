//! Tabulated reports: a tree of named series, each with one value per label.

use std::{collections::BTreeMap, fmt};

use api_types::report::{Series as SeriesView, Tabulation};

use crate::index::descend;

/// Label of the chart entry holding a level's own values, as opposed to the
/// values of its child series.
pub const DEFAULT_TOP_LEVEL_NAME: &str = "(top level)";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportId(pub i64);

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    pub values: Vec<f64>,
    /// Child series keyed by name; sibling names are unique.
    pub children: BTreeMap<String, Series>,
}

impl Series {
    pub fn leaf(values: Vec<f64>) -> Self {
        Self {
            values,
            children: BTreeMap::new(),
        }
    }

    pub fn with_child(mut self, name: impl Into<String>, child: Series) -> Self {
        self.children.insert(name.into(), child);
        self
    }

    /// Values summed over this series and all its descendants, one per label.
    pub fn totals(&self, labels: usize) -> Vec<f64> {
        let mut out = vec![0.0; labels];
        self.accumulate(&mut out);
        out
    }

    fn accumulate(&self, out: &mut [f64]) {
        for (slot, value) in out.iter_mut().zip(&self.values) {
            *slot += value;
        }
        for child in self.children.values() {
            child.accumulate(out);
        }
    }

    pub fn has_own_values(&self) -> bool {
        self.values.iter().any(|v| *v != 0.0)
    }
}

impl From<SeriesView> for Series {
    fn from(value: SeriesView) -> Self {
        Self {
            values: value.values,
            children: value
                .series
                .into_iter()
                .map(|(name, child)| (name, child.into()))
                .collect(),
        }
    }
}

/// A report as the navigator sees it. Owned by the host; shared read-only.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub id: ReportId,
    pub title: String,
    pub subtitle: String,
    pub units: String,
    pub labels: Vec<String>,
    /// Name of the report's top level; doubles as the label of a level's
    /// own-values entry.
    pub top_level_account_name: String,
    /// Children of the top level.
    pub series: BTreeMap<String, Series>,
}

impl Report {
    pub fn new(id: i64, title: impl Into<String>, top_level_account_name: impl Into<String>) -> Self {
        Self {
            id: ReportId(id),
            title: title.into(),
            subtitle: String::new(),
            units: String::new(),
            labels: Vec::new(),
            top_level_account_name: top_level_account_name.into(),
            series: BTreeMap::new(),
        }
    }

    pub fn with_series(mut self, name: impl Into<String>, series: Series) -> Self {
        self.series.insert(name.into(), series);
        self
    }

    pub fn from_tabulation(tabulation: Tabulation) -> Self {
        Self {
            id: ReportId(tabulation.report_id),
            title: tabulation.title,
            subtitle: tabulation.subtitle,
            units: tabulation.units,
            labels: tabulation.labels,
            top_level_account_name: DEFAULT_TOP_LEVEL_NAME.to_string(),
            series: tabulation
                .series
                .into_iter()
                .map(|(name, series)| (name, series.into()))
                .collect(),
        }
    }

    /// Series at the end of `path`; `Ok(None)` is the top level.
    pub fn series_at<'p, S: AsRef<str>>(
        &self,
        path: &'p [S],
    ) -> Result<Option<&Series>, &'p str> {
        descend(&self.series, path, |s| &s.children)
    }

    /// Child map of the level at the end of `path`.
    pub fn children_at<S: AsRef<str>>(&self, path: &[S]) -> Option<&BTreeMap<String, Series>> {
        match self.series_at(path) {
            Ok(Some(series)) => Some(&series.children),
            Ok(None) => Some(&self.series),
            Err(_) => None,
        }
    }

    pub fn child_names<S: AsRef<str>>(&self, path: &[S]) -> Vec<&str> {
        self.children_at(path)
            .map(|children| children.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn has_child<S: AsRef<str>>(&self, path: &[S], name: &str) -> bool {
        self.children_at(path)
            .is_some_and(|children| children.contains_key(name))
    }
}
