//! Drill-down navigation over a report's series tree.
//!
//! The navigation state is a report plus the list of series names walked
//! from its top level down to the series being displayed. Every transition
//! borrows the current snapshot and returns a new one, so a snapshot handed to
//! a renderer stays valid whatever happens next. A rejected transition returns
//! an error and leaves nothing changed.
//!
//! Traversals are validated against the report whenever one is accepted from
//! outside, so a [`SelectedReport`] always describes a real descent path.

use std::sync::Arc;

use serde::Serialize;

use crate::{
    error::NavigationError,
    reports::{Report, Series},
};

/// One entry of the breadcrumb trail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Breadcrumb<'a> {
    /// Target for [`SelectedReport::breadcrumb_to`].
    pub level: usize,
    pub label: &'a str,
    /// The level currently displayed; not a jump target.
    pub current: bool,
}

/// Chart entry for the displayed level.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartRow {
    pub name: String,
    pub values: Vec<f64>,
    /// Whether selecting this row can drill further.
    pub selectable: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectedReport {
    report: Arc<Report>,
    series_traversal: Vec<String>,
}

impl SelectedReport {
    /// Starts at the report's top level.
    pub fn new(report: Arc<Report>) -> Self {
        Self {
            report,
            series_traversal: Vec::new(),
        }
    }

    /// Starts at an arbitrary level, rejecting paths the report doesn't have.
    pub fn with_traversal(
        report: Arc<Report>,
        series_traversal: Vec<String>,
    ) -> Result<Self, NavigationError> {
        if let Err(missing) = report.series_at(&series_traversal) {
            tracing::warn!(report = %report.id, series = missing, "rejected traversal");
            return Err(NavigationError::InvalidTraversal(missing.to_string()));
        }
        Ok(Self {
            report,
            series_traversal,
        })
    }

    pub fn report(&self) -> &Arc<Report> {
        &self.report
    }

    pub fn series_traversal(&self) -> &[String] {
        &self.series_traversal
    }

    pub fn depth(&self) -> usize {
        self.series_traversal.len()
    }

    /// Name of the displayed series; the top level uses the report's
    /// top-level account name.
    pub fn current_name(&self) -> &str {
        self.series_traversal
            .last()
            .map(String::as_str)
            .unwrap_or(self.report.top_level_account_name.as_str())
    }

    /// Displayed series, `None` at the top level.
    pub fn current_series(&self) -> Option<&Series> {
        self.report.series_at(&self.series_traversal).ok().flatten()
    }

    pub fn child_names(&self) -> Vec<&str> {
        self.report.child_names(&self.series_traversal)
    }

    pub fn drill_into(&self, series: &str) -> Result<Self, NavigationError> {
        if series == self.current_name() || series == self.report.top_level_account_name {
            return Ok(self.clone());
        }
        if !self.report.has_child(&self.series_traversal, series) {
            tracing::warn!(
                report = %self.report.id,
                parent = self.current_name(),
                series,
                "rejected drill-down"
            );
            return Err(NavigationError::UnknownSeries {
                parent: self.current_name().to_string(),
                series: series.to_string(),
            });
        }

        let mut series_traversal = Vec::with_capacity(self.series_traversal.len() + 1);
        series_traversal.extend_from_slice(&self.series_traversal);
        series_traversal.push(series.to_string());
        tracing::debug!(report = %self.report.id, depth = series_traversal.len(), "drilled into {series}");
        Ok(Self {
            report: Arc::clone(&self.report),
            series_traversal,
        })
    }

    /// Jumps back to ancestor level `index` (0 is the report's top level).
    pub fn breadcrumb_to(&self, index: usize) -> Result<Self, NavigationError> {
        let depth = self.depth();
        if index > depth {
            return Err(NavigationError::BreadcrumbOutOfRange { index, depth });
        }
        Ok(Self {
            report: Arc::clone(&self.report),
            series_traversal: self.series_traversal[..index].to_vec(),
        })
    }

    /// Label of breadcrumb `level`: the report title for 0, else the series
    /// entered at that level.
    pub fn title_for(&self, level: usize) -> Option<&str> {
        match level {
            0 => Some(self.report.title.as_str()),
            n => self.series_traversal.get(n - 1).map(String::as_str),
        }
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb<'_>> {
        let depth = self.depth();
        (0..=depth)
            .filter_map(|level| {
                self.title_for(level).map(|label| Breadcrumb {
                    level,
                    label,
                    current: level == depth,
                })
            })
            .collect()
    }

    /// Rows to chart for the displayed level: one per child series with its
    /// subtree totals, preceded by the level's own values when it has any.
    pub fn chart_rows(&self) -> Vec<ChartRow> {
        let labels = self.report.labels.len();
        let mut rows = Vec::new();

        if let Some(series) = self.current_series().filter(|s| s.has_own_values()) {
            let mut values = series.values.clone();
            values.resize(labels, 0.0);
            rows.push(ChartRow {
                name: self.report.top_level_account_name.clone(),
                values,
                selectable: false,
            });
        }

        if let Some(children) = self.report.children_at(&self.series_traversal) {
            rows.extend(children.iter().map(|(name, child)| ChartRow {
                name: name.clone(),
                values: child.totals(labels),
                selectable: !child.children.is_empty(),
            }));
        }
        rows
    }
}

/// Report navigation state: nothing selected, or a [`SelectedReport`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportNavigator {
    selected: Option<SelectedReport>,
}

impl ReportNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&SelectedReport> {
        self.selected.as_ref()
    }

    pub fn series_traversal(&self) -> &[String] {
        self.selected
            .as_ref()
            .map(SelectedReport::series_traversal)
            .unwrap_or_default()
    }

    /// Replaces the state wholesale. An empty traversal shows the top level.
    pub fn select_report(
        &self,
        report: Arc<Report>,
        series_traversal: Vec<String>,
    ) -> Result<Self, NavigationError> {
        tracing::debug!(report = %report.id, depth = series_traversal.len(), "report selected");
        Ok(Self {
            selected: Some(SelectedReport::with_traversal(report, series_traversal)?),
        })
    }

    pub fn drill_into(&self, series: &str) -> Result<Self, NavigationError> {
        let selected = self.selected.as_ref().ok_or(NavigationError::NoReport)?;
        Ok(Self {
            selected: Some(selected.drill_into(series)?),
        })
    }

    pub fn breadcrumb_to(&self, index: usize) -> Result<Self, NavigationError> {
        let selected = self.selected.as_ref().ok_or(NavigationError::NoReport)?;
        Ok(Self {
            selected: Some(selected.breadcrumb_to(index)?),
        })
    }

    pub fn title_for(&self, level: usize) -> Option<&str> {
        self.selected.as_ref()?.title_for(level)
    }

    /// Applies freshly fetched report data.
    ///
    /// With nothing selected the report becomes active at its top level. A
    /// new version of the active report keeps the longest prefix of the
    /// current traversal that still exists. Other reports leave the state
    /// alone.
    pub fn refresh(&self, report: Arc<Report>) -> Self {
        let Some(selected) = &self.selected else {
            return Self {
                selected: Some(SelectedReport::new(report)),
            };
        };
        if selected.report.id != report.id {
            return self.clone();
        }

        let mut series_traversal: Vec<String> = Vec::new();
        for name in &selected.series_traversal {
            if !report.has_child(&series_traversal, name) {
                tracing::debug!(report = %report.id, series = name.as_str(), "traversal truncated on refresh");
                break;
            }
            series_traversal.push(name.clone());
        }
        Self {
            selected: Some(SelectedReport {
                report,
                series_traversal,
            }),
        }
    }
}
