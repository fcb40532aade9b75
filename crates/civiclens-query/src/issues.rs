//! Filtered issue listings.

use civiclens_core::IssueStatus;
use civiclens_store::{Issue, StateStore};

/// Filters for the issue list read path. An empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    pub status: Option<IssueStatus>,
    /// Exact category token.
    pub category: Option<String>,
    /// Case-insensitive substring over `area_name`.
    pub area: Option<String>,
    pub reporter_id: Option<String>,
}

/// List issues newest first with optional filters and paging.
/// Id breaks creation-time ties so pages stay stable.
pub fn list_issues<'a>(
    store: &'a StateStore,
    filter: &IssueFilter,
    skip: usize,
    limit: usize,
) -> Vec<&'a Issue> {
    let area_needle = filter.area.as_ref().map(|a| a.to_lowercase());

    let mut rows: Vec<&Issue> = store
        .issues()
        .filter(|issue| {
            if let Some(status) = filter.status
                && issue.status != status
            {
                return false;
            }
            if let Some(category) = &filter.category
                && issue.category != *category
            {
                return false;
            }
            if let Some(needle) = &area_needle {
                match &issue.area_name {
                    Some(area) if area.to_lowercase().contains(needle) => {}
                    _ => return false,
                }
            }
            if let Some(reporter) = &filter.reporter_id
                && issue.reporter_id != *reporter
            {
                return false;
            }
            true
        })
        .collect();

    rows.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    rows.into_iter().skip(skip).take(limit).collect()
}
