//! Issue creation.
//!
//! A report is accepted only after the full gauntlet: field validation,
//! reporter lookup, then duplicate detection against every issue inside
//! the policy radius. Proximity answers come from a [`ProximitySource`];
//! if that source cannot answer, creation fails closed rather than
//! risking a duplicate. Acceptance persists the issue row and the
//! reporter's trust award together.

use std::path::Path;

use chrono::{DateTime, Utc};
use civiclens_core::{GeoPoint, titles_match};
use civiclens_query::{GeoIndex, ProximitySource};
use civiclens_store::{Issue, StateStore, mutate_state_jsonl};

use crate::error::{EngageError, EngageJsonlError};
use crate::policy::EngagementPolicy;
use crate::validate::{
    check_location, clean_category, clean_description, clean_optional_text, clean_title,
};

/// Everything a new report carries.
#[derive(Debug, Clone)]
pub struct CreateIssueRequest {
    pub reporter_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub area_name: Option<String>,
    pub image_url: Option<String>,
    pub now: DateTime<Utc>,
}

impl CreateIssueRequest {
    pub fn new(
        reporter_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            reporter_id: reporter_id.into(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            subcategory: None,
            latitude,
            longitude,
            area_name: None,
            image_url: None,
            now: Utc::now(),
        }
    }
}

/// Create one issue against in-memory state.
///
/// Rejections happen in validation order: field shape, reporter
/// existence, proximity availability, duplicate match. An `Err` from
/// any step leaves the store untouched.
pub fn create_issue(
    store: &mut StateStore,
    proximity: &impl ProximitySource,
    policy: &EngagementPolicy,
    request: &CreateIssueRequest,
) -> Result<Issue, EngageError> {
    let title = clean_title(&request.title)?;
    let description = clean_description(&request.description)?;
    let category = clean_category(&request.category)?;
    let location = check_location(GeoPoint::new(request.latitude, request.longitude))?;

    if store.user(&request.reporter_id).is_none() {
        return Err(EngageError::UserNotFound(request.reporter_id.clone()));
    }

    let nearby = proximity
        .issues_within(location, policy.duplicate_radius_meters)
        .map_err(|err| EngageError::GeoUnavailable(err.to_string()))?;
    if let Some(conflict) = nearby
        .iter()
        .find(|candidate| titles_match(&title, &candidate.title))
    {
        tracing::debug!(
            conflict_id = %conflict.issue_id,
            distance_meters = conflict.distance_meters,
            "report rejected as duplicate"
        );
        return Err(EngageError::DuplicateIssue {
            conflict_id: conflict.issue_id.clone(),
        });
    }

    let mut issue = Issue::new(
        title,
        description,
        category,
        &request.reporter_id,
        location,
        request.now,
    );
    issue.subcategory = clean_optional_text(request.subcategory.as_deref());
    issue.area_name = clean_optional_text(request.area_name.as_deref());
    issue.image_url = request
        .image_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string);

    let reporter = store
        .user_mut(&request.reporter_id)
        .ok_or_else(|| EngageError::UserNotFound(request.reporter_id.clone()))?;
    reporter.trust_score += policy.trust_award_issue_reported;

    tracing::debug!(issue_id = %issue.id, reporter_id = %issue.reporter_id, "issue reported");
    store.upsert_issue(issue.clone());
    Ok(issue)
}

/// Lock-scoped creation against a state JSONL path.
///
/// The proximity index hydrates from the same locked snapshot the
/// mutation sees, so a concurrent report cannot slip past the
/// duplicate check.
pub fn create_issue_jsonl(
    path: impl AsRef<Path>,
    policy: &EngagementPolicy,
    request: &CreateIssueRequest,
) -> Result<Issue, EngageJsonlError> {
    mutate_state_jsonl(path, |store| {
        let index = GeoIndex::hydrate(store);
        let issue = create_issue(store, &index, policy, request)?;
        Ok((issue, true))
    })
}
