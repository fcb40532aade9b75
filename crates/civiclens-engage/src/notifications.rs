//! Inbox operations, always scoped to one recipient.

use std::path::Path;

use civiclens_store::{Notification, StateStore, mutate_state_jsonl};

use crate::error::{EngageError, EngageJsonlError};
use crate::validate::check_page_limit;

/// Page one recipient's notifications, newest first.
pub fn notifications_for(
    store: &StateStore,
    recipient_id: &str,
    skip: usize,
    limit: i64,
) -> Result<Vec<Notification>, EngageError> {
    let limit = check_page_limit(limit)?;
    Ok(store
        .notifications_of(recipient_id)
        .into_iter()
        .skip(skip)
        .take(limit)
        .cloned()
        .collect())
}

/// Mark one notification read on behalf of `actor_id`.
///
/// A missing id and someone else's notification are different
/// rejections: the first is `NotificationNotFound`, the second
/// `Forbidden`. Re-marking an already-read row is a no-op success.
pub fn mark_notification_read(
    store: &mut StateStore,
    actor_id: &str,
    notification_id: &str,
) -> Result<Notification, EngageError> {
    let Some(row) = store.notification(notification_id) else {
        return Err(EngageError::NotificationNotFound(
            notification_id.to_string(),
        ));
    };
    if row.recipient_id != actor_id {
        return Err(EngageError::Forbidden(format!(
            "notification {notification_id} belongs to another recipient"
        )));
    }
    let row = store
        .notification_mut(notification_id)
        .ok_or_else(|| EngageError::NotificationNotFound(notification_id.to_string()))?;
    row.read = true;
    tracing::debug!(notification_id = %notification_id, "notification marked read");
    Ok(row.clone())
}

/// Drop every notification addressed to `actor_id`, returning how many
/// rows went away. Other recipients' rows are untouched.
pub fn clear_notifications(store: &mut StateStore, actor_id: &str) -> usize {
    let removed = store.remove_notifications_of(actor_id);
    tracing::debug!(recipient_id = %actor_id, removed, "inbox cleared");
    removed
}

/// Lock-scoped mark-read against a state JSONL path. Only a real flip
/// rewrites the file.
pub fn mark_notification_read_jsonl(
    path: impl AsRef<Path>,
    actor_id: &str,
    notification_id: &str,
) -> Result<Notification, EngageJsonlError> {
    mutate_state_jsonl(path, |store| {
        let was_read = store
            .notification(notification_id)
            .map(|row| row.read)
            .unwrap_or(false);
        let row = mark_notification_read(store, actor_id, notification_id)?;
        Ok((row, !was_read))
    })
}

/// Lock-scoped clear against a state JSONL path.
pub fn clear_notifications_jsonl(
    path: impl AsRef<Path>,
    actor_id: &str,
) -> Result<usize, EngageJsonlError> {
    mutate_state_jsonl(path, |store| {
        let removed = clear_notifications(store, actor_id);
        Ok::<_, EngageError>((removed, removed > 0))
    })
}
