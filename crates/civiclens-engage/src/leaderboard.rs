//! Validated entry point over the community ranking.

use civiclens_query::LeaderboardEntry;
use civiclens_store::StateStore;

use crate::error::EngageError;
use crate::validate::check_page_limit;

/// Top contributors by received upvotes. Rejects non-positive limits;
/// ranking itself lives in the query layer.
pub fn top_users(store: &StateStore, limit: i64) -> Result<Vec<LeaderboardEntry>, EngageError> {
    let limit = check_page_limit(limit)?;
    Ok(civiclens_query::top_users(store, limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use civiclens_store::User;

    #[test]
    fn limit_must_be_positive() {
        let store = StateStore::default();
        assert!(matches!(
            top_users(&store, 0),
            Err(EngageError::Validation(_))
        ));
    }

    #[test]
    fn delegates_to_the_ranking() {
        let now = Utc
            .with_ymd_and_hms(2025, 3, 10, 9, 0, 0)
            .single()
            .expect("fixed time");
        let mut store = StateStore::default();
        store.insert_user(User::new("maria_p", now)).expect("fresh user");
        store.insert_user(User::new("joao_s", now)).expect("fresh user");

        let rows = top_users(&store, 1).expect("valid limit");
        assert_eq!(rows.len(), 1);
    }
}
