use crate::support::load_store_or_exit;
use civiclens_engage::top_users;
use serde_json::json;

pub fn run(limit: i64, state: String, json_output: bool) {
    let (store, path) = load_store_or_exit(&state);
    let entries = top_users(&store, limit).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if json_output {
        let payload = json!({
            "action": "leaderboard",
            "statePath": path.display().to_string(),
            "count": entries.len(),
            "items": entries
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!(
            "civiclens leaderboard\n  Path: {}\n  Count: {}",
            path.display(),
            entries.len()
        );
        for (rank, entry) in entries.iter().enumerate() {
            println!(
                "  {}. {} [upvotes {}, issues {}, trust {}]",
                rank + 1,
                entry.username,
                entry.total_upvotes,
                entry.total_issues,
                entry.trust_score
            );
        }
    }
}
