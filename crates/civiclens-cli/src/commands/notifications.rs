use crate::cli::NotificationsCommands;
use crate::support::{load_store_or_exit, notification_json};
use civiclens_engage::{
    EngagementPolicy, clear_notifications_jsonl, load_policy_toml, mark_notification_read_jsonl,
    notifications_for,
};
use serde_json::json;

pub fn run(command: NotificationsCommands) {
    match command {
        NotificationsCommands::List {
            recipient,
            skip,
            limit,
            policy,
            state,
            json,
        } => run_list(recipient, skip, limit, policy, state, json),

        NotificationsCommands::MarkRead {
            id,
            actor,
            state,
            json,
        } => run_mark_read(id, actor, state, json),

        NotificationsCommands::Clear { actor, state, json } => run_clear(actor, state, json),
    }
}

fn run_list(
    recipient: String,
    skip: usize,
    limit: Option<i64>,
    policy: Option<String>,
    state: String,
    json_output: bool,
) {
    let policy = match &policy {
        Some(path) => load_policy_toml(path).unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(1);
        }),
        None => EngagementPolicy::default(),
    };
    let limit = limit.unwrap_or(policy.notification_page_limit);

    let (store, path) = load_store_or_exit(&state);
    let rows = notifications_for(&store, &recipient, skip, limit).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if json_output {
        let items = rows
            .iter()
            .map(|row| notification_json(row))
            .collect::<Vec<_>>();
        let payload = json!({
            "action": "notifications.list",
            "statePath": path.display().to_string(),
            "recipientId": recipient,
            "count": items.len(),
            "items": items
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!(
            "civiclens notifications list\n  Recipient: {}\n  Path: {}\n  Count: {}",
            recipient,
            path.display(),
            rows.len()
        );
        for row in &rows {
            println!(
                "  - {} [{}] {}: {}",
                row.id,
                if row.read { "read" } else { "unread" },
                row.title,
                row.message
            );
        }
    }
}

fn run_mark_read(id: String, actor: String, state: String, json_output: bool) {
    let row = mark_notification_read_jsonl(&state, &actor, &id).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if json_output {
        let payload = json!({
            "action": "notifications.mark-read",
            "statePath": state,
            "notification": notification_json(&row)
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!(
            "civiclens notifications mark-read\n  Marked: {}\n  Path: {}",
            row.id, state
        );
    }
}

fn run_clear(actor: String, state: String, json_output: bool) {
    let removed = clear_notifications_jsonl(&state, &actor).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if json_output {
        let payload = json!({
            "action": "notifications.clear",
            "statePath": state,
            "recipientId": actor,
            "removed": removed
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!(
            "civiclens notifications clear\n  Recipient: {}\n  Removed: {}\n  Path: {}",
            actor, removed, state
        );
    }
}
