use crate::cli::UserCommands;
use crate::support::{load_store_or_exit, user_json};
use chrono::Utc;
use civiclens_engage::EngageError;
use civiclens_engage::validate::clean_username;
use civiclens_store::{StateStoreError, User, mutate_state_jsonl};
use serde_json::json;

pub fn run(command: UserCommands) {
    match command {
        UserCommands::Add {
            username,
            id,
            state,
            json,
        } => run_add(username, id, state, json),

        UserCommands::List { state, json } => run_list(state, json),
    }
}

fn run_add(username: String, id: Option<String>, state: String, json_output: bool) {
    let persisted = mutate_state_jsonl::<_, EngageError, _>(&state, |store| {
        let username = clean_username(&username)?;
        let mut user = User::new(username, Utc::now());
        if let Some(id) = &id {
            user.id = id.clone();
        }
        let snapshot = user.clone();
        store.insert_user(user).map_err(|err| match err {
            StateStoreError::UsernameTaken(name) => {
                EngageError::Validation(format!("username already taken: {name}"))
            }
            StateStoreError::DuplicateId(id) => {
                EngageError::Validation(format!("user id already exists: {id}"))
            }
            other => EngageError::Validation(other.to_string()),
        })?;
        Ok((snapshot, true))
    })
    .unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if json_output {
        let payload = json!({
            "action": "user.add",
            "statePath": state,
            "user": user_json(&persisted)
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!(
            "civiclens user add\n  Added: {} ({})\n  Path: {}",
            persisted.username, persisted.id, state
        );
    }
}

fn run_list(state: String, json_output: bool) {
    let (store, path) = load_store_or_exit(&state);
    let rows: Vec<&User> = store.users().collect();

    if json_output {
        let items = rows.iter().map(|user| user_json(user)).collect::<Vec<_>>();
        let payload = json!({
            "action": "user.list",
            "statePath": path.display().to_string(),
            "count": items.len(),
            "items": items
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!(
            "civiclens user list\n  Path: {}\n  Count: {}",
            path.display(),
            rows.len()
        );
        for user in rows {
            println!(
                "  - {} ({}) trust {}",
                user.username, user.id, user.trust_score
            );
        }
    }
}
