use crate::cli::IssueCommands;
use crate::support::{
    comment_json, issue_json, load_store_or_exit, parse_status_or_exit, parse_vote_kind_or_exit,
};
use civiclens_engage::{
    CastVoteRequest, CreateIssueRequest, EngagementPolicy, RecordCommentRequest,
    UpdateStatusRequest, cast_vote_jsonl, create_issue_jsonl, load_policy_toml,
    record_comment_jsonl, update_status_jsonl,
};
use civiclens_query::{IssueFilter, list_issues};
use serde_json::json;

pub fn run(command: IssueCommands) {
    match command {
        IssueCommands::Report {
            title,
            description,
            category,
            subcategory,
            latitude,
            longitude,
            area_name,
            image_url,
            reporter,
            policy,
            state,
            json,
        } => run_report(ReportArgs {
            title,
            description,
            category,
            subcategory,
            latitude,
            longitude,
            area_name,
            image_url,
            reporter,
            policy,
            state,
            json,
        }),

        IssueCommands::List {
            status,
            category,
            area,
            reporter,
            skip,
            limit,
            state,
            json,
        } => run_list(status, category, area, reporter, skip, limit, state, json),

        IssueCommands::Show { id, state, json } => run_show(id, state, json),

        IssueCommands::SetStatus {
            id,
            status,
            actor,
            state,
            json,
        } => run_set_status(id, status, actor, state, json),

        IssueCommands::Vote {
            id,
            kind,
            voter,
            state,
            json,
        } => run_vote(id, kind, voter, state, json),

        IssueCommands::Comment {
            id,
            body,
            author,
            state,
            json,
        } => run_comment(id, body, author, state, json),

        IssueCommands::Comments { id, state, json } => run_comments(id, state, json),
    }
}

struct ReportArgs {
    title: String,
    description: String,
    category: String,
    subcategory: Option<String>,
    latitude: f64,
    longitude: f64,
    area_name: Option<String>,
    image_url: Option<String>,
    reporter: String,
    policy: Option<String>,
    state: String,
    json: bool,
}

fn run_report(args: ReportArgs) {
    let policy = match &args.policy {
        Some(path) => load_policy_toml(path).unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(1);
        }),
        None => EngagementPolicy::default(),
    };

    let mut request = CreateIssueRequest::new(
        &args.reporter,
        &args.title,
        &args.description,
        &args.category,
        args.latitude,
        args.longitude,
    );
    request.subcategory = args.subcategory.clone();
    request.area_name = args.area_name.clone();
    request.image_url = args.image_url.clone();

    let issue = create_issue_jsonl(&args.state, &policy, &request).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if args.json {
        let payload = json!({
            "action": "issue.report",
            "statePath": args.state,
            "issue": issue_json(&issue)
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!(
            "civiclens issue report\n  Reported: {} [{}]\n  Title: {}\n  Path: {}",
            issue.id,
            issue.status.as_str(),
            issue.title,
            args.state
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn run_list(
    status: Option<String>,
    category: Option<String>,
    area: Option<String>,
    reporter: Option<String>,
    skip: usize,
    limit: usize,
    state: String,
    json_output: bool,
) {
    let (store, path) = load_store_or_exit(&state);
    let filter = IssueFilter {
        status: status.as_deref().map(parse_status_or_exit),
        category,
        area,
        reporter_id: reporter,
    };
    let rows = list_issues(&store, &filter, skip, limit);

    if json_output {
        let items = rows.iter().map(|issue| issue_json(issue)).collect::<Vec<_>>();
        let payload = json!({
            "action": "issue.list",
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
            "civiclens issue list\n  Path: {}\n  Count: {}",
            path.display(),
            rows.len()
        );
        for issue in rows {
            println!(
                "  - {} [{}] +{}/-{} {}",
                issue.id,
                issue.status.as_str(),
                issue.upvotes,
                issue.downvotes,
                issue.title
            );
        }
    }
}

fn run_show(id: String, state: String, json_output: bool) {
    let (store, path) = load_store_or_exit(&state);
    let issue = store.issue(&id).unwrap_or_else(|| {
        eprintln!("error: issue not found: {id}");
        std::process::exit(1);
    });

    if json_output {
        let payload = json!({
            "action": "issue.show",
            "statePath": path.display().to_string(),
            "issue": issue_json(issue)
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!("civiclens issue show {id}");
        println!("  Title: {}", issue.title);
        println!("  Status: {}", issue.status.as_str());
        println!("  Category: {}", issue.category);
        if let Some(area) = &issue.area_name {
            println!("  Area: {area}");
        }
        println!("  Location: {}, {}", issue.latitude, issue.longitude);
        println!("  Votes: +{}/-{}", issue.upvotes, issue.downvotes);
        println!("  Reporter: {}", issue.reporter_id);
        println!("  Created: {}", issue.created_at);
        println!("  {}", issue.description);
    }
}

fn run_set_status(id: String, status: String, actor: String, state: String, json_output: bool) {
    let status = parse_status_or_exit(&status);
    let request = UpdateStatusRequest::new(actor, &id, status);

    let issue = update_status_jsonl(&state, &request).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if json_output {
        let payload = json!({
            "action": "issue.set-status",
            "statePath": state,
            "issue": issue_json(&issue)
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!(
            "civiclens issue set-status\n  Issue: {}\n  Status: {}\n  Path: {}",
            issue.id,
            issue.status.as_str(),
            state
        );
    }
}

fn run_vote(id: String, kind: String, voter: String, state: String, json_output: bool) {
    let kind = parse_vote_kind_or_exit(&kind);
    let request = CastVoteRequest::new(&id, voter, kind);

    let receipt = cast_vote_jsonl(&state, &request).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if json_output {
        let payload = json!({
            "action": "issue.vote",
            "statePath": state,
            "issueId": id,
            "receipt": receipt
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!(
            "civiclens issue vote\n  Issue: {}\n  Action: {}\n  Votes: +{}/-{}\n  Path: {}",
            id,
            receipt.action.as_str(),
            receipt.upvotes,
            receipt.downvotes,
            state
        );
    }
}

fn run_comment(id: String, body: String, author: String, state: String, json_output: bool) {
    let request = RecordCommentRequest::new(&id, author, body);

    let comment = record_comment_jsonl(&state, &request).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if json_output {
        let payload = json!({
            "action": "issue.comment",
            "statePath": state,
            "comment": comment_json(&comment)
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!(
            "civiclens issue comment\n  Issue: {}\n  Comment: {}\n  Path: {}",
            id, comment.id, state
        );
    }
}

fn run_comments(id: String, state: String, json_output: bool) {
    let (store, path) = load_store_or_exit(&state);
    if store.issue(&id).is_none() {
        eprintln!("error: issue not found: {id}");
        std::process::exit(1);
    }
    let rows = store.comments_of(&id);

    if json_output {
        let items = rows
            .iter()
            .map(|comment| comment_json(comment))
            .collect::<Vec<_>>();
        let payload = json!({
            "action": "issue.comments",
            "statePath": path.display().to_string(),
            "issueId": id,
            "count": items.len(),
            "items": items
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!(
            "civiclens issue comments {id}\n  Path: {}\n  Count: {}",
            path.display(),
            rows.len()
        );
        for comment in rows {
            println!("  - [{}] {}: {}", comment.created_at, comment.author_id, comment.body);
        }
    }
}
