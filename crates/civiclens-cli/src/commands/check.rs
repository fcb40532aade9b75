use crate::support::load_store_or_exit;
use civiclens_store::check_engagement_state;
use serde_json::json;

pub fn run(state: String, json_output: bool) {
    let (store, path) = load_store_or_exit(&state);
    let report = check_engagement_state(&store);

    if json_output {
        let payload = json!({
            "action": "check",
            "statePath": path.display().to_string(),
            "report": report
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!(
            "[engagement] {} (issues={}, votes={}, errors={}, warnings={})",
            if report.accepted() { "OK" } else { "FAIL" },
            report.summary.issue_count,
            report.summary.vote_count,
            report.summary.error_count,
            report.summary.warning_count
        );
        for finding in &report.errors {
            println!(
                "  - {} {} ({})",
                finding.subject_id, finding.class, finding.message
            );
        }
        for finding in &report.warnings {
            println!(
                "  - WARN {} {} ({})",
                finding.subject_id, finding.class, finding.message
            );
        }
    }

    if !report.accepted() {
        std::process::exit(1);
    }
}
