//! Dispatcher and rendering tests
//!
//! Drives jobs through a recording [`CheckService`] to check what reaches the
//! network, then renders the resulting app state into a test terminal.

use anyhow::{bail, Result};
use async_trait::async_trait;
use proofread::checker::{
    run_job, CheckRequest, CheckResult, CheckService, Completion, Dispatcher, Job, Outcome, Rule,
    Stats, TextError, UploadRequest,
};
use proofread::ui::app::Mode;
use proofread::ui::theme::Theme;
use proofread::ui::{self, App};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records every call and answers with canned data.
#[derive(Default)]
struct RecordingService {
    calls: Mutex<Vec<String>>,
    fail_rules: bool,
}

impl RecordingService {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CheckService for RecordingService {
    async fn fetch_rules(&self) -> Result<Vec<Rule>> {
        self.calls.lock().unwrap().push("get_rules".to_string());
        if self.fail_rules {
            bail!("connection refused");
        }
        Ok(vec![Rule::new("spelling"), Rule::new("grammar")])
    }

    async fn check(&self, request: &CheckRequest) -> Result<CheckResult> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("check:{}:{}", request.text, request.rules.join(",")));
        Ok(CheckResult {
            original_text: request.text.clone(),
            corrected_text: request.text.replace("teh", "the"),
            errors: vec![TextError::new("teh", "the")],
            stats: Stats {
                total_errors: 1,
                error_types: [("spelling".to_string(), 2), ("grammar".to_string(), 1)]
                    .into_iter()
                    .collect(),
            },
            filename: None,
        })
    }

    async fn upload(&self, request: &UploadRequest) -> Result<CheckResult> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("upload:{}", request.path.display()));
        Ok(CheckResult {
            original_text: "teh adn".to_string(),
            corrected_text: "the and".to_string(),
            errors: vec![TextError::new("teh", "the"), TextError::new("adn", "and")],
            // the upload endpoint's own total is not trusted
            stats: Stats {
                total_errors: 0,
                error_types: [("spelling".to_string(), 2)].into_iter().collect(),
            },
            filename: Some("notes.txt".to_string()),
        })
    }
}

fn test_app() -> App {
    App::new(
        "http://127.0.0.1:5000".to_string(),
        PathBuf::from("."),
        Theme::default_theme().clone(),
    )
}

fn screen(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[tokio::test]
async fn test_empty_text_never_reaches_network() {
    let service = RecordingService::default();
    let mut app = test_app();
    app.input_text = "   ".to_string();

    if let Some(job) = app.submit() {
        run_job(&service, job).await;
    }
    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn test_missing_file_never_reaches_network() {
    let service = RecordingService::default();
    let mut app = test_app();
    app.set_mode(Mode::File);

    if let Some(job) = app.submit() {
        run_job(&service, job).await;
    }
    assert!(service.calls().is_empty());
    assert!(app.file_error.is_some());
}

#[tokio::test]
async fn test_check_job_sends_text_and_rules() {
    let service = RecordingService::default();
    let mut app = test_app();
    app.apply(run_job(&service, Job::LoadRules).await);
    app.select_all();
    app.input_text = "teh cat".to_string();

    let job = app.submit().expect("job");
    let completion = run_job(&service, job).await;
    app.apply(completion);

    assert_eq!(
        service.calls(),
        vec!["get_rules", "check:teh cat:grammar,spelling"]
    );
    assert_eq!(app.report.as_ref().map(|r| r.error_count()), Some(1));
}

#[tokio::test]
async fn test_upload_job_normalizes_total() {
    let service = RecordingService::default();
    let completion = run_job(
        &service,
        Job::Upload(UploadRequest {
            path: PathBuf::from("notes.txt"),
            rules: vec!["spelling".to_string()],
        }),
    )
    .await;

    match completion {
        Completion::Checked(Outcome::Success(result)) => {
            assert_eq!(result.stats.total_errors, 2);
            assert_eq!(result.filename.as_deref(), Some("notes.txt"));
        }
        other => panic!("expected a successful check, got {:?}", other),
    }
    assert_eq!(service.calls(), vec!["upload:notes.txt"]);
}

#[tokio::test]
async fn test_failure_becomes_outcome() {
    let service = RecordingService {
        fail_rules: true,
        ..Default::default()
    };
    let completion = run_job(&service, Job::LoadRules).await;
    assert_eq!(
        completion,
        Completion::RulesLoaded(Outcome::Failure("connection refused".to_string()))
    );
}

#[tokio::test]
async fn test_dispatcher_posts_completion() {
    let service = Arc::new(RecordingService::default());
    let (dispatcher, mut completions) = Dispatcher::new(service.clone());

    dispatcher.dispatch(Job::LoadRules);
    let completion = tokio::time::timeout(Duration::from_secs(5), completions.recv())
        .await
        .expect("completion in time")
        .expect("channel open");

    match completion {
        Completion::RulesLoaded(outcome) => assert!(outcome.is_success()),
        other => panic!("expected rules, got {:?}", other),
    }
    assert_eq!(service.calls(), vec!["get_rules"]);
}

#[tokio::test]
async fn test_rendered_results_show_count_breakdown_and_texts() {
    let service = RecordingService::default();
    let mut app = test_app();
    app.apply(run_job(&service, Job::LoadRules).await);
    app.toggle("spelling");
    app.input_text = "teh cat".to_string();
    let job = app.submit().expect("job");
    app.apply(run_job(&service, job).await);

    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    terminal.draw(|f| ui::render(f, &app)).unwrap();
    let screen = screen(&terminal);

    assert!(screen.contains("Errors: 1"));
    assert!(screen.contains("Error Types:"));
    let spelling = screen.find("spelling: 2").expect("spelling line");
    let grammar = screen.find("grammar: 1").expect("grammar line");
    assert!(spelling < grammar, "breakdown keeps the service's order");
    assert!(screen.contains("teh → the"));
    assert!(screen.contains("the cat"));
    assert!(screen.contains("[x] spelling"));
    assert!(screen.contains("[ ] grammar"));
}

#[test]
fn test_rendered_file_error_is_visible() {
    let mut app = test_app();
    app.set_mode(Mode::File);
    app.submit();

    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    terminal.draw(|f| ui::render(f, &app)).unwrap();
    assert!(screen(&terminal).contains("Please select a file to upload."));
}
