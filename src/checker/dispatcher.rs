//! # Request Dispatcher
//!
//! Runs [`Job`]s against a [`CheckService`] on the tokio runtime and posts
//! one [`Completion`] per job to a channel the UI loop drains. Nothing in the
//! UI waits on the network.

use crate::checker::client::CheckService;
use crate::checker::model::{CheckRequest, CheckResult, Rule, UploadRequest};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Work the UI asks the dispatcher to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    LoadRules,
    Check(CheckRequest),
    Upload(UploadRequest),
}

/// Result of a network operation as seen by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Failure(String),
}

impl<T> Outcome<T> {
    fn from_result(result: anyhow::Result<T>, what: &str) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(e) => {
                let reason = format!("{:#}", e);
                tracing::warn!(operation = what, %reason, "request failed");
                Outcome::Failure(reason)
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// A finished job, tagged by what it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    RulesLoaded(Outcome<Vec<Rule>>),
    Checked(Outcome<CheckResult>),
}

/// Spawns jobs and hands their completions back over a channel.
#[derive(Clone)]
pub struct Dispatcher {
    service: Arc<dyn CheckService>,
    tx: UnboundedSender<Completion>,
}

impl Dispatcher {
    /// Create a dispatcher and the receiving end of its completion channel.
    pub fn new(service: Arc<dyn CheckService>) -> (Self, UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { service, tx }, rx)
    }

    /// Run `job` in the background. Must be called from within a tokio runtime.
    pub fn dispatch(&self, job: Job) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let completion = run_job(service.as_ref(), job).await;
            if tx.send(completion).is_err() {
                tracing::debug!("completion dropped, receiver closed");
            }
        });
    }
}

/// Run one job to completion. Upload responses are normalized here.
pub async fn run_job(service: &dyn CheckService, job: Job) -> Completion {
    match job {
        Job::LoadRules => {
            let result = service.fetch_rules().await;
            if let Ok(rules) = &result {
                tracing::info!(count = rules.len(), "rules loaded");
            }
            Completion::RulesLoaded(Outcome::from_result(result, "get_rules"))
        }
        Job::Check(request) => {
            let result = service.check(&request).await;
            Completion::Checked(Outcome::from_result(result, "check"))
        }
        Job::Upload(request) => {
            let result = service
                .upload(&request)
                .await
                .map(CheckResult::normalize_upload);
            Completion::Checked(Outcome::from_result(result, "upload"))
        }
    }
}
