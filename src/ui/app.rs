use crate::checker::{
    export_corrected, CheckRequest, Completion, Job, Outcome, Report, Rule, UploadRequest,
};
use crate::ui::theme::Theme;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Inline message shown in the file panel when upload is pressed with no file
pub const NO_FILE_MESSAGE: &str = "Please select a file to upload.";

/// Which input panel is visible, and which endpoint a submit uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Text,
    File,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Rules,
    Input,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// Owns all UI state. Every mutation goes through a method here; the draw
/// loop re-renders everything from this struct each frame.
pub struct App {
    pub rules: Vec<Rule>,
    pub selected: BTreeSet<String>,
    pub mode: Mode,
    pub focus: FocusPane,
    pub editing: bool,
    pub input_text: String,
    pub file_path: String,
    /// Name of the last file handed to the dispatcher
    pub file_label: Option<String>,
    pub file_error: Option<String>,
    pub report: Option<Report>,
    pub rule_cursor: usize,
    pub results_scroll: u16,
    pub status: Option<StatusMessage>,
    pub check_in_flight: bool,
    pub rules_in_flight: bool,
    pub export_dir: PathBuf,
    pub server_url: String,
    pub theme: Theme,
    pub should_quit: bool,
}

impl App {
    pub fn new(server_url: String, export_dir: PathBuf, theme: Theme) -> Self {
        Self {
            rules: Vec::new(),
            selected: BTreeSet::new(),
            mode: Mode::Text,
            focus: FocusPane::Rules,
            editing: false,
            input_text: String::new(),
            file_path: String::new(),
            file_label: None,
            file_error: None,
            report: None,
            rule_cursor: 0,
            results_scroll: 0,
            status: None,
            check_in_flight: false,
            rules_in_flight: false,
            export_dir,
            server_url,
            theme,
            should_quit: false,
        }
    }

    // -- Rule registry --

    /// Ask for the rule list. `None` while a fetch is already running.
    pub fn load_rules(&mut self) -> Option<Job> {
        if self.rules_in_flight {
            return None;
        }
        self.rules_in_flight = true;
        self.info("Loading rules…");
        Some(Job::LoadRules)
    }

    fn set_rules(&mut self, rules: Vec<Rule>) {
        self.selected
            .retain(|name| rules.iter().any(|r| &r.name == name));
        self.rules = rules;
        self.rule_cursor = self.rule_cursor.min(self.rules.len().saturating_sub(1));
    }

    // -- Selection --

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    pub fn select(&mut self, name: &str) {
        self.selected.insert(name.to_string());
    }

    pub fn toggle(&mut self, name: &str) {
        if !self.selected.remove(name) {
            self.selected.insert(name.to_string());
        }
        tracing::debug!(selected = ?self.selected, "toggled rule");
    }

    /// Toggle the rule under the cursor.
    pub fn toggle_current(&mut self) {
        if let Some(name) = self.rules.get(self.rule_cursor).map(|r| r.name.clone()) {
            self.toggle(&name);
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.rules.iter().map(|r| r.name.clone()).collect();
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Selected rule names as sent to the service.
    pub fn selected_rules(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    pub fn next_rule(&mut self) {
        if !self.rules.is_empty() {
            self.rule_cursor = (self.rule_cursor + 1) % self.rules.len();
        }
    }

    pub fn previous_rule(&mut self) {
        if !self.rules.is_empty() {
            if self.rule_cursor > 0 {
                self.rule_cursor -= 1;
            } else {
                self.rule_cursor = self.rules.len() - 1;
            }
        }
    }

    // -- Mode and input --

    /// Typed text and the chosen file survive mode switches.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        if mode == Mode::Text {
            self.file_error = None;
        }
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(match self.mode {
            Mode::Text => Mode::File,
            Mode::File => Mode::Text,
        });
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::Rules => FocusPane::Input,
            FocusPane::Input => {
                if self.report.is_some() {
                    FocusPane::Results
                } else {
                    FocusPane::Rules
                }
            }
            FocusPane::Results => FocusPane::Rules,
        };
    }

    pub fn enter_editing(&mut self) {
        self.editing = true;
        self.focus = FocusPane::Input;
    }

    pub fn exit_editing(&mut self) {
        self.editing = false;
    }

    fn active_input(&mut self) -> &mut String {
        match self.mode {
            Mode::Text => &mut self.input_text,
            Mode::File => &mut self.file_path,
        }
    }

    pub fn input_push_char(&mut self, c: char) {
        self.active_input().push(c);
    }

    pub fn input_pop_char(&mut self) {
        self.active_input().pop();
    }

    // -- Submission --

    /// Submit the active panel.
    pub fn submit(&mut self) -> Option<Job> {
        match self.mode {
            Mode::Text => self.submit_text(),
            Mode::File => self.submit_file(),
        }
    }

    /// Empty or whitespace-only text is silently ignored.
    pub fn submit_text(&mut self) -> Option<Job> {
        let text = self.input_text.trim().to_string();
        if text.is_empty() {
            return None;
        }
        let request = CheckRequest {
            text,
            rules: self.selected_rules(),
        };
        self.begin_check()?;
        tracing::info!(rules = request.rules.len(), "submitting text");
        Some(Job::Check(request))
    }

    /// With no file chosen, shows the inline file error instead.
    pub fn submit_file(&mut self) -> Option<Job> {
        let path = self.file_path.trim().to_string();
        if path.is_empty() {
            self.file_error = Some(NO_FILE_MESSAGE.to_string());
            return None;
        }
        self.file_error = None;

        let path = PathBuf::from(path);
        let request = UploadRequest {
            rules: self.selected_rules(),
            path,
        };
        self.begin_check()?;
        self.file_label = Some(display_file_name(&request.path));
        tracing::info!(file = %request.path.display(), rules = request.rules.len(), "submitting file");
        Some(Job::Upload(request))
    }

    fn begin_check(&mut self) -> Option<()> {
        if self.check_in_flight {
            self.info("A check is already running");
            return None;
        }
        self.check_in_flight = true;
        self.info("Checking…");
        Some(())
    }

    /// Apply a finished job. Failures never touch the current report.
    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::RulesLoaded(outcome) => {
                self.rules_in_flight = false;
                match outcome {
                    Outcome::Success(rules) => {
                        let count = rules.len();
                        self.set_rules(rules);
                        self.info(format!("Loaded {} rules", count));
                    }
                    Outcome::Failure(reason) => {
                        self.error(format!("Could not load rules: {}", reason));
                    }
                }
            }
            Completion::Checked(outcome) => {
                self.check_in_flight = false;
                match outcome {
                    Outcome::Success(result) => {
                        let report = Report::new(result);
                        self.info(format!("Found {} errors", report.error_count()));
                        self.report = Some(report);
                        self.results_scroll = 0;
                    }
                    Outcome::Failure(reason) => {
                        self.error(format!("Check failed: {}", reason));
                    }
                }
            }
        }
    }

    // -- Results --

    pub fn scroll_results_up(&mut self) {
        self.results_scroll = self.results_scroll.saturating_sub(1);
    }

    pub fn scroll_results_down(&mut self) {
        let rows = self.report.as_ref().map_or(0, Report::content_rows);
        let last = u16::try_from(rows.saturating_sub(1)).unwrap_or(u16::MAX);
        if self.results_scroll < last {
            self.results_scroll += 1;
        }
    }

    /// Write the corrected text of the current report. No-op without one.
    pub fn export(&mut self) -> Option<PathBuf> {
        let result = self.report.as_ref().map(|r| &r.result);
        match export_corrected(result, &self.export_dir) {
            Ok(Some(path)) => {
                self.info(format!("Exported to {}", path.display()));
                Some(path)
            }
            Ok(None) => None,
            Err(e) => {
                let reason = format!("{:#}", e);
                tracing::warn!(%reason, "export failed");
                self.error(format!("Export failed: {}", reason));
                None
            }
        }
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next().clone();
        self.info(format!("Theme: {}", self.theme.name));
    }

    // -- Status line --

    pub fn info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Error,
            text: text.into(),
        });
    }
}

fn display_file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
