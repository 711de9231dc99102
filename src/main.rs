//! # proofread CLI Entry Point
//!
//! A terminal client for a remote grammar and style checking service.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive TUI against the default server
//! proofread
//!
//! # Another server
//! proofread --server http://checker.local:5000
//!
//! # Headless: check a sentence with two rules and print HTML
//! proofread --check "teh cat" --rule spelling --rule grammar --format html
//!
//! # Headless: upload a file with every rule and write corrected_text.txt
//! proofread --upload notes.txt --all-rules --export
//!
//! # Print the rules the server offers
//! proofread --list-rules
//! ```
//!
//! ## Architecture
//!
//! 1. **Rules**: fetched once from `/get_rules` at startup
//! 2. **Selection**: rules toggled in the left pane
//! 3. **Dispatch**: `/check` or `/upload` run in background tasks
//! 4. **Results**: highlighted original, corrected text, stats
//! 5. **Export**: corrected text written to `corrected_text.txt`
//!
//! See [`proofread::ui::keys`] for key bindings.

use proofread::checker::{
    self, run_job, CheckService, Completion, Dispatcher, HttpCheckService, Outcome,
};
use proofread::logging;
use proofread::ui::{self, app::StatusKind, config::Config, keys, theme::Theme, App};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read keyboard event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
    Json,
}

/// proofread - check text against a remote grammar and style service
#[derive(Parser, Debug)]
#[command(name = "proofread")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check text against a remote grammar and style service", long_about = None)]
struct Args {
    /// Base URL of the checking service
    #[arg(short, long, value_name = "URL", env = "PROOFREAD_SERVER")]
    server: Option<String>,

    /// Theme to use for this run
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Check this text, print the result and exit
    #[arg(long, value_name = "TEXT", conflicts_with = "upload")]
    check: Option<String>,

    /// Upload this file, print the result and exit
    #[arg(long, value_name = "FILE")]
    upload: Option<PathBuf>,

    /// Rule to apply (repeatable)
    #[arg(short, long = "rule", value_name = "NAME")]
    rules: Vec<String>,

    /// Apply every rule the server offers
    #[arg(long, conflicts_with = "rules")]
    all_rules: bool,

    /// Output format for headless checks
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also write the corrected text to corrected_text.txt
    #[arg(long)]
    export: bool,

    /// Print the available rules and exit
    #[arg(long, conflicts_with_all = ["check", "upload"])]
    list_rules: bool,
}

impl Args {
    fn is_headless(&self) -> bool {
        self.check.is_some() || self.upload.is_some() || self.list_rules
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match logging::data_dir().and_then(|dir| logging::initialize_logging(&dir)) {
        Ok(path) => tracing::info!(log = %path.display(), "proofread starting"),
        Err(e) => eprintln!("Warning: Could not initialize logging: {:#}", e),
    }

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let result = run_application(args).await;

    let _ = panic::take_hook();

    result
}

fn resolve_theme(requested: Option<&str>, config: &Config) -> Theme {
    let name = requested.unwrap_or(&config.theme);
    match Theme::by_name(name) {
        Some(theme) => theme.clone(),
        None => {
            tracing::warn!(theme = name, "unknown theme, using default");
            Theme::default_theme().clone()
        }
    }
}

async fn run_application(args: Args) -> Result<()> {
    let mut config = Config::load();
    let server_url = args
        .server
        .clone()
        .unwrap_or_else(|| config.server_url.clone());
    let service: Arc<dyn CheckService> = Arc::new(HttpCheckService::new(&server_url)?);
    let theme = resolve_theme(args.theme.as_deref(), &config);
    let mut app = App::new(server_url, config.resolved_export_dir(), theme);

    if args.is_headless() {
        return run_headless(&args, service.as_ref(), &mut app).await;
    }

    let (dispatcher, mut completions) = Dispatcher::new(service);
    if let Some(job) = app.load_rules() {
        dispatcher.dispatch(job);
    }

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run the app and ensure cleanup happens even on error
    let mut event_reader = CrosstermEventReader;
    let run_result = run_app(
        &mut terminal,
        &mut app,
        &dispatcher,
        &mut completions,
        &mut event_reader,
        &mut config,
    )
    .await;

    let cleanup_result = cleanup_terminal(&mut terminal);

    run_result?;
    cleanup_result?;

    Ok(())
}

/// Check once without the TUI and print the report to stdout.
async fn run_headless(args: &Args, service: &dyn CheckService, app: &mut App) -> Result<()> {
    if args.list_rules || args.all_rules {
        app.apply(run_job(service, checker::Job::LoadRules).await);
        if let Some(status) = app.status.as_ref().filter(|s| s.kind == StatusKind::Error) {
            bail!("{}", status.text);
        }
    }

    if args.list_rules {
        for rule in &app.rules {
            println!("{}", rule.name);
        }
        return Ok(());
    }

    if args.all_rules {
        app.select_all();
    } else {
        for rule in &args.rules {
            app.select(rule);
        }
    }

    let job = if let Some(text) = &args.check {
        app.input_text = text.clone();
        app.submit_text()
    } else if let Some(path) = &args.upload {
        app.set_mode(ui::app::Mode::File);
        app.file_path = path.display().to_string();
        app.submit_file()
    } else {
        None
    };

    let Some(job) = job else {
        if let Some(error) = &app.file_error {
            bail!("{}", error);
        }
        eprintln!("Nothing to check: the text is empty");
        return Ok(());
    };

    let completion = run_job(service, job).await;
    if let Completion::Checked(Outcome::Failure(reason)) = &completion {
        bail!("Check failed: {}", reason);
    }
    app.apply(completion);

    let Some(report) = app.report.as_ref() else {
        bail!("The service returned no result");
    };
    match args.format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Html => print!("{}", report.to_html()),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report.result).context("Failed to serialize result")?
        ),
    }

    if args.export {
        match app.export() {
            Some(path) => eprintln!("Exported to {}", path.display()),
            None => {
                if let Some(status) = &app.status {
                    bail!("{}", status.text);
                }
            }
        }
    }

    Ok(())
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    dispatcher: &Dispatcher,
    completions: &mut UnboundedReceiver<Completion>,
    event_reader: &mut dyn EventReader,
    config: &mut Config,
) -> Result<()> {
    loop {
        // Apply whatever finished since the last frame
        while let Ok(completion) = completions.try_recv() {
            app.apply(completion);
        }

        terminal
            .draw(|f| ui::render(f, app))
            .map_err(|e| anyhow::anyhow!("Failed to draw terminal UI: {}", e))?;

        let event = match event_reader.read_event(Duration::from_millis(100))? {
            Some(e) => e,
            None => continue,
        };

        if let Event::Key(key) = event {
            match keys::handle_key(app, key) {
                Some(keys::Effect::Dispatch(job)) => dispatcher.dispatch(job),
                Some(keys::Effect::SaveConfig) => {
                    config.theme = app.theme.name.to_string();
                    if let Err(e) = config.save() {
                        let reason = format!("{:#}", e);
                        tracing::warn!(%reason, "failed to save config");
                        app.error(format!("Could not save config: {}", reason));
                    }
                }
                None => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
