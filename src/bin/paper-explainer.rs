//! CLI binary for paper-explainer.
//!
//! A terminal front end over the library's view controller: flags and
//! typed commands become `UiEvent`s, and a terminal observer draws the
//! resulting state.

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use paper_explainer::config::DEFAULT_ENDPOINT;
use paper_explainer::pipeline::format::markup_to_text;
use paper_explainer::pipeline::input::load_upload;
use paper_explainer::{
    EventSender, ExplainerConfig, HttpTransport, Osc52Clipboard, Phase, Tab, UiEvent,
    ViewController, ViewObserver, ViewState,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── Terminal observer using indicatif ────────────────────────────────────────

/// Draws view-state changes on stderr: a spinner while loading, the error
/// banner, tab and file changes. Summaries go to stdout when `print_summary`
/// is set (interactive mode); one-shot mode prints them itself.
struct TerminalObserver {
    spinner: Mutex<Option<ProgressBar>>,
    last: Mutex<ViewState>,
    show_progress: bool,
    print_summary: bool,
}

impl TerminalObserver {
    fn new(show_progress: bool, print_summary: bool) -> Arc<Self> {
        Arc::new(Self {
            spinner: Mutex::new(None),
            last: Mutex::new(ViewState::default()),
            show_progress,
            print_summary,
        })
    }

    fn start_spinner(&self) -> ProgressBar {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  ⏱ {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Analyzing");
        bar.set_message("waiting for the summary…");
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    }

    /// Print a line without tearing the spinner.
    fn println(&self, line: String) {
        match self.spinner.lock().ok().as_deref() {
            Some(Some(bar)) => bar.println(line),
            _ => eprintln!("{line}"),
        }
    }
}

impl ViewObserver for TerminalObserver {
    fn on_state_changed(&self, state: &ViewState) {
        let prev = match self.last.lock() {
            Ok(mut last) => std::mem::replace(&mut *last, state.clone()),
            Err(_) => return,
        };

        if self.show_progress && state.loading != prev.loading {
            if let Ok(mut spinner) = self.spinner.lock() {
                if state.loading {
                    *spinner = Some(self.start_spinner());
                } else if let Some(bar) = spinner.take() {
                    bar.finish_and_clear();
                }
            }
        }

        if state.active_tab != prev.active_tab {
            let label = match state.active_tab {
                Tab::Pdf => "PDF upload",
                Tab::Text => "Text input",
            };
            self.println(format!("{} {}", cyan("◆"), bold(label)));
        }

        if state.selected_file != prev.selected_file {
            match &state.selected_file {
                Some(name) => self.println(format!("  {} {}", green("📄"), name)),
                None => self.println(dim("  file removed")),
            }
        }

        if state.error_message != prev.error_message {
            if let Some(msg) = &state.error_message {
                self.println(format!("{} {}", red("✗"), red(msg)));
            }
        }

        if state.copy_feedback && !prev.copy_feedback {
            self.println(format!("{} Copied!", green("✓")));
        }
    }

    fn on_summary_rendered(&self, markup: &str) {
        if self.print_summary {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            let _ = writeln!(handle, "\n{}\n", markup_to_text(markup));
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Summarize a paper
  paper-explainer --pdf paper.pdf

  # Explain a topic
  paper-explainer --topic "CAR-T cell therapy for lymphoma"

  # Emit the formatted markup instead of plain text
  paper-explainer --pdf paper.pdf --html > summary.html

  # Talk to a deployed backend
  paper-explainer --endpoint https://your-app.onrender.com/summarize --pdf paper.pdf

  # Interactive session
  paper-explainer

INTERACTIVE COMMANDS:
  :pdf            switch to PDF upload
  :text           switch to text input
  :open <path>    choose a PDF
  :remove         drop the chosen PDF
  :clear          clear the typed topic
  :submit         send (same as Ctrl+Enter in the browser form)
  :copy           copy the summary to the clipboard (OSC 52)
  :quit           exit
  anything else   is appended to the topic text

ENVIRONMENT VARIABLES:
  PAPER_EXPLAINER_ENDPOINT  Summarization endpoint URL
  RUST_LOG                  Override log filter
"#;

/// Summarize research papers or topics through a summarization endpoint.
#[derive(Parser, Debug)]
#[command(
    name = "paper-explainer",
    version,
    about = "Summarize a research paper PDF or a topic through a summarization endpoint",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF to summarize (one-shot mode).
    #[arg(long, conflicts_with = "topic")]
    pdf: Option<PathBuf>,

    /// Topic or pasted text to explain (one-shot mode).
    #[arg(long)]
    topic: Option<String>,

    /// Summarization endpoint.
    #[arg(long, env = "PAPER_EXPLAINER_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Print the formatted markup instead of plain text.
    #[arg(long, conflicts_with = "json")]
    html: bool,

    /// Print JSON with both markup and plain text.
    #[arg(long, env = "PAPER_EXPLAINER_JSON")]
    json: bool,

    /// Also copy the summary to the clipboard.
    #[arg(long)]
    copy: bool,

    /// Disable the spinner.
    #[arg(long, env = "PAPER_EXPLAINER_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PAPER_EXPLAINER_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the summary.
    #[arg(short, long, env = "PAPER_EXPLAINER_QUIET")]
    quiet: bool,
}

type Controller = ViewController<HttpTransport, Osc52Clipboard<io::Stderr>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build controller ─────────────────────────────────────────────────
    let config = ExplainerConfig::builder()
        .endpoint(cli.endpoint.clone())
        .build()
        .context("Invalid configuration")?;
    let transport = HttpTransport::new(&config).context("Failed to set up HTTP client")?;

    let one_shot = cli.pdf.is_some() || cli.topic.is_some();
    let observer = TerminalObserver::new(show_progress, !one_shot);
    let controller = ViewController::new(config, transport, Osc52Clipboard::stderr())
        .with_observer(observer as Arc<dyn ViewObserver>);

    if one_shot {
        run_once(&cli, controller).await
    } else {
        run_interactive(controller).await
    }
}

/// Submit the flag-supplied input, wait for the answer, print it.
async fn run_once(cli: &Cli, mut controller: Controller) -> Result<()> {
    if let Some(ref path) = cli.pdf {
        controller.dispatch(UiEvent::SelectTab(Tab::Pdf));
        let file = load_upload(path)
            .await
            .with_context(|| format!("Failed to load {}", path.display()))?;
        controller.dispatch(UiEvent::FileChosen(file));
    } else if let Some(ref topic) = cli.topic {
        controller.dispatch(UiEvent::SelectTab(Tab::Text));
        controller.dispatch(UiEvent::TextEdited(topic.clone()));
    }
    if let Some(msg) = controller.state().error_message.clone() {
        bail!(msg);
    }

    controller.dispatch(UiEvent::Submit);
    if let Some(msg) = controller.state().error_message.clone() {
        bail!(msg);
    }
    controller.settle().await;

    if controller.state().phase != Phase::Success {
        let msg = controller
            .state()
            .error_message
            .clone()
            .unwrap_or_else(|| "Failed to process".to_string());
        bail!(msg);
    }

    let markup = controller.summary_markup().unwrap_or_default().to_string();
    let text = markup_to_text(&markup);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if cli.json {
        let json = serde_json::json!({ "markup": markup, "text": text });
        let rendered =
            serde_json::to_string_pretty(&json).context("Failed to serialise output")?;
        writeln!(handle, "{rendered}").context("Failed to write to stdout")?;
    } else if cli.html {
        writeln!(handle, "{markup}").context("Failed to write to stdout")?;
    } else {
        writeln!(handle, "{text}").context("Failed to write to stdout")?;
    }
    drop(handle);

    if cli.copy {
        controller.dispatch(UiEvent::Copy);
        if let Some(msg) = controller.state().error_message.clone() {
            bail!(msg);
        }
    }
    Ok(())
}

/// Read commands from stdin until `:quit` or EOF.
async fn run_interactive(controller: Controller) -> Result<()> {
    eprintln!(
        "{} {}  {}",
        cyan("◆"),
        bold("Paper explainer"),
        dim("type :help for commands")
    );

    let sender = controller.sender();
    let input = tokio::spawn(read_commands(sender));
    controller.run().await;
    input.abort();
    Ok(())
}

/// Map stdin lines to UI events.
async fn read_commands(sender: EventSender) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut topic = String::new();

    while let Ok(Some(line)) = lines.next_line().await {
        let trimmed = line.trim();
        let event = match trimmed.split_once(' ') {
            Some((":open", path)) => match load_upload(path.trim()).await {
                Ok(file) => Some(UiEvent::FileChosen(file)),
                Err(e) => {
                    eprintln!("{} {}", red("✗"), red(&e.to_string()));
                    None
                }
            },
            _ => match trimmed {
                ":pdf" => Some(UiEvent::SelectTab(Tab::Pdf)),
                ":text" => Some(UiEvent::SelectTab(Tab::Text)),
                ":remove" => Some(UiEvent::RemoveFile),
                ":clear" => {
                    topic.clear();
                    Some(UiEvent::TextEdited(String::new()))
                }
                ":submit" => Some(UiEvent::Submit),
                ":copy" => Some(UiEvent::Copy),
                ":quit" | ":q" => break,
                ":help" => {
                    eprintln!("{AFTER_HELP}");
                    None
                }
                _ => {
                    if !topic.is_empty() {
                        topic.push('\n');
                    }
                    topic.push_str(&line);
                    Some(UiEvent::TextEdited(topic.clone()))
                }
            },
        };

        if let Some(event) = event {
            if !sender.send(event) {
                return;
            }
        }
    }

    sender.send(UiEvent::Quit);
}
