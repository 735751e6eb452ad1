use anyhow::Context as _;
use clap::Parser;
use diesel_lab::client::GeminiClient;
use diesel_lab::config::{ClientConfig, log_filter, parse_timeout_secs};
use diesel_lab::console;
use diesel_lab::widget::DiagnosticsWidget;
use std::io::{self, BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// AI-assisted symptom checker for diesel fuel-injection faults
#[derive(Parser)]
#[command(name = "diesel-lab", version)]
struct Cli {
    /// Diagnose one report and exit instead of prompting
    #[arg(long, short)]
    symptoms: Option<String>,

    /// Override the model id
    #[arg(long)]
    model: Option<String>,

    /// Override the provider base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<String>,

    /// Disable terminal colours
    #[arg(long)]
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut config = ClientConfig::from_env().context("invalid diagnostics configuration")?;
    if let Some(model) = &cli.model {
        config = config.with_model(model);
    }
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url);
    }
    if let Some(raw) = &cli.timeout {
        config = config.with_timeout(parse_timeout_secs("--timeout", raw)?);
    }
    if !config.has_api_key() {
        tracing::warn!("no API key configured; requests will be rejected by the provider");
    }

    let client = GeminiClient::new(config).context("failed to build HTTP client")?;
    tracing::debug!(
        endpoint = %client.endpoint(),
        timeout_secs = client.config().timeout.as_secs(),
        "diagnostics client ready"
    );
    let widget = DiagnosticsWidget::new(client);

    println!("{}", console::banner());

    match cli.symptoms {
        Some(symptoms) => run_once(&widget, &symptoms)?,
        None => run_interactive(&widget)?,
    }
    Ok(())
}

fn run_once(widget: &DiagnosticsWidget, symptoms: &str) -> anyhow::Result<()> {
    widget.set_input(symptoms);
    console::submit_and_render(widget, &mut io::stdout())?;
    Ok(())
}

fn run_interactive(widget: &DiagnosticsWidget) -> anyhow::Result<()> {
    println!("{}", console::PROMPT_HINT);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }
        widget.set_input(line);
        console::submit_and_render(widget, &mut stdout)?;
    }
    Ok(())
}
