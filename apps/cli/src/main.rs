use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs;
use tracing_subscriber::EnvFilter;

use razbor_core::{
    format_summary_readable, save_dashboard, save_report, HttpBackend, ReportView, ReviewSession,
    ServiceEndpoints,
};

#[derive(Parser)]
#[command(name = "razbor")]
#[command(
    about = "Upload an interview recording, run remote AI analysis, and render the feedback as a dashboard and PDF report"
)]
struct Cli {
    /// Path to the video or audio recording
    file: PathBuf,

    /// Skill the analysis should explicitly evaluate (repeat for several)
    #[arg(short, long = "skill")]
    skills: Vec<String>,

    /// Analysis service base URL (overrides RAZBOR_SERVICE_URL)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Directory for the rendered dashboard and report
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Start the analysis without asking for confirmation
    #[arg(short = 'y', long)]
    yes: bool,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn fail(err: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", style("Error:").red().bold(), err);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if !cli.file.is_file() {
        fail(format!("{} is not a file", cli.file.display()));
    }

    let endpoints = ServiceEndpoints::resolve(cli.endpoint.as_deref());
    let backend = HttpBackend::new(endpoints.clone());
    let mut session = ReviewSession::new(cli.skills.clone());

    println!(
        "\n{}  {}\n",
        style("razbor").cyan().bold(),
        style("Interview Analyzer").dim()
    );
    println!("{} {}\n", style("Service:").dim(), style(endpoints.base()).cyan());

    // Step 1: upload the recording
    let spinner = create_spinner("Uploading recording...");
    let video_url = match session.upload(&backend, &cli.file).await {
        Ok(url) => {
            spinner.finish_with_message(format!(
                "{} Uploaded: {}",
                style("✓").green().bold(),
                style(&url).dim()
            ));
            url
        }
        Err(e) => {
            spinner.finish_and_clear();
            fail(e);
        }
    };

    // Step 2: the analysis is a separate, explicitly confirmed action
    if !cli.yes {
        let term = Term::stdout();
        term.write_str(&format!(
            "{} Run the analysis now? This can take several minutes. [Y/n] ",
            style("?").yellow().bold()
        ))?;
        let answer = term.read_line()?;
        if answer.trim().to_lowercase().starts_with('n') {
            println!(
                "{} Skipped. The uploaded recording stays at {}",
                style("✗").yellow().bold(),
                video_url
            );
            return Ok(());
        }
    }

    let spinner = create_spinner("Analyzing recording (waiting on the service)...");
    if let Err(e) = session.analyze(&backend).await {
        spinner.finish_and_clear();
        fail(e);
    }
    let Some(result) = session.result() else {
        fail("analysis finished without a result");
    };
    spinner.finish_with_message(format!(
        "{} Analyzed: {} segments, {} words of transcript",
        style("✓").green().bold(),
        result.transcription.len(),
        result.full_text.split_whitespace().count()
    ));

    // Step 3: render both artifacts from the same view
    let view = ReportView::from_result(result, session.required_skills());

    let out_dir = cli
        .out_dir
        .or_else(dirs::download_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    tracing::debug!(out_dir = %out_dir.display(), "writing artifacts");
    fs::create_dir_all(&out_dir).await?;

    let dashboard_path = save_dashboard(&view, &out_dir).await?;
    let report_path = save_report(&view, &out_dir).await?;

    println!(
        "\n{} {}",
        style("Saved:").dim(),
        style(dashboard_path.display()).cyan()
    );
    println!(
        "{} {}\n",
        style("Saved:").dim(),
        style(report_path.display()).cyan()
    );
    println!("{}", style("─".repeat(60)).dim());

    // Human-readable output
    let readable = format_summary_readable(&view);
    println!("{}", readable);

    Ok(())
}
