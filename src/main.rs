mod cli;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use mf_av::ToolRegistry;
use mf_core::config::Config;
use mf_core::{Format, TranscodeTask};
use mf_pipeline::report::{transcode_notice, transmux_notice};
use mf_pipeline::{
    host_cores, preflight, resolve_parallelism, CompletionSender, JobOutcome, Outcome, Report,
    TranscodeOutcome, Transcoder, Transmuxer,
};

/// Exit status when at least one job failed.
const EXIT_JOB_FAILED: u8 = 2;
/// Exit status when a required external tool is missing.
const EXIT_TOOL_MISSING: u8 = 3;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "muxforge=debug,mf_pipeline=debug,mf_av=debug,mf_core=debug".to_string()
        } else {
            "muxforge=info,mf_pipeline=info,mf_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            let code = e
                .downcast_ref::<mf_core::Error>()
                .map(|err| err.exit_code())
                .unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::load_or_default(cli.config.as_deref());
    for warning in config.validate() {
        tracing::warn!("config: {warning}");
    }

    match cli.command {
        Commands::Transmux {
            input,
            output_dir,
            formats,
            jobs,
            strict_tools,
            json,
        } => {
            let formats = formats.unwrap_or_else(|| config.transmux.default_formats.clone());
            let strict = strict_tools || config.pipeline.strict_tools;
            let parallelism = resolve_parallelism(host_cores(), jobs.or(config.pipeline.max_jobs));

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(transmux(
                &config,
                &input,
                &output_dir,
                &formats,
                parallelism,
                strict,
                json,
            ))
        }
        Commands::Transcode {
            input,
            output_dir,
            tasks,
            jobs,
            json,
        } => {
            let parallelism = resolve_parallelism(host_cores(), jobs.or(config.pipeline.max_jobs));

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(transcode(&config, &input, &output_dir, &tasks, parallelism, json))
        }
        Commands::CheckTools => check_tools(&config),
        Commands::Version => {
            println!("muxforge {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn transmux(
    config: &Config,
    input: &Path,
    output_dir: &Path,
    formats: &[Format],
    parallelism: usize,
    strict: bool,
    json: bool,
) -> Result<ExitCode> {
    if !input.exists() && !formats.is_empty() {
        tracing::warn!("Input file does not exist: {:?}", input);
    }

    let tools = ToolRegistry::discover(&config.tools);
    if strict {
        preflight(&tools, formats)?;
    }

    tracing::info!(
        "Transmuxing {:?} -> {:?} with {} worker(s)",
        input,
        output_dir,
        parallelism
    );

    let transmuxer = Transmuxer::new(Arc::new(tools), parallelism)
        .with_completion(CompletionSender::new(move |o: &JobOutcome| {
            announce(&transmux_notice(o), json)
        }));
    let report = transmuxer.run(input, output_dir, formats).await?;

    finish(&report, json)
}

async fn transcode(
    config: &Config,
    input: &Path,
    output_dir: &Path,
    tasks: &[TranscodeTask],
    parallelism: usize,
    json: bool,
) -> Result<ExitCode> {
    let tools = ToolRegistry::discover(&config.tools);

    tracing::info!(
        "Transcoding {:?} -> {:?} with {} worker(s)",
        input,
        output_dir,
        parallelism
    );

    let transcoder = Transcoder::new(Arc::new(tools), parallelism).with_completion(
        CompletionSender::new(move |o: &TranscodeOutcome| announce(&transcode_notice(o), json)),
    );
    let report = transcoder.run(input, output_dir, tasks).await?;

    finish(&report, json)
}

/// Completion notices go to stdout, unless stdout is reserved for JSON.
fn announce(notice: &str, json: bool) {
    if json {
        eprintln!("{notice}");
    } else {
        println!("{notice}");
    }
}

/// Print the report and pick the exit status.
fn finish<O>(report: &Report<O>, json: bool) -> Result<ExitCode>
where
    O: Outcome + serde::Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else if !report.is_empty() {
        println!();
        for line in report.lines() {
            println!("{line}");
        }
    }

    let missing = report.missing_tools();
    if !missing.is_empty() {
        eprintln!("Missing tools: {}", missing.join(", "));
        return Ok(ExitCode::from(EXIT_TOOL_MISSING));
    }
    if !report.all_succeeded() {
        return Ok(ExitCode::from(EXIT_JOB_FAILED));
    }
    Ok(ExitCode::SUCCESS)
}

fn check_tools(config: &Config) -> Result<ExitCode> {
    println!("Checking external tools...\n");

    let tools = ToolRegistry::discover(&config.tools).check_all();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install them to enable all formats.");
    }

    Ok(ExitCode::SUCCESS)
}
