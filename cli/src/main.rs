//! CLI entrypoint for subquery
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::io::{BufRead, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use subquery_application::{
    AnswerAllUseCase, NoProgress, NoWorkflowLogger, ProgressNotifier, RunWorkflowUseCase,
    WorkflowEventLogger, WorkflowParams,
};
use subquery_domain::{Answer, Question, RetryPolicy, SubQuestion};
use subquery_infrastructure::{
    ConfigLoader, FileConfig, HttpRagAnswerer, JsonlWorkflowLogger, OpenAiCompatibleGateway,
    OpenAiSettings, RagBackendClient,
};
use subquery_presentation::{
    Cli, ConsoleFormatter, OutputFormat, OutputFormatter, ProgressReporter, SimpleProgress,
};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_ref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    let params = build_params(&cli, &config)?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    let format = match cli.output {
        Some(format) => format,
        None => config
            .output
            .format
            .as_deref()
            .and_then(OutputFormat::from_config)
            .unwrap_or(OutputFormat::Answer),
    };

    info!("Starting subquery");

    // === Dependency Injection ===
    let rag_client = RagBackendClient::new(
        &config.rag.base_url,
        Duration::from_secs(config.rag.timeout_seconds),
    )?;
    let answerer = Arc::new(HttpRagAnswerer::new(rag_client.clone()));
    let logger = event_logger(&cli, &config);

    let questions = collect_questions(&cli)?;

    if cli.direct {
        return run_direct(&rag_client, answerer, params, logger, &questions, format).await;
    }

    let gateway = Arc::new(OpenAiCompatibleGateway::new(OpenAiSettings {
        base_url: config.llm.base_url.clone(),
        api_key: std::env::var(&config.llm.api_key_env).ok(),
        temperature: config.llm.temperature,
        timeout: Duration::from_secs(config.llm.timeout_seconds),
    })?);

    let use_case = RunWorkflowUseCase::new(gateway, answerer, params).with_logger(logger);
    let formatter: &dyn OutputFormatter = &ConsoleFormatter;

    let progress: Box<dyn ProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() && questions.len() == 1 {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    // Batch mode keeps going past a failed question and reports at the end
    let mut failed = 0usize;
    for question in &questions {
        match use_case.execute_with_progress(question, progress.as_ref()).await {
            Ok(result) => println!("{}", formatter.render(&result, format)),
            Err(e) if questions.len() > 1 => {
                warn!("Question failed: {}", e);
                eprintln!("Error for {:?}: {}", question.content(), e);
                failed += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    if failed > 0 {
        bail!("{} of {} questions failed", failed, questions.len());
    }

    Ok(())
}

/// Install the tracing subscriber; the returned guard flushes the log file on drop
fn init_logging(verbose: u8, log_file: Option<&PathBuf>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let name = path
                .file_name()
                .context("--log-file must name a file")?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Validated workflow parameters with command-line overrides applied
fn build_params(cli: &Cli, config: &FileConfig) -> Result<WorkflowParams> {
    let mut params = config
        .workflow_params()
        .context("Invalid configuration")?;

    if let Some(max_attempts) = cli.max_attempts {
        params = params.with_retry(RetryPolicy::new(max_attempts)?);
    }
    if let Some(concurrency) = cli.concurrency {
        if concurrency == 0 {
            bail!("--concurrency must be at least 1");
        }
        params = params.with_max_concurrency(concurrency);
    }

    Ok(params)
}

fn event_logger(cli: &Cli, config: &FileConfig) -> Arc<dyn WorkflowEventLogger> {
    let path = cli
        .events_file
        .clone()
        .or_else(|| config.logging.events_file.as_ref().map(PathBuf::from));

    match path.and_then(JsonlWorkflowLogger::new) {
        Some(logger) => {
            info!("Workflow events -> {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoWorkflowLogger),
    }
}

fn collect_questions(cli: &Cli) -> Result<Vec<Question>> {
    if cli.stdin {
        if cli.question.is_some() {
            bail!("Pass either a question or --stdin, not both.");
        }
        let mut questions = Vec::new();
        for line in std::io::stdin().lock().lines() {
            let line = line.context("Failed to read standard input")?;
            if let Some(question) = Question::try_new(line) {
                questions.push(question);
            }
        }
        if questions.is_empty() {
            bail!("No questions on standard input.");
        }
        return Ok(questions);
    }

    let Some(text) = cli.question.clone() else {
        bail!("Question is required. Use --stdin to read questions from standard input.");
    };
    let question = Question::try_new(text).context("Question cannot be empty")?;
    Ok(vec![question])
}

/// Ask the RAG backend directly, skipping decomposition and synthesis
async fn run_direct(
    client: &RagBackendClient,
    answerer: Arc<HttpRagAnswerer>,
    params: WorkflowParams,
    logger: Arc<dyn WorkflowEventLogger>,
    questions: &[Question],
    format: OutputFormat,
) -> Result<()> {
    let answer_all = AnswerAllUseCase::new(answerer, params).with_logger(logger);
    let as_sub: Vec<SubQuestion> = questions.iter().map(SubQuestion::from).collect();

    let answers = if questions.len() > 1 {
        let texts: Vec<String> = questions.iter().map(|q| q.content().to_string()).collect();
        match client.batch(&texts).await {
            Ok(answers) => answers.into_iter().map(Answer::Found).collect(),
            Err(e) => {
                warn!("Batch request failed ({}), answering one by one", e);
                answer_all.execute(&as_sub).await
            }
        }
    } else {
        answer_all.execute(&as_sub).await
    };

    let items: Vec<(&str, &Answer)> = questions
        .iter()
        .map(Question::content)
        .zip(&answers)
        .collect();
    print!("{}", ConsoleFormatter::format_direct_batch(&items, format));

    Ok(())
}
