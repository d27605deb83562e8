use anyhow::{Context, Result};
use lingraph::chat::{drain, ChatModel, OpenAiResponsesClient};
use lingraph::cli::commands::{ChatCommand, GraphCommand, RunCommand, ValidateCommand};
use lingraph::cli::output::*;
use lingraph::cli::terminal_output::TerminalFragmentPrinter;
use lingraph::cli::{apply_proxy, Cli, Command};
use lingraph::core::config::{AppConfig, PipelineConfig};
use lingraph::core::{AppState, Pipeline};
use lingraph::demo::{demo_graph, weather_request};
use lingraph::execution::{ExecutionEngine, RunOutcome};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    let cli = Cli::from_args();

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        eprintln!("{} {}", CROSS, style(format!("{:#}", e)).red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    // Proxy variables go in before any runtime thread or network client exists
    apply_proxy(&cli, &config);

    match &cli.command {
        Command::Graph(cmd) => run_graph(cmd),
        Command::Run(cmd) => run_pipeline(cmd),
        Command::Validate(cmd) => validate_pipeline(cmd),
        Command::Chat(cmd) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("Failed to start async runtime")?;
            runtime.block_on(run_chat(cmd, &config))
        }
    }
}

fn run_graph(cmd: &GraphCommand) -> Result<()> {
    let pipeline = demo_graph().context("Invalid demo graph")?;
    execute_and_print(&pipeline, AppState::new(cmd.foo.clone()), cmd.json)
}

fn run_pipeline(cmd: &RunCommand) -> Result<()> {
    let config = PipelineConfig::from_file(&cmd.file)
        .context("Failed to load pipeline config")?;
    let pipeline = config.to_pipeline()?;

    let initial = match &cmd.foo {
        Some(foo) => AppState::new(foo.clone()),
        None => config.initial.clone(),
    };

    if !cmd.json {
        println!("{} Loaded pipeline: {}", INFO, style(&config.name).bold());
    }
    execute_and_print(&pipeline, initial, cmd.json)
}

fn execute_and_print(pipeline: &Pipeline<AppState>, initial: AppState, json: bool) -> Result<()> {
    let mut engine = ExecutionEngine::new();
    if !json {
        engine.add_event_handler(|event| println!("{}", format_execution_event(event)));
    }

    let outcome: RunOutcome<AppState> = engine.execute(pipeline, initial)?;

    if json {
        let data = serde_json::json!({
            "pipeline": pipeline.name,
            "state": outcome.state,
            "run": outcome.run,
            "executed": outcome.executed,
        });
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        println!("{}", format_run_summary(&pipeline.name, &outcome.run));
        println!("{}", format_state(&outcome.state));
    }

    Ok(())
}

fn validate_pipeline(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating pipeline...", INFO);

    let config = PipelineConfig::from_file(&cmd.file)?;
    let pipeline = config.to_pipeline()?;

    println!("{} Pipeline configuration is valid!", CHECK);
    println!("  Name: {}", style(&config.name).bold());
    println!("  Steps: {}", style(pipeline.step_names().join(" -> ")).cyan());

    if cmd.json {
        let json = serde_json::to_string_pretty(&config)?;
        println!("\n{}", json);
    }
    Ok(())
}

async fn run_chat(cmd: &ChatCommand, config: &AppConfig) -> Result<()> {
    let mut chat_config = config.chat.clone();
    if let Some(model) = &cmd.model {
        chat_config = chat_config.with_model(model.clone());
    }

    let client = OpenAiResponsesClient::new(chat_config)?;
    let request = weather_request(cmd.prompt.as_deref());

    info!("Streaming reply from {}", client.config().model);
    let stream = client.stream(&request).await?;

    let printer = TerminalFragmentPrinter::new();
    let result = drain(stream, Some(&printer)).await;
    printer.finish();
    result?;

    Ok(())
}
