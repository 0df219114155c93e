use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use specsentinel::config;
use specsentinel::figma::{FigmaClient, FigmaConfig, FigmaError};
use specsentinel::harness::{
    ActualSource, CheckConfig, FsSourceLocator, HarnessError, parse_trigger, read_event_comment,
    run_check, static_spec,
};
use specsentinel::runner::CheckReport;
use specsentinel::spec::{ComparisonResult, ScreenSpec, compare_screen_spec, load_source_spec};

/// SpecSentinel - check Flutter screens against their Figma design
#[derive(Parser, Debug)]
#[command(
    name = "specsentinel",
    version,
    about = "Check Flutter screens against their Figma design",
    after_help = "ENVIRONMENT VARIABLES:\n\
        FIGMA_TOKEN                   Figma access token\n\
        SPECSENTINEL_FIGMA_API        Figma API base URL\n\
        SPECSENTINEL_FIGMA_OAUTH      Send the token as a bearer token\n\
        SPECSENTINEL_FIGMA_TIMEOUT    Figma request timeout (seconds)\n\
        SPECSENTINEL_OUTPUT_DIR       Directory for test output and diagnostics\n\
        SPECSENTINEL_SOURCE_ROOT      Root searched for screen source files\n\
        SPECSENTINEL_TEST_COMMAND     Command used to run widget tests\n\
        RUST_LOG                      Log filter (default: info)"
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare a screen against its Figma frame
    Check {
        /// Screen identifier (e.g., LoginPage)
        #[arg(long)]
        screen: String,

        /// Figma file key
        #[arg(long)]
        figma_file: String,

        /// Figma node id of the screen frame (e.g., 12:34)
        #[arg(long)]
        figma_node: String,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Print the spec extracted from one side as JSON
    #[command(subcommand)]
    Extract(ExtractCommands),

    /// Compare two saved spec files
    Diff {
        /// Expected spec (JSON)
        #[arg(long)]
        expected: PathBuf,

        /// Actual spec (JSON)
        #[arg(long)]
        actual: PathBuf,
    },

    /// Run a check requested by a `figma-spec:` line in a CI comment event
    Trigger {
        /// Event payload containing `comment.body`
        #[arg(long, env = config::ENV_EVENT_PATH)]
        event_path: PathBuf,

        #[command(flatten)]
        target: TargetArgs,
    },
}

#[derive(Subcommand, Debug)]
enum ExtractCommands {
    /// Fetch a Figma node and extract its spec
    Figma {
        /// Figma file key
        #[arg(long)]
        file: String,

        /// Figma node id
        #[arg(long)]
        node: String,

        /// Screen name to record (default: the node's name)
        #[arg(long)]
        screen: Option<String>,
    },

    /// Scan a screen's Flutter source
    Source {
        /// Screen identifier
        #[arg(long)]
        screen: String,

        /// Source file (default: discovered under --source-root)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Root searched for the screen's source file
        #[arg(long, conflicts_with = "path")]
        source_root: Option<PathBuf>,
    },
}

/// Where the actual spec comes from and where artifacts go
#[derive(Args, Debug)]
struct TargetArgs {
    /// Widget test that writes the rendered spec (omit to scan the screen's source)
    #[arg(long, conflicts_with = "source_root")]
    flutter_test: Option<PathBuf>,

    /// Root searched for the screen's source file
    #[arg(long)]
    source_root: Option<PathBuf>,

    /// Command used to run the widget test
    #[arg(long)]
    test_command: Option<String>,

    /// Directory for test output and diagnostics
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Project directory relative paths are resolved against
    #[arg(long, default_value = ".")]
    cwd: PathBuf,

    /// Also write the expected and actual specs to the output directory
    #[arg(long)]
    dump_specs: bool,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

impl TargetArgs {
    fn into_config(self, screen: String, figma_file: String, figma_node: String) -> (CheckConfig, bool) {
        let actual = match self.flutter_test {
            Some(test_path) => ActualSource::FlutterTest {
                test_path,
                command: self
                    .test_command
                    .unwrap_or_else(|| config::get().paths.test_command.clone()),
            },
            None => ActualSource::Static {
                source_root: self
                    .source_root
                    .unwrap_or_else(|| PathBuf::from(config::source_root())),
            },
        };

        let check = CheckConfig::new(screen, figma_file, figma_node, actual)
            .output_dir(self.output_dir.unwrap_or_else(|| PathBuf::from(config::output_dir())))
            .working_dir(self.cwd)
            .dump_specs(self.dump_specs);
        (check, self.json)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(cli.command).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("[SpecSentinel] {} failed: {}", failed_stage(&err), err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn failed_stage(err: &anyhow::Error) -> &'static str {
    if let Some(err) = err.downcast_ref::<HarnessError>() {
        err.stage()
    } else if err.downcast_ref::<FigmaError>().is_some() {
        "figma"
    } else {
        "run"
    }
}

async fn execute(command: Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Check {
            screen,
            figma_file,
            figma_node,
            target,
        } => {
            let (config, json) = target.into_config(screen, figma_file, figma_node);
            check(&config, json).await
        }

        Commands::Extract(ExtractCommands::Figma { file, node, screen }) => {
            let client = figma_client()?;
            let spec = client.fetch_screen_spec(&file, &node, screen.as_deref()).await?;
            print_spec(&spec)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Extract(ExtractCommands::Source {
            screen,
            path,
            source_root,
        }) => {
            let spec = match path {
                Some(path) => load_source_spec(&path, &screen).map_err(HarnessError::from)?,
                None => {
                    let root = source_root.unwrap_or_else(|| PathBuf::from(config::source_root()));
                    static_spec(&screen, &FsSourceLocator::new(root))?
                }
            };
            print_spec(&spec)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Diff { expected, actual } => {
            let expected = read_spec(&expected)?;
            let actual = read_spec(&actual)?;
            let result = compare_screen_spec(&expected, &actual);
            Ok(print_result(&result))
        }

        Commands::Trigger { event_path, target } => {
            let Some(body) = read_event_comment(&event_path)? else {
                info!("No comment body found; skipping");
                return Ok(ExitCode::SUCCESS);
            };
            let Some(trigger) = parse_trigger(&body) else {
                info!("No figma-spec line detected; skipping");
                return Ok(ExitCode::SUCCESS);
            };

            info!("Invoking SpecSentinel for {}", trigger.screen);
            let (config, json) = target.into_config(trigger.screen, trigger.file_key, trigger.node_id);
            check(&config, json).await
        }
    }
}

async fn check(config: &CheckConfig, json: bool) -> anyhow::Result<ExitCode> {
    let client = figma_client()?;
    let report: CheckReport = run_check(config, &client).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    if let Some(path) = &report.diff_path {
        info!("Differences saved to {}", path.display());
    }
    Ok(print_result(&report.result))
}

fn figma_client() -> anyhow::Result<FigmaClient> {
    let config = FigmaConfig::from_env()?;
    Ok(FigmaClient::new(config)?)
}

fn read_spec(path: &Path) -> anyhow::Result<ScreenSpec> {
    let content = std::fs::read_to_string(path).map_err(HarnessError::from)?;
    Ok(serde_json::from_str(&content).map_err(HarnessError::from)?)
}

fn print_spec(spec: &ScreenSpec) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(spec)?);
    Ok(())
}

fn print_result(result: &ComparisonResult) -> ExitCode {
    if result.matches {
        info!("Specs match");
        return ExitCode::SUCCESS;
    }

    eprintln!("[SpecSentinel] Differences found:");
    for diff in &result.diffs {
        eprintln!("- {}", diff);
    }
    eprintln!("[SpecSentinel] Specs differ");
    ExitCode::FAILURE
}
