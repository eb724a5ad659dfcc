// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::{Path, PathBuf};

use rosetta::app_config::{self, Config, FailurePolicy, TranslationProvider};
use rosetta::app_controller::Controller;
use rosetta::chunking::{inspect, render_table};
use rosetta::file_utils::{FileManager, STDIO_PATH};

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Identity,
    Command,
    Ollama,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Identity => TranslationProvider::Identity,
            CliTranslationProvider::Command => TranslationProvider::Command,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
        }
    }
}

/// CLI Wrapper for FailurePolicy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliFailurePolicy {
    KeepOriginal,
    Abort,
}

impl From<CliFailurePolicy> for FailurePolicy {
    fn from(cli_policy: CliFailurePolicy) -> Self {
        match cli_policy {
            CliFailurePolicy::KeepOriginal => FailurePolicy::KeepOriginal,
            CliFailurePolicy::Abort => FailurePolicy::Abort,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate Markdown documents (default command)
    Translate(TranslateArgs),

    /// Show how a document is split into chunks, without translating
    Inspect(InspectArgs),

    /// Generate shell completions for rosetta
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct TranslateArgs {
    /// Input document, directory of documents, or '-' for stdin
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output directory ('-' for stdout); defaults to the input's directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Source language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "rosetta.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// What to do when a chunk cannot be translated
    #[arg(long, value_enum)]
    policy: Option<CliFailurePolicy>,

    /// Maximum number of chunks translated concurrently
    #[arg(short = 'j', long)]
    jobs: Option<usize>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Document to inspect, or '-' for stdin
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Number of characters shown per chunk
    #[arg(short, long, default_value_t = inspect::DEFAULT_PREVIEW_WIDTH)]
    width: usize,

    /// Print the chunks as JSON instead of a table
    #[arg(long)]
    json: bool,
}

/// Rosetta - prose-preserving Markdown translator
///
/// Splits Markdown documents into prose and protected spans (code, math,
/// embedded markup), translates only the prose, and reassembles the result.
#[derive(Parser, Debug)]
#[command(name = "rosetta")]
#[command(version)]
#[command(about = "Translate Markdown prose while leaving code, math and markup untouched")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "Rosetta translates the prose of Markdown documents and keeps code blocks, inline code, \
math and embedded SVG/HTML byte for byte.

EXAMPLES:
    rosetta README.md                          # Translate using default config
    rosetta -f README.md                       # Force overwrite existing output
    rosetta -p ollama -m llama3.2:3b docs/     # Translate a whole directory with Ollama
    rosetta -s en -t de -o - README.md         # English to German, print to stdout
    cat notes.md | rosetta -p identity -       # Round-trip check through stdin
    rosetta inspect README.md                  # Show chunking decisions
    rosetta completions bash > rosetta.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in rosetta.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    identity  - Output equals input (dry run)
    command   - Pipe each chunk through external programs (stdin to stdout)
    ollama    - Local Ollama server (default: llama3.2:3b)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "1;31"),
            Level::Warn => ("🚧", "1;33"),
            Level::Info => ("✅", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The real level is applied once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "rosetta", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Inspect(args)) => run_inspect(args),
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => run_translate(cli.translate).await,
    }
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let views = Controller::inspect(&args.input_path, args.width)?;

    let rendered = if args.json {
        let mut json = serde_json::to_string_pretty(&views).context("Failed to serialize chunks")?;
        json.push('\n');
        json
    } else {
        render_table(&views)
    };

    FileManager::write_to_file(STDIO_PATH, &rendered)
}

/// Apply command line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, options: &TranslateArgs) {
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(model) = &options.model {
        config.translation.active_provider_config_mut().model = model.clone();
    }

    if let Some(jobs) = options.jobs {
        config.translation.active_provider_config_mut().concurrent_requests = jobs.max(1);
    }

    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }

    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }

    if let Some(policy) = &options.policy {
        config.translation.common.failure_policy = policy.clone().into();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    let input_path = options
        .input_path
        .clone()
        .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;
    apply_overrides(&mut config, &options);

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;
    controller.check_provider().await?;

    info!(
        "rosetta: {} -> {} via {}",
        controller.config().source_language,
        controller.config().target_language,
        controller.config().translation.provider.display_name()
    );

    if FileManager::is_stdio(&input_path) {
        let input = FileManager::read_to_string(&input_path)?;
        let (output, _report) = controller.translate_text(&input).await?;
        return FileManager::write_to_file(STDIO_PATH, &output);
    }

    if input_path.is_file() {
        let output_dir = match options.output {
            Some(dir) => dir,
            None => input_path.parent().unwrap_or(Path::new(".")).to_path_buf(),
        };
        controller.run(input_path, output_dir, options.force_overwrite).await?;
    } else if input_path.is_dir() {
        if options.output.is_some() {
            return Err(anyhow!("--output is not supported for directories; outputs are written next to each document"));
        }
        let summary = controller.run_folder(input_path, options.force_overwrite).await?;
        if summary.failed > 0 {
            return Err(anyhow!("{} document(s) failed to translate", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}
