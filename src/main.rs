//! tweet-sentiment: sentiment breakdown and word frequencies for collected posts

use clap::Parser;
use log::{error, info};
use std::process;
use tweet_sentiment::cli::{self, Cli, Commands, ConfigAction};
use tweet_sentiment::input::loader::RecordLoader;
use tweet_sentiment::output::formatter::{resolve_save_path, save_report_to_file, ReportGenerator};
use tweet_sentiment::processing::pipeline::Pipeline;
use tweet_sentiment::{AnalyzerError, Config, Result};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            input,
            top,
            output,
            save,
            parallel,
            no_color,
        } => {
            let input = input.unwrap_or_else(|| config.input.default_path.clone());
            cli::validate_file_extension(&input, &["csv"])
                .map_err(|e| AnalyzerError::InvalidInput(format!("Input file: {}", e)))?;

            let format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(AnalyzerError::InvalidInput)?,
                None => config.output.format,
            };
            let top = top.unwrap_or(config.processing.top_words);
            config.processing.parallel |= parallel;

            info!("Analyzing {}", input.display());
            let records = RecordLoader::new().load_path(&input).await?;

            let mut pipeline = Pipeline::new(&config)?.with_source(input.display().to_string());
            pipeline.run(records)?;
            let report = pipeline.report(top)?;

            // Saved files never carry color codes
            let use_colors = config.output.color_output && !no_color && save.is_none();
            let generator = ReportGenerator::with_options(use_colors, config.output.pretty_json);
            let rendered = generator.generate_report(&report, &format)?;

            match save {
                Some(path) => {
                    let path = resolve_save_path(&path, &format, &input);
                    save_report_to_file(&rendered, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }

            if !report.has_data() {
                info!("No records in {}, sentiment summary is empty", input.display());
            }
            Ok(())
        }

        Commands::Config { action } => {
            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config)
                        .map_err(|e| AnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;
                    println!("{}", content);
                }
                Some(ConfigAction::Reset) => {
                    Config::default().save()?;
                    println!("Configuration reset to defaults at {}", Config::config_path().display());
                }
                Some(ConfigAction::Path) => {
                    println!("{}", Config::config_path().display());
                }
            }
            Ok(())
        }
    }
}
