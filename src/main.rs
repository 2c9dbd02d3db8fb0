// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config layers --> NAME=value --> Logging
//!   --> Host detection (once) --> Command Dispatch
//!   Run | Help | List | Options | Sources | Platform
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use chore_rs::cli::run::RunArgs;
use chore_rs::cli::{self, Cli, Command};
use chore_rs::cmd::config::{run_options_command, run_sources_command};
use chore_rs::cmd::help::run_help_command;
use chore_rs::cmd::list::run_list_command;
use chore_rs::cmd::platform::{resolve_host, run_platform_command};
use chore_rs::cmd::run::run_tasks;
use chore_rs::config::loader::ConfigLoader;
use chore_rs::config::vars::parse_assignment;
use chore_rs::config::{Config, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use chore_rs::error::Result;
use chore_rs::logging::{LogConfig, LogGuard, init_logging};
use chore_rs::output::{Console, Palette};
use chore_rs::platform::detect::SystemProbe;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Configuration plus what the loader knew about its sources.
struct Loaded {
    config: Config,
    sources: Vec<String>,
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();
    let command = cli.command_or_default();

    if matches!(command, Command::Version) {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let loaded = match load_config(&cli, &command) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging_from(&loaded.config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch_command(command, loaded).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Console::new(Palette::ANSI).error(format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn init_logging_from(config: &Config) -> Result<LogGuard> {
    let log_config = LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build();
    init_logging(&log_config)
}

async fn dispatch_command(command: Command, loaded: Loaded) -> Result<()> {
    let Loaded {
        config,
        sources,
        files,
    } = loaded;

    match command {
        Command::Options => {
            run_options_command(&config);
            Ok(())
        }
        Command::Sources => {
            run_sources_command(&sources);
            Ok(())
        }
        Command::List(args) => run_list_command(&args, &config),
        Command::Platform => {
            let (detection, host) = resolve_host(&config, &SystemProbe).await?;
            run_platform_command(&detection, &host);
            Ok(())
        }
        Command::Help(args) => {
            let (_, host) = resolve_host(&config, &SystemProbe).await?;
            run_help_command(&args, &config, &host, &files)
        }
        Command::Run(args) => {
            let (_, host) = resolve_host(&config, &SystemProbe).await?;
            run_tasks(&args, config, host, files).await
        }
        Command::Version => {
            handle_version_command();
            Ok(())
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(cli: &Cli) -> Result<ConfigLoader> {
    let global = &cli.global;
    let mut loader = ConfigLoader::new();

    if !global.no_default_config {
        loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
    }
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);

    for option in global.to_config_overrides() {
        loader = loader.set_option(&option)?;
    }
    Ok(loader)
}

fn load_config(cli: &Cli, command: &Command) -> Result<Loaded> {
    let loader = build_config_loader(cli)?;
    let sources = loader.format_loaded_files();
    let files = loader.loaded_files();
    let mut config = loader.build()?;

    if let Command::Run(args) = command {
        apply_run_assignments(&mut config, args)?;
    }

    Ok(Loaded {
        config,
        sources,
        files,
    })
}

/// `NAME=value` items win over every other layer.
fn apply_run_assignments(config: &mut Config, args: &RunArgs) -> Result<()> {
    let assignments = args
        .assignments()
        .map(parse_assignment)
        .collect::<Result<Vec<_>>>()?;
    if assignments.is_empty() {
        return Ok(());
    }

    config.apply_assignments(&assignments);
    config.resolve_and_validate()?;
    Ok(())
}
