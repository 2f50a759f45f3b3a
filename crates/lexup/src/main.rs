//! lexup CLI
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use lexup::{Cli, Commands, commands};
use lexup_core::Session;
use lexup_core::config::ConfigLoader;
use tracing::debug;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // arg_required_else_help ensures we have --version-only or a subcommand
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = camino::Utf8PathBuf::try_from(cwd).map_err(|e| {
        anyhow::anyhow!(
            "current directory is not valid UTF-8: {}",
            e.into_path_buf().display()
        )
    })?;
    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(ref config_path) = cli.config {
        let config_path = camino::Utf8PathBuf::try_from(config_path.clone()).map_err(|e| {
            anyhow::anyhow!(
                "config path is not valid UTF-8: {}",
                e.into_path_buf().display()
            )
        })?;
        loader = loader.with_file(&config_path);
    }
    let (config, config_sources) = loader.load().context("failed to load configuration")?;

    let obs_config = observability::ObservabilityConfig::from_env_with_overrides(
        config
            .log_dir
            .as_ref()
            .map(|dir| dir.as_std_path().to_path_buf()),
    );
    let env_filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs_config, env_filter)
        .context("failed to initialize logging/tracing")?;

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        chdir = ?cli.chdir,
        "CLI initialized"
    );

    let max_input = config.input_limit();
    let session = Session::from_config(&config);
    let settings = session
        .settings()
        .clone()
        .overridden_by(&commands::saved_settings(&config));
    let session = session.with_settings(settings);

    // Execute command
    let result = match command {
        Commands::Scan(args) => commands::scan::cmd_scan(args, cli.json, &session, max_input),
        Commands::Score(args) => commands::score::cmd_score(args, cli.json, &session, max_input),
        Commands::Upgrade(args) => {
            commands::upgrade::cmd_upgrade(args, cli.json, &session, &config, max_input)
        }
        Commands::Synonyms(args) => commands::synonyms::cmd_synonyms(args, cli.json, &session),
        Commands::Spell(args) => {
            commands::spell::cmd_spell(args, cli.json, &session, &config, max_input)
        }
        Commands::Words(args) => commands::words::cmd_words(args, cli.json, &session),
        Commands::Review(args) => commands::review::cmd_review(args, cli.json, &session, &config),
        Commands::Quiz(args) => commands::quiz::cmd_quiz(args, cli.json, &session, &config),
        Commands::Progress(args) => commands::progress::cmd_progress(args, cli.json, &config),
        Commands::History(args) => commands::history::cmd_history(args, cli.json, &config),
        Commands::Saved(args) => commands::saved::cmd_saved(args, cli.json, &session, &config),
        Commands::Settings(args) => {
            commands::settings::cmd_settings(args, cli.json, &session, &config)
        }
        Commands::Info(args) => {
            commands::info::cmd_info(args, cli.json, &config, &config_sources, &session)
        }
        #[cfg(feature = "mcp")]
        Commands::Serve(args) => {
            let rt = tokio::runtime::Runtime::new()
                .context("failed to create async runtime for MCP server")?;
            rt.block_on(commands::serve::cmd_serve(args, max_input, session))
        }
    };
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}
