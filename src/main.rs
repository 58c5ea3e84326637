use std::io::IsTerminal;

use clap::Parser;
use tracing::debug;

use retaildash::adapter::inbound::cli::command::{Cli, ColorChoice, Commands, ConfigCommand};
use retaildash::adapter::inbound::cli::output::{self, OutputConfig};
use retaildash::adapter::inbound::cli::{config, dashboard, facets, paths};
use retaildash::error::Result;
use retaildash::infrastructure::config::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
    };
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose, color));

    if let Err(err) = run(cli).await {
        output::error(&err.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // `config init` must work even when the existing file is broken.
    if let Commands::Config(ConfigCommand::Init(args)) = &cli.command {
        return config::execute_init(&args.path, args.force);
    }

    let settings = Config::load_or_default(cli.config.as_deref(), &paths::default_config())?;
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => Some("error"),
        (false, 0) => None,
        (false, 1) => Some("debug"),
        (false, _) => Some("trace"),
    };
    settings.logging.init(level);
    debug!(version = env!("CARGO_PKG_VERSION"), "retaildash starting");

    match &cli.command {
        Commands::Inventory(args) => dashboard::execute_inventory(&settings, args).await,
        Commands::Sales(args) => dashboard::execute_sales(&settings, args).await,
        Commands::Facets(args) => facets::execute(&settings, args.dashboard).await,
        Commands::Config(ConfigCommand::Show) => config::execute_show(&settings),
        Commands::Config(ConfigCommand::Validate) => {
            let default_path = paths::default_config();
            let path = cli
                .config
                .as_deref()
                .or_else(|| default_path.is_file().then_some(default_path.as_path()));
            config::execute_validate(path, &settings)
        }
        Commands::Config(ConfigCommand::Init(_)) => Ok(()),
    }
}
