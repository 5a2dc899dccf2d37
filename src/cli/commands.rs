use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::readers::{PageAssets, WorkbookReader};
use crate::server::{serve, AppState};
use crate::settings::DashboardSettings;

/// Install the fmt subscriber; `RUST_LOG` takes precedence over the flags
pub fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ncs_dashboard={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

pub async fn run(cli: Cli) -> Result<()> {
    let settings = DashboardSettings::load(cli.config.as_deref(), cli.command.overrides())?;
    init_logging(cli.verbose || settings.debug, cli.quiet);

    match cli.command {
        Commands::Serve { .. } => {
            info!(
                workbook = %settings.workbook.display(),
                debug = settings.debug,
                "Starting dashboard"
            );

            let reader = WorkbookReader::with_silent(cli.quiet);
            let workbook = settings.workbook.clone();
            let data = tokio::task::spawn_blocking(move || reader.load(&workbook)).await??;

            let assets = PageAssets::load(&settings.logos)?;
            let state = AppState::new(data, &assets, settings.debug);

            serve(state, &settings.host, settings.port).await?;
        }

        Commands::Info { .. } => {
            println!("Analyzing workbook: {}", settings.workbook.display());

            let reader = WorkbookReader::with_silent(cli.quiet);
            let data = reader.load(&settings.workbook)?;

            println!("\n{}", data.summary());
        }
    }

    Ok(())
}
