use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::settings::SettingsOverrides;

#[derive(Parser)]
#[command(name = "ncs-dashboard")]
#[command(about = "Interactive GHG, weather and forest-carbon dashboard")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Only log warnings and hide the load spinner")]
    pub quiet: bool,

    #[arg(short, long, global = true, help = "Settings file (TOML)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the dashboard on a local HTTP port
    Serve {
        #[arg(short, long, help = "Workbook with the GHG, AWS and carbon sheets [default: Database.xlsx]")]
        workbook: Option<PathBuf>,

        #[arg(long = "logo", help = "Header logo image, repeat for each logo")]
        logos: Vec<PathBuf>,

        #[arg(short, long, help = "Listening port [default: 3000]")]
        port: Option<u16>,

        #[arg(long, help = "Listening address [default: 127.0.0.1]")]
        host: Option<String>,

        #[arg(long, help = "Debug mode: verbose logs and control echo in responses")]
        debug: Option<bool>,
    },

    /// Display information about a workbook
    Info {
        #[arg(short, long)]
        workbook: Option<PathBuf>,
    },
}

impl Commands {
    pub fn overrides(&self) -> SettingsOverrides {
        match self {
            Commands::Serve {
                workbook,
                logos,
                port,
                host,
                debug,
            } => SettingsOverrides {
                host: host.clone(),
                port: *port,
                debug: *debug,
                workbook: workbook.clone(),
                logos: logos.clone(),
            },
            Commands::Info { workbook } => SettingsOverrides {
                workbook: workbook.clone(),
                ..SettingsOverrides::default()
            },
        }
    }
}
