//! Command line arguments of the launcher

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spacebears")]
#[command(about = "Load and check the Spacebears startup configuration")]
#[command(version)]
pub struct Args {
    /// Only read environment variables starting with this prefix
    #[arg(long, env = "SPACEBEARS_ENV_PREFIX")]
    pub prefix: Option<String>,

    /// Print the loaded configuration, password redacted
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub print: Option<PrintFormat>,

    /// Write an example env file to PATH and exit
    #[arg(long, value_name = "PATH", conflicts_with = "print")]
    pub write_example: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintFormat {
    Yaml,
    Json,
}
