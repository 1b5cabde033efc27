use crate::prelude::*;
use clap::Parser;
use std::path::PathBuf;

mod error;
mod manifest;
mod plan;
mod prelude;
mod run;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Inject a constructor dependency into PHP controllers"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Project root that controller paths are resolved against
    #[clap(long, env = "CTORINJECT_ROOT", global = true, default_value = ".")]
    root: PathBuf,

    /// Whether to display additional information.
    #[clap(long, env = "CTORINJECT_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Inject the dependency into the listed controllers
    Run(crate::run::App),

    /// List the entity creation sites that still need the injected value
    Plan(crate::plan::App),
}

fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Run(sub_app) => crate::run::run(sub_app, app.global),
        SubCommands::Plan(sub_app) => crate::plan::run(sub_app, app.global),
    }
}
