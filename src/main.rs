use clap::Parser;

use relman::{Result, cli, command};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("relman")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli_args = cli::Args::parse();

    initialize_logger(cli_args.debug)?;

    let forge = command::common::get_forge(&cli_args)?;
    let config = command::common::load_configuration(&cli_args)?;

    match cli_args.command {
        cli::Command::Info => {
            command::info::execute(forge.as_ref(), &config).await
        }
        cli::Command::Stats { json } => {
            command::stats::execute(forge.as_ref(), &config, json).await
        }
        cli::Command::CreateRc => {
            command::create_rc::execute(forge.as_ref(), &config).await
        }
        cli::Command::PromoteRc => {
            command::promote_rc::execute(forge.as_ref(), &config).await
        }
        cli::Command::Patch { sha } => {
            command::patch::execute(forge.as_ref(), &config, &sha).await
        }
    }
}
