use clap::Parser;
use log::*;
use zkp_cli::commands::{default_config_path, execute, load_engine_config, new_facade};
use zkp_cli::config::{CliCommand, Config, GlobalOptions};

#[tokio::main]
async fn main() {
    env_logger::init();
    let config: Config = Config::parse();
    let (global_options, command) = config.to_parts();

    match run(global_options, command).await {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("** Error ** \n {err}");
            std::process::exit(1);
        }
    }
}

async fn run(options: GlobalOptions, command: CliCommand) -> Result<String, anyhow::Error> {
    let path = options.config_file.unwrap_or_else(default_config_path);
    debug!("Loading engine configuration from {}", path.display());
    let engine_config = load_engine_config(&path)?;
    let zkp = new_facade(engine_config)?;
    let output = execute(&zkp, command).await?;
    Ok(output)
}
