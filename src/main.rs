use clap::Parser;

use calc_autofill::cli::commands::{cmd_list, cmd_run, cmd_run_all};
use calc_autofill::cli::config::{load_config, Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Run {
            preset,
            presets_dir,
            profile,
            headed,
            output,
            format,
            verify_url,
        } => {
            let succeeded = cmd_run(
                &preset,
                presets_dir.as_deref(),
                profile.as_deref(),
                headed,
                output.as_deref(),
                &format,
                verify_url,
                &config,
                cli.verbose,
            )?;
            if !succeeded {
                std::process::exit(1);
            }
        }
        Commands::List { presets_dir } => {
            cmd_list(presets_dir.as_deref(), &config)?;
        }
        Commands::RunAll {
            presets_dir,
            profile,
            headed,
            parallel,
            format,
            output,
        } => {
            let all_succeeded = cmd_run_all(
                presets_dir.as_deref(),
                profile.as_deref(),
                headed,
                parallel,
                &format,
                output.as_deref(),
                &config,
                cli.verbose,
            )?;
            if !all_succeeded {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
