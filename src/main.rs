use clap::Parser;
use tm4j_report::cli::commands::{TestrunArgs, cmd_feature, cmd_testrun};
use tm4j_report::cli::config::{Cli, Commands, load_config};
use tm4j_report::cli::logging::init_logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Testrun {
            xunit,
            user_key,
            comment,
            environment,
            output,
            pretty,
        } => {
            let args = TestrunArgs {
                xunit: &xunit,
                user_key: user_key.as_deref(),
                comment: comment.as_deref(),
                environment: environment.as_deref(),
                output: output.as_deref(),
                pretty,
            };
            cmd_testrun(&args, &config)?;
        }
        Commands::Feature {
            testcase,
            output_dir,
        } => {
            if !cmd_feature(&testcase, &output_dir)? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
