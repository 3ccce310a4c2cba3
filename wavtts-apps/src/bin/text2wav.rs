use std::process::ExitCode;

use tracing::{debug, error, info};
use wavtts_apps::{
    utils::init_tracing, AppConfig, Args, Error, FAILURE_EXIT_CODE, USAGE_EXIT_CODE,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    let args = match Args::try_parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => {
            debug!(kind = ?e.kind(), "invalid invocation");
            println!("{}", Args::usage());
            return ExitCode::from(USAGE_EXIT_CODE);
        }
    };
    debug!(?args);

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e:?}");
            ExitCode::from(FAILURE_EXIT_CODE)
        }
    }
}

async fn run(args: &Args) -> Result<(), Error> {
    let config = AppConfig::from_env()?;
    debug!(?config);
    let summary = wavtts_apps::run(args, &config).await?;
    info!(
        path = ?args.output_path,
        channels = summary.channels,
        sample_rate = summary.sample_rate,
        duration_secs = summary.duration_secs(),
        "wrote wav"
    );
    Ok(())
}
