use std::path::PathBuf;

use clap::Parser;
use wavtts::Synthesizer;
use wavtts_cmd::LocalCommand;

#[derive(Debug, Parser)]
struct Args {
    text: String,
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), wavtts::Error> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let synthesizer = LocalCommand::from_env();
    let wait = synthesizer.synthesize_to_file(&args.text, &args.output)?;
    wait.await?;
    println!("{:?}", wavtts::verify_wav(&args.output)?);
    Ok(())
}
