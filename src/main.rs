use challengize_config::Config;
use challengize_exporter::{
    init_errors,
    init_logging,
    run,
    Args,
};
use clap::Parser;
use color_eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    init_errors()?;
    let args = Args::parse();
    init_logging(args.verbose)?;
    run(Config::load(args)?).await
}
