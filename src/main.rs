use anyhow::Result;
use commitart::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    commitart::logging::init(cli.common.verbose);
    cli.execute()
}
