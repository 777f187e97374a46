use std::io;

use anyhow::Context;
use clap::Parser;

use stockledger_cli::settings::Cli;
use stockledger_cli::{commands, menu};
use stockledger_infra::Ledger;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    stockledger_observability::init(cli.log_format);

    let path = cli.database_path()?;
    let mut ledger = Ledger::open(&path)
        .await
        .with_context(|| format!("failed to open inventory database at {}", path.display()))?;

    let outcome = match cli.command {
        None => menu::run(&mut ledger, io::stdin().lock(), io::stdout()).await,
        Some(command) => {
            commands::run(&mut ledger, command, cli.json, &mut io::stdout().lock()).await
        }
    };

    ledger.close().await;
    outcome
}
