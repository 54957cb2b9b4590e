use colored::Colorize;

use docket_server::{DocketServer, ServerConfig};
use docket_store::Registry;

use crate::cli::{Cli, Command, LsArgs, ServeArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Ls(args) => cmd_ls(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_path(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(root) = args.root {
        config.repos_root = root;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(DocketServer::new(config).serve())?;
    Ok(())
}

fn cmd_ls(args: LsArgs) -> anyhow::Result<()> {
    let registry = Registry::scan(args.root)?;
    if registry.is_empty() {
        println!("No repositories found.");
        return Ok(());
    }
    for repo in registry.repositories() {
        println!(
            "{} {}",
            repo.name().yellow().bold(),
            format!("({} documents)", repo.documents().len()).dimmed(),
        );
        for doc in repo.documents() {
            println!("  {doc}");
        }
    }
    Ok(())
}
