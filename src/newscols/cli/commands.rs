use super::render::{print_json, print_result};
use super::setup::{Cli, Commands};
use clap::Parser;
use newscols::api::{CmdResult, ConfigAction, NewscolsApi};
use newscols::config::NewscolsConfig;
use newscols::error::Result;
use newscols::store::fs::FileStore;
use std::path::PathBuf;

struct AppContext {
    api: NewscolsApi<FileStore>,
    json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    let result = match cli.command {
        Some(Commands::New { document, block }) => {
            ctx.api.new_block(&document, block.as_deref())?
        }
        Some(Commands::Set {
            document,
            block,
            assignments,
        }) => ctx.api.set_attributes(&document, block, &assignments)?,
        Some(Commands::Style { document, block }) => ctx.api.style(&document, block)?,
        Some(Commands::Show { document }) => ctx.api.show(document.as_deref())?,
        Some(Commands::Check { document, heal }) => ctx.api.check(&document, heal)?,
        Some(Commands::Schema { block }) => ctx.api.schema(block.as_deref())?,
        Some(Commands::Config { key, value }) => {
            let action = match (key, value) {
                (None, _) => ConfigAction::ShowAll,
                (Some(k), None) => ConfigAction::ShowKey(k),
                (Some(k), Some(v)) => ConfigAction::Set(k, v),
            };
            ctx.api.config(action)?
        }
        None => ctx.api.show(None)?,
    };

    output(&ctx, &result)
}

fn output(ctx: &AppContext, result: &CmdResult) -> Result<()> {
    if ctx.json {
        print_json(result)
    } else {
        print_result(result);
        Ok(())
    }
}

/// `warn` unless `-v`; `RUST_LOG` overrides both.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let work_dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let config_dir = NewscolsConfig::locate(&work_dir);
    let config = NewscolsConfig::load(&config_dir).unwrap_or_else(|e| {
        log::warn!("ignoring unreadable config in {}: {}", config_dir.display(), e);
        NewscolsConfig::default()
    });
    log::debug!(
        "documents in {}, config in {}",
        work_dir.display(),
        config_dir.display()
    );

    let store = FileStore::new(work_dir).with_file_ext(&config.document_ext);
    Ok(AppContext {
        api: NewscolsApi::new(store, config_dir),
        json: cli.json,
    })
}
