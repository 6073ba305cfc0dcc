//! Binary entry point.
//!
//! Thin driver over the library crate: load the environment, parse
//! arguments, initialize logging, then hand off to the bootstrap and the
//! reader loop.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use voxmail_cli::ui::{self, ViewPrefs};
use voxmail_cli::{Cli, Commands, bootstrap, fetch};
use voxmail_core::{ResolvedPaths, save_settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables first so env-backed flags see .env values
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging on stderr; the reader owns the screen
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Dispatch to appropriate handler
    match cli.command {
        Some(Commands::Paths) => {
            let paths = ResolvedPaths::resolve()?;
            println!("{paths}");
            Ok(())
        }
        None => read_mail(cli).await,
    }
}

/// Fetch the inbox and run the reader until the user quits.
async fn read_mail(cli: Cli) -> anyhow::Result<()> {
    // Bootstrap the application context (composition root)
    let mut ctx = bootstrap(&cli).await?;

    let messages =
        fetch::load_inbox(&ctx.gmail, &ctx.speech, ctx.settings.effective_fetch_limit()).await?;

    let prefs = ViewPrefs {
        rate_wpm: ctx.settings.effective_rate_wpm(),
        speak_on_scroll: ctx.settings.effective_speak_on_scroll(),
        show_urls: ctx.settings.effective_show_urls(),
    };
    let final_prefs = ui::run(&messages, &ctx.speech, prefs)?;

    // Carry preferences changed inside the reader over to the next run
    if final_prefs != prefs {
        ctx.settings.rate_wpm = Some(final_prefs.rate_wpm);
        ctx.settings.speak_on_scroll = Some(final_prefs.speak_on_scroll);
        ctx.settings.show_urls = Some(final_prefs.show_urls);
        save_settings(&ctx.paths.settings_path, &ctx.settings)?;
    }

    ctx.speech.shutdown();
    Ok(())
}
