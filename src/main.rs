use clap::Parser;
use miette::{IntoDiagnostic, Result};

use emptrack::cli::{Cli, Session, TerminalPrompter};
use emptrack::core::{Config, EntityStore};

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let _cli = Cli::parse();
    let config = Config::load();

    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let database = config.database();
    tracing::info!(path = %database.display(), "opening store");
    let store = EntityStore::open(&database)
        .map_err(|e| miette::miette!("Could not open database {}: {}", database.display(), e))?;

    let stdout = std::io::stdout();
    let mut session = Session::new(store, TerminalPrompter::new(), stdout.lock());
    // Close before surfacing a fatal session error
    let outcome = session.run();
    let closed = session.close();
    outcome?;
    closed.into_diagnostic()?;

    Ok(())
}
