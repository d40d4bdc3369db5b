//! Command dispatch: bridges CLI args -> catalog calls -> output formatting.

pub mod albums;
pub mod artists;
pub mod config_cmd;
pub mod util;
pub mod watch;

use encore_core::Catalog;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a catalog-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    catalog: &Catalog,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Artist(args) => artists::handle(catalog, args, global).await,
        Command::Album(args) => albums::handle(catalog, args, global).await,
        Command::Watch(args) => watch::handle(catalog, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Validation {
            field: "command".into(),
            reason: "does not need a catalog connection".into(),
        }),
    }
}
