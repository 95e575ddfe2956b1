//! Link CLI commands

use clap::Subcommand;

use crate::api::Backend;
use crate::display::format_link_list;
use crate::error::SpendlinkResult;
use crate::services::{AuthService, CollectionsService};
use crate::store::StoreHandle;

/// Link subcommands
#[derive(Subcommand)]
pub enum LinkCommands {
    /// List linked institutions
    List,
}

/// Handle a link command
pub async fn handle_link_command(
    backend: &dyn Backend,
    store: &StoreHandle,
    cmd: LinkCommands,
) -> SpendlinkResult<()> {
    AuthService::new(backend, store).require_authenticated()?;

    match cmd {
        LinkCommands::List => {
            let state = CollectionsService::new(backend, store)
                .refresh_links()
                .await?;
            println!("{}", format_link_list(&state.links));
        }
    }

    Ok(())
}
