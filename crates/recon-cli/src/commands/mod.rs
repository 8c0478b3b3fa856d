use crate::cli::Commands;
use crate::context::AppContext;

pub mod classify;
pub mod directory;
pub mod resolve;
pub mod search;
pub mod sync;

/// Run one command; the returned value is the process exit status.
pub async fn dispatch(command: Commands, ctx: &AppContext) -> anyhow::Result<i32> {
    match command {
        Commands::Classify => classify::handle(ctx).await,
        Commands::Search(args) => search::handle(&args, ctx).await,
        Commands::Directory(args) => directory::handle(&args, ctx).await,
        Commands::Resolve(args) => resolve::handle(&args, ctx).await,
        Commands::Sync(args) => sync::handle(&args, ctx).await,
    }
}
