use recon_match::resolve;
use recon_sync::{BooksDirectoryLoader, DirectoryLoader};

use crate::cli::ResolveArgs;
use crate::context::AppContext;
use crate::output::output;

/// Resolve one name; exits 1 when there is no usable match.
pub async fn handle(args: &ResolveArgs, ctx: &AppContext) -> anyhow::Result<i32> {
    let client = ctx.books()?;
    let mut loader = BooksDirectoryLoader::new(&client).with_cache(&ctx.cache, ctx.flags.refresh);
    let mut directory = loader.load(args.kind).await?;

    let result = resolve(&args.name, &mut directory, &ctx.match_config());
    output(&result, ctx.flags.format)?;
    Ok(i32::from(!result.decision.is_match()))
}
