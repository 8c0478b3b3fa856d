use chrono::{DateTime, Utc};
use recon_cache::Namespace;
use recon_core::enums::EntityKind;
use recon_match::Directory;
use recon_sync::BooksDirectoryLoader;
use serde::Serialize;

use crate::cli::DirectoryArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct DirectorySummary {
    kind: EntityKind,
    entries: usize,
    conflicting_names: usize,
    refreshed_at: Option<DateTime<Utc>>,
}

pub async fn handle(args: &DirectoryArgs, ctx: &AppContext) -> anyhow::Result<i32> {
    let client = ctx.books()?;
    let progress = Progress::spinner(ctx.flags.show_progress(), &format!("loading {} directory", args.kind));
    let mut loader = BooksDirectoryLoader::new(&client).with_cache(&ctx.cache, ctx.flags.refresh);
    let entities = loader.entities(args.kind).await;
    progress.finish_clear();
    let entities = entities?;

    if args.entries {
        output(&entities, ctx.flags.format)?;
        return Ok(0);
    }

    let directory = Directory::from_entities(entities.iter().cloned());
    let conflicting_names = entities
        .iter()
        .filter(|entity| directory.is_conflicting(&entity.display_name))
        .map(|entity| recon_core::normalize_name(&entity.display_name))
        .collect::<std::collections::BTreeSet<_>>()
        .len();
    let summary = DirectorySummary {
        kind: args.kind,
        entries: entities.len(),
        conflicting_names,
        refreshed_at: ctx.cache.refreshed_at(Namespace::Directory, args.kind.as_str()).await?,
    };
    output(&summary, ctx.flags.format)?;
    Ok(0)
}
