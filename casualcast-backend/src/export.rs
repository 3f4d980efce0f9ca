use anyhow::{Context, Result};
use serde::Serialize;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use crate::fetch::FeedSource;
use crate::pages::Site;

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Pre-generate every page into `out`.
///
/// `index.json`, `paths.json` and `episodes/<id>.json` all come from the same
/// snapshot, so their ids agree. Episode pages of earlier exports are removed.
pub(crate) async fn export<S: FeedSource>(site: &Site<S>, out: &Path) -> Result<()> {
    let snapshot = site.snapshot().await?;
    let episodes_dir = out.join("episodes");
    match tokio::fs::remove_dir_all(&episodes_dir).await {
        Err(e) if e.kind() != ErrorKind::NotFound => {
            return Err(e).with_context(|| format!("Failed to clear {}", episodes_dir.display()));
        }
        _ => {}
    }
    tokio::fs::create_dir_all(&episodes_dir)
        .await
        .with_context(|| format!("Failed to create {}", episodes_dir.display()))?;

    write_json(&out.join("index.json"), &site.index_props(&snapshot)).await?;

    let paths = site.static_paths(&snapshot);
    write_json(&out.join("paths.json"), &paths).await?;

    let mut written = 0;
    for id in paths.ids() {
        let page = site.episode_props(&snapshot, id);
        write_json(&episodes_dir.join(format!("{}.json", id)), &page).await?;
        written += 1;
    }
    tracing::info!("exported {} episode pages to {}", written, out.display());
    Ok(())
}

/// Export, then export again every time the regeneration interval elapses, until Ctrl-C.
pub(crate) async fn watch<S: FeedSource>(site: &Site<S>, out: &Path) -> Result<()> {
    let period = site.revalidate().max(Duration::from_secs(1));
    let mut ticker = tokio::time::interval(period);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // a failed generation keeps the previous files; the next tick tries again
                if let Err(e) = export(site, out).await {
                    tracing::error!("export failed: {:#}", e);
                }
            }
            signal = &mut ctrl_c => {
                signal.context("Failed to listen for Ctrl-C")?;
                tracing::info!("stopping");
                return Ok(());
            }
        }
    }
}
