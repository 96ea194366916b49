//! Add record command handler

use crate::config::Config;
use crate::db::Store;
use crate::models::media::MediaState;

pub async fn cmd_add(
    config: &Config,
    title: &str,
    file: Option<&str>,
    state: &str,
    version: Option<&str>,
) -> anyhow::Result<()> {
    let state: MediaState = match state.parse() {
        Ok(s) => s,
        Err(e) => {
            println!("{e}");
            let names: Vec<&str> = MediaState::ALL.iter().map(|s| s.as_str()).collect();
            println!("Valid states: {}", names.join(", "));
            return Ok(());
        }
    };

    let store = Store::new(&config.general.database_path).await?;
    let id = store.insert_media(title, file, version, state).await?;

    println!("Added media item #{id}: {title} [{state}]");
    if let Some(file) = file {
        println!("  file: {file}");
    }
    if let Some(version) = version {
        println!("  version: {version}");
    }

    Ok(())
}
