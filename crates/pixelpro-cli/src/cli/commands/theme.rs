//! `pixelpro theme` – show or toggle the persisted theme.

use anyhow::Result;
use pixelpro_core::local_store::FileStore;
use pixelpro_core::theme;

pub fn run_theme_show() -> Result<()> {
    let store = FileStore::open_default()?;
    println!("{}", theme::load_or_default(&store).as_str());
    Ok(())
}

pub fn run_theme_toggle() -> Result<()> {
    let mut store = FileStore::open_default()?;
    let next = theme::load_or_default(&store).toggled();
    theme::save(&mut store, next)?;
    println!("{}", next.as_str());
    Ok(())
}
