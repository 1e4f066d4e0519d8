//! `pixelpro saved` – list, remove or clear saved items.

use anyhow::Result;
use pixelpro_core::local_store::FileStore;
use pixelpro_core::saved::SavedStore;

use crate::cli::terminal::format_saved;

fn open_saved() -> Result<SavedStore> {
    Ok(SavedStore::load(FileStore::open_default()?))
}

pub fn run_saved_list() -> Result<()> {
    let saved = open_saved()?;
    if saved.is_empty() {
        println!("No saved items yet.");
    } else {
        println!("{:<11} {:<6} {} {}", "ID", "TYPE", "CREATOR", "THUMBNAIL");
        for item in saved.items() {
            println!("{}", format_saved(item));
        }
    }
    Ok(())
}

pub fn run_saved_remove(id: u64) -> Result<()> {
    let mut saved = open_saved()?;
    if saved.remove(id)? {
        println!("Removed {} ({} left).", id, saved.len());
    } else {
        println!("{} is not saved.", id);
    }
    Ok(())
}

pub fn run_saved_clear() -> Result<()> {
    let mut saved = open_saved()?;
    let n = saved.len();
    saved.clear()?;
    println!("Cleared {} saved item(s).", n);
    Ok(())
}
