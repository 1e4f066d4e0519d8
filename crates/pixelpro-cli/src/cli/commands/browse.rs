//! `pixelpro browse` – interactive gallery session on stdin/stdout.

use anyhow::Result;
use pixelpro_core::config::PixelProConfig;
use pixelpro_core::http::{CurlTransport, Transport};
use pixelpro_core::local_store::FileStore;
use pixelpro_core::query::{MediaKind, Orientation};
use pixelpro_core::session::Session;
use pixelpro_core::surface::Surface;
use std::io::{BufRead, Write};

use crate::cli::terminal::TerminalSurface;

const HELP: &str = "\
Commands:
  more                     load the next page
  search <term>            new search
  photos | videos          switch media kind
  orientation <o|any>      landscape, portrait, square or any
  color <c|any>            color filter
  open <n>                 detail view for card n
  save <n>                 toggle save for card n
  download [n]             download card n, or the open detail item
  tag <n>                  search for tag n of the open detail
  related <n>              open related item n
  close                    close the detail view and saved list
  saved                    list saved items
  unsave <id>              remove a saved item by media id
  clear                    remove all saved items
  theme                    toggle light/dark
  help                     this text
  quit                     leave";

/// One line of interactive input. Card, tag and related numbers are 0-based
/// here; the user types the 1-based numbers that are printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Nothing,
    More,
    Search(String),
    Kind(MediaKind),
    Orientation(Option<Orientation>),
    Color(Option<String>),
    Open(usize),
    Save(usize),
    Download(Option<usize>),
    Tag(usize),
    Related(usize),
    Close,
    Saved,
    Unsave(u64),
    Clear,
    Theme,
    Help,
    Quit,
}

/// Parse one input line. Errors are user-facing messages.
pub fn parse_line(line: &str) -> Result<BrowseCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };
    let cmd = match word.to_ascii_lowercase().as_str() {
        "" => BrowseCommand::Nothing,
        "more" | "m" => BrowseCommand::More,
        "search" | "s" => {
            if rest.is_empty() {
                return Err("usage: search <term>".to_string());
            }
            BrowseCommand::Search(rest.to_string())
        }
        "photos" => BrowseCommand::Kind(MediaKind::Photos),
        "videos" => BrowseCommand::Kind(MediaKind::Videos),
        "orientation" => BrowseCommand::Orientation(match rest {
            "" | "any" | "none" => None,
            o => Some(o.parse().map_err(|e| format!("{e}"))?),
        }),
        "color" => BrowseCommand::Color(match rest {
            "" | "any" | "none" => None,
            c => Some(c.to_string()),
        }),
        "open" | "o" => BrowseCommand::Open(position(rest)?),
        "save" => BrowseCommand::Save(position(rest)?),
        "download" | "d" => BrowseCommand::Download(if rest.is_empty() {
            None
        } else {
            Some(position(rest)?)
        }),
        "tag" => BrowseCommand::Tag(position(rest)?),
        "related" | "r" => BrowseCommand::Related(position(rest)?),
        "close" => BrowseCommand::Close,
        "saved" => BrowseCommand::Saved,
        "unsave" => BrowseCommand::Unsave(
            rest.parse()
                .map_err(|_| "usage: unsave <media id>".to_string())?,
        ),
        "clear" => BrowseCommand::Clear,
        "theme" => BrowseCommand::Theme,
        "help" | "?" => BrowseCommand::Help,
        "quit" | "exit" | "q" => BrowseCommand::Quit,
        other => return Err(format!("unknown command: {other} (try 'help')")),
    };
    Ok(cmd)
}

/// 1-based number from the user to a 0-based position.
fn position(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("expected a number starting at 1, got '{arg}'")),
    }
}

pub fn run_browse(mut cfg: PixelProConfig, query: Option<String>, kind: MediaKind) -> Result<()> {
    if let Some(q) = query.filter(|q| !q.trim().is_empty()) {
        cfg.default_query = q.trim().to_string();
    }
    let transport = CurlTransport::new(&cfg.http);
    let store = FileStore::open_default()?;
    let mut session = Session::open(cfg, transport, store, TerminalSurface::stdout());

    match kind {
        MediaKind::Photos => session.start(),
        MediaKind::Videos => session.switch_kind(MediaKind::Videos),
    };

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let cmd = match parse_line(&line?) {
            Ok(cmd) => cmd,
            Err(msg) => {
                session.surface_mut().notice(&msg);
                continue;
            }
        };
        if cmd == BrowseCommand::Quit {
            break;
        }
        execute(&mut session, cmd);
    }

    session.close();
    Ok(())
}

/// Apply one command to the session. Failures surface as notices; the
/// loop keeps running.
fn execute<T, S>(session: &mut Session<T, S>, cmd: BrowseCommand)
where
    T: Transport,
    S: Surface,
{
    match cmd {
        BrowseCommand::Nothing | BrowseCommand::Quit => {}
        BrowseCommand::More => {
            session.load_more();
        }
        BrowseCommand::Search(term) => {
            session.search(&term);
        }
        BrowseCommand::Kind(kind) => {
            session.switch_kind(kind);
        }
        BrowseCommand::Orientation(o) => {
            session.set_orientation(o);
        }
        BrowseCommand::Color(c) => {
            session.set_color(c);
        }
        BrowseCommand::Open(i) => {
            if !session.open_card(i) {
                session.surface_mut().notice("No such card.");
            }
        }
        BrowseCommand::Save(i) => {
            if session.feed().get(i).is_none() {
                session.surface_mut().notice("No such card.");
            } else {
                session.toggle_save_card(i);
            }
        }
        BrowseCommand::Download(Some(i)) => {
            if session.feed().get(i).is_none() {
                session.surface_mut().notice("No such card.");
            } else {
                session.download_card(i);
            }
        }
        BrowseCommand::Download(None) => {
            if session.detail().is_none() {
                session.surface_mut().notice("Open an item first or give a card number.");
            } else {
                session.download_detail();
            }
        }
        BrowseCommand::Tag(i) => {
            if session.detail().map_or(true, |d| i >= d.tags.len()) {
                session.surface_mut().notice("No such tag.");
            } else {
                session.select_tag(i);
            }
        }
        BrowseCommand::Related(i) => {
            if !session.select_related(i) {
                session.surface_mut().notice("No such related item.");
            }
        }
        BrowseCommand::Close => {
            session.close_detail();
            session.close_saved_panel();
        }
        BrowseCommand::Saved => session.open_saved_panel(),
        BrowseCommand::Unsave(id) => {
            if session.saved().is_saved(id) {
                session.remove_saved(id);
            } else {
                session.surface_mut().notice("Not in saved items.");
            }
        }
        BrowseCommand::Clear => session.clear_saved(),
        BrowseCommand::Theme => {
            session.toggle_theme();
        }
        BrowseCommand::Help => {
            for line in HELP.lines() {
                session.surface_mut().notice(line);
            }
        }
    }
}
