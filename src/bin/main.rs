extern crate clap;
extern crate cmdk;
extern crate env_logger;
#[macro_use]
extern crate log;

use std::io::{BufRead, BufReader, IsTerminal, Write};

use clap::Parser;
use cmdk::prelude::*;
use color_eyre::Result;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

//------------------------------------------------------------------------------
fn main() {
    env_logger::builder().format_timestamp_nanos().init();

    match real_main() {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            let _ = writeln!(std::io::stderr(), "{err}");
            std::process::exit(2)
        }
    }
}

fn stdin_items() -> Result<Vec<Arc<CommandItem>>> {
    let mut items = Vec::new();
    for (idx, line) in BufReader::new(std::io::stdin()).lines().enumerate() {
        let line = line?;
        if !line.is_empty() {
            items.push(Arc::new(CommandItem::new(idx.to_string(), line)));
        }
    }
    Ok(items)
}

// Shown when nothing is piped in, so plain `cmdk` demonstrates the palette.
fn demo_groups() -> Vec<CommandGroup> {
    vec![
        CommandGroup::new(
            "file",
            "File",
            vec![
                Arc::new(CommandItem::new("open", "Open File").keywords(["edit"])),
                Arc::new(CommandItem::new("save", "Save File")),
                Arc::new(CommandItem::new("close", "Close File")),
            ],
        ),
        CommandGroup::new(
            "view",
            "View",
            vec![
                Arc::new(CommandItem::new("zoom-in", "Zoom In").description("Ctrl+=")),
                Arc::new(CommandItem::new("zoom-out", "Zoom Out").description("Ctrl+-")),
            ],
        ),
    ]
}

fn real_main() -> Result<i32> {
    color_eyre::install()?;
    let mut opts = CommandOptions::parse();

    if !std::io::stdin().is_terminal() {
        opts.items = stdin_items()?;
    } else {
        opts.groups = demo_groups();
    }
    info!("starting with {} items", opts.items.len());

    let mut command = Command::from_options(&opts);
    let mut view = CommandView::from_options(&opts)?;

    // draw on stderr so the selection can be piped from stdout
    enable_raw_mode()?;
    crossterm::execute!(std::io::stderr(), EnterAlternateScreen, EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stderr()))?;

    let selected = run(&mut terminal, &mut command, &mut view);

    crossterm::execute!(std::io::stderr(), DisableBracketedPaste, LeaveAlternateScreen)?;
    disable_raw_mode()?;

    match selected? {
        Some(item) => {
            println!("{}", item.value.as_deref().unwrap_or(&item.label));
            Ok(0)
        }
        None => Ok(130),
    }
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stderr>>,
    command: &mut Command,
    view: &mut CommandView,
) -> Result<Option<Arc<CommandItem>>> {
    loop {
        terminal.draw(|frame| view.draw(frame, command))?;

        match crossterm::event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let KeyOutcome::Committed(item) = command.handle_key(&key) {
                    return Ok(Some(item));
                }
                if !command.is_open() {
                    return Ok(None);
                }
            }
            Event::Resize(..) => {}
            _ => {}
        }
    }
}
