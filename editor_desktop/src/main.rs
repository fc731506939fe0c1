//! lineedit - Line-oriented text editor.
//!
//! Usage: lineedit [FILE]
//!
//! Reads one command per line from standard input. `p` prints the
//! document, `q` quits, everything else is an editor command such as
//! `/pattern`, `s/old/new/g`, `i text`, `u` or `w`.

mod render;

use lineedit_core::{Command, Editor, Theme};
use std::env;
use std::io::{self, BufRead, Write};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting lineedit");

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let file_path = args.get(1).cloned();

    let mut editor = Editor::new();
    let theme = Theme::default();

    // Open file if provided
    if let Some(path) = file_path {
        log::info!("Opening file: {}", path);
        if let Err(e) = editor.open_file(&path) {
            log::error!("Failed to open file '{}': {}", path, e);
        }
    }

    if let Err(e) = run(&mut editor, &theme) {
        log::error!("Input error: {}", e);
    }

    if editor.is_modified() {
        log::warn!("Exiting with unsaved changes");
    }
    log::info!("lineedit exited");
}

fn run(editor: &mut Editor, theme: &Theme) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "q" | "quit" => break,
            "p" | "print" => {
                stdout.write_all(render::render(editor, theme).as_bytes())?;
                stdout.flush()?;
                continue;
            }
            _ => {}
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                log::warn!("{}", e);
                continue;
            }
        };
        log::debug!("Executing {:?}", command);

        match editor.execute(command) {
            Ok(true) => {}
            Ok(false) => log::info!("No change"),
            Err(e) => log::error!("{}", e),
        }
        writeln!(stdout, "{}", render::status_line(editor))?;
    }
    Ok(())
}
