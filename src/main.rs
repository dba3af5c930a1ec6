use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

mod aggregate;
mod browsers;
mod chromium;
mod firefox;
mod launcher;
mod picker;

use browsers::{BrowserKind, SourceGroup};

#[derive(Parser)]
#[command(name = "fzbmark")]
#[command(about = "Find and open bookmarks from locally installed browsers", long_about = None)]
#[command(version)]
struct Cli {
    /// Only use this browser's bookmarks (firefox, chrome, chromium, brave)
    #[arg(short, long, global = true)]
    browser: Option<String>,

    /// Extra bookmark storage file, as BROWSER=PATH (repeatable)
    #[arg(long = "path", global = true, value_name = "BROWSER=PATH")]
    paths: Vec<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List detected browsers and their bookmark files
    Browsers,

    /// List all bookmarks without opening anything
    List {
        /// Also print each bookmark's URL
        #[arg(short, long)]
        debug: bool,
    },

    /// Search bookmarks by term and pick one to open
    Search {
        /// Substring matched against title, URL and folder
        term: String,
    },

    /// Fuzzy-pick a bookmark with fzf and open it (the default)
    Pick,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let only = match cli.browser.as_deref() {
        Some(name) => match BrowserKind::parse(name) {
            Some(kind) => Some(kind),
            None => {
                eprintln!(
                    "❌ Unknown browser: {}. Use firefox, chrome, chromium or brave",
                    name
                );
                std::process::exit(1);
            }
        },
        None => None,
    };

    let mut sources = browsers::locate()?;
    apply_path_overrides(&mut sources, &cli.paths);

    match cli.command.unwrap_or(Commands::Pick) {
        Commands::Browsers => list_browsers(&sources),
        Commands::List { debug } => list_bookmarks(&sources, only, debug),
        Commands::Search { term } => search(&sources, only, &term)?,
        Commands::Pick => pick(&sources, only)?,
    }

    Ok(())
}

/// Fold `--path BROWSER=PATH` arguments into the located sources.
fn apply_path_overrides(sources: &mut SourceGroup, overrides: &[String]) {
    for entry in overrides {
        let Some((name, path)) = entry.split_once('=') else {
            eprintln!("❌ Invalid --path value: {}. Expected BROWSER=PATH", entry);
            std::process::exit(1);
        };
        let Some(kind) = BrowserKind::parse(name) else {
            eprintln!(
                "❌ Unknown browser in --path: {}. Use firefox, chrome, chromium or brave",
                name
            );
            std::process::exit(1);
        };
        browsers::add_override(sources, kind, PathBuf::from(path));
    }
}

fn list_browsers(sources: &SourceGroup) {
    println!("Detected browsers with bookmarks:");
    if sources.is_empty() {
        println!("  None detected");
        println!();
        println!("If your browser keeps its profiles somewhere unusual, pass the");
        println!("storage file explicitly, e.g.:");
        println!("  fzbmark --path firefox=$HOME/.mozilla/firefox/abc.default/places.sqlite");
        return;
    }
    for (kind, paths) in sources {
        println!("  {}: {} profile(s)", kind, paths.len());
        for path in paths {
            println!("    - {}", path.display());
        }
    }
}

fn list_bookmarks(sources: &SourceGroup, only: Option<BrowserKind>, debug: bool) {
    let bookmarks = aggregate::collect(sources, only);
    if bookmarks.is_empty() {
        print_empty_help();
        return;
    }

    for (i, bookmark) in bookmarks.iter().enumerate() {
        println!(
            "{:4}. {:60} | {}{}",
            i + 1,
            truncate(&bookmark.title, 60),
            bookmark.source,
            folder_suffix(&bookmark.folder)
        );
        if debug {
            println!("      {}", bookmark.url);
        }
    }
}

fn search(sources: &SourceGroup, only: Option<BrowserKind>, term: &str) -> Result<()> {
    let bookmarks = aggregate::collect(sources, only);
    if bookmarks.is_empty() {
        print_empty_help();
        return Ok(());
    }

    let matches = aggregate::filter(&bookmarks, term);
    if matches.is_empty() {
        println!("No bookmarks found matching '{}'", term);
        return Ok(());
    }

    println!("Found {} bookmarks matching '{}':", matches.len(), term);
    for (i, bookmark) in matches.iter().enumerate() {
        println!(
            "{:3}. {} ({}{})",
            i + 1,
            bookmark.title,
            bookmark.source,
            folder_suffix(&bookmark.folder)
        );
    }

    print!("\nSelect bookmark number (or Enter to cancel): ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let choice = input.trim();
    if choice.is_empty() {
        return Ok(());
    }
    match choice.parse::<usize>() {
        Ok(n) if n >= 1 && n <= matches.len() => {
            let selected = matches[n - 1];
            launch(&selected.url, Some(selected.source));
        }
        _ => println!("Invalid selection"),
    }
    Ok(())
}

fn pick(sources: &SourceGroup, only: Option<BrowserKind>) -> Result<()> {
    let bookmarks = aggregate::collect(sources, only);
    if bookmarks.is_empty() {
        print_empty_help();
        return Ok(());
    }

    match picker::pick(&bookmarks) {
        Ok(Some(selection)) => launch(&selection.url, selection.source),
        Ok(None) => {} // cancelled in fzf
        Err(picker::PickerError::NotInstalled) => {
            eprintln!("Error: fzf not found. Please install fzf to use interactive mode.");
            eprintln!("You can use the `search` or `list` commands instead.");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn launch(url: &str, source: Option<BrowserKind>) {
    let command = source.map(|kind| kind.launch_command());
    if let Err(e) = launcher::open_url(url, command) {
        eprintln!("Error opening browser: {:#}", e);
    }
}

fn print_empty_help() {
    println!("No bookmarks found in any browser!");
    println!();
    println!("If browsers are not auto-detected:");
    println!("1. Run `fzbmark browsers` to see what was detected");
    println!("2. Pass storage files explicitly with --path BROWSER=PATH");
    println!("3. Common paths to try:");
    println!("   - Firefox:  ~/.mozilla/firefox/*/places.sqlite");
    println!("   - Chrome:   ~/.config/google-chrome/*/Bookmarks");
    println!("   - Chromium: ~/.config/chromium/*/Bookmarks");
}

fn folder_suffix(folder: &str) -> String {
    if folder.is_empty() {
        String::new()
    } else {
        format!(" [{}]", folder)
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
