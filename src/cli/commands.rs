//! CLI command handlers

use anyhow::{Context, Result};
use clap_complete::generate;
use colored::Colorize;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use crate::export::{ExportConfig, ExportEngine, ExportStorage};
use crate::library::{LibraryNode, LibraryTree, load_container};
use crate::xspf::{Element, XSPF_VERSION, XspfDocument};

/// Handle the `export` command
pub async fn export(
    input: PathBuf,
    dest: Option<PathBuf>,
    flat: bool,
    folders: bool,
    dry_run: bool,
) -> Result<()> {
    let config = ExportConfig::load()?;
    let dest = dest.unwrap_or_else(|| config.dest_or_default());
    let flat = config.resolve_flat(flat, folders);

    let entries = load_container(&input)?;
    println!(
        "Exporting {} container entries to {}{}",
        entries.len(),
        dest.display().to_string().cyan(),
        if flat { " (flat)" } else { "" }
    );

    let engine = ExportEngine::new(ExportStorage::new(dest, flat))
        .dry_run(dry_run)
        .show_progress(io::stderr().is_terminal());
    let result = engine.run(entries).await?;

    if dry_run {
        println!();
        println!("{}", "[DRY RUN] Would write:".yellow());
        for path in &result.paths {
            println!("  {}", path.display());
        }
        return Ok(());
    }

    println!();
    println!("{}", "Export complete!".green().bold());
    println!("  Playlists written: {}", result.playlists_written);
    println!("  Tracks written: {}", result.tracks_written);

    if !result.diagnostics.is_empty() {
        println!();
        println!(
            "{}",
            format!("Skipped {} unrecognized entries:", result.diagnostics.len()).yellow()
        );
        for diagnostic in &result.diagnostics {
            println!("  - {}", diagnostic);
        }
    }

    if !result.failed.is_empty() {
        println!();
        println!(
            "{}",
            format!("Failed to write {} playlist(s):", result.failed.len()).red()
        );
        for name in &result.failed {
            println!("  - {}", name);
        }
        anyhow::bail!("{} playlist(s) could not be exported", result.failed.len());
    }

    Ok(())
}

/// Handle the `tree` command
pub fn tree(input: PathBuf) -> Result<()> {
    let entries = load_container(&input)?;
    let tree = LibraryTree::from_entries(entries)?;

    if tree.roots.is_empty() {
        println!("{}", "Container holds no playlists.".yellow());
        return Ok(());
    }

    for node in &tree.roots {
        print_node(node, 0);
    }

    println!();
    println!("{} playlist(s)", tree.playlist_count());
    for diagnostic in &tree.diagnostics {
        println!("  {} {}", "warning:".yellow(), diagnostic);
    }

    Ok(())
}

fn print_node(node: &LibraryNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        LibraryNode::Playlist(model) => {
            println!("{}{} ({} tracks)", indent, model.name, model.tracks.len());
        }
        LibraryNode::Folder { name, children } => {
            println!("{}{}/", indent, name.cyan().bold());
            for child in children {
                print_node(child, depth + 1);
            }
        }
    }
}

/// Handle the `show` command
pub fn show(file: &Path) -> Result<()> {
    let xml = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let document = XspfDocument::parse(&xml)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    let root = &document.root;

    if root.name != "playlist" {
        anyhow::bail!("{} is not an XSPF playlist", file.display());
    }
    if root.attribute("version") != Some(XSPF_VERSION) {
        tracing::warn!(
            "Unexpected XSPF version {:?} in {}",
            root.attribute("version"),
            file.display()
        );
    }

    let field = |element: &Element, name: &str| {
        element
            .child(name)
            .map(|c| c.text().to_string())
            .unwrap_or_default()
    };

    println!("{}", field(root, "title").green().bold());
    println!("  Creator:  {}", field(root, "creator"));
    if let Some(annotation) = root.child("annotation") {
        println!("  Note:     {}", annotation.text());
    }
    println!("  Location: {}", field(root, "location"));

    let tracks: Vec<&Element> = root
        .child("trackList")
        .map(|list| list.children_named("track").collect())
        .unwrap_or_default();
    println!("  Tracks:   {}", tracks.len());

    for (idx, track) in tracks.iter().enumerate() {
        let starred = if track.child("annotation").is_some_and(|a| a.text() == "Starred") {
            " *".yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "    {:>3}. {} - {}{}",
            idx + 1,
            field(track, "creator"),
            field(track, "title"),
            starred
        );
    }

    Ok(())
}

/// Handle the `config` command
pub fn config(dest: Option<PathBuf>, flat: Option<bool>) -> Result<()> {
    let mut config = ExportConfig::load()?;

    if dest.is_some() || flat.is_some() {
        if let Some(dest) = dest {
            config.dest = Some(dest);
        }
        if let Some(flat) = flat {
            config.flat = flat;
        }
        config.save()?;
        println!("{}", "Export defaults saved.".green());
    }

    println!("  Config file: {}", ExportConfig::config_path()?.display());
    println!("  Destination: {}", config.dest_or_default().display());
    println!("  Flat:        {}", config.flat);

    Ok(())
}

/// Handle the `completion` command
pub fn completion(shell: clap_complete::Shell) {
    let mut cmd = super::Cli::command();
    generate(shell, &mut cmd, "xspf-export", &mut io::stdout());
}

// Extension trait for Cli to get clap Command
impl super::Cli {
    fn command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }
}
