mod assets;
mod pack;
mod watcher;

use std::path::Path;

use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

#[derive(Parser)]
#[command(name = "smithy", about = "Smithing content pack tools")]
struct Cli {
    /// Pack root (the directory containing assets/smithing/)
    #[arg(long)]
    pack: Option<String>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Load the pack and report what it defines
    Validate,
    /// Re-validate whenever a pack file changes
    Watch,
}

fn main() {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    let root = assets::resolve_pack_root(cli.pack.clone());
    log::info!("Using pack root {}", root.display());

    match cli.cmd.unwrap_or(Cmd::Validate) {
        Cmd::Validate => {
            if !validate(&root) {
                std::process::exit(1);
            }
        }
        Cmd::Watch => watch(&root),
    }
}

fn validate(root: &Path) -> bool {
    match pack::ContentPack::load(root) {
        Ok(pack) => {
            let s = pack.summary();
            log::info!(
                "Pack OK: {} steps, {} recipes over {} items ({} chained), {} lamp fuels, {} woods contributing {} blocks",
                s.steps,
                s.recipes,
                s.items,
                s.chained_recipes,
                s.fuels,
                s.woods,
                s.wood_blocks
            );
            true
        }
        Err(e) => {
            log::error!("Pack failed to load: {}", e);
            false
        }
    }
}

fn watch(root: &Path) {
    let dir = assets::pack_dir(root);
    let rx = watcher::spawn_pack_watcher(dir.clone());
    validate(root);
    log::info!("Watching {} for changes", dir.display());
    while let Ok(first) = rx.recv() {
        // Editors fire bursts of events per save; coalesce them.
        let mut changed = vec![first];
        while let Ok(more) = rx.recv_timeout(std::time::Duration::from_millis(200)) {
            changed.push(more);
        }
        changed.sort();
        changed.dedup();
        log::info!("Pack changes detected: {} file(s)", changed.len());
        for p in &changed {
            log::debug!(" - {}", p);
        }
        if validate(root) {
            log::info!("Reloaded smithing pack");
        }
    }
}
