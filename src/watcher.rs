use std::path::PathBuf;
use std::sync::mpsc;

/// Watches a pack directory for TOML edits, feeding changed paths into a
/// channel from a background thread.
pub fn spawn_pack_watcher(dir: PathBuf) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel::<String>();
    std::thread::spawn(move || {
        use notify::{EventKind, RecursiveMode, Watcher};
        let mut watcher = match notify::recommended_watcher(
            move |res: Result<notify::Event, notify::Error>| {
                if let Ok(event) = res {
                    match event.kind {
                        EventKind::Modify(_)
                        | EventKind::Create(_)
                        | EventKind::Remove(_)
                        | EventKind::Any => {
                            for p in event.paths {
                                if let Some(e) = p.extension().and_then(|e| e.to_str()) {
                                    if e.eq_ignore_ascii_case("toml") {
                                        let _ = tx.send(p.to_string_lossy().to_string());
                                    }
                                }
                            }
                        }
                        _ => {}
                    }
                }
            },
        ) {
            Ok(w) => w,
            Err(e) => {
                log::warn!("pack watcher unavailable: {}", e);
                return;
            }
        };
        if let Err(e) = watcher.watch(dir.as_path(), RecursiveMode::Recursive) {
            log::warn!("failed to watch {}: {}", dir.display(), e);
            return;
        }
        loop {
            std::thread::sleep(std::time::Duration::from_secs(3600));
        }
    });
    rx
}
