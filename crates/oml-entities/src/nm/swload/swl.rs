use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::OmlQueue;
use crate::nm::events::SwLoadEvent;
use crate::nm::swload::load_fsm::{LoadSession, SwLoadErr};
use crate::nm::swload::source::{FileOpener, parse_id_version};

/// Lists the images named in a software list file. Each line carries a 4-byte prefix,
/// then `<file_id>:<file_version>`; the image is `<manifest dir>/<file_id>`.
/// The list's own `@(#)` header parses the same way, so the list file comes first.
/// Short lines and lines that don't parse are skipped.
pub fn parse_manifest(dir: &Path, text: &[u8]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for line in text.split(|&b| b == b'\n') {
        if line.len() < 4 {
            continue;
        }
        match parse_id_version(&line[4..]) {
            Some((file_id, _)) => files.push(dir.join(String::from_utf8_lossy(&file_id).as_ref())),
            None => tracing::debug!("skipping list line {:?}", String::from_utf8_lossy(line)),
        }
    }
    files
}

/// What the owner should do with a load event after the list session has seen it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwlStep {
    /// Event to pass on to the upper layer
    pub forward: Option<SwLoadEvent>,
    /// The list session is done and can be dropped
    pub finished: bool,
}

/// Loads every image of a software list in order, then activates the list itself
pub struct ListSession {
    manifest_path: PathBuf,
    pending: VecDeque<PathBuf>,
    window_size: u8,
    forced: bool,
}

impl ListSession {
    /// Reads and parses the list, then starts loading its first image.
    /// Nothing is sent if the list is unreadable or empty.
    pub fn start(
        queue: &mut OmlQueue,
        load: &mut LoadSession,
        opener: &dyn FileOpener,
        manifest_path: &Path,
        window_size: u8,
        forced: bool,
        now: Instant,
    ) -> Result<Self, SwLoadErr> {
        if load.is_busy() {
            return Err(SwLoadErr::Busy);
        }
        let text = opener
            .read(manifest_path)
            .map_err(|e| SwLoadErr::FileOpen { path: manifest_path.to_path_buf(), reason: e.to_string() })?;
        let dir = manifest_path.parent().unwrap_or_else(|| Path::new(""));
        let mut pending: VecDeque<PathBuf> = parse_manifest(dir, &text).into();

        let Some(first) = pending.pop_front() else {
            return Err(SwLoadErr::ManifestParse {
                path: manifest_path.to_path_buf(),
                reason: "no file entries".to_string(),
            });
        };
        tracing::info!("software list {}: {} images", manifest_path.display(), pending.len() + 1);
        load.start(queue, opener, &first, window_size, forced, now)?;

        Ok(Self {
            manifest_path: manifest_path.to_path_buf(),
            pending,
            window_size,
            forced,
        })
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Consumes End-Ack to chain the next load, or the final activation once the list
    /// is exhausted. Everything else is passed on.
    pub fn on_load_event(
        &mut self,
        queue: &mut OmlQueue,
        load: &mut LoadSession,
        opener: &dyn FileOpener,
        event: SwLoadEvent,
        now: Instant,
    ) -> Result<SwlStep, SwLoadErr> {
        match event {
            SwLoadEvent::EndAck => {
                match self.pending.pop_front() {
                    Some(next) => {
                        tracing::debug!("software list: next image {}", next.display());
                        load.start(queue, opener, &next, self.window_size, self.forced, now)?;
                    }
                    None => {
                        tracing::debug!("software list: all images loaded, activating");
                        load.activate(queue, opener, &self.manifest_path, now)?;
                    }
                }
                Ok(SwlStep { forward: None, finished: false })
            }
            SwLoadEvent::ActivateAck => Ok(SwlStep { forward: Some(event), finished: true }),
            ev => Ok(SwlStep { forward: Some(ev), finished: ev.is_failure() }),
        }
    }
}
