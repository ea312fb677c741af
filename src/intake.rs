use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crate::texture::encode_data_url;

/// Completion event for one successfully read file
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeEvent {
    /// The file contents as a data URL, ready to use as a texture payload
    pub data_url: String,
}

/// Drop-target backend: reads each submitted file on its own thread and
/// reports completions over a channel.
///
/// Reads are independent, uncapped, and uncancellable; events arrive in
/// completion order, not submission order. A failed read is logged and
/// produces no event, and does not affect any other read in flight.
pub struct FileIntake {
    sender: Sender<IntakeEvent>,
    receiver: Receiver<IntakeEvent>,
}

impl FileIntake {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// Start a background read of one dropped file
    pub fn submit(&self, path: PathBuf) {
        let sender = self.sender.clone();
        thread::spawn(move || match fs::read(&path) {
            Ok(bytes) => {
                let data_url = encode_data_url(mime_for_path(&path), &bytes);
                // The receiver may already be gone on shutdown; nothing to do
                let _ = sender.send(IntakeEvent { data_url });
            }
            Err(e) => {
                eprintln!("file reading has failed: {:?}: {}", path, e);
            }
        });
    }

    /// Drain all reads that have completed since the last poll, in
    /// completion order. Never blocks.
    pub fn poll(&self) -> Vec<IntakeEvent> {
        self.receiver.try_iter().collect()
    }

    /// Wait up to `timeout` for the next completion
    pub fn next_timeout(&self, timeout: Duration) -> Option<IntakeEvent> {
        self.receiver.recv_timeout(timeout).ok()
    }
}

impl Default for FileIntake {
    fn default() -> Self {
        Self::new()
    }
}

/// MIME type guessed from the file extension; no validation beyond that,
/// the decode step is the real gatekeeper
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("bmp") => "image/bmp",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_guessed_from_extension() {
        assert_eq!(mime_for_path(Path::new("shot.png")), "image/png");
        assert_eq!(mime_for_path(Path::new("shot.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("shot.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("shot.bmp")), "image/bmp");
        assert_eq!(mime_for_path(Path::new("shot")), "application/octet-stream");
        assert_eq!(
            mime_for_path(Path::new("shot.tar.gz")),
            "application/octet-stream"
        );
    }

    #[test]
    fn poll_is_empty_without_submissions() {
        let intake = FileIntake::new();
        assert!(intake.poll().is_empty());
    }
}
