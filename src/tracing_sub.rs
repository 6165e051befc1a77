use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::Level;

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
    /// Drop everything; used while the editor owns the terminal and no log
    /// file was configured.
    Discard,
}

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<Mutex<File>>),
    Stderr(io::Stderr),
    Discard,
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(file) => file
                .lock()
                .map_err(|_| io::Error::other("log file lock poisoned"))?
                .write(buf),
            DelegatingInner::Stderr(s) => s.write(buf),
            DelegatingInner::Discard => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(file) => file
                .lock()
                .map_err(|_| io::Error::other("log file lock poisoned"))?
                .flush(),
            DelegatingInner::Stderr(s) => s.flush(),
            DelegatingInner::Discard => Ok(()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SubscriberMakeWriter {
    sink: Sink,
}

#[derive(Clone, Debug)]
enum Sink {
    File(Arc<Mutex<File>>),
    Stderr,
    Discard,
}

impl SubscriberMakeWriter {
    pub fn new(target: &LogTarget) -> io::Result<Self> {
        let sink = match target {
            LogTarget::File(path) => {
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    std::fs::create_dir_all(parent)?;
                }
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Sink::File(Arc::new(Mutex::new(file)))
            }
            LogTarget::Stderr => Sink::Stderr,
            LogTarget::Discard => Sink::Discard,
        };
        Ok(Self { sink })
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        let inner = match &self.sink {
            Sink::File(file) => DelegatingInner::File(Arc::clone(file)),
            Sink::Stderr => DelegatingInner::Stderr(io::stderr()),
            Sink::Discard => DelegatingInner::Discard,
        };
        DelegatingWriter { inner }
    }
}

/// Install the global subscriber. Later calls keep the first subscriber.
pub fn init(level: Level, target: &LogTarget) -> io::Result<()> {
    let ansi = matches!(target, LogTarget::Stderr);
    let writer = SubscriberMakeWriter::new(target)?;
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn file_target_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("dash.log");
        let make = SubscriberMakeWriter::new(&LogTarget::File(path.clone())).unwrap();
        make.make_writer().write_all(b"first\n").unwrap();
        make.make_writer().write_all(b"second\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn discard_accepts_everything() {
        let make = SubscriberMakeWriter::new(&LogTarget::Discard).unwrap();
        let mut w = make.make_writer();
        assert_eq!(w.write(b"gone").unwrap(), 4);
        w.flush().unwrap();
    }
}
