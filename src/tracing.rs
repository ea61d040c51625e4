use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock, RwLockWriteGuard};

type LogFile = Arc<RwLock<Option<File>>>;

/// Hands out writers that tee every log line to stderr and, once configured,
/// to a log file.
#[derive(Clone, Default)]
struct TeeSink {
    file: LogFile,
}

struct TeeWriter {
    file: LogFile,
}

fn lock_file(file: &LogFile) -> RwLockWriteGuard<'_, Option<File>> {
    match file.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for TeeSink {
    type Writer = TeeWriter;

    fn make_writer(&'a self) -> Self::Writer {
        TeeWriter {
            file: self.file.clone(),
        }
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = io::stderr().write(buf)?;
        if let Some(file) = lock_file(&self.file).as_mut() {
            let _ = file.write_all(buf);
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        if let Some(file) = lock_file(&self.file).as_mut() {
            let _ = file.flush();
        }
        Ok(())
    }
}

static SINK: OnceLock<TeeSink> = OnceLock::new();

/// Install the global subscriber. `log` records are bridged into `tracing`;
/// the level comes from `RUST_LOG` and defaults to `info`.
pub fn init() {
    let _ = tracing_log::LogTracer::init();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let sink = SINK.get_or_init(TeeSink::default).clone();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(sink)
        .try_init();
}

/// Start (or stop, with `None`) mirroring log output to `log_file`.
pub fn set_log_file(log_file: Option<&Path>) {
    let Some(sink) = SINK.get() else {
        return;
    };
    let mut guard = lock_file(&sink.file);
    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                let _ = std::fs::create_dir_all(parent);
            }
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => *guard = Some(file),
                Err(e) => eprintln!("cannot open log file {}: {}", path.display(), e),
            }
        }
        None => *guard = None,
    }
}
