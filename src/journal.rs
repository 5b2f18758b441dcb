//! Game journal
//!
//! Leveled, append-only log lines (INFO / ERROR / STATE / DECORATOR). Every
//! line goes through the `log` facade; a journal opened on a file also appends
//! it there, stamped `yyyy-mm-dd HH:MM:SS` in UTC. Writing never fails a
//! frame: I/O errors are swallowed after the sink has been opened, and a sink
//! that cannot be opened degrades to console-only output.

use std::cell::RefCell;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Journal line level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Info,
    Error,
    State,
    Decorator,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
            LogLevel::State => "STATE",
            LogLevel::Decorator => "DECORATOR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination for journal lines
pub trait LogSink {
    fn write(&self, level: LogLevel, message: &str);
}

/// Forward a line to the `log` facade
fn forward(level: LogLevel, message: &str) {
    match level {
        LogLevel::Error => log::error!(target: "game", "[{}] {}", level, message),
        _ => log::info!(target: "game", "[{}] {}", level, message),
    }
}

/// Console-only sink
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, level: LogLevel, message: &str) {
        forward(level, message);
    }
}

/// Console plus an append-only file
#[derive(Debug)]
pub struct FileSink {
    file: RefCell<File>,
}

impl FileSink {
    /// Open (or create) `path` for appending, creating parent directories
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: RefCell::new(file),
        })
    }
}

impl LogSink for FileSink {
    fn write(&self, level: LogLevel, message: &str) {
        forward(level, message);
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        if let Ok(mut file) = self.file.try_borrow_mut() {
            let _ = writeln!(file, "[{}] [{}] {}", format_timestamp(secs), level, message);
        }
    }
}

/// `yyyy-mm-dd HH:MM:SS` (UTC) for seconds since the Unix epoch
fn format_timestamp(secs: u64) -> String {
    let (days, rem) = (secs / 86_400, secs % 86_400);
    let (hour, minute, second) = (rem / 3600, rem % 3600 / 60, rem % 60);

    // Civil date from a day count, in 400-year eras starting 0000-03-01
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);

    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        year, month, day, hour, minute, second
    )
}

/// Captures lines in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: RefCell<Vec<(LogLevel, String)>>,
}

impl MemorySink {
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.borrow().clone()
    }

    /// Whether any line at `level` contains `needle`
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.lines
            .borrow()
            .iter()
            .any(|(l, msg)| *l == level && msg.contains(needle))
    }

    pub fn count(&self, level: LogLevel) -> usize {
        self.lines.borrow().iter().filter(|(l, _)| *l == level).count()
    }
}

impl LogSink for MemorySink {
    fn write(&self, level: LogLevel, message: &str) {
        self.lines.borrow_mut().push((level, message.to_string()));
    }
}

/// Discards everything
#[derive(Debug, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn write(&self, _level: LogLevel, _message: &str) {}
}

/// Cheap, clonable handle to the process journal
#[derive(Clone)]
pub struct Journal {
    sink: Rc<dyn LogSink>,
}

impl fmt::Debug for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Journal").finish_non_exhaustive()
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::console()
    }
}

impl Journal {
    pub fn new(sink: impl LogSink + 'static) -> Self {
        Self {
            sink: Rc::new(sink),
        }
    }

    pub fn console() -> Self {
        Self::new(ConsoleSink)
    }

    pub fn disabled() -> Self {
        Self::new(NullSink)
    }

    /// Journal backed by `path`, falling back to console-only output
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match FileSink::open(path) {
            Ok(sink) => {
                let journal = Self::new(sink);
                journal.info("Journal initialized");
                journal
            }
            Err(e) => {
                log::error!("Failed to open log file {}: {}", path.display(), e);
                Self::console()
            }
        }
    }

    /// Journal recording into memory, plus the sink to inspect it
    pub fn memory() -> (Self, Rc<MemorySink>) {
        let sink = Rc::new(MemorySink::default());
        let journal = Self { sink: sink.clone() };
        (journal, sink)
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        self.sink.write(level, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    /// `"{entity}: {from} -> {to}"`
    pub fn state_change(&self, entity: &str, from: &str, to: &str) {
        self.log(LogLevel::State, &format!("{}: {} -> {}", entity, from, to));
    }

    pub fn modifier_applied(&self, modifier: &str, target: &str) {
        self.log(LogLevel::Decorator, &format!("{} applied to {}", modifier, target));
    }

    pub fn modifier_removed(&self, modifier: &str, target: &str) {
        self.log(LogLevel::Decorator, &format!("{} removed from {}", modifier, target));
    }
}
