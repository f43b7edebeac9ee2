use super::{Channel, Message};
use crate::clock::{SharedClock, SystemClock};
use crate::constants::{ARCHIVE_TIMESTAMP_FORMAT, ARCHIVE_TIMESTAMP_PARSE_FORMAT};
use crate::diagnostics::log;
use crate::error::{LoggingError, Result};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Configures a [`FileChannel`].
pub struct FileChannelBuilder {
    path: PathBuf,
    flush_immediately: bool,
    purge_age: Option<Duration>,
    rotate_on_open: bool,
    clock: SharedClock,
}

impl FileChannelBuilder {
    /// Flush after every message instead of when the write buffer fills up.
    pub fn flush_immediately(mut self, flush: bool) -> Self {
        self.flush_immediately = flush;
        self
    }

    /// Delete archives older than `age` whenever the file rotates.
    pub fn purge_age(mut self, age: Duration) -> Self {
        self.purge_age = Some(age);
        self
    }

    pub fn purge_after_days(self, days: u32) -> Self {
        self.purge_age(Duration::days(i64::from(days)))
    }

    /// Archive an existing, non-empty log file when the channel is opened.
    pub fn rotate_on_open(mut self, rotate: bool) -> Self {
        self.rotate_on_open = rotate;
        self
    }

    pub fn clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> FileChannel {
        FileChannel {
            path: self.path,
            flush_immediately: self.flush_immediately,
            purge_age: self.purge_age,
            rotate_on_open: self.rotate_on_open,
            clock: self.clock,
            state: Mutex::new(FileState::default()),
        }
    }
}

#[derive(Default)]
struct FileState {
    writer: Option<BufWriter<File>>,
    /// Local date the current file was opened or last rotated on.
    period: Option<NaiveDate>,
}

/// Writes messages to a log file with daily rotation.
///
/// - The file is opened lazily on the first message, or eagerly through
///   [`Channel::open`].
/// - When the local date changes, the current file is renamed to
///   `<file name>.<YYYYMMDDHHMMSSmmm>` and a fresh file is started.
/// - After each rotation, archives older than the purge age are deleted. The
///   age of an archive is read from its name; the modification time is used
///   for files whose suffix is not a timestamp.
///
/// Each message text is written as-is, followed by a newline unless the text
/// already ends with one.
pub struct FileChannel {
    path: PathBuf,
    flush_immediately: bool,
    purge_age: Option<Duration>,
    rotate_on_open: bool,
    clock: SharedClock,
    state: Mutex<FileState>,
}

impl FileChannel {
    pub fn builder(path: impl Into<PathBuf>) -> FileChannelBuilder {
        FileChannelBuilder {
            path: path.into(),
            flush_immediately: false,
            purge_age: None,
            rotate_on_open: false,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn state(&self) -> MutexGuard<'_, FileState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// `"<file name>."`, the prefix shared by every archive of this file.
    fn archive_prefix(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{name}.")
    }

    fn open_file(&self) -> Result<BufWriter<File>> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| LoggingError::OpenLogFile {
                path: self.path.clone(),
                source,
            })?;
        Ok(BufWriter::new(file))
    }

    fn has_content(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|meta| meta.len() > 0)
    }

    fn open_locked(&self, state: &mut FileState) -> Result<()> {
        if state.writer.is_some() {
            return Ok(());
        }

        let now = self.clock.now();
        // An empty file from a quiet previous run is reused rather than archived
        if self.rotate_on_open && self.has_content() && self.archive(now)?.is_some() {
            self.purge(now);
        }

        state.writer = Some(self.open_file()?);
        state.period = Some(now.date_naive());
        Ok(())
    }

    fn rotate_locked(&self, state: &mut FileState, now: DateTime<Local>) -> Result<()> {
        if let Some(mut writer) = state.writer.take() {
            let _ = writer.flush();
        }

        if let Some(archive) = self.archive(now)? {
            log::debug!(
                file = %self.path.display(),
                archive = %archive.display(),
                "rotated log file"
            );
        }
        self.purge(now);

        state.writer = Some(self.open_file()?);
        state.period = Some(now.date_naive());
        Ok(())
    }

    /// Rename the active file to a free archive name. `None` when there was
    /// no file to archive.
    fn archive(&self, now: DateTime<Local>) -> Result<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let base = format!(
            "{}{}",
            self.archive_prefix(),
            now.format(ARCHIVE_TIMESTAMP_FORMAT)
        );
        let directory = self.directory();
        let mut target = directory.join(&base);
        let mut collision = 1;
        while target.exists() {
            target = directory.join(format!("{base}.{collision}"));
            collision += 1;
        }

        fs::rename(&self.path, &target).map_err(|source| LoggingError::ArchiveLogFile {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(target))
    }

    fn purge(&self, now: DateTime<Local>) {
        let Some(max_age) = self.purge_age else {
            return;
        };

        let entries = match fs::read_dir(self.directory()) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!(error = %e, "cannot scan log directory for old archives");
                return;
            }
        };

        let prefix = self.archive_prefix();
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            let Some(suffix) = name.strip_prefix(&prefix) else {
                continue;
            };

            let archived_at = archive_time(suffix).or_else(|| {
                entry
                    .metadata()
                    .and_then(|meta| meta.modified())
                    .ok()
                    .map(DateTime::<Local>::from)
            });

            if let Some(archived_at) = archived_at {
                if now - archived_at > max_age {
                    match fs::remove_file(entry.path()) {
                        Ok(()) => log::debug!(archive = %name, "purged old log archive"),
                        Err(e) => log::warn!(archive = %name, error = %e, "failed to purge log archive"),
                    }
                }
            }
        }
    }

    fn write_locked(&self, state: &mut FileState, text: &str) -> Result<()> {
        self.open_locked(state)?;

        let now = self.clock.now();
        if state.period.is_some_and(|day| day != now.date_naive()) {
            self.rotate_locked(state, now)?;
        }

        let Some(writer) = state.writer.as_mut() else {
            return Ok(());
        };

        let write_error = |source| LoggingError::WriteLogFile {
            path: self.path.clone(),
            source,
        };
        writer.write_all(text.as_bytes()).map_err(write_error)?;
        if !text.ends_with('\n') {
            writer.write_all(b"\n").map_err(write_error)?;
        }
        if self.flush_immediately {
            writer.flush().map_err(write_error)?;
        }
        Ok(())
    }
}

/// Archive time encoded in an archive suffix such as `20240601120000123` or
/// `20240601120000123.2`. Milliseconds are ignored.
fn archive_time(suffix: &str) -> Option<DateTime<Local>> {
    let stamp = suffix.get(..14)?;
    if !stamp.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDateTime::parse_from_str(stamp, ARCHIVE_TIMESTAMP_PARSE_FORMAT)
        .ok()?
        .and_local_timezone(Local)
        .earliest()
}

impl Channel for FileChannel {
    fn log(&self, message: &Message) {
        let mut state = self.state();
        if let Err(e) = self.write_locked(&mut state, &message.text) {
            log::warn!(error = %e, "dropping log record");
        }
    }

    fn open(&self) -> Result<()> {
        let mut state = self.state();
        self.open_locked(&mut state)
    }

    fn flush(&self) {
        if let Some(writer) = self.state().writer.as_mut() {
            if let Err(e) = writer.flush() {
                log::warn!(file = %self.path.display(), error = %e, "failed to flush log file");
            }
        }
    }

    fn close(&self) {
        if let Some(mut writer) = self.state().writer.take() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::severity::Severity;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn start() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn message(text: &str) -> Message {
        Message {
            source: "file-test".into(),
            severity: Severity::Information,
            text: text.to_string(),
            timestamp: start(),
            thread_id: 1,
        }
    }

    fn archives(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .flatten()
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("app.log."))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn appends_newline_only_when_missing() {
        let temp = TempDir::new().unwrap();
        let channel = FileChannel::builder(temp.path().join("app.log"))
            .flush_immediately(true)
            .build();

        channel.log(&message("one"));
        channel.log(&message("two\n"));

        let content = fs::read_to_string(temp.path().join("app.log")).unwrap();
        assert_eq!(content, "one\ntwo\n");
    }

    #[test]
    fn buffered_output_lands_on_flush() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.log");
        let channel = FileChannel::builder(&path).build();

        channel.log(&message("buffered"));
        channel.flush();
        assert_eq!(fs::read_to_string(&path).unwrap(), "buffered\n");
    }

    #[test]
    fn rotates_when_the_date_changes() {
        let temp = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::new(start()));
        let channel = FileChannel::builder(temp.path().join("app.log"))
            .flush_immediately(true)
            .clock(clock.clone())
            .build();

        channel.log(&message("day one"));
        clock.advance(Duration::hours(1));
        channel.log(&message("still day one"));
        assert!(archives(temp.path()).is_empty());

        clock.advance(Duration::days(1));
        channel.log(&message("day two"));

        assert_eq!(archives(temp.path()), vec!["app.log.20240602130000000"]);
        let archived = fs::read_to_string(temp.path().join("app.log.20240602130000000")).unwrap();
        assert_eq!(archived, "day one\nstill day one\n");
        assert_eq!(
            fs::read_to_string(temp.path().join("app.log")).unwrap(),
            "day two\n"
        );
    }

    #[test]
    fn archive_names_never_collide() {
        let temp = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::new(start()));
        fs::write(temp.path().join("app.log"), "first run\n").unwrap();
        fs::write(temp.path().join("app.log.20240601120000000"), "taken\n").unwrap();

        let channel = FileChannel::builder(temp.path().join("app.log"))
            .rotate_on_open(true)
            .clock(clock)
            .build();
        channel.open().unwrap();

        assert_eq!(
            archives(temp.path()),
            vec!["app.log.20240601120000000", "app.log.20240601120000000.1"]
        );
    }

    #[test]
    fn archive_time_reads_the_suffix() {
        let parsed = archive_time("20240601120000123").unwrap();
        assert_eq!(parsed, start());
        assert_eq!(archive_time("20240601120000123.4").unwrap(), start());
        assert!(archive_time("old").is_none());
        assert!(archive_time("2024").is_none());
    }
}
