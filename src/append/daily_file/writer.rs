// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use jiff::Zoned;

use crate::Error;
use crate::ErrorKind;
use crate::append::Console;
use crate::append::FanOut;
use crate::append::daily_file::clock::Clock;
use crate::append::daily_file::rotation::RotationKey;

/// Default log directory, relative to the working directory.
pub const DEFAULT_DIRECTORY: &str = "log";
/// Default log file suffix.
pub const DEFAULT_SUFFIX: &str = ".log";
/// Default `strftime` layout of the date part of a log file name.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
/// Default permission bits of log files and directories, before umask.
pub const DEFAULT_MODE: u32 = 0o777;

/// Owns the log file of the current day and swaps it when the day changes.
///
/// The writer is not synchronized; callers serialize access to it.
#[derive(Debug)]
pub struct DailyFileWriter {
    state: State,
    current: Option<Current>,
}

#[derive(Debug)]
struct Current {
    key: Option<RotationKey>,
    path: PathBuf,
    sink: FanOut,
}

#[derive(Debug)]
struct State {
    directory: PathBuf,
    suffix: String,
    date_format: String,
    mode: u32,
    console: Console,
    clock: Clock,
}

impl DailyFileWriter {
    /// Creates a new [`DailyFileWriterBuilder`].
    ///
    /// # Examples
    ///
    /// ```
    /// use daylog::append::DailyFileWriter;
    ///
    /// let builder = DailyFileWriter::builder("log");
    /// ```
    #[must_use]
    pub fn builder(directory: impl Into<PathBuf>) -> DailyFileWriterBuilder {
        DailyFileWriterBuilder::new(directory)
    }

    /// Return the current instant according to the writer's clock.
    pub fn now(&self) -> Zoned {
        self.state.clock.now()
    }

    /// Make sure the open file matches the current day, rotating if it does not.
    ///
    /// Return `Ok(true)` if a new file was opened and `Ok(false)` if the current one was kept.
    ///
    /// # Errors
    ///
    /// See [`DailyFileWriter::ensure_current_at`].
    pub fn ensure_current(&mut self) -> Result<bool, Error> {
        let now = self.now();
        self.ensure_current_at(&now)
    }

    /// Make sure the open file matches the day of `now`, rotating if it does not.
    ///
    /// # Errors
    ///
    /// Return an error if either:
    ///
    /// * The previous file cannot be closed. No new file is opened in this case.
    /// * The new file cannot be opened. No file stays open, and the next call tries again.
    pub fn ensure_current_at(&mut self, now: &Zoned) -> Result<bool, Error> {
        let key = RotationKey::of(now);
        if self.current.as_ref().is_some_and(|c| c.key == Some(key)) {
            return Ok(false);
        }

        if let Some(previous) = self.current.take() {
            previous.sink.close().map_err(|err| {
                Error::new(ErrorKind::FileClose, "failed to close previous log file")
                    .with_context("path", previous.path.display())
                    .with_source(err)
            })?;
        }

        let path = self.state.filepath(&key)?;
        let file = self.state.open(&path)?;
        let sink = FanOut::new(self.state.console.clone(), file);
        self.current = Some(Current {
            key: Some(key),
            path,
            sink,
        });
        Ok(true)
    }

    /// Switch to `directory`.
    ///
    /// The current file stays open until the next [`DailyFileWriter::ensure_current`], which
    /// closes it and opens a file in the new directory even if the day has not changed.
    pub fn reset(&mut self, directory: impl Into<PathBuf>) {
        self.state.directory = directory.into();
        if let Some(current) = self.current.as_mut() {
            current.key = None;
        }
    }

    /// Create the log directory and any missing parents.
    ///
    /// # Errors
    ///
    /// Return an error if the directory cannot be created.
    pub fn create_dir(&self) -> Result<(), Error> {
        self.state.create_dir()
    }

    /// Write `bytes` to the console and to the current file.
    ///
    /// # Errors
    ///
    /// Return an error if no file is open or if either target fails.
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let Some(current) = self.current.as_mut() else {
            return Err(Error::new(ErrorKind::Write, "no log file is open"));
        };
        current.sink.write_all(bytes).map_err(|err| {
            Error::from_io_error(err).with_context("path", current.path.display())
        })
    }

    /// Flush the console and the current file.
    ///
    /// # Errors
    ///
    /// Return an error if either target fails to flush.
    pub fn flush(&mut self) -> Result<(), Error> {
        match self.current.as_mut() {
            None => Ok(()),
            Some(current) => current.sink.flush().map_err(Error::from_io_error),
        }
    }

    /// Return the log directory.
    pub fn directory(&self) -> &Path {
        &self.state.directory
    }

    /// Return the path of the open log file, if any.
    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_ref().map(|c| c.path.as_path())
    }

    /// Return the day the open log file belongs to.
    ///
    /// Return `None` if no file is open, or if the directory changed since it was opened.
    pub fn current_key(&self) -> Option<RotationKey> {
        self.current.as_ref().and_then(|c| c.key)
    }

    #[cfg(test)]
    pub(crate) fn set_now(&mut self, now: Zoned) {
        self.state.clock.set_now(now);
    }
}

impl State {
    fn filepath(&self, key: &RotationKey) -> Result<PathBuf, Error> {
        let filename = key.filename(&self.date_format, &self.suffix)?;
        Ok(self.directory.join(filename))
    }

    fn create_dir(&self) -> Result<(), Error> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(self.mode);
        }
        builder.create(&self.directory).map_err(|err| {
            Error::new(ErrorKind::DirectoryCreate, "failed to create log directory")
                .with_context("path", self.directory.display())
                .with_source(err)
        })
    }

    fn open(&self, path: &Path) -> Result<File, Error> {
        let mut options = OpenOptions::new();
        options.create(true).append(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(self.mode);
        }
        options.open(path).map_err(|err| {
            Error::new(ErrorKind::FileOpen, "failed to open log file")
                .with_context("path", path.display())
                .with_source(err)
        })
    }
}

/// A builder for configuring [`DailyFileWriter`].
#[derive(Debug)]
pub struct DailyFileWriterBuilder {
    // required
    directory: PathBuf,

    // has default
    suffix: String,
    date_format: String,
    mode: u32,
    console: Console,
    clock: Clock,
}

impl DailyFileWriterBuilder {
    /// Creates a new [`DailyFileWriterBuilder`] writing into `directory`.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            suffix: DEFAULT_SUFFIX.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            mode: DEFAULT_MODE,
            console: Console::default(),
            clock: Clock::DefaultClock,
        }
    }

    /// Set the filename suffix, appended verbatim after the date.
    ///
    /// Default to `.log`.
    #[must_use]
    pub fn filename_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Set the `strftime` layout of the date part of the filename.
    ///
    /// Default to `%Y-%m-%d`. The layout may only refer to date fields.
    #[must_use]
    pub fn date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    /// Set the permission bits used when creating log files and directories.
    ///
    /// Default to `0o777`, subject to the process umask. Ignored on non-unix platforms.
    #[must_use]
    pub fn mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    /// Set the console every line is duplicated to.
    ///
    /// Default to [`Console::Stderr`].
    #[must_use]
    pub fn console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    #[cfg(test)]
    pub(crate) fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Builds the [`DailyFileWriter`], creating the directory and opening today's file.
    ///
    /// # Errors
    ///
    /// Return an error if either:
    ///
    /// * The date format cannot be rendered from a calendar date.
    /// * The log directory cannot be created.
    /// * The log file cannot be opened.
    pub fn build(self) -> Result<DailyFileWriter, Error> {
        let Self {
            directory,
            suffix,
            date_format,
            mode,
            console,
            clock,
        } = self;

        let state = State {
            directory,
            suffix,
            date_format,
            mode,
            console,
            clock,
        };

        let mut writer = DailyFileWriter {
            state,
            current: None,
        };
        writer.state.filepath(&RotationKey::of(&writer.now()))?;
        writer.create_dir()?;
        writer.ensure_current()?;
        Ok(writer)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::str::FromStr;

    use jiff::Zoned;
    use tempfile::TempDir;

    use super::*;
    use crate::append::CaptureBuffer;
    use crate::append::daily_file::clock::ManualClock;

    fn manual_writer(dir: &Path, start: &str) -> DailyFileWriter {
        DailyFileWriterBuilder::new(dir)
            .console(Console::Discard)
            .clock(Clock::ManualClock(ManualClock::new(
                Zoned::from_str(start).unwrap(),
            )))
            .build()
            .unwrap()
    }

    fn list_files(dir: &Path) -> Vec<String> {
        let mut files = fs::read_dir(dir)
            .unwrap()
            .filter_map(|entry| entry.ok()?.file_name().into_string().ok())
            .collect::<Vec<_>>();
        files.sort();
        files
    }

    #[test]
    fn test_build_opens_todays_file() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let dir = temp_dir.path().join("nested").join("log");
        let writer = manual_writer(&dir, "2024-01-01T08:00:00[UTC]");

        assert!(dir.is_dir());
        assert_eq!(writer.current_path(), Some(dir.join("2024-01-01.log").as_path()));
        assert_eq!(writer.current_key().unwrap().to_string(), "2024-01-01");
        assert_eq!(list_files(&dir), vec!["2024-01-01.log"]);
    }

    #[test]
    fn test_same_day_is_a_noop() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let mut writer = manual_writer(temp_dir.path(), "2024-01-01T00:00:00[UTC]");

        for hour in ["01", "12", "23"] {
            writer.set_now(Zoned::from_str(&format!("2024-01-01T{hour}:00:00[UTC]")).unwrap());
            assert!(!writer.ensure_current().unwrap());
        }
        assert_eq!(list_files(temp_dir.path()), vec!["2024-01-01.log"]);
    }

    #[test]
    fn test_rotates_once_per_day() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let mut writer = manual_writer(temp_dir.path(), "2024-01-01T23:00:00[UTC]");
        writer.write_all(b"a\n").unwrap();

        writer.set_now(Zoned::from_str("2024-01-02T00:00:01[UTC]").unwrap());
        assert!(writer.ensure_current().unwrap());
        assert!(!writer.ensure_current().unwrap());
        writer.write_all(b"b\n").unwrap();

        assert_eq!(
            list_files(temp_dir.path()),
            vec!["2024-01-01.log", "2024-01-02.log"]
        );
        let dir = temp_dir.path();
        assert_eq!(fs::read_to_string(dir.join("2024-01-01.log")).unwrap(), "a\n");
        assert_eq!(fs::read_to_string(dir.join("2024-01-02.log")).unwrap(), "b\n");
    }

    #[test]
    fn test_reopening_the_same_day_appends() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        fs::write(temp_dir.path().join("2024-01-01.log"), "earlier\n").unwrap();

        let mut writer = manual_writer(temp_dir.path(), "2024-01-01T00:00:00[UTC]");
        writer.write_all(b"later\n").unwrap();

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("2024-01-01.log")).unwrap(),
            "earlier\nlater\n"
        );
    }

    #[test]
    fn test_reset_reopens_on_the_same_day() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let first = temp_dir.path().join("first");
        let second = temp_dir.path().join("second");

        let mut writer = manual_writer(&first, "2024-01-01T00:00:00[UTC]");
        writer.write_all(b"old\n").unwrap();

        writer.reset(&second);
        assert_eq!(writer.current_key(), None);
        writer.create_dir().unwrap();
        assert!(writer.ensure_current().unwrap());
        writer.write_all(b"new\n").unwrap();

        assert_eq!(writer.directory(), second.as_path());
        assert_eq!(fs::read_to_string(first.join("2024-01-01.log")).unwrap(), "old\n");
        assert_eq!(fs::read_to_string(second.join("2024-01-01.log")).unwrap(), "new\n");
    }

    #[test]
    fn test_open_failure_leaves_no_file_and_retries() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let mut writer = manual_writer(temp_dir.path(), "2024-01-01T00:00:00[UTC]");

        // the next day's name is taken by a directory
        fs::create_dir(temp_dir.path().join("2024-01-02.log")).unwrap();
        writer.set_now(Zoned::from_str("2024-01-02T00:00:00[UTC]").unwrap());
        let err = writer.ensure_current().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileOpen);
        assert_eq!(writer.current_path(), None);
        assert_eq!(
            writer.write_all(b"lost\n").unwrap_err().kind(),
            ErrorKind::Write
        );

        fs::remove_dir(temp_dir.path().join("2024-01-02.log")).unwrap();
        assert!(writer.ensure_current().unwrap());
        writer.write_all(b"back\n").unwrap();
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("2024-01-02.log")).unwrap(),
            "back\n"
        );
    }

    #[test]
    fn test_directory_over_a_file_fails_to_create() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = DailyFileWriterBuilder::new(blocker.join("log"))
            .console(Console::Discard)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DirectoryCreate);
    }

    #[test]
    fn test_invalid_date_format_is_rejected() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let dir = temp_dir.path().join("log");
        let err = DailyFileWriterBuilder::new(&dir)
            .date_format("%Y-%m-%dT%H")
            .console(Console::Discard)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
        assert!(!dir.exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_close_failure_opens_nothing_and_retries() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let dir = temp_dir.path();
        // today's file resolves to a device that cannot be synced
        symlink("/dev/null", dir.join("2024-01-01.log")).unwrap();
        let mut writer = manual_writer(dir, "2024-01-01T00:00:00[UTC]");
        writer.write_all(b"discarded\n").unwrap();

        writer.set_now(Zoned::from_str("2024-01-02T00:00:00[UTC]").unwrap());
        let err = writer.ensure_current().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileClose);
        assert_eq!(writer.current_path(), None);
        assert_eq!(writer.current_key(), None);
        assert!(!dir.join("2024-01-02.log").exists());

        assert!(writer.ensure_current().unwrap());
        writer.write_all(b"fresh\n").unwrap();
        assert_eq!(writer.current_path(), Some(dir.join("2024-01-02.log").as_path()));
        assert_eq!(
            fs::read_to_string(dir.join("2024-01-02.log")).unwrap(),
            "fresh\n"
        );
    }

    #[test]
    fn test_custom_suffix_and_console() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let buffer = CaptureBuffer::default();
        let mut writer = DailyFileWriterBuilder::new(temp_dir.path())
            .filename_suffix(".txt")
            .date_format("%Y%m%d")
            .console(Console::Capture(buffer.clone()))
            .clock(Clock::ManualClock(ManualClock::new(
                Zoned::from_str("2024-03-05T10:00:00[UTC]").unwrap(),
            )))
            .build()
            .unwrap();
        writer.write_all(b"both\n").unwrap();

        assert_eq!(buffer.contents(), "both\n");
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("20240305.txt")).unwrap(),
            "both\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_mode_applies_to_new_files() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let writer = DailyFileWriterBuilder::new(temp_dir.path())
            .mode(0o600)
            .console(Console::Discard)
            .build()
            .unwrap();

        let metadata = fs::metadata(writer.current_path().unwrap()).unwrap();
        assert_eq!(metadata.permissions().mode() & 0o777, 0o600);
    }
}
