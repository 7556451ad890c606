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

//! The serialized entry point every log line goes through.

use std::fmt;
use std::fmt::Arguments;
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;

pub use builder::DailyLogBuilder;

use crate::Error;
use crate::append::DailyFileWriter;
use crate::layout::TextLayout;

mod builder;

/// Terminates the process with the given status.
///
/// Called with [`FATAL_STATUS`] by the fatal family once its line is written, and with
/// [`UNLOGGABLE_STATUS`] when a line cannot be written at all.
pub type ExitHook = fn(i32) -> !;

/// Exit status of the fatal family.
pub const FATAL_STATUS: i32 = 1;
/// Exit status when a line cannot be written.
pub const UNLOGGABLE_STATUS: i32 = 2;

/// A logger that writes every line to the console and to the log file of the current day.
///
/// All operations, logging and reconfiguration alike, are serialized by one lock. Under that
/// lock a call makes sure today's file is open, rotating it if the day changed, and writes the
/// formatted line to both destinations. Lines therefore appear in both places in the same total
/// order, and a line is never split or written to a file that was already rotated away.
///
/// If a line cannot be written, the error is printed to standard error and the exit hook is
/// called with [`UNLOGGABLE_STATUS`], from whichever thread hit it. The line is never dropped
/// silently. Use [`DailyLog::output`] to handle such errors yourself.
///
/// # Examples
///
/// ```
/// use daylog::DailyLog;
///
/// let dir = tempfile::tempdir().unwrap();
/// let log = DailyLog::builder().directory(dir.path()).build().unwrap();
///
/// log.print("service started");
/// daylog::printf!(log, "listening on {}:{}", "0.0.0.0", 8080);
/// log.println(&[&"GET", &"/health", &200]);
/// ```
pub struct DailyLog {
    inner: Mutex<Inner>,
    exit: ExitHook,
}

#[derive(Debug)]
pub(crate) struct Inner {
    pub(crate) writer: DailyFileWriter,
    pub(crate) layout: TextLayout,
}

impl Inner {
    fn output(&mut self, message: Arguments) -> Result<(), Error> {
        let now = self.writer.now();
        self.writer.ensure_current_at(&now)?;
        let bytes = self.layout.format(&now, message)?;
        self.writer.write_all(&bytes)
    }
}

impl fmt::Debug for DailyLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DailyLog")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl DailyLog {
    /// Create a new [`DailyLogBuilder`].
    pub fn builder() -> DailyLogBuilder {
        DailyLogBuilder::new()
    }

    pub(crate) fn new(inner: Inner, exit: ExitHook) -> Self {
        Self {
            inner: Mutex::new(inner),
            exit,
        }
    }

    // A panic never leaves `Inner` half updated, so a poisoned lock is still usable.
    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Write one line, rotating the log file first if the day changed.
    ///
    /// This is the write step shared by every logging operation, without the fail-fast policy.
    ///
    /// # Errors
    ///
    /// Return an error if the log file cannot be rotated, or the line cannot be written.
    pub fn output(&self, message: Arguments) -> Result<(), Error> {
        self.inner().output(message)
    }

    fn write_line(&self, message: Arguments) {
        if let Err(err) = self.output(message) {
            self.fail(err);
        }
    }

    // Runs after the lock is released.
    fn fail(&self, err: Error) -> ! {
        eprintln!("daylog: failed to write log: {err}");
        (self.exit)(UNLOGGABLE_STATUS)
    }

    /// Write `value` as one line.
    ///
    /// Exit with [`UNLOGGABLE_STATUS`] if the line cannot be written.
    pub fn print(&self, value: impl Display) {
        self.write_line(format_args!("{value}"));
    }

    /// Write the formatted arguments as one line. See also [`printf!`](crate::printf).
    ///
    /// Exit with [`UNLOGGABLE_STATUS`] if the line cannot be written.
    pub fn printf(&self, args: Arguments) {
        self.write_line(args);
    }

    /// Write `values` separated by spaces as one line.
    ///
    /// Exit with [`UNLOGGABLE_STATUS`] if the line cannot be written.
    pub fn println(&self, values: &[&dyn Display]) {
        self.write_line(format_args!("{}", Spaced(values)));
    }

    /// Write `value` as one line, then call the exit hook with [`FATAL_STATUS`].
    pub fn fatal(&self, value: impl Display) -> ! {
        self.print(value);
        (self.exit)(FATAL_STATUS)
    }

    /// Write the formatted arguments as one line, then call the exit hook with [`FATAL_STATUS`].
    /// See also [`fatalf!`](crate::fatalf).
    pub fn fatalf(&self, args: Arguments) -> ! {
        self.printf(args);
        (self.exit)(FATAL_STATUS)
    }

    /// Write `values` separated by spaces as one line, then call the exit hook with [`FATAL_STATUS`].
    pub fn fatalln(&self, values: &[&dyn Display]) -> ! {
        self.println(values);
        (self.exit)(FATAL_STATUS)
    }

    /// Write `value` as one line, then panic with it as a `String` payload.
    pub fn panic(&self, value: impl Display) -> ! {
        self.unwind(value.to_string())
    }

    /// Write the formatted arguments as one line, then panic with them as a `String` payload.
    /// See also [`panicf!`](crate::panicf).
    pub fn panicf(&self, args: Arguments) -> ! {
        self.unwind(args.to_string())
    }

    /// Write `values` separated by spaces as one line, then panic with them as a `String`
    /// payload.
    pub fn panicln(&self, values: &[&dyn Display]) -> ! {
        self.unwind(Spaced(values).to_string())
    }

    fn unwind(&self, message: String) -> ! {
        self.print(&message);
        std::panic::panic_any(message)
    }

    /// Write log files into `directory` from now on.
    ///
    /// The directory is created if missing, and a file in it is opened before this returns,
    /// even if the day has not changed. Nothing more is written to the previous file.
    ///
    /// If the directory cannot be created or the file cannot be opened, the process exits with
    /// [`UNLOGGABLE_STATUS`].
    pub fn set_directory(&self, directory: impl Into<PathBuf>) {
        if let Err(err) = self.try_set_directory(directory) {
            self.fail(err);
        }
    }

    /// Like [`DailyLog::set_directory`], but return the error instead of exiting.
    ///
    /// # Errors
    ///
    /// Return an error if the directory cannot be created or the file cannot be opened.
    pub fn try_set_directory(&self, directory: impl Into<PathBuf>) -> Result<(), Error> {
        let mut inner = self.inner();
        inner.writer.reset(directory);
        inner.writer.create_dir()?;
        inner.writer.ensure_current()?;
        Ok(())
    }

    /// Set the text written at the start of every following line.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.inner().layout.set_prefix(prefix.into());
    }

    /// Return the text written at the start of every line.
    pub fn prefix(&self) -> String {
        self.inner().layout.get_prefix().to_string()
    }

    /// Return the directory log files are written into.
    pub fn directory(&self) -> PathBuf {
        self.inner().writer.directory().to_path_buf()
    }

    /// Return the path of the open log file, if any.
    pub fn current_path(&self) -> Option<PathBuf> {
        self.inner().writer.current_path().map(|p| p.to_path_buf())
    }

    /// Flush the console and the current log file.
    ///
    /// # Errors
    ///
    /// Return an error if either destination fails to flush.
    pub fn flush(&self) -> Result<(), Error> {
        self.inner().writer.flush()
    }

    #[cfg(test)]
    fn set_now(&self, now: jiff::Zoned) {
        self.inner().writer.set_now(now);
    }
}

struct Spaced<'a>(&'a [&'a dyn Display]);

impl Display for Spaced<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}
