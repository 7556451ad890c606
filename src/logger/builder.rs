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

use std::fmt;
use std::path::PathBuf;

use crate::Config;
use crate::DailyLog;
use crate::Error;
use crate::append::Console;
use crate::append::DailyFileWriterBuilder;
#[cfg(test)]
use crate::append::daily_file::clock::Clock;
use crate::layout::TextLayout;
use crate::logger::ExitHook;
use crate::logger::Inner;

/// A builder for configuring and creating a [`DailyLog`].
///
/// # Examples
///
/// ```
/// use daylog::DailyLog;
/// use daylog::append::Console;
///
/// let dir = tempfile::tempdir().unwrap();
/// let log = DailyLog::builder()
///     .directory(dir.path())
///     .prefix("[example] ")
///     .console(Console::Stdout)
///     .build()
///     .unwrap();
///
/// log.println(&[&"listening on", &8080]);
/// ```
#[must_use = "call `build` to create the logger"]
pub struct DailyLogBuilder {
    config: Config,
    console: Console,
    exit: ExitHook,
    #[cfg(test)]
    clock: Option<Clock>,
}

impl fmt::Debug for DailyLogBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DailyLogBuilder")
            .field("config", &self.config)
            .field("console", &self.console)
            .finish_non_exhaustive()
    }
}

impl Default for DailyLogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DailyLogBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            console: Console::default(),
            exit: std::process::exit,
            #[cfg(test)]
            clock: None,
        }
    }

    /// Replace all plain settings with `config`.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set the directory log files are written into.
    ///
    /// Default to `log`, relative to the working directory.
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.config.directory = directory.into();
        self
    }

    /// Set the filename suffix.
    ///
    /// Default to `.log`.
    pub fn filename_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.suffix = suffix.into();
        self
    }

    /// Set the `strftime` layout of the date part of the filename.
    ///
    /// Default to `%Y-%m-%d`.
    pub fn date_format(mut self, date_format: impl Into<String>) -> Self {
        self.config.date_format = date_format.into();
        self
    }

    /// Set the permission bits of new log files and directories.
    ///
    /// Default to `0o777`, subject to the process umask.
    pub fn mode(mut self, mode: u32) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set the text written at the start of every line.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    /// Set the `strftime` layout of the timestamp on every line.
    ///
    /// Default to `%Y/%m/%d %H:%M:%S`.
    pub fn time_format(mut self, time_format: impl Into<String>) -> Self {
        self.config.time_format = Some(time_format.into());
        self
    }

    /// Do not write a timestamp on each line.
    pub fn no_timestamp(mut self) -> Self {
        self.config.time_format = None;
        self
    }

    /// Set the console every line is duplicated to.
    ///
    /// Default to [`Console::Stderr`].
    pub fn console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    /// Set the function that terminates the process.
    ///
    /// It is called after a fatal line is written, and when a line cannot be written at all.
    /// Default to [`std::process::exit`].
    pub fn exit_hook(mut self, exit: ExitHook) -> Self {
        self.exit = exit;
        self
    }

    #[cfg(test)]
    pub(crate) fn clock(mut self, clock: Clock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the [`DailyLog`], creating the log directory and opening today's file.
    ///
    /// # Errors
    ///
    /// Return an error if either:
    ///
    /// * The date format or the time format cannot be rendered.
    /// * The log directory cannot be created.
    /// * Today's log file cannot be opened.
    pub fn build(self) -> Result<DailyLog, Error> {
        let Config {
            directory,
            suffix,
            date_format,
            mode,
            prefix,
            time_format,
        } = self.config;

        let layout = TextLayout::default().prefix(prefix);
        let layout = match time_format {
            Some(time_format) => layout.time_format(time_format),
            None => layout.no_timestamp(),
        };

        // surface a bad time format before touching the filesystem
        layout.format(&jiff::Zoned::now(), format_args!(""))?;

        let writer = DailyFileWriterBuilder::new(directory)
            .filename_suffix(suffix)
            .date_format(date_format)
            .mode(mode)
            .console(self.console);
        #[cfg(test)]
        let writer = match self.clock {
            Some(clock) => writer.clock(clock),
            None => writer,
        };
        let writer = writer.build()?;

        Ok(DailyLog::new(Inner { writer, layout }, self.exit))
    }
}
