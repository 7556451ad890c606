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

use crate::DailyLog;
use crate::Error;
use crate::ErrorKind;

impl log::Log for DailyLog {
    // No level filtering: every record is written.
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        self.printf(format_args!(
            "{level:>5} {target}: {message}",
            level = record.level(),
            target = record.target(),
            message = record.args(),
        ));
    }

    fn flush(&self) {
        let _ = DailyLog::flush(self);
    }
}

impl DailyLog {
    /// Set up this logger as the `log` crate global logger.
    ///
    /// The logger is leaked to satisfy the `'static` requirement of [`log::set_logger`], and the
    /// returned reference keeps the configuration operations reachable. The global maximum log
    /// level is set to `Trace`.
    ///
    /// # Errors
    ///
    /// Return an error if the `log` crate global logger has already been set.
    ///
    /// # Examples
    ///
    /// ```
    /// use daylog::DailyLog;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let daily = DailyLog::builder().directory(dir.path()).build().unwrap();
    /// let daily = daily.apply().unwrap();
    ///
    /// log::info!("routed through daylog");
    /// daily.set_prefix("[app] ");
    /// ```
    pub fn apply(self) -> Result<&'static DailyLog, Error> {
        let logger: &'static DailyLog = Box::leak(Box::new(self));
        log::set_logger(logger).map_err(|err| {
            Error::new(ErrorKind::SetLogger, "failed to set up log crate logger").with_source(err)
        })?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(logger)
    }
}
