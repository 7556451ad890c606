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

use std::path::PathBuf;

use crate::append::daily_file::DEFAULT_DATE_FORMAT;
use crate::append::daily_file::DEFAULT_DIRECTORY;
use crate::append::daily_file::DEFAULT_MODE;
use crate::append::daily_file::DEFAULT_SUFFIX;
use crate::layout::DEFAULT_TIME_FORMAT;

/// Plain settings of a [`DailyLog`](crate::DailyLog).
///
/// With the `serde` feature enabled, this can be deserialized from an application's own
/// configuration; every field is optional and falls back to its default.
///
/// # Examples
///
/// ```
/// use daylog::Config;
/// use daylog::DailyLog;
///
/// let config = Config {
///     prefix: "[worker] ".to_string(),
///     ..Config::default()
/// };
/// let builder = DailyLog::builder().config(config);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Config {
    /// Directory log files are written into. Default to `log`.
    pub directory: PathBuf,
    /// Appended to the date to form a file name. Default to `.log`.
    pub suffix: String,
    /// `strftime` layout of the date part of a file name. Default to `%Y-%m-%d`.
    pub date_format: String,
    /// Permission bits of new files and directories. Default to `0o777`, subject to umask.
    pub mode: u32,
    /// Text written at the start of every line. Default to empty.
    pub prefix: String,
    /// `strftime` layout of the timestamp, or `None` to write no timestamp.
    pub time_format: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            suffix: DEFAULT_SUFFIX.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            mode: DEFAULT_MODE,
            prefix: String::new(),
            time_format: Some(DEFAULT_TIME_FORMAT.to_string()),
        }
    }
}
