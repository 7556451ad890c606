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

use std::fmt::Arguments;
use std::fmt::Write;

use jiff::Zoned;
use jiff::fmt::strtime;

use crate::Error;
use crate::ErrorKind;

/// Default `strftime` layout of the timestamp on every line.
pub const DEFAULT_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// A layout that formats a message as a line of text.
///
/// Output format:
///
/// ```text
/// prefix 2024/01/01 12:00:00 Hello world!
/// ```
///
/// The prefix is written verbatim at the start of the line. The timestamp is rendered in the time
/// zone of the instant being logged. A trailing newline is added unless the message already ends
/// with one.
///
/// # Examples
///
/// ```
/// use daylog::layout::TextLayout;
///
/// let layout = TextLayout::default().prefix("[api] ");
/// ```
#[derive(Debug, Clone)]
pub struct TextLayout {
    prefix: String,
    time_format: Option<String>,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            time_format: Some(DEFAULT_TIME_FORMAT.to_string()),
        }
    }
}

impl TextLayout {
    /// Set the text written at the start of every line.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the `strftime` layout of the timestamp.
    pub fn time_format(mut self, time_format: impl Into<String>) -> Self {
        self.time_format = Some(time_format.into());
        self
    }

    /// Do not write a timestamp.
    pub fn no_timestamp(mut self) -> Self {
        self.time_format = None;
        self
    }

    /// Return the current prefix.
    pub fn get_prefix(&self) -> &str {
        &self.prefix
    }

    pub(crate) fn set_prefix(&mut self, prefix: String) {
        self.prefix = prefix;
    }

    /// Format `message` as logged at `now`.
    ///
    /// # Errors
    ///
    /// Return an error if the time format cannot be rendered.
    pub fn format(&self, now: &Zoned, message: Arguments) -> Result<Vec<u8>, Error> {
        let mut text = self.prefix.clone();

        if let Some(time_format) = self.time_format.as_deref() {
            let time = strtime::format(time_format, now).map_err(|err| {
                Error::new(ErrorKind::InvalidConfig, "failed to format timestamp")
                    .with_context("time_format", time_format)
                    .with_source(err)
            })?;
            text.push_str(&time);
            text.push(' ');
        }

        // SAFETY: write to a string always succeeds
        write!(&mut text, "{message}").unwrap();
        if !text.ends_with('\n') {
            text.push('\n');
        }

        Ok(text.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn noon() -> Zoned {
        Zoned::from_str("2024-01-01T12:00:00[UTC]").unwrap()
    }

    #[test]
    fn test_default_format() {
        let bytes = TextLayout::default()
            .format(&noon(), format_args!("hello {}", "world"))
            .unwrap();
        assert_eq!(bytes, b"2024/01/01 12:00:00 hello world\n");
    }

    #[test]
    fn test_prefix_goes_first() {
        let bytes = TextLayout::default()
            .prefix("[api] ")
            .format(&noon(), format_args!("up"))
            .unwrap();
        assert_eq!(bytes, b"[api] 2024/01/01 12:00:00 up\n");
    }

    #[test]
    fn test_existing_newline_is_kept_single() {
        let bytes = TextLayout::default()
            .no_timestamp()
            .format(&noon(), format_args!("done\n"))
            .unwrap();
        assert_eq!(bytes, b"done\n");
    }

    #[test]
    fn test_custom_time_format() {
        let bytes = TextLayout::default()
            .time_format("%H:%M")
            .format(&noon(), format_args!("tick"))
            .unwrap();
        assert_eq!(bytes, b"12:00 tick\n");
    }

    #[test]
    fn test_bad_time_format_is_an_error() {
        let err = TextLayout::default()
            .time_format("%H:%M %")
            .format(&noon(), format_args!("tick"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }
}
