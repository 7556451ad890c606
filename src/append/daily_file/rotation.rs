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

use jiff::Zoned;
use jiff::civil::Date;
use jiff::fmt::strtime;

use crate::Error;
use crate::ErrorKind;

/// The calendar day a log file belongs to.
///
/// Two instants map to the same key if and only if they fall on the same calendar day in the
/// time zone of the instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RotationKey(Date);

impl RotationKey {
    /// Derive the key of the given instant.
    pub fn of(now: &Zoned) -> RotationKey {
        RotationKey(now.date())
    }

    /// Return the calendar day of this key.
    pub fn date(&self) -> Date {
        self.0
    }

    /// Render the file name `<date><suffix>` of this key.
    ///
    /// # Errors
    ///
    /// Return an error if `date_format` refers to anything a plain date cannot provide, such as
    /// an hour or a time zone.
    pub fn filename(&self, date_format: &str, suffix: &str) -> Result<String, Error> {
        let date = strtime::format(date_format, self.0).map_err(|err| {
            Error::new(ErrorKind::InvalidConfig, "failed to format log file date")
                .with_context("date_format", date_format)
                .with_source(err)
        })?;
        Ok(format!("{date}{suffix}"))
    }
}

impl fmt::Display for RotationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
