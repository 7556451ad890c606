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

//! Daylog is a logging facade that duplicates every line to the console and to a log file named
//! after the current day.
//!
//! # Overview
//!
//! A [`DailyLog`] owns the open log file and replaces it on the first call after midnight (in the
//! local time zone). Every operation runs under one lock, so a rotation happens exactly once no
//! matter how many threads notice the new day, and no line is written to a file that was already
//! rotated away.
//!
//! Files are named `<directory>/<date><suffix>`, which is `log/2024-01-01.log` by default.
//!
//! # Examples
//!
//! ```
//! use daylog::DailyLog;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let log = DailyLog::builder()
//!     .directory(dir.path())
//!     .prefix("[server] ")
//!     .build()
//!     .unwrap();
//!
//! log.print("starting");
//! daylog::printf!(log, "listening on port {}", 8080);
//!
//! // later, from any thread
//! log.set_directory(dir.path().join("archive"));
//! log.println(&[&"GET", &"/", &200]);
//! ```
//!
//! The fatal family exits the process after writing, and the panic family unwinds with the
//! message as payload:
//!
//! ```should_panic
//! # let dir = tempfile::tempdir().unwrap();
//! # let log = daylog::DailyLog::builder().directory(dir.path()).build().unwrap();
//! log.panic("unrecoverable state");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod layout;

mod bridge;
mod config;
mod error;
mod logger;
mod macros;

pub use config::Config;
pub use error::Error;
pub use error::ErrorKind;
pub use logger::DailyLog;
pub use logger::DailyLogBuilder;
pub use logger::ExitHook;
pub use logger::FATAL_STATUS;
pub use logger::UNLOGGABLE_STATUS;
