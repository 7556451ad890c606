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

//! The file half of the fan-out: one log file per calendar day.
//!
//! # Example
//!
//! ```
//! use daylog::append::Console;
//! use daylog::append::DailyFileWriter;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut writer = DailyFileWriter::builder(dir.path())
//!     .filename_suffix(".log")
//!     .console(Console::Discard)
//!     .build()
//!     .unwrap();
//!
//! writer.ensure_current().unwrap();
//! writer.write_all(b"hello\n").unwrap();
//! ```

pub use rotation::RotationKey;
pub use writer::DEFAULT_DATE_FORMAT;
pub use writer::DEFAULT_DIRECTORY;
pub use writer::DEFAULT_MODE;
pub use writer::DEFAULT_SUFFIX;
pub use writer::DailyFileWriter;
pub use writer::DailyFileWriterBuilder;

pub(crate) mod clock;
mod rotation;
mod writer;
