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

/// Write a formatted line through a [`DailyLog`](crate::DailyLog).
///
/// # Examples
///
/// ```
/// let dir = tempfile::tempdir().unwrap();
/// let log = daylog::DailyLog::builder().directory(dir.path()).build().unwrap();
/// daylog::printf!(log, "{} requests served", 42);
/// ```
#[macro_export]
macro_rules! printf {
    ($log:expr, $($arg:tt)+) => {
        $log.printf(::std::format_args!($($arg)+))
    };
}

/// Write a formatted line through a [`DailyLog`](crate::DailyLog), then exit.
///
/// See [`DailyLog::fatalf`](crate::DailyLog::fatalf).
#[macro_export]
macro_rules! fatalf {
    ($log:expr, $($arg:tt)+) => {
        $log.fatalf(::std::format_args!($($arg)+))
    };
}

/// Write a formatted line through a [`DailyLog`](crate::DailyLog), then panic with it.
///
/// See [`DailyLog::panicf`](crate::DailyLog::panicf).
#[macro_export]
macro_rules! panicf {
    ($log:expr, $($arg:tt)+) => {
        $log.panicf(::std::format_args!($($arg)+))
    };
}
