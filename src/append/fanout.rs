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

use std::fs::File;
use std::io;
use std::io::Write;

use crate::append::Console;

/// A writer that duplicates every write to the console and to the current log file.
///
/// A `FanOut` is built once per log file and replaced as a whole when the file rotates, so a
/// write always sees one consistent pair of targets.
#[derive(Debug)]
pub struct FanOut {
    console: Console,
    file: File,
}

impl FanOut {
    /// Create a fan-out over `console` and `file`.
    pub fn new(console: Console, file: File) -> Self {
        Self { console, file }
    }

    /// Sync the file to disk, then release the file handle.
    ///
    /// Errors that the OS deferred until the file is synced are reported here instead of being
    /// lost when the handle drops. The console is shared with the next file and is left alone.
    pub fn close(self) -> io::Result<()> {
        self.file.sync_all()
    }
}

impl Write for FanOut {
    // Members are written in order; a failure leaves earlier members written.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.console.write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.console.flush()?;
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::fs::OpenOptions;

    use tempfile::TempDir;

    use super::*;
    use crate::append::CaptureBuffer;

    #[test]
    fn test_write_reaches_both_targets() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let path = temp_dir.path().join("fanout.log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .unwrap();

        let buffer = CaptureBuffer::default();
        let mut fanout = FanOut::new(Console::Capture(buffer.clone()), file);
        fanout.write_all(b"first\n").unwrap();
        fanout.write_all(b"second\n").unwrap();
        fanout.close().unwrap();

        assert_eq!(buffer.contents(), "first\nsecond\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_close_reports_file_errors() {
        // fsync is not supported on character devices
        let file = OpenOptions::new().append(true).open("/dev/null").unwrap();
        let buffer = CaptureBuffer::default();
        let mut fanout = FanOut::new(Console::Capture(buffer.clone()), file);
        fanout.write_all(b"line\n").unwrap();

        assert!(fanout.close().is_err());
        assert_eq!(buffer.contents(), "line\n");
    }

    #[test]
    fn test_file_failure_fails_the_write() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let path = temp_dir.path().join("readonly.log");
        fs::write(&path, "").unwrap();
        let file = OpenOptions::new().read(true).open(&path).unwrap();

        let buffer = CaptureBuffer::default();
        let mut fanout = FanOut::new(Console::Capture(buffer.clone()), file);
        assert!(fanout.write_all(b"line\n").is_err());
        // no rollback of the console half
        assert_eq!(buffer.contents(), "line\n");
    }
}
