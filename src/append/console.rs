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

use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

/// The console half of every write.
///
/// Defaults to [`Console::Stderr`], the destination of the standard logger.
#[derive(Debug, Clone, Default)]
pub enum Console {
    /// Write to standard error.
    #[default]
    Stderr,
    /// Write to standard output.
    Stdout,
    /// Drop console output; only the log file receives lines.
    Discard,
    /// Write into an in-memory buffer that can be inspected later.
    Capture(CaptureBuffer),
}

impl Write for Console {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Console::Stderr => io::stderr().lock().write(buf),
            Console::Stdout => io::stdout().lock().write(buf),
            Console::Discard => Ok(buf.len()),
            Console::Capture(buffer) => {
                buffer.bytes().extend_from_slice(buf);
                Ok(buf.len())
            }
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Console::Stderr => io::stderr().lock().write_all(buf),
            Console::Stdout => io::stdout().lock().write_all(buf),
            Console::Discard => Ok(()),
            Console::Capture(buffer) => {
                buffer.bytes().extend_from_slice(buf);
                Ok(())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Console::Stderr => io::stderr().flush(),
            Console::Stdout => io::stdout().flush(),
            Console::Discard | Console::Capture(_) => Ok(()),
        }
    }
}

/// A cloneable in-memory console.
///
/// # Examples
///
/// ```
/// use daylog::append::CaptureBuffer;
/// use daylog::append::Console;
///
/// let buffer = CaptureBuffer::default();
/// let console = Console::Capture(buffer.clone());
/// # drop(console);
/// assert!(buffer.contents().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    fn bytes(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Return everything captured so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }

    /// Drop everything captured so far.
    pub fn clear(&self) {
        self.bytes().clear();
    }
}
