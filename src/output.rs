//! JSON lines output.
//!
//! Each issue becomes one JSON object on its own line. Lines are flushed as
//! they are written so that whatever was exported before a failure is
//! already on the way to the consumer.

use std::io::{self, Write};

use tracing::{debug, info};

use crate::api::error::Result as ApiResult;
use crate::api::Issue;
use crate::error::Result;

/// Writes issues as newline-delimited JSON.
pub struct JsonLinesWriter<W: Write> {
    writer: W,
    lines: u64,
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Write one issue and flush.
    pub fn write(&mut self, issue: &Issue) -> io::Result<()> {
        let mut line = serde_json::to_vec(issue).map_err(io::Error::from)?;
        line.push(b'\n');
        self.writer.write_all(&line)?;
        self.writer.flush()?;
        self.lines += 1;
        Ok(())
    }

    /// Number of issues written so far.
    pub fn lines(&self) -> u64 {
        self.lines
    }
}

/// How an export ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Every issue was written.
    Complete { issues: u64 },
    /// The reader went away; nothing more was fetched.
    Closed { issues: u64 },
}

/// Drain `issues` into `out`, stopping at the first error.
///
/// A broken pipe on the output is treated as the consumer having seen
/// enough: the remaining issues are not pulled, so their pages are never
/// requested.
pub fn export<I, W>(issues: I, out: &mut JsonLinesWriter<W>) -> Result<ExportOutcome>
where
    I: IntoIterator<Item = ApiResult<Issue>>,
    W: Write,
{
    for issue in issues {
        let issue = issue?;
        match out.write(&issue) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                debug!(written = out.lines(), "Output closed");
                return Ok(ExportOutcome::Closed {
                    issues: out.lines(),
                });
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(issues = out.lines(), "Export complete");
    Ok(ExportOutcome::Complete {
        issues: out.lines(),
    })
}
