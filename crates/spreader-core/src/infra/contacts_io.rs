//! Contact log stream reading
//!
//! The first non-blank line holds the root ID; every following non-blank line
//! is a contact record.

use crate::domain::config::ParsePolicy;
use crate::infra::record_parse::{ContactRecord, RecordError, parse_contact_line, parse_root_line};
use std::io::{BufRead, Lines};

/// Contact log positioned after its header
pub struct ContactLog<R> {
    root_id: i64,
    lines: Lines<R>,
    line: usize,
    policy: ParsePolicy,
}

impl<R: BufRead> ContactLog<R> {
    /// Read the header of a contact log
    ///
    /// Returns `Ok(None)` when the stream has no header at all.
    pub fn open(reader: R, policy: ParsePolicy) -> Result<Option<Self>, RecordError> {
        let mut lines = reader.lines();
        let mut line = 0;

        loop {
            let Some(text) = lines.next() else {
                return Ok(None);
            };
            let text = text?;
            line += 1;
            if text.trim().is_empty() {
                continue;
            }

            let root_id = parse_root_line(&text, line, policy)?;
            return Ok(Some(Self {
                root_id,
                lines,
                line,
                policy,
            }));
        }
    }

    /// ID of the index case
    pub fn root_id(&self) -> i64 {
        self.root_id
    }

    /// Current 1-based line number
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for ContactLog<R> {
    type Item = Result<ContactRecord, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => return Some(Err(e.into())),
            };
            self.line += 1;

            match parse_contact_line(&text, self.line, self.policy) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}
