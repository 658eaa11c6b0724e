//! Population stream reading
//!
//! This module turns an open population stream into `PersonRecord`s.

use crate::domain::config::ParsePolicy;
use crate::infra::record_parse::{PersonRecord, RecordError, parse_person_line};
use std::io::{BufRead, Lines};

/// Iterator over the person records of a population stream
///
/// Blank lines are skipped; line numbers in errors are 1-based.
pub struct PopulationReader<R> {
    lines: Lines<R>,
    line: usize,
    policy: ParsePolicy,
}

/// Read person records from `reader`
pub fn population_records<R: BufRead>(reader: R, policy: ParsePolicy) -> PopulationReader<R> {
    PopulationReader {
        lines: reader.lines(),
        line: 0,
        policy,
    }
}

impl<R: BufRead> Iterator for PopulationReader<R> {
    type Item = Result<PersonRecord, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => return Some(Err(e.into())),
            };
            self.line += 1;

            match parse_person_line(&text, self.line, self.policy) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}
