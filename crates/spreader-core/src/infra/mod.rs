//! Infrastructure layer - I/O and external dependencies
//!
//! This module handles record streams, report files and configuration files.

pub mod config_io;
pub mod contacts_io;
pub mod population_io;
pub mod record_parse;
pub mod report_io;
