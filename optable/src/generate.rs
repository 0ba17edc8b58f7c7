use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::error::Error;
use crate::expand::expand_str;
use crate::scan::{Entry, Incomplete, Scanner};
use crate::table::OpcodeTable;

/// Outcome of one generation pass, in discovery order.
#[derive(Debug, Default)]
pub struct Report {
    /// Expanded entries and the number of slots each wrote
    pub accepted: Vec<(Entry, usize)>,
    /// Entries whose pattern could not be parsed
    pub rejected: Vec<(Entry, Error)>,
    pub incomplete: Vec<Incomplete>,
}

impl Report {
    pub fn written(&self) -> usize {
        self.accepted.iter().map(|(_, n)| n).sum()
    }
}

/// Scan `lines` and expand every pair into `table` as soon as it is found.
pub fn build<I, S>(lines: I, table: &mut OpcodeTable) -> Report
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = Scanner::new();
    let mut report = Report::default();
    for (idx, line) in lines.into_iter().enumerate() {
        if let Some(entry) = scanner.feed(idx, line.as_ref()) {
            match expand_str(&entry.pattern, &entry.handler, table) {
                Ok(n) => report.accepted.push((entry, n)),
                Err(err) => report.rejected.push((entry, err)),
            }
        }
    }
    scanner.finish();
    report.incomplete = scanner.incomplete().to_vec();
    report
}

/// Read the file line by line. Lines are returned for diagnostics.
pub fn read_lines(path: &str) -> Result<Vec<String>, Error> {
    let file = File::open(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
    BufReader::new(file)
        .lines()
        .map(|line| line.map_err(Error::FileRead))
        .collect()
}

pub fn build_file(path: &str, table: &mut OpcodeTable) -> Result<Report, Error> {
    let lines = read_lines(path)?;
    Ok(build(&lines, table))
}
