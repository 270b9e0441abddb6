//! URL input from a file or stdin, one URL per line.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use urledit_core::error::Error;

/// Open `path` ("-" for stdin) for line-oriented reading. Opening happens
/// before any output is produced, so a missing file fails the run cleanly.
pub fn open(path: &str) -> Result<Box<dyn BufRead>, Error> {
    if path == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).map_err(|_| Error::File(format!("--url-file {path} not found")))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Feed every non-empty line of `reader` to `f`, in order. CRLF endings
/// are tolerated; empty lines are skipped.
pub fn for_each_line(
    reader: impl BufRead,
    f: &mut dyn FnMut(&str) -> Result<(), Error>,
) -> Result<(), Error> {
    for line in reader.lines() {
        // A read failure mid-stream ends the input, like hitting EOF.
        let Ok(line) = line else { break };
        if line.is_empty() {
            continue;
        }
        f(&line)?;
    }
    Ok(())
}
