//! The command loop: read a line, dispatch, write exactly one response line.
//!
//! Strictly sequential — each command runs to completion, including full
//! result materialization and encoding, before the next line is read. The
//! loop ends when the input stream closes, and that is a normal exit no
//! matter how many commands errored along the way.

use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use crate::bootstrap;
use crate::db::Storage;
use crate::encode;
use crate::error::Result;
use crate::protocol::{self, Command};

/// Fixed relative path of the database file.
pub const DB_PATH: &str = "mydata.db";

/// Line written once after bootstrap, before the first command is read.
/// Callers must wait for it before sending commands.
pub const READY: &str = "READY";

/// Open the database at [`DB_PATH`], bootstrap it, and serve the line
/// protocol over the process's standard streams until stdin closes.
///
/// # Errors
/// Returns an error only for fatal startup failures (the database cannot be
/// opened or bootstrapped) or an unwritable output stream. The storage
/// handle is owned here, so the connection is released on every exit path.
pub fn run() -> Result<()> {
    let storage = Storage::open(DB_PATH)?;
    bootstrap::run(&storage)?;

    let app = App::new(storage);
    let stdin = io::stdin();
    let stdout = io::stdout();
    app.serve(stdin.lock(), stdout.lock())
}

/// Command processor bound to one open storage handle.
pub struct App {
    storage: Storage,
}

impl App {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Serve the line protocol: emit `READY`, then exactly one response line
    /// per input line, flushed immediately so the driving process can pair
    /// responses to requests by order.
    ///
    /// Per-command failures are reported in-band and never terminate the
    /// loop; an unreadable line ends it the same way as end-of-stream.
    pub fn serve<R: BufRead, W: Write>(&self, input: R, mut output: W) -> Result<()> {
        writeln!(output, "{READY}")?;
        output.flush()?;

        for line in input.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "input stream unreadable, shutting down");
                    break;
                }
            };

            let response = self.dispatch(&line);
            writeln!(output, "{response}")?;
            output.flush()?;
        }

        info!("input stream closed, shutting down");
        Ok(())
    }

    /// Produce the single response line for one input line.
    fn dispatch(&self, line: &str) -> String {
        match protocol::parse(line) {
            Command::Query(sql) => {
                debug!(sql, "executing query");
                let encoded = self
                    .storage
                    .execute(sql)
                    .and_then(|result| encode::encode(&result));
                match encoded {
                    Ok(json) => json,
                    Err(e) => format!("ERROR: {e}"),
                }
            }
            Command::MalformedQuery => protocol::INVALID_QUERY_FORMAT.to_owned(),
            Command::Unknown => protocol::UNKNOWN_COMMAND.to_owned(),
        }
    }
}
