//! Command grammar for the line protocol.
//!
//! One input line is one command. `QUERY:<sql>` is the only recognized
//! shape; the line is split on the *first* colon only, so the SQL text may
//! itself contain colons.

/// Response line for a `QUERY`-prefixed line with no colon. Unreachable
/// after the prefix check; kept as part of the wire contract.
pub const INVALID_QUERY_FORMAT: &str = "ERROR: Invalid QUERY command format";

/// Response line for any input that is not a `QUERY:` command.
pub const UNKNOWN_COMMAND: &str = "ERROR: Unknown command. Only QUERY: is supported";

const QUERY_PREFIX: &str = "QUERY:";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// Everything after the first colon, trimmed at both ends.
    Query(&'a str),
    /// `QUERY`-prefixed line that could not be split on a colon.
    MalformedQuery,
    /// Anything else. Never touches the database.
    Unknown,
}

/// Parse one input line.
///
/// Only the SQL text is trimmed; whitespace and colons embedded in it are
/// preserved byte-for-byte. An empty SQL text is still a `Query` and is
/// passed to the engine unchanged.
pub fn parse(line: &str) -> Command<'_> {
    if line.starts_with(QUERY_PREFIX) {
        match line.split_once(':') {
            Some((_, sql)) => Command::Query(sql.trim()),
            None => Command::MalformedQuery,
        }
    } else {
        Command::Unknown
    }
}
