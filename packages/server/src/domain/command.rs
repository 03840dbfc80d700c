//! Domain logic for inbound line classification.
//!
//! This module contains pure functions that implement the command protocol
//! without side effects, making them easy to test.

/// A single inbound line, classified.
///
/// The protocol is line-oriented: every line a client sends after its
/// nickname is either a server-directed command (`/nick`, `/quit`) or chat
/// text to be relayed verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `/nick <name>` — carries the remainder after the command and a single
    /// space. The remainder is empty for a bare `/nick` or a trailing space
    /// with no name; deciding what to do with that is a usecase concern.
    Nick(&'a str),
    /// `/quit` — any suffix after the command is ignored.
    Quit,
    /// Anything else is chat text.
    Chat(&'a str),
}

impl<'a> Command<'a> {
    /// Classify one inbound line.
    pub fn parse(line: &'a str) -> Self {
        if let Some(remainder) = line.strip_prefix("/nick ") {
            Command::Nick(remainder)
        } else if line == "/nick" {
            Command::Nick("")
        } else if line.starts_with("/quit") {
            Command::Quit
        } else {
            Command::Chat(line)
        }
    }
}
