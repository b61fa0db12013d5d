//! Parsing of inbound reply bodies.

use canvass_core::item::Label;

/// A fully parsed inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  /// `start` — open a labeling session.
  Start,
  /// `disconnect` — close the session.
  Disconnect,
  /// `<id> <label> <language>` — a classification submission.
  Classify {
    id:       i64,
    label:    Label,
    language: String,
  },
}

/// Parse an inbound body.
///
/// Returns `None` for anything that is not exactly a session command or a
/// well-formed three-token classification; the caller answers those with the
/// format reminder (or the start hint when there is no session). Partial
/// matches never succeed: a bad id or label token rejects the whole message.
pub fn parse(body: &str) -> Option<Command> {
  let trimmed = body.trim();

  if trimmed.eq_ignore_ascii_case("start") {
    return Some(Command::Start);
  }
  if trimmed.eq_ignore_ascii_case("disconnect") {
    return Some(Command::Disconnect);
  }

  let tokens: Vec<&str> = trimmed.split_whitespace().collect();
  if tokens.len() != 3 {
    return None;
  }

  let id = tokens[0].parse::<i64>().ok()?;
  let label = Label::from_reply(tokens[1])?;
  // The language tag is taken verbatim; participants write free-form names.
  let language = tokens[2].to_owned();

  Some(Command::Classify { id, label, language })
}
