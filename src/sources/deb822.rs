// src/sources/deb822.rs

//! Streaming tokenizer for RFC822-like stanza files
//!
//! Both dpkg's status database and apt's extended_states file consist of
//! "Key: Value" stanzas separated by blank lines. The tokenizer flattens
//! such text into field events and block boundaries so each reader can fold
//! a per-package accumulator over the stream without redoing line handling.
//!
//! Boundary rules: a blank line ends the open stanza; a `Package:` field
//! while a stanza is open ends it first (stanzas may follow each other with
//! no blank line in between); end of input flushes a trailing stanza that
//! has no terminator, so the last package in a file is never dropped.

/// A single tokenizer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// A "Key: Value" line, split at the first ':' with both sides trimmed.
    Field { key: &'a str, value: &'a str },
    /// The open stanza ended. The caller evaluates its accumulator on this
    /// event and resets it before the next field arrives.
    BlockEnd,
}

/// Iterator turning stanza text into [`Event`]s.
///
/// Lines that do not look like "Key: Value" are skipped silently; the
/// format tolerates unknown content. Every line is trimmed before matching,
/// since these files are often quoted with list indentation.
pub struct Tokenizer<'a> {
    lines: std::str::Lines<'a>,
    /// Field held back while a look-ahead boundary is emitted first.
    pending: Option<(&'a str, &'a str)>,
    /// Whether any field has been seen since the last boundary.
    open: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Tokenizer {
            lines: text.lines(),
            pending: None,
            open: false,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Event<'a>> {
        if let Some((key, value)) = self.pending.take() {
            self.open = true;
            return Some(Event::Field { key, value });
        }

        loop {
            let Some(line) = self.lines.next() else {
                // Flush a trailing stanza with no terminator.
                if self.open {
                    self.open = false;
                    return Some(Event::BlockEnd);
                }
                return None;
            };

            let line = line.trim();
            if line.is_empty() {
                if self.open {
                    self.open = false;
                    return Some(Event::BlockEnd);
                }
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());

            if key == "Package" && self.open {
                // Next stanza starts without a blank line: close the current
                // one and hold the field back for the following call.
                self.pending = Some((key, value));
                self.open = false;
                return Some(Event::BlockEnd);
            }

            self.open = true;
            return Some(Event::Field { key, value });
        }
    }
}
