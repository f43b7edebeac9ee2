use super::{Channel, Message, SharedChannel};
use crate::error::Result;
use chrono::{Datelike, Timelike};
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millis,
    Severity,
    Text,
    Source,
    Thread,
}

/// Formats a [`Message`] according to a `%`-pattern.
///
/// | Specifier | Expands to                        |
/// |-----------|-----------------------------------|
/// | `%Y`      | four-digit year                   |
/// | `%m` `%d` | two-digit month, day              |
/// | `%H` `%M` `%S` | two-digit hour, minute, second |
/// | `%i`      | three-digit milliseconds          |
/// | `%p`      | severity name                     |
/// | `%t`      | message text                      |
/// | `%s`      | source logger name                |
/// | `%I`      | thread id                         |
/// | `%%`      | a literal `%`                     |
///
/// Unknown specifiers are copied to the output unchanged. All times are the
/// message's local timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFormatter {
    pattern: String,
    segments: Vec<Segment>,
}

impl PatternFormatter {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let segments = parse(&pattern);
        Self { pattern, segments }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, message: &Message) -> String {
        let ts = &message.timestamp;
        let mut out = String::with_capacity(message.text.len() + 48);
        for segment in &self.segments {
            // Writing into a String cannot fail
            let _ = match segment {
                Segment::Literal(text) => {
                    out.push_str(text);
                    Ok(())
                }
                Segment::Year => write!(out, "{:04}", ts.year()),
                Segment::Month => write!(out, "{:02}", ts.month()),
                Segment::Day => write!(out, "{:02}", ts.day()),
                Segment::Hour => write!(out, "{:02}", ts.hour()),
                Segment::Minute => write!(out, "{:02}", ts.minute()),
                Segment::Second => write!(out, "{:02}", ts.second()),
                Segment::Millis => write!(out, "{:03}", ts.timestamp_subsec_millis().min(999)),
                Segment::Severity => {
                    out.push_str(message.severity.as_str());
                    Ok(())
                }
                Segment::Text => {
                    out.push_str(&message.text);
                    Ok(())
                }
                Segment::Source => {
                    out.push_str(&message.source);
                    Ok(())
                }
                Segment::Thread => write!(out, "{}", message.thread_id),
            };
        }
        out
    }
}

fn parse(pattern: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }
        let segment = match chars.next() {
            Some('Y') => Segment::Year,
            Some('m') => Segment::Month,
            Some('d') => Segment::Day,
            Some('H') => Segment::Hour,
            Some('M') => Segment::Minute,
            Some('S') => Segment::Second,
            Some('i') => Segment::Millis,
            Some('p') => Segment::Severity,
            Some('t') => Segment::Text,
            Some('s') => Segment::Source,
            Some('I') => Segment::Thread,
            Some('%') => {
                literal.push('%');
                continue;
            }
            Some(other) => {
                literal.push('%');
                literal.push(other);
                continue;
            }
            None => {
                literal.push('%');
                break;
            }
        };
        if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(segment);
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}

/// Formats each message and hands the result to the wrapped channel.
pub struct FormattingChannel {
    formatter: PatternFormatter,
    channel: SharedChannel,
}

impl FormattingChannel {
    pub fn new(formatter: PatternFormatter, channel: SharedChannel) -> Self {
        Self { formatter, channel }
    }

    pub fn formatter(&self) -> &PatternFormatter {
        &self.formatter
    }
}

impl Channel for FormattingChannel {
    fn log(&self, message: &Message) {
        let formatted = Message {
            source: message.source.clone(),
            severity: message.severity,
            text: self.formatter.format(message),
            timestamp: message.timestamp,
            thread_id: message.thread_id,
        };
        self.channel.log(&formatted);
    }

    fn open(&self) -> Result<()> {
        self.channel.open()
    }

    fn flush(&self) {
        self.channel.flush();
    }

    fn close(&self) {
        self.channel.close();
    }
}
