//! Date/time patterns in the `yyyy/MM/dd HH:mm` letter vocabulary.
//!
//! Patterns are compiled into chrono `strftime` strings. Runs of the same
//! ASCII letter select a field, text between single quotes is literal (`''`
//! is a quote), every other character is copied verbatim. Letters outside the
//! supported set are rejected rather than silently passed through.
//!
//! Parsing is strict: parsed text must render back to itself, so `MM` needs
//! two digits and `MMM` only accepts the abbreviated month name.

use std::fmt::Write;

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::{ActionError, ActionResult};

/// Compiled pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Pattern {
    source: String,
    strftime: String,
    padded: String,
    zoned: bool,
}

impl Pattern {
    /// Compiles a pattern.
    pub(crate) fn compile(pattern: &str) -> ActionResult<Self> {
        let mut strftime = String::with_capacity(pattern.len() * 2);
        let mut zoned = false;
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\'' => {
                    if chars.peek() == Some(&'\'') {
                        chars.next();
                        strftime.push('\'');
                        continue;
                    }
                    let mut closed = false;
                    while let Some(inner) = chars.next() {
                        if inner == '\'' {
                            if chars.peek() == Some(&'\'') {
                                chars.next();
                                strftime.push('\'');
                            } else {
                                closed = true;
                                break;
                            }
                        } else {
                            push_literal(&mut strftime, inner);
                        }
                    }
                    if !closed {
                        return Err(ActionError::pattern(pattern, "unterminated quoted literal"));
                    }
                }
                c if c.is_ascii_alphabetic() => {
                    let mut width = 1;
                    while chars.peek() == Some(&c) {
                        chars.next();
                        width += 1;
                    }
                    let spec = field(c, width).ok_or_else(|| {
                        ActionError::pattern(
                            pattern,
                            format!("unsupported field `{}`", c.to_string().repeat(width)),
                        )
                    })?;
                    zoned |= spec.ends_with(['z', 'Z']);
                    strftime.push_str(spec);
                }
                '[' | ']' | '{' | '}' | '#' => {
                    return Err(ActionError::pattern(
                        pattern,
                        format!("reserved character `{c}`"),
                    ));
                }
                other => push_literal(&mut strftime, other),
            }
        }

        Ok(Self {
            source: pattern.to_owned(),
            padded: zero_padded(&strftime),
            strftime,
            zoned,
        })
    }

    #[cfg(test)]
    pub(crate) fn strftime(&self) -> &str {
        &self.strftime
    }

    /// Formats a local date-time.
    pub(crate) fn format_date_time(&self, value: &NaiveDateTime) -> ActionResult<String> {
        self.render(value.format(&self.strftime))
    }

    /// Formats a local date; time fields are rejected.
    pub(crate) fn format_date(&self, value: &NaiveDate) -> ActionResult<String> {
        self.render(value.format(&self.strftime))
    }

    /// Formats a local date-time with localized month and day names.
    pub(crate) fn format_localized(
        &self,
        value: &NaiveDateTime,
        locale: Locale,
    ) -> ActionResult<String> {
        let anchored: DateTime<Utc> = value.and_utc();
        self.render(anchored.format_localized(&self.strftime, locale))
    }

    /// Parses a local date; time fields in the pattern must still match.
    pub(crate) fn parse_date(&self, text: &str) -> ActionResult<NaiveDate> {
        let parsed = self.parse_fields(text)?;
        let date = parsed.to_naive_date().map_err(|err| ActionError::parse(text, err))?;
        let time = parsed.to_naive_time().unwrap_or(NaiveTime::MIN);
        self.ensure_exact(text, &date.and_time(time))?;
        Ok(date)
    }

    /// Parses a local date-time.
    pub(crate) fn parse_date_time(&self, text: &str) -> ActionResult<NaiveDateTime> {
        let value = self
            .parse_fields(text)?
            .to_naive_datetime_with_offset(0)
            .map_err(|err| ActionError::parse(text, err))?;
        self.ensure_exact(text, &value)?;
        Ok(value)
    }

    fn parse_fields(&self, text: &str) -> ActionResult<Parsed> {
        let mut parsed = Parsed::new();
        format::parse(&mut parsed, text, StrftimeItems::new(&self.strftime))
            .map_err(|err| ActionError::parse(text, err))?;
        Ok(parsed)
    }

    /// Rejects text chrono accepted leniently: unpadded numbers, signed
    /// years, surrounding whitespace, or long names for short fields.
    /// Single-letter numeric fields accept either width (`7` or `07`), and
    /// zone fields have no local rendering so they are left to chrono.
    fn ensure_exact(&self, text: &str, value: &NaiveDateTime) -> ActionResult<()> {
        if self.zoned {
            return Ok(());
        }
        let renders_as = |strftime: &str| {
            let mut rendered = String::with_capacity(text.len());
            write!(rendered, "{}", value.format(strftime)).is_ok() && rendered == text
        };
        if renders_as(&self.strftime) || renders_as(&self.padded) {
            Ok(())
        } else {
            Err(ActionError::parse(
                text,
                format!("does not match `{}` exactly", self.source),
            ))
        }
    }

    fn render(&self, formatted: impl std::fmt::Display) -> ActionResult<String> {
        let mut out = String::new();
        write!(out, "{formatted}").map_err(|_| {
            ActionError::pattern(&self.source, "pattern requires fields the value does not have")
        })?;
        Ok(out)
    }
}

/// Resolves a BCP-47 style tag (`en-US`, `fr_FR`) to a chrono locale.
///
/// Unknown tags fall back to the POSIX locale.
pub(crate) fn locale(tag: &str) -> Locale {
    let normalized = tag.trim().replace('-', "_");
    Locale::try_from(normalized.as_str())
        .or_else(|_| {
            let language = normalized.split('_').next().unwrap_or_default();
            Locale::try_from(language)
        })
        .unwrap_or(Locale::POSIX)
}

/// Rewrites `%-d`-style specifiers to their zero-padded form.
fn zero_padded(strftime: &str) -> String {
    let mut out = String::with_capacity(strftime.len());
    let mut chars = strftime.chars();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '%' {
            match chars.next() {
                Some('-') => {}
                Some(next) => out.push(next),
                None => break,
            }
        }
    }
    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

fn field(letter: char, width: usize) -> Option<&'static str> {
    let spec = match (letter, width) {
        ('y' | 'u', 2) => "%y",
        ('y' | 'u', 1 | 3 | 4) => "%Y",
        ('M' | 'L', 1) => "%-m",
        ('M' | 'L', 2) => "%m",
        ('M' | 'L', 3) => "%b",
        ('M' | 'L', 4) => "%B",
        ('d', 1) => "%-d",
        ('d', 2) => "%d",
        ('D', 1) => "%-j",
        ('D', 3) => "%j",
        ('E', 1..=3) => "%a",
        ('E', 4) => "%A",
        ('a', 1) => "%p",
        ('H', 1) => "%-H",
        ('H', 2) => "%H",
        ('h', 1) => "%-I",
        ('h', 2) => "%I",
        ('m', 1) => "%-M",
        ('m', 2) => "%M",
        ('s', 1) => "%-S",
        ('s', 2) => "%S",
        ('S', 3) => "%3f",
        ('S', 6) => "%6f",
        ('S', 9) => "%9f",
        ('Z', 1..=3) | ('x', 2) => "%z",
        ('X' | 'x', 3) => "%:z",
        ('z', 1..=3) | ('V', 2) => "%Z",
        _ => return None,
    };
    Some(spec)
}
