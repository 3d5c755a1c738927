//! Parser for human-authored durations such as `"1h30m"` or `"45s"`.

use std::sync::LazyLock;

use chrono::TimeDelta;
use regex::Regex;

static TIMESPEC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<hours>[0-9]+)h)?(?:(?P<minutes>[0-9]+)m)?(?:(?P<seconds>[0-9]+)s)?$")
        .expect("timespec pattern is valid")
});

type Unit = fn(i64) -> Option<TimeDelta>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TimeSpecError {
    #[error("invalid duration {0:?}: expected e.g. \"1h30m\", \"45s\" or \"2h\"")]
    Malformed(String),

    #[error("duration {0:?} is too large")]
    OutOfRange(String),
}

/// Parse `<N>h<N>m<N>s` (every segment optional, in that order) into a
/// [`TimeDelta`].
///
/// The empty string matches with no segments and yields a zero duration;
/// anything that does not match the pattern is [`TimeSpecError::Malformed`].
pub fn parse(input: &str) -> Result<TimeDelta, TimeSpecError> {
    let caps = TIMESPEC
        .captures(input)
        .ok_or_else(|| TimeSpecError::Malformed(input.to_owned()))?;

    let segment = |name: &str, unit: Unit| match caps.name(name) {
        None => Ok(TimeDelta::zero()),
        Some(m) => m
            .as_str()
            .parse::<i64>()
            .ok()
            .and_then(unit)
            .ok_or_else(|| TimeSpecError::OutOfRange(input.to_owned())),
    };

    let hours = segment("hours", TimeDelta::try_hours)?;
    let minutes = segment("minutes", TimeDelta::try_minutes)?;
    let seconds = segment("seconds", TimeDelta::try_seconds)?;

    hours
        .checked_add(&minutes)
        .and_then(|d| d.checked_add(&seconds))
        .ok_or_else(|| TimeSpecError::OutOfRange(input.to_owned()))
}
