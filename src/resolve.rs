use chrono::{DateTime, Local};
use rand::Rng;
use thiserror::Error;

use crate::when;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no duration given")]
    Empty,
    #[error("could not parse token: {0}")]
    BadToken(String),
    #[error("could not resolve time: {0}")]
    UnresolvedTime(String),
}

impl ResolveError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Empty => 1,
            Self::BadToken(_) | Self::UnresolvedTime(_) => 2,
        }
    }
}

enum Resolution {
    Matched(u64),
    NotApplicable,
}

/// Turns the argument list into a single duration in seconds.
///
/// The resolvers are tried in fixed order — absolute time (`@...`), signed
/// range (`-a +b`), unit sum — and each either claims the arguments or
/// declines so the next one can try.
pub fn resolve_duration(
    args: &[String],
    now: DateTime<Local>,
    rng: &mut impl Rng,
) -> Result<u64, ResolveError> {
    if args.is_empty() {
        return Err(ResolveError::Empty);
    }
    if let Resolution::Matched(secs) = try_absolute(args, now)? {
        return Ok(secs);
    }
    if let Resolution::Matched(secs) = try_range(args, rng)? {
        return Ok(secs);
    }
    parse_unit_sum(args)
}

// Suffixes per unit family, most specific first. Families are tried in
// hours -> minutes -> seconds order, so "1hours" is hours even though it
// also ends in "s".
const HOUR_SUFFIXES: [&str; 4] = ["hours", "hour", "hr", "h"];
const MINUTE_SUFFIXES: [&str; 4] = ["minutes", "minute", "min", "m"];
const SECOND_SUFFIXES: [&str; 4] = ["seconds", "second", "sec", "s"];

fn parse_unit_sum(args: &[String]) -> Result<u64, ResolveError> {
    let mut hours: u64 = 0;
    let mut minutes: u64 = 0;
    let mut seconds: u64 = 0;
    for token in args {
        let lower = token.to_ascii_lowercase();
        if let Some(value) = strip_any(&lower, &HOUR_SUFFIXES) {
            hours = hours.saturating_add(parse_value(value, token)?);
        } else if let Some(value) = strip_any(&lower, &MINUTE_SUFFIXES) {
            minutes = minutes.saturating_add(parse_value(value, token)?);
        } else if let Some(value) = strip_any(&lower, &SECOND_SUFFIXES) {
            seconds = seconds.saturating_add(parse_value(value, token)?);
        } else if !lower.is_empty() && lower.bytes().all(|b| b.is_ascii_digit()) {
            seconds = seconds.saturating_add(parse_value(&lower, token)?);
        } else {
            return Err(ResolveError::BadToken(token.clone()));
        }
    }
    Ok(hours
        .saturating_mul(3600)
        .saturating_add(minutes.saturating_mul(60))
        .saturating_add(seconds))
}

fn strip_any<'a>(token: &'a str, suffixes: &[&str]) -> Option<&'a str> {
    suffixes.iter().find_map(|suffix| token.strip_suffix(suffix))
}

fn parse_value(value: &str, token: &str) -> Result<u64, ResolveError> {
    value
        .parse::<u64>()
        .map_err(|_| ResolveError::BadToken(token.to_string()))
}

/// Two tokens, one `-a` and one `+b` in either order, sample uniformly from
/// the inclusive range between the two magnitudes.
fn try_range(args: &[String], rng: &mut impl Rng) -> Result<Resolution, ResolveError> {
    if args.len() != 2 {
        return Ok(Resolution::NotApplicable);
    }
    let (minus, plus) = if args[0].starts_with('-') && args[1].starts_with('+') {
        (&args[0], &args[1])
    } else if args[0].starts_with('+') && args[1].starts_with('-') {
        (&args[1], &args[0])
    } else {
        return Ok(Resolution::NotApplicable);
    };
    let a = parse_value(&minus[1..], minus)?;
    let b = parse_value(&plus[1..], plus)?;
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    Ok(Resolution::Matched(sample_range(lo, hi, rng)))
}

fn sample_range(lo: u64, hi: u64, rng: &mut impl Rng) -> u64 {
    if lo == hi {
        lo
    } else {
        rng.random_range(lo..=hi)
    }
}

fn try_absolute(args: &[String], now: DateTime<Local>) -> Result<Resolution, ResolveError> {
    let Some(first) = args[0].strip_prefix('@') else {
        return Ok(Resolution::NotApplicable);
    };
    let phrase = std::iter::once(first)
        .chain(args[1..].iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");
    let phrase = phrase.trim().to_string();
    let target = when::resolve_absolute_time(&phrase, now)
        .ok_or_else(|| ResolveError::UnresolvedTime(phrase.clone()))?;
    let delta = (target - now).num_seconds();
    if delta < 0 {
        eprintln!("warning: '{phrase}' already passed; did you mean '@{phrase} tomorrow'? Counting down 0 seconds.");
        return Ok(Resolution::Matched(0));
    }
    Ok(Resolution::Matched(delta as u64))
}
