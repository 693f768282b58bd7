// Parsing of the schedule and week strings exported by the course sheet.
// Both parsers are total: anything unrecognised becomes "no data".
use crate::models::{Day, Interval};
use std::collections::BTreeSet;

/// Schedule value used by the sheet for sections without a fixed meeting time.
pub const UNSCHEDULED: &str = "T.-  -";

/// Weeks above this number are dropped so a corrupt range cannot blow up the set.
pub const MAX_WEEK: u32 = 200;

/// Parse a schedule string such as `"T.Ba  1->2"` into an [`Interval`].
///
/// The first `<day> <start>-><end>` occurrence in the string is used; text
/// around it is ignored. Returns `None` for the unscheduled sentinel, for
/// unknown day tokens, missing arrows or periods outside `1..=12`.
pub fn parse_schedule(raw: &str) -> Option<Interval> {
    if raw.is_empty() || raw == UNSCHEDULED {
        return None;
    }
    for (pos, _) in raw.match_indices("T.") {
        if let Some(iv) = parse_slot_at(&raw[pos..]) {
            return Some(iv);
        }
    }
    None
}

fn parse_slot_at(s: &str) -> Option<Interval> {
    let day = Day::ALL.into_iter().find(|d| s.starts_with(d.label()))?;
    let rest = &s[day.label().len()..];
    let trimmed = rest.trim_start();
    // at least one whitespace between the day and the periods
    if trimmed.len() == rest.len() {
        return None;
    }
    let (start, rest) = take_number(trimmed)?;
    let rest = rest.strip_prefix("->")?;
    let (end, _) = take_number(rest)?;
    Interval::new(day, u8::try_from(start).ok()?, u8::try_from(end).ok()?)
}

/// Leading run of ASCII digits as a number plus the remainder.
fn take_number(s: &str) -> Option<(u32, &str)> {
    let digits = s.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let n = s[..digits].parse::<u32>().ok()?;
    Some((n, &s[digits..]))
}

/// Lenient integer read: surrounding blanks and trailing garbage are ignored,
/// `"12abc"` reads as 12. Signs other than `+` make the value unreadable.
pub fn leading_int(s: &str) -> Option<u32> {
    let s = s.trim();
    let s = s.strip_prefix('+').unwrap_or(s);
    take_number(s).map(|(n, _)| n)
}

/// Parse a week list such as `"23->27,31->40"` or `"26,27,31->43"`.
///
/// Tokens are comma separated; each is a single week or an inclusive range
/// `a->b`. Quote characters are removed first. A reversed range (`a > b`)
/// contributes nothing, as do unreadable tokens and week 0.
pub fn parse_weeks(raw: &str) -> BTreeSet<u32> {
    let cleaned: String = raw.chars().filter(|c| *c != '"').collect();
    let mut weeks = BTreeSet::new();
    for token in cleaned.split(',') {
        if let Some((a, b)) = token.split_once("->") {
            let (Some(start), Some(end)) = (leading_int(a), leading_int(b)) else {
                continue;
            };
            let start = start.max(1);
            let end = end.min(MAX_WEEK);
            if start <= end {
                weeks.extend(start..=end);
            }
        } else if let Some(w) = leading_int(token) {
            if (1..=MAX_WEEK).contains(&w) {
                weeks.insert(w);
            }
        }
    }
    weeks
}
