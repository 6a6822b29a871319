//! Canonical spellings for `pg_catalog` built-in types.
//!
//! The parse tree spells built-in types by their catalog names (`int4`,
//! `bpchar`, `timestamptz`); SQL text spells them by their grammar names
//! (`int`, `char(n)`, `timestamp with time zone`). Interval qualifiers arrive
//! as a bitmask in the first type modifier and are decoded through a fixed
//! lookup table.

use crate::{Error, Result};

// Interval qualifier bits, as encoded by the parser (datetime token numbers
// shifted into a mask).
const MONTH: i32 = 1 << 1;
const YEAR: i32 = 1 << 2;
const DAY: i32 = 1 << 3;
const HOUR: i32 = 1 << 10;
const MINUTE: i32 = 1 << 11;
const SECOND: i32 = 1 << 12;

/// Mask carried by a bare `interval` with no qualifier list.
const INTERVAL_FULL_RANGE: i32 = 0x7FFF;

/// Qualifier token sequences keyed by mask. Joined with `" to "` when
/// rendered, so a two-token entry reads `day to second`.
static INTERVAL_QUALIFIERS: &[(i32, &[&str])] = &[
    (YEAR, &["year"]),
    (MONTH, &["month"]),
    (DAY, &["day"]),
    (HOUR, &["hour"]),
    (MINUTE, &["minute"]),
    (SECOND, &["second"]),
    (YEAR | MONTH, &["year", "month"]),
    (DAY | HOUR, &["day", "hour"]),
    (DAY | HOUR | MINUTE, &["day", "minute"]),
    (DAY | HOUR | MINUTE | SECOND, &["day", "second"]),
    (HOUR | MINUTE, &["hour", "minute"]),
    (HOUR | MINUTE | SECOND, &["hour", "second"]),
    (MINUTE | SECOND, &["minute", "second"]),
];

/// Decodes an interval typmod bitmask into its qualifier tokens.
///
/// Returns an empty slice for the full-range mask (a bare `interval`) and
/// `None` for masks the table does not cover.
pub(crate) fn interval_qualifiers(mask: i32) -> Option<&'static [&'static str]> {
    if mask == INTERVAL_FULL_RANGE {
        return Some(&[]);
    }
    INTERVAL_QUALIFIERS.iter().find(|(m, _)| *m == mask).map(|(_, tokens)| *tokens)
}

/// Maps a `pg_catalog` type name to its canonical SQL spelling.
///
/// `args` is the already-rendered type modifier list (`"10, 2"` for
/// `numeric(10, 2)`), if any. Unknown catalog names are an error so that
/// drift against the parser surfaces immediately instead of producing
/// silently wrong SQL.
pub(crate) fn canonical_spelling(name: &str, args: Option<&str>) -> Result<String> {
    let spelling = match name {
        "bool" => "boolean".to_string(),
        "int2" => "smallint".to_string(),
        "int4" => "int".to_string(),
        "int8" => "bigint".to_string(),
        "real" | "float4" => "real".to_string(),
        "float8" => "double precision".to_string(),
        "time" => "time".to_string(),
        "timetz" => "time with time zone".to_string(),
        "timestamp" => "timestamp".to_string(),
        "timestamptz" => "timestamp with time zone".to_string(),
        "numeric" => match args {
            Some(args) => format!("numeric({})", args),
            None => "numeric".to_string(),
        },
        "bpchar" => match args {
            Some(args) => format!("char({})", args),
            None => "char".to_string(),
        },
        "varchar" => match args {
            Some(args) => format!("varchar({})", args),
            None => "varchar".to_string(),
        },
        _ => return Err(Error::UnsupportedType { name: name.to_string() }),
    };
    Ok(spelling)
}
