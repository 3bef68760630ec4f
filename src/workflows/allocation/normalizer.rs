use super::domain::TokenSet;
use chrono::NaiveDate;

/// Cell value data sources use to mean "nothing listed".
pub const NO_VALUE_SENTINEL: &str = "N/A";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, thiserror::Error)]
#[error("'{value}' is not a YYYY-MM-DD date")]
pub struct DateFormatError {
    pub value: String,
    #[source]
    pub source: chrono::ParseError,
}

/// Splits a comma-joined cell into trimmed, lower-cased tokens.
///
/// Blank cells and the [`NO_VALUE_SENTINEL`] yield an empty set; empty
/// fragments such as `"a,,b"` are dropped rather than failing the row.
pub fn parse_set(cell: &str) -> TokenSet {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NO_VALUE_SENTINEL) {
        return TokenSet::new();
    }

    trimmed
        .split(',')
        .map(normalize_token)
        .filter(|token| !token.is_empty())
        .collect()
}

pub fn parse_date(cell: &str) -> Result<NaiveDate, DateFormatError> {
    let trimmed = cell.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|source| DateFormatError {
        value: trimmed.to_string(),
        source,
    })
}

pub fn normalize_token(value: &str) -> String {
    value.trim().to_lowercase()
}

pub fn same_location(left: &str, right: &str) -> bool {
    normalize_token(left) == normalize_token(right)
}
