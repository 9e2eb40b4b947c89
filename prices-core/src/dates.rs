//! Calendar boundary arithmetic on `YYYY-MM-DD` strings.
//!
//! These helpers operate on the textual form directly rather than going
//! through `chrono`, because `next_month` deliberately does NOT correct the
//! day component: `2024-01-31` maps to the literal `2024-02-31`. Only the
//! year boundary from `next_year` is used to build range queries, where the
//! result (`YYYY-01-01`) is always a real date.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DateError {
    #[error("malformed date '{0}': expected YYYY-MM-DD")]
    Malformed(String),
}

/// Split a `YYYY-MM-DD` string into (year, month, day) integers.
///
/// Fails unless the input has exactly three hyphen-separated integer
/// components. No range checks beyond what the integer types impose.
fn components(date: &str) -> Result<(i32, u32, u32), DateError> {
    let parts: Vec<&str> = date.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(DateError::Malformed(date.to_string()));
    };

    let year: i32 = year
        .parse()
        .map_err(|_| DateError::Malformed(date.to_string()))?;
    let month: u32 = month
        .parse()
        .map_err(|_| DateError::Malformed(date.to_string()))?;
    let day: u32 = day
        .parse()
        .map_err(|_| DateError::Malformed(date.to_string()))?;

    Ok((year, month, day))
}

fn format_date(year: i32, month: u32, day: u32) -> String {
    format!("{year:04}-{month:02}-{day:02}")
}

/// The same day one calendar month later, with December rolling into January
/// of the next year. The day passes through unchanged, so the result can be
/// a date that does not exist on the calendar (e.g. day 31 in February).
pub fn next_month(date: &str) -> Result<String, DateError> {
    let (mut year, mut month, day) = components(date)?;
    month += 1;
    if month == 13 {
        month = 1;
        year += 1;
    }
    Ok(format_date(year, month, day))
}

/// January 1st of the following year. The original month and day are
/// discarded entirely.
pub fn next_year(date: &str) -> Result<String, DateError> {
    let (year, _, _) = components(date)?;
    Ok(format_date(year + 1, 1, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_month_mid_year() {
        assert_eq!(next_month("2024-06-15").unwrap(), "2024-07-15");
    }

    #[test]
    fn next_month_december_rolls_into_next_year() {
        assert_eq!(next_month("2023-12-15").unwrap(), "2024-01-15");
    }

    #[test]
    fn next_month_keeps_the_day_uncorrected() {
        // Day 31 in February is the documented literal behavior.
        assert_eq!(next_month("2024-01-31").unwrap(), "2024-02-31");
    }

    #[test]
    fn next_month_zero_pads_short_components() {
        assert_eq!(next_month("2024-1-5").unwrap(), "2024-02-05");
    }

    #[test]
    fn next_year_discards_month_and_day() {
        assert_eq!(next_year("2023-06-15").unwrap(), "2024-01-01");
        assert_eq!(next_year("2023-12-31").unwrap(), "2024-01-01");
        assert_eq!(next_year("2023-01-01").unwrap(), "2024-01-01");
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        for bad in ["", "2024", "2024-01", "2024/01/05", "2024-01-05-07", "a-b-c"] {
            assert!(next_month(bad).is_err(), "next_month accepted {bad:?}");
            assert!(next_year(bad).is_err(), "next_year accepted {bad:?}");
        }
    }
}
