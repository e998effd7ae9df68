//! Pagination utilities shared by the service and HTTP layers
//!
//! Provides the 1-based `PageRequest`, the arithmetic behind a page result,
//! and the lenient integer parsing used for query-string values.

use thiserror::Error;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Invalid page or pageSize")]
    Invalid,
}

/// Pagination parameters as received from the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page index
    pub page: i64,
    /// rows per page
    pub page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, page_size: DEFAULT_PAGE_SIZE }
    }
}

impl PageRequest {
    /// Build from raw query-string values; absent or non-numeric values fall back to defaults.
    pub fn from_query(page: Option<&str>, page_size: Option<&str>) -> Self {
        Self {
            page: page.and_then(parse_leading_int).unwrap_or(DEFAULT_PAGE),
            page_size: page_size.and_then(parse_leading_int).unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    /// Reject non-positive values and offsets that do not fit in an `i64`.
    pub fn validate(&self) -> Result<(), PaginationError> {
        if self.page <= 0 || self.page_size <= 0 {
            return Err(PaginationError::Invalid);
        }
        self.checked_offset().map(|_| ())
    }

    /// `(page - 1) * page_size`
    pub fn checked_offset(&self) -> Result<i64, PaginationError> {
        (self.page - 1)
            .checked_mul(self.page_size)
            .ok_or(PaginationError::Invalid)
    }

    pub fn last_page(&self, total_records: i64) -> i64 {
        last_page(total_records, self.page_size)
    }
}

/// `ceil(total / page_size)`; zero rows means zero pages.
pub fn last_page(total_records: i64, page_size: i64) -> i64 {
    if total_records <= 0 || page_size <= 0 {
        return 0;
    }
    // must not overflow for page_size near i64::MAX
    (total_records - 1) / page_size + 1
}

/// Parse the leading integer of `raw` the way `parseInt` does: skip leading
/// whitespace, accept one sign, then consume digits up to the first
/// non-digit. A `0x`/`0X` prefix switches to hexadecimal. Returns `None` when
/// there are no digits or the value overflows.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, rest) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let digits_len = rest.bytes().take_while(|b| (*b as char).is_digit(radix)).count();
    if digits_len == 0 {
        return None;
    }
    let digits = &rest[..digits_len];
    if negative {
        i64::from_str_radix(&format!("-{digits}"), radix).ok()
    } else {
        i64::from_str_radix(digits, radix).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_absent_or_garbage() {
        assert_eq!(PageRequest::from_query(None, None), PageRequest { page: 1, page_size: 10 });
        assert_eq!(PageRequest::from_query(Some("abc"), Some("")), PageRequest::default());
    }

    #[test]
    fn lenient_parse_takes_leading_digits() {
        assert_eq!(parse_leading_int("3abc"), Some(3));
        assert_eq!(parse_leading_int("  2.9"), Some(2));
        assert_eq!(parse_leading_int("-4"), Some(-4));
        assert_eq!(parse_leading_int("+7"), Some(7));
        assert_eq!(parse_leading_int("x1"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999999999999"), None);
    }

    #[test]
    fn lenient_parse_understands_hex_prefix() {
        assert_eq!(parse_leading_int("0x10"), Some(16));
        assert_eq!(parse_leading_int("0XfFz"), Some(255));
        assert_eq!(parse_leading_int("-0x1"), Some(-1));
        assert_eq!(parse_leading_int("0x"), None);
        assert_eq!(parse_leading_int("0"), Some(0));
    }

    #[test]
    fn non_positive_values_are_rejected() {
        assert_eq!(PageRequest { page: 0, page_size: 10 }.validate(), Err(PaginationError::Invalid));
        assert_eq!(PageRequest { page: 1, page_size: 0 }.validate(), Err(PaginationError::Invalid));
        assert_eq!(PageRequest { page: -2, page_size: -1 }.validate(), Err(PaginationError::Invalid));
        assert!(PageRequest { page: 1, page_size: 1 }.validate().is_ok());
    }

    #[test]
    fn offset_overflow_is_rejected() {
        let req = PageRequest { page: i64::MAX, page_size: 10 };
        assert_eq!(req.validate(), Err(PaginationError::Invalid));
    }

    #[test]
    fn offset_and_last_page_for_partial_tail() {
        let req = PageRequest { page: 3, page_size: 10 };
        assert_eq!(req.checked_offset(), Ok(20));
        assert_eq!(req.last_page(25), 3);
    }

    #[test]
    fn last_page_is_ceiling() {
        assert_eq!(last_page(0, 10), 0);
        assert_eq!(last_page(1, 10), 1);
        assert_eq!(last_page(10, 10), 1);
        assert_eq!(last_page(11, 10), 2);
        assert_eq!(last_page(7, 1), 7);
    }

    #[test]
    fn last_page_with_maximal_page_size() {
        assert_eq!(last_page(25, i64::MAX), 1);
        assert_eq!(last_page(i64::MAX, i64::MAX), 1);
        assert_eq!(last_page(i64::MAX, 1), i64::MAX);

        let req = PageRequest::from_query(Some("1"), Some("9223372036854775807"));
        assert!(req.validate().is_ok());
        assert_eq!(req.checked_offset(), Ok(0));
        assert_eq!(req.last_page(25), 1);
    }
}
