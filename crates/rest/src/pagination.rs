//! Page token decoding.
//!
//! Search URLs carry a compact page token: the first character selects the
//! page, the remaining characters spell the page size in decimal. `A10`
//! asks for page 1 with 10 records, `B25` for page 2 with 25. The scheme
//! never rejects a request; anything it cannot understand falls back to the
//! first page with ten records.

/// Page number served when a token cannot be understood.
const FALLBACK_PAGE: usize = 1;

/// Page size served when a token cannot be understood.
const FALLBACK_SIZE: usize = 10;

/// A decoded page request.
///
/// Both fields are guaranteed to be at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: usize,
    /// Records per page.
    pub size: usize,
}

impl PageRequest {
    /// Decodes a page token.
    ///
    /// The page number is the first character's code point modulo 32,
    /// floored to 1 so uppercase ASCII maps naturally (`A` is page 1, `B`
    /// page 2, and so on). The size is the unsigned decimal value of the
    /// remaining characters. Tokens shorter than two characters, sizes that
    /// fail to parse, and zero sizes all yield the fallback of page 1 with
    /// 10 records.
    pub fn decode(token: &str) -> Self {
        let mut chars = token.chars();
        let Some(selector) = chars.next() else {
            return Self::fallback();
        };
        let digits = chars.as_str();
        if digits.is_empty() {
            return Self::fallback();
        }
        let Ok(size) = digits.parse::<usize>() else {
            return Self::fallback();
        };
        if size == 0 {
            return Self::fallback();
        }

        let page = ((selector as usize) % 32).max(1);
        Self { page, size }
    }

    fn fallback() -> Self {
        Self {
            page: FALLBACK_PAGE,
            size: FALLBACK_SIZE,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::fallback()
    }
}
