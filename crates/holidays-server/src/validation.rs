//! Request validation
//!
//! Collects every offending field before rejecting, so a single 400 response
//! lists all problems at once.

use std::collections::BTreeMap;

use holidays_core::source::is_valid_country_code;

use crate::error::ApiError;

const BLANK: &str = "must not be blank";
const NOT_ALPHANUMERIC: &str = "must contain only ASCII letters and digits";

/// Accumulates field errors for one request
#[derive(Debug, Default)]
pub struct Validator {
    errors: BTreeMap<String, String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A required, non-blank, alphanumeric country code; returned trimmed
    pub fn country_code(&mut self, field: &str, value: Option<&str>) -> String {
        match value.map(str::trim) {
            Some(code) if is_valid_country_code(code) => code.to_string(),
            Some(code) if !code.is_empty() => {
                self.reject(field, NOT_ALPHANUMERIC);
                String::new()
            }
            _ => {
                self.reject(field, BLANK);
                String::new()
            }
        }
    }

    /// A list of country codes; repeated and comma-separated values are both accepted
    pub fn country_codes<'a>(
        &mut self,
        field: &str,
        values: impl IntoIterator<Item = &'a str>,
    ) -> Vec<String> {
        let codes: Vec<String> = values
            .into_iter()
            .flat_map(|v| v.split(','))
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        if codes.is_empty() {
            self.reject(field, "must contain at least one country code");
        } else if !codes.iter().all(|c| is_valid_country_code(c)) {
            self.reject(field, NOT_ALPHANUMERIC);
        }
        codes
    }

    /// An integer year
    pub fn year(&mut self, field: &str, raw: &str) -> i32 {
        match raw.trim().parse::<i32>() {
            Ok(year) => year,
            Err(_) => {
                self.reject(field, &format!("must be an integer (got '{}')", raw));
                0
            }
        }
    }

    pub fn reject(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// Finish validation, failing if any field was rejected
    pub fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self.errors))
        }
    }
}

/// First value of a query parameter
pub fn first<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// All values of a repeated query parameter
pub fn all<'a>(pairs: &'a [(String, String)], key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    pairs
        .iter()
        .filter(move |(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
