use regex::Regex;

use crate::models::NOT_AVAILABLE;

/// Folds the salary widget text and any amount quoted in the description into
/// one display value.
pub struct SalaryNormalizer {
    amount_regex: Regex,
}

impl SalaryNormalizer {
    pub fn new() -> Self {
        SalaryNormalizer {
            // Currency symbol, integer part with optional ",ddd" groups, optional decimals
            amount_regex: Regex::new(r"[£$€]\d+(?:,\d{3})*(?:\.\d+)?").expect("salary amount pattern"),
        }
    }

    /// First currency amount quoted in `description`.
    pub fn find_amount<'a>(&self, description: &'a str) -> Option<&'a str> {
        self.amount_regex.find(description).map(|m| m.as_str())
    }

    /// The description is searched whether or not the widget already shows
    /// figures; a found amount is appended in parentheses, or stands alone
    /// when the widget was absent.
    pub fn normalize(&self, raw: &str, description: &str) -> String {
        match self.find_amount(description) {
            Some(amount) if raw == NOT_AVAILABLE => amount.to_string(),
            Some(amount) => format!("{} ({})", raw, amount),
            None => raw.to_string(),
        }
    }
}

impl Default for SalaryNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
