//! Layout-independent regex patterns.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // A wrapped summary weight: digits with optional separators only
    pub static ref NUMERIC_ONLY: Regex = Regex::new(r"^[\d.,]+$").unwrap();

    // Pickup date parts: "01/05/2024", "2024-01-05", "06,", "Jan", "Mon."
    pub static ref DATE_NUMERIC: Regex = Regex::new(
        r"^\d{1,4}(?:[/.\-]\d{1,4}){0,2}[,.]?$"
    ).unwrap();

    // A date that needs no further tokens: "01/05/2024", "2024-01-05"
    pub static ref DATE_COMPLETE: Regex = Regex::new(
        r"^\d{1,4}(?:[/.\-]\d{1,4}){1,2}[,.]?$"
    ).unwrap();

    pub static ref DATE_YEAR: Regex = Regex::new(r"^\d{4}[,.]?$").unwrap();

    pub static ref DATE_NAME: Regex = Regex::new(
        r"(?i)^(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?|mon(?:day)?|tue(?:s(?:day)?)?|wed(?:nesday)?|thu(?:r(?:s(?:day)?)?)?|fri(?:day)?|sat(?:urday)?|sun(?:day)?)[,.]?$"
    ).unwrap();
}
