//! Marital status (status perkawinan) extraction.

use super::labels::{remove_ignore_case, value_for_label};
use super::FieldExtractor;
use crate::models::ktp::KtpField;

pub const NOT_MARRIED: &str = "BELUM KAWIN";
pub const MARRIED: &str = "KAWIN";
pub const DIVORCED: &str = "CERAI";

/// Marital status field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaritalStatusExtractor;

impl FieldExtractor for MaritalStatusExtractor {
    fn field(&self) -> KtpField {
        KtpField::StatusPerkawinan
    }

    fn extract(&self, lines: &[&str]) -> Option<String> {
        extract_status_perkawinan(lines)
    }
}

/// Extract the marital status as one of the canonical values.
///
/// A value found next to the "Status Perkawinan" label decides the result on
/// its own; the keyword scan only runs when the label yields nothing.
pub fn extract_status_perkawinan(lines: &[&str]) -> Option<String> {
    if let Some(value) = value_for_label("Status Perkawinan", lines) {
        return normalize_marital_status(&value).map(str::to_string);
    }

    lines
        .iter()
        .filter(|line| {
            let upper = line.to_uppercase();
            upper.contains("STATUS") || upper.contains("KAWIN") || upper.contains("CERAI")
        })
        // "PERKAWINAN" itself contains "KAWIN". Scanning the raw line would turn a
        // bare "Status Perkawinan:" label with no value into KAWIN; here it yields None.
        .find_map(|line| normalize_marital_status(&remove_ignore_case(line, "PERKAWINAN")))
        .map(str::to_string)
}

/// Map an OCR fragment onto a canonical marital status.
pub fn normalize_marital_status(value: &str) -> Option<&'static str> {
    let upper = value.to_uppercase();

    if upper.contains("BELUM") {
        Some(NOT_MARRIED)
    } else if upper.contains("KAWIN") {
        Some(MARRIED)
    } else if upper.contains("CERAI") {
        Some(DIVORCED)
    } else {
        None
    }
}
