//! Citizenship (kewarganegaraan) extraction.

use super::FieldExtractor;
use crate::models::ktp::KtpField;

/// Indonesian citizen.
pub const WNI: &str = "WNI";
/// Foreign national.
pub const WNA: &str = "WNA";

/// Citizenship field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct CitizenshipExtractor;

impl FieldExtractor for CitizenshipExtractor {
    fn field(&self) -> KtpField {
        KtpField::Kewarganegaraan
    }

    fn extract(&self, lines: &[&str]) -> Option<String> {
        extract_kewarganegaraan(lines)
    }
}

/// Extract citizenship as [`WNI`] or [`WNA`]; WNI wins when a line has both.
pub fn extract_kewarganegaraan(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .find_map(|line| {
            let upper = line.to_uppercase();
            if upper.contains(WNI) {
                Some(WNI)
            } else if upper.contains(WNA) {
                Some(WNA)
            } else {
                None
            }
        })
        .map(str::to_string)
}
