//! NIK (Nomor Induk Kependudukan) extraction.

use super::labels::contains_ignore_case;
use super::patterns::NIK_PATTERN;
use super::FieldExtractor;
use crate::models::ktp::KtpField;

/// Number of digits in a NIK.
pub const NIK_LENGTH: usize = 16;

/// NIK field extractor.
pub struct NikExtractor;

impl NikExtractor {
    /// Create a new NIK extractor.
    pub fn new() -> Self {
        Self
    }
}

impl Default for NikExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NikExtractor {
    fn field(&self) -> KtpField {
        KtpField::Nik
    }

    fn extract(&self, lines: &[&str]) -> Option<String> {
        extract_nik(lines)
    }
}

/// Extract the NIK from OCR lines.
///
/// Any standalone 16-digit run wins, labelled or not, since OCR often drops
/// the "NIK" label. A "NIK" label whose number was pushed onto the next line
/// is also accepted, ignoring spaces and punctuation between the digits.
pub fn extract_nik(lines: &[&str]) -> Option<String> {
    for (i, line) in lines.iter().enumerate() {
        if let Some(m) = NIK_PATTERN.find(line) {
            return Some(m.as_str().to_string());
        }

        if contains_ignore_case(line, "NIK") {
            if let Some(next) = lines.get(i + 1) {
                let digits: String = next.chars().filter(char::is_ascii_digit).collect();
                if digits.len() == NIK_LENGTH {
                    return Some(digits);
                }
            }
        }
    }
    None
}

/// Whether `nik` is exactly sixteen ASCII digits.
pub fn is_well_formed_nik(nik: &str) -> bool {
    nik.len() == NIK_LENGTH && nik.bytes().all(|b| b.is_ascii_digit())
}
