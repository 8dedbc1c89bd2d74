//! Sex (jenis kelamin) extraction, normalized to the two printed values.

use super::labels::value_for_label;
use super::FieldExtractor;
use crate::models::ktp::KtpField;

/// Canonical male value.
pub const MALE: &str = "LAKI-LAKI";
/// Canonical female value.
pub const FEMALE: &str = "PEREMPUAN";

const MALE_KEYWORDS: [&str; 2] = ["LAKI", "PRIA"];
const FEMALE_KEYWORDS: [&str; 2] = ["PEREMPUAN", "WANITA"];

/// Sex field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenderExtractor;

impl FieldExtractor for GenderExtractor {
    fn field(&self) -> KtpField {
        KtpField::JenisKelamin
    }

    fn extract(&self, lines: &[&str]) -> Option<String> {
        extract_jenis_kelamin(lines)
    }
}

/// Extract the holder's sex as [`MALE`] or [`FEMALE`].
pub fn extract_jenis_kelamin(lines: &[&str]) -> Option<String> {
    let value = value_for_label("Jenis Kelamin", lines)?;
    normalize_gender(&value).map(str::to_string)
}

/// Map an OCR fragment onto a canonical value.
pub fn normalize_gender(value: &str) -> Option<&'static str> {
    let upper = value.to_uppercase();

    if MALE_KEYWORDS.iter().any(|k| upper.contains(k)) {
        Some(MALE)
    } else if FEMALE_KEYWORDS.iter().any(|k| upper.contains(k)) {
        Some(FEMALE)
    } else {
        None
    }
}
