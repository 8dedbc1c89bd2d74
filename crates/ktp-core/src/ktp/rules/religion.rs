//! Religion (agama) extraction from the closed set printed on KTPs.

use super::FieldExtractor;
use crate::models::ktp::KtpField;

/// Religions recognized on a KTP, in lookup order.
pub const RELIGIONS: [&str; 6] = ["ISLAM", "KRISTEN", "KATOLIK", "HINDU", "BUDDHA", "KONGHUCU"];

/// Religion field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReligionExtractor;

impl FieldExtractor for ReligionExtractor {
    fn field(&self) -> KtpField {
        KtpField::Agama
    }

    fn extract(&self, lines: &[&str]) -> Option<String> {
        extract_agama(lines)
    }
}

/// Extract the religion as one of [`RELIGIONS`].
pub fn extract_agama(lines: &[&str]) -> Option<String> {
    lines.iter().find_map(|line| {
        let upper = line.to_uppercase();
        RELIGIONS
            .iter()
            .find(|religion| upper.contains(*religion))
            .map(|religion| religion.to_string())
    })
}
