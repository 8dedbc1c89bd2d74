//! Blood type (golongan darah) extraction.

use super::patterns::BLOOD_TYPE_PATTERN;
use super::FieldExtractor;
use crate::models::ktp::KtpField;

/// Value printed when the blood type is unknown.
pub const BLOOD_TYPE_PLACEHOLDER: &str = "-";

/// Blood type field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct BloodTypeExtractor;

impl FieldExtractor for BloodTypeExtractor {
    fn field(&self) -> KtpField {
        KtpField::GolonganDarah
    }

    fn extract(&self, lines: &[&str]) -> Option<String> {
        extract_golongan_darah(lines)
    }
}

/// Extract the blood type, e.g. `AB+`, or [`BLOOD_TYPE_PLACEHOLDER`].
///
/// Lines that also mention ALAMAT or AGAMA are skipped: OCR sometimes merges
/// the blood type box into a neighbouring row.
pub fn extract_golongan_darah(lines: &[&str]) -> Option<String> {
    lines.iter().find_map(|line| {
        let upper = line.to_uppercase();
        if !upper.contains("DARAH") || upper.contains("ALAMAT") || upper.contains("AGAMA") {
            return None;
        }

        BLOOD_TYPE_PATTERN
            .captures(line)
            .map(|caps| caps[1].to_uppercase())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blood_types() {
        let lines = ["Gol. Darah: O"];
        assert_eq!(extract_golongan_darah(&lines), Some("O".to_string()));

        let lines = ["GOL DARAH : ab+"];
        assert_eq!(extract_golongan_darah(&lines), Some("AB+".to_string()));

        let lines = ["Gol.Darah: B-"];
        assert_eq!(extract_golongan_darah(&lines), Some("B-".to_string()));
    }

    #[test]
    fn test_placeholder() {
        let lines = ["Gol. Darah: -"];
        assert_eq!(
            extract_golongan_darah(&lines),
            Some(BLOOD_TYPE_PLACEHOLDER.to_string())
        );
    }

    #[test]
    fn test_label_without_value() {
        let lines = ["Gol. Darah"];
        assert_eq!(extract_golongan_darah(&lines), None);
    }

    #[test]
    fn test_merged_rows_skipped() {
        let lines = ["Agama: ISLAM Gol. Darah: A", "Alamat: JL. MAWAR Gol. Darah: B"];
        assert_eq!(extract_golongan_darah(&lines), None);
    }
}
