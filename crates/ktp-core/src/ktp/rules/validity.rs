//! Card validity (berlaku hingga): a date or the lifetime marker.

use super::labels::{contains_ignore_case, extract_date, next_line_value};
use super::FieldExtractor;
use crate::models::ktp::{KtpField, LIFETIME_VALIDITY};

/// Validity field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidityExtractor;

impl FieldExtractor for ValidityExtractor {
    fn field(&self) -> KtpField {
        KtpField::BerlakuHingga
    }

    fn extract(&self, lines: &[&str]) -> Option<String> {
        extract_berlaku_hingga(lines)
    }
}

/// Extract the validity as [`LIFETIME_VALIDITY`] or a date as written.
///
/// The lifetime marker is honoured anywhere in the text since OCR often
/// places it away from its label.
pub fn extract_berlaku_hingga(lines: &[&str]) -> Option<String> {
    if lines.join(" ").to_uppercase().contains(LIFETIME_VALIDITY) {
        return Some(LIFETIME_VALIDITY.to_string());
    }

    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| contains_ignore_case(line, "BERLAKU"))
        .find_map(|(i, line)| {
            extract_date(line).or_else(|| next_line_value(lines, i).and_then(extract_date))
        })
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifetime() {
        let lines = ["Berlaku Hingga: SEUMUR HIDUP"];
        assert_eq!(extract_berlaku_hingga(&lines), Some(LIFETIME_VALIDITY.to_string()));
    }

    #[test]
    fn test_lifetime_away_from_label() {
        let lines = ["Berlaku Hingga", "Gol. Darah: O", "seumur hidup"];
        assert_eq!(extract_berlaku_hingga(&lines), Some(LIFETIME_VALIDITY.to_string()));
    }

    #[test]
    fn test_date_on_label_line() {
        let lines = ["Tempat/Tgl Lahir: JAKARTA, 15-08-1990", "Berlaku Hingga: 15-08-2027"];
        assert_eq!(extract_berlaku_hingga(&lines), Some("15-08-2027".to_string()));
    }

    #[test]
    fn test_date_on_next_line() {
        let lines = ["BERLAKU HINGGA", ": 1/2/2030"];
        assert_eq!(extract_berlaku_hingga(&lines), Some("1/2/2030".to_string()));
    }

    #[test]
    fn test_no_validity() {
        let lines = ["Berlaku Hingga:", "Pekerjaan: PETANI"];
        assert_eq!(extract_berlaku_hingga(&lines), None);
    }
}
