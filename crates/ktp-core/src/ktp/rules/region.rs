//! Administrative region fields: kelurahan/desa and kecamatan.

use super::labels::{
    contains_ignore_case, is_value, next_line_value, remove_ignore_case, value_for_label,
};
use super::patterns::KELURAHAN_PATTERN;
use super::FieldExtractor;
use crate::models::ktp::KtpField;

/// Label spellings tried in order when the pattern finds nothing.
const KELURAHAN_LABELS: [&str; 4] = ["Kel/Desa", "KelDesa", "KelLesa", "Kelurahan"];

/// Kelurahan/desa field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct KelurahanExtractor;

impl FieldExtractor for KelurahanExtractor {
    fn field(&self) -> KtpField {
        KtpField::Kelurahan
    }

    fn extract(&self, lines: &[&str]) -> Option<String> {
        extract_kelurahan(lines)
    }
}

/// Kecamatan field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct KecamatanExtractor;

impl FieldExtractor for KecamatanExtractor {
    fn field(&self) -> KtpField {
        KtpField::Kecamatan
    }

    fn extract(&self, lines: &[&str]) -> Option<String> {
        extract_kecamatan(lines)
    }
}

/// Extract the kelurahan/desa name.
pub fn extract_kelurahan(lines: &[&str]) -> Option<String> {
    let matched = lines.iter().find_map(|line| {
        let caps = KELURAHAN_PATTERN.captures(line)?;
        let value = caps[1].trim();
        is_value(value).then(|| value.to_string())
    });
    if matched.is_some() {
        return matched;
    }

    KELURAHAN_LABELS
        .iter()
        .find_map(|label| value_for_label(label, lines))
}

/// Extract the kecamatan name, accepting the abbreviated "KEC" label too.
pub fn extract_kecamatan(lines: &[&str]) -> Option<String> {
    if let Some(value) = value_for_label("Kecamatan", lines) {
        return Some(value);
    }

    for (i, line) in lines.iter().enumerate() {
        if !contains_ignore_case(line, "KEC") {
            continue;
        }

        let without_label = remove_ignore_case(&remove_ignore_case(line, "KECAMATAN"), "KEC");
        let cleaned = without_label.replace(':', "");
        let cleaned = cleaned.trim();
        if is_value(cleaned) {
            return Some(cleaned.to_string());
        }

        if let Some(next) = next_line_value(lines, i).filter(|next| is_value(next)) {
            return Some(next.to_string());
        }
    }
    None
}
