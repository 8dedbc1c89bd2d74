//! Place and date of birth, both read from the "Tempat/Tgl Lahir" line.

use super::labels::{extract_date, non_empty, value_for_label};
use super::patterns::BIRTHPLACE_PATTERN;
use super::FieldExtractor;
use crate::models::ktp::KtpField;

const BIRTH_LABEL: &str = "Tempat/Tgl Lahir";
// Common misread of "Tgl"
const BIRTH_LABEL_MISREAD: &str = "Tempat/Tgi Lahir";

/// Place of birth extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct BirthplaceExtractor;

impl FieldExtractor for BirthplaceExtractor {
    fn field(&self) -> KtpField {
        KtpField::TempatLahir
    }

    fn extract(&self, lines: &[&str]) -> Option<String> {
        extract_tempat_lahir(lines)
    }
}

/// Date of birth extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct BirthDateExtractor;

impl FieldExtractor for BirthDateExtractor {
    fn field(&self) -> KtpField {
        KtpField::TanggalLahir
    }

    fn extract(&self, lines: &[&str]) -> Option<String> {
        extract_tanggal_lahir(lines)
    }
}

/// Extract the place of birth.
///
/// The label and the place may be split across lines, so the pattern runs
/// over the whole text joined with spaces first.
pub fn extract_tempat_lahir(lines: &[&str]) -> Option<String> {
    let joined = lines.join(" ");
    if let Some(caps) = BIRTHPLACE_PATTERN.captures(&joined) {
        let place = caps[1].trim();
        return non_empty(place.strip_suffix(',').unwrap_or(place));
    }

    let value = value_for_label(BIRTH_LABEL, lines)
        .or_else(|| value_for_label(BIRTH_LABEL_MISREAD, lines))?;

    let place = match value.split_once(',') {
        Some((place, _)) => place.trim().to_string(),
        None => match extract_date(&value) {
            Some(date) => value.replace(date, "").trim().trim_matches(',').to_string(),
            None => value.clone(),
        },
    };

    non_empty(&place)
}

/// Extract the date of birth, as written on the card.
///
/// Falls back to the first date anywhere in the text, which is usually the
/// birth date since it is printed before the expiry date.
pub fn extract_tanggal_lahir(lines: &[&str]) -> Option<String> {
    let labeled = value_for_label(BIRTH_LABEL, lines);
    if let Some(date) = labeled.as_deref().and_then(extract_date) {
        return Some(date.to_string());
    }

    lines
        .iter()
        .find_map(|line| extract_date(line))
        .map(str::to_string)
}
