//! Free-text fields read straight from their label: name, address, occupation.

use super::labels::value_for_label;
use super::FieldExtractor;
use crate::models::ktp::KtpField;

/// Extractor returning whatever follows a label, unmodified.
#[derive(Debug, Clone, Copy)]
pub struct LabeledExtractor {
    field: KtpField,
    label: &'static str,
}

impl LabeledExtractor {
    pub const fn new(field: KtpField, label: &'static str) -> Self {
        Self { field, label }
    }

    /// "Nama".
    pub const fn nama() -> Self {
        Self::new(KtpField::Nama, "Nama")
    }

    /// "Alamat".
    pub const fn alamat() -> Self {
        Self::new(KtpField::Alamat, "Alamat")
    }

    /// "Pekerjaan".
    pub const fn pekerjaan() -> Self {
        Self::new(KtpField::Pekerjaan, "Pekerjaan")
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl FieldExtractor for LabeledExtractor {
    fn field(&self) -> KtpField {
        self.field
    }

    fn extract(&self, lines: &[&str]) -> Option<String> {
        value_for_label(self.label, lines)
    }
}

/// Extract the holder's name.
pub fn extract_nama(lines: &[&str]) -> Option<String> {
    LabeledExtractor::nama().extract(lines)
}

/// Extract the street address.
pub fn extract_alamat(lines: &[&str]) -> Option<String> {
    LabeledExtractor::alamat().extract(lines)
}

/// Extract the occupation.
pub fn extract_pekerjaan(lines: &[&str]) -> Option<String> {
    LabeledExtractor::pekerjaan().extract(lines)
}
