//! Rule-based field extractors for KTP text.

pub mod birth;
pub mod blood;
pub mod citizenship;
pub mod gender;
pub mod labeled;
pub mod labels;
pub mod marital;
pub mod nik;
pub mod patterns;
pub mod region;
pub mod religion;
pub mod rt_rw;
pub mod validity;

pub use birth::{extract_tanggal_lahir, extract_tempat_lahir, BirthDateExtractor, BirthplaceExtractor};
pub use blood::{extract_golongan_darah, BloodTypeExtractor, BLOOD_TYPE_PLACEHOLDER};
pub use citizenship::{extract_kewarganegaraan, CitizenshipExtractor};
pub use gender::{extract_jenis_kelamin, normalize_gender, GenderExtractor};
pub use labeled::{extract_alamat, extract_nama, extract_pekerjaan, LabeledExtractor};
pub use labels::{clean_value_after_label, extract_date, is_likely_label, value_for_label, KTP_LABELS};
pub use marital::{extract_status_perkawinan, normalize_marital_status, MaritalStatusExtractor};
pub use nik::{extract_nik, is_well_formed_nik, NikExtractor};
pub use region::{extract_kecamatan, extract_kelurahan, KecamatanExtractor, KelurahanExtractor};
pub use religion::{extract_agama, ReligionExtractor, RELIGIONS};
pub use rt_rw::{extract_rt_rw, RtRwExtractor};
pub use validity::{extract_berlaku_hingga, ValidityExtractor};

use crate::models::ktp::KtpField;

/// A strategy that extracts one KTP field from preprocessed lines.
///
/// Extractors never fail: a field that cannot be found is `None`.
pub trait FieldExtractor: Send + Sync {
    /// The field this extractor fills.
    fn field(&self) -> KtpField;

    /// Extract the field from the full line sequence.
    fn extract(&self, lines: &[&str]) -> Option<String>;
}

/// One extractor per field, in [`KtpField::ALL`] order.
pub fn default_extractors() -> Vec<Box<dyn FieldExtractor>> {
    vec![
        Box::new(NikExtractor::new()),
        Box::new(LabeledExtractor::nama()),
        Box::new(BirthplaceExtractor),
        Box::new(BirthDateExtractor),
        Box::new(GenderExtractor),
        Box::new(LabeledExtractor::alamat()),
        Box::new(RtRwExtractor),
        Box::new(KelurahanExtractor),
        Box::new(KecamatanExtractor),
        Box::new(ReligionExtractor),
        Box::new(MaritalStatusExtractor),
        Box::new(LabeledExtractor::pekerjaan()),
        Box::new(CitizenshipExtractor),
        Box::new(ValidityExtractor),
        Box::new(BloodTypeExtractor),
    ]
}
