//! KTP record model and extraction metrics.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::KtpError;

/// Literal printed on cards that never expire.
pub const LIFETIME_VALIDITY: &str = "SEUMUR HIDUP";

/// OCR engine that produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OcrEngine {
    /// Apple Vision text recognition.
    #[serde(rename = "Apple Vision", alias = "vision")]
    Vision,
    /// Google ML Kit text recognition.
    #[serde(rename = "Google MLKit", alias = "mlkit")]
    MlKit,
}

impl OcrEngine {
    /// Human-readable engine name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Vision => "Apple Vision",
            Self::MlKit => "Google MLKit",
        }
    }
}

impl fmt::Display for OcrEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OcrEngine {
    type Err = KtpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vision" | "apple vision" => Ok(Self::Vision),
            "mlkit" | "ml kit" | "google mlkit" => Ok(Self::MlKit),
            other => Err(KtpError::InvalidInput(format!("unknown OCR engine: {other}"))),
        }
    }
}

/// The fields printed on a KTP, in card order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KtpField {
    Nik,
    Nama,
    TempatLahir,
    TanggalLahir,
    JenisKelamin,
    Alamat,
    RtRw,
    Kelurahan,
    Kecamatan,
    Agama,
    StatusPerkawinan,
    Pekerjaan,
    Kewarganegaraan,
    BerlakuHingga,
    GolonganDarah,
}

impl KtpField {
    /// All fields in card order.
    pub const ALL: [KtpField; 15] = [
        KtpField::Nik,
        KtpField::Nama,
        KtpField::TempatLahir,
        KtpField::TanggalLahir,
        KtpField::JenisKelamin,
        KtpField::Alamat,
        KtpField::RtRw,
        KtpField::Kelurahan,
        KtpField::Kecamatan,
        KtpField::Agama,
        KtpField::StatusPerkawinan,
        KtpField::Pekerjaan,
        KtpField::Kewarganegaraan,
        KtpField::BerlakuHingga,
        KtpField::GolonganDarah,
    ];

    /// Stable field name used in logs and output headers.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nik => "NIK",
            Self::Nama => "Nama",
            Self::TempatLahir => "TempatLahir",
            Self::TanggalLahir => "TanggalLahir",
            Self::JenisKelamin => "JenisKelamin",
            Self::Alamat => "Alamat",
            Self::RtRw => "RTRW",
            Self::Kelurahan => "Kelurahan",
            Self::Kecamatan => "Kecamatan",
            Self::Agama => "Agama",
            Self::StatusPerkawinan => "StatusPerkawinan",
            Self::Pekerjaan => "Pekerjaan",
            Self::Kewarganegaraan => "Kewarganegaraan",
            Self::BerlakuHingga => "BerlakuHingga",
            Self::GolonganDarah => "GolonganDarah",
        }
    }
}

impl fmt::Display for KtpField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structured data read from one KTP by one OCR engine.
///
/// Records are built once by the parser and never modified afterwards; fields
/// are only reachable through accessors. Deserialized records go through the
/// same clamping and trimming as parsed ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredRecord")]
pub struct KtpRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    nik: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nama: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tempat_lahir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tanggal_lahir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    jenis_kelamin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alamat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rt_rw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kelurahan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kecamatan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    agama: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_perkawinan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pekerjaan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kewarganegaraan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    berlaku_hingga: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    golongan_darah: Option<String>,

    /// Text exactly as handed to the parser.
    raw_text: String,
    /// Engine confidence, 0.0 - 1.0.
    confidence: f64,
    /// Engine that produced `raw_text`.
    ocr_engine: OcrEngine,
    /// OCR processing time in seconds.
    processing_time: f64,
}

impl KtpRecord {
    /// Create a record with no extracted fields.
    ///
    /// Confidence is clamped into `[0, 1]` and processing time to `>= 0`;
    /// NaN becomes zero for both.
    pub fn new(
        raw_text: impl Into<String>,
        confidence: f64,
        ocr_engine: OcrEngine,
        processing_time: f64,
    ) -> Self {
        let confidence = if confidence.is_nan() { 0.0 } else { confidence.clamp(0.0, 1.0) };
        let processing_time = if processing_time.is_nan() { 0.0 } else { processing_time.max(0.0) };

        Self {
            nik: None,
            nama: None,
            tempat_lahir: None,
            tanggal_lahir: None,
            jenis_kelamin: None,
            alamat: None,
            rt_rw: None,
            kelurahan: None,
            kecamatan: None,
            agama: None,
            status_perkawinan: None,
            pekerjaan: None,
            kewarganegaraan: None,
            berlaku_hingga: None,
            golongan_darah: None,
            raw_text: raw_text.into(),
            confidence,
            ocr_engine,
            processing_time,
        }
    }

    /// Return a copy of this record with `field` set.
    ///
    /// Values are trimmed; a blank value is stored as absent.
    pub fn with_field(mut self, field: KtpField, value: Option<String>) -> Self {
        let value = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        *self.slot_mut(field) = value;
        self
    }

    fn slot_mut(&mut self, field: KtpField) -> &mut Option<String> {
        match field {
            KtpField::Nik => &mut self.nik,
            KtpField::Nama => &mut self.nama,
            KtpField::TempatLahir => &mut self.tempat_lahir,
            KtpField::TanggalLahir => &mut self.tanggal_lahir,
            KtpField::JenisKelamin => &mut self.jenis_kelamin,
            KtpField::Alamat => &mut self.alamat,
            KtpField::RtRw => &mut self.rt_rw,
            KtpField::Kelurahan => &mut self.kelurahan,
            KtpField::Kecamatan => &mut self.kecamatan,
            KtpField::Agama => &mut self.agama,
            KtpField::StatusPerkawinan => &mut self.status_perkawinan,
            KtpField::Pekerjaan => &mut self.pekerjaan,
            KtpField::Kewarganegaraan => &mut self.kewarganegaraan,
            KtpField::BerlakuHingga => &mut self.berlaku_hingga,
            KtpField::GolonganDarah => &mut self.golongan_darah,
        }
    }

    /// Look up a field by name.
    pub fn get(&self, field: KtpField) -> Option<&str> {
        match field {
            KtpField::Nik => self.nik.as_deref(),
            KtpField::Nama => self.nama.as_deref(),
            KtpField::TempatLahir => self.tempat_lahir.as_deref(),
            KtpField::TanggalLahir => self.tanggal_lahir.as_deref(),
            KtpField::JenisKelamin => self.jenis_kelamin.as_deref(),
            KtpField::Alamat => self.alamat.as_deref(),
            KtpField::RtRw => self.rt_rw.as_deref(),
            KtpField::Kelurahan => self.kelurahan.as_deref(),
            KtpField::Kecamatan => self.kecamatan.as_deref(),
            KtpField::Agama => self.agama.as_deref(),
            KtpField::StatusPerkawinan => self.status_perkawinan.as_deref(),
            KtpField::Pekerjaan => self.pekerjaan.as_deref(),
            KtpField::Kewarganegaraan => self.kewarganegaraan.as_deref(),
            KtpField::BerlakuHingga => self.berlaku_hingga.as_deref(),
            KtpField::GolonganDarah => self.golongan_darah.as_deref(),
        }
    }

    /// All fields with their values, in card order.
    pub fn fields(&self) -> impl Iterator<Item = (KtpField, Option<&str>)> + '_ {
        KtpField::ALL.into_iter().map(move |field| (field, self.get(field)))
    }

    pub fn nik(&self) -> Option<&str> {
        self.nik.as_deref()
    }

    pub fn nama(&self) -> Option<&str> {
        self.nama.as_deref()
    }

    pub fn tempat_lahir(&self) -> Option<&str> {
        self.tempat_lahir.as_deref()
    }

    pub fn tanggal_lahir(&self) -> Option<&str> {
        self.tanggal_lahir.as_deref()
    }

    pub fn jenis_kelamin(&self) -> Option<&str> {
        self.jenis_kelamin.as_deref()
    }

    pub fn alamat(&self) -> Option<&str> {
        self.alamat.as_deref()
    }

    pub fn rt_rw(&self) -> Option<&str> {
        self.rt_rw.as_deref()
    }

    pub fn kelurahan(&self) -> Option<&str> {
        self.kelurahan.as_deref()
    }

    pub fn kecamatan(&self) -> Option<&str> {
        self.kecamatan.as_deref()
    }

    pub fn agama(&self) -> Option<&str> {
        self.agama.as_deref()
    }

    pub fn status_perkawinan(&self) -> Option<&str> {
        self.status_perkawinan.as_deref()
    }

    pub fn pekerjaan(&self) -> Option<&str> {
        self.pekerjaan.as_deref()
    }

    pub fn kewarganegaraan(&self) -> Option<&str> {
        self.kewarganegaraan.as_deref()
    }

    pub fn berlaku_hingga(&self) -> Option<&str> {
        self.berlaku_hingga.as_deref()
    }

    pub fn golongan_darah(&self) -> Option<&str> {
        self.golongan_darah.as_deref()
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn ocr_engine(&self) -> OcrEngine {
        self.ocr_engine
    }

    pub fn processing_time(&self) -> f64 {
        self.processing_time
    }

    /// Birth date as a calendar date, if it was read and is a real date.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.tanggal_lahir.as_deref().and_then(parse_dmy)
    }

    /// Card validity, if it was read.
    pub fn valid_until(&self) -> Option<Validity> {
        let value = self.berlaku_hingga.as_deref()?;
        if value.eq_ignore_ascii_case(LIFETIME_VALIDITY) {
            return Some(Validity::Lifetime);
        }
        parse_dmy(value).map(Validity::Until)
    }

    /// Extraction metrics over all fields.
    pub fn metrics(&self) -> ExtractionMetrics {
        self.metrics_for(&KtpField::ALL)
    }

    /// Extraction metrics over `fields` only, e.g. a parser's strategy set.
    pub fn metrics_for(&self, fields: &[KtpField]) -> ExtractionMetrics {
        ExtractionMetrics::from_values(fields.iter().map(|&field| self.get(field)))
    }
}

/// Serialized form of [`KtpRecord`].
#[derive(Deserialize)]
struct StoredRecord {
    #[serde(default)]
    nik: Option<String>,
    #[serde(default)]
    nama: Option<String>,
    #[serde(default)]
    tempat_lahir: Option<String>,
    #[serde(default)]
    tanggal_lahir: Option<String>,
    #[serde(default)]
    jenis_kelamin: Option<String>,
    #[serde(default)]
    alamat: Option<String>,
    #[serde(default)]
    rt_rw: Option<String>,
    #[serde(default)]
    kelurahan: Option<String>,
    #[serde(default)]
    kecamatan: Option<String>,
    #[serde(default)]
    agama: Option<String>,
    #[serde(default)]
    status_perkawinan: Option<String>,
    #[serde(default)]
    pekerjaan: Option<String>,
    #[serde(default)]
    kewarganegaraan: Option<String>,
    #[serde(default)]
    berlaku_hingga: Option<String>,
    #[serde(default)]
    golongan_darah: Option<String>,
    raw_text: String,
    confidence: f64,
    ocr_engine: OcrEngine,
    processing_time: f64,
}

impl From<StoredRecord> for KtpRecord {
    fn from(stored: StoredRecord) -> Self {
        let values = [
            (KtpField::Nik, stored.nik),
            (KtpField::Nama, stored.nama),
            (KtpField::TempatLahir, stored.tempat_lahir),
            (KtpField::TanggalLahir, stored.tanggal_lahir),
            (KtpField::JenisKelamin, stored.jenis_kelamin),
            (KtpField::Alamat, stored.alamat),
            (KtpField::RtRw, stored.rt_rw),
            (KtpField::Kelurahan, stored.kelurahan),
            (KtpField::Kecamatan, stored.kecamatan),
            (KtpField::Agama, stored.agama),
            (KtpField::StatusPerkawinan, stored.status_perkawinan),
            (KtpField::Pekerjaan, stored.pekerjaan),
            (KtpField::Kewarganegaraan, stored.kewarganegaraan),
            (KtpField::BerlakuHingga, stored.berlaku_hingga),
            (KtpField::GolonganDarah, stored.golongan_darah),
        ];

        let record = KtpRecord::new(
            stored.raw_text,
            stored.confidence,
            stored.ocr_engine,
            stored.processing_time,
        );
        values
            .into_iter()
            .fold(record, |record, (field, value)| record.with_field(field, value))
    }
}

/// How long a card stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validity {
    /// "SEUMUR HIDUP".
    Lifetime,
    /// Expires on the given date.
    Until(NaiveDate),
}

/// Success statistics for one parse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetrics {
    /// Fields with a value.
    pub success_count: usize,
    /// Fields attempted.
    pub total_count: usize,
    /// `success_count / total_count`, or 0 when nothing was attempted.
    pub success_rate: f64,
}

impl ExtractionMetrics {
    pub fn new(success_count: usize, total_count: usize) -> Self {
        let success_rate = if total_count == 0 {
            0.0
        } else {
            success_count as f64 / total_count as f64
        };
        Self {
            success_count,
            total_count,
            success_rate,
        }
    }

    /// Count present values among `values`.
    pub fn from_values<T>(values: impl IntoIterator<Item = Option<T>>) -> Self {
        let (success, total) = values
            .into_iter()
            .fold((0, 0), |(s, t), v| (s + usize::from(v.is_some()), t + 1));
        Self::new(success, total)
    }
}

impl fmt::Display for ExtractionMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} fields ({:.1}%)",
            self.success_count,
            self.total_count,
            self.success_rate * 100.0
        )
    }
}

/// Parse a `D-M-YYYY` or `D/M/YYYY` date.
fn parse_dmy(value: &str) -> Option<NaiveDate> {
    let mut parts = value.trim().split(['-', '/']);
    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}
