//! Common regex patterns for KTP field extraction.
//!
//! Letter classes are compiled case-insensitively, so `[A-Z]` also accepts
//! lowercase OCR output.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // NIK: sixteen ASCII digits standing alone
    pub static ref NIK_PATTERN: Regex = Regex::new(
        r"\b[0-9]{16}\b"
    ).unwrap();

    // D-M-YYYY or D/M/YYYY
    pub static ref DATE_PATTERN: Regex = Regex::new(
        r"\b\d{1,2}[-/]\d{1,2}[-/]\d{4}\b"
    ).unwrap();

    // "Tempat/Tgl Lahir: JAKARTA, 15-08-1990", tolerating TGI for TGL
    pub static ref BIRTHPLACE_PATTERN: Regex = Regex::new(
        r"(?i)TEMPAT[/\s]*TG[LI][.\s]*LAHIR\s*:?\s*([A-Z\s]+?)(?:\s*,\s*|\s+)\d{1,2}[-/]\d{1,2}[-/]\d{4}"
    ).unwrap();

    // "003/005"
    pub static ref RT_RW_BARE: Regex = Regex::new(
        r"\b\d{2,3}/\d{2,3}\b"
    ).unwrap();

    // "RT 003 / RW 005", "RT: 03/RW: 05"
    pub static ref RT_RW_LABELED: Regex = Regex::new(
        r"(?i)RT\s*[:/]?\s*(\d{2,3})\s*/\s*RW\s*[:/]?\s*(\d{2,3})"
    ).unwrap();

    // "Kel/Desa: KEBAYORAN BARU", also the KelLesa misread; stops at the
    // end of the line, at the next "LABEL:" or at a comma
    pub static ref KELURAHAN_PATTERN: Regex = Regex::new(
        r"(?i)(?:KEL[/\s]*[DL]ESA|KELURAHAN)\s*:?\s*([A-Z\s]+?)(?:\s*$|\s+[A-Z]+\s*:|\s*,)"
    ).unwrap();

    // "GOL. DARAH: AB+", "Gol Darah : -"
    pub static ref BLOOD_TYPE_PATTERN: Regex = Regex::new(
        r"(?i)GOL\.?\s*DARAH\s*:\s*(AB[+-]?|A[+-]?|B[+-]?|O[+-]?|-)"
    ).unwrap();
}
