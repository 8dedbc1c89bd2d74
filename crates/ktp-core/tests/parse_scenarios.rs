//! End-to-end parsing scenarios over realistic OCR output.

use std::sync::Arc;
use std::thread;

use ktp_core::ktp::rules::is_well_formed_nik;
use ktp_core::{
    EngineComparison, ExtractionConfig, KtpField, KtpParser, KtpRecord, KtpTextParser,
    NoopObserver, OcrEngine, OcrError, Validity,
};
use pretty_assertions::assert_eq;

const COMPLETE_KTP: &str = "PROVINSI DKI JAKARTA
KOTA JAKARTA SELATAN

NIK: 3174051234567890
Nama: BUDI SANTOSO
Tempat/Tgl Lahir: JAKARTA, 15-08-1990
Jenis Kelamin: LAKI-LAKI
Alamat: JL. SUDIRMAN NO. 123
RT/RW: 003/005
Kel/Desa: KEBAYORAN BARU
Kecamatan: KEBAYORAN BARU
Agama: ISLAM
Status Perkawinan: KAWIN
Pekerjaan: KARYAWAN SWASTA
Kewarganegaraan: WNI
Berlaku Hingga: SEUMUR HIDUP
";

// Labels and values split across lines, abbreviated labels, misread "Tgl".
const NOISY_KTP: &str = "PROVINSI JAWA BARAT
NIK
3275 0123 4567 8901
Nama
: SITI AMINAH
TEMPAT/TGI LAHIR : BEKASI 02-11-1988
Jenis Kelamin : PEREMPUAN
Gol. Darah : AB+
Alamat : PERUM GRIYA ASRI BLOK C2
RT 004 / RW 011
Kel/Desa : SUKAMAJU
KEC TAMBUN SELATAN
Agama : KRISTEN
Status Perkawinan : BELUM KAWIN
Pekerjaan : PELAJAR/MAHASISWA
Kewarganegaraan : WNI
Berlaku Hingga : 02-11-2027
";

const MALFORMED: &str = "RANDOM TEXT WITHOUT KTP DATA 12345";

fn parser() -> KtpParser {
    KtpParser::new().with_observer(Arc::new(NoopObserver))
}

fn expected(
    text: &str,
    confidence: f64,
    engine: OcrEngine,
    processing_time: f64,
    fields: &[(KtpField, &str)],
) -> KtpRecord {
    fields.iter().fold(
        KtpRecord::new(text, confidence, engine, processing_time),
        |record, (field, value)| record.with_field(*field, Some(value.to_string())),
    )
}

fn assert_all_absent(record: &KtpRecord) {
    for (field, value) in record.fields() {
        assert_eq!(value, None, "{field} should be absent");
    }
}

#[test]
fn complete_record() {
    let record = parser().parse(COMPLETE_KTP, 0.95, OcrEngine::Vision, 0.5);

    let want = expected(
        COMPLETE_KTP,
        0.95,
        OcrEngine::Vision,
        0.5,
        &[
            (KtpField::Nik, "3174051234567890"),
            (KtpField::Nama, "BUDI SANTOSO"),
            (KtpField::TempatLahir, "JAKARTA"),
            (KtpField::TanggalLahir, "15-08-1990"),
            (KtpField::JenisKelamin, "LAKI-LAKI"),
            (KtpField::Alamat, "JL. SUDIRMAN NO. 123"),
            (KtpField::RtRw, "003/005"),
            (KtpField::Kelurahan, "KEBAYORAN BARU"),
            (KtpField::Kecamatan, "KEBAYORAN BARU"),
            (KtpField::Agama, "ISLAM"),
            (KtpField::StatusPerkawinan, "KAWIN"),
            (KtpField::Pekerjaan, "KARYAWAN SWASTA"),
            (KtpField::Kewarganegaraan, "WNI"),
            (KtpField::BerlakuHingga, "SEUMUR HIDUP"),
        ],
    );
    assert_eq!(record, want);
    assert_eq!(record.golongan_darah(), None);
    assert_eq!(record.valid_until(), Some(Validity::Lifetime));
    assert_eq!(
        record.birth_date(),
        chrono::NaiveDate::from_ymd_opt(1990, 8, 15)
    );
}

#[test]
fn complete_record_metrics() {
    let result = parser().parse_detailed(COMPLETE_KTP, 0.95, OcrEngine::Vision, 0.5);
    assert_eq!(result.metrics.success_count, 14);
    assert_eq!(result.metrics.total_count, 15);
    assert_eq!(result.metrics, result.record.metrics());
}

#[test]
fn noisy_record() {
    let record = parser().parse(NOISY_KTP, 0.88, OcrEngine::MlKit, 1.2);

    let want = expected(
        NOISY_KTP,
        0.88,
        OcrEngine::MlKit,
        1.2,
        &[
            (KtpField::Nik, "3275012345678901"),
            (KtpField::Nama, "SITI AMINAH"),
            (KtpField::TempatLahir, "BEKASI"),
            (KtpField::TanggalLahir, "02-11-1988"),
            (KtpField::JenisKelamin, "PEREMPUAN"),
            (KtpField::Alamat, "PERUM GRIYA ASRI BLOK C2"),
            (KtpField::RtRw, "004/011"),
            (KtpField::Kelurahan, "SUKAMAJU"),
            (KtpField::Kecamatan, "TAMBUN SELATAN"),
            (KtpField::Agama, "KRISTEN"),
            (KtpField::StatusPerkawinan, "BELUM KAWIN"),
            (KtpField::Pekerjaan, "PELAJAR/MAHASISWA"),
            (KtpField::Kewarganegaraan, "WNI"),
            (KtpField::BerlakuHingga, "02-11-2027"),
            (KtpField::GolonganDarah, "AB+"),
        ],
    );
    assert_eq!(record, want);
    assert_eq!(
        record.valid_until(),
        chrono::NaiveDate::from_ymd_opt(2027, 11, 2).map(Validity::Until)
    );
}

#[test]
fn parsing_is_idempotent() {
    let parser = parser();
    let first = parser.parse(NOISY_KTP, 0.9, OcrEngine::Vision, 0.4);
    let second = parser.parse(NOISY_KTP, 0.9, OcrEngine::Vision, 0.4);
    assert_eq!(first, second);
}

#[test]
fn empty_text() {
    let record = parser().parse("", 0.0, OcrEngine::Vision, 0.1);
    assert_all_absent(&record);
    assert_eq!(record.raw_text(), "");
}

#[test]
fn whitespace_only_text() {
    let result = parser().parse_detailed(" \n\t\r\n  ", 0.3, OcrEngine::MlKit, 0.1);
    assert_all_absent(&result.record);
    assert_eq!(result.metrics.success_count, 0);
    assert_eq!(result.metrics.success_rate, 0.0);
}

#[test]
fn malformed_text() {
    let record = parser().parse(MALFORMED, 0.5, OcrEngine::Vision, 0.3);
    assert_all_absent(&record);
    assert_eq!(record.raw_text(), MALFORMED);
    assert_eq!(record.confidence(), 0.5);
    assert_eq!(record.processing_time(), 0.3);
}

#[test]
fn out_of_range_metadata_is_clamped() {
    let record = parser().parse(MALFORMED, 1.7, OcrEngine::Vision, -2.0);
    assert_eq!(record.confidence(), 1.0);
    assert_eq!(record.processing_time(), 0.0);

    let record = parser().parse(MALFORMED, f64::NAN, OcrEngine::Vision, f64::NAN);
    assert_eq!(record.confidence(), 0.0);
    assert_eq!(record.processing_time(), 0.0);
}

#[test]
fn closed_value_sets() {
    let parser = parser();
    for text in [COMPLETE_KTP, NOISY_KTP, MALFORMED, ""] {
        let record = parser.parse(text, 0.9, OcrEngine::Vision, 0.0);

        if let Some(nik) = record.nik() {
            assert!(is_well_formed_nik(nik), "bad NIK {nik}");
        }
        if let Some(sex) = record.jenis_kelamin() {
            assert!(["LAKI-LAKI", "PEREMPUAN"].contains(&sex));
        }
        if let Some(religion) = record.agama() {
            assert!(ktp_core::ktp::rules::RELIGIONS.contains(&religion));
        }
        if let Some(status) = record.status_perkawinan() {
            assert!(["BELUM KAWIN", "KAWIN", "CERAI"].contains(&status));
        }
        for (field, value) in record.fields() {
            if let Some(value) = value {
                assert_eq!(value, value.trim(), "{field} not trimmed");
                assert!(!value.is_empty(), "{field} empty");
            }
        }
    }
}

#[test]
fn belum_kawin() {
    let record = parser().parse("Status Perkawinan: BELUM KAWIN", 0.95, OcrEngine::Vision, 0.5);
    assert_eq!(record.status_perkawinan(), Some("BELUM KAWIN"));
}

#[test]
fn rt_rw() {
    let record = parser().parse("RT/RW: 003/005", 0.95, OcrEngine::Vision, 0.5);
    assert_eq!(record.rt_rw(), Some("003/005"));
}

#[test]
fn blood_type_placeholder_versus_absence() {
    let parser = parser();

    let record = parser.parse("Gol. Darah: -", 0.95, OcrEngine::Vision, 0.5);
    assert_eq!(record.golongan_darah(), Some("-"));

    let record = parser.parse("Gol. Darah", 0.95, OcrEngine::Vision, 0.5);
    assert_eq!(record.golongan_darah(), None);
}

#[test]
fn fourteen_field_configuration() {
    let config = ExtractionConfig {
        include_blood_type: false,
        ..ExtractionConfig::default()
    };
    let parser = KtpParser::from_config(&config).with_observer(Arc::new(NoopObserver));
    let result = parser.parse_detailed(NOISY_KTP, 0.9, OcrEngine::MlKit, 0.2);

    assert_eq!(result.metrics.total_count, 14);
    assert_eq!(result.metrics.success_count, 14);
    assert_eq!(result.record.golongan_darah(), None);
}

#[test]
fn parser_is_shared_across_threads() {
    let parser = parser();
    let records: Vec<KtpRecord> = thread::scope(|s| {
        let handles: Vec<_> = [OcrEngine::Vision, OcrEngine::MlKit]
            .into_iter()
            .map(|engine| {
                let parser = &parser;
                s.spawn(move || parser.parse(COMPLETE_KTP, 0.9, engine, 0.5))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect()
    });

    assert_eq!(records[0].nik(), records[1].nik());
    assert_eq!(records[0].ocr_engine(), OcrEngine::Vision);
    assert_eq!(records[1].ocr_engine(), OcrEngine::MlKit);
}

#[test]
fn engine_comparison() {
    let parser = parser();
    let vision = parser.parse(COMPLETE_KTP, 0.92, OcrEngine::Vision, 0.6);
    let mlkit = parser.parse(NOISY_KTP, 0.81, OcrEngine::MlKit, 0.9);

    let comparison = EngineComparison::from_runs(Ok(vision), Ok(mlkit)).unwrap();
    assert!(comparison.has_both_results());
    assert_eq!(
        comparison.best_result().map(KtpRecord::ocr_engine),
        Some(OcrEngine::Vision)
    );
    assert_eq!(comparison.vision_time(), 0.6);
    assert_eq!(comparison.mlkit_time(), 0.9);

    let comparison =
        EngineComparison::from_runs(Err(OcrError::Timeout), Ok(parser.parse(NOISY_KTP, 0.81, OcrEngine::MlKit, 0.9)))
            .unwrap();
    assert!(!comparison.has_both_results());
    assert_eq!(
        comparison.best_result().and_then(KtpRecord::nama),
        Some("SITI AMINAH")
    );
}
