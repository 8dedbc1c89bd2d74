//! Label and value helpers shared by the field extractors.
//!
//! KTP text comes out of OCR as "Label : value" lines, but the value is often
//! pushed onto the next line or merged with a neighbouring label. These helpers
//! find a label, strip it, and decide whether what is left is a real value.

use lazy_static::lazy_static;

use super::patterns::DATE_PATTERN;

/// Labels printed on the card.
pub const KTP_LABELS: [&str; 14] = [
    "NIK",
    "Nama",
    "Tempat/Tgl Lahir",
    "Jenis Kelamin",
    "Alamat",
    "RT/RW",
    "Kel/Desa",
    "Kecamatan",
    "Agama",
    "Status Perkawinan",
    "Pekerjaan",
    "Kewarganegaraan",
    "Berlaku Hingga",
    "Gol. Darah",
];

lazy_static! {
    static ref UPPER_LABELS: Vec<String> = KTP_LABELS.iter().map(|l| l.to_uppercase()).collect();
}

/// Whether `text` contains any card label, ignoring case.
///
/// Used to reject "values" that are really the next field's label.
pub fn is_likely_label(text: &str) -> bool {
    let upper = text.trim().to_uppercase();
    UPPER_LABELS.iter().any(|label| upper.contains(label.as_str()))
}

/// Whether `line` contains `needle`, ignoring case.
pub fn contains_ignore_case(line: &str, needle: &str) -> bool {
    line.to_uppercase().contains(&needle.to_uppercase())
}

/// Remove every occurrence of an ASCII `pattern` from `text`, ignoring case.
pub fn remove_ignore_case(text: &str, pattern: &str) -> String {
    if pattern.is_empty() {
        return text.to_string();
    }

    // ASCII uppercasing keeps byte offsets aligned with `text`
    let upper_text = text.to_ascii_uppercase();
    let upper_pattern = pattern.to_ascii_uppercase();

    let mut result = String::with_capacity(text.len());
    let mut rest = 0;
    for (start, _) in upper_text.match_indices(&upper_pattern) {
        result.push_str(&text[rest..start]);
        rest = start + upper_pattern.len();
    }
    result.push_str(&text[rest..]);
    result
}

/// Strip `label` and any colons from `line` and trim what is left.
pub fn clean_value_after_label(line: &str, label: &str) -> String {
    remove_ignore_case(line, label)
        .replace(':', "")
        .trim()
        .to_string()
}

/// The line after `index` with a single leading colon removed.
pub(crate) fn next_line_value<'a>(lines: &[&'a str], index: usize) -> Option<&'a str> {
    let next = lines.get(index + 1)?.trim();
    Some(next.strip_prefix(':').unwrap_or(next).trim())
}

/// Whether `value` can be accepted as a field value.
pub(crate) fn is_value(value: &str) -> bool {
    !value.is_empty() && !is_likely_label(value)
}

/// `Some(value)` unless it is empty.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Find the value for `label` on its own line or the line below.
///
/// Only the first line mentioning the label is considered: if neither it nor
/// the following line holds an acceptable value, the lookup gives up.
pub fn value_for_label(label: &str, lines: &[&str]) -> Option<String> {
    value_for_label_from(label, lines, 0)
}

/// [`value_for_label`] starting at line `start_at`.
pub fn value_for_label_from(label: &str, lines: &[&str], start_at: usize) -> Option<String> {
    let (index, line) = lines
        .iter()
        .enumerate()
        .skip(start_at)
        .find(|(_, line)| contains_ignore_case(line, label))?;

    let same_line = clean_value_after_label(line, label);
    if is_value(&same_line) {
        return Some(same_line);
    }

    next_line_value(lines, index)
        .filter(|next| is_value(next))
        .map(str::to_string)
}

/// First `D-M-YYYY` / `D/M/YYYY` date in `text`, exactly as written.
pub fn extract_date(text: &str) -> Option<&str> {
    DATE_PATTERN.find(text).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_likely_label() {
        assert!(is_likely_label("Jenis Kelamin"));
        assert!(is_likely_label("  kecamatan "));
        assert!(is_likely_label("Gol. Darah O"));
        assert!(!is_likely_label("BUDI SANTOSO"));
    }

    #[test]
    fn test_clean_value_after_label() {
        assert_eq!(clean_value_after_label("Nama: BUDI SANTOSO", "Nama"), "BUDI SANTOSO");
        assert_eq!(clean_value_after_label("NAMA : BUDI", "Nama"), "BUDI");
        assert_eq!(clean_value_after_label("nama:", "Nama"), "");
    }

    #[test]
    fn test_remove_ignore_case_keeps_non_ascii() {
        assert_eq!(remove_ignore_case("Alamat: JL. MERPATI – BLOK é", "ALAMAT"), ": JL. MERPATI – BLOK é");
    }

    #[test]
    fn test_value_on_same_line() {
        let lines = ["Nama: BUDI SANTOSO", "Alamat: JL. SUDIRMAN"];
        assert_eq!(value_for_label("Nama", &lines), Some("BUDI SANTOSO".to_string()));
    }

    #[test]
    fn test_value_on_next_line() {
        let lines = ["Nama", ": BUDI SANTOSO", "Alamat"];
        assert_eq!(value_for_label("Nama", &lines), Some("BUDI SANTOSO".to_string()));
    }

    #[test]
    fn test_rejects_label_as_value() {
        let lines = ["Nama", "Tempat/Tgl Lahir: JAKARTA"];
        assert_eq!(value_for_label("Nama", &lines), None);
    }

    #[test]
    fn test_stops_at_first_label_occurrence() {
        let lines = ["Nama:", "Alamat", "Nama: BUDI"];
        assert_eq!(value_for_label("Nama", &lines), None);
        assert_eq!(value_for_label_from("Nama", &lines, 1), Some("BUDI".to_string()));
    }

    #[test]
    fn test_label_on_last_line() {
        let lines = ["Pekerjaan:"];
        assert_eq!(value_for_label("Pekerjaan", &lines), None);
    }

    #[test]
    fn test_extract_date() {
        assert_eq!(extract_date("JAKARTA, 15-08-1990"), Some("15-08-1990"));
        assert_eq!(extract_date("lahir 5/1/1990 di"), Some("5/1/1990"));
        assert_eq!(extract_date("15.08.1990"), None);
        assert_eq!(extract_date("15-08-90"), None);
    }
}
