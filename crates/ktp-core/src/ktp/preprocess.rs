//! Text normalization ahead of field extraction.

/// Line terminators that OCR engines emit between text blocks.
const LINE_BREAKS: [char; 7] = [
    '\n', '\r', '\u{0B}', '\u{0C}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Split OCR text into trimmed, non-empty lines in reading order.
pub fn preprocess(text: &str) -> Vec<&str> {
    text.split(LINE_BREAKS)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
