//! RT/RW (neighbourhood / hamlet) extraction.

use super::labels::{contains_ignore_case, next_line_value};
use super::patterns::{RT_RW_BARE, RT_RW_LABELED};
use super::FieldExtractor;
use crate::models::ktp::KtpField;

/// RT/RW field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct RtRwExtractor;

impl FieldExtractor for RtRwExtractor {
    fn field(&self) -> KtpField {
        KtpField::RtRw
    }

    fn extract(&self, lines: &[&str]) -> Option<String> {
        extract_rt_rw(lines)
    }
}

/// Extract RT/RW as `NNN/NNN`.
///
/// Per line: a bare `003/005`, then `RT 003 / RW 005` spelled out, then an
/// "RT/RW" label whose numbers sit on the following line.
pub fn extract_rt_rw(lines: &[&str]) -> Option<String> {
    for (i, line) in lines.iter().enumerate() {
        if let Some(m) = RT_RW_BARE.find(line) {
            return Some(m.as_str().to_string());
        }

        if let Some(caps) = RT_RW_LABELED.captures(line) {
            return Some(format!("{}/{}", &caps[1], &caps[2]));
        }

        if contains_ignore_case(line, "RT/RW") {
            if let Some(m) = next_line_value(lines, i).and_then(|next| RT_RW_BARE.find(next)) {
                return Some(m.as_str().to_string());
            }
        }
    }
    None
}
