use serde::{Deserialize, Serialize};

/// An approximate date as shown on a course card: free display text plus two
/// flags saying whether the "estimated" badge appears next to the start date
/// and the apply-by date.
///
/// Stored as three real columns. The pipe-packed string form
/// (`"Late 2025|1|0"`) exists only at the compatibility seam for data written
/// by older clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedDate {
    pub estimated_date: String,
    pub show_estimated_for_start_date: bool,
    pub show_estimated_for_apply_by_date: bool,
}

impl Default for EstimatedDate {
    fn default() -> Self {
        EstimatedDate {
            estimated_date: String::new(),
            show_estimated_for_start_date: true,
            show_estimated_for_apply_by_date: true,
        }
    }
}

fn flag(b: bool) -> &'static str {
    if b { "1" } else { "0" }
}

/// Pack display text and flags into the legacy pipe-delimited form.
pub fn encode(text: &str, show_start: bool, show_apply: bool) -> String {
    format!("{}|{}|{}", text, flag(show_start), flag(show_apply))
}

/// Decode a stored estimated-date string, whatever generation it is from.
///
/// - 3 parts: current packed format, flags are `"1"`/`"0"`.
/// - more than 3 parts: corrupted legacy data (packed strings re-encoded on
///   top of each other); keep only the first segment as text and fall back to
///   both flags on.
/// - no delimiter: legacy plain text, both flags on.
///
/// Never fails; always yields text plus two booleans.
pub fn parse_existing(raw: &str) -> EstimatedDate {
    let parts: Vec<&str> = raw.split('|').collect();
    match parts.len() {
        3 => EstimatedDate {
            estimated_date: parts[0].to_string(),
            show_estimated_for_start_date: parts[1] == "1",
            show_estimated_for_apply_by_date: parts[2] == "1",
        },
        1 => EstimatedDate {
            estimated_date: raw.to_string(),
            ..EstimatedDate::default()
        },
        // 2 parts or >3 parts: not a shape any writer produced on purpose.
        // Salvage the first segment and default the flags.
        _ => EstimatedDate {
            estimated_date: parts[0].to_string(),
            ..EstimatedDate::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_well_formed() {
        let decoded = parse_existing(&encode("Late 2025", true, false));
        assert_eq!(decoded.estimated_date, "Late 2025");
        assert!(decoded.show_estimated_for_start_date);
        assert!(!decoded.show_estimated_for_apply_by_date);
    }

    #[test]
    fn corrupted_multi_delimiter_is_repaired() {
        let decoded = parse_existing("Early 2026|1|0|1|0");
        assert_eq!(decoded.estimated_date, "Early 2026");
        assert!(decoded.show_estimated_for_start_date);
        assert!(decoded.show_estimated_for_apply_by_date);
    }

    #[test]
    fn legacy_plain_text_defaults_both_flags() {
        let decoded = parse_existing("Mid 2024");
        assert_eq!(decoded.estimated_date, "Mid 2024");
        assert!(decoded.show_estimated_for_start_date);
        assert!(decoded.show_estimated_for_apply_by_date);
    }
}
