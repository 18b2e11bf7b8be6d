//! Legacy text touch-up for composite labels.
//!
//! Three literal substring replacements, applied in order:
//!
//! 1. `"- "` -> `" "` (drop the hyphen in "IT AND TELECOM- ...")
//! 2. `"it "` -> `"IT "`
//! 3. `"r&d "` -> `"R&D "`
//!
//! These are plain substring matches with no word boundaries, so a word ending
//! in "it" is caught too: "audit services" becomes "audIT services". Labels
//! published by earlier versions of this report have that shape, so the
//! replacements stay literal. Word-aware casing belongs in a replacement for
//! this function, not in its callers.

/// Ordered replacement table.
pub const LEGACY_REPLACEMENTS: [(&str, &str); 3] = [("- ", " "), ("it ", "IT "), ("r&d ", "R&D ")];

/// Apply the legacy replacements to a composite label.
pub fn legacy_touch_up(label: &str) -> String {
    LEGACY_REPLACEMENTS
        .iter()
        .fold(label.to_string(), |acc, (from, to)| acc.replace(from, to))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::normalize::composite_label;

    #[test]
    fn hyphen_is_removed_before_acronym_casing() {
        assert_eq!(legacy_touch_up("70- it services"), "70 IT services");
    }

    #[test]
    fn restores_r_and_d() {
        assert_eq!(
            legacy_touch_up("AJ11 (r&d general science and technology)"),
            "AJ11 (R&D general science and technology)"
        );
    }

    #[test]
    fn substring_matches_are_replaced_too() {
        assert_eq!(legacy_touch_up("R499 (audit services)"), "R499 (audIT services)");
    }

    #[test]
    fn reapplying_is_a_no_op() {
        for label in [
            "D301 (it and telecom- facility operation and maintenance)",
            "D302 (it and telecom- systems development)",
            "AJ11 (r&d general science and technology)",
            "R499 (audit services)",
            "S201 (housekeeping- custodial janitorial)",
        ] {
            let once = legacy_touch_up(label);
            assert_eq!(legacy_touch_up(&once), once, "label {label:?}");
        }
    }

    /// Descriptions shaped like FPDS text: lowercase words (with `&`) joined by
    /// plain spaces or the `"- "` separator, as the normalizer sees them.
    fn description() -> impl Strategy<Value = String> {
        prop::collection::vec(("[a-z&]{1,8}", prop::bool::ANY), 1..8).prop_map(|words| {
            let mut out = String::new();
            for (i, (word, hyphen)) in words.iter().enumerate() {
                if i > 0 {
                    out.push_str(if *hyphen { "- " } else { " " });
                }
                out.push_str(word);
            }
            out
        })
    }

    proptest! {
        #[test]
        fn touch_up_is_idempotent_on_composite_labels(code in "[A-Z][0-9A-Z]{3}", desc in description()) {
            let once = legacy_touch_up(&composite_label(&code, &desc));
            prop_assert_eq!(legacy_touch_up(&once), once.clone());
            prop_assert!(!once.contains("- "));
        }
    }
}
