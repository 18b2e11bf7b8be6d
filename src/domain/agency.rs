//! Agency names for FPDS department IDs.

use serde::{Deserialize, Serialize};

/// FPDS `DEPARTMENT_ID` -> (short name, full name).
const KNOWN_DEPARTMENTS: [(&str, &str, &str); 16] = [
    ("1200", "USDA", "Department of Agriculture"),
    ("1300", "DOC", "Department of Commerce"),
    ("1400", "DOI", "Department of the Interior"),
    ("1500", "DOJ", "Department of Justice"),
    ("1600", "DOL", "Department of Labor"),
    ("1900", "DOS", "Department of State"),
    ("2000", "Treasury", "Department of the Treasury"),
    ("3600", "VA", "Department of Veterans Affairs"),
    ("4700", "GSA", "General Services Administration"),
    ("6900", "DOT", "Department of Transportation"),
    ("7000", "DHS", "Department of Homeland Security"),
    ("7500", "HHS", "Department of Health and Human Services"),
    ("8000", "NASA", "National Aeronautics and Space Administration"),
    ("8900", "DOE", "Department of Energy"),
    ("9100", "ED", "Department of Education"),
    ("9700", "DOD", "Department of Defense"),
];

/// How the narrative refers to the contracting agency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agency {
    /// Used in per-category sentences ("GSA obligated ...").
    pub short_name: String,
    /// Used in the opening sentence.
    pub full_name: String,
}

impl Agency {
    /// Look up a department ID; unknown IDs become "Department <id>".
    pub fn for_department(code: &str) -> Self {
        let code = code.trim();
        match KNOWN_DEPARTMENTS.iter().find(|(id, _, _)| *id == code) {
            Some((_, short, full)) => Self {
                short_name: (*short).to_string(),
                full_name: (*full).to_string(),
            },
            None => Self::named(format!("Department {code}")),
        }
    }

    /// An agency known only by one name (e.g. `--agency` override).
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            short_name: name.clone(),
            full_name: name,
        }
    }

    /// "US General Services Administration (GSA)", or just the name when both forms match.
    pub fn long_form(&self) -> String {
        if self.short_name == self.full_name {
            self.full_name.clone()
        } else {
            format!("US {} ({})", self.full_name, self.short_name)
        }
    }
}
