//! Currency and table formatting for terminal output.

use crate::domain::AggregateTable;

/// Whole-dollar amount with thousands separators: `$1,234,568`.
///
/// Rounds half to even, so `$2.50` prints as `$2`. Negative amounts print as `-$1,234`.
pub fn format_usd(value: f64) -> String {
    let rounded = value.round_ties_even();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(&digits))
}

/// Short axis label: `$950`, `$12.5K`, `$3.2M`, `$1.1B`.
pub fn format_usd_compact(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    let (scaled, suffix) = if abs >= 1e9 {
        (abs / 1e9, "B")
    } else if abs >= 1e6 {
        (abs / 1e6, "M")
    } else if abs >= 1e3 {
        (abs / 1e3, "K")
    } else {
        return format!("{sign}${abs:.0}");
    };
    format!("{sign}${scaled:.1}{suffix}")
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Plain-text table of the ranked aggregate (grand total first).
pub fn format_table(table: &AggregateTable) -> String {
    let label_width = table
        .rows
        .iter()
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(12, 72);

    let mut out = String::new();
    out.push_str(&format!("{:<label_width$} {:>18}\n", "PSC", "obligated"));
    out.push_str(&format!("{:-<label_width$} {:->18}\n", "", ""));
    for row in &table.rows {
        out.push_str(&format!(
            "{:<label_width$} {:>18}\n",
            truncate(&row.label, label_width),
            format_usd(row.total_obligation)
        ));
    }
    out
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
