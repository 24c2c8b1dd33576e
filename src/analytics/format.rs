//! Currency and count formatting for chart labels and KPI cards.
//!
//! There are two currency contracts. [`currency_short`] always
//! abbreviates and never groups digits; [`tick_label`] abbreviates from 1,000
//! upward and falls back to [`currency_grouped`] below that.

/// Format a value with a K/M suffix: `$2.3M`, `$300K`, `$950`.
///
/// Millions keep one decimal, thousands and smaller values none.
pub fn currency_short(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1e6 {
        format!("${:.1}M", value / 1e6)
    } else if magnitude >= 1e3 {
        format!("${:.0}K", value / 1e3)
    } else {
        format!("${:.0}", value)
    }
}

/// Format a value with zero decimals and comma thousands separators: `$1,234,567`.
pub fn currency_grouped(value: f64) -> String {
    format!("${}", group_thousands(&format!("{:.0}", value)))
}

/// Axis tick label: K/M form from 1,000 upward, grouped form below.
pub fn tick_label(value: f64) -> String {
    if value.abs() >= 1e3 {
        currency_short(value)
    } else {
        currency_grouped(value)
    }
}

/// Format an integer count with comma separators: `12,345`.
pub fn count(n: usize) -> String {
    group_thousands(&n.to_string())
}

/// Insert commas every three digits of an already-rounded integer string.
fn group_thousands(digits: &str) -> String {
    let (sign, body) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut out = String::with_capacity(body.len() + body.len() / 3);
    for (i, c) in body.chars().enumerate() {
        if i > 0 && (body.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("{}{}", sign, out)
}
