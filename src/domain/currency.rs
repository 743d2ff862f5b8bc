// src/domain/currency.rs

/// Renders an amount the way an en-IN locale formats INR with no fraction digits,
/// e.g. `4500000.0` becomes `₹45,00,000`.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}₹{}", group_en_in(rounded.abs()))
}

/// Compact label used next to the price slider thumbs: crores, lakhs, or plain rupees.
pub fn format_inr_short(amount: f64) -> String {
    if amount >= 10_000_000.0 {
        let crores = (amount / 10_000_000.0 * 10.0).round() / 10.0;
        return format!("₹{crores}Cr");
    }
    if amount >= 100_000.0 {
        let lakhs = (amount / 100_000.0).round();
        return format!("₹{lakhs}L");
    }
    format_inr(amount)
}

/// Indian digit grouping: the last three digits, then pairs.
fn group_en_in(value: f64) -> String {
    let digits = format!("{value:.0}");
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}
