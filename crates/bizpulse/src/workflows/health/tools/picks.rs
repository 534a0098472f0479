use super::{PromoLabel, ToolEntry};
use std::cmp::Ordering;

const TOP_RATED_AT: f64 = 4.7;
const BUDGET_PRICE_BELOW: f64 = 15.0;

const RECURRING_MARKERS: &[&str] = &[
    "/mo", "/yr", "/year", "/wk", "/week", "/user", "/seat", "per month", "per year",
    "per week", "per user", "per seat", "monthly", "yearly", "annually", "weekly",
];
const ONE_OFF_MARKERS: &[&str] = &[
    "%", "per sale", "per transaction", "one-time", "one time", "lifetime",
];

/// First decimal number in `text`, e.g. `"$12.50/mo"` gives `12.5`.
/// Comma thousands groups belong to the number, so `"$1,299/mo"` gives `1299`.
fn first_number(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let bytes = &text.as_bytes()[start..];
    let is_digit = |index: usize| bytes.get(index).is_some_and(|b| b.is_ascii_digit());

    let mut end = 0;
    while is_digit(end) {
        end += 1;
    }
    while bytes.get(end) == Some(&b',')
        && (1..=3).all(|step| is_digit(end + step))
        && !is_digit(end + 4)
    {
        end += 4;
    }
    if bytes.get(end) == Some(&b'.') && is_digit(end + 1) {
        end += 1;
        while is_digit(end) {
            end += 1;
        }
    }

    text[start..start + end].replace(',', "").parse().ok()
}

/// Commission percentage; strings without a number count as zero.
pub fn commission_value(entry: &ToolEntry) -> f64 {
    first_number(&entry.commission_rate).unwrap_or(0.0)
}

/// Price per billing period. `None` unless the text names a recurring period;
/// percentages, per-sale fees and one-time prices never count.
pub fn price_value(entry: &ToolEntry) -> Option<f64> {
    let price = entry.price.to_ascii_lowercase();
    if ONE_OFF_MARKERS.iter().any(|marker| price.contains(marker)) {
        return None;
    }
    if !RECURRING_MARKERS.iter().any(|marker| price.contains(marker)) {
        return None;
    }
    first_number(&price)
}

fn rating_desc(a: &ToolEntry, b: &ToolEntry) -> Ordering {
    let rank = |entry: &ToolEntry| entry.rating.unwrap_or(f64::NEG_INFINITY);
    rank(b).total_cmp(&rank(a))
}

fn best_fit_order(a: &ToolEntry, b: &ToolEntry) -> Ordering {
    b.has_free_tier
        .cmp(&a.has_free_tier)
        .then_with(|| rating_desc(a, b))
}

fn top_partner_order(a: &ToolEntry, b: &ToolEntry) -> Ordering {
    commission_value(b)
        .total_cmp(&commission_value(a))
        .then_with(|| rating_desc(a, b))
}

/// "Best for you": free tier first, then highest rating. Ties keep catalog order.
pub fn pick_best_fit<'a>(candidates: &[&'a ToolEntry]) -> Option<&'a ToolEntry> {
    candidates
        .iter()
        .copied()
        .min_by(|a, b| best_fit_order(a, b))
}

/// "Top partner": highest commission, then highest rating. Ties keep catalog order.
pub fn pick_top_partner<'a>(candidates: &[&'a ToolEntry]) -> Option<&'a ToolEntry> {
    candidates
        .iter()
        .copied()
        .min_by(|a, b| top_partner_order(a, b))
}

pub fn promo_label(entry: &ToolEntry) -> Option<PromoLabel> {
    if matches!(entry.rating, Some(rating) if rating >= TOP_RATED_AT) {
        return Some(PromoLabel::TopRated);
    }
    if matches!(price_value(entry), Some(price) if price < BUDGET_PRICE_BELOW) {
        return Some(PromoLabel::BudgetFriendly);
    }
    if entry.has_free_tier {
        return Some(PromoLabel::FreeTierAvailable);
    }
    None
}
