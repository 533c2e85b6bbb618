//! Amounts in words using the Indian numbering system.
//!
//! `173033` → `"Rupees One Lakh Seventy-Three Thousand Thirty-Three Only"`

const CURRENCY: &str = "Rupees";
const TERMINAL: &str = "Only";

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;

const ONES: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];
const TEENS: [&str; 10] = [
    "Ten", "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen",
    "Eighteen", "Nineteen",
];
const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Spell out an amount, rounded to whole rupees.
///
/// Returns `None` for non-finite amounts and for amounts that round below zero.
pub fn amount_in_words(amount: f64) -> Option<String> {
    let rounded = amount.round();
    if !rounded.is_finite() || rounded < 0.0 {
        return None;
    }
    let n = rounded as u64;
    if n == 0 {
        return Some(format!("{} Zero {}", CURRENCY, TERMINAL));
    }
    Some(format!("{} {} {}", CURRENCY, indian_words(n), TERMINAL))
}

/// Words for a positive integer in crore/lakh/thousand chunks.
fn indian_words(mut n: u64) -> String {
    let mut parts: Vec<String> = Vec::new();

    if n >= CRORE {
        // counts of a thousand crore or more reuse the same grouping
        parts.push(format!("{} Crore", indian_words(n / CRORE)));
        n %= CRORE;
    }
    if n >= LAKH {
        parts.push(format!("{} Lakh", chunk_words(n / LAKH)));
        n %= LAKH;
    }
    if n >= THOUSAND {
        parts.push(format!("{} Thousand", chunk_words(n / THOUSAND)));
        n %= THOUSAND;
    }
    if n > 0 {
        parts.push(chunk_words(n));
    }

    parts.join(" ")
}

/// Words for `1..=999`.
fn chunk_words(n: u64) -> String {
    debug_assert!(n < 1000);
    let mut parts: Vec<String> = Vec::new();

    let hundreds = (n / 100) as usize;
    let rest = (n % 100) as usize;

    if hundreds > 0 {
        parts.push(format!("{} Hundred", ONES[hundreds]));
    }
    match rest {
        0 => {}
        1..=9 => parts.push(ONES[rest].to_string()),
        10..=19 => parts.push(TEENS[rest - 10].to_string()),
        _ => {
            let (tens, ones) = (rest / 10, rest % 10);
            if ones == 0 {
                parts.push(TENS[tens].to_string());
            } else {
                parts.push(format!("{}-{}", TENS[tens], ONES[ones]));
            }
        }
    }

    parts.join(" ")
}
