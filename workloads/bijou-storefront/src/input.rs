//! Form field text as product pages pass it.

/// Leading integer of `text` the way `parseInt` reads it; anything without
/// one is 0, which the cart rejects as a quantity.
pub fn leading_integer(text: &str) -> i64 {
    let text = text.trim_start();
    let end = text
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text[..end].parse().unwrap_or(0)
}
