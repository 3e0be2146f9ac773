//! Bidder name normalization.

/// Collapse whitespace runs to single spaces, trim the ends, and convert
/// to title case.
///
/// A character is uppercased when the character written before it is not a
/// cased letter and lowercased otherwise, so `"o'neil"` becomes `"O'Neil"`
/// and `"中a"` becomes `"中A"`. Uppercase forms longer than one character
/// keep only their first letter capitalized (`"ß"` becomes `"Ss"`).
pub fn normalize(name: &str) -> String {
    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
    title_case(&collapsed)
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for c in s.chars() {
        if prev_cased {
            for lower in c.to_lowercase() {
                out.push(lower);
                prev_cased = is_cased(lower);
            }
        } else {
            for upper in c.to_uppercase() {
                if prev_cased {
                    out.extend(upper.to_lowercase());
                } else {
                    out.push(upper);
                }
                prev_cased = is_cased(upper);
            }
        }
    }
    out
}

/// Digits, punctuation and scripts without case (CJK, Thai, ...) are not
/// cased and so start a new word.
fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase()
}
