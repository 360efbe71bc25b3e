use tracing::debug;

use crate::error::PostError;

/// Unicode titlecase letters (general category Lt).
fn is_titlecase(c: char) -> bool {
    matches!(
        c,
        '\u{01C5}'
            | '\u{01C8}'
            | '\u{01CB}'
            | '\u{01F2}'
            | '\u{1F88}'..='\u{1F8F}'
            | '\u{1F98}'..='\u{1F9F}'
            | '\u{1FA8}'..='\u{1FAF}'
            | '\u{1FBC}'
            | '\u{1FCC}'
            | '\u{1FFC}'
    )
}

/// True when `unit` has at least one uppercase character and no lowercase or
/// titlecase ones. Digits, punctuation and whitespace neither make nor break a
/// shout, so `"!!!"` is not one while `"HEY!"` is.
pub fn is_shout(unit: &str) -> bool {
    let mut cased = false;
    for c in unit.chars() {
        if c.is_lowercase() || is_titlecase(c) {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Build the next message starting at `start`.
///
/// While the message built so far is a shout, the following unit is appended
/// to it without a separator. Returns the message and the index one past the
/// last unit consumed.
pub fn advance(corpus: &[String], start: usize) -> Result<(String, usize), PostError> {
    let out_of_range = |index| PostError::OutOfRange {
        index,
        len: corpus.len(),
    };

    let mut index = start;
    let mut message = corpus.get(index).ok_or_else(|| out_of_range(index))?.clone();
    while is_shout(&message) {
        index += 1;
        let next = corpus.get(index).ok_or_else(|| out_of_range(index))?;
        debug!(index, "Merging unit into shout");
        message.push_str(next);
    }

    Ok((message, index + 1))
}
