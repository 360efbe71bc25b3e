//! Splitting of one message into numbered, roughly length-bounded chunks.
//!
//! The split is sentence based: the message is cut on every `.` and the
//! resulting fragments are spread evenly over the minimum number of parts the
//! character limit requires. Fragment lengths are uneven, so an individual
//! chunk can still exceed the limit; the bound is approximate.

/// Platform character limit used when none is configured.
pub const DEFAULT_CHAR_LIMIT: usize = 240;

/// Segment `message` into postable chunks.
///
/// A message of at most `limit` characters comes back untouched as the only
/// chunk. Longer messages are split into sentence fragments (the `.` is
/// dropped), grouped into consecutive batches and each batch is suffixed with
/// `" {i}/{total}"`. Lengths are counted in characters, not bytes.
pub fn segment(message: &str, limit: usize) -> Vec<String> {
    let length = message.chars().count();
    if length <= limit {
        return vec![message.to_string()];
    }

    let parts = length.div_ceil(limit.max(1));
    let fragments: Vec<&str> = message.split('.').collect();
    let per_chunk = fragments.len().div_ceil(parts);

    let batches: Vec<&[&str]> = fragments.chunks(per_chunk).collect();
    let total = batches.len();
    batches
        .iter()
        .enumerate()
        .map(|(i, batch)| format!("{} {}/{}", batch.join(" ").trim(), i + 1, total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(count: usize) -> String {
        (1..=count)
            .map(|n| format!("This is sentence number {n:02} of the text."))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn short_message_is_returned_unchanged() {
        let chunks = segment("Hello world.", DEFAULT_CHAR_LIMIT);
        assert_eq!(chunks, vec!["Hello world.".to_string()]);
    }

    #[test]
    fn message_exactly_at_limit_gets_no_suffix() {
        let message = "x".repeat(DEFAULT_CHAR_LIMIT);
        assert_eq!(segment(&message, DEFAULT_CHAR_LIMIT), vec![message]);
    }

    #[test]
    fn limit_is_counted_in_characters() {
        let message = "é".repeat(DEFAULT_CHAR_LIMIT);
        assert!(message.len() > DEFAULT_CHAR_LIMIT);
        assert_eq!(segment(&message, DEFAULT_CHAR_LIMIT), vec![message]);
    }

    #[test]
    fn long_message_splits_into_required_number_of_parts() {
        let message = sentences(12);
        let length = message.chars().count();
        let expected = length.div_ceil(DEFAULT_CHAR_LIMIT);
        assert!(expected > 1);

        let chunks = segment(&message, DEFAULT_CHAR_LIMIT);

        assert_eq!(chunks.len(), expected);
        for (i, chunk) in chunks.iter().enumerate() {
            assert!(
                chunk.ends_with(&format!(" {}/{}", i + 1, expected)),
                "chunk {i} has wrong suffix: {chunk:?}"
            );
        }
        assert!(chunks[0].starts_with("This is sentence number 01"));
    }

    #[test]
    fn fragments_are_joined_with_space_and_trimmed() {
        let chunks = segment("One. Two. Three.", 5);
        assert_eq!(chunks, vec!["One 1/4", "Two 2/4", "Three 3/4", " 4/4"]);
    }

    #[test]
    fn fewer_fragments_than_parts_yields_fewer_chunks() {
        let message = format!("{}.{}", "A".repeat(300), "b".repeat(300));
        let chunks = segment(&message, DEFAULT_CHAR_LIMIT);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], format!("{} 1/2", "A".repeat(300)));
        assert_eq!(chunks[1], format!("{} 2/2", "b".repeat(300)));
    }

    #[test]
    fn unpunctuated_message_is_one_oversized_chunk() {
        // No '.' means a single fragment: the limit is not enforced.
        let message = "a".repeat(500);
        let chunks = segment(&message, DEFAULT_CHAR_LIMIT);
        assert_eq!(chunks, vec![format!("{message} 1/1")]);
        assert!(chunks[0].chars().count() > DEFAULT_CHAR_LIMIT);
    }

    #[test]
    fn uneven_fragments_can_exceed_the_limit() {
        let message = format!("{}. Short. Tiny.", "w".repeat(400));
        let chunks = segment(&message, DEFAULT_CHAR_LIMIT);
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].chars().count() > DEFAULT_CHAR_LIMIT);
    }
}
