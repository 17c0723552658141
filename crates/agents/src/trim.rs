//! History trimming policy.
//!
//! Applied before every model call on the stored message sequence, and
//! the result *replaces* the stored sequence. Kept as a pure function
//! so it can be tested in isolation.

use llm::Message;

/// Bound a conversation's message window.
///
/// Sequences of at most 5 messages pass through unchanged. Longer
/// sequences keep the first message (it anchors the conversation's
/// framing) plus a recent tail: the last 3 messages when the pre-trim
/// length is even, the last 4 when it is odd.
pub fn trim_history(messages: Vec<Message>) -> Vec<Message> {
    if messages.len() <= 5 {
        return messages;
    }

    let tail = if messages.len() % 2 == 0 { 3 } else { 4 };
    let mut trimmed = Vec::with_capacity(tail + 1);
    trimmed.push(messages[0].clone());
    trimmed.extend_from_slice(&messages[messages.len() - tail..]);
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(len: usize) -> Vec<Message> {
        (0..len).map(|i| Message::user(format!("m{i}"))).collect()
    }

    #[test]
    fn short_history_unchanged() {
        for len in 0..=5 {
            let trimmed = trim_history(history(len));
            assert_eq!(trimmed.len(), len);
        }
    }

    #[test]
    fn even_length_keeps_first_plus_last_three() {
        let trimmed = trim_history(history(6));
        let contents: Vec<&str> = trimmed.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["m0", "m3", "m4", "m5"]);
    }

    #[test]
    fn odd_length_keeps_first_plus_last_four() {
        let trimmed = trim_history(history(7));
        let contents: Vec<&str> = trimmed.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["m0", "m3", "m4", "m5", "m6"]);
    }

    #[test]
    fn parity_keys_off_pre_trim_length() {
        // 10 is even: tail of 3 even though the result length (4) is even too.
        let trimmed = trim_history(history(10));
        assert_eq!(trimmed.len(), 4);
        // 11 is odd: tail of 4.
        let trimmed = trim_history(history(11));
        assert_eq!(trimmed.len(), 5);
    }

    #[test]
    fn anchor_survives_repeated_trims() {
        let mut messages = history(9);
        for _ in 0..3 {
            messages = trim_history(messages);
            messages.push(Message::user("more"));
            messages.push(Message::assistant("ok", None));
        }
        assert_eq!(messages[0].content, "m0");
    }
}
