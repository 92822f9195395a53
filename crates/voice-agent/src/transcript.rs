//! Provider transcript parsing.

use regex::Regex;

use crate::types::{TranscriptTurn, TurnRole};

/// Parse the provider's plain-text transcript into structured turns.
///
/// The provider emits lines of the literal form `Agent: ...` / `User: ...`.
/// "Agent" maps to [`TurnRole::Customer`] and "User" to [`TurnRole::Csr`]:
/// the remote agent roleplays the customer in every scenario. Lines that
/// match neither speaker label are continuations of the previous turn; a
/// leading unlabeled line is dropped.
pub fn parse_provider_transcript(raw: &str) -> Vec<TranscriptTurn> {
    let speaker = Regex::new(r"^(Agent|User):\s*(.*)$").expect("speaker pattern is valid");
    let mut turns: Vec<TranscriptTurn> = Vec::new();

    for line in raw.lines() {
        if let Some(caps) = speaker.captures(line) {
            let role = match &caps[1] {
                "Agent" => TurnRole::Customer,
                _ => TurnRole::Csr,
            };
            turns.push(TranscriptTurn {
                role,
                content: caps[2].trim().to_string(),
            });
        } else if let Some(last) = turns.last_mut() {
            let continuation = line.trim();
            if !continuation.is_empty() {
                if !last.content.is_empty() {
                    last.content.push(' ');
                }
                last.content.push_str(continuation);
            }
        }
    }

    turns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_mapping_inverts_provider_labels() {
        let turns = parse_provider_transcript("Agent: Hi there\nUser: Hello");

        assert_eq!(
            turns,
            vec![
                TranscriptTurn {
                    role: TurnRole::Customer,
                    content: "Hi there".to_string(),
                },
                TranscriptTurn {
                    role: TurnRole::Csr,
                    content: "Hello".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_empty_input_parses_to_no_turns() {
        assert!(parse_provider_transcript("").is_empty());
    }

    #[test]
    fn test_wrapped_lines_join_previous_turn() {
        let turns = parse_provider_transcript(
            "Agent: I have been waiting\nfor two weeks now\nUser: I'm sorry to hear that",
        );

        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].content, "I have been waiting for two weeks now");
    }

    #[test]
    fn test_leading_unlabeled_line_dropped() {
        let turns = parse_provider_transcript("(dial tone)\nUser: Hello?");
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, TurnRole::Csr);
    }

    #[test]
    fn test_label_requires_line_start() {
        let turns = parse_provider_transcript("Agent: She said User: no");
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].content, "She said User: no");
    }
}
