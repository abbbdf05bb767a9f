//! Unit tests for the quiz module
//!
//! Tests cover:
//! - Scoring heuristic
//! - Per-example grading latch
//! - Index progression bounds

use smellhunt::quiz::{scores_as_correct, Quiz};

// ============================================================================
// Scoring heuristic
// ============================================================================

mod scoring_tests {
    use super::*;

    #[test]
    fn test_plain_correct() {
        assert!(scores_as_correct("correct"));
    }

    #[test]
    fn test_mixed_case() {
        assert!(scores_as_correct("Well done, that is Correct."));
    }

    #[test]
    fn test_embedded_in_word_still_counts() {
        // Known fragility of the free-text sniff: "incorrect" also matches.
        assert!(scores_as_correct("Your answer is incorrect."));
    }

    #[test]
    fn test_absent() {
        assert!(!scores_as_correct("You missed the null check entirely."));
    }

    #[test]
    fn test_empty() {
        assert!(!scores_as_correct(""));
    }
}

// ============================================================================
// Quiz progression
// ============================================================================

mod progression_tests {
    use super::*;

    #[test]
    fn test_full_session_all_correct() {
        let mut quiz = Quiz::new(3);
        for round in 1..=3 {
            assert_eq!(quiz.current_index(), round);
            assert!(quiz.record_feedback("correct"));
            quiz.advance();
        }
        assert!(quiz.is_over());
        assert_eq!(quiz.score(), 3);
        assert_eq!(quiz.current_index(), 4);
    }

    #[test]
    fn test_full_session_none_correct() {
        let mut quiz = Quiz::new(3);
        for _ in 1..=3 {
            assert!(!quiz.record_feedback("try again"));
            quiz.advance();
        }
        assert_eq!(quiz.score(), 0);
    }

    #[test]
    fn test_double_grading_one_example_counts_once() {
        let mut quiz = Quiz::new(3);
        assert!(quiz.record_feedback("correct"));
        assert!(!quiz.record_feedback("still correct"));
        assert_eq!(quiz.score(), 1);
    }

    #[test]
    fn test_index_parks_past_total() {
        let mut quiz = Quiz::new(2);
        for _ in 0..5 {
            quiz.advance();
        }
        assert_eq!(quiz.current_index(), 3);
    }

    #[test]
    fn test_single_example_quiz() {
        let mut quiz = Quiz::new(1);
        assert!(!quiz.is_over());
        quiz.record_feedback("correct");
        quiz.advance();
        assert!(quiz.is_over());
        assert_eq!(quiz.score(), 1);
    }
}
