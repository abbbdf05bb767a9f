//! Prompt templates for the three request kinds.
//!
//! The wording is load-bearing: the grading heuristic in `quiz` keys off the
//! model echoing "correct", which these templates steer it toward.

/// Ask for an intentionally flawed code sample in the given area.
pub fn bad_code(topic: &str) -> String {
    format!(
        "Create a bad code example for {topic}. The code should demonstrate \
         poor practices related to {topic}. Provide only the code without any \
         explanations."
    )
}

/// Ask for a graded critique of the annotated example.
pub fn grade_annotations(topic: &str, annotated_code: &str) -> String {
    format!(
        "The following is a bad code example for {topic} with user \
         annotations. Grade the annotations and provide feedback. If the \
         annotations are correct, give a short explanation. If they're \
         incorrect, provide the solution with an explanation:\n\n{annotated_code}"
    )
}

/// Ask for the end-of-round send-off.
pub fn closing_feedback(score: usize, total: usize) -> String {
    format!(
        "Generate a funny and encouraging feedback message for a user who \
         scored {score} out of {total} in a code improvement exercise. Use a \
         humorous tone."
    )
}
