use crate::ai::dto::InferenceOutcome;
use crate::error::TrendResult;

pub fn build_summarization_prompt(abstract_text: &str) -> String {
    format!(
        "Summarize the following research abstract in exactly 3 THIRD-PERSON sentences without repetition. \
         Underscore the novelty of the work and its contribution to the field. \
         Abstract: {}\nSummary ends here.",
        abstract_text
    )
}

/// Blank output counts as a failed call.
pub fn classify_generation(result: TrendResult<String>) -> InferenceOutcome {
    match result {
        Ok(text) => {
            let cleaned = text.trim();
            if cleaned.is_empty() {
                InferenceOutcome::Failed("model returned no text".to_string())
            } else {
                InferenceOutcome::Generated(cleaned.to_string())
            }
        }
        Err(e) => InferenceOutcome::Failed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrendError;

    #[test]
    fn test_build_summarization_prompt() {
        let prompt = build_summarization_prompt("We propose a new optimizer.");

        assert!(prompt.starts_with("Summarize the following research abstract in exactly 3 THIRD-PERSON sentences"));
        assert!(prompt.contains("Underscore the novelty of the work"));
        assert!(prompt.contains("Abstract: We propose a new optimizer.\nSummary ends here."));
    }

    #[test]
    fn test_classify_generation() {
        assert_eq!(
            classify_generation(Ok("  trimmed text \n".to_string())),
            InferenceOutcome::Generated("trimmed text".to_string())
        );
        assert!(matches!(
            classify_generation(Ok("   ".to_string())),
            InferenceOutcome::Failed(_)
        ));
        assert!(matches!(
            classify_generation(Err(TrendError::ModelOutput("bad".to_string()))),
            InferenceOutcome::Failed(reason) if reason.contains("bad")
        ));
    }
}
