//! Prompt composition for design generation.

use super::GenerationInput;

/// Fixed trailing instruction: keep the output usable as print artwork.
const PRINT_INSTRUCTION: &str =
    "Create a single centered design suitable for print. Use a transparent background if possible.";

/// Compose the full provider prompt from the user's input.
///
/// Joins the user prompt, an optional style clause, an optional color
/// preference clause, and the fixed print instruction with newlines,
/// dropping empty clauses.
#[must_use]
pub fn compose_prompt(input: &GenerationInput) -> String {
    let style_clause = input
        .style
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| format!("Style: {s}."));

    let colors_clause = input
        .colors
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(|c| format!("Preferred colors: {}.", c.join(", ")));

    let mut parts = vec![input.prompt.clone()];
    parts.extend(style_clause);
    parts.extend(colors_clause);
    parts.push(PRINT_INSTRUCTION.to_string());

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(
        prompt: &str,
        style: Option<&str>,
        colors: Option<Vec<&str>>,
    ) -> GenerationInput {
        GenerationInput {
            prompt: prompt.to_string(),
            style: style.map(String::from),
            colors: colors.map(|c| c.into_iter().map(String::from).collect()),
        }
    }

    #[test]
    fn test_prompt_only() {
        let composed = compose_prompt(&input("a fox reading a book", None, None));
        assert_eq!(
            composed,
            format!("a fox reading a book\n{PRINT_INSTRUCTION}")
        );
    }

    #[test]
    fn test_prompt_with_style_and_colors() {
        let composed = compose_prompt(&input(
            "a fox reading a book",
            Some("vintage"),
            Some(vec!["teal", "cream"]),
        ));
        assert_eq!(
            composed,
            format!(
                "a fox reading a book\nStyle: vintage.\nPreferred colors: teal, cream.\n{PRINT_INSTRUCTION}"
            )
        );
    }

    #[test]
    fn test_empty_clauses_are_dropped() {
        let composed = compose_prompt(&input("slogan tee", Some(""), Some(vec![])));
        assert_eq!(composed, format!("slogan tee\n{PRINT_INSTRUCTION}"));
    }

    #[test]
    fn test_single_color() {
        let composed = compose_prompt(&input("logo", None, Some(vec!["black"])));
        assert!(composed.contains("Preferred colors: black."));
    }
}
