use crate::SESSION_TITLE_MAX_CHARS;

/// Derives a session title from the first prompt: whitespace collapsed,
/// truncated to a 29-character prefix plus `...` when it runs long.
pub fn derive_session_title(prompt: &str) -> String {
    let collapsed = prompt.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= SESSION_TITLE_MAX_CHARS {
        return collapsed;
    }
    let prefix: String = collapsed.chars().take(SESSION_TITLE_MAX_CHARS - 1).collect();
    format!("{}...", prefix.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_prompts_become_the_title_verbatim() {
        assert_eq!(derive_session_title("A 20mm cube"), "A 20mm cube");
    }

    #[test]
    fn a_thirty_character_prompt_is_not_truncated() {
        let prompt = "x".repeat(30);
        assert_eq!(derive_session_title(&prompt), prompt);
    }

    #[test]
    fn long_prompts_keep_a_29_char_prefix_and_an_ellipsis() {
        assert_eq!(
            derive_session_title("Create a 10x10 cube with a hole"),
            "Create a 10x10 cube with a ho..."
        );
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let prompt = "é".repeat(31);
        let title = derive_session_title(&prompt);
        assert_eq!(title.chars().count(), 32);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn interior_whitespace_is_collapsed() {
        assert_eq!(
            derive_session_title("  a   cube \n with  fillets "),
            "a cube with fillets"
        );
    }
}
