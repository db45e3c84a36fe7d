//! 故事提示词构造

use super::StoryOptions;

/// 构造发送给故事模型的提示词
///
/// 100-150 词只是提示，不做强制校验。
pub fn build_story_prompt(options: &StoryOptions) -> String {
    let mut prompt = format!(
        "Look at these images and create a creative, engaging short story that connects them together.\n\n\
         STORY STYLE: {}\n\
         STORY LANGUAGE: {}\n",
        options.style, options.language
    );

    if let Some(custom) = &options.custom_prompt {
        prompt.push_str(&format!("\nADDITIONAL INSTRUCTIONS: {}\n", custom));
    }

    prompt.push_str(&format!(
        "\nThe story should be descriptive but concise (around 100-150 words).\n\
         Write it in {}.\n\
         Write it in a style that is perfect for an interesting storytelling voice.\n\
         Make it sound natural, captivating, and vivid.\n",
        options.language
    ));

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_style_and_language() {
        let options = StoryOptions::from_fields(
            Some("Noir".to_string()),
            None,
            Some("French".to_string()),
            None,
        );
        let prompt = build_story_prompt(&options);

        assert!(prompt.contains("STORY STYLE: Noir"));
        assert!(prompt.contains("STORY LANGUAGE: French"));
        assert!(prompt.contains("Write it in French."));
        assert!(!prompt.contains("ADDITIONAL INSTRUCTIONS"));
    }

    #[test]
    fn test_prompt_includes_custom_instructions() {
        let options = StoryOptions::from_fields(
            None,
            None,
            None,
            Some("Mention a red balloon".to_string()),
        );
        let prompt = build_story_prompt(&options);

        assert!(prompt.contains("ADDITIONAL INSTRUCTIONS: Mention a red balloon"));
        assert!(prompt.contains("100-150 words"));
    }
}
