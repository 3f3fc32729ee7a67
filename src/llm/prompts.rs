//! Prompt templates for the ideation workflow.
//!
//! Placeholders are written as `{name}` and filled by [`Prompts::fill`].

/// Collection of prompts used for keyword extraction, search and idea generation.
pub struct Prompts;

impl Prompts {
    /// Fill `{name}` placeholders in a single left-to-right pass.
    ///
    /// Inserted values are never rescanned, so braces in user or model text
    /// come through literally. Unknown placeholders are left as written.
    pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];

            let value = after.find('}').and_then(|end| {
                let name = &after[..end];
                values
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| (end, *value))
            });

            match value {
                Some((end, value)) => {
                    out.push_str(value);
                    rest = &after[end + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }

    /// Prompt to extract thematic keywords from an event description.
    pub fn extract_keywords() -> &'static str {
        r#"You are an expert in experiential event planning.

Extract 5–10 short, specific, and thematic keywords or concepts from the event description below. These will be used to inspire immersive, tech-powered event ideas.

Each keyword should be 2–4 words long and describe a concrete idea or theme (e.g., "AR photo booths", "smart vending", "interactive storytelling").

Event Description:
"{paragraph}"

Return the keywords as a comma-separated list."#
    }

    /// Prompt to extract keywords describing a single search result.
    pub fn extract_link_keywords() -> &'static str {
        r#"You are an expert in event innovation.

Given the title and link below, extract 3–5 short, specific, and meaningful keywords or themes (2–4 words each) that describe what the page is about.

Title: {title}
Link: {link}

Return the keywords as a comma-separated list."#
    }

    /// Instruction for the search-augmented call.
    pub fn web_search() -> &'static str {
        "Generate 10 useful URLs for experiential event ideas or {brand}.com inspiration related to the keywords: {keywords}"
    }

    /// Prompt to generate branded event concepts.
    pub fn generate_ideas() -> &'static str {
        r#"You are an expert event strategist for {brand}, a company offering creative experiences like AI photo booths, smart vending machines, audio booths, personalization stations, and immersive visual storytelling.

Based on the event description below, generate 6–7 **unique and diverse** {brand}-powered event ideas.

**Event Description:**
{paragraph}

**Inspiration from Related Ideas:**
{search_summary}

💡 **Your Task:**
Create ideas that are immersive, memorable, and creatively use {brand}’s **photo, video, and audio**-based technologies. Do **not** use AR, VR, projection mapping, or other tech-heavy elements.

You can optionally include:
- Studio Ghibli-inspired visuals **(in just one idea)**
- Personalized giveaways (e.g., Labubu dolls, custom t-shirts, stickers)
- Audio booths, video diaries, face filters, sound remixes, or creative vending

❗ Important:
- Avoid using AR, VR, holograms, or projection domes
- Don’t repeat formats like photo booths
- Every idea should have a **creative title** and a **detailed explanation** of how {brand} enhances the experience

Return only the final ideas in markdown format."#
    }

    /// Prompt for a one-line description of a single keyword.
    pub fn summarize_keyword() -> &'static str {
        "Give a short one-line event idea description using the keyword: {keyword}"
    }
}
