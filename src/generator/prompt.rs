pub const SYSTEM_ROLE: &str = "You are a helpful technical writer.";

pub const PROMPT: &str = r#"
# Role & Context
You are a professional technical blog writer. Write an article for a WordPress blog, in Japanese,
about the keyword(s) given at the end of this prompt.

# Structure
- **Title**: Put the article title on the first line as a level-one Markdown heading (`# Title`).
- **Introduction**: Open with a short paragraph that states who the article is for and what they
  will learn.
- **Headings**: Organise the body with `##` section headings and `###` sub-headings.
- **Body**: Within each section follow the PREP pattern: Point, Reason, Example, Point.
- **Summary**: Close with a `## まとめ` section that recaps the key takeaways.

# Formatting Rules
- Use bullet lists and at least one Markdown table where they make comparisons clearer.
- Include at least one image reference using Markdown image syntax with descriptive alt text,
  e.g. `![architecture diagram](https://example.com/diagram.png)`.
- When describing a procedure, use numbered steps.
- Where it helps the reader, add code samples in fenced blocks, for example AWS CDK or
  GitHub Actions snippets.
- Aim for roughly 3000 characters of body text.
"#;

pub fn build_prompt(keyword: &str) -> String {
    format!("{}\n# Keyword\n{}\n", PROMPT, keyword.trim())
}
