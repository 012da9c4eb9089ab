//! Prompt construction for paper summaries

use crate::record::PaperRecord;

/// System prompt for the three-part summary format
pub const SUMMARY_SYSTEM_PROMPT: &str = "You are an expert research assistant. \
Summarize academic papers accurately and concisely for a technical audience. \
Respond with a JSON object containing exactly three keys: \"What's New\", \
\"Technical Details\", and \"Performance Highlights\". Each value is a short \
paragraph in plain language. Do not invent results that are not in the paper.";

/// Builds the user prompt for one paper
///
/// The prompt always carries the title. The abstract and full-text
/// sections are appended when the record has them, so the model sees
/// as much of the paper as was crawled.
pub fn summary_user_prompt(record: &PaperRecord) -> String {
    let mut prompt = format!("Title: {}\n", record.title);

    if let Some(abstract_text) = &record.abstract_text {
        prompt.push_str("Abstract: ");
        prompt.push_str(abstract_text);
        prompt.push('\n');
    }

    if let Some(sections) = &record.full_content {
        for (id, section) in sections {
            prompt.push_str(&format!("\n[{}] {}\n{}\n", id, section.title, section.content));
        }
    }

    prompt.push_str("\nSummarize this paper.");
    prompt
}
