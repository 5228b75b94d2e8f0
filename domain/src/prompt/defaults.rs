//! Built-in plans: the AI newsletter (sectioning) and sentiment voters (voting).

use super::template::PromptTemplate;
use crate::sectioning::{Section, SectionPlan};
use crate::voting::LabelSet;

/// Document title for the built-in newsletter plan
pub const NEWSLETTER_TITLE: &str = "AI Newsletter";

const NO_COMMENTARY: &str = "IMPORTANT: Provide ONLY the requested content. Do not add questions, \
offers for more content, or any additional commentary.";

/// Newsletter sections as (label, title, fallback, template)
const NEWSLETTER_SECTIONS: &[(&str, &str, &str, &str)] = &[
    (
        "headlines",
        "Headlines",
        "No headlines generated.",
        "Generate 3-4 attention-grabbing headlines about {topic} in AI. \
Format them as a bullet list. Be concise and impactful, focus on recent developments \
and breakthroughs, and list your sources as links.",
    ),
    (
        "technical_deep_dive",
        "Technical Deep Dive",
        "No technical content generated.",
        "Write a technical deep dive section about {topic} in AI. \
Cover technical details such as architecture, algorithms, or implementation. \
Keep it informative but accessible, about 2-3 paragraphs.",
    ),
    (
        "industry_news",
        "Industry News",
        "No industry news generated.",
        "Write about recent industry news and business developments related to {topic} in AI. \
Include company announcements, partnerships, investments, or market trends. \
Format as 2-3 short news items.",
    ),
    (
        "tools_resources",
        "Tools & Resources",
        "No tools/resources generated.",
        "List 3-5 practical tools, libraries, or resources related to {topic} in AI. \
Give a brief description of each and why it is useful. Format as a bullet list.",
    ),
    (
        "opinion_analysis",
        "Analysis & Outlook",
        "No analysis generated.",
        "Provide thoughtful analysis and a future outlook on {topic} in AI. \
Cover potential impacts, challenges, and opportunities in 1-2 forward-looking paragraphs.",
    ),
];

const SENTIMENT_PROMPTS: &[&str] = &[
    "Analyze the sentiment of the following text. Respond with ONLY one word: \
POSITIVE, NEGATIVE, or NEUTRAL.\nText: {text}",
    "What is the emotional tone of this text? Reply with a single word only: \
POSITIVE, NEGATIVE, or NEUTRAL.\nText: {text}",
    "Classify the sentiment expressed in this text as either POSITIVE, NEGATIVE, or NEUTRAL. \
Respond with only the classification word.\nText: {text}",
];

/// Sentiment labels in tie-break priority order
pub const SENTIMENT_LABELS: &[&str] = &["POSITIVE", "NEGATIVE", "NEUTRAL"];

/// The five-section AI newsletter plan
pub fn newsletter_plan() -> SectionPlan {
    let sections = NEWSLETTER_SECTIONS
        .iter()
        .map(|(label, title, fallback, body)| {
            Section::new(
                *label,
                *title,
                PromptTemplate::new(format!("{}\n{}", body, NO_COMMENTARY)),
            )
            .with_fallback(*fallback)
        })
        .collect();

    // Labels above are unique and non-empty
    SectionPlan::new(sections).unwrap_or_else(|e| unreachable!("built-in plan is valid: {e}"))
}

/// The three sentiment voter prompts
pub fn sentiment_prompts() -> Vec<PromptTemplate> {
    SENTIMENT_PROMPTS
        .iter()
        .map(|p| PromptTemplate::new(*p))
        .collect()
}

/// `POSITIVE`, `NEGATIVE`, `NEUTRAL`
pub fn sentiment_labels() -> LabelSet {
    LabelSet::new(SENTIMENT_LABELS.iter().copied())
        .unwrap_or_else(|e| unreachable!("built-in labels are valid: {e}"))
}
