//! Prompt assembly for the voice agent and the transcript analysis modes.
//!
//! These are pure functions with no I/O. [`build_agent_prompt`] substitutes a
//! default for every missing field, so it always produces a usable prompt.
//! The analysis builders return a [`PromptPair`] whose user prompt embeds the
//! required JSON response shape as text; the downstream contract is that the
//! model replies with JSON somewhere in its output, possibly fenced.

use crate::types::{CompanyProfile, Scenario};

/// A `{system, user}` prompt pair for one LLM request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Context threaded into the coaching analysis prompt.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    pub scenario_name: Option<String>,
    pub call_duration_seconds: Option<u64>,
}

fn join_or(items: &[String], default: &str) -> String {
    if items.is_empty() {
        default.to_string()
    } else {
        items.join(", ")
    }
}

fn bullet_list(items: &[String], default: &str) -> String {
    if items.is_empty() {
        format!("- {default}")
    } else {
        items
            .iter()
            .map(|item| format!("- {item}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Build the roleplay prompt handed to the remote voice agent.
///
/// Interpolates the scenario persona fields and a small slice of company data
/// (name, quarterly price, services, first guarantee) into a fixed prose
/// template. Every missing field falls back to a neutral default.
pub fn build_agent_prompt(scenario: &Scenario, company: &CompanyProfile) -> String {
    let personality = scenario.personality.as_deref().unwrap_or("Average customer");
    let emotional_state = scenario.emotional_state.as_deref().unwrap_or("Neutral");
    let situation = if scenario.situation.is_empty() {
        "A routine service call"
    } else {
        scenario.situation.as_str()
    };
    let background = if scenario.customer_background.is_empty() {
        "An existing customer"
    } else {
        scenario.customer_background.as_str()
    };
    let first_guarantee = company
        .guarantees
        .first()
        .map(String::as_str)
        .unwrap_or("satisfaction guaranteed");

    format!(
        "You are roleplaying a customer on a phone call with a customer service \
         representative from {company_name}. Stay fully in character as the customer \
         for the entire call. Never reveal that you are an AI or that this is a \
         training exercise.\n\n\
         SITUATION: {situation}\n\
         YOUR BACKGROUND: {background}\n\n\
         PERSONALITY: {personality}\n\
         EMOTIONAL STATE: {emotional_state}\n\n\
         YOUR GOALS:\n{goals}\n\n\
         YOU ESCALATE IF THE REPRESENTATIVE: {escalation}\n\
         YOU CALM DOWN IF THE REPRESENTATIVE: {de_escalation}\n\n\
         POINTS YOU WANT TO RAISE:\n{key_points}\n\n\
         YOU CONSIDER THE CALL RESOLVED WHEN: {resolution}\n\n\
         WHAT YOU KNOW ABOUT THE COMPANY: {company_name} charges {quarterly} per \
         quarterly service, offers {services}, and promises \"{guarantee}\".\n\n\
         Speak naturally, one conversational turn at a time, and react to what the \
         representative actually says.{custom}",
        company_name = company.name,
        situation = situation,
        background = background,
        personality = personality,
        emotional_state = emotional_state,
        goals = bullet_list(&scenario.goals, "Get your issue handled politely"),
        escalation = join_or(&scenario.escalation_triggers, "is dismissive or unhelpful"),
        de_escalation = join_or(
            &scenario.de_escalation_responses,
            "listens and offers a concrete next step"
        ),
        key_points = bullet_list(&scenario.key_points, "Describe the problem in your own words"),
        resolution = join_or(
            &scenario.resolution_conditions,
            "you have a clear commitment with a date"
        ),
        quarterly = company.pricing.quarterly,
        services = join_or(&company.services, "general service"),
        guarantee = first_guarantee,
        custom = if scenario.system_prompt.is_empty() {
            String::new()
        } else {
            format!("\n\nSCENARIO DIRECTION: {}", scenario.system_prompt)
        },
    )
}

/// Build the coaching-analysis prompt pair for a finished call transcript.
pub fn build_coaching_prompt(transcript: &str, context: &AnalysisContext) -> PromptPair {
    let scenario_line = match &context.scenario_name {
        Some(name) => format!("Training scenario: {name}\n"),
        None => String::new(),
    };
    let duration_line = match context.call_duration_seconds {
        Some(seconds) => format!("Call duration: {seconds} seconds\n"),
        None => String::new(),
    };

    PromptPair {
        system: "You are an expert customer service coach. You score training calls \
                 between a customer service representative (csr) and a roleplayed \
                 customer, and you give specific, quote-backed feedback."
            .to_string(),
        user: format!(
            "{scenario_line}{duration_line}\
             Analyze the transcript below and respond with ONLY a JSON object in \
             exactly this shape:\n\
             {{\n  \
             \"overallScore\": <0-100>,\n  \
             \"categories\": {{\n    \
             \"rapport\": {{\"score\": <0-100>, \"feedback\": \"...\", \"quotes\": [\"...\"]}},\n    \
             \"discovery\": {{\"score\": <0-100>, \"feedback\": \"...\", \"quotes\": [\"...\"]}},\n    \
             \"solution\": {{\"score\": <0-100>, \"feedback\": \"...\", \"quotes\": [\"...\"]}},\n    \
             \"objectionHandling\": {{\"score\": <0-100>, \"feedback\": \"...\", \"quotes\": [\"...\"]}},\n    \
             \"closing\": {{\"score\": <0-100>, \"feedback\": \"...\", \"quotes\": [\"...\"]}}\n  \
             }},\n  \
             \"strengths\": [\"...\"],\n  \
             \"improvements\": [\"...\"],\n  \
             \"keyMoment\": {{\"quote\": \"...\", \"whyItMatters\": \"...\"}},\n  \
             \"summary\": \"...\",\n  \
             \"nextSteps\": [\"...\"]\n\
             }}\n\n\
             TRANSCRIPT:\n{transcript}"
        ),
    }
}

/// Build the intelligence-extraction prompt pair for unstructured company
/// text (a scraped website or a pasted transcript).
pub fn build_intelligence_prompt(text: &str) -> PromptPair {
    PromptPair {
        system: "You extract structured business facts from unstructured text about \
                 a company. Only report facts present in the text; omit fields you \
                 cannot support."
            .to_string(),
        user: format!(
            "Extract company facts from the text below and respond with ONLY a JSON \
             object in this shape (omit unknown fields):\n\
             {{\n  \
             \"companyName\": \"...\",\n  \
             \"phone\": \"...\",\n  \
             \"website\": \"...\",\n  \
             \"services\": [\"...\"],\n  \
             \"serviceAreas\": [\"...\"],\n  \
             \"pricing\": {{\"quarterly\": \"...\", \"initial\": \"...\"}},\n  \
             \"guarantees\": [\"...\"],\n  \
             \"valueProps\": [\"...\"],\n  \
             \"hours\": \"...\"\n\
             }}\n\n\
             TEXT:\n{text}"
        ),
    }
}

/// Build the sentiment-classification prompt pair for a short text.
pub fn build_sentiment_prompt(text: &str) -> PromptPair {
    PromptPair {
        system: "You classify the emotional sentiment of customer service text."
            .to_string(),
        user: format!(
            "Classify the sentiment of the text below and respond with ONLY a JSON \
             object in this shape:\n\
             {{\"sentiment\": \"angry\" | \"frustrated\" | \"neutral\" | \"satisfied\" | \"happy\", \
             \"confidence\": <0.0-1.0>}}\n\n\
             TEXT:\n{text}"
        ),
    }
}
