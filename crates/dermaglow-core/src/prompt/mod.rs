//! Prompt builder for consultation exchanges.
//!
//! Deterministically renders model-facing instructions from an assessment
//! snapshot, transcript history, and the new question. Pure transformation:
//! no clock, no randomness, no I/O -- identical inputs produce identical
//! output, which the tests rely on.
//!
//! Four rendering modes:
//! - [`ConsultPromptBuilder::chat`]: assessment + last 6 turns + new question
//! - [`ConsultPromptBuilder::welcome`]: templated session-start message (no model call)
//! - [`ConsultPromptBuilder::report`]: assessment + full transcript, requesting a report
//! - [`ConsultPromptBuilder::weather_recommendation`]: current conditions advice

pub mod starters;

use dermaglow_types::assessment::Assessment;
use dermaglow_types::llm::{CompletionRequest, Message};
use dermaglow_types::session::{SessionMessage, Turn};
use dermaglow_types::weather::WeatherReport;

use self::starters::starter_recommendations;

/// Placeholder rendered for any absent assessment field.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Number of trailing transcript turns included in a chat request.
pub const HISTORY_WINDOW: usize = 6;

/// Token ceiling for the weather recommendation call.
const WEATHER_MAX_TOKENS: u32 = 500;

/// Per-request model settings, injected from configuration.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Builds model-facing instructions for consultation sessions.
pub struct ConsultPromptBuilder;

impl ConsultPromptBuilder {
    /// Build the chat-mode request: system instruction from the assessment,
    /// the last [`HISTORY_WINDOW`] turns role-tagged, then the new question.
    pub fn chat(
        settings: &ChatSettings,
        assessment: &Assessment,
        history: &[SessionMessage],
        question: &str,
    ) -> CompletionRequest {
        let recent = &history[history.len().saturating_sub(HISTORY_WINDOW)..];

        let mut messages: Vec<Message> = recent
            .iter()
            .map(|m| Message {
                role: m.turn.role(),
                content: m.turn.text().to_string(),
            })
            .collect();
        messages.push(Message::user(question));

        CompletionRequest {
            model: settings.model.clone(),
            system: Some(Self::chat_system_prompt(assessment, question)),
            messages,
            max_tokens: settings.max_tokens,
            temperature: Some(settings.temperature),
        }
    }

    /// Build the one-shot welcome message shown when a session starts.
    ///
    /// Fully templated -- no model call is made for this text.
    pub fn welcome(assessment: &Assessment) -> String {
        let specific_issues = assessment.specific_issues_text();
        let specific_issues_line = specific_issues
            .as_deref()
            .map(|text| format!("**Specific Issues:** {text}\n\n"))
            .unwrap_or_default();

        let starters = starter_recommendations(
            assessment.main_concern.as_deref(),
            assessment.skin_type.as_deref(),
        );

        format!(
            "## Your Skin Assessment Analysis

Based on your assessment, here's what I understand about your skin profile:

**Skin Type:** {skin_type}
**Main Concern:** {main_concern}
{specific_issues_line}**Current Routine:** {routine}
**Environment:** {work_env} work environment, {climate} climate
**Lifestyle:** {exercise} exercise, {stress} stress levels

---

{starters}

---

## What would you like to focus on?

You can ask me about:

- Detailed recommendations for your {concern_topic}
- Daily skincare routine suggestions for your skin type
- Specific products available in Pakistan for your concerns
- How to address {issues_topic}
- Diet and lifestyle adjustments for better skin

How can I help you improve your skin today?",
            skin_type = field(&assessment.skin_type),
            main_concern = field(&assessment.main_concern),
            routine = field(&assessment.current_routine),
            work_env = field(&assessment.work_environment),
            climate = assessment.climate_type.as_deref().unwrap_or("unspecified"),
            exercise = assessment
                .exercise_frequency
                .as_deref()
                .unwrap_or("Unspecified"),
            stress = assessment.stress_level.as_deref().unwrap_or("unspecified"),
            concern_topic = assessment
                .main_concern
                .as_deref()
                .unwrap_or("skin concerns"),
            issues_topic = specific_issues
                .as_deref()
                .unwrap_or("your specific skin issues"),
        )
    }

    /// Build the report-mode request: assessment profile plus the entire
    /// supplied transcript, asking for a structured markdown report.
    pub fn report(
        settings: &ChatSettings,
        assessment: &Assessment,
        transcript: &[SessionMessage],
    ) -> CompletionRequest {
        let history: Vec<String> = transcript
            .iter()
            .map(|m| match &m.turn {
                Turn::User(text) => format!("User: {text}"),
                Turn::Assistant(text) => format!("Assistant: {text}"),
            })
            .collect();

        let system = format!(
            "You are a skincare assistant. Based on the following chat context and user profile, generate a detailed skincare report in Markdown format:

### User Profile:
- Skin Type: {skin_type}
- Main Concern: {main_concern}
- Additional Concerns: {additional}
- Specific Issues: {issues}
- Current Routine: {routine}
- Sunscreen Usage: {sunscreen}

### Chat History:
{history}

### Report:
Generate a comprehensive skincare report including product recommendations, precautionary measures, routines, and tips. Format in clean Markdown.",
            skin_type = field(&assessment.skin_type),
            main_concern = field(&assessment.main_concern),
            additional = assessment
                .additional_skin_concerns
                .as_deref()
                .unwrap_or("None mentioned"),
            issues = assessment
                .specific_issues_text()
                .unwrap_or_else(|| "None specified".to_string()),
            routine = field(&assessment.current_routine),
            sunscreen = field(&assessment.sunscreen_usage),
            history = history.join("\n"),
        );

        CompletionRequest {
            model: settings.model.clone(),
            system: Some(system),
            messages: Vec::new(),
            max_tokens: settings.max_tokens,
            temperature: Some(settings.temperature),
        }
    }

    /// Build the weather-recommendation request from normalized conditions.
    pub fn weather_recommendation(
        settings: &ChatSettings,
        weather: &WeatherReport,
    ) -> CompletionRequest {
        let system = format!(
            "You are an AI skincare expert providing general skincare advice based on current weather conditions.

### Current Weather Conditions:
- **Location:** {city}, {country}
- **Temperature:** {temp}\u{b0}C (Feels like {feels_like}\u{b0}C)
- **Humidity:** {humidity}
- **Condition:** {condition}
- **Wind Speed:** {wind} m/s

### Your Task:
Provide general skincare recommendations, precautions, and tips based on these weather conditions.

### Guidelines:
1. **Response Format**: Always respond in clean Markdown format with:
   - Headings (##, ###)
   - Bold text (**text**)
   - Bullet points (-)
   - Numbered lists when appropriate

2. **Content Structure**:
   - Start with a brief summary of weather impact on skin
   - Provide specific recommendations (cleansing, moisturizing, protection)
   - Include precautionary measures
   - Mention any product suggestions if relevant
   - Keep it concise but actionable (2-3 short paragraphs max)

3. **Focus Areas**:
   - Sun protection needs
   - Hydration requirements
   - Cleansing frequency
   - Product recommendations (general, not personalized)
   - Precautions to avoid

Remember: Format your response in clean Markdown. Keep it friendly, practical, and easy to read.",
            city = weather.city,
            country = weather.country,
            temp = weather.temperature,
            feels_like = weather.feels_like,
            humidity = weather
                .humidity
                .map(|h| format!("{h}%"))
                .unwrap_or_else(|| "unknown".to_string()),
            condition = weather.condition,
            wind = weather.wind_speed,
        );

        CompletionRequest {
            model: settings.model.clone(),
            system: Some(system),
            messages: vec![Message::user(
                "Provide skincare recommendations based on the weather conditions provided.",
            )],
            max_tokens: WEATHER_MAX_TOKENS,
            temperature: Some(settings.temperature),
        }
    }

    /// The chat-mode system instruction: assessment rendered field-by-field
    /// plus the current question.
    fn chat_system_prompt(assessment: &Assessment, question: &str) -> String {
        format!(
            "You are an AI Medical Assistant specializing in skincare. Your role is to provide personalized skincare advice based on the user's assessment data and their ongoing queries.

### Key Principles:
1. **Response Format**: Always respond in clean Markdown format. Use markdown for:
   - Headings (##, ###)
   - Bold text (**text**)
   - Lists (- or 1.)
   - Code blocks when needed (`code`)

2. **Solution-First Approach**: Prioritize providing helpful solutions rather than asking excessive questions.

3. **Product Recommendations**: Recommend specific products available in Pakistan with:
   - Product name
   - Key ingredients
   - How to use
   - Price ranges when possible

4. **Response Structure**:
   - Use headings for sections (## Morning Routine, ## Evening Routine)
   - Use numbered lists for steps
   - Use bullet points for features/benefits
   - Keep responses concise but detailed when needed

### User's Assessment Data:
**Skin Type:** {skin_type}
**Main Concern:** {main_concern}
**Additional Concerns:** {additional}
**Specific Issues:** {issues}
**Current Routine:** {routine}
**Sunscreen Usage:** {sunscreen}
**Climate:** {climate}
**Work Environment:** {work_env}
**Product Usage Frequency:** {product_freq}
**Skin Texture:** {texture}

### User's Current Question:
{question}

Remember: Format your response in clean Markdown. Use headings, lists, and bold text appropriately for better readability.",
            skin_type = field(&assessment.skin_type),
            main_concern = field(&assessment.main_concern),
            additional = assessment
                .additional_skin_concerns
                .as_deref()
                .unwrap_or("None mentioned"),
            issues = assessment
                .specific_issues_text()
                .unwrap_or_else(|| "None specified".to_string()),
            routine = field(&assessment.current_routine),
            sunscreen = field(&assessment.sunscreen_usage),
            climate = field(&assessment.climate_type),
            work_env = field(&assessment.work_environment),
            product_freq = field(&assessment.product_usage_frequency),
            texture = field(&assessment.skin_texture_description),
        )
    }
}

/// Render an optional assessment field, substituting the fixed placeholder.
fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_SPECIFIED)
}
