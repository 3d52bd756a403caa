//! Question generation: one call to the text-generation service.

use serde_json::Value;
use tracing::{error, info, instrument, warn};

use pagegen_generation::{ChatMessage, CompletionRequest, TextGenerator};
use pagegen_shared::{
    PageGenError, Product, QuestionCategory, QuestionSet, Result, truncate_chars,
};

use crate::pipeline::PipelineState;

/// Minimum number of questions the prompt asks for.
pub const MIN_QUESTIONS: usize = 15;

/// How much of an unparseable response is kept for diagnostics.
pub const EXCERPT_CHARS: usize = 500;

/// Build the instruction sent to the service, embedding the product as
/// 2-space indented JSON.
pub fn build_prompt(product: &Product) -> Result<String> {
    let product_json = serde_json::to_string_pretty(product)
        .map_err(|e| PageGenError::validation(format!("JSON serialization failed: {e}")))?;

    let categories = QuestionCategory::ALL
        .iter()
        .map(QuestionCategory::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    let skeleton = QuestionCategory::ALL
        .iter()
        .map(|c| format!("  \"{c}\": [\"question\", ...]"))
        .collect::<Vec<_>>()
        .join(",\n");

    Ok(format!(
        "You write the questions real shoppers ask about a product.\n\
         \n\
         Base every question strictly on this product data:\n\
         \n\
         {product_json}\n\
         \n\
         Write at least {MIN_QUESTIONS} questions in total, grouped into these categories: {categories}.\n\
         \n\
         Reply with a single JSON object and nothing else, shaped like:\n\
         {{\n{skeleton}\n}}\n\
         \n\
         The reply must begin with {{ and end with }}. Do not use markdown code fences or add any commentary."
    ))
}

/// Parse the service's reply into a [`QuestionSet`].
///
/// The text is trimmed and must be a JSON object. Nothing else is checked.
pub fn parse_questions(text: &str) -> Result<QuestionSet> {
    let trimmed = text.trim();

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => Ok(QuestionSet(map)),
        Ok(other) => Err(malformed(
            format!("expected a JSON object, got {}", json_kind(&other)),
            trimmed,
        )),
        Err(e) => Err(malformed(e.to_string(), trimmed)),
    }
}

/// Ask the service for categorized questions about `product`.
#[instrument(skip_all, fields(product = %product.name, model = %model))]
pub async fn generate_questions<G: TextGenerator>(
    generator: &G,
    model: &str,
    product: &Product,
) -> Result<QuestionSet> {
    let request = CompletionRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::user(build_prompt(product)?)],
        temperature: 0.0,
    };

    let completion = generator.complete(&request).await?;
    let questions = parse_questions(&completion.text)?;

    let missing = questions.missing_categories();
    if !missing.is_empty() {
        warn!(?missing, "question set is missing categories");
    }

    info!(
        total = questions.total_questions(),
        categories = questions.as_map().len(),
        "generated questions"
    );

    Ok(questions)
}

/// Pipeline stage: fill `questions` from the parsed product.
pub async fn run<G: TextGenerator>(
    mut state: PipelineState,
    generator: &G,
    model: &str,
) -> Result<PipelineState> {
    let questions = generate_questions(generator, model, state.product()?).await?;
    state.questions = Some(questions);
    Ok(state)
}

fn malformed(message: String, text: &str) -> PageGenError {
    let excerpt = truncate_chars(text, EXCERPT_CHARS).to_string();
    error!(error = %message, response = %excerpt, "failed to parse question set");
    PageGenError::MalformedResponse { message, excerpt }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use pagegen_generation::{CannedGenerator, Completion};
    use pagegen_shared::RawProduct;

    fn product() -> Product {
        crate::parser::parse_product(&RawProduct::sample()).unwrap()
    }

    /// Generator that keeps every request it receives.
    struct RecordingGenerator {
        requests: Mutex<Vec<CompletionRequest>>,
        reply: String,
    }

    impl RecordingGenerator {
        fn new(reply: &str) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                reply: reply.to_string(),
            }
        }
    }

    impl TextGenerator for RecordingGenerator {
        async fn complete(&self, request: &CompletionRequest) -> Result<Completion> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(Completion {
                text: self.reply.clone(),
                model: request.model.clone(),
                tokens_in: 0,
                tokens_out: 0,
                latency_ms: 0,
            })
        }
    }

    #[test]
    fn prompt_embeds_indented_product_and_categories() {
        let prompt = build_prompt(&product()).unwrap();
        assert!(prompt.contains("{\n  \"name\": \"GlowBoost Vitamin C Serum\","));
        assert!(prompt.contains("\"price\": 699\n}"));
        assert!(prompt.contains("at least 15 questions"));
        for category in QuestionCategory::ALL {
            assert!(prompt.contains(&format!("\"{category}\"")), "missing {category}");
        }
    }

    #[test]
    fn exact_mapping_is_kept() {
        let text = r#"{"Informational":["Q1"],"Usage":[],"Safety":[],"Purchase":[],"Comparison":[]}"#;
        let set = parse_questions(text).unwrap();
        let expected: serde_json::Map<String, Value> = serde_json::from_str(text).unwrap();
        assert_eq!(set.as_map(), &expected);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let set = parse_questions("\n\n  {\"Usage\": [\"How?\"]}  \n").unwrap();
        assert_eq!(set.questions(QuestionCategory::Usage), vec!["How?"]);
    }

    #[test]
    fn prose_is_malformed() {
        match parse_questions("Sorry, I cannot help.") {
            Err(PageGenError::MalformedResponse { excerpt, .. }) => {
                assert_eq!(excerpt, "Sorry, I cannot help.");
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn non_object_json_is_malformed() {
        let err = parse_questions(r#"["Q1", "Q2"]"#).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn excerpt_is_capped() {
        let long = format!("not json {}", "x".repeat(2_000));
        match parse_questions(&long) {
            Err(PageGenError::MalformedResponse { excerpt, .. }) => {
                assert_eq!(excerpt.chars().count(), EXCERPT_CHARS);
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn fixture_response_covers_every_category() {
        let text = std::fs::read_to_string("../../../fixtures/json/questions.fixture.json")
            .expect("read questions fixture");
        let set = parse_questions(&text).unwrap();
        assert!(set.missing_categories().is_empty());
        assert!(set.total_questions() >= MIN_QUESTIONS);
    }

    #[tokio::test]
    async fn request_is_single_user_message_at_zero_temperature() {
        let generator = RecordingGenerator::new(r#"{"Usage":["How?"]}"#);
        let product = product();
        generate_questions(&generator, "test/model", &product)
            .await
            .unwrap();

        let requests = generator.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.model, "test/model");
        assert_eq!(request.temperature, 0.0);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
        assert!(
            request.messages[0]
                .content
                .contains(&build_prompt(&product).unwrap())
        );
    }

    #[tokio::test]
    async fn incomplete_categories_are_accepted() {
        let generator = CannedGenerator::new(r#"{"Usage":["How much?"],"Bonus":["Extra?"]}"#);
        let set = generate_questions(&generator, "m", &product()).await.unwrap();
        assert_eq!(set.missing_categories().len(), 4);
        assert!(set.as_map().contains_key("Bonus"));
    }

    #[tokio::test]
    async fn run_fails_on_prose_response() {
        let state = crate::parser::run(PipelineState::new(RawProduct::sample())).unwrap();
        let generator = CannedGenerator::new("Sorry, I cannot help.");
        let err = run(state, &generator, "m").await.unwrap_err();
        assert!(matches!(err, PageGenError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn run_requires_parsed_product() {
        let state = PipelineState::new(RawProduct::sample());
        let generator = CannedGenerator::new("{}");
        assert!(run(state, &generator, "m").await.is_err());
    }
}
