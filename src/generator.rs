use serde_json::{Deserializer, Map, Value};
use tracing::{debug, info, warn};
use crate::AppState;
use crate::api::models::RepurposedContent;
use crate::error::{AppError, Result, SchemaField};
use crate::llm::{call_gemini, GenerationConfig};
use crate::prompt::build_prompt;

pub const META_DESCRIPTION_MAX_CHARS: usize = 160;
pub const YOUTUBE_TITLE_MAX_CHARS: usize = 80;

const FENCE: &str = "```";

/// Runs the prompt through Gemini and validates the reply into [`RepurposedContent`].
pub async fn generate(state: &AppState, blog_content: &str) -> Result<RepurposedContent> {
    let config = &state.config;
    let api_key = config.gemini_key()?;
    let prompt = build_prompt(blog_content);
    debug!(prompt_chars = prompt.len(), model = %config.gemini_model, "Calling Gemini");

    let raw = call_gemini(
        &state.client,
        &config.gemini_api_url,
        api_key,
        &config.gemini_model,
        &prompt,
        GenerationConfig::default(),
    )
    .await?;
    info!(response_chars = raw.len(), "Gemini response received");

    let content = parse_generation(&raw)?;
    info!("Generated content passed validation");
    Ok(content)
}

/// Cleans, extracts and validates a raw model reply. Pure: no I/O.
pub fn parse_generation(raw: &str) -> Result<RepurposedContent> {
    let cleaned = clean_response(raw);
    let object = extract_json_object(cleaned)?;
    validate(&object).map_err(AppError::SchemaViolation)
}

/// Strips surrounding code fences and a bare leading `json` label.
pub fn clean_response(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        // Drop the info string on the opening fence, e.g. ```json
        text = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    }
    if let Some(rest) = text.trim_end().strip_suffix(FENCE) {
        text = rest;
    }
    text = text.trim();

    if text.get(..4).is_some_and(|label| label.eq_ignore_ascii_case("json")) {
        text = text[4..].trim_start();
    }

    text
}

/// Parses the top-level object opening at the first `{`, ignoring anything after it.
pub fn extract_json_object(text: &str) -> Result<Map<String, Value>> {
    let Some(start) = text.find('{') else {
        let preview: String = text.chars().take(300).collect();
        debug!(%preview, "Could not locate JSON in model output");
        return Err(AppError::GenerationFailed("AI did not return valid JSON format".to_string()));
    };

    let mut stream = Deserializer::from_str(&text[start..]).into_iter::<Value>();
    match stream.next() {
        Some(Ok(Value::Object(map))) => Ok(map),
        Some(Err(e)) => {
            warn!(error = %e, "Model output contained malformed JSON");
            Err(AppError::GenerationFailed(format!("AI returned malformed JSON: {}", e)))
        }
        // A value starting with `{` can only be an object
        Some(Ok(_)) | None => Err(AppError::GenerationFailed("AI did not return valid JSON format".to_string())),
    }
}

/// Accepts the object only if every field holds; the first failing field is reported.
pub fn validate(object: &Map<String, Value>) -> std::result::Result<RepurposedContent, SchemaField> {
    let linkedin_posts = string_triple(object.get("linkedinPosts")).ok_or(SchemaField::LinkedinPosts)?;
    let twitter_threads = string_triple(object.get("twitterThreads")).ok_or(SchemaField::TwitterThreads)?;

    let meta_description = bounded_string(object.get("metaDescription"), Some(META_DESCRIPTION_MAX_CHARS))
        .ok_or(SchemaField::MetaDescription)?;
    let youtube_title = bounded_string(object.get("youtubeTitle"), Some(YOUTUBE_TITLE_MAX_CHARS))
        .ok_or(SchemaField::YoutubeTitle)?;
    let youtube_description = bounded_string(object.get("youtubeDescription"), None)
        .ok_or(SchemaField::YoutubeDescription)?;

    Ok(RepurposedContent {
        linkedin_posts,
        twitter_threads,
        meta_description,
        youtube_title,
        youtube_description,
    })
}

fn string_triple(value: Option<&Value>) -> Option<[String; 3]> {
    match value? {
        Value::Array(items) => match items.as_slice() {
            [Value::String(a), Value::String(b), Value::String(c)] => Some([a.clone(), b.clone(), c.clone()]),
            _ => None,
        },
        _ => None,
    }
}

fn bounded_string(value: Option<&Value>, max_chars: Option<usize>) -> Option<String> {
    let text = value?.as_str()?;
    if text.is_empty() {
        return None;
    }
    match max_chars {
        Some(max) if text.chars().count() > max => None,
        _ => Some(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_object() -> Value {
        json!({
            "linkedinPosts": ["a", "b", "c"],
            "twitterThreads": ["d", "e", "f"],
            "metaDescription": "x",
            "youtubeTitle": "y",
            "youtubeDescription": "z"
        })
    }

    fn expected() -> RepurposedContent {
        RepurposedContent {
            linkedin_posts: ["a".into(), "b".into(), "c".into()],
            twitter_threads: ["d".into(), "e".into(), "f".into()],
            meta_description: "x".into(),
            youtube_title: "y".into(),
            youtube_description: "z".into(),
        }
    }

    fn rejected_field(raw: &str) -> SchemaField {
        match parse_generation(raw) {
            Err(AppError::SchemaViolation(field)) => field,
            other => panic!("expected schema violation, got {:?}", other),
        }
    }

    fn mutated(key: &str, value: Value) -> String {
        let mut object = valid_object();
        object[key] = value;
        object.to_string()
    }

    #[test]
    fn fenced_json_is_recovered() {
        let raw = "```json\n{\"linkedinPosts\":[\"a\",\"b\",\"c\"],\"twitterThreads\":[\"d\",\"e\",\"f\"],\"metaDescription\":\"x\",\"youtubeTitle\":\"y\",\"youtubeDescription\":\"z\"}\n```";
        assert_eq!(parse_generation(raw).unwrap(), expected());
    }

    #[test]
    fn bare_and_labelled_json_are_recovered() {
        let body = valid_object().to_string();
        assert_eq!(parse_generation(&body).unwrap(), expected());
        assert_eq!(parse_generation(&format!("JSON\n{}", body)).unwrap(), expected());
        assert_eq!(parse_generation(&format!("```\n{}\n```", body)).unwrap(), expected());
    }

    #[test]
    fn prose_around_the_object_is_ignored() {
        let raw = format!("Sure! Here is your content:\n{}\nLet me know if you want {{changes}}.", valid_object());
        assert_eq!(parse_generation(&raw).unwrap(), expected());
    }

    #[test]
    fn braces_inside_strings_do_not_confuse_extraction() {
        let mut object = valid_object();
        object["youtubeDescription"] = json!("Use {curly} braces } freely");
        let parsed = parse_generation(&object.to_string()).unwrap();
        assert_eq!(parsed.youtube_description, "Use {curly} braces } freely");
    }

    #[test]
    fn clean_response_strips_fences_and_label() {
        assert_eq!(clean_response("  ```json\n{}\n```  "), "{}");
        assert_eq!(clean_response("```JSON{}```"), "{}");
        assert_eq!(clean_response("json {}"), "{}");
        assert_eq!(clean_response("{}"), "{}");
    }

    #[test]
    fn missing_object_is_reported() {
        let err = parse_generation("I'm sorry, I can't help with that.").unwrap_err();
        assert!(matches!(err, AppError::GenerationFailed(ref msg) if msg == "AI did not return valid JSON format"));
    }

    #[test]
    fn malformed_object_is_a_hard_failure() {
        let err = parse_generation("{\"linkedinPosts\": [\"a\", \"b\",").unwrap_err();
        assert!(matches!(err, AppError::GenerationFailed(ref msg) if msg.starts_with("AI returned malformed JSON")));
    }

    #[test]
    fn unclosed_outer_object_is_not_recovered_from_its_child() {
        let raw = format!("{{\"draft\": {}", valid_object());
        let err = parse_generation(&raw).unwrap_err();
        assert!(matches!(err, AppError::GenerationFailed(ref msg) if msg.starts_with("AI returned malformed JSON")));
    }

    #[test]
    fn malformed_object_before_a_valid_one_is_a_hard_failure() {
        let raw = format!("{{\"linkedinPosts\": [}}\n{}", valid_object());
        assert!(matches!(parse_generation(&raw), Err(AppError::GenerationFailed(_))));
    }

    #[test]
    fn two_linkedin_posts_are_rejected() {
        let raw = mutated("linkedinPosts", json!(["a", "b"]));
        assert_eq!(rejected_field(&raw), SchemaField::LinkedinPosts);
    }

    #[test]
    fn non_string_linkedin_post_is_rejected() {
        let raw = mutated("linkedinPosts", json!(["a", 2, "c"]));
        assert_eq!(rejected_field(&raw), SchemaField::LinkedinPosts);
    }

    #[test]
    fn four_twitter_threads_are_rejected() {
        let raw = mutated("twitterThreads", json!(["d", "e", "f", "g"]));
        assert_eq!(rejected_field(&raw), SchemaField::TwitterThreads);
    }

    #[test]
    fn two_twitter_threads_are_rejected() {
        let raw = mutated("twitterThreads", json!(["d", "e"]));
        assert_eq!(rejected_field(&raw), SchemaField::TwitterThreads);
    }

    #[test]
    fn non_string_twitter_thread_is_rejected() {
        let raw = mutated("twitterThreads", json!(["d", {"text": "e"}, "f"]));
        assert_eq!(rejected_field(&raw), SchemaField::TwitterThreads);
    }

    #[test]
    fn empty_meta_description_is_rejected() {
        let raw = mutated("metaDescription", json!(""));
        assert_eq!(rejected_field(&raw), SchemaField::MetaDescription);
    }

    #[test]
    fn long_meta_description_is_rejected() {
        let raw = mutated("metaDescription", json!("m".repeat(200)));
        assert_eq!(rejected_field(&raw), SchemaField::MetaDescription);

        let at_cap = mutated("metaDescription", json!("m".repeat(META_DESCRIPTION_MAX_CHARS)));
        assert!(parse_generation(&at_cap).is_ok());
    }

    #[test]
    fn long_youtube_title_is_rejected() {
        let raw = mutated("youtubeTitle", json!("t".repeat(YOUTUBE_TITLE_MAX_CHARS + 1)));
        assert_eq!(rejected_field(&raw), SchemaField::YoutubeTitle);

        let at_cap = mutated("youtubeTitle", json!("t".repeat(YOUTUBE_TITLE_MAX_CHARS)));
        assert_eq!(parse_generation(&at_cap).unwrap().youtube_title.chars().count(), YOUTUBE_TITLE_MAX_CHARS);
    }

    #[test]
    fn empty_or_wrong_typed_youtube_title_is_rejected() {
        assert_eq!(rejected_field(&mutated("youtubeTitle", json!(""))), SchemaField::YoutubeTitle);
        assert_eq!(rejected_field(&mutated("youtubeTitle", json!(42))), SchemaField::YoutubeTitle);
    }

    #[test]
    fn empty_or_missing_youtube_description_is_rejected() {
        assert_eq!(rejected_field(&mutated("youtubeDescription", json!(""))), SchemaField::YoutubeDescription);

        let mut object = valid_object();
        object.as_object_mut().unwrap().remove("youtubeDescription");
        assert_eq!(rejected_field(&object.to_string()), SchemaField::YoutubeDescription);
    }

    #[test]
    fn wrong_typed_meta_description_is_rejected() {
        let raw = mutated("metaDescription", json!(["x"]));
        assert_eq!(rejected_field(&raw), SchemaField::MetaDescription);
    }

    #[test]
    fn verdict_is_stable_across_calls() {
        let good = valid_object().to_string();
        let bad = mutated("linkedinPosts", json!(["a", "b"]));
        for _ in 0..3 {
            assert_eq!(parse_generation(&good).unwrap(), expected());
            assert_eq!(rejected_field(&bad), SchemaField::LinkedinPosts);
        }
    }
}
