//! Recommendation requests and the positional tuples the scorer returns.
//!
//! [`RecommendationRequest`] is the loosely-typed body accepted by
//! `POST /run-python`. [`RecommendationRequest::resolve`] validates it and
//! applies defaults, producing a [`ResolvedRequest`] whose
//! [`to_args`](ResolvedRequest::to_args) is the scorer's argument vector.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::dsld;

/// Brand passed to the scorer when the caller gives none.
pub const DEFAULT_BRAND: &str = "Vega";

/// Maximum number of entries the client view displays.
pub const MAX_DISPLAYED: usize = 10;

/// Fixed user-facing message for any scorer run that did not exit cleanly.
pub const SCORER_FAILED_MESSAGE: &str = "Description is not specific enough, hence, no detection.";

/// Errors produced while turning a request into recommendations.
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    /// Required fields were missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The scorer exited non-zero, timed out, overflowed its output cap, or
    /// could not be started. `reason` is for logs only.
    #[error("Scorer execution failed: {reason}")]
    ScorerExecution { reason: String },

    /// The scorer exited 0 but stdout was not JSON.
    #[error("Scorer produced malformed output")]
    ScorerOutput { details: String },
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Raw request body. Every field is optional and loosely typed at this
/// layer so missing values can be reported as validation errors rather than
/// JSON rejections. Text fields accept any JSON value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// A number or a numeric string.
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub brand: Option<Value>,
    /// A boolean or a `"true"`/`"false"` string.
    #[serde(default)]
    pub market_status: Option<Value>,
    #[serde(default)]
    pub allergies: Option<Value>,
}

/// A validated request with every default applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct ResolvedRequest {
    #[validate(range(min = 1, message = "age must be a positive integer"))]
    pub age: u32,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    pub brand: String,
    pub market_status: bool,
    pub allergies: String,
}

impl RecommendationRequest {
    /// Validate required fields and fill in defaults.
    ///
    /// `age` and `description` are required. A zero age, an empty
    /// description, or an age that is not a whole number all count as
    /// missing.
    pub fn resolve(&self) -> Result<ResolvedRequest, RecommendError> {
        let age = self.age.as_ref().and_then(parse_age);
        let description = self
            .description
            .as_ref()
            .and_then(text_of)
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let (Some(age), Some(description)) = (age, description) else {
            return Err(RecommendError::Validation(
                "age and description are required".to_string(),
            ));
        };

        let brand = self
            .brand
            .as_ref()
            .and_then(text_of)
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| DEFAULT_BRAND.to_string());

        let resolved = ResolvedRequest {
            age,
            description,
            brand,
            market_status: self
                .market_status
                .as_ref()
                .map(parse_market_status)
                .unwrap_or(false),
            allergies: self.allergies.as_ref().and_then(text_of).unwrap_or_default(),
        };

        resolved
            .validate()
            .map_err(|e| RecommendError::Validation(e.to_string()))?;

        Ok(resolved)
    }
}

impl ResolvedRequest {
    /// Named arguments for the scorer, one argv element per flag and value.
    pub fn to_args(&self) -> Vec<String> {
        vec![
            "--age".to_string(),
            self.age.to_string(),
            "--brand".to_string(),
            self.brand.clone(),
            "--market_status".to_string(),
            market_status_flag(self.market_status).to_string(),
            "--description".to_string(),
            self.description.clone(),
            "--allergies".to_string(),
            self.allergies.clone(),
        ]
    }
}

/// Python-style boolean literal; the scorer compares it case-insensitively.
fn market_status_flag(on: bool) -> &'static str {
    if on {
        "True"
    } else {
        "False"
    }
}

fn parse_age(value: &Value) -> Option<u32> {
    let age = match value {
        Value::Number(n) => match n.as_u64() {
            Some(v) => u32::try_from(v).ok(),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u32),
        },
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }?;
    (age > 0).then_some(age)
}

/// Text form of a loosely typed field. Strings pass through, arrays are
/// joined with commas, other scalars use their JSON text, `null` is absent.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| text_of(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}

fn parse_market_status(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Result tuples
// ---------------------------------------------------------------------------

/// One positional recommendation tuple as emitted by the scorer.
///
/// The JSON is kept as-is (so saving it back round-trips exactly); the
/// accessors name the positions the UI relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationEntry(pub Value);

impl RecommendationEntry {
    const SOURCE_URL: usize = 0;
    const TITLE: usize = 2;
    const MAKER: usize = 3;
    const HOVER_TEXT: usize = 13;

    fn text_at(&self, index: usize) -> Option<&str> {
        self.0.get(index).and_then(Value::as_str)
    }

    /// Label page URL of the product.
    pub fn source_url(&self) -> Option<&str> {
        self.text_at(Self::SOURCE_URL)
    }

    /// Display title.
    pub fn title(&self) -> Option<&str> {
        self.text_at(Self::TITLE)
    }

    /// Maker / brand name.
    pub fn maker(&self) -> Option<&str> {
        self.text_at(Self::MAKER)
    }

    /// Supplementary text shown on hover.
    pub fn hover_text(&self) -> Option<&str> {
        self.text_at(Self::HOVER_TEXT)
    }

    /// Direct PDF URL derived from [`source_url`](Self::source_url).
    pub fn pdf_url(&self) -> Option<String> {
        self.source_url().and_then(dsld::label_pdf_url)
    }
}

/// Pull the first [`MAX_DISPLAYED`] entries out of a scorer payload.
///
/// Returns `None` when the payload has no `recommendations` array.
pub fn top_recommendations(payload: &Value) -> Option<Vec<RecommendationEntry>> {
    let list = payload.get("recommendations")?.as_array()?;
    Some(
        list.iter()
            .take(MAX_DISPLAYED)
            .cloned()
            .map(RecommendationEntry)
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn request(body: Value) -> RecommendationRequest {
        serde_json::from_value(body).expect("request body")
    }

    #[test]
    fn missing_age_is_validation_error() {
        let req = request(json!({"description": "dry eyes"}));
        assert_matches!(req.resolve(), Err(RecommendError::Validation(_)));
    }

    #[test]
    fn missing_description_is_validation_error() {
        let req = request(json!({"age": 30}));
        assert_matches!(req.resolve(), Err(RecommendError::Validation(_)));
    }

    #[test]
    fn falsy_required_fields_count_as_missing() {
        for body in [
            json!({"age": 0, "description": "dry eyes"}),
            json!({"age": "", "description": "dry eyes"}),
            json!({"age": null, "description": "dry eyes"}),
            json!({"age": 30, "description": ""}),
            json!({"age": 30, "description": "   "}),
            json!({"age": "thirty", "description": "dry eyes"}),
            json!({"age": 30.5, "description": "dry eyes"}),
        ] {
            let req = request(body.clone());
            assert_matches!(
                req.resolve(),
                Err(RecommendError::Validation(_)),
                "expected validation error for {body}"
            );
        }
    }

    #[test]
    fn defaults_applied_when_optional_fields_absent() {
        let resolved = request(json!({"age": 30, "description": "dry eyes"}))
            .resolve()
            .expect("valid");
        assert_eq!(
            resolved,
            ResolvedRequest {
                age: 30,
                description: "dry eyes".to_string(),
                brand: "Vega".to_string(),
                market_status: false,
                allergies: String::new(),
            }
        );
    }

    #[test]
    fn empty_brand_falls_back_to_default() {
        let resolved = request(json!({"age": 30, "description": "x", "brand": ""}))
            .resolve()
            .expect("valid");
        assert_eq!(resolved.brand, DEFAULT_BRAND);
    }

    #[test]
    fn numeric_string_age_is_accepted() {
        let resolved = request(json!({"age": "25", "description": "x"}))
            .resolve()
            .expect("valid");
        assert_eq!(resolved.age, 25);

        let resolved = request(json!({"age": 40.0, "description": "x"}))
            .resolve()
            .expect("valid");
        assert_eq!(resolved.age, 40);
    }

    #[test]
    fn market_status_accepts_bool_and_string() {
        for (raw, expected) in [
            (json!(true), true),
            (json!(false), false),
            (json!("true"), true),
            (json!("True"), true),
            (json!("False"), false),
            (json!("yes"), false),
            (json!(1), false),
        ] {
            let resolved = request(json!({"age": 30, "description": "x", "market_status": raw}))
                .resolve()
                .expect("valid");
            assert_eq!(resolved.market_status, expected, "market_status {raw}");
        }
    }

    #[test]
    fn non_string_text_fields_are_stringified() {
        let resolved = request(json!({
            "age": 30,
            "description": 42,
            "brand": null,
            "allergies": ["nuts", "milk"]
        }))
        .resolve()
        .expect("valid");
        assert_eq!(resolved.description, "42");
        assert_eq!(resolved.brand, DEFAULT_BRAND);
        assert_eq!(resolved.allergies, "nuts,milk");
    }

    #[test]
    fn args_are_named_and_unquoted() {
        let resolved = request(json!({
            "age": 30,
            "description": "dry \"eyes\"; echo pwned",
            "brand": "Nature's Way",
            "market_status": true,
            "allergies": "nuts, milk"
        }))
        .resolve()
        .expect("valid");

        assert_eq!(
            resolved.to_args(),
            vec![
                "--age",
                "30",
                "--brand",
                "Nature's Way",
                "--market_status",
                "True",
                "--description",
                "dry \"eyes\"; echo pwned",
                "--allergies",
                "nuts, milk",
            ]
        );
    }

    #[test]
    fn default_market_status_flag_is_false_sentinel() {
        let resolved = request(json!({"age": 30, "description": "x"}))
            .resolve()
            .expect("valid");
        let args = resolved.to_args();
        let pos = args
            .iter()
            .position(|a| a == "--market_status")
            .expect("flag present");
        assert_eq!(args[pos + 1], "False");
    }

    #[test]
    fn entry_accessors_read_known_positions() {
        let mut tuple: Vec<Value> = (0..14).map(|i| json!(format!("f{i}"))).collect();
        tuple[0] = json!("https://dsld.od.nih.gov/label/12345");
        tuple[2] = json!("Omega-3 Eye Support");
        tuple[3] = json!("Vega");
        tuple[13] = json!("Take with food.");
        let entry = RecommendationEntry(Value::Array(tuple));

        assert_eq!(entry.source_url(), Some("https://dsld.od.nih.gov/label/12345"));
        assert_eq!(entry.title(), Some("Omega-3 Eye Support"));
        assert_eq!(entry.maker(), Some("Vega"));
        assert_eq!(entry.hover_text(), Some("Take with food."));
        assert_eq!(
            entry.pdf_url().as_deref(),
            Some("https://api.ods.od.nih.gov/dsld/s3/pdf/12345.pdf")
        );
    }

    #[test]
    fn entry_accessors_tolerate_short_tuples() {
        let entry = RecommendationEntry(json!(["https://dsld.od.nih.gov/label/1"]));
        assert_eq!(entry.title(), None);
        assert_eq!(entry.hover_text(), None);
    }

    #[test]
    fn top_recommendations_caps_at_ten_in_order() {
        let list: Vec<Value> = (0..15).map(|i| json!([i])).collect();
        let top = top_recommendations(&json!({"recommendations": list})).expect("present");
        assert_eq!(top.len(), MAX_DISPLAYED);
        for (i, entry) in top.iter().enumerate() {
            assert_eq!(entry.0, json!([i]));
        }
    }

    #[test]
    fn top_recommendations_absent_key() {
        assert!(top_recommendations(&json!({"error": "nope"})).is_none());
        assert!(top_recommendations(&json!({"recommendations": "nope"})).is_none());
    }
}
