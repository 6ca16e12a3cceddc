use gloo_net::http::{Request, Response};
use serde_json::Value;
use urlencoding::encode;

use crate::error::{Error, Result};
use crate::model::ActivityMap;

/// What the server said about a signup or unregister request that did get a reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// 2xx, carrying `message` when the body had a string one.
    Accepted(Option<String>),
    /// Any other status, carrying `detail` when the body had a string one.
    Rejected(Option<String>),
}

fn text_field(reply: &Value, key: &str) -> Option<String> {
    match reply.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Turns a reply into an outcome. Any JSON value other than `null` is a
/// reply; non-objects just carry no text. A body that is not JSON, or is
/// `null`, is a decode error and is handled like a failed request.
pub fn classify(ok: bool, body: &str) -> Result<ActionOutcome> {
    let reply: Value = serde_json::from_str(body)?;
    if reply.is_null() {
        let null = <serde_json::Error as serde::de::Error>::custom("reply body is null");
        return Err(Error::Decode(null));
    }
    Ok(if ok {
        ActionOutcome::Accepted(text_field(&reply, "message"))
    } else {
        ActionOutcome::Rejected(text_field(&reply, "detail"))
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    pub fn activities_url(&self) -> String {
        format!("{}/activities", self.base)
    }

    pub fn signup_url(&self, activity: &str, email: &str) -> String {
        format!(
            "{}/activities/{}/signup?email={}",
            self.base,
            encode(activity),
            encode(email)
        )
    }

    pub fn participants_url(&self, activity: &str, email: &str) -> String {
        format!(
            "{}/activities/{}/participants?email={}",
            self.base,
            encode(activity),
            encode(email)
        )
    }

    pub async fn list_activities(&self) -> Result<ActivityMap> {
        let resp = Request::get(&self.activities_url()).send().await?;
        let text = resp.text().await?;
        ActivityMap::from_json(&text)
    }

    pub async fn signup(&self, activity: &str, email: &str) -> Result<ActionOutcome> {
        let resp = Request::post(&self.signup_url(activity, email)).send().await?;
        outcome_of(resp).await
    }

    pub async fn unregister(&self, activity: &str, email: &str) -> Result<ActionOutcome> {
        let resp = Request::delete(&self.participants_url(activity, email))
            .send()
            .await?;
        outcome_of(resp).await
    }
}

async fn outcome_of(resp: Response) -> Result<ActionOutcome> {
    let ok = resp.ok();
    let text = resp.text().await?;
    classify(ok, &text)
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;

    #[test]
    fn activities_url__should_be_relative_for_same_origin() {
        let api = ApiClient::new("");
        assert_eq!(api.activities_url(), "/activities");
    }

    #[test]
    fn new__should_drop_trailing_slashes_from_base() {
        let api = ApiClient::new("https://school.example/api//");
        assert_eq!(api.activities_url(), "https://school.example/api/activities");
    }

    #[test]
    fn signup_url__should_encode_name_and_email() {
        // Given
        let api = ApiClient::new("");

        // When
        let url = api.signup_url("Chess Club", "a+b@mergington.edu");

        // Then
        assert_eq!(url, "/activities/Chess%20Club/signup?email=a%2Bb%40mergington.edu");
    }

    #[test]
    fn participants_url__should_encode_path_breaking_characters() {
        let api = ApiClient::new("");

        let url = api.participants_url("Art/Design?&", "x@y.z");

        assert_eq!(url, "/activities/Art%2FDesign%3F%26/participants?email=x%40y.z");
    }

    #[test]
    fn classify__should_accept_success_with_message() {
        let outcome = classify(true, r#"{"message": "Signed up x@y.z for Chess Club"}"#)
            .expect("classify");
        assert_eq!(
            outcome,
            ActionOutcome::Accepted(Some("Signed up x@y.z for Chess Club".into()))
        );
    }

    #[test]
    fn classify__should_carry_detail_on_conflict() {
        let outcome = classify(false, r#"{"detail": "Already signed up"}"#).expect("classify");
        assert_eq!(outcome, ActionOutcome::Rejected(Some("Already signed up".into())));
    }

    #[test]
    fn classify__should_drop_detail_that_is_not_a_string() {
        // Given
        let body = r#"{"detail": [{"loc": ["query", "email"], "msg": "field required"}]}"#;

        // When
        let outcome = classify(false, body).expect("classify");

        // Then
        assert_eq!(outcome, ActionOutcome::Rejected(None));
    }

    #[test]
    fn classify__should_treat_empty_object_as_missing_text() {
        assert_eq!(classify(false, "{}").expect("classify"), ActionOutcome::Rejected(None));
        assert_eq!(classify(true, "{}").expect("classify"), ActionOutcome::Accepted(None));
    }

    #[test]
    fn classify__should_treat_string_body_as_missing_detail() {
        // Given
        let body = r#""Bad request""#;

        // When
        let outcome = classify(false, body).expect("classify");

        // Then
        assert_eq!(outcome, ActionOutcome::Rejected(None));
    }

    #[test]
    fn classify__should_treat_array_and_number_bodies_as_missing_text() {
        assert_eq!(classify(false, "[]").expect("classify"), ActionOutcome::Rejected(None));
        assert_eq!(classify(false, "5").expect("classify"), ActionOutcome::Rejected(None));
        assert_eq!(classify(true, "[]").expect("classify"), ActionOutcome::Accepted(None));
    }

    #[test]
    fn classify__should_fail_on_null_body() {
        assert!(matches!(classify(false, "null"), Err(Error::Decode(_))));
        assert!(matches!(classify(true, "null"), Err(Error::Decode(_))));
    }

    #[test]
    fn classify__should_fail_on_non_json_body() {
        let result = classify(false, "<html>Bad Gateway</html>");
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
