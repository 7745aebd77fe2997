//! Normalization of the raw response bodies the host hands back.

use serde_json::Value;

use super::errors::ResponseError;

/// A response body as the host received it.
///
/// Hosts disagree on what they hand back: the raw text, text that is itself a
/// JSON-encoded string of the real body, or an already decoded value. All three
/// are normalized into one decoded [`Value`] before any field is read.
///
/// # Example
///
/// ```
/// # use mangahub::platform::mangahub::response::Body;
/// let text = Body::from(r#"{"data": {"search": null}}"#);
/// let encoded = Body::from(r#""{\"data\": {\"search\": null}}""#);
/// let value = Body::from(serde_json::json!({"data": {"search": null}}));
/// # let _ = (text, encoded, value);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Body<'a> {
    /// Raw response text.
    Text(&'a str),
    /// A body some layer already decoded.
    Json(Value),
}

impl Body<'_> {
    pub(super) fn decode(self) -> Result<Value, ResponseError> {
        let value = match self {
            Self::Text(text) => serde_json::from_str(text)?,
            Self::Json(value) => value,
        };

        // Decode exactly once more if the body was serialized twice.
        match value {
            Value::String(text) => Ok(serde_json::from_str(&text)?),
            value => Ok(value),
        }
    }
}

impl<'a> From<&'a str> for Body<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for Body<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text.as_str())
    }
}

impl From<Value> for Body<'_> {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn should_decode_every_shape_to_the_same_value() -> Result<(), ResponseError> {
        let expected = json!({"data": {"manga": {"title": "Red Storm"}}});
        let text = expected.to_string();
        let encoded = Value::String(text.clone()).to_string();

        assert_eq!(expected, Body::from(&text).decode()?);
        assert_eq!(expected, Body::from(encoded.as_str()).decode()?);
        assert_eq!(expected, Body::from(expected.clone()).decode()?);
        assert_eq!(expected, Body::from(Value::String(text)).decode()?);
        Ok(())
    }

    #[test]
    fn should_fail_on_non_json() {
        let err = Body::from("<html>502 Bad Gateway</html>").decode().unwrap_err();
        assert!(matches!(err, ResponseError::Malformed(_)));
    }

    #[test]
    fn should_fail_on_string_that_is_not_json() {
        let err = Body::from(r#""not json at all""#).decode().unwrap_err();
        assert!(matches!(err, ResponseError::Malformed(_)));
    }
}
