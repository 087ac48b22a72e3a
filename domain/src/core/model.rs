//! Model value object representing an LLM model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default model used for both decomposition and synthesis
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// An LLM model identifier (Value Object)
///
/// Text-generation backends are addressed by free-form model names
/// (`gpt-4o-mini`, `llama3.1:8b`, ...), so the model is kept as an opaque,
/// non-empty identifier rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Model {
    name: String,
}

impl Model {
    /// Create a model from its identifier.
    ///
    /// Surrounding whitespace is trimmed. An empty identifier falls back to
    /// [`DEFAULT_MODEL`].
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            Self::default()
        } else {
            Self {
                name: trimmed.to_string(),
            }
        }
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl Default for Model {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::new(s))
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::new(s)
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        let model: Model = "llama3.1:8b".parse().unwrap();
        assert_eq!(model.to_string(), "llama3.1:8b");
        assert_eq!(model, Model::new("llama3.1:8b"));
    }

    #[test]
    fn test_model_trims_whitespace() {
        assert_eq!(Model::new("  gpt-4o  ").as_str(), "gpt-4o");
    }

    #[test]
    fn test_empty_model_falls_back_to_default() {
        assert_eq!(Model::new("   "), Model::default());
        assert_eq!(Model::default().as_str(), DEFAULT_MODEL);
    }

    #[test]
    fn test_model_serde() {
        let json = serde_json::to_string(&Model::new("gpt-4o")).unwrap();
        assert_eq!(json, "\"gpt-4o\"");
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), "gpt-4o");
    }
}
