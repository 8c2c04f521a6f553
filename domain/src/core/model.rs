//! Advice model value object

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generative-text models the stylist can be backed by (Value Object)
///
/// The identifier is sent verbatim to the external service, so unknown
/// names are kept as [`AdviceModel::Custom`] instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AdviceModel {
    #[default]
    Gemini3Flash,
    Gemini3Pro,
    Gemini25Flash,
    Gemini25Pro,
    Custom(String),
}

impl AdviceModel {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            AdviceModel::Gemini3Flash => "gemini-3-flash-preview",
            AdviceModel::Gemini3Pro => "gemini-3-pro-preview",
            AdviceModel::Gemini25Flash => "gemini-2.5-flash",
            AdviceModel::Gemini25Pro => "gemini-2.5-pro",
            AdviceModel::Custom(s) => s,
        }
    }

    /// Whether this is one of the known preset models
    pub fn is_known(&self) -> bool {
        !matches!(self, AdviceModel::Custom(_))
    }
}

impl std::fmt::Display for AdviceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AdviceModel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "gemini-3-flash-preview" => AdviceModel::Gemini3Flash,
            "gemini-3-pro-preview" => AdviceModel::Gemini3Pro,
            "gemini-2.5-flash" => AdviceModel::Gemini25Flash,
            "gemini-2.5-pro" => AdviceModel::Gemini25Pro,
            other => AdviceModel::Custom(other.to_string()),
        })
    }
}

impl From<&str> for AdviceModel {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl Serialize for AdviceModel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AdviceModel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(AdviceModel::from(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_flash() {
        assert_eq!(AdviceModel::default().as_str(), "gemini-3-flash-preview");
    }

    #[test]
    fn test_known_names_parse_to_presets() {
        let model: AdviceModel = "gemini-2.5-flash".parse().unwrap();
        assert_eq!(model, AdviceModel::Gemini25Flash);
        assert!(model.is_known());
    }

    #[test]
    fn test_custom_model() {
        let model = AdviceModel::from("gemini-exp-1206");
        assert_eq!(model, AdviceModel::Custom("gemini-exp-1206".to_string()));
        assert_eq!(model.to_string(), "gemini-exp-1206");
        assert!(!model.is_known());
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&AdviceModel::Gemini3Pro).unwrap();
        assert_eq!(json, "\"gemini-3-pro-preview\"");
        let back: AdviceModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AdviceModel::Gemini3Pro);
    }
}
