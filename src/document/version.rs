//! Content-type discriminator: the glTF major version.

use serde::Serialize;
use serde_json::Value;

/// glTF major version a document targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ContentType {
    #[default]
    V1,
    V2,
}

impl ContentType {
    /// Used when `asset.version` is absent or unrecognized.
    pub const BASELINE: Self = Self::V1;

    /// Detect the version from the top-level `asset.version` field.
    pub fn detect(tree: &Value) -> Self {
        let Some(version) = tree.get("asset").and_then(|asset| asset.get("version")) else {
            return Self::BASELINE;
        };

        let major = match version {
            Value::String(s) => s.split('.').next().and_then(|m| m.trim().parse::<u64>().ok()),
            Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.trunc() as u64)),
            _ => None,
        };

        match major {
            Some(2) => Self::V2,
            Some(1) => Self::V1,
            _ => Self::BASELINE,
        }
    }

    pub const fn major(self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "glTF {}.x", self.major())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_versions() {
        assert_eq!(ContentType::detect(&json!({"asset": {"version": "2.0"}})), ContentType::V2);
        assert_eq!(ContentType::detect(&json!({"asset": {"version": "1.0.3"}})), ContentType::V1);
        assert_eq!(ContentType::detect(&json!({"asset": {"version": 2}})), ContentType::V2);
    }

    #[test]
    fn test_detect_falls_back_to_baseline() {
        assert_eq!(ContentType::detect(&json!({})), ContentType::BASELINE);
        assert_eq!(ContentType::detect(&json!({"asset": {}})), ContentType::BASELINE);
        assert_eq!(
            ContentType::detect(&json!({"asset": {"version": "3.0"}})),
            ContentType::BASELINE
        );
        assert_eq!(
            ContentType::detect(&json!({"asset": {"version": "two"}})),
            ContentType::BASELINE
        );
        assert_eq!(ContentType::detect(&json!([1, 2])), ContentType::BASELINE);
    }

    #[test]
    fn test_major() {
        assert_eq!(ContentType::V1.major(), 1);
        assert_eq!(ContentType::V2.major(), 2);
    }
}
