use serde::{Deserialize, Serialize};

/// Closed set of attribute kinds the engine understands.
///
/// Scalar kinds carry no payload. Relations carry the uid of their target
/// model, components the uid of their component model. Every dispatch over
/// this enum is an exhaustive match, so adding a kind is a compile-time
/// visible event rather than a stringly-typed fallthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AttributeKind {
    String,
    Text,
    RichText,
    Email,
    Enumeration {
        #[serde(default)]
        values: Vec<String>,
    },
    Password,
    Integer,
    BigInteger,
    Float,
    Decimal,
    Boolean,
    Date,
    Datetime,
    Time,
    Timestamp,
    Json,
    Uuid,
    Relation {
        target: String,
    },
    Component {
        component: String,
        #[serde(default)]
        repeatable: bool,
    },
    DynamicZone {
        components: Vec<String>,
    },
}

impl AttributeKind {
    /// True for kinds that can be populated (fetched and embedded) rather
    /// than stored inline as a scalar.
    pub fn is_populatable(&self) -> bool {
        matches!(
            self,
            AttributeKind::Relation { .. }
                | AttributeKind::Component { .. }
                | AttributeKind::DynamicZone { .. }
        )
    }

    /// Wire name of the kind, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeKind::String => "string",
            AttributeKind::Text => "text",
            AttributeKind::RichText => "richtext",
            AttributeKind::Email => "email",
            AttributeKind::Enumeration { .. } => "enumeration",
            AttributeKind::Password => "password",
            AttributeKind::Integer => "integer",
            AttributeKind::BigInteger => "biginteger",
            AttributeKind::Float => "float",
            AttributeKind::Decimal => "decimal",
            AttributeKind::Boolean => "boolean",
            AttributeKind::Date => "date",
            AttributeKind::Datetime => "datetime",
            AttributeKind::Time => "time",
            AttributeKind::Timestamp => "timestamp",
            AttributeKind::Json => "json",
            AttributeKind::Uuid => "uuid",
            AttributeKind::Relation { .. } => "relation",
            AttributeKind::Component { .. } => "component",
            AttributeKind::DynamicZone { .. } => "dynamiczone",
        }
    }
}

/// Per-attribute schema metadata. Immutable once the owning model is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    #[serde(flatten)]
    pub kind: AttributeKind,
    #[serde(default)]
    pub private: bool,
    #[serde(default = "default_true")]
    pub writable: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

fn default_true() -> bool {
    true
}

impl AttributeDescriptor {
    /// Descriptor with default flags for the given kind, for registries
    /// assembled in code rather than from definition files.
    pub fn of(kind: AttributeKind) -> Self {
        Self {
            kind,
            private: false,
            writable: true,
            visible: true,
            required: false,
            unique: false,
            min: None,
            max: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_scalar_attribute() {
        let attr: AttributeDescriptor =
            serde_json::from_value(json!({ "type": "string", "required": true })).unwrap();
        assert_eq!(attr.kind, AttributeKind::String);
        assert!(attr.required);
        assert!(attr.writable);
        assert!(!attr.private);
    }

    #[test]
    fn test_deserialize_relation_attribute() {
        let attr: AttributeDescriptor =
            serde_json::from_value(json!({ "type": "relation", "target": "api::user.user" }))
                .unwrap();
        assert_eq!(
            attr.kind,
            AttributeKind::Relation { target: "api::user.user".to_string() }
        );
    }

    #[test]
    fn test_descriptor_defaults() {
        let attr = AttributeDescriptor::of(AttributeKind::Boolean);
        assert!(attr.writable);
        assert!(attr.visible);
        assert!(!attr.private);
        assert!(!attr.required);
    }

    #[test]
    fn test_deserialize_dynamic_zone_attribute() {
        let attr: AttributeDescriptor = serde_json::from_value(json!({
            "type": "dynamiczone",
            "components": ["blocks.hero", "blocks.quote"],
        }))
        .unwrap();
        assert!(attr.kind.is_populatable());
        assert_eq!(attr.kind.type_name(), "dynamiczone");
    }
}
