//! Input-schema generation for tool parameters
//!
//! Produces the `{type: "object", properties, required}` document advertised
//! to clients. All parameters are required by default; a parameter becomes
//! optional only when its spec says so explicitly.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Parameter value types supported by the generator
#[derive(Debug, Clone, PartialEq)]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    /// Nested object with its own property map
    Object(Vec<ParamSpec>),
    /// Homogeneous array of the given item type
    Array(Box<ParamType>),
}

/// Declared parameter of a tool handler
///
/// Insertion order is significant: callers pass arguments positionally in
/// declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub description: Option<String>,
    pub enum_values: Option<Vec<String>>,
    pub param_type: ParamType,
    pub required: bool,
}

impl ParamSpec {
    /// A required parameter; descriptions are optional but recommended,
    /// the model uses them when deciding how to call the tool.
    pub fn new(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            description: None,
            enum_values: None,
            param_type,
            required: true,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::String)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_enum(mut self, values: Vec<String>) -> Self {
        self.enum_values = Some(values);
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// One property entry in a generated schema
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchemaProperty {
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaProperty>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaProperty>>,
}

/// JSON Schema document for a tool's input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: IndexMap<String, SchemaProperty>,
    pub required: Vec<String>,
}

impl Default for InputSchema {
    fn default() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: IndexMap::new(),
            required: Vec::new(),
        }
    }
}

/// Generate the input schema for an ordered parameter list.
///
/// Pure function of the specs; never fails on missing descriptions, those
/// degrade to type-only entries.
pub fn input_schema_for(params: &[ParamSpec]) -> InputSchema {
    let mut schema = InputSchema::default();
    for param in params {
        if param.required {
            schema.required.push(param.name.clone());
        }
        schema
            .properties
            .insert(param.name.clone(), property_for(param));
    }
    schema
}

fn property_for(param: &ParamSpec) -> SchemaProperty {
    let mut property = type_property(&param.param_type);
    property.description = param.description.clone();
    property.enum_values = param.enum_values.clone();
    property
}

fn type_property(param_type: &ParamType) -> SchemaProperty {
    let (name, items, properties) = match param_type {
        ParamType::String => ("string", None, None),
        ParamType::Integer => ("integer", None, None),
        ParamType::Number => ("number", None, None),
        ParamType::Boolean => ("boolean", None, None),
        ParamType::Array(item) => ("array", Some(Box::new(type_property(item))), None),
        ParamType::Object(fields) => {
            let nested = fields
                .iter()
                .map(|f| (f.name.clone(), property_for(f)))
                .collect();
            ("object", None, Some(nested))
        }
    };
    SchemaProperty {
        property_type: name.to_string(),
        description: None,
        enum_values: None,
        items,
        properties,
    }
}
