use crate::error::{Result, SpellError};
use crate::tokenizer::Analyzer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub indexed: bool,
    pub analyzer: Analyzer,
}

impl FieldSchema {
    pub fn text(analyzer: Analyzer) -> Self { Self { indexed: true, analyzer } }
    /// A field that is stored but never analyzed into terms.
    pub fn stored() -> Self { Self { indexed: false, analyzer: Analyzer::simple() } }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    pub fields: BTreeMap<String, FieldSchema>,
}

impl Schema {
    pub fn new() -> Self { Self::default() }

    pub fn with_field(mut self, name: impl Into<String>, field: FieldSchema) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> { self.fields.get(name) }

    /// Look up a field that spelling suggestions can be drawn from.
    pub fn spellcheck_field(&self, name: &str) -> Result<&FieldSchema> {
        let field = self.fields.get(name).ok_or_else(|| SpellError::UnknownField(name.to_string()))?;
        if !field.indexed {
            return Err(SpellError::FieldNotIndexed(name.to_string()));
        }
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spellcheck_field_requires_indexed_field() {
        let schema = Schema::new()
            .with_field("body", FieldSchema::text(Analyzer::spelling()))
            .with_field("url", FieldSchema::stored());
        assert!(schema.spellcheck_field("body").is_ok());
        assert!(matches!(schema.spellcheck_field("url"), Err(SpellError::FieldNotIndexed(_))));
        assert!(matches!(schema.spellcheck_field("nope"), Err(SpellError::UnknownField(_))));
    }
}
