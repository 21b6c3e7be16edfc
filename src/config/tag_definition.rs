//! Tag definitions registered in the parser configuration

use smol_str::SmolStr;
use thiserror::Error;

/// How a tag is written and parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagSyntaxKind {
    /// `@name` at the start of a line, opening a section
    Block,
    /// `{@name ...}` embedded in running text
    Inline,
    /// `@name` with no content, recorded as set membership
    Modifier,
}

/// Errors from registering tag definitions
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagDefinitionError {
    /// Tag names are `@` followed by an ASCII letter and ASCII letters/digits
    #[error("malformed tag name {0:?}: expected '@' followed by a letter and letters/digits")]
    MalformedTagName(String),
    /// A tag with this name (case-insensitive) is already registered
    #[error("tag {0:?} is already defined")]
    DuplicateTagName(String),
}

/// The definition of a single tag
///
/// The declared casing is preserved for display; registry lookups compare
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDefinition {
    name: SmolStr,
    syntax: TagSyntaxKind,
    allow_multiple: bool,
}

impl TagDefinition {
    /// Create a definition, validating the tag name shape
    pub fn new(name: &str, syntax: TagSyntaxKind) -> Result<Self, TagDefinitionError> {
        if !Self::is_valid_tag_name(name) {
            return Err(TagDefinitionError::MalformedTagName(name.to_string()));
        }
        Ok(Self {
            name: SmolStr::new(name),
            syntax,
            allow_multiple: false,
        })
    }

    /// Create a block tag definition
    ///
    /// # Panics
    /// Panics on a malformed tag name; use [`TagDefinition::new`] to handle
    /// the error instead.
    pub fn block(name: &str) -> Self {
        Self::new(name, TagSyntaxKind::Block).expect("malformed tag name")
    }

    /// Create an inline tag definition
    ///
    /// # Panics
    /// Panics on a malformed tag name.
    pub fn inline(name: &str) -> Self {
        Self::new(name, TagSyntaxKind::Inline).expect("malformed tag name")
    }

    /// Create a modifier tag definition
    ///
    /// # Panics
    /// Panics on a malformed tag name.
    pub fn modifier(name: &str) -> Self {
        Self::new(name, TagSyntaxKind::Modifier).expect("malformed tag name")
    }

    /// Allow the tag to appear more than once per comment
    pub fn allow_multiple(mut self) -> Self {
        self.allow_multiple = true;
        self
    }

    /// Check the `@name` shape: `@`, an ASCII letter, then letters/digits
    pub fn is_valid_tag_name(name: &str) -> bool {
        let Some(rest) = name.strip_prefix('@') else {
            return false;
        };
        let mut chars = rest.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric())
    }

    /// The tag name as declared, including the `@`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The lower-cased name used as the registry key
    pub fn normalized_name(&self) -> SmolStr {
        SmolStr::new(self.name.to_ascii_lowercase())
    }

    pub fn syntax_kind(&self) -> TagSyntaxKind {
        self.syntax
    }

    pub fn allows_multiple(&self) -> bool {
        self.allow_multiple
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(TagDefinition::is_valid_tag_name("@param"));
        assert!(TagDefinition::is_valid_tag_name("@defaultValue"));
        assert!(TagDefinition::is_valid_tag_name("@tag2"));
    }

    #[test]
    fn test_invalid_names() {
        assert!(!TagDefinition::is_valid_tag_name("param"));
        assert!(!TagDefinition::is_valid_tag_name("@"));
        assert!(!TagDefinition::is_valid_tag_name("@2tag"));
        assert!(!TagDefinition::is_valid_tag_name("@my-tag"));
        assert!(!TagDefinition::is_valid_tag_name("@my tag"));
    }

    #[test]
    fn test_new_rejects_malformed() {
        let err = TagDefinition::new("bad", TagSyntaxKind::Block).unwrap_err();
        assert!(matches!(err, TagDefinitionError::MalformedTagName(_)));
    }

    #[test]
    fn test_casing_preserved_key_normalized() {
        let tag = TagDefinition::block("@defaultValue");
        assert_eq!(tag.name(), "@defaultValue");
        assert_eq!(tag.normalized_name(), "@defaultvalue");
    }
}
