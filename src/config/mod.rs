//! Parser configuration and tag registry
//!
//! Maps tag names to tag definitions (block / inline / modifier), combining
//! a built-in standard tag library with host-registered custom tags, and
//! carries the validation strictness for unrecognized tags. A configuration
//! is read-only during a parse and safe to share across concurrent
//! independent parses.

mod tag_definition;

pub use tag_definition::{TagDefinition, TagDefinitionError, TagSyntaxKind};

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

/// Policy for tags that have no definition in the registry
///
/// Unknown tags never abort the parse: they always produce a best-effort
/// generic node. The policy only controls whether a diagnostic is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTagPolicy {
    /// Accept silently as a generic pass-through node
    #[default]
    Allow,
    /// Accept as a generic node and log a warning diagnostic
    Warn,
}

/// Tag registry plus validation settings for one or more parses
#[derive(Debug, Clone)]
pub struct ParserConfiguration {
    tags: FxHashMap<SmolStr, TagDefinition>,
    unknown_tag_policy: UnknownTagPolicy,
}

impl ParserConfiguration {
    /// A configuration with the standard tag library pre-registered
    pub fn new() -> Self {
        let mut config = Self::empty();
        for definition in standard_tags() {
            // standard names never collide
            config.tags.insert(definition.normalized_name(), definition);
        }
        config
    }

    /// A configuration with no tags defined at all
    pub fn empty() -> Self {
        Self {
            tags: FxHashMap::default(),
            unknown_tag_policy: UnknownTagPolicy::default(),
        }
    }

    /// Register a custom tag definition
    pub fn define_tag(&mut self, definition: TagDefinition) -> Result<(), TagDefinitionError> {
        let key = definition.normalized_name();
        if self.tags.contains_key(&key) {
            return Err(TagDefinitionError::DuplicateTagName(
                definition.name().to_string(),
            ));
        }
        self.tags.insert(key, definition);
        Ok(())
    }

    /// Look up a definition by tag name (case-insensitive)
    pub fn try_get_tag(&self, name: &str) -> Option<&TagDefinition> {
        self.tags.get(name.to_ascii_lowercase().as_str())
    }

    pub fn unknown_tag_policy(&self) -> UnknownTagPolicy {
        self.unknown_tag_policy
    }

    pub fn set_unknown_tag_policy(&mut self, policy: UnknownTagPolicy) {
        self.unknown_tag_policy = policy;
    }

    /// All registered definitions (iteration order is unspecified)
    pub fn tag_definitions(&self) -> impl Iterator<Item = &TagDefinition> {
        self.tags.values()
    }
}

impl Default for ParserConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

/// Names of the built-in standard tags
pub mod standard {
    // Block tags
    pub const PARAM: &str = "@param";
    pub const RETURNS: &str = "@returns";
    pub const REMARKS: &str = "@remarks";
    pub const EXAMPLE: &str = "@example";
    pub const SEE: &str = "@see";
    pub const THROWS: &str = "@throws";
    pub const DEPRECATED: &str = "@deprecated";
    pub const DEFAULT_VALUE: &str = "@defaultValue";
    pub const PRIVATE_REMARKS: &str = "@privateRemarks";

    // Inline tags
    pub const LINK: &str = "@link";
    pub const INHERIT_DOC: &str = "@inheritDoc";
    pub const LABEL: &str = "@label";

    // Modifier tags
    pub const ALPHA: &str = "@alpha";
    pub const BETA: &str = "@beta";
    pub const EXPERIMENTAL: &str = "@experimental";
    pub const INTERNAL: &str = "@internal";
    pub const PUBLIC: &str = "@public";
    pub const READONLY: &str = "@readonly";
    pub const OVERRIDE: &str = "@override";
    pub const SEALED: &str = "@sealed";
    pub const VIRTUAL: &str = "@virtual";
    pub const PACKAGE_DOCUMENTATION: &str = "@packageDocumentation";
    pub const EVENT_PROPERTY: &str = "@eventProperty";
}

/// Build the standard tag library
pub fn standard_tags() -> Vec<TagDefinition> {
    use standard::*;

    let block = |name| TagDefinition::block(name);
    let multi = |name| TagDefinition::block(name).allow_multiple();
    let inline = |name| TagDefinition::inline(name);
    let modifier = |name| TagDefinition::modifier(name);

    vec![
        multi(PARAM),
        block(RETURNS),
        block(REMARKS),
        multi(EXAMPLE),
        multi(SEE),
        multi(THROWS),
        block(DEPRECATED),
        block(DEFAULT_VALUE),
        block(PRIVATE_REMARKS),
        inline(LINK),
        inline(INHERIT_DOC),
        inline(LABEL),
        modifier(ALPHA),
        modifier(BETA),
        modifier(EXPERIMENTAL),
        modifier(INTERNAL),
        modifier(PUBLIC),
        modifier(READONLY),
        modifier(OVERRIDE),
        modifier(SEALED),
        modifier(VIRTUAL),
        modifier(PACKAGE_DOCUMENTATION),
        modifier(EVENT_PROPERTY),
    ]
}
