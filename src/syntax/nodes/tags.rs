//! Tag nodes: block tags, generic inline tags, and the specialized link and
//! inherit-doc inline tags

use smol_str::SmolStr;

use crate::config::TagDefinition;
use crate::syntax::excerpt::Excerpt;

use super::reference::DocDeclarationReference;
use super::TextSource;

/// A `@name` block tag token
///
/// Used both as the opener of a block section and as a standalone modifier
/// tag recorded in the modifier tag set.
#[derive(Debug, Clone)]
pub struct DocBlockTag {
    name: SmolStr,
    source: TextSource,
}

impl DocBlockTag {
    /// Construct from a literal tag name such as `"@returns"`
    ///
    /// # Panics
    /// Panics if `name` is not a well-formed tag name.
    pub fn new(name: &str) -> Self {
        assert!(
            TagDefinition::is_valid_tag_name(name),
            "malformed tag name: {name:?}"
        );
        Self {
            name: SmolStr::new(name),
            source: TextSource::Literal(name.to_string()),
        }
    }

    /// Construct from a parsed excerpt covering `@name`
    pub fn from_excerpt(excerpt: Excerpt) -> Self {
        let name = SmolStr::new(excerpt.text());
        Self {
            name,
            source: TextSource::Parsed(excerpt),
        }
    }

    /// The tag name as written, including the `@`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tag name lower-cased for registry comparison
    pub fn normalized_name(&self) -> SmolStr {
        SmolStr::new(self.name.to_ascii_lowercase())
    }

    pub fn excerpt(&self) -> Option<&Excerpt> {
        self.source.excerpt()
    }
}

/// A generic `{@name ...}` inline tag
///
/// The content is captured verbatim: everything between the separator after
/// the tag name and the closing brace, including trailing spacing.
#[derive(Debug, Clone)]
pub struct DocInlineTag {
    name: SmolStr,
    open: Option<Excerpt>,
    name_source: TextSource,
    separator: Option<Excerpt>,
    content: Option<TextSource>,
    close: Option<Excerpt>,
}

impl DocInlineTag {
    /// Construct from a literal name and content
    ///
    /// # Panics
    /// Panics if `name` is not a well-formed tag name.
    pub fn new(name: &str, content: impl Into<String>) -> Self {
        assert!(
            TagDefinition::is_valid_tag_name(name),
            "malformed tag name: {name:?}"
        );
        let content = content.into();
        Self {
            name: SmolStr::new(name),
            open: None,
            name_source: TextSource::Literal(name.to_string()),
            separator: None,
            content: (!content.is_empty()).then_some(TextSource::Literal(content)),
            close: None,
        }
    }

    pub(crate) fn from_excerpts(
        open: Excerpt,
        name: Excerpt,
        separator: Option<Excerpt>,
        content: Option<Excerpt>,
        close: Option<Excerpt>,
    ) -> Self {
        Self {
            name: SmolStr::new(name.text()),
            open: Some(open),
            name_source: TextSource::Parsed(name),
            separator,
            content: content.map(TextSource::Parsed),
            close,
        }
    }

    /// The tag name as written, including the `@`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn normalized_name(&self) -> SmolStr {
        SmolStr::new(self.name.to_ascii_lowercase())
    }

    /// The verbatim interior text after the tag name
    pub fn tag_content(&self) -> &str {
        self.content.as_ref().map(TextSource::text).unwrap_or("")
    }

    pub(crate) fn all_excerpts(&self) -> Vec<&Excerpt> {
        let mut out = Vec::new();
        out.extend(self.open.as_ref());
        out.extend(self.name_source.excerpt());
        out.extend(self.separator.as_ref());
        out.extend(self.content.as_ref().and_then(TextSource::excerpt));
        out.extend(self.close.as_ref());
        out
    }
}

/// The destination of a link tag
#[derive(Debug, Clone)]
pub enum LinkDestination {
    /// A direct URL such as `https://example.com/page`
    Url(TextSource),
    /// A declaration reference expression
    Declaration(Box<DocDeclarationReference>),
}

/// A `{@link target|displayText}` inline tag
#[derive(Debug, Clone)]
pub struct DocLinkTag {
    open: Option<Excerpt>,
    name_source: TextSource,
    separator: Option<Excerpt>,
    destination: Option<LinkDestination>,
    after_destination: Option<Excerpt>,
    pipe: Option<Excerpt>,
    link_text: Option<TextSource>,
    close: Option<Excerpt>,
}

impl DocLinkTag {
    /// Construct a link to a URL with optional display text
    pub fn new_url(url: impl Into<String>, display_text: Option<&str>) -> Self {
        Self {
            open: None,
            name_source: TextSource::Literal("@link".to_string()),
            separator: None,
            destination: Some(LinkDestination::Url(TextSource::Literal(url.into()))),
            after_destination: None,
            pipe: None,
            link_text: display_text.map(|t| TextSource::Literal(t.to_string())),
            close: None,
        }
    }

    /// Construct a link to a declaration reference with optional display text
    pub fn new_declaration(
        reference: DocDeclarationReference,
        display_text: Option<&str>,
    ) -> Self {
        Self {
            open: None,
            name_source: TextSource::Literal("@link".to_string()),
            separator: None,
            destination: Some(LinkDestination::Declaration(Box::new(reference))),
            after_destination: None,
            pipe: None,
            link_text: display_text.map(|t| TextSource::Literal(t.to_string())),
            close: None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_excerpts(
        open: Excerpt,
        name: Excerpt,
        separator: Option<Excerpt>,
        destination: LinkDestination,
        after_destination: Option<Excerpt>,
        pipe: Option<Excerpt>,
        link_text: Option<Excerpt>,
        close: Option<Excerpt>,
    ) -> Self {
        Self {
            open: Some(open),
            name_source: TextSource::Parsed(name),
            separator,
            destination: Some(destination),
            after_destination,
            pipe,
            link_text: link_text.map(TextSource::Parsed),
            close,
        }
    }

    /// The URL destination, when the target parsed as a URL
    pub fn url_destination(&self) -> Option<&str> {
        match &self.destination {
            Some(LinkDestination::Url(url)) => Some(url.text()),
            _ => None,
        }
    }

    /// The declaration-reference destination, when the target parsed as one
    pub fn code_destination(&self) -> Option<&DocDeclarationReference> {
        match &self.destination {
            Some(LinkDestination::Declaration(reference)) => Some(reference),
            _ => None,
        }
    }

    /// The literal display text after `|`, when present
    pub fn link_text(&self) -> Option<&str> {
        self.link_text.as_ref().map(TextSource::text)
    }

    /// Display text for rendering: the literal text after `|` when present,
    /// otherwise an identifier synthesized from the last member segment of a
    /// declaration-reference destination. `None` for a bare URL link - the
    /// renderer shows the URL itself.
    pub fn effective_display_text(&self) -> Option<String> {
        if let Some(text) = self.link_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        self.code_destination()
            .and_then(DocDeclarationReference::synthesized_identifier)
    }

    pub(crate) fn all_excerpts(&self) -> Vec<&Excerpt> {
        let mut out = Vec::new();
        out.extend(self.open.as_ref());
        out.extend(self.name_source.excerpt());
        out.extend(self.separator.as_ref());
        if let Some(LinkDestination::Url(url)) = &self.destination {
            out.extend(url.excerpt());
        }
        if let Some(LinkDestination::Declaration(reference)) = &self.destination {
            out.extend(reference.all_excerpts());
        }
        out.extend(self.after_destination.as_ref());
        out.extend(self.pipe.as_ref());
        out.extend(self.link_text.as_ref().and_then(TextSource::excerpt));
        out.extend(self.close.as_ref());
        out
    }
}

/// A `{@inheritDoc target}` inline tag
#[derive(Debug, Clone, Default)]
pub struct DocInheritDocTag {
    open: Option<Excerpt>,
    name_source: Option<TextSource>,
    separator: Option<Excerpt>,
    reference: Option<Box<DocDeclarationReference>>,
    close: Option<Excerpt>,
}

impl DocInheritDocTag {
    /// Construct with an optional declaration-reference target
    pub fn new(reference: Option<DocDeclarationReference>) -> Self {
        Self {
            open: None,
            name_source: Some(TextSource::Literal("@inheritDoc".to_string())),
            separator: None,
            reference: reference.map(Box::new),
            close: None,
        }
    }

    pub(crate) fn from_excerpts(
        open: Excerpt,
        name: Excerpt,
        separator: Option<Excerpt>,
        reference: Option<DocDeclarationReference>,
        close: Option<Excerpt>,
    ) -> Self {
        Self {
            open: Some(open),
            name_source: Some(TextSource::Parsed(name)),
            separator,
            reference: reference.map(Box::new),
            close,
        }
    }

    /// The inherited-from target, when one was written
    pub fn declaration_reference(&self) -> Option<&DocDeclarationReference> {
        self.reference.as_deref()
    }

    pub(crate) fn all_excerpts(&self) -> Vec<&Excerpt> {
        let mut out = Vec::new();
        out.extend(self.open.as_ref());
        out.extend(self.name_source.as_ref().and_then(TextSource::excerpt));
        out.extend(self.separator.as_ref());
        if let Some(reference) = &self.reference {
            out.extend(reference.all_excerpts());
        }
        out.extend(self.close.as_ref());
        out
    }
}
