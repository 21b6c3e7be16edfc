//! Declaration reference expression nodes
//!
//! A declaration reference identifies a code symbol: an optional package
//! part (scope, package name, import path), then a dotted member path whose
//! segments are identifiers or bracketed symbol references, each optionally
//! qualified by a selector. The parser only builds the expression; resolving
//! it against a real symbol table is a consumer concern.

use crate::syntax::excerpt::Excerpt;

use super::TextSource;

/// A full declaration reference expression, e.g.
/// `my-package/sub#Namespace.Member:2`
#[derive(Debug, Clone, Default)]
pub struct DocDeclarationReference {
    package_name: Option<TextSource>,
    import_path: Option<TextSource>,
    hash: Option<Excerpt>,
    members: Vec<DocMemberReference>,
}

impl DocDeclarationReference {
    /// Construct from literal parts
    pub fn new(
        package_name: Option<&str>,
        import_path: Option<&str>,
        members: Vec<DocMemberReference>,
    ) -> Self {
        Self {
            package_name: package_name.map(|p| TextSource::Literal(p.to_string())),
            import_path: import_path.map(|p| TextSource::Literal(p.to_string())),
            hash: None,
            members,
        }
    }

    pub(crate) fn from_excerpts(
        package_name: Option<Excerpt>,
        import_path: Option<Excerpt>,
        hash: Option<Excerpt>,
        members: Vec<DocMemberReference>,
    ) -> Self {
        Self {
            package_name: package_name.map(TextSource::Parsed),
            import_path: import_path.map(TextSource::Parsed),
            hash,
            members,
        }
    }

    /// The package name, possibly scoped (`@scope/name`)
    pub fn package_name(&self) -> Option<&str> {
        self.package_name.as_ref().map(TextSource::text)
    }

    /// The import path after the package name
    pub fn import_path(&self) -> Option<&str> {
        self.import_path.as_ref().map(TextSource::text)
    }

    /// The dotted member path, in order
    pub fn member_references(&self) -> &[DocMemberReference] {
        &self.members
    }

    /// An identifier synthesized from the last member segment, used as
    /// fallback display text for links without an explicit `|displayText`
    pub fn synthesized_identifier(&self) -> Option<String> {
        let last = self.members.last()?;
        if let Some(identifier) = last.member_identifier() {
            return Some(identifier.identifier().to_string());
        }
        last.member_symbol()
            .and_then(|symbol| symbol.symbol_reference().synthesized_identifier())
    }

    pub(crate) fn all_excerpts(&self) -> Vec<&Excerpt> {
        let mut out = Vec::new();
        out.extend(self.package_name.as_ref().and_then(TextSource::excerpt));
        out.extend(self.import_path.as_ref().and_then(TextSource::excerpt));
        out.extend(self.hash.as_ref());
        for member in &self.members {
            out.extend(member.all_excerpts());
        }
        out
    }
}

/// One segment of a member path: an identifier or a bracketed symbol
/// reference, with an optional selector
#[derive(Debug, Clone)]
pub struct DocMemberReference {
    dot: Option<Excerpt>,
    identifier: Option<DocMemberIdentifier>,
    symbol: Option<DocMemberSymbol>,
    selector: Option<DocMemberSelector>,
}

impl DocMemberReference {
    /// Construct a plain identifier segment
    pub fn from_identifier(name: &str) -> Self {
        Self {
            dot: None,
            identifier: Some(DocMemberIdentifier::new(name)),
            symbol: None,
            selector: None,
        }
    }

    /// Construct a `[symbol]` segment
    pub fn from_symbol(reference: DocDeclarationReference) -> Self {
        Self {
            dot: None,
            identifier: None,
            symbol: Some(DocMemberSymbol::new(reference)),
            selector: None,
        }
    }

    /// Attach a selector to this segment
    pub fn with_selector(mut self, selector: DocMemberSelector) -> Self {
        self.selector = Some(selector);
        self
    }

    pub(crate) fn from_parts(
        dot: Option<Excerpt>,
        identifier: Option<DocMemberIdentifier>,
        symbol: Option<DocMemberSymbol>,
        selector: Option<DocMemberSelector>,
    ) -> Self {
        assert!(
            identifier.is_some() != symbol.is_some(),
            "DocMemberReference must have exactly one of identifier or symbol"
        );
        Self {
            dot,
            identifier,
            symbol,
            selector,
        }
    }

    pub fn member_identifier(&self) -> Option<&DocMemberIdentifier> {
        self.identifier.as_ref()
    }

    pub fn member_symbol(&self) -> Option<&DocMemberSymbol> {
        self.symbol.as_ref()
    }

    pub fn selector(&self) -> Option<&DocMemberSelector> {
        self.selector.as_ref()
    }

    pub(crate) fn all_excerpts(&self) -> Vec<&Excerpt> {
        let mut out = Vec::new();
        out.extend(self.dot.as_ref());
        if let Some(identifier) = &self.identifier {
            out.extend(identifier.excerpt());
        }
        if let Some(symbol) = &self.symbol {
            out.extend(symbol.all_excerpts());
        }
        if let Some(selector) = &self.selector {
            out.extend(selector.all_excerpts());
        }
        out
    }
}

/// A plain identifier member segment
#[derive(Debug, Clone)]
pub struct DocMemberIdentifier {
    source: TextSource,
}

impl DocMemberIdentifier {
    /// # Panics
    /// Panics if `name` is empty.
    pub fn new(name: &str) -> Self {
        assert!(!name.is_empty(), "member identifier must not be empty");
        Self {
            source: TextSource::Literal(name.to_string()),
        }
    }

    pub(crate) fn from_excerpt(excerpt: Excerpt) -> Self {
        Self {
            source: TextSource::Parsed(excerpt),
        }
    }

    pub fn identifier(&self) -> &str {
        self.source.text()
    }

    pub fn excerpt(&self) -> Option<&Excerpt> {
        self.source.excerpt()
    }
}

/// A `[symbolReference]` member segment; the bracket interior is itself a
/// declaration reference
#[derive(Debug, Clone)]
pub struct DocMemberSymbol {
    open: Option<Excerpt>,
    reference: Box<DocDeclarationReference>,
    close: Option<Excerpt>,
}

impl DocMemberSymbol {
    pub fn new(reference: DocDeclarationReference) -> Self {
        Self {
            open: None,
            reference: Box::new(reference),
            close: None,
        }
    }

    pub(crate) fn from_excerpts(
        open: Excerpt,
        reference: DocDeclarationReference,
        close: Option<Excerpt>,
    ) -> Self {
        Self {
            open: Some(open),
            reference: Box::new(reference),
            close,
        }
    }

    pub fn symbol_reference(&self) -> &DocDeclarationReference {
        &self.reference
    }

    pub(crate) fn all_excerpts(&self) -> Vec<&Excerpt> {
        let mut out = Vec::new();
        out.extend(self.open.as_ref());
        out.extend(self.reference.all_excerpts());
        out.extend(self.close.as_ref());
        out
    }
}

/// Classification of a member selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    /// A numeric overload index, e.g. `:2`
    Index,
    /// A lower-case system selector, e.g. `:class`, `:constructor`
    System,
    /// An upper-case user label
    Label,
}

/// A `:selector` qualifier on a member segment
#[derive(Debug, Clone)]
pub struct DocMemberSelector {
    colon: Option<Excerpt>,
    source: TextSource,
}

impl DocMemberSelector {
    /// # Panics
    /// Panics if `selector` is empty or contains non-word characters.
    pub fn new(selector: &str) -> Self {
        assert!(
            !selector.is_empty() && selector.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
            "malformed selector: {selector:?}"
        );
        Self {
            colon: None,
            source: TextSource::Literal(selector.to_string()),
        }
    }

    pub(crate) fn from_excerpts(colon: Excerpt, source: Excerpt) -> Self {
        Self {
            colon: Some(colon),
            source: TextSource::Parsed(source),
        }
    }

    pub fn selector(&self) -> &str {
        self.source.text()
    }

    pub fn selector_kind(&self) -> SelectorKind {
        let text = self.selector();
        if text.chars().all(|c| c.is_ascii_digit()) {
            SelectorKind::Index
        } else if text.starts_with(|c: char| c.is_ascii_uppercase()) {
            SelectorKind::Label
        } else {
            SelectorKind::System
        }
    }

    /// The overload index for an `Index` selector
    pub fn overload_index(&self) -> Option<u32> {
        match self.selector_kind() {
            SelectorKind::Index => self.selector().parse().ok(),
            _ => None,
        }
    }

    pub(crate) fn all_excerpts(&self) -> Vec<&Excerpt> {
        let mut out = Vec::new();
        out.extend(self.colon.as_ref());
        out.extend(self.source.excerpt());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesized_identifier_from_last_segment() {
        let reference = DocDeclarationReference::new(
            Some("my-package"),
            None,
            vec![
                DocMemberReference::from_identifier("Namespace"),
                DocMemberReference::from_identifier("method"),
            ],
        );
        assert_eq!(reference.synthesized_identifier().as_deref(), Some("method"));
    }

    #[test]
    fn test_synthesized_identifier_through_symbol() {
        let inner = DocDeclarationReference::new(
            None,
            None,
            vec![DocMemberReference::from_identifier("iterator")],
        );
        let reference = DocDeclarationReference::new(
            None,
            None,
            vec![DocMemberReference::from_symbol(inner)],
        );
        assert_eq!(
            reference.synthesized_identifier().as_deref(),
            Some("iterator")
        );
    }

    #[test]
    fn test_selector_kinds() {
        assert_eq!(DocMemberSelector::new("2").selector_kind(), SelectorKind::Index);
        assert_eq!(DocMemberSelector::new("2").overload_index(), Some(2));
        assert_eq!(
            DocMemberSelector::new("class").selector_kind(),
            SelectorKind::System
        );
        assert_eq!(
            DocMemberSelector::new("MyLabel").selector_kind(),
            SelectorKind::Label
        );
    }

    #[test]
    #[should_panic(expected = "malformed selector")]
    fn test_selector_rejects_punctuation() {
        DocMemberSelector::new("a-b");
    }

    #[test]
    #[should_panic(expected = "exactly one")]
    fn test_member_reference_needs_identifier_or_symbol() {
        DocMemberReference::from_parts(None, None, None, None);
    }
}
