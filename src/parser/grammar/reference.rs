//! Declaration reference expression parsing
//!
//! Grammar:
//!
//! ```text
//! reference    := [ package-part '#' ] member ( '.' member )*
//! package-part := [ '@' scope '/' ] name [ '/' path ]
//! member       := ( identifier | '[' reference ']' ) [ ':' selector ]
//! ```
//!
//! Failure is reported as `Err(())`; the caller owns the bookmark and the
//! recovery strategy. No resolution happens here - the result is an
//! expression only.

use super::NodeParser;
use crate::parser::lexer::TokenKind;
use crate::syntax::excerpt::{Excerpt, ExcerptKind};
use crate::syntax::nodes::{
    DocDeclarationReference, DocMemberIdentifier, DocMemberReference, DocMemberSelector,
    DocMemberSymbol,
};

pub(crate) fn parse_declaration_reference(
    p: &mut NodeParser<'_>,
) -> Result<DocDeclarationReference, ()> {
    let has_package_part = scan_for_hash(p);

    let mut package_name = None;
    let mut import_path = None;
    let mut hash = None;

    if has_package_part {
        if p.reader.kind() == TokenKind::AtSign {
            // scoped package: @scope/name
            p.reader.read();
            if !read_package_chars(p) {
                return Err(());
            }
            if p.reader.kind() != TokenKind::Slash {
                return Err(());
            }
            p.reader.read();
        }
        if !read_package_chars(p) {
            return Err(());
        }
        package_name = Some(p.reader.extract_accumulated(ExcerptKind::PackageName));

        if p.reader.kind() == TokenKind::Slash {
            while p.reader.kind() == TokenKind::Slash {
                p.reader.read();
                if !read_package_chars(p) {
                    return Err(());
                }
            }
            import_path = Some(p.reader.extract_accumulated(ExcerptKind::ImportPath));
        }

        if p.reader.kind() != TokenKind::Pound {
            return Err(());
        }
        p.reader.read();
        hash = Some(p.reader.extract_accumulated(ExcerptKind::ImportHash));
    }

    let mut members = Vec::new();
    if at_member_start(p) {
        members.push(parse_member(p, None)?);
        while p.reader.kind() == TokenKind::Period {
            p.reader.read();
            let dot = p.reader.extract_accumulated(ExcerptKind::MemberDot);
            members.push(parse_member(p, Some(dot))?);
        }
    }

    if members.is_empty() && !has_package_part {
        return Err(());
    }
    Ok(DocDeclarationReference::from_excerpts(
        package_name,
        import_path,
        hash,
        members,
    ))
}

/// Look ahead for a `#` before the reference terminates, which signals a
/// package part
fn scan_for_hash(p: &NodeParser<'_>) -> bool {
    let mut i = 0;
    loop {
        match p.reader.peek_kind(i) {
            TokenKind::Pound => return true,
            TokenKind::Spacing
            | TokenKind::Pipe
            | TokenKind::RightBrace
            | TokenKind::RightBracket
            | TokenKind::Newline
            | TokenKind::EndOfInput => return false,
            _ => i += 1,
        }
    }
}

/// Consume a run of package-name characters; `true` when it contained at
/// least one word
fn read_package_chars(p: &mut NodeParser<'_>) -> bool {
    let mut any_word = false;
    while matches!(
        p.reader.kind(),
        TokenKind::AsciiWord
            | TokenKind::Hyphen
            | TokenKind::Period
            | TokenKind::Underscore
            | TokenKind::Dollar
    ) {
        if p.reader.kind() == TokenKind::AsciiWord {
            any_word = true;
        }
        p.reader.read();
    }
    any_word
}

fn at_member_start(p: &NodeParser<'_>) -> bool {
    matches!(
        p.reader.kind(),
        TokenKind::AsciiWord
            | TokenKind::Underscore
            | TokenKind::Dollar
            | TokenKind::LeftBracket
    )
}

fn parse_member(
    p: &mut NodeParser<'_>,
    dot: Option<Excerpt>,
) -> Result<DocMemberReference, ()> {
    let mut identifier = None;
    let mut symbol = None;

    match p.reader.kind() {
        TokenKind::LeftBracket => {
            p.reader.read();
            let open = p.reader.extract_accumulated(ExcerptKind::MemberSymbolBracket);
            let inner = parse_declaration_reference(p)?;
            if p.reader.kind() != TokenKind::RightBracket {
                return Err(());
            }
            p.reader.read();
            let close = p.reader.extract_accumulated(ExcerptKind::MemberSymbolBracket);
            symbol = Some(DocMemberSymbol::from_excerpts(open, inner, Some(close)));
        }
        TokenKind::AsciiWord | TokenKind::Underscore | TokenKind::Dollar => {
            while matches!(
                p.reader.kind(),
                TokenKind::AsciiWord | TokenKind::Underscore | TokenKind::Dollar
            ) {
                p.reader.read();
            }
            let excerpt = p.reader.extract_accumulated(ExcerptKind::MemberIdentifier);
            identifier = Some(DocMemberIdentifier::from_excerpt(excerpt));
        }
        _ => return Err(()),
    }

    let mut selector = None;
    if p.reader.kind() == TokenKind::Colon {
        p.reader.read();
        let colon = p.reader.extract_accumulated(ExcerptKind::SelectorColon);
        if !matches!(
            p.reader.kind(),
            TokenKind::AsciiWord | TokenKind::Underscore
        ) {
            return Err(());
        }
        while matches!(
            p.reader.kind(),
            TokenKind::AsciiWord | TokenKind::Underscore
        ) {
            p.reader.read();
        }
        let excerpt = p.reader.extract_accumulated(ExcerptKind::MemberSelector);
        selector = Some(DocMemberSelector::from_excerpts(colon, excerpt));
    }

    Ok(DocMemberReference::from_parts(dot, identifier, symbol, selector))
}
