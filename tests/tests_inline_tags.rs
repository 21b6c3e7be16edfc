//! Inline tags: generic, link (URL and declaration reference), inherit-doc

use docblock::parser::parse_comment;
use docblock::syntax::{DocInheritDocTag, DocInlineTag, DocLinkTag, DocNodeRef, SelectorKind};

/// Find the first node of a type in the summary subtree
fn find_in_summary<'a, T, F>(comment: &'a docblock::DocComment, pick: F) -> Option<&'a T>
where
    F: Fn(DocNodeRef<'a>) -> Option<&'a T> + Copy,
{
    fn walk<'a, T, F>(node: DocNodeRef<'a>, pick: F) -> Option<&'a T>
    where
        F: Fn(DocNodeRef<'a>) -> Option<&'a T> + Copy,
    {
        if let Some(found) = pick(node) {
            return Some(found);
        }
        node.children().into_iter().find_map(|c| walk(c, pick))
    }
    comment
        .summary_section()
        .nodes()
        .iter()
        .find_map(|n| walk(n.as_ref(), pick))
}

fn find_link(comment: &docblock::DocComment) -> Option<&DocLinkTag> {
    find_in_summary(comment, |n| match n {
        DocNodeRef::LinkTag(link) => Some(link),
        _ => None,
    })
}

#[test]
fn test_generic_inline_tag_content_is_verbatim() {
    let context = parse_comment("/** Before {@custom raw  content } after. */");
    assert!(context.ok());

    let tag: &DocInlineTag = find_in_summary(context.doc_comment(), |n| match n {
        DocNodeRef::InlineTag(tag) => Some(tag),
        _ => None,
    })
    .expect("inline tag");
    assert_eq!(tag.name(), "@custom");
    // interior is verbatim: internal and trailing spacing preserved
    assert_eq!(tag.tag_content(), "raw  content ");
}

#[test]
fn test_link_with_url_destination() {
    let context = parse_comment("/** {@link https://example.com/page} */");
    assert!(context.ok(), "diagnostics: {:?}", context.diagnostics());

    let link = find_link(context.doc_comment()).expect("link tag");
    assert_eq!(link.url_destination(), Some("https://example.com/page"));
    assert!(link.code_destination().is_none());
    assert_eq!(link.link_text(), None);
    assert_eq!(link.effective_display_text(), None);
}

#[test]
fn test_link_with_url_and_display_text() {
    let context = parse_comment("/** {@link https://example.com|the site} */");
    assert!(context.ok());

    let link = find_link(context.doc_comment()).expect("link tag");
    assert_eq!(link.url_destination(), Some("https://example.com"));
    assert_eq!(link.link_text(), Some("the site"));
    assert_eq!(link.effective_display_text().as_deref(), Some("the site"));
}

#[test]
fn test_link_with_member_path() {
    let context = parse_comment("/** {@link Namespace.Class.method} */");
    assert!(context.ok(), "diagnostics: {:?}", context.diagnostics());

    let link = find_link(context.doc_comment()).expect("link tag");
    let reference = link.code_destination().expect("declaration reference");
    assert!(reference.package_name().is_none());

    let members = reference.member_references();
    assert_eq!(members.len(), 3);
    let names: Vec<&str> = members
        .iter()
        .map(|m| m.member_identifier().unwrap().identifier())
        .collect();
    assert_eq!(names, vec!["Namespace", "Class", "method"]);

    // display text synthesized from the last segment
    assert_eq!(link.effective_display_text().as_deref(), Some("method"));
}

#[test]
fn test_link_with_package_and_import_path() {
    let context = parse_comment("/** {@link my-package/sub/path#Thing} */");
    assert!(context.ok(), "diagnostics: {:?}", context.diagnostics());

    let link = find_link(context.doc_comment()).expect("link tag");
    let reference = link.code_destination().unwrap();
    assert_eq!(reference.package_name(), Some("my-package"));
    assert_eq!(reference.import_path(), Some("/sub/path"));
    assert_eq!(
        reference.member_references()[0]
            .member_identifier()
            .unwrap()
            .identifier(),
        "Thing"
    );
}

#[test]
fn test_link_with_scoped_package() {
    let context = parse_comment("/** {@link @my-scope/my-package#Widget.render} */");
    assert!(context.ok(), "diagnostics: {:?}", context.diagnostics());

    let reference = find_link(context.doc_comment())
        .unwrap()
        .code_destination()
        .unwrap();
    assert_eq!(reference.package_name(), Some("@my-scope/my-package"));
}

#[test]
fn test_link_with_overload_selector() {
    let context = parse_comment("/** {@link Button.render:2} */");
    assert!(context.ok(), "diagnostics: {:?}", context.diagnostics());

    let reference = find_link(context.doc_comment())
        .unwrap()
        .code_destination()
        .unwrap();
    let selector = reference.member_references()[1].selector().unwrap();
    assert_eq!(selector.selector(), "2");
    assert_eq!(selector.selector_kind(), SelectorKind::Index);
    assert_eq!(selector.overload_index(), Some(2));
}

#[test]
fn test_link_with_system_selector() {
    let context = parse_comment("/** {@link Widget:class} */");
    assert!(context.ok());
    let reference = find_link(context.doc_comment())
        .unwrap()
        .code_destination()
        .unwrap();
    let selector = reference.member_references()[0].selector().unwrap();
    assert_eq!(selector.selector_kind(), SelectorKind::System);
}

#[test]
fn test_link_with_member_symbol() {
    let context = parse_comment("/** {@link Collection.[CustomSymbol]} */");
    assert!(context.ok(), "diagnostics: {:?}", context.diagnostics());

    let reference = find_link(context.doc_comment())
        .unwrap()
        .code_destination()
        .unwrap();
    let symbol = reference.member_references()[1].member_symbol().unwrap();
    let inner = symbol.symbol_reference();
    assert_eq!(
        inner.member_references()[0]
            .member_identifier()
            .unwrap()
            .identifier(),
        "CustomSymbol"
    );
    // symbol segments also satisfy display-text synthesis
    assert_eq!(
        find_link(context.doc_comment())
            .unwrap()
            .effective_display_text()
            .as_deref(),
        Some("CustomSymbol")
    );
}

#[test]
fn test_link_reference_with_display_text() {
    let context = parse_comment("/** {@link Widget.render|click here} */");
    assert!(context.ok());
    let link = find_link(context.doc_comment()).unwrap();
    assert!(link.code_destination().is_some());
    assert_eq!(link.effective_display_text().as_deref(), Some("click here"));
}

#[test]
fn test_inherit_doc_without_target() {
    let context = parse_comment("/** {@inheritDoc} */");
    assert!(context.ok());
    let tag: &DocInheritDocTag = find_in_summary(context.doc_comment(), |n| match n {
        DocNodeRef::InheritDocTag(tag) => Some(tag),
        _ => None,
    })
    .expect("inheritDoc tag");
    assert!(tag.declaration_reference().is_none());
}

#[test]
fn test_inherit_doc_with_target() {
    let context = parse_comment("/** {@inheritDoc Base.method} */");
    assert!(context.ok(), "diagnostics: {:?}", context.diagnostics());
    let tag: &DocInheritDocTag = find_in_summary(context.doc_comment(), |n| match n {
        DocNodeRef::InheritDocTag(tag) => Some(tag),
        _ => None,
    })
    .expect("inheritDoc tag");
    let reference = tag.declaration_reference().unwrap();
    assert_eq!(reference.member_references().len(), 2);
}

#[test]
fn test_inline_tag_inside_block_content() {
    let context = parse_comment("/**\n * @returns a {@link Widget} instance\n */");
    assert!(context.ok(), "diagnostics: {:?}", context.diagnostics());
    let returns = context.doc_comment().returns_block().unwrap();
    let has_link = returns.content().nodes()[0]
        .children()
        .iter()
        .any(|c| matches!(c, DocNodeRef::LinkTag(_)));
    assert!(has_link);
    assert_eq!(returns.content().text(), "a Widget instance");
}

#[test]
fn test_escaped_brace_inside_tag_content() {
    let context = parse_comment("/** {@custom has \\} inside} */");
    assert!(context.ok(), "diagnostics: {:?}", context.diagnostics());
    let tag: &DocInlineTag = find_in_summary(context.doc_comment(), |n| match n {
        DocNodeRef::InlineTag(tag) => Some(tag),
        _ => None,
    })
    .expect("inline tag");
    assert_eq!(tag.tag_content(), "has \\} inside");
}

#[test]
fn test_label_parses_as_generic_inline_tag() {
    let context = parse_comment("/** {@label WIDGET} */");
    assert!(context.ok());
    let tag: &DocInlineTag = find_in_summary(context.doc_comment(), |n| match n {
        DocNodeRef::InlineTag(tag) => Some(tag),
        _ => None,
    })
    .expect("inline tag");
    assert_eq!(tag.name(), "@label");
    assert_eq!(tag.tag_content(), "WIDGET");
}

#[test]
fn test_multiline_generic_tag_content() {
    let context = parse_comment("/** {@custom spans\n * two lines} and on. */");
    assert!(context.ok(), "diagnostics: {:?}", context.diagnostics());
    let tag: &DocInlineTag = find_in_summary(context.doc_comment(), |n| match n {
        DocNodeRef::InlineTag(tag) => Some(tag),
        _ => None,
    })
    .expect("inline tag");
    assert_eq!(tag.tag_content(), "spans\ntwo lines");
}
