//! Error recovery: malformed content yields a complete tree plus
//! diagnostics, never a panic

use docblock::parser::{parse_comment, ErrorCode, Severity};
use docblock::syntax::{DocNode, DocNodeKind, DocNodeRef};

/// Collect every node kind appearing in the summary subtree
fn summary_kinds(comment: &docblock::DocComment) -> Vec<DocNodeKind> {
    fn walk(node: DocNodeRef<'_>, out: &mut Vec<DocNodeKind>) {
        out.push(node.kind());
        for child in node.children() {
            walk(child, out);
        }
    }
    let mut out = Vec::new();
    for node in comment.summary_section().nodes() {
        walk(node.as_ref(), &mut out);
    }
    out
}

#[test]
fn test_link_without_target() {
    let context = parse_comment("/** See {@link} for details. */");

    assert!(!context.diagnostics().is_empty());
    assert!(context
        .diagnostics()
        .iter()
        .any(|d| d.code() == ErrorCode::E0402));

    // parsing continued past the malformed tag
    let kinds = summary_kinds(context.doc_comment());
    assert!(kinds.contains(&DocNodeKind::ErrorText));
    let text = context.doc_comment().summary_section().text();
    assert!(text.contains("for details."), "text: {text:?}");
}

#[test]
fn test_duplicate_returns_first_wins() {
    let context = parse_comment("/**\n * @returns first\n * @returns second\n */");

    let returns = context.doc_comment().returns_block().unwrap();
    assert_eq!(returns.content().text(), "first");

    let duplicate: Vec<_> = context
        .diagnostics()
        .iter()
        .filter(|d| d.code() == ErrorCode::E0501)
        .collect();
    assert_eq!(duplicate.len(), 1);
    // the diagnostic points at the second occurrence
    assert_eq!(duplicate[0].range().as_str(), "@returns");
    assert!(duplicate[0].location().line > 2);
}

#[test]
fn test_unclosed_fence_consumes_rest() {
    let context = parse_comment("/**\n * ```\n * line one\n * line two\n */");

    assert!(context
        .diagnostics()
        .iter()
        .any(|d| d.code() == ErrorCode::E0203));

    let fence = context
        .doc_comment()
        .summary_section()
        .nodes()
        .iter()
        .find_map(|n| match n {
            DocNode::FencedCode(f) => Some(f),
            _ => None,
        })
        .expect("fence node");
    assert_eq!(fence.code(), "line one\nline two");
}

#[test]
fn test_unterminated_code_span() {
    let context = parse_comment("/** Bad `span here\n * and more text. */");

    assert!(context
        .diagnostics()
        .iter()
        .any(|d| d.code() == ErrorCode::E0102));
    let kinds = summary_kinds(context.doc_comment());
    assert!(kinds.contains(&DocNodeKind::ErrorText));
    // the next line still parses as plain content
    assert!(context
        .doc_comment()
        .summary_section()
        .text()
        .contains("and more text."));
}

#[test]
fn test_stray_closing_brace() {
    let context = parse_comment("/** An unmatched } brace. */");
    assert!(context
        .diagnostics()
        .iter()
        .any(|d| d.code() == ErrorCode::E0205));
    let kinds = summary_kinds(context.doc_comment());
    assert!(kinds.contains(&DocNodeKind::ErrorText));
}

#[test]
fn test_stray_opening_brace() {
    let context = parse_comment("/** An { unmatched brace. */");
    assert!(context
        .diagnostics()
        .iter()
        .any(|d| d.code() == ErrorCode::E0205));
}

#[test]
fn test_unterminated_inline_tag_recovers_at_line_end() {
    let context = parse_comment("/** Start {@custom never closed\n * next line is fine. */");

    assert!(context
        .diagnostics()
        .iter()
        .any(|d| d.code() == ErrorCode::E0204));
    let text = context.doc_comment().summary_section().text();
    assert!(text.contains("next line is fine."), "text: {text:?}");
}

#[test]
fn test_param_without_name() {
    let context = parse_comment("/**\n * @param\n * orphaned description\n */");

    assert!(context
        .diagnostics()
        .iter()
        .any(|d| d.code() == ErrorCode::E0303));
    // degraded to a generic block, content preserved
    assert!(context.doc_comment().params().is_empty());
    let blocks = context.doc_comment().custom_blocks();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].content().text(), "orphaned description");
}

#[test]
fn test_malformed_link_target_falls_back_to_generic() {
    let context = parse_comment("/** See {@link ???}. */");

    assert!(context
        .diagnostics()
        .iter()
        .any(|d| d.code() == ErrorCode::E0401));
    // either a generic inline tag or error text stands in at the location
    let kinds = summary_kinds(context.doc_comment());
    assert!(
        kinds.contains(&DocNodeKind::InlineTag) || kinds.contains(&DocNodeKind::ErrorText),
        "kinds: {kinds:?}"
    );
}

#[test]
fn test_missing_comment_delimiters() {
    let context = parse_comment("no delimiters at all");
    assert!(context
        .diagnostics()
        .iter()
        .any(|d| d.code() == ErrorCode::E0201));
    assert!(context
        .diagnostics()
        .iter()
        .any(|d| d.code() == ErrorCode::E0202));
}

#[test]
fn test_duplicate_modifier_warns() {
    let context = parse_comment("/**\n * @beta\n * @beta\n */");
    let warning = context
        .diagnostics()
        .iter()
        .find(|d| d.code() == ErrorCode::E0502)
        .expect("duplicate modifier diagnostic");
    assert_eq!(warning.severity(), Severity::Warning);
    assert_eq!(context.doc_comment().modifier_tags().len(), 1);
}

#[test]
fn test_heavily_malformed_still_returns_tree() {
    let context = parse_comment("/** } {@ {@link} ` ``` \\ {@inheritDoc ??} */");
    // every problem is a diagnostic, not a panic, and a tree came back
    assert!(!context.diagnostics().is_empty());
    assert!(!context.doc_comment().summary_section().is_empty());
}

#[test]
fn test_diagnostics_carry_source_ranges() {
    let context = parse_comment("/** See {@link} here. */");
    for diagnostic in context.diagnostics() {
        let range = diagnostic.range();
        assert!(u32::from(range.end()) as usize <= context.text().len());
        assert!(!diagnostic.message().is_empty());
    }
}
