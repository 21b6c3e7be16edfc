//! Round-trip fidelity: concatenating every parsed node's backing excerpt
//! in buffer order reproduces the extracted line content exactly

use docblock::base::Span;
use docblock::parser::parse_comment;
use docblock::syntax::DocNode;

/// Rebuild the comment's content text from the tree's excerpts, ordered by
/// buffer position, and compare against the lines + their newline bytes.
fn assert_round_trip(text: &str) {
    let context = parse_comment(text);
    assert!(context.ok(), "diagnostics: {:?}", context.diagnostics());

    let comment = DocNode::Comment(context.doc_comment().clone());
    let mut parts: Vec<Span> = comment
        .excerpts()
        .iter()
        .flat_map(|e| e.parts().iter().copied())
        .filter(|span| !span.is_empty())
        .collect();
    parts.sort_by_key(|span| span.start());
    parts.dedup();
    let rebuilt: String = parts
        .iter()
        .map(|span| &text[usize::from(span.start())..usize::from(span.end())])
        .collect();

    let mut expected = String::new();
    for (i, line) in context.lines().iter().enumerate() {
        expected.push_str(line.as_str());
        if i + 1 < context.lines().len() {
            let after = &text[usize::from(line.end())..];
            if after.starts_with("\r\n") {
                expected.push_str("\r\n");
            } else if after.starts_with('\n') {
                expected.push('\n');
            } else if after.starts_with('\r') {
                expected.push('\r');
            }
        }
    }

    assert_eq!(rebuilt, expected, "round trip failed for {text:?}");
}

#[test]
fn test_round_trip_basic() {
    assert_round_trip("/** Summary.\n * @param x - the value\n * @returns the result\n */");
}

#[test]
fn test_round_trip_inline_constructs() {
    assert_round_trip(
        "/** See {@link https://example.com|site} and `code` and \\{ escapes. */",
    );
}

#[test]
fn test_round_trip_declaration_reference() {
    assert_round_trip("/** {@link @scope/pkg/path#Class.method:2} text after */");
}

#[test]
fn test_round_trip_fenced_code() {
    assert_round_trip("/**\n * Intro\n * ```ts\n * const a = `1`;\n * ```\n * Outro\n */");
}

#[test]
fn test_round_trip_paragraphs_and_modifiers() {
    assert_round_trip("/**\n * One.\n *\n * Two.\n * @beta\n * @remarks\n * Detail.\n */");
}

#[test]
fn test_round_trip_inherit_doc_and_symbols() {
    assert_round_trip("/** {@inheritDoc Base.[Symbol].run} */");
}

#[test]
fn test_round_trip_generic_tag_spacing() {
    assert_round_trip("/** {@custom  spaced  content  } tail */");
}
