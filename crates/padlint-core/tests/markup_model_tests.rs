//! End-to-end checks of the markup front end on realistic component files

use padlint_core::cst::ast::{AstNode, Element};
use padlint_core::cst::{parse_markup, MarkupSyntaxElement, MarkupSyntaxKind, MarkupSyntaxNode};
use padlint_core::{walk_elements, ElementVisit, MarkupModel, TokenLookup};

const COMPONENT: &str = r#"import { Icons } from './icons';

export function Toolbar({ items, onPick }) {
  if (items.length < 2) return null;

  return (
    <nav className="toolbar" aria-label='tools'>
      <Icons.Fork size={16} />

      <ul>
        {items.map((item) => (
          <li key={item.id} onClick={() => onPick(`${item.id}`)}>
            {item.label}
          </li>
        ))}
      </ul>
      <>
        <span>{" } "}</span>
      </>
    </nav>
  );
}
"#;

/// Indented `Kind@start..end` outline of the node structure (tokens omitted)
fn outline(node: &MarkupSyntaxNode) -> String {
    fn go(element: MarkupSyntaxElement, depth: usize, out: &mut String) {
        if let Some(node) = element.as_node() {
            let range = node.text_range();
            out.push_str(&format!(
                "{}{:?}@{}..{}\n",
                "  ".repeat(depth),
                node.kind(),
                u32::from(range.start()),
                u32::from(range.end())
            ));
            for child in node.children_with_tokens() {
                go(child, depth + 1, out);
            }
        }
    }
    let mut out = String::new();
    go(MarkupSyntaxElement::Node(node.clone()), 0, &mut out);
    out
}

#[test]
fn component_file_is_lossless_and_error_free() {
    let (cst, errors) = parse_markup(COMPONENT);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(cst.text().to_string(), COMPONENT);
}

#[test]
fn component_file_structure() {
    let model = MarkupModel::parse("Toolbar.jsx", COMPONENT);
    let mut names = Vec::new();
    walk_elements(&model, &mut |_: &MarkupModel, visit: &ElementVisit| {
        let name = visit.element.name().map(|n| n.text()).unwrap_or_default();
        let children: Vec<String> = visit
            .children
            .iter()
            .filter_map(|c| c.name())
            .map(|n| n.text())
            .collect();
        names.push(format!("{name} -> [{}]", children.join(", ")));
    });

    insta::assert_snapshot!(names.join("\n"), @r"
    nav -> [Icons.Fork, ul]
    Icons.Fork -> []
    ul -> []
    span -> []
    ");
}

#[test]
fn small_tree_outline() {
    let (cst, _) = parse_markup("<a>\n  <b x=\"1\"/>\n</a>");
    insta::assert_snapshot!(outline(&cst), @r"
    Document@0..21
      Element@0..21
        OpeningElement@0..3
          ElementName@1..2
        Element@6..16
          OpeningElement@6..16
            ElementName@7..8
            Attribute@9..14
        ClosingElement@17..21
          ElementName@19..20
    ");
}

#[test]
fn token_lookup_reaches_sibling_boundaries() {
    let source = "<ul>\n  <li/>\n\n  <li/>\n</ul>";
    let model = MarkupModel::parse("list.jsx", source);
    let document = model.document().expect("document");
    let ul = document.elements().next().expect("ul");
    let items: Vec<Element> = ul.child_elements().collect();
    assert_eq!(items.len(), 2);

    let second_start = model.span(items[1].syntax()).start;
    let before = model
        .token_before(second_start, TokenLookup::IncludeComments)
        .expect("token");
    assert_eq!(
        usize::from(before.text_range().end()),
        model.span(items[0].syntax()).end
    );

    let first_line = model.source().line_of(model.span(items[0].syntax()).end);
    let second_line = model.source().line_of(second_start);
    assert_eq!(second_line - first_line - 1, 1);
}

#[test]
fn generic_less_than_does_not_break_later_markup() {
    let source = "const x = a < b;\nconst el = <div>\n  <p/>\n</div>;\n";
    let (cst, errors) = parse_markup(source);
    assert!(errors.is_empty(), "{errors:?}");
    let elements = cst
        .descendants()
        .filter(|n| n.kind() == MarkupSyntaxKind::Element)
        .count();
    assert_eq!(elements, 2);
}
