//! Locations reported for parsed documents.

use pretty_assertions::assert_eq;
use xmlspan_dom::{Document, NodeId, NodeKind, ParseOptions, Parser, XmlNode, parse};

const MODEL: &[&str] = &[
    "<Model",
    "  name=\"meta\"",
    "  dtdName=\"meta.dtd\"",
    "  className=\"MetaDef\"",
    "  packageName=\"org.eigenbase.xom\"",
    "  root=\"Model\"",
    "  version=\"1.0\"",
    ">",
    "  <!-- a comment",
    "       spread across multiple lines -->",
    "<Doc>",
    "  This model is the XOM Meta Model.  It is the specification of the model used",
    "  to define new XML-based models.  It is also an instance of itself.",
    "",
    "</Doc>",
    "",
    "<Element type=\"Model\">",
    "    <Doc>",
    "       Contains a \"single\" apostrope '.",
    "    </Doc>",
    "",
    "    <Attribute name=\"name\" required=\"true\"/>",
    "    <Attribute name=\"dtdName\"/>",
    "</Element>",
    "</Model>",
];

/// (start line, start column, end line, end column)
fn span(doc: &Document, node: &XmlNode) -> (usize, usize, usize, usize) {
    let loc = doc.location(node).unwrap();
    (
        loc.start_line(),
        loc.start_column(),
        loc.end_line(),
        loc.end_column(),
    )
}

fn check_model(line_sep: &str) {
    let doc = parse(&MODEL.join(line_sep)).unwrap();
    let model = &doc.root;
    assert_eq!(model.tag_name(), Some("Model"));
    assert_eq!(model.attribute("packageName"), Some("org.eigenbase.xom"));
    assert_eq!(span(&doc, model), (1, 1, 25, 9));

    let element = model.children_named("Element")[0];
    assert_eq!(span(&doc, element), (17, 1, 24, 11));

    let attributes = element.children_named("Attribute");
    assert_eq!(attributes.len(), 2);
    assert_eq!(span(&doc, attributes[0]), (22, 5, 22, 45));
    assert_eq!(span(&doc, attributes[1]), (23, 5, 23, 32));
    assert_eq!(
        doc.location(attributes[1]).unwrap().text(false),
        "<Attribute name=\"dtdName\"/>"
    );
}

#[test]
fn test_model_document_unix_line_endings() {
    check_model("\n");
}

#[test]
fn test_model_document_windows_line_endings() {
    check_model("\r\n");
}

#[test]
fn test_model_doc_text() {
    let doc = parse(&MODEL.join("\n")).unwrap();
    let docs = doc.root.children_named("Doc");
    assert_eq!(docs.len(), 1);
    assert!(docs[0].text().contains("XOM Meta Model"));

    let inner = doc.root.children_named("Element")[0].children_named("Doc")[0];
    assert_eq!(inner.text().trim(), "Contains a \"single\" apostrope '.");
    assert_eq!(span(&doc, inner), (18, 5, 20, 11));
}

#[test]
fn test_every_element_location_matches_its_tag() {
    let source = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE catalog [
  <!ELEMENT catalog (book*)>
  <!ENTITY pub "Publisher Inc">
]>
<catalog>
  <!-- <book id="commented-out"/> -->
  <book id="b1" note='1 > 0'>
    <title>Rust &amp; XML</title>
    <blurb><![CDATA[<b>bold</b> claims]]></blurb>
  </book>
  <?render fast?>
  <book id="b2"/>
</catalog>
"#;
    let doc = parse(source).unwrap();

    let elements: Vec<_> = doc
        .root
        .descendants()
        .into_iter()
        .filter(|n| n.is_element())
        .collect();
    assert_eq!(elements.len(), 5);

    for node in elements {
        let loc = doc.location(node).unwrap();
        let name = node.tag_name().unwrap();
        let head = loc.text(true);
        assert!(head.starts_with(&format!("<{name}")), "{head}");
        assert!(head.ends_with('>'), "{head}");
        assert!(loc.text(false).ends_with('>'));
    }

    let books = doc.root.children_named("book");
    assert_eq!(books[0].attribute("note"), Some("1 > 0"));
    assert_eq!(doc.location(books[0]).unwrap().start_line(), 8);
    assert_eq!(doc.location(books[1]).unwrap().text(false), r#"<book id="b2"/>"#);
}

#[test]
fn test_non_elements_have_no_location() {
    let doc = parse("<a>text<![CDATA[raw]]><!-- c --><b/></a>").unwrap();
    for child in doc.root.child_nodes() {
        let expected = child.kind() == NodeKind::Element;
        assert_eq!(doc.location(child).is_some(), expected, "{child:?}");
    }
}

#[test]
fn test_trimmed_tree_keeps_element_locations() {
    let source = "<a>\n  <b>  x  </b>\n  <c/>\n</a>";
    let doc = Parser::new(ParseOptions::new().trim_text(true))
        .parse(source)
        .unwrap();

    let c = doc.root.children_named("c")[0];
    assert_eq!(span(&doc, c), (3, 3, 3, 7));
    assert_eq!(doc.root.children_named("b")[0].text(), "x");
}

#[test]
fn test_annotator_is_exposed() {
    let doc = parse("<a>t<b/></a>").unwrap();
    let annotator = doc.annotator().unwrap();
    assert_eq!(annotator.source(), "<a>t<b/></a>");
    assert_eq!(annotator.bound_count(), 2);

    let b = doc.root.element_children()[0];
    assert!(annotator.is_bound(doc.root.id));
    assert!(annotator.is_bound(b.id));
    // Text nodes are never bound
    assert!(!annotator.is_bound(doc.root.child_nodes()[0].id));
    assert!(!annotator.is_bound(NodeId(99)));
}

#[test]
fn test_syntax_errors_surface_before_scanning() {
    let err = parse("<a><b></a>").unwrap_err();
    assert!(matches!(err, xmlspan_dom::Error::Xml { .. }), "{err}");
}

#[test]
fn test_element_outline() {
    let doc = parse(&MODEL.join("\n")).unwrap();
    let outline: Vec<String> = doc
        .root
        .descendants()
        .into_iter()
        .filter_map(|node| {
            let loc = doc.location(node)?;
            Some(format!("{} @ {}", node.tag_name()?, loc))
        })
        .collect();

    insta::assert_snapshot!(outline.join("\n"), @r"
    Model @ line 1, column 1
    Doc @ line 11, column 1
    Element @ line 17, column 1
    Doc @ line 18, column 5
    Attribute @ line 22, column 5
    Attribute @ line 23, column 5
    ");
}

#[test]
fn test_gt_inside_processing_instruction() {
    let doc = parse("<?pi a > <b> ?><r/>").unwrap();
    assert_eq!(doc.root.tag_name(), Some("r"));
    assert_eq!(span(&doc, &doc.root), (1, 16, 1, 20));

    let doc = parse("<r>\n  <?render a>b?>\n  <c/>\n</r>").unwrap();
    let c = doc.root.children_named("c")[0];
    assert_eq!(span(&doc, c), (3, 3, 3, 7));
}

#[test]
fn test_comment_in_doctype_subset() {
    let doc = parse("<!DOCTYPE r [<!-- don't -->]>\n<r><c/></r>").unwrap();
    assert_eq!(span(&doc, &doc.root), (2, 1, 2, 12));

    let c = doc.root.element_children()[0];
    assert_eq!(span(&doc, c), (2, 4, 2, 8));
}
