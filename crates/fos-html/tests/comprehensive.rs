//! Comprehensive tests for fos-html
//!
//! Structure, attributes and form-control state of parsed documents.

use fos_dom::{Namespace, NodeData, NodeId};
use fos_html::{Document, HtmlParser, ParserConfig};

fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html).expect("in-memory input cannot fail")
}

fn first(doc: &Document, tag: &str) -> NodeId {
    doc.tree()
        .descendants(doc.root())
        .find(|(_, n)| n.as_element().is_some_and(|e| e.name == tag))
        .map(|(id, _)| id)
        .unwrap_or_else(|| panic!("no <{tag}> in document"))
}

#[test]
fn test_parse_minimal_html() {
    let doc = parse("");
    assert!(doc.tree().len() >= 1, "Even empty HTML should have root");
    assert!(doc.body().is_some(), "Tree builder always creates a body");
}

#[test]
fn test_parse_nested_structure() {
    let html = r#"
        <html>
            <head><title>Test Page</title></head>
            <body>
                <div id="container">
                    <ul><li>Item 1</li><li>Item 2</li><li>Item 3</li></ul>
                </div>
            </body>
        </html>
    "#;

    let doc = parse(html);
    let container = doc.get_element_by_id("container").unwrap();
    let items = doc
        .tree()
        .descendants(container)
        .filter(|(_, n)| n.as_element().is_some_and(|e| e.name == "li"))
        .count();
    assert_eq!(items, 3);
}

#[test]
fn test_parse_with_attributes() {
    let html = r#"<div id="main" CLASS="container primary" data-value="123" hidden></div>"#;

    let doc = parse(html);
    let div = doc.get_element_by_id("main").unwrap();
    let tree = doc.tree();
    assert_eq!(tree.get_attribute(div, "class"), Some("container primary"));
    assert_eq!(tree.get_attribute(div, "data-value"), Some("123"));
    assert_eq!(tree.get_attribute(div, "hidden"), Some(""));
}

#[test]
fn test_parse_doctype_and_comments() {
    let doc = parse("<!DOCTYPE html><!-- note --><p>x</p>");
    let tree = doc.tree();

    let first_child = tree.children(doc.root()).next().map(|(_, n)| &n.data);
    assert!(matches!(first_child, Some(NodeData::Doctype { name, .. }) if name == "html"));
    assert!(
        tree.descendants(doc.root())
            .any(|(_, n)| matches!(&n.data, NodeData::Comment(c) if c == " note "))
    );
}

#[test]
fn test_parse_drop_doctype() {
    let parser = HtmlParser::with_config(ParserConfig {
        drop_doctype: true,
        url: "https://example.test/form".to_string(),
        ..Default::default()
    });
    let doc = parser.parse("<!DOCTYPE html><p>x</p>").unwrap();

    assert_eq!(doc.url(), "https://example.test/form");
    assert!(
        !doc.tree()
            .descendants(doc.root())
            .any(|(_, n)| matches!(n.data, NodeData::Doctype { .. }))
    );
}

#[test]
fn test_parse_forms() {
    let html = r#"
        <form id="f" action="/submit" method="post">
            <input type="text" id="name" name="name" value="Ada">
            <input type="checkbox" name="agree" checked>
            <select name="country">
                <option value="us">USA</option>
                <option value="uk" selected>UK</option>
            </select>
            <textarea name="message" rows="5">Hello
there</textarea>
            <button type="submit" name="go" value="now">Submit</button>
        </form>
    "#;

    let doc = parse(html);
    let tree = doc.tree();
    let form = doc.get_element_by_id("f").unwrap();

    assert_eq!(tree.form_elements(form).len(), 5);
    assert_eq!(tree.input_value(first(&doc, "input")).as_deref(), Some("Ada"));
    assert_eq!(tree.select_value(first(&doc, "select")), "uk");
    assert_eq!(tree.textarea_value(first(&doc, "textarea")), "Hello\nthere");

    let checkbox = tree
        .form_elements(form)
        .into_iter()
        .find(|&id| tree.get_attribute(id, "name") == Some("agree"))
        .unwrap();
    assert_eq!(tree.checked(checkbox), Some(true));
}

#[test]
fn test_parse_foreign_content() {
    let doc = parse(r#"<svg viewBox="0 0 10 10"><foreignObject></foreignObject></svg>"#);
    let svg = first(&doc, "svg");
    let elem = doc.tree().element(svg).unwrap();

    assert_eq!(elem.namespace, Namespace::Svg);
    assert!(elem.has_attr("viewBox"));
    first(&doc, "foreignObject");
}

#[test]
fn test_parse_large_document() {
    let mut html = String::from("<html><body>");
    for i in 0..1000 {
        html.push_str(&format!(r#"<div id="div-{i}" class="item"><p>Paragraph {i}</p></div>"#));
    }
    html.push_str("</body></html>");

    let doc = parse(&html);
    assert!(doc.tree().len() > 3000);
    assert!(doc.get_element_by_id("div-999").is_some());
}
