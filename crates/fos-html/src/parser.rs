//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to our arena DOM.

use std::io::Read;

use fos_dom::{Document, DomTree, ElementData, Namespace, NodeId};
use html5ever::tendril::TendrilSink;
use html5ever::tokenizer::TokenizerOpts;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::ParseError;

/// Parser configuration
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Parse as if scripting were enabled (affects `<noscript>`)
    pub scripting_enabled: bool,
    /// Report exact (more expensive) parse error messages
    pub exact_errors: bool,
    /// Discard the DOCTYPE node
    pub drop_doctype: bool,
    /// Keep comment nodes in the tree
    pub keep_comments: bool,
    /// URL recorded on the resulting document
    pub url: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            scripting_enabled: true,
            exact_errors: false,
            drop_doctype: false,
            keep_comments: true,
            url: "about:blank".to_string(),
        }
    }
}

impl ParserConfig {
    fn parse_opts(&self) -> ParseOpts {
        ParseOpts {
            tokenizer: TokenizerOpts {
                exact_errors: self.exact_errors,
                ..Default::default()
            },
            tree_builder: TreeBuilderOpts {
                exact_errors: self.exact_errors,
                scripting_enabled: self.scripting_enabled,
                drop_doctype: self.drop_doctype,
                ..Default::default()
            },
        }
    }
}

/// HTML5 parser
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    config: ParserConfig,
}

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with explicit configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parser configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, ParseError> {
        self.parse_reader(&mut html.as_bytes())
    }

    /// Parse markup as body content, returning the document and its body
    ///
    /// The body is created by the tree builder even when the markup has none.
    pub fn parse_fragment(&self, html: &str) -> Result<(Document, NodeId), ParseError> {
        let doc = self.parse(html)?;
        let body = doc.body().unwrap_or(doc.root());
        Ok((doc, body))
    }

    /// Parse UTF-8 HTML from a reader
    pub fn parse_reader<R: Read>(&self, reader: &mut R) -> Result<Document, ParseError> {
        tracing::debug!("Parsing HTML document: {}", self.config.url);

        let dom = parse_document(RcDom::default(), self.config.parse_opts())
            .from_utf8()
            .read_from(reader)?;

        let mut document = Document::empty(&self.config.url);
        self.convert_node(&dom.document, document.tree_mut(), NodeId::ROOT);
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }

    /// Convert an RcDom node (and its subtree) into `tree` under `parent`
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        let id = match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent);
                }
                return;
            }
            RcNodeData::Doctype {
                name,
                public_id,
                system_id,
            } => tree.create_doctype(name, public_id, system_id),
            RcNodeData::Text { contents } => tree.create_text(&contents.borrow()),
            RcNodeData::Comment { contents } => {
                if !self.config.keep_comments {
                    return;
                }
                tree.create_comment(contents)
            }
            RcNodeData::Element { name, attrs, .. } => {
                let mut elem = ElementData::new_ns(&name.local, Namespace::from_uri(&name.ns));
                for attr in attrs.borrow().iter() {
                    elem.set_attr(&attr.name.local, attr.value.to_string());
                }
                tree.create_element_from(elem)
            }
            RcNodeData::ProcessingInstruction { .. } => return,
        };

        if let Err(err) = tree.append_child(parent, id) {
            tracing::warn!(?err, "dropping node the tree builder placed under a leaf");
            return;
        }

        for child in handle.children.borrow().iter() {
            self.convert_node(child, tree, id);
        }
    }
}
