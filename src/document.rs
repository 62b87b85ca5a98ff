use ego_tree::{NodeId, NodeMut};
use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, Namespace, QualName};
use scraper::node::Element;
use scraper::{ElementRef, Html, Node};

const HTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// A parsed HTML page that stages mutate in place.
pub struct Document {
    html: Html,
}

/// Description of an element to build and splice into a [`Document`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewElement {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<NewElement>,
}

impl NewElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn child(mut self, child: NewElement) -> Self {
        self.children.push(child);
        self
    }

    fn to_node(&self) -> Node {
        let name = QualName::new(None, Namespace::from(HTML_NS), LocalName::from(self.tag.as_str()));
        let attrs = self
            .attrs
            .iter()
            .map(|(k, v)| Attribute {
                name: QualName::new(None, Namespace::from(""), LocalName::from(k.as_str())),
                value: StrTendril::from(v.as_str()),
            })
            .collect();
        Node::Element(Element::new(name, attrs))
    }
}

impl Document {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// Elements whose class list contains `class`, in document order.
    pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        self.elements_where(|el| el.classes().any(|c| c == class))
    }

    /// `tag` elements whose `name` attribute equals `value` exactly.
    pub fn elements_with_attr(&self, tag: &str, name: &str, value: &str) -> Vec<NodeId> {
        self.elements_where(|el| el.name() == tag && el.attr(name) == Some(value))
    }

    fn elements_where(&self, pred: impl Fn(&Element) -> bool) -> Vec<NodeId> {
        self.html
            .tree
            .root()
            .descendants()
            .filter(|node| matches!(node.value(), Node::Element(el) if pred(el)))
            .map(|node| node.id())
            .collect()
    }

    /// Whether `id` is still reachable from the document root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let root = self.html.tree.root().id();
        match self.html.tree.get(id) {
            Some(node) => node.id() == root || node.ancestors().any(|a| a.id() == root),
            None => false,
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.html.tree.get(id)?.value().as_element()?.attr(name)
    }

    /// Serialized markup of a single element, including the element itself.
    pub fn outer_html(&self, id: NodeId) -> Option<String> {
        let node = self.html.tree.get(id)?;
        ElementRef::wrap(node).map(|el| el.html())
    }

    /// Put `replacement` where `id` was. Returns false if `id` is unknown.
    pub fn replace(&mut self, id: NodeId, replacement: &NewElement) -> bool {
        let Some(mut target) = self.html.tree.get_mut(id) else {
            return false;
        };
        let inserted = target.insert_before(replacement.to_node());
        append_children(inserted, replacement);
        self.remove(id)
    }

    /// Detach `id` and its subtree. Returns false if `id` is unknown.
    pub fn remove(&mut self, id: NodeId) -> bool {
        match self.html.tree.get_mut(id) {
            Some(mut node) => {
                node.detach();
                true
            }
            None => false,
        }
    }

    pub fn to_html(&self) -> String {
        self.html.html()
    }
}

fn append_children(mut parent: NodeMut<'_, Node>, element: &NewElement) {
    for child in &element.children {
        let node = parent.append(child.to_node());
        append_children(node, child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_match_is_per_token() {
        let doc = Document::parse(
            r#"<div class="a andropov_video b"></div><div class="andropov_video--service-youtube"></div>"#,
        );
        assert_eq!(doc.elements_with_class("andropov_video").len(), 1);
        assert_eq!(doc.elements_with_class("andropov_video--service-youtube").len(), 1);
        assert!(doc.elements_with_class("andropov").is_empty());
    }

    #[test]
    fn class_matches_come_in_document_order() {
        let doc = Document::parse(r#"<p class="x" id="1"><span class="x" id="2"></span></p><p class="x" id="3"></p>"#);
        let ids: Vec<_> = doc
            .elements_with_class("x")
            .into_iter()
            .map(|id| doc.attr(id, "id").unwrap().to_string())
            .collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn replace_builds_nested_elements() {
        let mut doc = Document::parse(r#"<div id="old" class="m"></div>"#);
        let id = doc.elements_with_class("m")[0];
        let new = NewElement::new("video")
            .attr("controls", "")
            .child(NewElement::new("source").attr("src", "video/a.mp4"));
        assert!(doc.replace(id, &new));

        let html = Html::parse_document(&doc.to_html());
        let sel = scraper::Selector::parse("video > source").unwrap();
        let source = html.select(&sel).next().expect("source element");
        assert_eq!(source.value().attr("src"), Some("video/a.mp4"));
        assert!(!doc.to_html().contains("old"));
        assert!(doc.elements_with_class("m").is_empty());
    }

    #[test]
    fn removed_nodes_are_not_found_again() {
        let mut doc = Document::parse(r#"<a href="/x">x</a><a href="/x">y</a>"#);
        for id in doc.elements_with_attr("a", "href", "/x") {
            assert!(doc.remove(id));
        }
        assert!(doc.elements_with_attr("a", "href", "/x").is_empty());
        assert!(!doc.to_html().contains("<a"));
    }

    #[test]
    fn nodes_under_a_removed_parent_are_detached() {
        let mut doc = Document::parse(r#"<div class="outer"><span class="inner"></span></div>"#);
        let outer = doc.elements_with_class("outer")[0];
        let inner = doc.elements_with_class("inner")[0];
        assert!(doc.is_attached(inner));
        doc.remove(outer);
        assert!(!doc.is_attached(outer));
        assert!(!doc.is_attached(inner));
    }

    #[test]
    fn attribute_values_are_escaped_on_output() {
        let mut doc = Document::parse(r#"<i class="m"></i>"#);
        let id = doc.elements_with_class("m")[0];
        doc.replace(id, &NewElement::new("source").attr("src", r#"video/a "b".mp4"#));
        assert!(doc.to_html().contains(r#"src="video/a &quot;b&quot;.mp4""#));
    }
}
