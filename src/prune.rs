use tracing::debug;

use crate::document::Document;

/// Class removed when no other is given: leftover YouTube widget wrappers.
pub const DEFAULT_CLASS: &str = "andropov_video--service-youtube";

/// Remove every element whose class list contains `class`. Returns how many.
pub fn remove_class(doc: &mut Document, class: &str) -> usize {
    let targets = doc.elements_with_class(class);
    let removed = targets.into_iter().filter(|&id| doc.remove(id)).count();
    debug!("Removed {} elements with class {}", removed, class);
    removed
}

/// Remove every `<a>` whose href is exactly `href`. Returns how many.
pub fn remove_links_to(doc: &mut Document, href: &str) -> usize {
    let targets = doc.elements_with_attr("a", "href", href);
    let removed = targets.into_iter().filter(|&id| doc.remove(id)).count();
    debug!("Removed {} links to {}", removed, href);
    removed
}
