mod content;
mod node;

pub use content::Content;
pub use node::Element;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Collect the chain of element IDs from `root` down to `id`, inclusive.
/// Returns None if `id` is not in the tree.
pub fn element_path(root: &Element, id: &str) -> Option<Vec<String>> {
    fn walk(element: &Element, id: &str, path: &mut Vec<String>) -> bool {
        path.push(element.id.clone());
        if element.id == id {
            return true;
        }
        if let Content::Children(children) = &element.content {
            for child in children {
                if walk(child, id, path) {
                    return true;
                }
            }
        }
        path.pop();
        false
    }

    let mut path = Vec::new();
    walk(root, id, &mut path).then_some(path)
}
