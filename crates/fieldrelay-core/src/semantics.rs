use crate::node::{ElementHandle, Node, NodeAttributes};

/// Default depth cap for walking down from a window root.
pub const MAX_SEARCH_DEPTH: usize = 128;
/// Upper bound on elements visited by a single focused-field search.
pub const MAX_SEARCH_NODES: usize = 8192;

/// Field classification over a flat attribute bag.
///
/// Any class name containing `EditText` counts (the base widget and every
/// subclass), as does anything both editable and focusable. Over-approximates
/// on purpose to pick up custom input widgets.
pub fn attributes_describe_text_field(attrs: &NodeAttributes) -> bool {
    let class_name = attrs.class_name.as_deref().unwrap_or("");
    class_name.contains("EditText") || (attrs.editable && attrs.focusable)
}

/// A stale handle is never a text field.
pub fn is_text_field(node: &dyn ElementHandle) -> bool {
    node.attributes()
        .map(|a| attributes_describe_text_field(&a))
        .unwrap_or(false)
}

/// Pre-order, first-match search for a focused text field under `root`.
///
/// Children are visited left to right, so ties resolve in document order.
/// Depth is capped at `max_depth` and the total walk at `MAX_SEARCH_NODES`;
/// a cyclic or absurdly deep tree ends the search with `None`.
pub fn find_focused_text_field(root: &Node, max_depth: usize) -> Option<Node> {
    let mut budget = MAX_SEARCH_NODES;
    let found = search(root, 0, max_depth, &mut budget);
    if found.is_none() && budget == 0 {
        log::debug!("find_focused_text_field: node budget exhausted under {}", root.id());
    }
    found
}

fn search(node: &Node, depth: usize, max_depth: usize, budget: &mut usize) -> Option<Node> {
    if depth > max_depth || *budget == 0 {
        return None;
    }
    *budget -= 1;

    if let Some(attrs) = node.attributes()
        && attrs.focused
        && attributes_describe_text_field(&attrs)
    {
        return Some(node.clone());
    }

    for i in 0..node.child_count() {
        let Some(child) = node.child(i) else {
            continue;
        };
        if let Some(found) = search(&child, depth + 1, max_depth, budget) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeNode;

    #[test]
    fn test_edit_text_class_is_field_regardless_of_flags() {
        for (editable, focusable) in [(false, false), (true, false), (false, true), (true, true)] {
            let attrs = NodeAttributes {
                class_name: Some("android.widget.EditText".into()),
                editable,
                focusable,
                ..Default::default()
            };
            assert!(attributes_describe_text_field(&attrs));
        }
        let sub = NodeAttributes {
            class_name: Some("com.google.android.material.textfield.TextInputEditText".into()),
            ..Default::default()
        };
        assert!(attributes_describe_text_field(&sub));
    }

    #[test]
    fn test_editable_focusable_custom_widget_is_field() {
        let attrs = NodeAttributes {
            class_name: Some("com.tencent.mm.ui.widget.MMInput".into()),
            editable: true,
            focusable: true,
            ..Default::default()
        };
        assert!(attributes_describe_text_field(&attrs));
    }

    #[test]
    fn test_plain_views_are_not_fields() {
        let button = NodeAttributes {
            class_name: Some("android.widget.Button".into()),
            focusable: true,
            ..Default::default()
        };
        assert!(!attributes_describe_text_field(&button));
        assert!(!attributes_describe_text_field(&NodeAttributes::default()));
    }

    #[test]
    fn test_stale_node_is_not_field() {
        let field = FakeNode::text_field("com.example.chat");
        assert!(is_text_field(&*field));
        field.set_stale(true);
        assert!(!is_text_field(&*field));
    }

    #[test]
    fn test_search_returns_first_focused_field_in_document_order() {
        let root = FakeNode::container("com.example.chat");
        let left = FakeNode::container("com.example.chat");
        let a = FakeNode::text_field("com.example.chat");
        let b = FakeNode::text_field("com.example.chat");
        a.update(|x| x.focused = true);
        b.update(|x| x.focused = true);
        left.append(&a);
        root.append(&left);
        root.append(&b);

        let root: Node = root;
        let found = find_focused_text_field(&root, MAX_SEARCH_DEPTH).expect("focused field");
        assert_eq!(found.id(), a.id());
    }

    #[test]
    fn test_search_matches_root_itself() {
        let root = FakeNode::text_field("com.example.chat");
        root.update(|x| x.focused = true);
        let handle: Node = root.clone();
        let found = find_focused_text_field(&handle, MAX_SEARCH_DEPTH).expect("root");
        assert_eq!(found.id(), root.id());
    }

    #[test]
    fn test_search_skips_unfocused_fields_and_focused_non_fields() {
        let root = FakeNode::container("com.example.chat");
        let idle = FakeNode::text_field("com.example.chat");
        let focused_button = FakeNode::container("com.example.chat");
        focused_button.update(|x| x.focused = true);
        root.append(&idle);
        root.append(&focused_button);

        let root: Node = root;
        assert!(find_focused_text_field(&root, MAX_SEARCH_DEPTH).is_none());
    }

    #[test]
    fn test_search_respects_depth_cap() {
        let root = FakeNode::container("com.example.chat");
        let mut parent = root.clone();
        for _ in 0..10 {
            let next = FakeNode::container("com.example.chat");
            parent.append(&next);
            parent = next;
        }
        let deep = FakeNode::text_field("com.example.chat");
        deep.update(|x| x.focused = true);
        parent.append(&deep);

        let handle: Node = root;
        assert!(find_focused_text_field(&handle, 5).is_none());
        assert!(find_focused_text_field(&handle, 11).is_some());
    }

    #[test]
    fn test_search_terminates_on_cycle() {
        let root = FakeNode::container("com.example.chat");
        let child = FakeNode::container("com.example.chat");
        root.append(&child);
        // child lists root as its own child
        child.append_raw(&root);

        let handle: Node = root;
        assert!(find_focused_text_field(&handle, MAX_SEARCH_DEPTH).is_none());
    }
}
