//! To-do application scenarios.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::*;
use spark_vdom::{
    children, element, DisplayTree, Document, Mutation, MutationKind, Props, Root,
};

#[test]
fn test_empty_list_mounts_without_children() {
    let list = element("ul", Props::new().class("todo-list"), children![]);
    assert_eq!(list.children().len(), 0);

    let document = Rc::new(Document::new());
    let root = Root::new(document.clone());
    let node = root.render(&list, document.root()).expect("render");

    assert!(document.children(node).is_empty());
    assert_eq!(document.to_html(node), "<ul class=\"todo-list\"></ul>");
}

#[test]
fn test_empty_app_has_empty_list() {
    let fixture = mount_app(&[]);
    assert!(items(&fixture).is_empty());
    assert!(fixture.document.text(fixture.node).contains("0 items left"));
}

#[test]
fn test_add_task_appends_one_item() {
    let fixture = mount_app(&[Task::new(1, "Task 1")]);
    let before = items(&fixture);
    assert_eq!(before.len(), 1);
    let list = list(&fixture);

    fixture.document.clear_mutations();
    TodoApp::add_task(&fixture.app, "Buy milk").expect("add task");

    let state = fixture.app.state().expect("mounted");
    assert_eq!(state.tasks.len(), 2);

    let after = items(&fixture);
    assert_eq!(after.len(), 2);
    assert_eq!(after[0], before[0]);
    assert_eq!(fixture.document.text(after[1]), "Buy milk");

    let inserted_into_list = fixture
        .document
        .mutations()
        .iter()
        .filter(|m| matches!(m, Mutation::Insert { parent, .. } if *parent == list))
        .count();
    assert_eq!(inserted_into_list, 1);
    assert_eq!(fixture.document.text(after[0]), "Task 1");
}

#[test]
fn test_blank_title_adds_nothing() {
    let fixture = mount_app(&[Task::new(1, "Task 1")]);
    TodoApp::add_task(&fixture.app, "   ").expect("add task");
    assert_eq!(items(&fixture).len(), 1);
}

#[test]
fn test_toggle_updates_only_that_item() {
    let fixture = mount_app(&[Task::new(1, "Task 1"), Task::new(2, "Task 2")]);
    let before = items(&fixture);
    let sibling_attributes = fixture.document.attributes(before[1]);
    let document = &fixture.document;

    let toggle = find_by_class(document, before[0], "toggle").expect("toggle");
    document.clear_mutations();
    assert_eq!(document.click(toggle), 1);

    let after = items(&fixture);
    assert_eq!(after, before);
    assert_eq!(document.attribute(after[0], "class").as_deref(), Some("completed"));
    assert_eq!(document.attributes(after[1]), sibling_attributes);

    let sibling_subtree = subtree(document, after[1]);
    assert!(
        document
            .mutations()
            .iter()
            .all(|m| !sibling_subtree.contains(&m.node())),
        "sibling item was touched"
    );
    assert!(fixture.document.text(fixture.node).contains("1 items left"));
}

#[test]
fn test_toggle_twice_clears_class() {
    let fixture = mount_app(&[Task::new(1, "Task 1")]);
    TodoApp::toggle_task(&fixture.app, 1).expect("toggle");
    TodoApp::toggle_task(&fixture.app, 1).expect("toggle");

    let item = items(&fixture)[0];
    assert_eq!(fixture.document.attribute(item, "class"), None);
    let toggle = find_by_class(&fixture.document, item, "toggle").expect("toggle");
    assert_eq!(
        fixture.document.property(toggle, "checked").and_then(|v| v.as_bool()),
        Some(false)
    );
}

#[test]
fn test_delete_removes_item_and_listeners() {
    let fixture = mount_app(&[Task::new(1, "Task 1"), Task::new(2, "Task 2")]);
    let document = &fixture.document;
    let before = items(&fixture);
    let destroy = find_by_class(document, before[0], "destroy").expect("destroy button");

    document.clear_mutations();
    assert_eq!(document.click(destroy), 1);

    let after = items(&fixture);
    assert_eq!(after, vec![before[1]]);
    assert_eq!(document.parent(before[0]), None);
    assert_eq!(document.text(after[0]), "Task 2");

    let removed_events: Vec<String> = document
        .mutations()
        .iter()
        .filter_map(|m| match m {
            Mutation::RemoveListener { event, .. } => Some(event.clone()),
            _ => None,
        })
        .collect();
    assert!(removed_events.contains(&"click".to_string()));
    assert!(removed_events.contains(&"dblclick".to_string()));
    assert_eq!(document.listeners(destroy), 0);

    let removals = document
        .mutations()
        .iter()
        .filter(|m| matches!(m, Mutation::Remove { .. }))
        .count();
    assert_eq!(removals, 1);
    assert!(!fixture.root.is_mounted(before[0]));
}

#[test]
fn test_item_update_gate_blocks_unrelated_props() {
    let tasks = [Task::new(1, "Task 1"), Task::new(2, "Task 2")];
    let fixture = mount_app(&tasks);
    let document = &fixture.document;
    let before = items(&fixture);

    reset_item_renders();
    document.clear_mutations();
    let slot = Rc::new(RefCell::new(None));
    fixture
        .root
        .render(&app_vnode(&tasks, Some("dark"), &slot), document.root())
        .expect("re-render");

    assert_eq!(item_renders(), 0);
    assert_eq!(items(&fixture), before);
    for item in before {
        assert_eq!(document.attribute(item, "data-variant"), None);
    }
    assert_eq!(document.count(MutationKind::UPDATE | MutationKind::CREATE), 0);
    assert!(slot.borrow().is_some());
}

#[test]
fn test_unmount_root_tears_everything_down() {
    let fixture = mount_app(&[Task::new(1, "Task 1")]);
    let document = &fixture.document;
    let toggle = find_by_class(document, items(&fixture)[0], "toggle").expect("toggle");

    fixture.root.unmount(document.root()).expect("unmount");

    assert!(document.children(document.root()).is_empty());
    assert_eq!(fixture.root.mounted_count(), 0);
    assert_eq!(document.listeners(toggle), 0);
    assert!(!fixture.app.is_mounted());
}

fn subtree(document: &Document, node: spark_vdom::NodeId) -> Vec<spark_vdom::NodeId> {
    let mut out = vec![node];
    for child in document.children(node) {
        out.extend(subtree(document, child));
    }
    out
}
