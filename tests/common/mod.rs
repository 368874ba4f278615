//! To-do application fixture shared by the integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_vdom::{
    children, component, element, Callback, Component, Context, DisplayTree, Document, Link,
    NodeId, PropValue, Props, RefTarget, Root, VNode,
};

// =============================================================================
// Tasks
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub completed: bool,
}

impl Task {
    pub fn new(id: u32, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            completed: false,
        }
    }
}

thread_local! {
    static ITEM_RENDERS: Cell<usize> = const { Cell::new(0) };
}

pub fn item_renders() -> usize {
    ITEM_RENDERS.with(Cell::get)
}

pub fn reset_item_renders() {
    ITEM_RENDERS.with(|renders| renders.set(0));
}

// =============================================================================
// TodoItem
// =============================================================================

/// One list item. Only re-renders when its task allocation changes.
pub struct TodoItem;

impl Component for TodoItem {
    type State = ();

    fn create(_ctx: &Context<Self>) -> Self {
        TodoItem
    }

    fn should_component_update(
        &self,
        ctx: &Context<Self>,
        next_props: &Props,
        _next_state: &Rc<()>,
    ) -> bool {
        match (
            ctx.props().get_shared::<Task>("task"),
            next_props.get_shared::<Task>("task"),
        ) {
            (Some(current), Some(next)) => !Rc::ptr_eq(&current, &next),
            _ => true,
        }
    }

    fn render(&self, ctx: &Context<Self>) -> VNode {
        ITEM_RENDERS.with(|renders| renders.set(renders.get() + 1));

        let props = ctx.props();
        let Some(task) = props.get_shared::<Task>("task") else {
            return element("li", Props::new(), children![]);
        };
        let on_toggle = props.get_any::<Callback<u32>>("onToggle").cloned();
        let on_delete = props.get_any::<Callback<u32>>("onDelete").cloned();
        let id = task.id;

        let mut li = Props::new();
        if task.completed {
            li = li.class("completed");
        }
        if let Some(variant) = props.text("variant") {
            li = li.with("data-variant", variant.to_string());
        }

        element(
            "li",
            li,
            children![element(
                "div",
                Props::new().class("view"),
                children![
                    element(
                        "input",
                        Props::new()
                            .class("toggle")
                            .with("type", "checkbox")
                            .with("checked", task.completed)
                            .on("click", move |_| {
                                if let Some(toggle) = &on_toggle {
                                    toggle(id);
                                }
                            }),
                        children![],
                    ),
                    element(
                        "label",
                        Props::new().on("dblclick", |_| {}),
                        children![task.title.clone()],
                    ),
                    element(
                        "button",
                        Props::new().class("destroy").on("click", move |_| {
                            if let Some(delete) = &on_delete {
                                delete(id);
                            }
                        }),
                        children![],
                    ),
                ],
            )],
        )
    }
}

// =============================================================================
// TodoApp
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub tasks: Vec<Rc<Task>>,
    pub next_id: u32,
}

pub struct TodoApp;

impl TodoApp {
    pub fn add_task(link: &Link<TodoApp>, title: &str) -> spark_vdom::Result<()> {
        let title = title.trim().to_string();
        link.set_state(move |state| {
            if title.is_empty() {
                return;
            }
            state.tasks.push(Rc::new(Task::new(state.next_id, &title)));
            state.next_id += 1;
        })
    }

    pub fn toggle_task(link: &Link<TodoApp>, id: u32) -> spark_vdom::Result<()> {
        link.set_state(move |state| {
            for task in &mut state.tasks {
                if task.id == id {
                    let mut next = (**task).clone();
                    next.completed = !next.completed;
                    *task = Rc::new(next);
                }
            }
        })
    }

    pub fn delete_task(link: &Link<TodoApp>, id: u32) -> spark_vdom::Result<()> {
        link.set_state(move |state| state.tasks.retain(|task| task.id != id))
    }
}

impl Component for TodoApp {
    type State = AppState;

    fn create(_ctx: &Context<Self>) -> Self {
        TodoApp
    }

    fn initial_state(props: &Props) -> AppState {
        let tasks: Vec<Rc<Task>> = props
            .get_any::<Vec<Task>>("initial")
            .map(|tasks| tasks.iter().cloned().map(Rc::new).collect())
            .unwrap_or_default();
        let next_id = tasks.iter().map(|task| task.id + 1).max().unwrap_or(1);
        AppState { tasks, next_id }
    }

    fn render(&self, ctx: &Context<Self>) -> VNode {
        let state = ctx.state();
        let variant = ctx.props().text("variant").map(str::to_string);

        let on_toggle: Callback<u32> = ctx.link().callback(|link, id| {
            let _ = TodoApp::toggle_task(link, id);
        });
        let on_delete: Callback<u32> = ctx.link().callback(|link, id| {
            let _ = TodoApp::delete_task(link, id);
        });

        let items: Vec<VNode> = state
            .tasks
            .iter()
            .map(|task| {
                let mut props = Props::new()
                    .with_key(task.id)
                    .with("task", PropValue::shared(task.clone()))
                    .with("onToggle", PropValue::any(on_toggle.clone()))
                    .with("onDelete", PropValue::any(on_delete.clone()));
                if let Some(variant) = &variant {
                    props = props.with("variant", variant.clone());
                }
                component::<TodoItem>(props, children![])
            })
            .collect();

        let remaining = state.tasks.iter().filter(|task| !task.completed).count();

        element(
            "section",
            Props::new().class("todoapp"),
            children![
                element(
                    "header",
                    Props::new().class("header"),
                    children![element("h1", Props::new(), children!["todos"])],
                ),
                element("ul", Props::new().class("todo-list"), children![items]),
                element(
                    "footer",
                    Props::new().class("footer"),
                    children![element(
                        "span",
                        Props::new().class("todo-count"),
                        children![remaining, " items left"],
                    )],
                ),
            ],
        )
    }
}

// =============================================================================
// Fixture
// =============================================================================

pub struct Fixture {
    pub document: Rc<Document>,
    pub root: Root,
    pub app: Link<TodoApp>,
    pub node: NodeId,
}

pub fn app_vnode(tasks: &[Task], variant: Option<&str>, slot: &Rc<RefCell<Option<Link<TodoApp>>>>) -> VNode {
    let slot = slot.clone();
    let mut props = Props::new()
        .with("initial", PropValue::any(tasks.to_vec()))
        .with_ref(move |target| {
            if let Some(RefTarget::Component(app)) = target {
                *slot.borrow_mut() = app.link::<TodoApp>();
            }
        });
    if let Some(variant) = variant {
        props = props.with("variant", variant);
    }
    component::<TodoApp>(props, children![])
}

pub fn mount_app(tasks: &[Task]) -> Fixture {
    let document = Rc::new(Document::new());
    let root = Root::new(document.clone());
    let slot = Rc::new(RefCell::new(None));
    let node = root
        .render(&app_vnode(tasks, None, &slot), document.root())
        .expect("initial render");
    let app = slot.borrow().clone().expect("app ref delivered");
    Fixture {
        document,
        root,
        app,
        node,
    }
}

/// Depth-first search for the first element whose class list contains `class`.
pub fn find_by_class(document: &Document, from: NodeId, class: &str) -> Option<NodeId> {
    let matches = document
        .attribute(from, "class")
        .is_some_and(|value| value.split_whitespace().any(|c| c == class));
    if matches {
        return Some(from);
    }
    document
        .children(from)
        .into_iter()
        .find_map(|child| find_by_class(document, child, class))
}

pub fn list(fixture: &Fixture) -> NodeId {
    find_by_class(&fixture.document, fixture.node, "todo-list").expect("todo list")
}

pub fn items(fixture: &Fixture) -> Vec<NodeId> {
    fixture.document.children(list(fixture))
}
