//! Prop Patcher - Apply the difference between two prop maps to one node.
//!
//! Each prop is routed by name:
//!
//! | Prop                    | Written as                                  |
//! |-------------------------|---------------------------------------------|
//! | `children`/`key`/`ref`  | never written                               |
//! | `on<Event>`             | listener for the lower-cased `<event>`      |
//! | live (`value`/`checked`)| property assignment                         |
//! | class alias             | `class` attribute                           |
//! | `style`                 | CSS text (structured) or passed through     |
//! | anything else           | generic attribute                           |
//!
//! `Bool(false)` behaves like an absent prop in both passes.

use tracing::trace;

use crate::config::Config;
use crate::dom::DisplayTree;
use crate::types::NodeId;
use crate::vnode::{PropValue, Props, CHILDREN, KEY, REF};

fn is_reserved(name: &str) -> bool {
    name == CHILDREN || name == KEY || name == REF
}

/// Patch `node` from `old` to `new`.
pub(crate) fn patch_props(
    tree: &dyn DisplayTree,
    config: &Config,
    node: NodeId,
    new: &Props,
    old: &Props,
) {
    for (name, value) in new.iter() {
        if is_reserved(name) || !value.is_truthy() {
            continue;
        }
        let previous = old.get(name).filter(|previous| previous.is_truthy());
        if previous.is_some_and(|previous| previous.same(value)) {
            continue;
        }
        trace!(%node, prop = name, "patch prop");

        if let Some(event) = config.event_name(name) {
            if let Some(PropValue::Handler(previous)) = previous {
                tree.remove_event_listener(node, &event, previous);
            }
            if let PropValue::Handler(handler) = value {
                tree.add_event_listener(node, &event, handler);
            }
        } else if config.is_live_property(name) {
            tree.set_property(node, name, value);
        } else if let Some(text) = value.to_attribute() {
            tree.set_attribute(node, config.attribute_name(name), &text);
        }
    }

    for (name, value) in old.iter() {
        if is_reserved(name) || !value.is_truthy() {
            continue;
        }
        if new.get(name).is_some_and(PropValue::is_truthy) {
            continue;
        }
        trace!(%node, prop = name, "remove prop");

        if let Some(event) = config.event_name(name) {
            if let PropValue::Handler(handler) = value {
                tree.remove_event_listener(node, &event, handler);
            }
        } else if config.is_live_property(name) {
            tree.set_property(node, name, &reset_value(value));
        } else if value.to_attribute().is_some() {
            tree.remove_attribute(node, config.attribute_name(name));
        }
    }
}

/// Value a live property returns to when its prop goes away.
fn reset_value(previous: &PropValue) -> PropValue {
    match previous {
        PropValue::Bool(_) => PropValue::Bool(false),
        PropValue::Number(_) => PropValue::Number(0.0),
        _ => PropValue::Text(String::new()),
    }
}
