//! Component Runtime - Stateful components with a lifecycle.
//!
//! A component is a Rust type implementing [`Component`]. Every lifecycle
//! hook has a no-op default; a component overrides the ones it needs.
//!
//! ```ignore
//! struct Counter;
//!
//! impl Component for Counter {
//!     type State = u32;
//!
//!     fn create(_ctx: &Context<Self>) -> Self {
//!         Counter
//!     }
//!
//!     fn render(&self, ctx: &Context<Self>) -> VNode {
//!         let link = ctx.link().clone();
//!         element(
//!             "button",
//!             Props::new().on("click", move |_| {
//!                 let _ = link.set_state(|count| *count += 1);
//!             }),
//!             children![ctx.state().to_string()],
//!         )
//!     }
//! }
//! ```
//!
//! # Lifecycle
//!
//! ```text
//! mount:   create -> will_mount -> render -> (children mounted) -> did_mount
//! update:  will_receive_props -> should_update? -> will_update -> render -> did_update
//! state:   set_state -> render -> did_update
//! unmount: will_unmount -> (children torn down) -> ref(None)
//! ```
//!
//! Hooks run inside a reconciliation pass, so calling [`Link::set_state`]
//! from a hook returns [`Error::Reentrant`](crate::Error::Reentrant).

mod context;
mod instance;

pub use context::{Context, Link};

pub(crate) use instance::{same_instance, Instance, Mounted};

use std::any::{Any, TypeId};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::engine::Engine;
use crate::vnode::{Props, VNode};

// =============================================================================
// Component Trait
// =============================================================================

/// A stateful component.
pub trait Component: Sized + 'static {
    /// Component state. Replaced wholesale on every update, never mutated in place.
    type State: Clone + Default + 'static;

    /// Construct the component. Props and initial state are on `ctx`.
    fn create(ctx: &Context<Self>) -> Self;

    fn initial_state(_props: &Props) -> Self::State {
        Self::State::default()
    }

    fn render(&self, ctx: &Context<Self>) -> VNode;

    /// Called once, before the first render.
    fn component_will_mount(&mut self, _ctx: &Context<Self>) {}

    /// Called once the rendered subtree is attached.
    fn component_did_mount(&mut self, _ctx: &Context<Self>) {}

    /// Called when a parent re-render delivers props for this instance.
    ///
    /// Skipped when `next_props` is the same allocation as the current props,
    /// as happens when an unchanged vnode is rendered again. Only
    /// `should_component_update` runs in that case.
    fn component_will_receive_props(&mut self, _ctx: &Context<Self>, _next_props: &Props) {}

    /// Gate for props-driven updates. Defaults to "changed unless both props
    /// and state are the same allocations".
    fn should_component_update(
        &self,
        ctx: &Context<Self>,
        next_props: &Props,
        next_state: &Rc<Self::State>,
    ) -> bool {
        !(Props::ptr_eq(ctx.props(), next_props) && Rc::ptr_eq(ctx.state_rc(), next_state))
    }

    fn component_will_update(
        &mut self,
        _ctx: &Context<Self>,
        _next_props: &Props,
        _next_state: &Self::State,
    ) {
    }

    fn component_did_update(
        &mut self,
        _ctx: &Context<Self>,
        _prev_props: &Props,
        _prev_state: &Self::State,
    ) {
    }

    fn component_will_unmount(&mut self, _ctx: &Context<Self>) {}
}

// =============================================================================
// Component Type
// =============================================================================

/// Type tag for a stateful component, carried by
/// [`Kind::Stateful`](crate::vnode::Kind::Stateful).
#[derive(Clone, Copy)]
pub struct ComponentType {
    id: TypeId,
    name: &'static str,
    pub(crate) instantiate: fn(Props, Weak<Engine>) -> Rc<dyn Mounted>,
}

impl ComponentType {
    pub fn of<C: Component>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: short_type_name(std::any::type_name::<C>()),
            instantiate: instantiate::<C>,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Unqualified type name, for logs and debug output.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ComponentType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ComponentType {}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn instantiate<C: Component>(props: Props, engine: Weak<Engine>) -> Rc<dyn Mounted> {
    Instance::<C>::new(props, engine)
}

fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

// =============================================================================
// Component Ref
// =============================================================================

/// Handle to a mounted component instance, delivered to `ref` callbacks.
#[derive(Clone)]
pub struct ComponentRef {
    name: &'static str,
    instance: Rc<dyn Any>,
}

impl ComponentRef {
    pub(crate) fn new(name: &'static str, instance: Rc<dyn Any>) -> Self {
        Self { name, instance }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is<C: Component>(&self) -> bool {
        self.instance.is::<Instance<C>>()
    }

    /// Typed link to the instance, if it is a `C`.
    pub fn link<C: Component>(&self) -> Option<Link<C>> {
        let instance = self.instance.clone().downcast::<Instance<C>>().ok()?;
        Some(Link::new(Rc::downgrade(&instance)))
    }
}
