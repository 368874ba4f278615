//! Component context and links.
//!
//! [`Context`] is the read-only view a component gets in every hook: current
//! props, current and previous state, and a [`Link`]. A `Link` is a weak,
//! cloneable handle that outlives the hook and is what event handlers use to
//! call [`Link::set_state`].

use std::rc::{Rc, Weak};

use tracing::debug;

use super::instance::{Instance, Mounted};
use super::Component;
use crate::error::{Error, Result};
use crate::types::{Callback, Event, Handler, NodeId};
use crate::vnode::Props;

// =============================================================================
// Context
// =============================================================================

/// Snapshot of a component's props and state for one hook call.
pub struct Context<C: Component> {
    props: Props,
    state: Rc<C::State>,
    prev_state: Rc<C::State>,
    link: Link<C>,
}

impl<C: Component> Context<C> {
    pub(crate) fn new(
        props: Props,
        state: Rc<C::State>,
        prev_state: Rc<C::State>,
        link: Link<C>,
    ) -> Self {
        Self {
            props,
            state,
            prev_state,
            link,
        }
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn state(&self) -> &C::State {
        &self.state
    }

    /// The shared state allocation, for identity comparisons.
    pub fn state_rc(&self) -> &Rc<C::State> {
        &self.state
    }

    /// State before the most recent update.
    pub fn prev_state(&self) -> &C::State {
        &self.prev_state
    }

    pub fn link(&self) -> &Link<C> {
        &self.link
    }

    /// Display node the component's output is anchored at.
    pub fn node(&self) -> Option<NodeId> {
        self.link.node()
    }
}

// =============================================================================
// Link
// =============================================================================

/// Weak handle to a component instance.
pub struct Link<C: Component>(Weak<Instance<C>>);

impl<C: Component> Clone for Link<C> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<C: Component> Link<C> {
    pub(crate) fn new(instance: Weak<Instance<C>>) -> Self {
        Self(instance)
    }

    /// Update state through `update` and re-render synchronously.
    ///
    /// `update` receives a copy of the current state; the copy becomes the new
    /// state and the old one becomes `prev_state`. The component re-renders
    /// and its output is reconciled at its anchor before this returns.
    /// `should_component_update` is not consulted.
    ///
    /// # Errors
    ///
    /// - [`Error::Unanchored`] when the component is not mounted yet (from
    ///   `create` or `component_will_mount`) or has been unmounted
    /// - [`Error::Reentrant`] when called while a pass is running (from a hook or render)
    /// - [`Error::Detached`] when the anchor node has no parent
    /// - [`Error::ComponentDropped`] / [`Error::RootDropped`] when either side is gone
    pub fn set_state(&self, update: impl FnOnce(&mut C::State)) -> Result<()> {
        let instance = self.0.upgrade().ok_or(Error::ComponentDropped)?;
        let name = instance.component_type().name();
        if instance.anchor().is_none() {
            return Err(Error::Unanchored { component: name });
        }
        let engine = instance.engine.upgrade().ok_or(Error::RootDropped)?;
        debug!(component = name, "set_state");
        let mounted: Rc<dyn Mounted> = instance.clone();
        engine.update(&mounted, || instance.apply_state(update))
    }

    /// Replace the state wholesale.
    pub fn replace_state(&self, state: C::State) -> Result<()> {
        self.set_state(move |current| *current = state)
    }

    pub fn state(&self) -> Option<Rc<C::State>> {
        self.0.upgrade().map(|instance| instance.state())
    }

    pub fn props(&self) -> Option<Props> {
        self.0.upgrade().map(|instance| instance.current_props())
    }

    pub fn node(&self) -> Option<NodeId> {
        self.0.upgrade().and_then(|instance| instance.anchor())
    }

    pub fn is_mounted(&self) -> bool {
        self.node().is_some()
    }

    /// Wrap `f` as a typed callback that can be passed down as a prop.
    pub fn callback<A: 'static>(&self, f: impl Fn(&Link<C>, A) + 'static) -> Callback<A> {
        let link = self.clone();
        Rc::new(move |arg: A| f(&link, arg))
    }

    /// Wrap `f` as an event listener.
    pub fn handler(&self, f: impl Fn(&Link<C>, &Event) + 'static) -> Handler {
        let link = self.clone();
        Rc::new(move |event: &Event| f(&link, event))
    }
}
