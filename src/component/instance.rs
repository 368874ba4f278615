//! Type-erased component instances.
//!
//! The engine stores instances as `Rc<dyn Mounted>` in the snapshot side
//! table. [`Instance<C>`] owns the component value together with its props,
//! state and anchor, and turns each lifecycle step into a call on `C`.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::{error, warn};

use super::{Component, ComponentRef, ComponentType, Context, Link};
use crate::engine::Engine;
use crate::types::NodeId;
use crate::vnode::{text, Props, VNode};

/// Lifecycle surface the engine drives without knowing the component type.
pub(crate) trait Mounted {
    fn component_type(&self) -> ComponentType;
    fn props(&self) -> Props;
    fn anchor(&self) -> Option<NodeId>;
    fn set_anchor(&self, node: Option<NodeId>);
    fn component_ref(&self) -> Option<ComponentRef>;

    fn will_mount(&self);
    fn render(&self) -> VNode;
    fn did_mount(&self);
    fn will_receive_props(&self, next: &Props);
    fn should_update(&self, next: &Props) -> bool;
    fn will_update(&self, next: &Props);
    /// Store `next` as the current props and return the previous ones.
    fn commit_props(&self, next: Props) -> Props;
    fn did_update(&self, prev_props: &Props);
    fn will_unmount(&self);
}

/// True when both handles point at the same instance.
pub(crate) fn same_instance(a: &Rc<dyn Mounted>, b: &Rc<dyn Mounted>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

pub(crate) struct Instance<C: Component> {
    /// Filled right after allocation, so `create` already sees a live link.
    component: RefCell<Option<C>>,
    props: RefCell<Props>,
    state: RefCell<Rc<C::State>>,
    prev_state: RefCell<Rc<C::State>>,
    anchor: Cell<Option<NodeId>>,
    pub(crate) engine: Weak<Engine>,
    this: Weak<Instance<C>>,
}

impl<C: Component> Instance<C> {
    pub(crate) fn new(props: Props, engine: Weak<Engine>) -> Rc<Self> {
        let state = Rc::new(C::initial_state(&props));
        let instance = Rc::new_cyclic(|this: &Weak<Self>| Self {
            component: RefCell::new(None),
            props: RefCell::new(props),
            state: RefCell::new(state.clone()),
            prev_state: RefCell::new(state),
            anchor: Cell::new(None),
            engine,
            this: this.clone(),
        });
        let component = C::create(&instance.context());
        *instance.component.borrow_mut() = Some(component);
        instance
    }

    pub(crate) fn context(&self) -> Context<C> {
        Context::new(
            self.props.borrow().clone(),
            self.state.borrow().clone(),
            self.prev_state.borrow().clone(),
            Link::new(self.this.clone()),
        )
    }

    pub(crate) fn state(&self) -> Rc<C::State> {
        self.state.borrow().clone()
    }

    pub(crate) fn current_props(&self) -> Props {
        self.props.borrow().clone()
    }

    /// Replace state with the result of `update` applied to a copy.
    pub(crate) fn apply_state(&self, update: impl FnOnce(&mut C::State)) {
        let mut next = (**self.state.borrow()).clone();
        update(&mut next);
        let prev = self.state.replace(Rc::new(next));
        *self.prev_state.borrow_mut() = prev;
    }

    fn with_component<R>(&self, hook: &str, f: impl FnOnce(&mut C, &Context<C>) -> R) -> Option<R> {
        let ctx = self.context();
        let Ok(mut slot) = self.component.try_borrow_mut() else {
            warn!(component = self.name(), hook, "component re-entered during a hook");
            return None;
        };
        let component = slot.as_mut()?;
        Some(f(component, &ctx))
    }

    fn name(&self) -> &'static str {
        ComponentType::of::<C>().name()
    }
}

impl<C: Component> Mounted for Instance<C> {
    fn component_type(&self) -> ComponentType {
        ComponentType::of::<C>()
    }

    fn props(&self) -> Props {
        self.current_props()
    }

    fn anchor(&self) -> Option<NodeId> {
        self.anchor.get()
    }

    fn set_anchor(&self, node: Option<NodeId>) {
        self.anchor.set(node);
    }

    fn component_ref(&self) -> Option<ComponentRef> {
        let instance: Rc<dyn Any> = self.this.upgrade()?;
        Some(ComponentRef::new(self.name(), instance))
    }

    fn will_mount(&self) {
        self.with_component("will_mount", |c, ctx| c.component_will_mount(ctx));
    }

    fn render(&self) -> VNode {
        let ctx = self.context();
        match self.component.try_borrow().as_deref() {
            Ok(Some(component)) => component.render(&ctx),
            _ => {
                error!(component = self.name(), "render while the component is borrowed");
                text("")
            }
        }
    }

    fn did_mount(&self) {
        self.with_component("did_mount", |c, ctx| c.component_did_mount(ctx));
    }

    fn will_receive_props(&self, next: &Props) {
        self.with_component("will_receive_props", |c, ctx| {
            c.component_will_receive_props(ctx, next)
        });
    }

    fn should_update(&self, next: &Props) -> bool {
        let ctx = self.context();
        let state = self.state();
        match self.component.try_borrow().as_deref() {
            Ok(Some(component)) => component.should_component_update(&ctx, next, &state),
            _ => true,
        }
    }

    fn will_update(&self, next: &Props) {
        let state = self.state();
        self.with_component("will_update", |c, ctx| {
            c.component_will_update(ctx, next, &state)
        });
    }

    fn commit_props(&self, next: Props) -> Props {
        let current = self.state();
        *self.prev_state.borrow_mut() = current;
        self.props.replace(next)
    }

    fn did_update(&self, prev_props: &Props) {
        let prev_state = self.prev_state.borrow().clone();
        self.with_component("did_update", |c, ctx| {
            c.component_did_update(ctx, prev_props, &prev_state)
        });
    }

    fn will_unmount(&self) {
        self.with_component("will_unmount", |c, ctx| c.component_will_unmount(ctx));
    }
}
