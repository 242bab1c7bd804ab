//! In-memory stand-ins for the host capabilities, for tests in this and
//! downstream crates (enable the `testing` feature).

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::display::{Display, DisplayId, DisplayList, DisplayProvider};
use crate::error::{RelayError, RelayResult};
use crate::host::{AccessibilityHost, SoftKeyboard, SurfaceRequest, WindowPlacement};
use crate::node::{ActionId, ElementHandle, Node, NodeAction, NodeAttributes, NodeId, OwnerId};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// A mutable element in a fake UI tree.
pub struct FakeNode {
    id: NodeId,
    attrs: RefCell<NodeAttributes>,
    parent: RefCell<Weak<FakeNode>>,
    children: RefCell<Vec<Rc<FakeNode>>>,
    actions: RefCell<Vec<ActionId>>,
    performed: RefCell<Vec<NodeAction>>,
    action_result: Cell<bool>,
    stale: Cell<bool>,
}

impl FakeNode {
    pub fn new(attrs: NodeAttributes) -> Rc<Self> {
        Rc::new(Self {
            id: NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed)),
            attrs: RefCell::new(attrs),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            actions: RefCell::new(Vec::new()),
            performed: RefCell::new(Vec::new()),
            action_result: Cell::new(true),
            stale: Cell::new(false),
        })
    }

    /// An `EditText` that is editable and focusable but not focused.
    pub fn text_field(owner: &str) -> Rc<Self> {
        Self::new(NodeAttributes {
            class_name: Some("android.widget.EditText".into()),
            editable: true,
            focusable: true,
            owner: OwnerId::from(owner),
            ..Default::default()
        })
    }

    pub fn container(owner: &str) -> Rc<Self> {
        Self::new(NodeAttributes {
            class_name: Some("android.widget.FrameLayout".into()),
            owner: OwnerId::from(owner),
            ..Default::default()
        })
    }

    /// Adds `child` as the last child and points its parent here.
    pub fn append(self: &Rc<Self>, child: &Rc<FakeNode>) {
        child.set_parent(self);
        self.children.borrow_mut().push(child.clone());
    }

    /// Adds `child` without touching its parent link.
    pub fn append_raw(&self, child: &Rc<FakeNode>) {
        self.children.borrow_mut().push(child.clone());
    }

    pub fn set_parent(&self, parent: &Rc<FakeNode>) {
        *self.parent.borrow_mut() = Rc::downgrade(parent);
    }

    pub fn update(&self, f: impl FnOnce(&mut NodeAttributes)) {
        f(&mut self.attrs.borrow_mut());
    }

    pub fn set_stale(&self, stale: bool) {
        self.stale.set(stale);
    }

    pub fn set_actions(&self, actions: &[ActionId]) {
        *self.actions.borrow_mut() = actions.to_vec();
    }

    /// What `perform_action` reports for actions the node accepts.
    pub fn set_action_result(&self, ok: bool) {
        self.action_result.set(ok);
    }

    pub fn performed(&self) -> Vec<NodeAction> {
        self.performed.borrow().clone()
    }

    /// The last text pushed through `SetText`, if any.
    pub fn last_set_text(&self) -> Option<String> {
        self.performed.borrow().iter().rev().find_map(|a| match a {
            NodeAction::SetText(t) => Some(t.clone()),
            NodeAction::Perform(_) => None,
        })
    }
}

impl fmt::Debug for FakeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeNode")
            .field("id", &self.id)
            .field("owner", &self.attrs.borrow().owner)
            .field("stale", &self.stale.get())
            .finish_non_exhaustive()
    }
}

impl ElementHandle for FakeNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn attributes(&self) -> Option<NodeAttributes> {
        if self.stale.get() {
            return None;
        }
        Some(self.attrs.borrow().clone())
    }

    fn parent(&self) -> Option<Node> {
        if self.stale.get() {
            return None;
        }
        self.parent.borrow().upgrade().map(|p| p as Node)
    }

    fn child_count(&self) -> usize {
        if self.stale.get() {
            return 0;
        }
        self.children.borrow().len()
    }

    fn child(&self, index: usize) -> Option<Node> {
        if self.stale.get() {
            return None;
        }
        self.children.borrow().get(index).map(|c| c.clone() as Node)
    }

    fn action_list(&self) -> Vec<ActionId> {
        if self.stale.get() {
            return Vec::new();
        }
        self.actions.borrow().clone()
    }

    fn perform_action(&self, action: &NodeAction) -> RelayResult<bool> {
        if self.stale.get() {
            return Err(RelayError::StaleHandle);
        }
        self.performed.borrow_mut().push(action.clone());
        if let NodeAction::SetText(text) = action {
            self.attrs.borrow_mut().text = Some(text.clone());
        }
        Ok(self.action_result.get())
    }
}

/// Host whose active window root is whatever the test says it is.
#[derive(Default)]
pub struct FakeHost {
    root: RefCell<Option<Node>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_root(&self, root: Option<Node>) {
        *self.root.borrow_mut() = root;
    }
}

impl AccessibilityHost for FakeHost {
    fn root_in_active_window(&self) -> Option<Node> {
        self.root.borrow().clone()
    }
}

pub struct FakeDisplays {
    displays: RefCell<DisplayList>,
}

impl FakeDisplays {
    pub fn new(displays: &[(i32, &str)]) -> Self {
        let this = Self {
            displays: RefCell::new(DisplayList::new()),
        };
        this.set(displays);
        this
    }

    pub fn set(&self, displays: &[(i32, &str)]) {
        *self.displays.borrow_mut() = displays
            .iter()
            .map(|(id, name)| Display::new(DisplayId(*id), *name))
            .collect();
    }
}

impl DisplayProvider for FakeDisplays {
    fn displays(&self) -> DisplayList {
        self.displays.borrow().clone()
    }
}

/// Records every placement; can be told to reject them.
#[derive(Default)]
pub struct FakePlacement {
    presented: RefCell<Vec<(DisplayId, SurfaceRequest)>>,
    dismissed: RefCell<Vec<DisplayId>>,
    reject: Cell<bool>,
}

impl FakePlacement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reject(&self, reject: bool) {
        self.reject.set(reject);
    }

    pub fn presented(&self) -> Vec<(DisplayId, SurfaceRequest)> {
        self.presented.borrow().clone()
    }

    pub fn last_presented(&self) -> Option<(DisplayId, SurfaceRequest)> {
        self.presented.borrow().last().cloned()
    }

    pub fn dismissed(&self) -> Vec<DisplayId> {
        self.dismissed.borrow().clone()
    }
}

impl WindowPlacement for FakePlacement {
    fn present(&self, display: DisplayId, request: &SurfaceRequest) -> RelayResult<()> {
        if self.reject.get() {
            return Err(RelayError::PlacementFailed {
                display,
                reason: "rejected by test".into(),
            });
        }
        self.presented.borrow_mut().push((display, request.clone()));
        Ok(())
    }

    fn dismiss(&self, display: DisplayId) {
        self.dismissed.borrow_mut().push(display);
    }
}

#[derive(Default)]
pub struct FakeKeyboard {
    shown: Cell<usize>,
}

impl FakeKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> usize {
        self.shown.get()
    }
}

impl SoftKeyboard for FakeKeyboard {
    fn show_for_surface(&self) {
        self.shown.set(self.shown.get() + 1);
    }
}
