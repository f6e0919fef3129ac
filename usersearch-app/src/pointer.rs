use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::geometry::{Point, Region};
use crate::search::UserSearch;

type Listener = Box<dyn FnMut(Point)>;
type ListenerList = RefCell<Vec<(usize, Listener)>>;

/// Delivers every pointer press on the screen to the listeners subscribed to it,
/// wherever the press landed.
#[derive(Default)]
pub struct PointerEvents {
    listeners: Rc<ListenerList>,
    next_id: Cell<usize>,
}

impl PointerEvents {
    pub fn new() -> Self {
        PointerEvents::default()
    }

    /// Registers `listener` until the returned subscription is dropped.
    pub fn subscribe<F: FnMut(Point) + 'static>(&self, listener: F) -> PointerSubscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Box::new(listener)));
        PointerSubscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Calls each listener with `point`, in subscription order.
    /// Listeners must not subscribe or drop subscriptions while being called.
    pub fn dispatch(&self, point: Point) {
        for (_, listener) in self.listeners.borrow_mut().iter_mut() {
            listener(point);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

/// Keeps a pointer listener registered. Dropping it removes the listener.
#[must_use = "dropping the subscription unregisters the listener"]
pub struct PointerSubscription {
    id: usize,
    listeners: Weak<ListenerList>,
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().retain(|(id, _)| *id != self.id);
            tracing::debug!("Pointer listener {} unsubscribed", self.id);
        }
    }
}

/// The screen areas owned by the search widget, as of the last frame. `None` means
/// the area is not on screen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub input: Option<Region>,
    pub popup: Option<Region>,
}

impl Regions {
    /// Returns true if the input is on screen and `point` lies in neither area. A popup
    /// that could not be drawn covers nothing.
    pub fn is_outside(&self, point: Point) -> bool {
        match self.input {
            Some(input) => {
                !input.contains(point) && !self.popup.map_or(false, |popup| popup.contains(point))
            }
            None => false,
        }
    }
}

/// Closes the suggestion popup when the pointer is pressed outside both the input and
/// the popup.
pub struct OutsideClickWatcher;

impl OutsideClickWatcher {
    /// Starts watching `events` on behalf of `search`. The watcher stays active for as
    /// long as the returned subscription is alive, so it should be owned by the widget.
    ///
    /// # Arguments
    /// * ` events ` - The pointer presses of the whole screen.
    /// * ` search ` - The widget state to dismiss the popup of.
    /// * ` regions ` - Where the input and the popup were last drawn.
    pub fn mount(
        events: &PointerEvents,
        search: Rc<RefCell<UserSearch>>,
        regions: Rc<RefCell<Regions>>,
    ) -> PointerSubscription {
        tracing::info!("Watching for presses outside the user search");
        events.subscribe(move |point| {
            if regions.borrow().is_outside(point) {
                search.borrow_mut().dismiss();
            }
        })
    }
}
