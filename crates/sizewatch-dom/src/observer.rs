//! Resize Observer
//!
//! Native resize observation primitive. Targets are compared against the
//! last size reported for them whenever the window delivers observations;
//! every target whose box changed contributes one entry, and each observer
//! receives all of its entries in a single batch callback.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::{Document, DomError, NodeId, Size, Window};

/// Rectangle in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DOMRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DOMRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// Resize observer entry
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeObserverEntry {
    pub target: NodeId,
    pub content_rect: DOMRect,
    pub border_box_size: Vec<ResizeObserverSize>,
    pub content_box_size: Vec<ResizeObserverSize>,
}

impl ResizeObserverEntry {
    fn new(target: NodeId, size: Size) -> Self {
        let box_size = ResizeObserverSize {
            inline_size: size.width,
            block_size: size.height,
        };
        Self {
            target,
            content_rect: DOMRect::new(0.0, 0.0, size.width, size.height),
            border_box_size: vec![box_size],
            content_box_size: vec![box_size],
        }
    }
}

/// Resize observer size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeObserverSize {
    pub inline_size: f64,
    pub block_size: f64,
}

type BatchCallback = Box<dyn FnMut(&[ResizeObserverEntry])>;

/// State shared between an observer handle and the window registry
pub(crate) struct ObserverShared {
    /// Observed targets with the last size reported for each
    observed: RefCell<Vec<(NodeId, Size)>>,
    callback: RefCell<BatchCallback>,
}

impl ObserverShared {
    /// Collect entries for targets whose size differs from the last report
    fn gather(&self, doc: &Document) -> Vec<ResizeObserverEntry> {
        let mut entries = Vec::new();
        for (target, last) in self.observed.borrow_mut().iter_mut() {
            let current = if doc.tree().is_connected(*target) {
                doc.element(*target).map(|e| e.size).unwrap_or_default()
            } else {
                Size::default()
            };
            if current != *last {
                *last = current;
                entries.push(ResizeObserverEntry::new(*target, current));
            }
        }
        entries
    }

    /// Gather and deliver one batch. Returns true if the callback ran.
    pub(crate) fn deliver(&self, window: &Window) -> bool {
        let entries = self.gather(&window.document());
        if entries.is_empty() {
            return false;
        }
        match self.callback.try_borrow_mut() {
            Ok(mut callback) => {
                (&mut **callback)(&entries);
                true
            }
            Err(_) => {
                tracing::warn!("Skipping re-entrant resize observer delivery");
                false
            }
        }
    }
}

/// Resize observer
///
/// Dropping the handle stops observation; the window only keeps a weak
/// reference.
pub struct ResizeObserver {
    window: Window,
    shared: Rc<ObserverShared>,
}

impl ResizeObserver {
    /// Construct an observer on a window. Fails if the window does not
    /// provide the resize observation capability.
    pub fn new(
        window: &Window,
        callback: impl FnMut(&[ResizeObserverEntry]) + 'static,
    ) -> Result<Self, DomError> {
        if !window.has_resize_observer() {
            return Err(DomError::NotSupported("ResizeObserver"));
        }
        let shared = Rc::new(ObserverShared {
            observed: RefCell::new(Vec::new()),
            callback: RefCell::new(Box::new(callback)),
        });
        window.register_resize_observer(&shared);
        Ok(Self {
            window: window.clone(),
            shared,
        })
    }

    /// Start observing an element. Observing an already observed target is a no-op.
    pub fn observe(&self, target: NodeId) -> Result<(), DomError> {
        {
            let doc = self.window.document();
            if doc.tree().get(target).is_none() {
                return Err(DomError::NodeNotFound(target));
            }
            if doc.element(target).is_none() {
                return Err(DomError::NotAnElement(target));
            }
        }
        let mut observed = self.shared.observed.borrow_mut();
        if !observed.iter().any(|(id, _)| *id == target) {
            observed.push((target, Size::default()));
        }
        Ok(())
    }

    /// Stop observing an element
    pub fn unobserve(&self, target: NodeId) {
        self.shared.observed.borrow_mut().retain(|(id, _)| *id != target);
    }

    /// Stop observing all elements
    pub fn disconnect(&self) {
        self.shared.observed.borrow_mut().clear();
    }

    /// Currently observed targets
    pub fn targets(&self) -> Vec<NodeId> {
        self.shared.observed.borrow().iter().map(|(id, _)| *id).collect()
    }
}

impl fmt::Debug for ResizeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeObserver")
            .field("targets", &self.targets())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WindowConfig;
    use std::cell::Cell;

    fn sized_div(window: &Window, id: &str, size: Size) -> NodeId {
        let node = {
            let mut doc = window.document_mut();
            let node = doc.create_element("div");
            doc.set_attribute(node, "id", id).unwrap();
            let body = doc.body();
            doc.append_child(body, node).unwrap();
            node
        };
        window.set_element_size(node, size).unwrap();
        node
    }

    #[test]
    fn test_unsupported_window() {
        let window = Window::new(WindowConfig { resize_observer: false });
        let err = ResizeObserver::new(&window, |_| {}).unwrap_err();
        assert_eq!(err, DomError::NotSupported("ResizeObserver"));
    }

    #[test]
    fn test_initial_and_changed_observations() {
        let window = Window::default();
        let div = sized_div(&window, "a", Size::new(100.0, 100.0));

        let batches = Rc::new(RefCell::new(Vec::new()));
        let b = Rc::clone(&batches);
        let observer = ResizeObserver::new(&window, move |entries| {
            b.borrow_mut().push(entries.to_vec());
        })
        .unwrap();
        observer.observe(div).unwrap();
        observer.observe(div).unwrap();

        window.deliver_resize_observations();
        window.deliver_resize_observations();
        assert_eq!(batches.borrow().len(), 1);
        assert_eq!(batches.borrow()[0][0].content_rect.width, 100.0);

        window.set_element_size(div, Size::new(200.0, 50.0)).unwrap();
        window.set_element_size(div, Size::new(300.0, 50.0)).unwrap();
        window.deliver_resize_observations();
        assert_eq!(batches.borrow().len(), 2);
        assert_eq!(batches.borrow()[1].len(), 1);
        assert_eq!(batches.borrow()[1][0].border_box_size[0].inline_size, 300.0);
    }

    #[test]
    fn test_batch_holds_all_changed_targets() {
        let window = Window::default();
        let ids: Vec<NodeId> = ["a", "b", "c"]
            .iter()
            .map(|id| sized_div(&window, id, Size::new(10.0, 10.0)))
            .collect();

        let calls = Rc::new(Cell::new(0));
        let records = Rc::new(Cell::new(0));
        let (c, r) = (Rc::clone(&calls), Rc::clone(&records));
        let observer = ResizeObserver::new(&window, move |entries| {
            c.set(c.get() + 1);
            r.set(r.get() + entries.len());
        })
        .unwrap();
        for id in &ids {
            observer.observe(*id).unwrap();
        }

        window.deliver_resize_observations();
        assert_eq!((calls.get(), records.get()), (1, 3));
    }

    #[test]
    fn test_unobserve_drops_single_target() {
        let window = Window::default();
        let kept = sized_div(&window, "kept", Size::new(10.0, 10.0));
        let dropped = sized_div(&window, "dropped", Size::new(10.0, 10.0));

        let records = Rc::new(RefCell::new(Vec::new()));
        let r = Rc::clone(&records);
        let observer = ResizeObserver::new(&window, move |entries| {
            r.borrow_mut().extend(entries.iter().map(|e| e.target));
        })
        .unwrap();
        observer.observe(kept).unwrap();
        observer.observe(dropped).unwrap();
        observer.unobserve(dropped);
        assert_eq!(observer.targets(), vec![kept]);

        window.deliver_resize_observations();
        assert_eq!(*records.borrow(), vec![kept]);
    }

    #[test]
    fn test_observe_rejects_non_elements() {
        let window = Window::default();
        let text = window.document_mut().create_text("hello");
        let observer = ResizeObserver::new(&window, |_| {}).unwrap();
        assert_eq!(observer.observe(text), Err(DomError::NotAnElement(text)));
        assert_eq!(
            observer.observe(NodeId(4096)),
            Err(DomError::NodeNotFound(NodeId(4096)))
        );
    }

    #[test]
    fn test_disconnect_and_drop_stop_delivery() {
        let window = Window::default();
        let div = sized_div(&window, "a", Size::new(10.0, 10.0));
        let calls = Rc::new(Cell::new(0));

        let c = Rc::clone(&calls);
        let observer = ResizeObserver::new(&window, move |_| c.set(c.get() + 1)).unwrap();
        observer.observe(div).unwrap();
        observer.disconnect();
        assert!(observer.targets().is_empty());
        window.deliver_resize_observations();
        assert_eq!(calls.get(), 0);

        let c = Rc::clone(&calls);
        let dropped = ResizeObserver::new(&window, move |_| c.set(c.get() + 1)).unwrap();
        dropped.observe(div).unwrap();
        drop(dropped);
        window.deliver_resize_observations();
        assert_eq!(calls.get(), 0);
    }
}
