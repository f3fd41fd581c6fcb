//! Native strategy
//!
//! Wraps the window's `ResizeObserver`. A batch of change records, however
//! many it holds, produces exactly one trigger.

use sizewatch_dom::{NodeId, ResizeObserver, ResizeObserverEntry, Window};

use crate::{Trigger, WatchError};

/// Native-backed resize strategy
#[derive(Debug)]
pub struct NativeObserver {
    observer: ResizeObserver,
}

impl NativeObserver {
    /// Construct the native observer. Fails if the window lacks it.
    pub fn new(window: &Window, trigger: Trigger) -> Result<Self, WatchError> {
        let observer = ResizeObserver::new(window, move |entries: &[ResizeObserverEntry]| {
            tracing::trace!("Native resize batch with {} record(s)", entries.len());
            trigger();
        })?;
        Ok(Self { observer })
    }

    /// Start observing an element
    pub fn observe(&mut self, target: NodeId) -> Result<(), WatchError> {
        self.observer.observe(target)?;
        Ok(())
    }

    /// Stop observing everything
    pub fn disconnect(&mut self) {
        self.observer.disconnect();
    }

    /// Observed elements
    pub fn targets(&self) -> Vec<NodeId> {
        self.observer.targets()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizewatch_dom::{DomError, Size, WindowConfig};
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<usize>>, Trigger) {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        (count, Rc::new(move || c.set(c.get() + 1)))
    }

    #[test]
    fn test_one_trigger_per_batch() {
        let window = Window::default();
        let targets: Vec<NodeId> = (0..3)
            .map(|i| {
                let node = {
                    let mut doc = window.document_mut();
                    let node = doc.create_element("div");
                    doc.set_attribute(node, "id", &format!("t{i}")).unwrap();
                    let body = doc.body();
                    doc.append_child(body, node).unwrap();
                    node
                };
                window.set_element_size(node, Size::new(50.0, 50.0)).unwrap();
                node
            })
            .collect();

        let (count, trigger) = counter();
        let mut native = NativeObserver::new(&window, trigger).unwrap();
        for target in &targets {
            native.observe(*target).unwrap();
        }

        // Three change records in one batch
        assert_eq!(window.deliver_resize_observations(), 1);
        assert_eq!(count.get(), 1);

        native.disconnect();
        window.set_element_size(targets[0], Size::new(80.0, 80.0)).unwrap();
        window.deliver_resize_observations();
        assert_eq!(count.get(), 1);
        assert!(native.targets().is_empty());
    }

    #[test]
    fn test_construction_fails_without_capability() {
        let window = Window::new(WindowConfig { resize_observer: false });
        let (_, trigger) = counter();
        let err = NativeObserver::new(&window, trigger).unwrap_err();
        assert_eq!(err, WatchError::Dom(DomError::NotSupported("ResizeObserver")));
    }
}
