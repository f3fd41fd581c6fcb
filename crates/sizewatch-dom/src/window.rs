//! Window - global scope of the host
//!
//! Owns the document, the native resize observer registry and the layout
//! entry point used to change element sizes.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::observer::ObserverShared;
use crate::{Document, DomError, Event, NodeId, Size};

/// Window configuration
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Expose the native `ResizeObserver` primitive
    pub resize_observer: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { resize_observer: true }
    }
}

struct WindowInner {
    config: WindowConfig,
    document: RefCell<Document>,
    resize_observers: RefCell<Vec<Weak<ObserverShared>>>,
}

/// Window handle
///
/// Cloning creates a new handle to the same window.
#[derive(Clone)]
pub struct Window {
    inner: Rc<WindowInner>,
}

impl Window {
    /// Create a window with an empty `<html>/<head>/<body>` document
    pub fn new(config: WindowConfig) -> Self {
        Self::with_document(config, Document::new())
    }

    /// Create a window around an existing document
    pub fn with_document(config: WindowConfig, document: Document) -> Self {
        Self {
            inner: Rc::new(WindowInner {
                config,
                document: RefCell::new(document),
                resize_observers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Check for the native resize observation capability
    pub fn has_resize_observer(&self) -> bool {
        self.inner.config.resize_observer
    }

    /// Borrow the document
    ///
    /// # Panics
    ///
    /// Panics if the document is mutably borrowed.
    pub fn document(&self) -> Ref<'_, Document> {
        self.inner.document.borrow()
    }

    /// Borrow the document mutably
    ///
    /// # Panics
    ///
    /// Panics if the document is already borrowed.
    pub fn document_mut(&self) -> RefMut<'_, Document> {
        self.inner.document.borrow_mut()
    }

    /// Install a style rule that sizes elements of `class` to their parent
    pub fn add_fill_parent_class(&self, class: &str) {
        self.document_mut().add_fill_parent_class(class);
    }

    /// Lay out an element at a new size.
    ///
    /// Children carrying a fill-parent class follow the new size. Every frame
    /// whose box changed fires `resize` on its content window. Native
    /// observers see the change on the next
    /// [`deliver_resize_observations`](Self::deliver_resize_observations).
    pub fn set_element_size(&self, node: NodeId, size: Size) -> Result<(), DomError> {
        let (is_frame, followers) = {
            let mut doc = self.document_mut();
            let elem = doc.element_mut(node).ok_or(DomError::NotAnElement(node))?;
            if elem.size == size {
                return Ok(());
            }
            elem.size = size;
            let is_frame = elem.is_frame();

            let followers: Vec<NodeId> = doc
                .tree()
                .children(node)
                .filter_map(|(id, child)| {
                    child
                        .as_element()
                        .filter(|e| doc.fills_parent(&e.class_name))
                        .map(|_| id)
                })
                .collect();
            (is_frame, followers)
        };
        tracing::trace!("Resized {:?} to {}x{}", node, size.width, size.height);

        if is_frame {
            self.dispatch_frame_resize(node);
        }
        for child in followers {
            self.set_element_size(child, size)?;
        }
        Ok(())
    }

    /// Fire `resize` on a frame's content window. Returns false if the
    /// node has no browsing context.
    pub fn dispatch_frame_resize(&self, frame: NodeId) -> bool {
        // Release the document before running listeners.
        let content_window = self.document().content_window(frame);
        match content_window {
            Some(target) => {
                target.dispatch_event(&Event::new("resize"));
                true
            }
            None => false,
        }
    }

    pub(crate) fn register_resize_observer(&self, observer: &Rc<ObserverShared>) {
        self.inner
            .resize_observers
            .borrow_mut()
            .push(Rc::downgrade(observer));
    }

    /// Number of live native observers
    pub fn resize_observer_count(&self) -> usize {
        self.inner
            .resize_observers
            .borrow()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Run the resize observation step of the rendering loop.
    ///
    /// Observers are visited in creation order; each one with changed
    /// targets gets a single batch. Returns the number of batches delivered.
    pub fn deliver_resize_observations(&self) -> usize {
        let live: Vec<Rc<ObserverShared>> = {
            let mut observers = self.inner.resize_observers.borrow_mut();
            observers.retain(|w| w.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };

        let delivered = live.iter().filter(|o| o.deliver(self)).count();
        if delivered > 0 {
            tracing::debug!("Delivered {} resize observation batch(es)", delivered);
        }
        delivered
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new(WindowConfig::default())
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("config", &self.inner.config)
            .field("resize_observers", &self.resize_observer_count())
            .finish()
    }
}
