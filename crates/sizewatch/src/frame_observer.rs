//! Frame-based resize observer
//!
//! Mimics the `observe`/`disconnect` surface of `ResizeObserver` for
//! windows that lack it. An empty `<iframe>` is appended to the observed
//! element; once styled to fill its parent, the frame's own content window
//! fires `resize` whenever the parent changes size.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use sizewatch_dom::{DomError, EventTarget, ListenerId, NodeId, Window};

use crate::{Trigger, WatchError};

/// Injected frame and the listener on its content window
struct SideChannel {
    frame: NodeId,
    content_window: Rc<EventTarget>,
    listener: ListenerId,
}

/// Fallback resize strategy
pub struct FrameObserver {
    window: Window,
    class_name: String,
    trigger: Trigger,
    /// Target id -> side-channel
    registry: HashMap<String, SideChannel>,
}

impl FrameObserver {
    pub fn new(window: &Window, class_name: &str, trigger: Trigger) -> Self {
        Self {
            window: window.clone(),
            class_name: class_name.to_string(),
            trigger,
            registry: HashMap::new(),
        }
    }

    /// Start detecting resizes of an element.
    ///
    /// The element's `id` attribute keys the registry. Observing an id that
    /// is already registered replaces its side-channel.
    pub fn observe(&mut self, target: NodeId) -> Result<(), WatchError> {
        let key = {
            let doc = self.window.document();
            let elem = doc.element(target).ok_or(DomError::NotAnElement(target))?;
            elem.id.clone().ok_or(WatchError::MissingId(target))?
        };

        if let Some(previous) = self.registry.remove(&key) {
            tracing::debug!("Replacing side-channel for #{}", key);
            self.release(previous);
        }

        let (frame, content_window) = {
            let mut doc = self.window.document_mut();
            let frame = doc.create_element("iframe");
            doc.set_attribute(frame, "class", &self.class_name)?;
            doc.append_child(target, frame)?;
            let content_window = doc.content_window(frame);
            if content_window.is_none() {
                doc.detach(frame);
            }
            (frame, content_window)
        };
        let content_window = content_window.ok_or(WatchError::Disconnected(target))?;

        let trigger = Rc::clone(&self.trigger);
        let listener = content_window.add_event_listener("resize", move |_| trigger());
        self.registry.insert(
            key,
            SideChannel {
                frame,
                content_window,
                listener,
            },
        );
        tracing::debug!("Injected side-channel {:?} into {:?}", frame, target);
        Ok(())
    }

    /// Remove every side-channel and clear the registry
    pub fn disconnect(&mut self) {
        let drained: Vec<(String, SideChannel)> = self.registry.drain().collect();
        for (key, side_channel) in drained {
            tracing::debug!("Removing side-channel for #{}", key);
            self.release(side_channel);
        }
    }

    fn release(&self, side_channel: SideChannel) {
        side_channel
            .content_window
            .remove_event_listener("resize", side_channel.listener);
        if !self.window.document_mut().detach(side_channel.frame) {
            tracing::trace!("Side-channel {:?} was already detached", side_channel.frame);
        }
    }

    /// Ids of the observed elements, sorted
    pub fn observed_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.registry.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Side-channel frame injected for an id
    pub fn side_channel(&self, id: &str) -> Option<NodeId> {
        self.registry.get(id).map(|s| s.frame)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl Drop for FrameObserver {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl fmt::Debug for FrameObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameObserver")
            .field("class_name", &self.class_name)
            .field("observed", &self.observed_ids())
            .finish()
    }
}
