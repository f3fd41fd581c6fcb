//! Resize Watcher
//!
//! Public façade: owns at most one [`ActiveObserver`] and turns every
//! trigger it produces into one `resize` event on its own event target.

use std::fmt;
use std::rc::Rc;

use sizewatch_dom::{Document, Event, EventTarget, ListenerId, NodeId, Window};

use crate::{ActiveObserver, StrategyKind, Trigger, WatchError, WatcherConfig, RESIZE};

/// Resolves a target id to a node in the document
pub type ElementResolver = Box<dyn Fn(&Document, &str) -> Option<NodeId>>;

/// Reports whether the window provides native resize observation
pub type CapabilityDetector = Box<dyn Fn(&Window) -> bool>;

fn default_resolver(doc: &Document, id: &str) -> Option<NodeId> {
    doc.get_element_by_id(id)
}

fn default_detector(window: &Window) -> bool {
    window.has_resize_observer()
}

/// Player container resize watcher
pub struct ResizeWatcher {
    window: Window,
    config: WatcherConfig,
    resolver: ElementResolver,
    detector: CapabilityDetector,
    events: Rc<EventTarget>,
    observer: Option<ActiveObserver>,
    target_id: String,
}

impl ResizeWatcher {
    /// Create an inert watcher with the default configuration
    pub fn new(window: Window) -> Self {
        Self::with_config(window, WatcherConfig::default())
    }

    /// Create an inert watcher
    pub fn with_config(window: Window, config: WatcherConfig) -> Self {
        Self::with_collaborators(
            window,
            config,
            Box::new(default_resolver),
            Box::new(default_detector),
        )
    }

    /// Create an inert watcher with custom element lookup and capability detection
    pub fn with_collaborators(
        window: Window,
        config: WatcherConfig,
        resolver: ElementResolver,
        detector: CapabilityDetector,
    ) -> Self {
        Self {
            window,
            config,
            resolver,
            detector,
            events: Rc::new(EventTarget::new()),
            observer: None,
            target_id: String::new(),
        }
    }

    /// Start watching the element with the given id.
    ///
    /// Any previous observation is destroyed first. A missing target, or one
    /// that is not an HTML element, leaves the watcher inert without error.
    pub fn init(&mut self, target_id: &str) -> Result<(), WatchError> {
        self.destroy();

        let target = {
            let doc = self.window.document();
            (self.resolver)(&*doc, target_id).filter(|node| doc.is_html_element(*node))
        };
        let Some(target) = target else {
            tracing::debug!("Resize target #{} not found, nothing observed", target_id);
            self.target_id = target_id.to_string();
            return Ok(());
        };

        let native = !self.config.force_fallback && (self.detector)(&self.window);
        let mut observer = ActiveObserver::select(
            &self.window,
            native,
            &self.config.side_channel_class,
            self.trigger(),
        )?;
        observer.observe(target)?;

        tracing::debug!("Watching #{} with {} strategy", target_id, observer.kind());
        self.observer = Some(observer);
        self.target_id = target_id.to_string();
        Ok(())
    }

    /// Stop watching and return to the inert state. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            observer.disconnect();
            tracing::debug!("Stopped watching #{}", self.target_id);
        }
        self.target_id.clear();
    }

    fn trigger(&self) -> Trigger {
        let events = Rc::downgrade(&self.events);
        Rc::new(move || {
            if let Some(events) = events.upgrade() {
                events.dispatch_event(&Event::new(RESIZE));
            }
        })
    }

    /// Subscribe to watcher events
    pub fn add_event_listener(
        &self,
        event_type: &str,
        callback: impl Fn(&Event) + 'static,
    ) -> ListenerId {
        self.events.add_event_listener(event_type, callback)
    }

    /// Unsubscribe from watcher events
    pub fn remove_event_listener(&self, event_type: &str, id: ListenerId) -> bool {
        self.events.remove_event_listener(event_type, id)
    }

    /// The watcher's own event target
    pub fn events(&self) -> &EventTarget {
        &self.events
    }

    /// Id passed to the last `init`, empty when destroyed
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    /// Strategy of the active observation
    pub fn strategy(&self) -> Option<StrategyKind> {
        self.observer.as_ref().map(ActiveObserver::kind)
    }
}

impl fmt::Debug for ResizeWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeWatcher")
            .field("target_id", &self.target_id)
            .field("observer", &self.observer)
            .field("config", &self.config)
            .finish()
    }
}
