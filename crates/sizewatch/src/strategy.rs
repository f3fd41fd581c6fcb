//! Strategy selection
//!
//! The watcher checks the capability once, builds one of the two
//! strategies and only ever talks to it through [`ActiveObserver`].

use std::fmt;
use std::rc::Rc;

use sizewatch_dom::{NodeId, Window};

use crate::{FrameObserver, NativeObserver, WatchError};

/// Payload-free resize signal produced by either strategy
pub type Trigger = Rc<dyn Fn()>;

/// Which strategy an observer uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Native,
    Fallback,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str("native"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// The watcher's single active observation
#[derive(Debug)]
pub enum ActiveObserver {
    Native(NativeObserver),
    Fallback(FrameObserver),
}

impl ActiveObserver {
    /// Build the native strategy when `native` is set, the frame strategy otherwise
    pub fn select(
        window: &Window,
        native: bool,
        side_channel_class: &str,
        trigger: Trigger,
    ) -> Result<Self, WatchError> {
        if native {
            Ok(Self::Native(NativeObserver::new(window, trigger)?))
        } else {
            Ok(Self::Fallback(FrameObserver::new(window, side_channel_class, trigger)))
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Native(_) => StrategyKind::Native,
            Self::Fallback(_) => StrategyKind::Fallback,
        }
    }

    /// Attach to an element
    pub fn observe(&mut self, target: NodeId) -> Result<(), WatchError> {
        match self {
            Self::Native(observer) => observer.observe(target),
            Self::Fallback(observer) => observer.observe(target),
        }
    }

    /// Release everything the strategy allocated
    pub fn disconnect(&mut self) {
        match self {
            Self::Native(observer) => observer.disconnect(),
            Self::Fallback(observer) => observer.disconnect(),
        }
    }
}
