//! sizewatch
//!
//! Detects size changes of a player container and re-emits them as a
//! single `resize` event.
//!
//! # Strategies
//! - Native: the window's `ResizeObserver`, one trigger per batch
//! - Fallback: an `<iframe>` injected into the container whose own
//!   content-window `resize` fires when the container changes size
//!
//! # Example
//! ```rust,ignore
//! use sizewatch::{ResizeWatcher, RESIZE};
//! use sizewatch_dom::Window;
//!
//! let mut watcher = ResizeWatcher::new(Window::default());
//! watcher.add_event_listener(RESIZE, |_| println!("player resized"));
//! watcher.init("player-1")?;
//! ```

mod config;
mod frame_observer;
mod native;
mod strategy;
mod watcher;

pub use config::WatcherConfig;
pub use frame_observer::FrameObserver;
pub use native::NativeObserver;
pub use strategy::{ActiveObserver, StrategyKind, Trigger};
pub use watcher::{CapabilityDetector, ElementResolver, ResizeWatcher};

use sizewatch_dom::{DomError, NodeId};

/// Kind of the event emitted on every detected resize
pub const RESIZE: &str = "resize";

/// Class given to injected side-channel frames
pub const SIDE_CHANNEL_CLASS: &str = "playkit-size-iframe";

/// Watch error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WatchError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("Element {0:?} has no id attribute")]
    MissingId(NodeId),

    #[error("Element {0:?} is not connected to a document")]
    Disconnected(NodeId),
}
