pub mod config;
pub mod console;
pub mod error;
pub mod events;
pub mod layout;
pub mod plugin;
pub mod registry;
pub mod session;

// Re-export key types
pub use config::Settings;
pub use console::{Console, Severity};
pub use error::ScribaError;
pub use events::{Event, EventBus, EventKind, Subscription};
pub use layout::{DragState, PaneSizes};
pub use plugin::PluginManager;
pub use registry::{Decoration, Page, PageRegistry, Removal};
pub use session::{BufferSession, EditorSession};
