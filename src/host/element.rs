use crate::error::HostError;
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Stable identity of an element for the lifetime of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How an editable element stores its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Text lives in a `value` property (`<textarea>`, `<input>`). Writes go
    /// through the platform-native setter so framework trackers see them.
    ValueBearing,
    /// Text is the rendered content of a rich editable region.
    ContentEditable,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ValueBearing => "value",
            Self::ContentEditable => "contenteditable",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        meta: false,
        alt: false,
    };

    pub const fn any(self) -> bool {
        self.shift || self.ctrl || self.meta || self.alt
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    /// Unmodified Enter: the user is sending the prompt.
    pub fn is_submit(&self) -> bool {
        self.key == "Enter" && !self.modifiers.any()
    }
}

/// Low-level notification from the host element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEvent {
    /// Content changed (keystroke, paste, subtree mutation, synthetic input).
    Edit,
    Key(KeyPress),
}

/// Receiving end of an element subscription. Dropping it unsubscribes.
pub type EventStream = mpsc::UnboundedReceiver<RawEvent>;

/// Primitive operations a host page element offers.
pub trait HostElement: Send + Sync {
    fn id(&self) -> ElementId;
    fn kind(&self) -> ElementKind;
    /// Has a layout box.
    fn is_visible(&self) -> bool;
    fn value(&self) -> String;
    fn set_value_native(&self, text: &str);
    fn text_content(&self) -> String;
    fn replace_content(&self, text: &str);
    /// Fire a synthetic `input` notification.
    fn dispatch_input(&self);
    fn subscribe(&self) -> EventStream;
}

/// Page-level queries the locator and clipboard control need.
pub trait HostPage: Send + Sync {
    /// First element matching a host-specific selector.
    fn query(&self, selector: &str) -> Option<Arc<dyn HostElement>>;
    /// Every editable element, in document order.
    fn editable_candidates(&self) -> Vec<Arc<dyn HostElement>>;
    fn write_clipboard(&self, text: &str) -> Result<(), HostError>;
}

/// The located input field with a uniform read/write surface over both
/// element kinds.
#[derive(Clone)]
pub struct EditableHandle {
    element: Arc<dyn HostElement>,
    kind: ElementKind,
}

impl EditableHandle {
    pub fn new(element: Arc<dyn HostElement>) -> Self {
        let kind = element.kind();
        Self { element, kind }
    }

    pub fn id(&self) -> ElementId {
        self.element.id()
    }

    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn read(&self) -> String {
        match self.kind {
            ElementKind::ValueBearing => self.element.value(),
            ElementKind::ContentEditable => self.element.text_content(),
        }
    }

    /// Replace the field's text in a way the host page's own input tracking
    /// observes.
    pub fn write(&self, text: &str) {
        match self.kind {
            ElementKind::ValueBearing => self.element.set_value_native(text),
            ElementKind::ContentEditable => self.element.replace_content(text),
        }
        self.element.dispatch_input();
    }

    pub fn subscribe(&self) -> EventStream {
        self.element.subscribe()
    }
}

impl fmt::Debug for EditableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditableHandle")
            .field("id", &self.id())
            .field("kind", &self.kind)
            .finish()
    }
}
