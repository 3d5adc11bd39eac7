//! In-memory host page.
//!
//! Backs the interactive console and the pipeline tests: elements hold their
//! text in memory and fan raw events out to live subscribers the same way a
//! DOM listener would.

use super::element::{
    ElementId, ElementKind, EventStream, HostElement, HostPage, KeyPress, Modifiers, RawEvent,
};
use crate::error::HostError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct MemoryElement {
    id: ElementId,
    kind: ElementKind,
    visible: AtomicBool,
    text: Mutex<String>,
    listeners: Mutex<Vec<mpsc::UnboundedSender<RawEvent>>>,
    native_writes: AtomicUsize,
    input_events: AtomicUsize,
}

impl MemoryElement {
    fn new(id: ElementId, kind: ElementKind) -> Self {
        Self {
            id,
            kind,
            visible: AtomicBool::new(true),
            text: Mutex::new(String::new()),
            listeners: Mutex::new(Vec::new()),
            native_writes: AtomicUsize::new(0),
            input_events: AtomicUsize::new(0),
        }
    }

    fn emit(&self, event: &RawEvent) {
        lock(&self.listeners).retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Simulate the user changing the field to `text`.
    pub fn type_text(&self, text: &str) {
        text.clone_into(&mut lock(&self.text));
        self.emit(&RawEvent::Edit);
    }

    pub fn press_key(&self, key: &str, modifiers: Modifiers) {
        self.emit(&RawEvent::Key(KeyPress::new(key, modifiers)));
    }

    pub fn press_enter(&self) {
        self.press_key("Enter", Modifiers::NONE);
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::SeqCst);
    }

    pub fn current_text(&self) -> String {
        lock(&self.text).clone()
    }

    /// Subscribers whose receiving end is still alive.
    pub fn live_listeners(&self) -> usize {
        lock(&self.listeners)
            .iter()
            .filter(|tx| !tx.is_closed())
            .count()
    }

    pub fn native_writes(&self) -> usize {
        self.native_writes.load(Ordering::SeqCst)
    }

    pub fn input_events(&self) -> usize {
        self.input_events.load(Ordering::SeqCst)
    }
}

impl HostElement for MemoryElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    fn value(&self) -> String {
        self.current_text()
    }

    fn set_value_native(&self, text: &str) {
        self.native_writes.fetch_add(1, Ordering::SeqCst);
        text.clone_into(&mut lock(&self.text));
    }

    fn text_content(&self) -> String {
        self.current_text()
    }

    fn replace_content(&self, text: &str) {
        text.clone_into(&mut lock(&self.text));
    }

    fn dispatch_input(&self) {
        self.input_events.fetch_add(1, Ordering::SeqCst);
        self.emit(&RawEvent::Edit);
    }

    fn subscribe(&self) -> EventStream {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.listeners).push(tx);
        rx
    }
}

#[derive(Default)]
pub struct MemoryPage {
    next_id: AtomicU64,
    elements: Mutex<Vec<Arc<MemoryElement>>>,
    selectors: Mutex<HashMap<String, ElementId>>,
    clipboard: Mutex<Vec<String>>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a visible editable element to the page.
    pub fn add_element(&self, kind: ElementKind) -> Arc<MemoryElement> {
        let id = ElementId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let element = Arc::new(MemoryElement::new(id, kind));
        lock(&self.elements).push(Arc::clone(&element));
        element
    }

    /// Add an element reachable through `selector`.
    pub fn add_with_selector(&self, selector: &str, kind: ElementKind) -> Arc<MemoryElement> {
        let element = self.add_element(kind);
        lock(&self.selectors).insert(selector.to_string(), element.id);
        element
    }

    /// Remove an element, as a client-side navigation would.
    pub fn remove(&self, id: ElementId) {
        lock(&self.elements).retain(|e| e.id != id);
        lock(&self.selectors).retain(|_, target| *target != id);
    }

    pub fn clipboard(&self) -> Vec<String> {
        lock(&self.clipboard).clone()
    }

    fn find(&self, id: ElementId) -> Option<Arc<MemoryElement>> {
        lock(&self.elements).iter().find(|e| e.id == id).cloned()
    }
}

impl HostPage for MemoryPage {
    fn query(&self, selector: &str) -> Option<Arc<dyn HostElement>> {
        let id = *lock(&self.selectors).get(selector)?;
        self.find(id).map(|e| e as Arc<dyn HostElement>)
    }

    fn editable_candidates(&self) -> Vec<Arc<dyn HostElement>> {
        lock(&self.elements)
            .iter()
            .map(|e| Arc::clone(e) as Arc<dyn HostElement>)
            .collect()
    }

    fn write_clipboard(&self, text: &str) -> Result<(), HostError> {
        lock(&self.clipboard).push(text.to_string());
        Ok(())
    }
}
