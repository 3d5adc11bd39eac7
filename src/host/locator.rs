use super::element::{EditableHandle, HostPage};

/// Resolves the single active input field on a page.
#[derive(Debug, Clone)]
pub struct InputLocator {
    selectors: Vec<String>,
}

impl InputLocator {
    pub fn new(selectors: Vec<String>) -> Self {
        Self { selectors }
    }

    /// Host-specific selectors first (in order), then the first visible
    /// editable element on the page. Invisible matches are skipped.
    pub fn locate(&self, page: &dyn HostPage) -> Option<EditableHandle> {
        let by_selector = self
            .selectors
            .iter()
            .filter_map(|selector| page.query(selector))
            .find(|el| el.is_visible());

        let element = by_selector
            .or_else(|| page.editable_candidates().into_iter().find(|el| el.is_visible()))?;
        Some(EditableHandle::new(element))
    }
}
