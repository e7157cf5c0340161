/// Callback run when an anchor is clicked.
pub type ClickHandler = Box<dyn Fn(&mut ClickEvent) + Send + Sync>;

/// A click on an anchor. Handlers may cancel the anchor's own navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    href: String,
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            default_prevented: false,
        }
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// The parsed page, as far as the page guard needs it.
pub trait Document {
    /// Attach `handler` to the first anchor whose `href` attribute equals
    /// `href`. Returns false when the page has no such anchor.
    fn bind_anchor_click(&mut self, href: &str, handler: ClickHandler) -> bool;
}

struct Anchor {
    href: String,
    handlers: Vec<ClickHandler>,
}

/// In-memory page holding a list of anchors; clicks are simulated.
#[derive(Default)]
pub struct StaticDocument {
    anchors: Vec<Anchor>,
}

impl StaticDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor(mut self, href: impl Into<String>) -> Self {
        self.anchors.push(Anchor {
            href: href.into(),
            handlers: Vec::new(),
        });
        self
    }

    /// Click the first anchor with `href`, running its handlers in binding
    /// order. Returns `None` if there is no such anchor.
    pub fn click(&self, href: &str) -> Option<ClickEvent> {
        let anchor = self.anchors.iter().find(|a| a.href == href)?;
        let mut event = ClickEvent::new(href);
        for handler in &anchor.handlers {
            handler(&mut event);
        }
        Some(event)
    }
}

impl Document for StaticDocument {
    fn bind_anchor_click(&mut self, href: &str, handler: ClickHandler) -> bool {
        match self.anchors.iter_mut().find(|a| a.href == href) {
            Some(anchor) => {
                anchor.handlers.push(handler);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_bind_only_first_matching_anchor() {
        let clicks = Arc::new(AtomicUsize::new(0));
        let mut doc = StaticDocument::new()
            .with_anchor("/books")
            .with_anchor("/logout")
            .with_anchor("/logout");

        let counter = clicks.clone();
        assert!(doc.bind_anchor_click(
            "/logout",
            Box::new(move |event| {
                counter.fetch_add(1, Ordering::SeqCst);
                event.prevent_default();
            }),
        ));

        let event = doc.click("/logout").unwrap();
        assert!(event.default_prevented());
        assert_eq!(event.href(), "/logout");
        assert_eq!(clicks.load(Ordering::SeqCst), 1);

        let plain = doc.click("/books").unwrap();
        assert!(!plain.default_prevented());
    }

    #[test]
    fn test_bind_missing_anchor() {
        let mut doc = StaticDocument::new().with_anchor("/books");
        assert!(!doc.bind_anchor_click("/logout", Box::new(|_| {})));
        assert!(doc.click("/logout").is_none());
    }
}
