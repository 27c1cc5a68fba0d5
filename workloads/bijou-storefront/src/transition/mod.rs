//! Page transitions.
//!
//! An internal link click snapshots the page, swaps in the target page's
//! content underneath the snapshot and shrinks the snapshot away toward the
//! click point.

mod effect;
mod gate;

pub use effect::{play, reload_on_history_navigation};
pub use gate::{TransitionGate, TransitionGuard};

/// What the storefront knows about a link click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkClick {
    /// Resolved `href` of the link.
    pub href: String,
    /// Origin of the current page.
    pub origin: String,
    /// `MouseEvent.button`; 0 is the primary button.
    pub button: i16,
    /// Any of ctrl, meta, shift or alt was held.
    pub modifier: bool,
    /// The link opens elsewhere (`target="_blank"`) or downloads.
    pub leaves_page: bool,
}

impl LinkClick {
    /// Whether the click animates instead of letting the browser navigate.
    pub fn should_intercept(&self) -> bool {
        self.button == 0
            && !self.modifier
            && !self.leaves_page
            && same_origin(&self.href, &self.origin)
    }
}

/// Whether the absolute URL `href` belongs to `origin`.
pub fn same_origin(href: &str, origin: &str) -> bool {
    if origin.is_empty() {
        return false;
    }
    match href.strip_prefix(origin) {
        Some(rest) => rest.is_empty() || rest.starts_with(['/', '?', '#']),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(href: &str) -> LinkClick {
        LinkClick {
            href: href.to_string(),
            origin: "https://joyas.example".to_string(),
            button: 0,
            modifier: false,
            leaves_page: false,
        }
    }

    #[test]
    fn test_plain_internal_click() {
        assert!(click("https://joyas.example/shop/ring-a").should_intercept());
        assert!(click("https://joyas.example").should_intercept());
        assert!(click("https://joyas.example?cat=rings").should_intercept());
    }

    #[test]
    fn test_other_origins() {
        assert!(!click("https://joyas.example.evil.com/shop").should_intercept());
        assert!(!click("http://joyas.example/shop").should_intercept());
        assert!(!click("mailto:info@joyas.example").should_intercept());
    }

    #[test]
    fn test_modified_clicks() {
        let mut c = click("https://joyas.example/shop");
        c.modifier = true;
        assert!(!c.should_intercept());

        let mut c = click("https://joyas.example/shop");
        c.button = 1;
        assert!(!c.should_intercept());

        let mut c = click("https://joyas.example/shop");
        c.leaves_page = true;
        assert!(!c.should_intercept());
    }

    #[test]
    fn test_unknown_origin() {
        assert!(!same_origin("https://joyas.example/shop", ""));
    }
}
