//! Persistent chrome around every page: the navigation bar and its visibility rule.

use crate::constants::MENU_REVEAL_RATIO;
use crate::navigation::{Intent, PageId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub page: PageId,
    /// Highlighted because `page` is the current page.
    pub active: bool,
}

impl NavItem {
    pub fn intent(&self) -> Intent {
        Intent::Navigate(self.page)
    }
}

const NAV_TARGETS: [(&str, PageId); 3] = [
    ("Início", PageId::Landing),
    ("Consultas", PageId::Specialties),
    ("Planos", PageId::Plans),
];

/// Navigation bar entries for `current`.
pub fn nav_items(current: PageId) -> [NavItem; 3] {
    NAV_TARGETS.map(|(label, page)| NavItem {
        label,
        page,
        active: page == current,
    })
}

/// Whether the persistent menu is shown.
///
/// Off the landing page it is always shown. On the landing page the hero has its own header, so
/// the menu only appears once the visitor has scrolled past most of the first screen.
pub fn menu_visible(page: PageId, scroll_y: f64, viewport_height: f64) -> bool {
    page != PageId::Landing || scroll_y > viewport_height * MENU_REVEAL_RATIO
}

/// The logo always leads home.
pub fn home() -> Intent {
    Intent::Navigate(PageId::Landing)
}
