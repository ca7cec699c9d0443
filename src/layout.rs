/// Page routing and the layout shell.
///
/// The shell owns a `ModalSignal` and hands clones of it to each page. A page
/// sets it while a modal is open; the shell hides the sidebar while it is set.

use crate::analytics;
use crate::error::{DashboardError, Result};
use crate::models::Notification;
use log::debug;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// A dashboard route. Serializes as its path (`"/appointments"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Page {
    Dashboard,
    Appointments,
    Patients,
    Schedule,
    Analytics,
    Revenue,
    Prescriptions,
    Profile,
    Settings,
}

impl Page {
    /// Navigation order.
    pub const ALL: [Page; 9] = [
        Page::Dashboard,
        Page::Appointments,
        Page::Patients,
        Page::Schedule,
        Page::Analytics,
        Page::Revenue,
        Page::Prescriptions,
        Page::Profile,
        Page::Settings,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Dashboard => "/",
            Page::Appointments => "/appointments",
            Page::Patients => "/patients",
            Page::Schedule => "/schedule",
            Page::Analytics => "/analytics",
            Page::Revenue => "/revenue",
            Page::Prescriptions => "/prescriptions",
            Page::Profile => "/profile",
            Page::Settings => "/settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Appointments => "Appointments",
            Page::Patients => "Patients",
            Page::Schedule => "Schedule",
            Page::Analytics => "Analytics",
            Page::Revenue => "Revenue",
            Page::Prescriptions => "Prescriptions",
            Page::Profile => "Profile",
            Page::Settings => "Settings",
        }
    }

    /// Resolve a route. A trailing slash is ignored.
    pub fn from_path(path: &str) -> Result<Page> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            rest => rest,
        };
        Page::ALL
            .into_iter()
            .find(|page| page.path() == normalized)
            .ok_or_else(|| DashboardError::UnknownPage(path.to_string()))
    }
}

impl TryFrom<String> for Page {
    type Error = DashboardError;

    fn try_from(path: String) -> Result<Page> {
        Page::from_path(&path)
    }
}

impl From<Page> for String {
    fn from(page: Page) -> String {
        page.path().to_string()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.title())
    }
}

/// Shared "a modal is open" flag. Cloning yields another handle to the same
/// flag. Last writer wins.
#[derive(Debug, Clone, Default)]
pub struct ModalSignal {
    open: Rc<Cell<bool>>,
}

impl ModalSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self) {
        self.open.set(true);
    }

    pub fn close(&self) {
        self.open.set(false);
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }
}

pub struct LayoutShell {
    current: Page,
    modal: ModalSignal,
    unread: usize,
}

impl LayoutShell {
    pub fn new(notifications: &[Notification]) -> Self {
        LayoutShell {
            current: Page::Dashboard,
            modal: ModalSignal::new(),
            unread: analytics::unread_notifications(notifications),
        }
    }

    /// Handle for a page to drive the sidebar.
    pub fn modal_signal(&self) -> ModalSignal {
        self.modal.clone()
    }

    pub fn current_page(&self) -> Page {
        self.current
    }

    pub fn navigate(&mut self, page: Page) {
        debug!("Navigating {} -> {}", self.current.path(), page.path());
        self.current = page;
    }

    pub fn navigate_to_path(&mut self, path: &str) -> Result<Page> {
        let page = Page::from_path(path)?;
        self.navigate(page);
        Ok(page)
    }

    pub fn sidebar_visible(&self) -> bool {
        !self.modal.is_open()
    }

    pub fn unread_notifications(&self) -> usize {
        self.unread
    }
}
