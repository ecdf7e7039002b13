//! # Screen State
//!
//! What a screen shows while it drives an orchestrated operation: a loading
//! overlay while the operation is pending, an error overlay with the
//! operation's message once it failed, or the normal content.
//!
//! A screen may be torn down while its operation is still in flight. The
//! operation still completes and mutates the store, but every update to a
//! disposed screen is silently ignored.

use crate::error::SyncError;

/// The three mutually exclusive things a screen can show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenView {
    Loading,
    Error(String),
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenState {
    view: ScreenView,
    disposed: bool,
}

impl ScreenState {
    /// Screen showing its content (idle)
    pub fn new() -> Self {
        Self {
            view: ScreenView::Content,
            disposed: false,
        }
    }

    /// Screen that fetches on open and starts behind the loading overlay
    pub fn loading() -> Self {
        Self {
            view: ScreenView::Loading,
            disposed: false,
        }
    }

    pub fn view(&self) -> &ScreenView {
        &self.view
    }

    pub fn is_loading(&self) -> bool {
        self.view == ScreenView::Loading
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.view {
            ScreenView::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Show the loading overlay. Returns false if the screen is gone.
    pub fn begin(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        self.view = ScreenView::Loading;
        true
    }

    /// Apply an operation's outcome. On success the completion action runs
    /// (for example returning to the previous screen). Returns false, doing
    /// nothing, if the screen was disposed first.
    pub fn settle<T>(
        &mut self,
        result: &Result<T, SyncError>,
        on_success: impl FnOnce(&T),
    ) -> bool {
        if self.disposed {
            return false;
        }
        match result {
            Ok(value) => {
                self.view = ScreenView::Content;
                on_success(value);
            }
            Err(error) => self.view = ScreenView::Error(error.user_message()),
        }
        true
    }

    /// Dismiss the error overlay so the user can retry
    pub fn acknowledge_error(&mut self) {
        if !self.disposed && matches!(self.view, ScreenView::Error(_)) {
            self.view = ScreenView::Content;
        }
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }
}

impl Default for ScreenState {
    fn default() -> Self {
        Self::new()
    }
}
