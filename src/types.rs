//! Common types and data structures

/// One carousel entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub image: String, // URL or path relative to the slide asset dir
    pub category: String,
}

/// Navigation request routed to the carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    Previous,
    Next,
    GoTo(usize),
}

/// UI section that currently owns keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusSection {
    #[default]
    Carousel,
    Generator,
}

/// Severity of a user-visible notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// User-visible notification, rendered as a toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }
}
