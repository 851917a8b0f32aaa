//! This module defines the lifecycle of a record as it flows through the
//! SELECT pipeline.

pub(crate) use self::document::CursorDoc;

mod document;
