//! Step definitions for drag-and-drop reordering scenarios.

mod when;
