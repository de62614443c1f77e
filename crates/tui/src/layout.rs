//! Centralized layout measurements for the TUI.
//!
//! This module defines shared constants for layout dimensions used across
//! multiple rendering components and by mouse hit-testing, which has to agree
//! with the renderer on where every column and card sits.

/// Height of the header bar in rows.
///
/// The header displays the application title, the pending-request indicator
/// and the help cue.
pub const HEADER_HEIGHT: u16 = 3;

/// Height of each task card in rows.
///
/// This includes the border (2 rows) and content (3 rows: title, description,
/// and the assignee/priority/deadline line).
pub const TASK_CARD_HEIGHT: u16 = 5;

/// Number of board columns.
pub const LANE_COUNT: usize = 5;

/// Minimum terminal height for useful rendering (content area).
///
/// Below this height, we display a "terminal too small" message. The modal
/// form needs the most vertical space: six fields, a hint line and borders.
pub const MIN_HEIGHT: u16 = 11;

/// Minimum terminal height for rendering with header.
///
/// When terminal height is between `MIN_HEIGHT` and `MIN_HEIGHT_WITH_HEADER`,
/// we hide the header to reclaim 3 rows of content space.
pub const MIN_HEIGHT_WITH_HEADER: u16 = MIN_HEIGHT + HEADER_HEIGHT;

/// Minimum terminal width for useful rendering.
///
/// The board has 5 columns; each needs at least 12 characters for borders
/// and truncated titles to be readable.
pub const MIN_WIDTH: u16 = 60;
