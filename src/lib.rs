//! Interactive booking of university class schedules.
//!
//! The timetable is loaded once from a workbook into the [`catalog`], rooms
//! come from the static [`rooms`] registry, and confirmed assignments live
//! in the in-memory [`booker`] ledger for the lifetime of the process. The
//! [`workflow`] wizard drives a booking attempt step by step, the [`menu`]
//! module wraps it in a numbered text interface, and [`export`] writes the
//! ledger back out as a workbook.

pub mod booker;
pub mod catalog;
pub mod export;
pub mod menu;
pub mod normalizer;
pub mod rooms;
pub mod timeslot;
pub mod workflow;
