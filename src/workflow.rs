//! The booking workflow: a staged interaction that gathers a class, course,
//! slot, lecturer and room, checks availability against the ledger and
//! commits the booking as the terminal step. Each stage is a plain method
//! call, so the whole protocol runs without a terminal attached.
//!
//! Any error aborts the attempt with no ledger change: the only append
//! happens inside [`BookingWizard::commit`], which re-validates both
//! conflict invariants.

use crate::booker::{Booking, BookingError, BookingLedger};
use crate::catalog::ScheduleCatalog;
use crate::normalizer::normalize_lecturer;
use crate::rooms::{RoomDescriptor, RoomRegistry};
use crate::timeslot::TimeSlot;

/// Where a wizard currently sits in the booking protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AwaitingClass,
    AwaitingCourse,
    AwaitingSlot,
    AwaitingLecturer,
    AwaitingRoom,
    Committed,
}

/// Outcome of the slot step: how the lecturer is to be determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LecturerStep {
    /// Exactly one candidate was found and has been applied.
    AutoSelected(String),
    /// Several candidates; one must be picked via `select_lecturer`.
    Choices(Vec<String>),
    /// No candidate in the catalog; any name may be supplied manually.
    ManualEntry,
}

/// One booking attempt over a catalog and room registry.
pub struct BookingWizard<'a> {
    catalog: &'a ScheduleCatalog,
    registry: &'a RoomRegistry,
    stage: Stage,
    class_id: String,
    course: String,
    day: String,
    slot: Option<TimeSlot>,
    lecturer: String,
    candidates: Vec<String>,
}

impl<'a> BookingWizard<'a> {
    pub fn new(catalog: &'a ScheduleCatalog, registry: &'a RoomRegistry) -> Self {
        Self {
            catalog,
            registry,
            stage: Stage::AwaitingClass,
            class_id: String::new(),
            course: String::new(),
            day: String::new(),
            slot: None,
            lecturer: String::new(),
            candidates: Vec::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn expect_stage(&self, expected: Stage) -> Result<(), BookingError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(BookingError::WrongStage(self.stage))
        }
    }

    /// Picks the class and returns its course list.
    pub fn select_class(&mut self, class_id: &str) -> Result<Vec<String>, BookingError> {
        self.expect_stage(Stage::AwaitingClass)?;
        if !self.catalog.contains_class(class_id) {
            return Err(BookingError::UnknownClass(class_id.to_string()));
        }
        self.class_id = class_id.to_string();
        self.stage = Stage::AwaitingCourse;
        Ok(self.catalog.courses(class_id))
    }

    pub fn select_course(&mut self, course: &str) -> Result<(), BookingError> {
        self.expect_stage(Stage::AwaitingCourse)?;
        if !self.catalog.courses(&self.class_id).iter().any(|c| c == course) {
            return Err(BookingError::UnknownCourse {
                class_id: self.class_id.clone(),
                course: course.to_string(),
            });
        }
        self.course = course.to_string();
        self.stage = Stage::AwaitingSlot;
        Ok(())
    }

    /// Validates the day/time pick against the break windows and derives the
    /// lecturer candidates for the selected course.
    pub fn set_slot(&mut self, day: &str, time: &str) -> Result<LecturerStep, BookingError> {
        self.expect_stage(Stage::AwaitingSlot)?;
        let slot = TimeSlot::try_from(time)?;
        slot.check_breaks()?;
        self.day = day.trim().to_string();
        self.slot = Some(slot);

        let mut candidates = self.catalog.lecturer_candidates(&self.course);
        match candidates.len() {
            0 => {
                self.candidates.clear();
                self.stage = Stage::AwaitingLecturer;
                Ok(LecturerStep::ManualEntry)
            }
            1 => {
                self.lecturer = candidates.remove(0);
                self.stage = Stage::AwaitingRoom;
                Ok(LecturerStep::AutoSelected(self.lecturer.clone()))
            }
            _ => {
                self.candidates = candidates.clone();
                self.stage = Stage::AwaitingLecturer;
                Ok(LecturerStep::Choices(candidates))
            }
        }
    }

    /// Applies the lecturer pick. With candidates present the name must be
    /// one of them; without candidates any manual name is accepted and
    /// normalized before storage.
    pub fn select_lecturer(&mut self, name: &str) -> Result<(), BookingError> {
        self.expect_stage(Stage::AwaitingLecturer)?;
        if self.candidates.is_empty() {
            self.lecturer = normalize_lecturer(name);
        } else if self.candidates.iter().any(|c| c == name) {
            self.lecturer = name.to_string();
        } else {
            return Err(BookingError::UnknownLecturer(name.to_string()));
        }
        self.stage = Stage::AwaitingRoom;
        Ok(())
    }

    /// Checks the lecturer for a conflict and returns the free rooms for the
    /// slot, in registry order. An empty result is an error: the attempt is
    /// over.
    pub fn room_options(&self, ledger: &BookingLedger) -> Result<Vec<RoomDescriptor>, BookingError> {
        self.expect_stage(Stage::AwaitingRoom)?;
        let time = self.time();
        if ledger.lecturer_conflict(&self.lecturer, &self.day, time) {
            return Err(BookingError::LecturerConflict {
                lecturer: self.lecturer.clone(),
                day: self.day.clone(),
                time: time.to_string(),
            });
        }
        let rooms: Vec<RoomDescriptor> = ledger
            .rooms_available(self.registry, &self.day, time)
            .into_iter()
            .cloned()
            .collect();
        if rooms.is_empty() {
            return Err(BookingError::NoRoomAvailable {
                day: self.day.clone(),
                time: time.to_string(),
            });
        }
        Ok(rooms)
    }

    /// Builds the booking and appends it to the ledger. The ledger re-checks
    /// both conflicts, so a stale room pick still cannot break the
    /// invariants.
    pub fn commit(
        &mut self,
        room: &RoomDescriptor,
        ledger: &mut BookingLedger,
    ) -> Result<Booking, BookingError> {
        self.expect_stage(Stage::AwaitingRoom)?;
        let booking = Booking {
            class_id: self.class_id.clone(),
            course: self.course.clone(),
            lecturer: self.lecturer.clone(),
            building: room.building.clone(),
            floor: room.floor,
            room_name: room.room_name.clone(),
            day: self.day.clone(),
            time: self.time().to_string(),
        };
        ledger.commit(booking.clone())?;
        self.stage = Stage::Committed;
        Ok(booking)
    }

    fn time(&self) -> &str {
        // Only reachable past AwaitingSlot, where the slot is always set.
        self.slot.as_ref().map(TimeSlot::as_str).unwrap_or("")
    }
}
