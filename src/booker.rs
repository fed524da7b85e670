use crate::rooms::{RoomDescriptor, RoomRegistry};
use crate::workflow::Stage;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Why a booking attempt was refused. Every variant aborts only the current
/// attempt; the ledger is never left with a partial entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("invalid time format '{0}', expected 'HH:MM - HH:MM'")]
    InvalidTimeFormat(String),

    #[error("slot overlaps the {start} - {end} break window")]
    BreakOverlap {
        start: &'static str,
        end: &'static str,
    },

    #[error("unknown class '{0}'")]
    UnknownClass(String),

    #[error("'{course}' is not a course of class '{class_id}'")]
    UnknownCourse { class_id: String, course: String },

    #[error("'{0}' is not among the lecturer candidates")]
    UnknownLecturer(String),

    #[error("lecturer {lecturer} is already booked on {day} at {time}")]
    LecturerConflict {
        lecturer: String,
        day: String,
        time: String,
    },

    #[error("room {room} is already booked on {day} at {time}")]
    RoomConflict {
        room: String,
        day: String,
        time: String,
    },

    #[error("no room available on {day} at {time}")]
    NoRoomAvailable { day: String, time: String },

    #[error("booking step out of order, currently at {0:?}")]
    WrongStage(Stage),
}

/// A confirmed class/room/lecturer/time assignment. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Booking {
    pub class_id: String,
    pub course: String,
    pub lecturer: String,
    pub building: String,
    pub floor: u32,
    pub room_name: String,
    pub day: String,
    pub time: String,
}

impl Booking {
    fn occupies(&self, room: &RoomDescriptor) -> bool {
        self.building == room.building
            && self.floor == room.floor
            && self.room_name == room.room_name
    }
}

impl std::fmt::Display for Booking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} ({}) in building {} floor {} room {}, {} {}",
            self.lecturer,
            self.course,
            self.class_id,
            self.building,
            self.floor,
            self.room_name,
            self.day,
            self.time
        )
    }
}

/// The in-memory list of confirmed bookings. Lives for the process lifetime;
/// entries are appended through [`commit`](Self::commit) only, which upholds
/// both uniqueness invariants: no two bookings share a room at the same
/// (day, time), and no lecturer is booked twice at the same (day, time).
///
/// Day and time are compared as raw strings throughout: "08:00 - 09:00" and
/// "08:00-09:00" are distinct slots.
#[derive(Debug, Default)]
pub struct BookingLedger {
    bookings: Vec<Booking>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Every registry room with no booking at exactly (day, time), in
    /// registry order.
    pub fn rooms_available<'a>(
        &self,
        registry: &'a RoomRegistry,
        day: &str,
        time: &str,
    ) -> Vec<&'a RoomDescriptor> {
        registry
            .rooms()
            .iter()
            .filter(|room| !self.room_taken(room, day, time))
            .collect()
    }

    pub fn room_taken(&self, room: &RoomDescriptor, day: &str, time: &str) -> bool {
        self.bookings
            .iter()
            .any(|b| b.occupies(room) && b.day == day && b.time == time)
    }

    pub fn lecturer_conflict(&self, lecturer: &str, day: &str, time: &str) -> bool {
        self.bookings
            .iter()
            .any(|b| b.lecturer == lecturer && b.day == day && b.time == time)
    }

    /// Appends a booking after re-checking both conflicts. This is the only
    /// write path into the ledger.
    pub fn commit(&mut self, booking: Booking) -> Result<(), BookingError> {
        if self.lecturer_conflict(&booking.lecturer, &booking.day, &booking.time) {
            return Err(BookingError::LecturerConflict {
                lecturer: booking.lecturer,
                day: booking.day,
                time: booking.time,
            });
        }
        let room = RoomDescriptor {
            building: booking.building.clone(),
            floor: booking.floor,
            room_name: booking.room_name.clone(),
        };
        if self.room_taken(&room, &booking.day, &booking.time) {
            return Err(BookingError::RoomConflict {
                room: booking.room_name,
                day: booking.day,
                time: booking.time,
            });
        }
        debug!("Appending booking: {:?}", booking);
        self.bookings.push(booking);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(lecturer: &str, room: &RoomDescriptor, day: &str, time: &str) -> Booking {
        Booking {
            class_id: "2022A".to_string(),
            course: "Basis Data".to_string(),
            lecturer: lecturer.to_string(),
            building: room.building.clone(),
            floor: room.floor,
            room_name: room.room_name.clone(),
            day: day.to_string(),
            time: time.to_string(),
        }
    }

    #[test]
    fn one_booking_removes_exactly_one_room_from_availability() {
        let registry = RoomRegistry::default_campus();
        let mut ledger = BookingLedger::new();
        let taken = registry.rooms()[3].clone();

        ledger
            .commit(booking("Dr. Budi", &taken, "Senin", "08:00 - 09:00"))
            .unwrap();

        let available = ledger.rooms_available(&registry, "Senin", "08:00 - 09:00");
        assert_eq!(available.len(), registry.len() - 1);
        assert!(!available.contains(&&taken));

        // A different slot is unaffected.
        let other = ledger.rooms_available(&registry, "Senin", "09:00 - 10:00");
        assert_eq!(other.len(), registry.len());
    }

    #[test]
    fn availability_preserves_registry_order() {
        let registry = RoomRegistry::default_campus();
        let ledger = BookingLedger::new();
        let available = ledger.rooms_available(&registry, "Selasa", "10:00 - 11:00");
        let names: Vec<&str> = available.iter().map(|r| r.room_name.as_str()).collect();
        let registry_names: Vec<&str> = registry
            .rooms()
            .iter()
            .map(|r| r.room_name.as_str())
            .collect();
        assert_eq!(names, registry_names);
    }

    #[test]
    fn commit_refuses_double_booked_room() {
        let registry = RoomRegistry::default_campus();
        let mut ledger = BookingLedger::new();
        let room = registry.rooms()[0].clone();

        ledger
            .commit(booking("Dr. Budi", &room, "Senin", "08:00 - 09:00"))
            .unwrap();
        let err = ledger
            .commit(booking("Dr. Sari", &room, "Senin", "08:00 - 09:00"))
            .unwrap_err();

        assert!(matches!(err, BookingError::RoomConflict { .. }));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn commit_refuses_double_booked_lecturer() {
        let registry = RoomRegistry::default_campus();
        let mut ledger = BookingLedger::new();

        ledger
            .commit(booking(
                "Dr. Budi",
                &registry.rooms()[0],
                "Senin",
                "08:00 - 09:00",
            ))
            .unwrap();
        let err = ledger
            .commit(booking(
                "Dr. Budi",
                &registry.rooms()[1],
                "Senin",
                "08:00 - 09:00",
            ))
            .unwrap_err();

        assert!(matches!(err, BookingError::LecturerConflict { .. }));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn distinct_raw_time_labels_are_distinct_slots() {
        let registry = RoomRegistry::default_campus();
        let mut ledger = BookingLedger::new();
        let room = registry.rooms()[0].clone();

        ledger
            .commit(booking("Dr. Budi", &room, "Senin", "08:00 - 09:00"))
            .unwrap();
        // No spaces around the separator: a different key, so no conflict.
        ledger
            .commit(booking("Dr. Budi", &room, "Senin", "08:00-09:00"))
            .unwrap();

        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn ledger_invariants_hold_after_any_commit_sequence() {
        let registry = RoomRegistry::default_campus();
        let mut ledger = BookingLedger::new();
        let attempts = [
            ("Dr. Budi", 0, "Senin", "08:00 - 09:00"),
            ("Dr. Budi", 1, "Senin", "08:00 - 09:00"), // lecturer clash
            ("Dr. Sari", 0, "Senin", "08:00 - 09:00"), // room clash
            ("Dr. Sari", 1, "Senin", "08:00 - 09:00"),
            ("Dr. Budi", 0, "Selasa", "08:00 - 09:00"),
            ("Dr. Sari", 1, "Senin", "10:00 - 11:00"),
        ];
        for (lecturer, room_idx, day, time) in attempts {
            let _ = ledger.commit(booking(lecturer, &registry.rooms()[room_idx], day, time));
        }
        assert_eq!(ledger.len(), 4);

        let all = ledger.bookings();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                let same_slot = a.day == b.day && a.time == b.time;
                assert!(
                    !(same_slot
                        && a.building == b.building
                        && a.floor == b.floor
                        && a.room_name == b.room_name),
                    "two bookings share a room slot"
                );
                assert!(
                    !(same_slot && a.lecturer == b.lecturer),
                    "two bookings share a lecturer slot"
                );
            }
        }
    }
}
