use crate::booker::BookingError;

/// Daily windows during which no class may be scheduled.
pub const BREAK_WINDOWS: [(&str, &str); 2] = [("12:00", "13:00"), ("16:00", "18:00")];

const SEPARATOR: &str = " - ";

/// A validated "HH:MM - HH:MM" slot label.
///
/// The label is kept verbatim and compared as a raw string everywhere:
/// two labels denote the same slot only when they are equal character for
/// character. Ordering of the HH:MM parts is lexicographic, which is sound
/// for zero-padded times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    raw: String,
    start: String,
    end: String,
}

impl TryFrom<&str> for TimeSlot {
    type Error = BookingError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let raw = value.trim();
        let parts = raw.split(SEPARATOR).collect::<Vec<&str>>();
        if parts.len() != 2 {
            return Err(BookingError::InvalidTimeFormat(raw.to_string()));
        }
        let start = parts[0].trim();
        let end = parts[1].trim();
        if start.is_empty() || end.is_empty() {
            return Err(BookingError::InvalidTimeFormat(raw.to_string()));
        }
        Ok(Self {
            raw: raw.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        })
    }
}

impl TimeSlot {
    /// The verbatim label, used as the slot key in the ledger.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Rejects the slot when it overlaps a break window.
    pub fn check_breaks(&self) -> Result<(), BookingError> {
        for (break_start, break_end) in BREAK_WINDOWS {
            if self.start.as_str() < break_end && self.end.as_str() > break_start {
                return Err(BookingError::BreakOverlap {
                    start: break_start,
                    end: break_end,
                });
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}
