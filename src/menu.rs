//! The interactive numbered-menu surface. All reads and writes go through
//! generic `BufRead`/`Write` handles, so sessions can be scripted in tests.
//!
//! Invalid selections are reported and re-prompted; an empty line cancels
//! the current prompt. Booking failures abort the attempt and return to the
//! main menu, never the process.

use crate::booker::BookingLedger;
use crate::catalog::ScheduleCatalog;
use crate::export::export_bookings;
use crate::rooms::RoomRegistry;
use crate::workflow::{BookingWizard, LecturerStep};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::warn;

/// Runs the menu loop until the user quits or the input ends.
pub fn run<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    catalog: &ScheduleCatalog,
    registry: &RoomRegistry,
    ledger: &mut BookingLedger,
    export_path: &Path,
) -> io::Result<()> {
    loop {
        writeln!(output)?;
        writeln!(output, "=== MAIN MENU ===")?;
        writeln!(output, "1. Book a class slot")?;
        writeln!(output, "2. List bookings")?;
        writeln!(output, "3. Export bookings")?;
        writeln!(output, "4. Quit")?;
        write!(output, "Select (1-4): ")?;
        output.flush()?;

        let Some(choice) = read_line(input)? else {
            break;
        };
        match choice.as_str() {
            "1" => create_booking(input, output, catalog, registry, ledger)?,
            "2" => list_bookings(output, ledger)?,
            "3" => export(output, ledger, export_path)?,
            "4" => {
                writeln!(output, "Bye.")?;
                break;
            }
            other => writeln!(output, "Invalid selection: '{other}'")?,
        }
    }
    Ok(())
}

fn create_booking<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    catalog: &ScheduleCatalog,
    registry: &RoomRegistry,
    ledger: &mut BookingLedger,
) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "=== Book a class slot ===")?;

    let cohorts = catalog.cohorts();
    let Some(cohort) = choose(input, output, "Cohort", &cohorts)? else {
        return cancelled(output);
    };
    let classes = catalog.classes_in_cohort(cohort);
    let Some(class_id) = choose(input, output, "Class", &classes)? else {
        return cancelled(output);
    };

    let mut wizard = BookingWizard::new(catalog, registry);
    let courses = match wizard.select_class(class_id) {
        Ok(courses) => courses,
        Err(err) => return aborted(output, &err),
    };
    let Some(course) = choose(input, output, "Course", &courses)? else {
        return cancelled(output);
    };
    if let Err(err) = wizard.select_course(course) {
        return aborted(output, &err);
    }

    let Some(day) = ask(input, output, "Day (Senin - Minggu): ")? else {
        return cancelled(output);
    };
    let Some(time) = ask(input, output, "Time (e.g. 08:00 - 10:00): ")? else {
        return cancelled(output);
    };
    let step = match wizard.set_slot(&day, &time) {
        Ok(step) => step,
        Err(err) => return aborted(output, &err),
    };

    match step {
        LecturerStep::AutoSelected(name) => {
            writeln!(output, "Lecturer auto-selected: {name}")?;
        }
        LecturerStep::Choices(choices) => {
            let Some(pick) = choose(input, output, "Lecturer", &choices)? else {
                return cancelled(output);
            };
            if let Err(err) = wizard.select_lecturer(pick) {
                return aborted(output, &err);
            }
        }
        LecturerStep::ManualEntry => {
            writeln!(output, "No lecturer found in the timetable for this course.")?;
            let Some(name) = ask(input, output, "Lecturer name: ")? else {
                return cancelled(output);
            };
            if let Err(err) = wizard.select_lecturer(&name) {
                return aborted(output, &err);
            }
        }
    }

    let rooms = match wizard.room_options(ledger) {
        Ok(rooms) => rooms,
        Err(err) => return aborted(output, &err),
    };
    let Some(room) = choose(input, output, "Room", &rooms)? else {
        return cancelled(output);
    };
    match wizard.commit(room, ledger) {
        Ok(booking) => writeln!(output, "Booked: {booking}"),
        Err(err) => return aborted(output, &err),
    }
}

fn list_bookings<W: Write>(output: &mut W, ledger: &BookingLedger) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "=== Booked slots ===")?;
    if ledger.is_empty() {
        return writeln!(output, "(empty)");
    }
    for (i, booking) in ledger.bookings().iter().enumerate() {
        writeln!(output, "{}. {booking}", i + 1)?;
    }
    Ok(())
}

fn export<W: Write>(output: &mut W, ledger: &BookingLedger, path: &Path) -> io::Result<()> {
    if ledger.is_empty() {
        return writeln!(output, "Nothing to export yet.");
    }
    match export_bookings(ledger, path) {
        Ok(count) => writeln!(output, "Exported {count} bookings to {}.", path.display()),
        Err(err) => {
            warn!("Export failed: {:#}", err);
            writeln!(output, "Export failed: {err}")
        }
    }
}

/// Numbered pick over `items`. Re-prompts on anything unparsable or out of
/// range; an empty line or end of input cancels.
fn choose<'t, R: BufRead, W: Write, T: Display>(
    input: &mut R,
    output: &mut W,
    label: &str,
    items: &'t [T],
) -> io::Result<Option<&'t T>> {
    if items.is_empty() {
        writeln!(output, "No {} options available.", label.to_lowercase())?;
        return Ok(None);
    }
    writeln!(output, "{label}:")?;
    for (i, item) in items.iter().enumerate() {
        writeln!(output, "{}. {item}", i + 1)?;
    }
    loop {
        write!(output, "Pick a number (Enter cancels): ")?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        if line.is_empty() {
            return Ok(None);
        }
        match line.parse::<usize>() {
            Ok(n) if (1..=items.len()).contains(&n) => return Ok(Some(&items[n - 1])),
            _ => writeln!(output, "Invalid pick: '{line}'")?,
        }
    }
}

/// Free-form prompt. Empty line or end of input cancels.
fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;
    Ok(read_line(input)?.filter(|line| !line.is_empty()))
}

/// Next trimmed line, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn cancelled<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(output, "Booking cancelled.")
}

fn aborted<W: Write>(output: &mut W, err: &dyn std::error::Error) -> io::Result<()> {
    writeln!(output, "Booking aborted: {err}")
}
