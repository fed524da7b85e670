//! The schedule catalog: every class with its weekly course entries, loaded
//! once at startup from the timetable workbook.
//!
//! The workbook layout is row-block based. A row whose first cell contains
//! the token "Kelas" opens a class group (the class id is the token after
//! ":" up to the first space); the data rows that follow carry the course
//! name in column 2, the day in column 4, the time label in column 5 and the
//! lecturer in column 7. Blank cells become empty strings. Header rows such
//! as "Mata Kuliah" are stored like any other row and filtered out at query
//! time, mirroring the source data.

use crate::normalizer::normalize_lecturer;
use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info};

const CLASS_MARKER: &str = "Kelas";
const COURSE_HEADER: &str = "mata kuliah";
const MIN_DATA_COLUMNS: usize = 8;

/// One timetable row of a class: raw strings straight from the workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub course: String,
    pub day: String,
    pub time: String,
    pub lecturer: String,
}

/// In-memory mapping of class id to its schedule entries, sorted by class id.
#[derive(Debug, Default)]
pub struct ScheduleCatalog {
    classes: BTreeMap<String, Vec<ScheduleEntry>>,
}

impl ScheduleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every sheet of the workbook. A workbook without a single class
    /// block is treated as corrupt.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading schedule from: {}", path.display());
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("opening schedule workbook {}", path.display()))?;

        let mut catalog = Self::new();
        for sheet in workbook.sheet_names().to_owned() {
            let range = workbook
                .worksheet_range(&sheet)
                .with_context(|| format!("reading sheet '{sheet}'"))?;
            catalog.scan_rows(range.rows());
            debug!("Scanned sheet '{}'", sheet);
        }

        if catalog.classes.is_empty() {
            return Err(anyhow!(
                "no class blocks found in {}, expected rows starting with '{CLASS_MARKER}'",
                path.display()
            ));
        }
        info!("Loaded {} classes", catalog.classes.len());
        Ok(catalog)
    }

    fn scan_rows<'r>(&mut self, rows: impl Iterator<Item = &'r [Data]>) {
        let mut current: Option<String> = None;
        for row in rows {
            if let Some(Data::String(head)) = row.first() {
                if head.contains(CLASS_MARKER) {
                    if let Some(class_id) = class_id_from_header(head) {
                        self.classes.entry(class_id.clone()).or_default();
                        current = Some(class_id);
                    }
                    continue;
                }
            }
            if row.len() < MIN_DATA_COLUMNS {
                continue;
            }
            let Some(class_id) = current.as_ref() else {
                continue;
            };
            let Data::String(course) = &row[2] else {
                continue;
            };
            let entry = ScheduleEntry {
                course: course.trim().to_string(),
                day: cell_text(&row[4]),
                time: cell_text(&row[5]),
                lecturer: cell_text(&row[7]),
            };
            if let Some(entries) = self.classes.get_mut(class_id) {
                entries.push(entry);
            }
        }
    }

    /// For tests and tooling: records an entry under a class, creating the
    /// class when needed.
    pub fn add_entry(&mut self, class_id: impl Into<String>, entry: ScheduleEntry) {
        self.classes.entry(class_id.into()).or_default().push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn contains_class(&self, class_id: &str) -> bool {
        self.classes.contains_key(class_id)
    }

    /// Intake-year groupings: the distinct first four characters of every
    /// class id, sorted.
    pub fn cohorts(&self) -> Vec<String> {
        self.classes
            .keys()
            .map(|id| id.chars().take(4).collect::<String>())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }

    /// Class ids belonging to a cohort, sorted.
    pub fn classes_in_cohort(&self, cohort: &str) -> Vec<&str> {
        self.classes
            .keys()
            .filter(|id| id.starts_with(cohort))
            .map(String::as_str)
            .collect()
    }

    /// Distinct course names of a class, sorted, with the literal column
    /// header dropped.
    pub fn courses(&self, class_id: &str) -> Vec<String> {
        let Some(entries) = self.classes.get(class_id) else {
            return Vec::new();
        };
        entries
            .iter()
            .map(|e| e.course.as_str())
            .filter(|c| !c.is_empty() && c.to_lowercase() != COURSE_HEADER)
            .map(str::to_string)
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }

    /// Normalized lecturers of every entry, across all classes, whose course
    /// contains `course` case-insensitively. Deduplicated and sorted.
    pub fn lecturer_candidates(&self, course: &str) -> Vec<String> {
        let needle = course.to_lowercase();
        self.classes
            .values()
            .flatten()
            .filter(|e| {
                !e.course.is_empty()
                    && !e.lecturer.is_empty()
                    && e.course.to_lowercase().contains(&needle)
            })
            .map(|e| normalize_lecturer(&e.lecturer))
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }
}

fn class_id_from_header(head: &str) -> Option<String> {
    let rest = head.split(':').nth(1)?;
    rest.split_whitespace().next().map(str::to_string)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}
