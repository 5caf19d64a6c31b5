//! Arranging a projected schedule into rows, one per cycle of the rotation.
use crate::schedule::ScheduleStop;

/// A row of the timetable: one cell per stop in the rotation
pub type TimetableRow<'a> = Vec<Option<&'a ScheduleStop>>;

/// A schedule laid out as a grid of rotation cycles by positions in the rotation.
///
/// Cells for calls which were not projected (because the schedule ended part-way through a cycle)
/// are empty.
#[derive(Debug, PartialEq)]
pub struct Timetable<'a> {
    rows: Vec<TimetableRow<'a>>,
    rotation_len: usize,
}

impl<'a> Timetable<'a> {
    /// Arrange `stops` into a timetable for a rotation with `rotation_len` stops.
    ///
    /// An empty rotation gives an empty timetable.
    pub fn new(stops: &'a [ScheduleStop], rotation_len: usize) -> Self {
        let mut rows: Vec<TimetableRow<'a>> = Vec::new();
        if rotation_len == 0 {
            return Self { rows, rotation_len };
        }

        for stop in stops {
            let row = stop.index / rotation_len;
            let position = stop.index % rotation_len;
            if rows.len() <= row {
                rows.resize_with(row + 1, || vec![None; rotation_len]);
            }
            rows[row][position] = Some(stop);
        }

        Self { rows, rotation_len }
    }

    /// The number of stops in each row
    pub fn rotation_len(&self) -> usize {
        self.rotation_len
    }

    /// The number of rows (i.e. cycles of the rotation)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the timetable has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over the rows
    pub fn rows(&self) -> impl Iterator<Item = &TimetableRow<'a>> {
        self.rows.iter()
    }
}
