use serde::Deserialize;

/// One attendance entry, matching the header row written by `init`.
#[derive(Debug, Deserialize)]
pub struct AttendanceRecord {
    pub date: String,
    pub time: String,
    pub student: String,
    pub status: String,
}

impl AttendanceRecord {
    pub fn into_row(self) -> [String; 4] {
        [self.date, self.time, self.student, self.status]
    }
}
