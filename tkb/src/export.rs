// Plain-text export of the selected timetable.
use crate::models::CourseSection;
use std::fmt::Write;

pub const EXPORT_HEADER: &str = "=== THỜI KHÓA BIỂU VKU ===";
pub const EXPORT_FILE_NAME: &str = "thoi_khoa_bieu_vku.txt";

/// One numbered block per section, blocks separated by a blank line.
pub fn export_text<'a, I>(selection: I) -> String
where
    I: IntoIterator<Item = &'a CourseSection>,
{
    let mut text = format!("{}\n\n", EXPORT_HEADER);
    for (i, s) in selection.into_iter().enumerate() {
        // writing into a String cannot fail
        let _ = write!(
            text,
            "{}. {}\n   Giảng viên: {}\n   Lịch học: {}\n   Tuần học: {}\n\n",
            i + 1,
            s.title,
            s.instructor,
            s.raw_schedule,
            s.raw_weeks
        );
    }
    text
}
