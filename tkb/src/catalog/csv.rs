use crate::algorithm::leading_int;
use crate::models::{section_id, CourseSection, SectionRow};
use tracing::debug;

/// Minimum number of positional fields for a usable row:
/// code, sequence, title, capacity, enrolled, instructor, schedule, weeks.
pub const MIN_FIELDS: usize = 8;

/// Split one CSV line. A double quote toggles quoted mode and is dropped;
/// commas only separate fields outside quotes. Fields are trimmed.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            c => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Positional fields to a normalized row. `None` when there are too few fields.
pub fn row_from_fields(fields: &[String]) -> Option<SectionRow> {
    if fields.len() < MIN_FIELDS {
        return None;
    }
    Some(SectionRow {
        course_code: fields[0].clone(),
        sequence: fields[1].clone(),
        title: fields[2].clone(),
        capacity: leading_int(&fields[3]).unwrap_or(0),
        enrolled: leading_int(&fields[4]).unwrap_or(0),
        instructor: fields[5].clone(),
        schedule: fields[6].clone(),
        weeks: fields[7].clone(),
    })
}

/// Parse a whole CSV document. The first line is the header; blank and
/// short rows are skipped. The line number doubles as the row index in ids.
pub fn parse_csv(document: &str) -> Vec<CourseSection> {
    let mut out = Vec::new();
    for (i, line) in document.trim().lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields = parse_csv_line(line);
        let Some(row) = row_from_fields(&fields) else {
            debug!(line = i, fields = fields.len(), "skipping short csv row");
            continue;
        };
        let id = section_id(&row.course_code, &row.sequence, i);
        out.push(CourseSection::from_row(id, row));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Day;

    const SAMPLE: &str = "hocphan_id,stt,ten_hoc_phan,si_so,da_dang_ky,giang_vien,thoi_khoa_bieu,tuan_hoc
1001,1,Lập trình Web,60,59,Nguyễn Văn A,T.Ba  1->2,\"23->27,31->40\"

1001,2,Lập trình Web,60,60,Nguyễn Văn A,T.Tư  6->9,\"26,27,31->43\"
short,row
2002,,Khóa luận,10,0,\"Trần, Thị B\",T.-  -,
";

    #[test]
    fn quoted_commas_stay_in_field() {
        let f = parse_csv_line("a, \"b,c\" ,d");
        assert_eq!(f, vec!["a", "b,c", "d"]);
        assert_eq!(parse_csv_line(""), vec![""]);
    }

    #[test]
    fn parses_sample_document() {
        let sections = parse_csv(SAMPLE);
        assert_eq!(sections.len(), 3);

        let first = &sections[0];
        assert_eq!(first.id, "1001-1-1");
        assert_eq!(first.title, "Lập trình Web");
        assert_eq!((first.capacity, first.enrolled), (60, 59));
        assert!(!first.is_full());
        assert_eq!(first.time_slot.map(|t| t.day), Some(Day::Tuesday));
        assert_eq!(first.raw_weeks, "23->27,31->40");
        assert_eq!(first.weeks.len(), 15);

        // blank line 2 still counts towards the index
        assert_eq!(sections[1].id, "1001-2-3");
        assert!(sections[1].is_full());

        let thesis = &sections[2];
        assert_eq!(thesis.id, "2002-5-5");
        assert_eq!(thesis.instructor, "Trần, Thị B");
        assert!(thesis.time_slot.is_none());
        assert!(thesis.weeks.is_empty());
    }

    #[test]
    fn bad_numbers_default_to_zero() {
        let row = row_from_fields(&parse_csv_line("X,1,T,abc,,I,S,W")).expect("row");
        assert_eq!((row.capacity, row.enrolled), (0, 0));
        assert!(row_from_fields(&parse_csv_line("X,1,T,1,1,I,S")).is_none());
    }

    #[test]
    fn header_only_is_empty() {
        assert!(parse_csv("a,b,c,d,e,f,g,h").is_empty());
        assert!(parse_csv("").is_empty());
    }
}
