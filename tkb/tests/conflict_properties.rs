use tkb::algorithm::{any_selection_conflict, conflicts_for, overlaps, parse_schedule, parse_weeks};
use tkb::catalog::{parse_csv, Catalog};
use tkb::colors::{ColorAssignment, COURSE_COLORS};
use tkb::models::{CourseSection, Day, Interval, SectionRow, ToggleOutcome};
use tkb::storage::MemoryStorage;
use tkb::Planner;

fn section(id: &str, schedule: &str, weeks: &str) -> CourseSection {
    CourseSection::from_row(
        id.to_string(),
        SectionRow {
            course_code: id.to_string(),
            sequence: "1".to_string(),
            title: format!("Học phần {}", id),
            capacity: 60,
            enrolled: 1,
            instructor: "GV".to_string(),
            schedule: schedule.to_string(),
            weeks: weeks.to_string(),
        },
    )
}

#[test]
fn interval_overlap_is_symmetric() {
    let mut intervals = Vec::new();
    for day in [Day::Monday, Day::Tuesday] {
        for start in 1..=12u8 {
            for end in start..=12u8 {
                if let Some(iv) = Interval::new(day, start, end) {
                    intervals.push(iv);
                }
            }
        }
    }
    for a in intervals.iter() {
        for b in intervals.iter() {
            assert_eq!(a.overlaps(b), b.overlaps(a), "{:?} vs {:?}", a, b);
        }
    }
}

#[test]
fn unscheduled_sections_never_conflict() {
    let thesis = section("KL", "T.-  -", "1->52");
    let others = [
        section("A", "T.Hai 1->12", "1->52"),
        section("B", "T.Bảy 1->3", "1->52"),
        section("C", "garbage", "1->52"),
    ];
    for o in others.iter() {
        assert!(!overlaps(&thesis, o));
        assert!(!overlaps(o, &thesis));
    }
    assert!(conflicts_for(&thesis, &others).is_empty());
}

#[test]
fn documented_parser_examples() {
    let iv = parse_schedule("T.Ba 1->2").expect("interval");
    assert_eq!((iv.day.index(), iv.start_period, iv.end_period, iv.period_count()), (1, 1, 2, 2));
    assert!(parse_schedule("T.-  -").is_none());

    let w = parse_weeks("23->27,31->40");
    let expected: Vec<u32> = (23..=27).chain(31..=40).collect();
    assert_eq!(w.into_iter().collect::<Vec<_>>(), expected);

    let w = parse_weeks("26,27,31->43");
    let expected: Vec<u32> = [26, 27].into_iter().chain(31..=43).collect();
    assert_eq!(w.into_iter().collect::<Vec<_>>(), expected);
}

#[test]
fn alternating_weeks_do_not_conflict() {
    let a = section("A", "T.Sáu 7->9", "1->7");
    let b = section("B", "T.Sáu 7->9", "8->15");
    assert!(!overlaps(&a, &b));
    assert!(!any_selection_conflict(&vec![a, b]));
}

#[test]
fn end_to_end_selection_conflict() {
    let x = section("X", "T.Hai 1->3", "1->10");
    let y = section("Y", "T.Hai 2->4", "5->15");
    assert!(any_selection_conflict(&vec![x.clone(), y]));

    let y_late = section("Y", "T.Hai 2->4", "11->15");
    assert!(!any_selection_conflict(&vec![x, y_late]));
}

#[test]
fn end_to_end_through_planner_and_csv() {
    let csv = "hocphan_id,stt,ten_hoc_phan,si_so,da_dang_ky,giang_vien,thoi_khoa_bieu,tuan_hoc
X,1,Cấu trúc dữ liệu,50,10,GV X,T.Hai  1->3,1->10
Y,1,Trí tuệ nhân tạo,50,10,GV Y,T.Hai  2->4,5->15
Z,1,Kiểm thử,50,50,GV Z,T.Ba  1->2,1->15
";
    let catalog = Catalog::new(parse_csv(csv), "inline");
    let mut planner = Planner::open(catalog, Box::new(MemoryStorage::new()));

    assert_eq!(planner.toggle("X-1-1").unwrap(), ToggleOutcome::Added { conflict_with: None });
    assert_eq!(
        planner.toggle("Y-1-2").unwrap(),
        ToggleOutcome::Added { conflict_with: Some("Cấu trúc dữ liệu".to_string()) }
    );
    assert!(planner.has_any_conflict());

    let before = planner.selected_ids().len();
    assert_eq!(planner.toggle("Z-1-3").unwrap(), ToggleOutcome::RejectedFull);
    assert_eq!(planner.selected_ids().len(), before);

    assert_eq!(planner.toggle("Y-1-2").unwrap(), ToggleOutcome::Removed);
    assert!(!planner.has_any_conflict());
}

#[test]
fn colors_recycle_after_palette() {
    let mut colors = ColorAssignment::new();
    let first = colors.color_for("1001");
    assert_eq!(colors.color_for("1001"), first);
    for i in 1..COURSE_COLORS.len() {
        colors.color_for(&format!("code-{}", i));
    }
    assert_eq!(colors.color_for("one-past-the-palette"), COURSE_COLORS[0]);
}
