use super::*;

fn make_form(university: &str, group: &str, from: &str, to: &str) -> FormState {
    FormState {
        full_university_name: university.to_owned(),
        group_name: group.to_owned(),
        date_from: from.to_owned(),
        date_to: to.to_owned(),
    }
}

#[test]
fn format_date_for_backend_start_and_end() {
    assert_eq!(
        format_date_for_backend("2024-05-01", false),
        "2024-05-01 00:00:00"
    );
    assert_eq!(
        format_date_for_backend("2024-05-01", true),
        "2024-05-01 23:59:59"
    );
}

#[test]
fn time_range_cuts_seconds() {
    let range = time_range("08:00:00", "09:30:00");
    assert_eq!(range, "08:00–09:30");
    assert!(range.find("08:00").unwrap() < range.find("09:30").unwrap());
}

#[test]
fn time_range_short_input_does_not_panic() {
    assert_eq!(time_range("8", ""), "8–");
}

#[test]
fn subject_class_lecture_first() {
    assert_eq!(subject_class("Лекция"), SubjectClass::Lecture);
    assert_eq!(subject_class("ЛЕКЦИЯ + лабораторная"), SubjectClass::Lecture);
    assert_eq!(subject_class("онлайн лекционное занятие"), SubjectClass::Lecture);
}

#[test]
fn subject_class_lab() {
    assert_eq!(subject_class("Лабораторная работа"), SubjectClass::Lab);
    assert_eq!(subject_class("лаб."), SubjectClass::Lab);
}

#[test]
fn subject_class_falls_back_to_practice() {
    assert_eq!(subject_class("Практика"), SubjectClass::Practice);
    assert_eq!(subject_class("Семинар"), SubjectClass::Practice);
    assert_eq!(subject_class("Lecture"), SubjectClass::Practice);
    assert_eq!(subject_class(""), SubjectClass::Practice);
}

#[test]
fn date_label_weekday_and_capital() {
    let label = date_label("2024-05-01");
    assert!(label.starts_with("Среда"), "{}", label);
    assert!(label.contains(" 1 "), "{}", label);
}

#[test]
fn date_label_keeps_calendar_day_around_new_year() {
    assert!(date_label("2024-12-31").starts_with("Вторник"));
    assert!(date_label("2025-01-01").starts_with("Среда"));
    assert!(date_label("2024-03-31").starts_with("Воскресенье"));
}

#[test]
fn date_label_passes_through_garbage() {
    assert_eq!(date_label("завтра"), "завтра");
}

#[test]
fn form_valid_accepts_complete_form() {
    assert!(form_valid(&make_form(
        "Test University",
        "G-1",
        "2024-05-01",
        "2024-05-07"
    )));
    assert!(form_valid(&make_form("СП", " 1 ", "2024-05-01", "2024-05-01")));
}

#[test]
fn form_valid_rejects_short_university() {
    assert!(!form_valid(&make_form("", "G-1", "2024-05-01", "2024-05-07")));
    assert!(!form_valid(&make_form("  Я  ", "G-1", "2024-05-01", "2024-05-07")));
}

#[test]
fn form_valid_rejects_blank_group() {
    assert!(!form_valid(&make_form("Test University", "   ", "2024-05-01", "2024-05-07")));
}

#[test]
fn form_valid_rejects_missing_dates() {
    assert!(!form_valid(&make_form("Test University", "G-1", "", "2024-05-07")));
    assert!(!form_valid(&make_form("Test University", "G-1", "2024-05-01", "")));
}

#[test]
fn build_calendar_request_trims_and_widens_range() {
    let request = build_calendar_request(&make_form(
        "  Test University ",
        " G-1\t",
        "2024-05-01",
        "2024-05-07",
    ));
    assert_eq!(
        request,
        CalendarRequest {
            full_university_name: "Test University".to_owned(),
            group_name: "G-1".to_owned(),
            dt_from: "2024-05-01 00:00:00".to_owned(),
            dt_to: "2024-05-07 23:59:59".to_owned(),
        }
    );
}

#[test]
fn is_iso_date_accepts_only_real_calendar_days() {
    assert!(is_iso_date("2024-02-29"));
    assert!(!is_iso_date("2023-02-29"));
    assert!(!is_iso_date("01.05.2024"));
    assert!(!is_iso_date(""));
}
