use super::{
    helpers::{date_label, subject_class, time_range},
    models::calendar_model::{CalendarResponse, Subject},
};

pub const NO_DATA_TEXT: &str = "Нет данных";
pub const NO_CLASSES_TEXT: &str = "Занятий нет";

/* form string of information about one session */
fn format_subject_as_string(subject: &Subject) -> String {
    let mut lines = vec![format!(
        "  {} [{}] {}",
        time_range(&subject.time_from, &subject.time_to),
        subject_class(&subject.subject_type).as_str(),
        subject.subject_name
    )];
    let mut details = vec![subject.subject_type.clone()];
    if !subject.teacher_name.is_empty() {
        details.push(subject.teacher_name.clone());
    }
    if subject.subgroup != "0" {
        details.push(format!("подгруппа {}", subject.subgroup));
    }
    details.push(format!(
        "корпус {}, ауд. {}",
        subject.building, subject.auditory
    ));
    lines.push(format!("    {}", details.join(" · ")));
    lines.join("\n")
}

/// Text of the schedule view: a header, then every day with its sessions in the
/// order the API sent them. Without a response the explicit no-data text is shown.
pub fn render_schedule(title: &str, response: Option<&CalendarResponse>) -> String {
    let Some(CalendarResponse { calendar }) = response else {
        return format!("{}\n\n{}", title, NO_DATA_TEXT);
    };

    let university = calendar
        .short_university_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(&calendar.full_university_name);
    let mut blocks = vec![format!("{}\n{} · {}", title, university, calendar.group_name)];

    if calendar.days.is_empty() {
        blocks.push(NO_CLASSES_TEXT.to_owned());
    }
    for day in calendar.days.iter() {
        let body = if day.subjects.is_empty() {
            format!("  {}", NO_CLASSES_TEXT)
        } else {
            day.subjects
                .iter()
                .map(format_subject_as_string)
                .collect::<Vec<_>>()
                .join("\n")
        };
        blocks.push(format!("{}\n{}", date_label(&day.date), body));
    }
    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use crate::schedule_client::models::calendar_model::{Calendar, ScheduleDay};

    use super::*;

    fn lecture() -> Subject {
        Subject {
            time_from: "08:00:00".to_owned(),
            time_to: "09:30:00".to_owned(),
            subject_type: "Лекция".to_owned(),
            subject_name: "Математический анализ".to_owned(),
            teacher_name: String::new(),
            subgroup: "0".to_owned(),
            building: "1".to_owned(),
            auditory: "101".to_owned(),
        }
    }

    #[test]
    fn no_response_shows_no_data() {
        assert_eq!(render_schedule("Расписание", None), "Расписание\n\nНет данных");
    }

    #[test]
    fn days_are_labelled_and_kept_in_order() {
        let response = CalendarResponse {
            calendar: Calendar {
                full_university_name: "Test University".to_owned(),
                short_university_name: Some("TU".to_owned()),
                group_name: "G-1".to_owned(),
                days: vec![
                    ScheduleDay {
                        date: "2024-05-01".to_owned(),
                        subjects: vec![lecture()],
                    },
                    ScheduleDay {
                        date: "2024-05-02".to_owned(),
                        subjects: vec![],
                    },
                ],
            },
        };

        let text = render_schedule("Расписание", Some(&response));

        assert!(text.contains("TU · G-1"));
        assert!(text.contains("08:00–09:30 [lecture] Математический анализ"));
        assert!(!text.contains("подгруппа"));
        let first = text.find("Среда").unwrap();
        let second = text.find("Четверг").unwrap();
        assert!(first < second);
        assert!(text[second..].contains(NO_CLASSES_TEXT));
    }
}
