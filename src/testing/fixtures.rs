//! Dataset fixtures.

use chrono::NaiveDate;

use crate::dates::week_start;
use crate::model::{slug_stem, Dataset, FocusArea, Task, TaskStatus, TimeOff, WeeklyFocus};

/// The date fixtures treat as "today": Monday 2026-10-19.
///
/// # Panics
///
/// Never in practice; the date is a constant.
#[must_use]
pub fn fixture_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid fixture date")
}

/// Builder for datasets in a known shape.
///
/// Areas are appended in call order. `task`, `due`, `since` and `notes`
/// apply to the most recently added area or task. Slugs are
/// `<stem>-<counter>` with a counter shared by the whole builder, so they are
/// unique and stable across runs. Tasks default to `status_since` of
/// [`fixture_today`].
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    data: Dataset,
    next_id: usize,
}

impl DatasetBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slug(&mut self, name: &str) -> String {
        self.next_id += 1;
        format!("{}-{:07}", slug_stem(name), self.next_id)
    }

    fn last_area(&mut self) -> &mut FocusArea {
        let count = self.data.focus_areas.len();
        self.data
            .focus_areas
            .get_mut(count)
            .expect("add an area before adding tasks")
    }

    fn last_task(&mut self) -> &mut Task {
        self.last_area()
            .tasks
            .last_mut()
            .expect("add a task before setting task fields")
    }

    /// Append a focus area with no tasks.
    #[must_use]
    pub fn area(mut self, name: &str) -> Self {
        let slug = self.slug(name);
        self.data.focus_areas.push(FocusArea {
            slug,
            name: name.to_string(),
            tasks: Vec::new(),
        });
        self
    }

    /// Append several empty focus areas.
    #[must_use]
    pub fn areas<I>(self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        names
            .into_iter()
            .fold(self, |builder, name| builder.area(name.as_ref()))
    }

    /// Append a task to the last area.
    ///
    /// # Panics
    ///
    /// Panics if no area has been added yet.
    #[must_use]
    pub fn task(mut self, name: &str, status: TaskStatus) -> Self {
        let slug = self.slug(name);
        self.last_area().tasks.push(Task {
            slug,
            name: name.to_string(),
            status,
            status_since: fixture_today(),
            due: None,
            notes: None,
        });
        self
    }

    /// Set the due date of the last task.
    ///
    /// # Panics
    ///
    /// Panics if the last area has no tasks.
    #[must_use]
    pub fn due(mut self, due: NaiveDate) -> Self {
        self.last_task().due = Some(due);
        self
    }

    /// Set when the last task entered its status.
    ///
    /// # Panics
    ///
    /// Panics if the last area has no tasks.
    #[must_use]
    pub fn since(mut self, since: NaiveDate) -> Self {
        self.last_task().status_since = since;
        self
    }

    /// Attach notes to the last task.
    ///
    /// # Panics
    ///
    /// Panics if the last area has no tasks.
    #[must_use]
    pub fn notes(mut self, notes: &str) -> Self {
        self.last_task().notes = Some(notes.to_string());
        self
    }

    /// Name `area` as the weekly focus for the week of [`fixture_today`].
    ///
    /// The name is stored as given; it does not have to match an area.
    #[must_use]
    pub fn weekly_focus(self, area: &str) -> Self {
        self.weekly_focus_on(area, week_start(fixture_today()))
    }

    /// Name `area` as the weekly focus for the week starting `week_of`.
    #[must_use]
    pub fn weekly_focus_on(mut self, area: &str, week_of: NaiveDate) -> Self {
        self.data.weekly_focus = Some(WeeklyFocus {
            area: area.to_string(),
            week_of,
        });
        self
    }

    /// Add a time-off entry.
    #[must_use]
    pub fn time_off(mut self, start: NaiveDate, end: NaiveDate, description: &str) -> Self {
        self.data.time_off.push(TimeOff {
            start,
            end,
            description: description.to_string(),
        });
        self
    }

    #[must_use]
    pub fn build(self) -> Dataset {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_are_deterministic_and_unique() {
        let data = DatasetBuilder::new()
            .area("Work")
            .task("Work", TaskStatus::Pending)
            .build();
        let area = data.focus_areas.get(1).unwrap();
        assert_eq!(area.slug, "work-0000001");
        assert_eq!(area.tasks[0].slug, "work-0000002");
    }

    #[test]
    fn test_task_fields_apply_to_last_task() {
        let due = fixture_today().succ_opt().unwrap();
        let data = DatasetBuilder::new()
            .area("A")
            .task("first", TaskStatus::Pending)
            .task("second", TaskStatus::Blocked)
            .due(due)
            .notes("waiting")
            .build();
        let tasks = &data.focus_areas.get(1).unwrap().tasks;
        assert_eq!(tasks[0].due, None);
        assert_eq!(tasks[1].due, Some(due));
        assert_eq!(tasks[1].notes.as_deref(), Some("waiting"));
        assert_eq!(tasks[1].status_since, fixture_today());
    }

    #[test]
    fn test_fixture_today_is_a_monday() {
        assert_eq!(week_start(fixture_today()), fixture_today());
    }

    #[test]
    #[should_panic(expected = "add an area")]
    fn test_task_without_area_panics() {
        let _ = DatasetBuilder::new().task("orphan", TaskStatus::Pending);
    }
}
