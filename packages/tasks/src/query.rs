// ABOUTME: Task query types: filter criteria, search text, sort, and statistics
// ABOUTME: Pure functions over task slices so views and repositories share one definition

use chrono::{Local, NaiveDate};
use std::cmp::Ordering;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};
use taskboard_core::{Task, TaskCategory, TaskPriority, TaskStatus};

/// Active filters; `None`/`false` means "don't filter on this"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub category: Option<TaskCategory>,
    pub overdue: bool,
}

impl FilterCriteria {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn priority(priority: TaskPriority) -> Self {
        Self {
            priority: Some(priority),
            ..Self::default()
        }
    }

    pub fn category(category: TaskCategory) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn overdue() -> Self {
        Self {
            overdue: true,
            ..Self::default()
        }
    }

    /// Overlay the criteria set in `other` onto `self`
    pub fn merge(&mut self, other: FilterCriteria) {
        if other.status.is_some() {
            self.status = other.status;
        }
        if other.priority.is_some() {
            self.priority = other.priority;
        }
        if other.category.is_some() {
            self.category = other.category;
        }
        if other.overdue {
            self.overdue = true;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        self.status.map_or(true, |s| task.status == s)
            && self.priority.map_or(true, |p| task.priority == p)
            && self.category.map_or(true, |c| task.category == c)
            && (!self.overdue || task.is_overdue(today))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
    DueDate,
    Priority,
    Title,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSort {
    pub field: SortField,
    pub order: SortOrder,
}

impl TaskSort {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Order two tasks; tasks without a due date go last when sorting by due date
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let ordering = match self.field {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::Priority => a.priority.rank().cmp(&b.priority.rank()),
            SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortField::DueDate => match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => return Ordering::Less,
                (None, Some(_)) => return Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        };

        let ordering = match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        };
        ordering.then_with(|| b.created_at.cmp(&a.created_at))
    }
}

/// Parses the `"<field>-<order>"` form used by the sort selector, e.g. `dueDate-asc`
impl FromStr for TaskSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, order) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid sort value: {}", s))?;
        let field = SortField::from_str(field).map_err(|_| format!("Unknown sort field: {}", field))?;
        let order = SortOrder::from_str(order).map_err(|_| format!("Unknown sort order: {}", order))?;
        Ok(Self { field, order })
    }
}

impl std::fmt::Display for TaskSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.field, self.order)
    }
}

/// Everything needed to produce the visible task list
#[derive(Debug, Clone, PartialEq)]
pub struct TaskQuery {
    pub filter: FilterCriteria,
    pub search: Option<String>,
    pub sort: TaskSort,
    /// Reference date for overdue checks
    pub today: NaiveDate,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            filter: FilterCriteria::default(),
            search: None,
            sort: TaskSort::default(),
            today: Local::now().date_naive(),
        }
    }
}

impl TaskQuery {
    fn matches_search(&self, task: &Task) -> bool {
        let Some(needle) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return true;
        };
        let needle = needle.to_lowercase();
        task.title.to_lowercase().contains(&needle)
            || task
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }

    /// Filter, search and sort `tasks`
    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        let mut visible: Vec<Task> = tasks
            .into_iter()
            .filter(|t| self.filter.matches(t, self.today) && self.matches_search(t))
            .collect();
        visible.sort_by(|a, b| self.sort.compare(a, b));
        visible
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task], today: NaiveDate) -> Self {
        tasks.iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            match task.status {
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
            }
            if task.is_overdue(today) {
                stats.overdue += 1;
            }
            stats
        })
    }

    /// Whole-number percentage of completed tasks
    pub fn completion_rate(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed * 100) / self.total) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn task(id: &str, title: &str, priority: TaskPriority, due_offset: Option<i64>) -> Task {
        let created = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
            + Duration::minutes(id.len() as i64);
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            status: TaskStatus::Pending,
            priority,
            category: TaskCategory::Work,
            due_date: due_offset.map(|d| today() + Duration::days(d)),
            owner_id: "u1".to_string(),
            assignee_id: None,
            created_at: created,
            updated_at: created,
            completed_at: None,
        }
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[rstest]
    #[case("dueDate-asc", SortField::DueDate, SortOrder::Asc)]
    #[case("priority-desc", SortField::Priority, SortOrder::Desc)]
    #[case("createdAt-desc", SortField::CreatedAt, SortOrder::Desc)]
    #[case("title-asc", SortField::Title, SortOrder::Asc)]
    fn test_parse_sort(#[case] raw: &str, #[case] field: SortField, #[case] order: SortOrder) {
        let sort: TaskSort = raw.parse().unwrap();
        assert_eq!(sort, TaskSort::new(field, order));
        assert_eq!(sort.to_string(), raw);
    }

    #[rstest]
    #[case("dueDate")]
    #[case("color-asc")]
    #[case("title-sideways")]
    fn test_parse_sort_rejects(#[case] raw: &str) {
        assert!(raw.parse::<TaskSort>().is_err());
    }

    #[test]
    fn test_merge_overlays_only_set_fields() {
        let mut criteria = FilterCriteria::status(TaskStatus::Pending);
        criteria.merge(FilterCriteria::category(TaskCategory::Health));
        assert_eq!(criteria.status, Some(TaskStatus::Pending));
        assert_eq!(criteria.category, Some(TaskCategory::Health));
        assert!(!criteria.overdue);
        assert!(!criteria.is_empty());
        assert!(FilterCriteria::default().is_empty());
    }

    #[test]
    fn test_sort_by_due_date_puts_undated_last() {
        let tasks = vec![
            task("a", "A", TaskPriority::Low, None),
            task("bb", "B", TaskPriority::Low, Some(3)),
            task("ccc", "C", TaskPriority::Low, Some(1)),
        ];

        let asc = TaskQuery {
            sort: TaskSort::new(SortField::DueDate, SortOrder::Asc),
            today: today(),
            ..TaskQuery::default()
        };
        assert_eq!(ids(&asc.apply(tasks.clone())), vec!["ccc", "bb", "a"]);

        let desc = TaskQuery {
            sort: TaskSort::new(SortField::DueDate, SortOrder::Desc),
            today: today(),
            ..TaskQuery::default()
        };
        assert_eq!(ids(&desc.apply(tasks)), vec!["bb", "ccc", "a"]);
    }

    #[test]
    fn test_sort_by_priority_desc() {
        let tasks = vec![
            task("a", "A", TaskPriority::Medium, None),
            task("bb", "B", TaskPriority::Urgent, None),
            task("ccc", "C", TaskPriority::Low, None),
        ];
        let query = TaskQuery {
            sort: TaskSort::new(SortField::Priority, SortOrder::Desc),
            today: today(),
            ..TaskQuery::default()
        };
        assert_eq!(ids(&query.apply(tasks)), vec!["bb", "a", "ccc"]);
    }

    #[test]
    fn test_search_matches_title_and_description_case_insensitively() {
        let mut with_desc = task("a", "Groceries", TaskPriority::Low, None);
        with_desc.description = Some("Buy MILK and eggs".to_string());
        let tasks = vec![with_desc, task("bb", "Milk the cow", TaskPriority::Low, None), task("ccc", "Other", TaskPriority::Low, None)];

        let query = TaskQuery {
            search: Some("  milk ".to_string()),
            sort: TaskSort::new(SortField::Title, SortOrder::Asc),
            today: today(),
            ..TaskQuery::default()
        };
        assert_eq!(ids(&query.apply(tasks)), vec!["a", "bb"]);
    }

    #[test]
    fn test_overdue_filter() {
        let mut done = task("a", "Done late", TaskPriority::Low, Some(-2));
        done.status = TaskStatus::Completed;
        let tasks = vec![
            done,
            task("bb", "Late", TaskPriority::Low, Some(-1)),
            task("ccc", "Future", TaskPriority::Low, Some(1)),
        ];
        let query = TaskQuery {
            filter: FilterCriteria::overdue(),
            today: today(),
            ..TaskQuery::default()
        };
        assert_eq!(ids(&query.apply(tasks)), vec!["bb"]);
    }

    #[test]
    fn test_stats() {
        let mut done = task("a", "A", TaskPriority::Low, None);
        done.status = TaskStatus::Completed;
        let mut doing = task("bb", "B", TaskPriority::Low, Some(-1));
        doing.status = TaskStatus::InProgress;
        let tasks = vec![done, doing, task("ccc", "C", TaskPriority::Low, None), task("dddd", "D", TaskPriority::Low, None)];

        let stats = TaskStats::from_tasks(&tasks, today());
        assert_eq!(
            stats,
            TaskStats {
                total: 4,
                pending: 2,
                in_progress: 1,
                completed: 1,
                overdue: 1,
            }
        );
        assert_eq!(stats.completion_rate(), 25);
        assert_eq!(TaskStats::default().completion_rate(), 0);
    }
}
