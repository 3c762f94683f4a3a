//! Client-side file search over the loaded forest.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use drivehub_entity::file::{FileCategory, FileRecord};

use crate::tree::DriveTreeStore;

/// Filter applied to every file of the forest. Empty fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileQuery {
    /// Case-insensitive substring of name, type, or last updater.
    pub text: String,
    /// Restrict to the extensions of a category.
    pub category: Option<FileCategory>,
    /// Exact last updater id.
    pub owner: Option<String>,
    /// First calendar day (UTC) of the update window.
    pub updated_from: Option<NaiveDate>,
    /// Last calendar day (UTC) of the update window, inclusive.
    pub updated_to: Option<NaiveDate>,
}

impl FileQuery {
    /// Query matching `text` only.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Whether `file` satisfies every set criterion.
    pub fn matches(&self, file: &FileRecord) -> bool {
        self.matches_text(file)
            && self.matches_category(file)
            && self.matches_owner(file)
            && self.matches_dates(file)
    }

    fn matches_text(&self, file: &FileRecord) -> bool {
        let needle = self.text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        file.name.to_lowercase().contains(&needle)
            || file.file_type.contains(&needle)
            || file
                .last_updater
                .as_ref()
                .is_some_and(|u| u.as_str().to_lowercase().contains(&needle))
    }

    fn matches_category(&self, file: &FileRecord) -> bool {
        self.category
            .is_none_or(|c| c.extensions().contains(&file.file_type.as_str()))
    }

    fn matches_owner(&self, file: &FileRecord) -> bool {
        match self.owner.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(owner) => file
                .last_updater
                .as_ref()
                .is_some_and(|u| u.as_str() == owner),
        }
    }

    fn matches_dates(&self, file: &FileRecord) -> bool {
        if self.updated_from.is_none() && self.updated_to.is_none() {
            return true;
        }
        let Some(updated) = file.updated_at else {
            return false;
        };
        let after_start = self
            .updated_from
            .is_none_or(|from| updated >= start_of_day(from));
        let before_end = self
            .updated_to
            .is_none_or(|to| updated <= end_of_day(to));
        after_start && before_end
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let end = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(end).and_utc()
}

/// Files of the forest matching `query`, in forest order.
pub fn search_files<'a>(store: &'a DriveTreeStore, query: &FileQuery) -> Vec<&'a FileRecord> {
    store
        .files()
        .into_iter()
        .filter(|file| query.matches(file))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use drivehub_core::types::UserId;
    use drivehub_entity::folder::FolderNode;

    fn file(native: &str, name: &str, updater: &str, day: u32) -> FileRecord {
        let mut file = FileRecord::new(format!("d/file-{native}"), native, name);
        file.last_updater = Some(UserId::from(updater));
        file.updated_at = Utc.with_ymd_and_hms(2024, 5, day, 18, 30, 0).single();
        file
    }

    fn store() -> DriveTreeStore {
        DriveTreeStore::with_forest(vec![FolderNode::drive("d", "D").with_files(vec![
            file("1", "Quarterly Report.pdf", "kim", 1),
            file("2", "report-notes.docx", "lee", 10),
            file("3", "budget.XLSX", "kim", 20),
            FileRecord::new("d/file-4", "4", "undated.txt"),
        ])])
    }

    fn names(files: Vec<&FileRecord>) -> Vec<&str> {
        files.into_iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_text_matches_name_type_and_updater() {
        let store = store();
        assert_eq!(
            names(search_files(&store, &FileQuery::text("REPORT"))),
            vec!["Quarterly Report.pdf", "report-notes.docx"]
        );
        assert_eq!(
            names(search_files(&store, &FileQuery::text("xlsx"))),
            vec!["budget.XLSX"]
        );
        assert_eq!(search_files(&store, &FileQuery::text("lee")).len(), 1);
        assert_eq!(search_files(&store, &FileQuery::text("  ")).len(), 4);
    }

    #[test]
    fn test_category_and_owner() {
        let store = store();
        let query = FileQuery {
            category: Some(FileCategory::Excel),
            owner: Some("kim".into()),
            ..FileQuery::default()
        };
        assert_eq!(names(search_files(&store, &query)), vec!["budget.XLSX"]);

        let query = FileQuery {
            owner: Some("ki".into()),
            ..FileQuery::default()
        };
        assert!(search_files(&store, &query).is_empty());
    }

    #[test]
    fn test_date_range_is_inclusive_and_skips_undated() {
        let store = store();
        let query = FileQuery {
            updated_from: NaiveDate::from_ymd_opt(2024, 5, 10),
            updated_to: NaiveDate::from_ymd_opt(2024, 5, 20),
            ..FileQuery::default()
        };
        assert_eq!(
            names(search_files(&store, &query)),
            vec!["report-notes.docx", "budget.XLSX"]
        );

        let query = FileQuery {
            updated_to: NaiveDate::from_ymd_opt(2024, 5, 1),
            ..FileQuery::default()
        };
        assert_eq!(names(search_files(&store, &query)), vec!["Quarterly Report.pdf"]);
    }
}
