//! Sortable table view model.
//!
//! The model owns the original row set and re-derives a freshly sorted
//! sequence from it on every sort request. Consumers observe wholesale
//! replacements of the current sequence; there are no incremental updates.

use std::cmp::Ordering;

/// Per-column comparator over two rows.
pub type Comparator<R> = fn(&R, &R) -> Ordering;

/// Requested direction for a column sort.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// A sortable column declaration.
#[derive(Debug, Clone)]
pub struct Column<R> {
    /// Stable column identifier.
    pub id: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Comparator applied when sorting by this column.
    pub compare: Comparator<R>,
}

/// Observer of current-row replacements.
#[cfg_attr(test, mockall::automock)]
pub trait RowListener<R> {
    /// Called with the full new row sequence after every replacement.
    fn rows_replaced(&self, rows: &[R]);
}

/// Holds the current rows of a table and sorts them by declared columns.
pub struct TableViewModel<R: Clone> {
    columns: Vec<Column<R>>,
    source_rows: Vec<R>,
    current_rows: Vec<R>,
    listeners: Vec<Box<dyn RowListener<R>>>,
}

impl<R: Clone> TableViewModel<R> {
    /// Create a view model over the given columns and initial rows.
    pub fn new(columns: Vec<Column<R>>, rows: Vec<R>) -> Self {
        Self {
            columns,
            source_rows: rows.clone(),
            current_rows: rows,
            listeners: Vec::new(),
        }
    }

    /// Declared columns, in display order.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// The current (possibly sorted) row sequence.
    pub fn rows(&self) -> &[R] {
        &self.current_rows
    }

    /// Register an observer for row-sequence replacements.
    pub fn subscribe(&mut self, listener: Box<dyn RowListener<R>>) {
        self.listeners.push(listener);
    }

    /// Replace the row set wholesale, e.g. after a metrics reload.
    ///
    /// Any previous sort is discarded; the new rows become both the source
    /// and the current sequence.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.source_rows = rows.clone();
        self.current_rows = rows;
        self.notify();
    }

    /// Sort by the column at `column_index` in the given order.
    ///
    /// Sorting always starts from the original unsorted row set, so
    /// successive sorts by different columns do not compound. Returns `false`
    /// without touching the rows when the index is out of range.
    pub fn sort_by(&mut self, column_index: usize, order: SortOrder) -> bool {
        let Some(column) = self.columns.get(column_index) else {
            return false;
        };

        let compare = column.compare;
        let mut rows = self.source_rows.clone();
        rows.sort_by(|a, b| match order {
            SortOrder::Ascending => compare(a, b),
            SortOrder::Descending => compare(a, b).reverse(),
        });

        self.current_rows = rows;
        self.notify();
        true
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener.rows_replaced(&self.current_rows);
        }
    }
}

/// Case-insensitive lexicographic comparison with a byte-order tiebreak.
///
/// Stand-in for the host UI's locale-aware string comparison; every default
/// column uses it, including percentage-bearing formatted text.
pub fn text_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.chars().map(|c| c.to_ascii_lowercase()));
    folded.then_with(|| a.cmp(b))
}

/// Digit-run aware comparison: runs of ASCII digits compare numerically,
/// everything else compares case-insensitively.
///
/// Opt-in alternative for columns whose formatted cells embed numbers, so
/// `"repo2"` sorts before `"repo10"`. Not wired into any default column.
pub fn natural_compare(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(lc), Some(rc)) if lc.is_ascii_digit() && rc.is_ascii_digit() => {
                let left_run = take_digit_run(&mut left);
                let right_run = take_digit_run(&mut right);
                let ordering = compare_digit_runs(&left_run, &right_run);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(lc), Some(rc)) => {
                let ordering = lc.to_ascii_lowercase().cmp(&rc.to_ascii_lowercase());
                if ordering != Ordering::Equal {
                    return ordering;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digit_run(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::{
        Column, MockRowListener, RowListener, SortOrder, TableViewModel, natural_compare,
        text_compare,
    };
    use std::cell::RefCell;
    use std::cmp::Ordering;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: String,
        languages: String,
    }

    fn row(name: &str, languages: &str) -> Row {
        Row {
            name: name.to_string(),
            languages: languages.to_string(),
        }
    }

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column {
                id: "name",
                label: "Repository Name",
                compare: |a, b| text_compare(&a.name, &b.name),
            },
            Column {
                id: "languages",
                label: "Languages",
                compare: |a, b| text_compare(&a.languages, &b.languages),
            },
        ]
    }

    fn sample_rows() -> Vec<Row> {
        vec![
            row("gamma", "Rust, TOML"),
            row("alpha", "TypeScript, HTML"),
            row("beta", "C#, TS"),
        ]
    }

    struct RecordingListener {
        seen: Rc<RefCell<Vec<Vec<Row>>>>,
    }

    impl RowListener<Row> for RecordingListener {
        fn rows_replaced(&self, rows: &[Row]) {
            self.seen.borrow_mut().push(rows.to_vec());
        }
    }

    #[test]
    fn sort_ascending_orders_by_name() {
        let mut table = TableViewModel::new(columns(), sample_rows());
        assert!(table.sort_by(0, SortOrder::Ascending));

        let names: Vec<&str> = table.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn opposite_orders_are_exact_reverses() {
        let mut table = TableViewModel::new(columns(), sample_rows());
        table.sort_by(1, SortOrder::Ascending);
        let ascending = table.rows().to_vec();

        table.sort_by(1, SortOrder::Descending);
        let mut descending = table.rows().to_vec();
        descending.reverse();

        assert_eq!(ascending, descending);
    }

    #[test]
    fn sort_rederives_from_original_rows() {
        let mut table = TableViewModel::new(columns(), sample_rows());
        table.sort_by(1, SortOrder::Descending);
        table.sort_by(0, SortOrder::Ascending);

        // A later sort must not observe the ordering of an earlier one.
        let names: Vec<&str> = table.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn sort_with_out_of_range_column_is_a_no_op() {
        let mut table = TableViewModel::new(columns(), sample_rows());
        let before = table.rows().to_vec();

        assert!(!table.sort_by(7, SortOrder::Ascending));
        assert_eq!(table.rows(), &before[..]);
    }

    #[test]
    fn listeners_observe_each_replacement() {
        let mut listener = MockRowListener::<Row>::new();
        listener.expect_rows_replaced().times(2).return_const(());

        let mut table = TableViewModel::new(columns(), sample_rows());
        table.subscribe(Box::new(listener));
        table.sort_by(0, SortOrder::Ascending);
        table.sort_by(0, SortOrder::Descending);
    }

    #[test]
    fn set_rows_replaces_wholesale_and_notifies() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut table = TableViewModel::new(columns(), sample_rows());
        table.subscribe(Box::new(RecordingListener { seen: seen.clone() }));

        let replacement = vec![row("delta", "Go")];
        table.set_rows(replacement.clone());

        assert_eq!(table.rows(), &replacement[..]);
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0], replacement);

        // The replacement also resets the sort source.
        table.sort_by(0, SortOrder::Ascending);
        assert_eq!(table.rows(), &replacement[..]);
    }

    #[test]
    fn text_compare_is_case_insensitive_with_stable_tiebreak() {
        assert_eq!(text_compare("alpha", "ALPHA"), Ordering::Greater);
        assert_eq!(text_compare("Beta", "alpha"), Ordering::Greater);
        assert_eq!(text_compare("C#, TS", "c#, ts"), Ordering::Less);
        assert_eq!(text_compare("same", "same"), Ordering::Equal);
    }

    #[test]
    fn text_compare_orders_formatted_percentages_lexicographically() {
        // The preserved limitation: "9%" sorts after "55%" as text.
        assert_eq!(text_compare("Rust 9%", "Rust 55%"), Ordering::Greater);
    }

    #[test]
    fn natural_compare_orders_digit_runs_numerically() {
        assert_eq!(natural_compare("repo2", "repo10"), Ordering::Less);
        assert_eq!(natural_compare("Rust 9%", "Rust 55%"), Ordering::Less);
        assert_eq!(natural_compare("repo007", "repo7"), Ordering::Equal);
        assert_eq!(natural_compare("alpha", "Alpha"), Ordering::Equal);
        assert_eq!(natural_compare("repo1", "repo1x"), Ordering::Less);
    }
}
