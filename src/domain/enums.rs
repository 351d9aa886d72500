/// Which subset of todos is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterMode {
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Next filter in the all → active → completed cycle
    pub fn cycle(&self) -> Self {
        match self {
            Self::All => Self::Active,
            Self::Active => Self::Completed,
            Self::Completed => Self::All,
        }
    }

    /// Whether a todo with the given completion flag passes this filter
    pub fn admits(&self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => !completed,
            Self::Completed => completed,
        }
    }
}

/// Display ordering of the visible todos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortMode {
    /// Insertion order
    #[default]
    None,
    /// Earliest due date first, undated last
    DueDate,
}

impl SortMode {
    pub fn toggle(&self) -> Self {
        match self {
            Self::None => Self::DueDate,
            Self::DueDate => Self::None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "added",
            Self::DueDate => "due date",
        }
    }
}

/// UI mode for the interactive application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTodo,
    Changelog,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_to_tag() {
        assert_eq!(FilterMode::All.to_tag(), "all");
        assert_eq!(FilterMode::Active.to_tag(), "active");
        assert_eq!(FilterMode::Completed.to_tag(), "completed");
    }

    #[test]
    fn test_filter_cycle_returns_to_start() {
        let start = FilterMode::All;
        assert_eq!(start.cycle(), FilterMode::Active);
        assert_eq!(start.cycle().cycle(), FilterMode::Completed);
        assert_eq!(start.cycle().cycle().cycle(), start);
    }

    #[test]
    fn test_filter_admits() {
        assert!(FilterMode::All.admits(true));
        assert!(FilterMode::All.admits(false));
        assert!(FilterMode::Active.admits(false));
        assert!(!FilterMode::Active.admits(true));
        assert!(FilterMode::Completed.admits(true));
        assert!(!FilterMode::Completed.admits(false));
    }

    #[test]
    fn test_sort_toggle() {
        assert_eq!(SortMode::None.toggle(), SortMode::DueDate);
        assert_eq!(SortMode::DueDate.toggle(), SortMode::None);
        assert_eq!(SortMode::default(), SortMode::None);
    }
}
