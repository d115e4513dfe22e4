use super::task::Task;
use clap::ValueEnum;

/// Which tasks the list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FilterMode {
    #[default]
    All,
    Completed,
    Pending,
}

impl FilterMode {
    /// Whether a task belongs in this view
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.completed,
            Self::Pending => !task.completed,
        }
    }

    /// Tab label
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Completed => "Completed",
            Self::Pending => "Pending",
        }
    }

    /// Next mode in tab order, wrapping around
    pub fn next(&self) -> Self {
        match self {
            Self::All => Self::Completed,
            Self::Completed => Self::Pending,
            Self::Pending => Self::All,
        }
    }

    pub fn all() -> &'static [FilterMode] {
        &[FilterMode::All, FilterMode::Completed, FilterMode::Pending]
    }
}

/// Light or dark palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }
}

/// UI mode for the application, derived from the overlay state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Form,
    Picker,
    Help,
    Notice,
}

/// Which field of the task form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Deadline,
    Completed,
}

impl FormField {
    /// Next field in tab order. The completed flag is only editable on existing tasks.
    pub fn next(&self, editing: bool) -> Self {
        match self {
            Self::Title => Self::Deadline,
            Self::Deadline if editing => Self::Completed,
            Self::Deadline | Self::Completed => Self::Title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_mode_cycle() {
        assert_eq!(FilterMode::All.next(), FilterMode::Completed);
        assert_eq!(FilterMode::Completed.next(), FilterMode::Pending);
        assert_eq!(FilterMode::Pending.next(), FilterMode::All);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::from_dark_mode(false), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_form_field_order() {
        assert_eq!(FormField::Title.next(false), FormField::Deadline);
        assert_eq!(FormField::Deadline.next(false), FormField::Title);
        assert_eq!(FormField::Deadline.next(true), FormField::Completed);
        assert_eq!(FormField::Completed.next(true), FormField::Title);
    }
}
