use serde::{Deserialize, Serialize};

/// Which projection is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    #[default]
    List,
    Calendar,
}

impl Projection {
    /// Parse from a config or CLI value like "calendar"
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "list" => Some(Self::List),
            "calendar" => Some(Self::Calendar),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Calendar => "calendar",
        }
    }

    /// Tab label shown in the header
    pub fn label(&self) -> &'static str {
        match self {
            Self::List => "목록",
            Self::Calendar => "달력",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Self::List => Self::Calendar,
            Self::Calendar => Self::List,
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingTask,
    ConfirmDelete,
}

/// Field of the add/edit form that receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Text,
    Date,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            Self::Text => Self::Date,
            Self::Date => Self::Text,
        }
    }
}
