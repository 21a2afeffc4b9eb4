/// Top-level menu entries, numbered the way they are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Delete,
    Update,
    Search,
    List,
    Exit,
}

impl MenuChoice {
    /// Map a typed token (`1`..`6`) to a menu entry; anything else is `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.parse::<u8>().ok()? {
            1 => Some(Self::Add),
            2 => Some(Self::Delete),
            3 => Some(Self::Update),
            4 => Some(Self::Search),
            5 => Some(Self::List),
            6 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Sub-menu shown by [`MenuChoice::Search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchChoice {
    ByName,
    ById,
}

impl SearchChoice {
    /// Map `1` or `2` to a search mode.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.parse::<u8>().ok()? {
            1 => Some(Self::ByName),
            2 => Some(Self::ById),
            _ => None,
        }
    }
}

pub(crate) const MAIN_MENU: &[&str] = &[
    "1. Add student",
    "2. Delete student",
    "3. Update student",
    "4. Search student",
    "5. Print all students",
    "6. Exit",
];

pub(crate) const SEARCH_MENU: &[&str] = &["Search by:", "1. Name", "2. ID"];
