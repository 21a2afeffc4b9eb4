//! Domain model that mirrors the `students` table. The struct stays a plain
//! data holder so the persistence layer and the shell can pass it around
//! without either one owning presentation rules the other depends on.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One student row. Nothing here enforces uniqueness: two students may share a
/// name or an id unless the storage schema says otherwise.
pub struct Student {
    /// Name typed at the prompt. Update and delete flows key off this value.
    pub name: String,
    /// Age in whole years, stored as given.
    pub age: i64,
    /// Business identifier chosen by the user, not a database rowid.
    pub id: i64,
}

impl Student {
    /// Build a record from the three prompted fields.
    pub fn new(name: impl Into<String>, age: i64, id: i64) -> Self {
        Self {
            name: name.into(),
            age,
            id,
        }
    }

    /// Compact `name // Age: n // ID: n` form printed after a successful
    /// lookup.
    pub fn summary(&self) -> String {
        format!("{} // Age: {} // ID: {}", self.name, self.age, self.id)
    }
}

impl fmt::Display for Student {
    /// Listing line used by the "print all students" action.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {} // Age: {} // ID: {}", self.name, self.age, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_listing_format() {
        let student = Student::new("Alice", 20, 1);
        assert_eq!(student.to_string(), "Name: Alice // Age: 20 // ID: 1");
        assert_eq!(student.summary(), "Alice // Age: 20 // ID: 1");
    }
}
