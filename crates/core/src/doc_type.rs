use std::str::FromStr;

/// The documentation formats the user can ask for.
///
/// The order of [`DocType::ALL`] is the order shown in the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocType {
    CommitMessage,
    PullRequest,
    Docstring,
    ReleaseNotes,
}

impl DocType {
    pub const ALL: [DocType; 4] = [
        DocType::CommitMessage,
        DocType::PullRequest,
        DocType::Docstring,
        DocType::ReleaseNotes,
    ];

    /// Label interpolated into the user query and shown in the picker.
    pub fn label(self) -> &'static str {
        match self {
            DocType::CommitMessage => "Git Commit Message (Conventional Commit format)",
            DocType::PullRequest => "Pull Request Description (Template)",
            DocType::Docstring => "Code Function Summary (Docstring)",
            DocType::ReleaseNotes => "Release Notes Entry",
        }
    }

    /// Short name accepted on the command line and in the picker.
    pub fn alias(self) -> &'static str {
        match self {
            DocType::CommitMessage => "commit",
            DocType::PullRequest => "pr",
            DocType::Docstring => "docstring",
            DocType::ReleaseNotes => "release-notes",
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|doc_type| doc_type.label()).collect()
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|doc_type| *doc_type == self)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DocType {
    type Err = String;

    /// Accepts an alias, a full label or a 1-based menu number.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let needle = input.trim();

        if let Ok(number) = needle.parse::<usize>() {
            return number
                .checked_sub(1)
                .and_then(Self::from_index)
                .ok_or_else(|| format!("No documentation type numbered {number}"));
        }

        Self::ALL
            .iter()
            .copied()
            .find(|doc_type| {
                doc_type.alias().eq_ignore_ascii_case(needle)
                    || doc_type.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| format!("Unknown documentation type: {needle}"))
    }
}
