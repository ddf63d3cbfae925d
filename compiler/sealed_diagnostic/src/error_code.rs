use std::fmt;

/// Error codes for matching diagnostics.
///
/// - E3xxx: pattern errors (construction and check time)
/// - W3xxx: pattern warnings
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// A pattern binds the same name twice within one arm
    E3001,
    /// Deconstruct sub-pattern count differs from the record's arity
    E3002,
    /// Pattern names a tag that is not declared
    E3003,
    /// Closed match does not cover every shape
    E3004,
    /// Scrutinee type is not a declared record or sum
    E3005,
    /// Arm is unreachable
    W3001,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::W3001 => "W3001",
        }
    }

    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with('W')
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_render_and_classify() {
        assert_eq!(ErrorCode::E3004.to_string(), "E3004");
        assert!(ErrorCode::W3001.is_warning());
        assert!(!ErrorCode::E3001.is_warning());
    }
}
