use std::fmt;

/// Sqrt Treeの操作が失敗した理由
///
/// どの操作も, 失敗した場合は構造を一切変更しない.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqrtTreeError {
    /// `left <= right < len`を満たさない区間が指定された.
    InvalidRange {
        left: usize,
        right: usize,
        len: usize,
    },
    /// 範囲外の添字が指定された.
    InvalidIndex { index: usize, len: usize },
    /// 空の列から構築しようとした. 単位元を要求しないため空の列は扱えない.
    InvalidConstruction,
}

impl fmt::Display for SqrtTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange { left, right, len } => {
                write!(f, "invalid range [{left}, {right}] for length {len}")
            }
            Self::InvalidIndex { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::InvalidConstruction => write!(f, "cannot build from an empty sequence"),
        }
    }
}

impl std::error::Error for SqrtTreeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let e = SqrtTreeError::InvalidRange {
            left: 3,
            right: 1,
            len: 5,
        };
        assert_eq!(e.to_string(), "invalid range [3, 1] for length 5");
        let e = SqrtTreeError::InvalidIndex { index: 7, len: 5 };
        assert_eq!(e.to_string(), "index 7 out of bounds for length 5");
        assert_eq!(
            SqrtTreeError::InvalidConstruction.to_string(),
            "cannot build from an empty sequence"
        );
    }
}
