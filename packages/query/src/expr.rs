//! Boolean expression tree shared by keyword and date queries.

/// A recursive AND/OR expression over leaves of type `L`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr<L> {
    /// A single term, interpreted by the caller's leaf matcher.
    Leaf(L),
    /// Matches when every child matches. Empty is `true`.
    All(Vec<Self>),
    /// Matches when at least one child matches. Empty is `false`.
    Any(Vec<Self>),
}

impl<L> Expr<L> {
    /// Evaluates the tree, delegating each leaf to `matches_leaf`.
    pub fn evaluate<F>(&self, matches_leaf: &F) -> bool
    where
        F: Fn(&L) -> bool,
    {
        match self {
            Self::Leaf(leaf) => matches_leaf(leaf),
            Self::All(children) => children.iter().all(|c| c.evaluate(matches_leaf)),
            Self::Any(children) => children.iter().any(|c| c.evaluate(matches_leaf)),
        }
    }
}
