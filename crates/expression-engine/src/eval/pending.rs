/// Operator waiting on the operator stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pending {
    Open,
    And,
    Or,
    NoOp,
}

impl Pending {
    /// Higher binds tighter. `Open` is only ever popped by a matching close.
    pub(crate) fn precedence(self) -> u8 {
        match self {
            Pending::NoOp => 3,
            Pending::And => 2,
            Pending::Or => 1,
            Pending::Open => 0,
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Pending::Open => "(",
            Pending::And => "AND",
            Pending::Or => "OR",
            Pending::NoOp => "no-op",
        }
    }
}
