/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Logical negation (`!`)
    Not,
    /// Arithmetic negation (`-`)
    Neg,
    /// Pattern-match prefix (`like`)
    Like,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
            UnaryOp::Like => "like",
        }
    }

    /// Word operators take a separating space; symbolic ones do not.
    pub fn is_word(self) -> bool {
        matches!(self, UnaryOp::Like)
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Equal (`==`)
    Eq,
    /// Not equal (`!=`)
    Neq,
    /// Greater than (`>`)
    Gt,
    /// Greater than or equal (`>=`)
    Gte,
    /// Less than (`<`)
    Lt,
    /// Less than or equal (`<=`)
    Lte,
    /// List membership (`in`)
    In,
    /// Negated list membership (`not in`)
    NotIn,
    /// Pattern match (`=~`)
    Match,
    /// Negated pattern match (`!~`)
    NotMatch,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::Gt => ">",
            BinaryOp::Gte => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::Lte => "<=",
            BinaryOp::In => "in",
            BinaryOp::NotIn => "not in",
            BinaryOp::Match => "=~",
            BinaryOp::NotMatch => "!~",
        }
    }
}

/// N-ary operators joining any number of operands left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NaryOp {
    /// Logical AND (`&&`)
    And,
    /// Logical OR (`||`)
    Or,
    /// Addition or concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
}

impl NaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            NaryOp::And => "&&",
            NaryOp::Or => "||",
            NaryOp::Add => "+",
            NaryOp::Sub => "-",
            NaryOp::Mul => "*",
            NaryOp::Div => "/",
            NaryOp::Mod => "%",
        }
    }
}
