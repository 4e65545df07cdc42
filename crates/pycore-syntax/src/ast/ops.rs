use crate::SyntaxKind::{self, *};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    LeftShift,
    RightShift,
    Add,
    Sub,
    Mul,
    MatMul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

impl BinaryOp {
    pub fn from_kind(kind: SyntaxKind) -> Option<Self> {
        let op = match kind {
            OR_KW => Self::Or,
            AND_KW => Self::And,
            PIPE => Self::BitOr,
            CARET => Self::BitXor,
            AMPERSAND => Self::BitAnd,
            LEFT_SHIFT => Self::LeftShift,
            RIGHT_SHIFT => Self::RightShift,
            PLUS => Self::Add,
            MINUS => Self::Sub,
            STAR => Self::Mul,
            AT => Self::MatMul,
            SLASH => Self::Div,
            DOUBLE_SLASH => Self::FloorDiv,
            PERCENT => Self::Mod,
            DOUBLE_STAR => Self::Pow,
            _ => return None,
        };
        Some(op)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Plus,
    Minus,
    Invert,
}

impl UnaryOp {
    pub fn from_kind(kind: SyntaxKind) -> Option<Self> {
        let op = match kind {
            NOT_KW => Self::Not,
            PLUS => Self::Plus,
            MINUS => Self::Minus,
            TILDE => Self::Invert,
            _ => return None,
        };
        Some(op)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Less,
    Greater,
    Equal,
    GreaterEqual,
    LessEqual,
    NotEqual,
    In,
    NotIn,
    Is,
    IsNot,
}

impl CompareOp {
    /// Maps single-token comparison operators. `not in` and `is not` are
    /// recognised by the parser from two tokens.
    pub fn from_kind(kind: SyntaxKind) -> Option<Self> {
        let op = match kind {
            LESS => Self::Less,
            GREATER => Self::Greater,
            EQ_EQ => Self::Equal,
            GREATER_EQ => Self::GreaterEqual,
            LESS_EQ => Self::LessEqual,
            NOT_EQ => Self::NotEqual,
            IN_KW => Self::In,
            IS_KW => Self::Is,
            _ => return None,
        };
        Some(op)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AugAssignOp {
    Add,
    Sub,
    Mul,
    MatMul,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    LeftShift,
    RightShift,
    Pow,
    FloorDiv,
}

impl AugAssignOp {
    pub fn from_kind(kind: SyntaxKind) -> Option<Self> {
        let op = match kind {
            PLUS_EQ => Self::Add,
            MINUS_EQ => Self::Sub,
            STAR_EQ => Self::Mul,
            AT_EQ => Self::MatMul,
            SLASH_EQ => Self::Div,
            PERCENT_EQ => Self::Mod,
            AMPERSAND_EQ => Self::BitAnd,
            PIPE_EQ => Self::BitOr,
            CARET_EQ => Self::BitXor,
            LEFT_SHIFT_EQ => Self::LeftShift,
            RIGHT_SHIFT_EQ => Self::RightShift,
            DOUBLE_STAR_EQ => Self::Pow,
            DOUBLE_SLASH_EQ => Self::FloorDiv,
            _ => return None,
        };
        Some(op)
    }

    /// Kind name of the statement this operator builds, one per operator.
    pub fn node_name(self) -> &'static str {
        match self {
            Self::Add => "AugAssignStmt(+=)",
            Self::Sub => "AugAssignStmt(-=)",
            Self::Mul => "AugAssignStmt(*=)",
            Self::MatMul => "AugAssignStmt(@=)",
            Self::Div => "AugAssignStmt(/=)",
            Self::Mod => "AugAssignStmt(%=)",
            Self::BitAnd => "AugAssignStmt(&=)",
            Self::BitOr => "AugAssignStmt(|=)",
            Self::BitXor => "AugAssignStmt(^=)",
            Self::LeftShift => "AugAssignStmt(<<=)",
            Self::RightShift => "AugAssignStmt(>>=)",
            Self::Pow => "AugAssignStmt(**=)",
            Self::FloorDiv => "AugAssignStmt(//=)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConstantKind {
    None,
    True,
    False,
    Ellipsis,
}

impl ConstantKind {
    pub fn from_kind(kind: SyntaxKind) -> Option<Self> {
        let constant = match kind {
            NONE_KW => Self::None,
            TRUE_KW => Self::True,
            FALSE_KW => Self::False,
            ELLIPSIS => Self::Ellipsis,
            _ => return None,
        };
        Some(constant)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComprehensionKind {
    List,
    Set,
    Generator,
}
