use crate::SyntaxKind;

/// A constant-time membership set of token kinds.
///
/// Grammar code builds these as `const` first/follow sets and tests the
/// lookahead against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyntaxSet(u128);

const _: () = assert!((SyntaxKind::EOF as u32) < u128::BITS, "SyntaxKind outgrew SyntaxSet");

impl SyntaxSet {
    pub const EMPTY: Self = Self(0);

    const fn mask(kind: SyntaxKind) -> u128 {
        1 << (kind as u32)
    }

    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < N {
            bits |= Self::mask(kinds[i]);
            i += 1;
        }
        Self(bits)
    }

    pub const fn union(self, other: &Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn with(self, kind: SyntaxKind) -> Self {
        Self(self.0 | Self::mask(kind))
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        self.0 & Self::mask(kind) != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}
