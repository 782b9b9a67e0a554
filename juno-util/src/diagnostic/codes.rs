//! Stable codes identifying each diagnostic kind this pass can emit.

/// A unique code of the form `{prefix}{number}`, e.g. `E4001`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    pub prefix: &'static str,
    pub number: u32,
}

impl DiagnosticCode {
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    // One code per row of the diagnostic catalogue.
    pub const DECL_CONFLICT: Self = Self::new("E", 4001);
    pub const OVERRIDE_MISMATCH: Self = Self::new("E", 4002);
    pub const INTERFACE_NOT_IMPLEMENTED: Self = Self::new("E", 4003);
    pub const IDENTIFIER_NOT_DECLARED: Self = Self::new("E", 4004);
    pub const FIELD_NOT_FOUND_IN_BASE: Self = Self::new("E", 4005);
    pub const INACCESSIBLE_FIELD: Self = Self::new("E", 4006);
    pub const INCOMPATIBLE_OPERAND: Self = Self::new("E", 4007);
    pub const INCOMPATIBLE_OPERANDS: Self = Self::new("E", 4008);
    pub const TEST_NOT_BOOLEAN: Self = Self::new("E", 4009);
    pub const BRACKETS_ON_NON_ARRAY: Self = Self::new("E", 4010);
    pub const SUBSCRIPT_NOT_INTEGER: Self = Self::new("E", 4011);
    pub const NEW_ARRAY_SIZE_NOT_INTEGER: Self = Self::new("E", 4012);
    pub const ARG_MISMATCH: Self = Self::new("E", 4013);
    pub const NUM_ARGS_MISMATCH: Self = Self::new("E", 4014);
    pub const PRINT_ARG_MISMATCH: Self = Self::new("E", 4015);
    pub const RETURN_MISMATCH: Self = Self::new("E", 4016);
    pub const THIS_OUTSIDE_CLASS_SCOPE: Self = Self::new("E", 4017);
    pub const BREAK_OUTSIDE_LOOP: Self = Self::new("E", 4018);
    pub const INHERITANCE_CYCLE: Self = Self::new("E", 4019);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_pads_to_four_digits() {
        assert_eq!(DiagnosticCode::new("E", 1).as_str(), "E0001");
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", DiagnosticCode::DECL_CONFLICT), "E4001");
    }

    #[test]
    fn debug_wraps_the_code() {
        assert_eq!(format!("{:?}", DiagnosticCode::BREAK_OUTSIDE_LOOP), "DiagnosticCode(E4018)");
    }

    #[test]
    fn catalogue_codes_are_distinct() {
        let codes = [
            DiagnosticCode::DECL_CONFLICT,
            DiagnosticCode::OVERRIDE_MISMATCH,
            DiagnosticCode::INTERFACE_NOT_IMPLEMENTED,
            DiagnosticCode::IDENTIFIER_NOT_DECLARED,
            DiagnosticCode::FIELD_NOT_FOUND_IN_BASE,
            DiagnosticCode::INACCESSIBLE_FIELD,
            DiagnosticCode::INCOMPATIBLE_OPERAND,
            DiagnosticCode::INCOMPATIBLE_OPERANDS,
            DiagnosticCode::TEST_NOT_BOOLEAN,
            DiagnosticCode::BRACKETS_ON_NON_ARRAY,
            DiagnosticCode::SUBSCRIPT_NOT_INTEGER,
            DiagnosticCode::NEW_ARRAY_SIZE_NOT_INTEGER,
            DiagnosticCode::ARG_MISMATCH,
            DiagnosticCode::NUM_ARGS_MISMATCH,
            DiagnosticCode::PRINT_ARG_MISMATCH,
            DiagnosticCode::RETURN_MISMATCH,
            DiagnosticCode::THIS_OUTSIDE_CLASS_SCOPE,
            DiagnosticCode::BREAK_OUTSIDE_LOOP,
            DiagnosticCode::INHERITANCE_CYCLE,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
