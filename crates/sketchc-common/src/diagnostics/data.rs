use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    // Lexical mask
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1001;
    pub const UNTERMINATED_BLOCK_COMMENT: u32 = 1002;

    // Extraction
    pub const UNRECOGNIZED_CLASS_MEMBER: u32 = 2001;
    pub const MALFORMED_DECLARATION: u32 = 2002;

    // Resolution
    pub const AMBIGUOUS_OVERLOAD: u32 = 3001;
    pub const INHERITANCE_CYCLE: u32 = 3002;
    pub const UNRESOLVED_BASE: u32 = 3003;

    // Rendering
    pub const UNEXPANDED_PLACEHOLDER: u32 = 4001;
    pub const REWRITE_LIMIT_REACHED: u32 = 4002;
    pub const DANGLING_REFERENCE: u32 = 4003;
}

use diagnostic_codes::*;

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: UNTERMINATED_STRING_LITERAL,
        category: DiagnosticCategory::Warning,
        message: "Unterminated string literal starting with {0}; kept as plain text.",
    },
    DiagnosticMessage {
        code: UNTERMINATED_BLOCK_COMMENT,
        category: DiagnosticCategory::Warning,
        message: "Unterminated block comment; the rest of the file was dropped.",
    },
    DiagnosticMessage {
        code: UNRECOGNIZED_CLASS_MEMBER,
        category: DiagnosticCategory::Warning,
        message: "Unrecognized member '{0}' in '{1}' was skipped.",
    },
    DiagnosticMessage {
        code: MALFORMED_DECLARATION,
        category: DiagnosticCategory::Warning,
        message: "Malformed {0} declaration '{1}'; emitted as a plain statement.",
    },
    DiagnosticMessage {
        code: AMBIGUOUS_OVERLOAD,
        category: DiagnosticCategory::Warning,
        message: "Overloads of '{0}' in '{1}' share arity {2}; calls dispatch on argument count only.",
    },
    DiagnosticMessage {
        code: INHERITANCE_CYCLE,
        category: DiagnosticCategory::Error,
        message: "Class hierarchy cycle involving {0}; render order is undefined for these classes.",
    },
    DiagnosticMessage {
        code: UNRESOLVED_BASE,
        category: DiagnosticCategory::Message,
        message: "'{0}' referenced by '{1}' is not declared in this sketch; assuming the runtime provides it.",
    },
    DiagnosticMessage {
        code: UNEXPANDED_PLACEHOLDER,
        category: DiagnosticCategory::Warning,
        message: "Placeholder {0} was left unexpanded in the output.",
    },
    DiagnosticMessage {
        code: REWRITE_LIMIT_REACHED,
        category: DiagnosticCategory::Warning,
        message: "The {0} rewrite did not settle after {1} passes; output may be partial.",
    },
    DiagnosticMessage {
        code: DANGLING_REFERENCE,
        category: DiagnosticCategory::Warning,
        message: "Reference {0} does not point at a recorded entry; kept verbatim.",
    },
];
