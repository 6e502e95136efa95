pub enum DiagnosticKind {
    // Lexer
    UnterminatedString,
    UnexpectedChar(char),
    ReadFailed(String),

    // Parser
    ExpectedToken { expected: String, found: String },
    UnexpectedToken(String),
    InvalidString(String),
    InvalidNumber(String),
    InvalidInteger(String),
    UndefinedName(String),
    DomainError { op: &'static str, detail: String },
    ExprTooDeep(usize),

    // Directives
    UnknownDirective(String),
    IllegalOrigin,
    NestedTooDeep(String),
    OpenFailed { path: String, reason: String },

    // Custom
    Raw(String),
}

pub struct DiagnosticsFormatter;

impl DiagnosticsFormatter {
    fn format_en(kind: &DiagnosticKind) -> String {
        match kind {
            DiagnosticKind::UnterminatedString => "unterminated string".into(),
            DiagnosticKind::UnexpectedChar(c) => format!("unexpected character {:?}", c),
            DiagnosticKind::ReadFailed(reason) => format!("read error: {}", reason),

            DiagnosticKind::ExpectedToken { expected, found } => {
                format!("expected {}, got {}", expected, found)
            }
            DiagnosticKind::UnexpectedToken(tok) => format!("unexpected {}", tok),
            DiagnosticKind::InvalidString(reason) => format!("bad string literal: {}", reason),
            DiagnosticKind::InvalidNumber(reason) => reason.clone(),
            DiagnosticKind::InvalidInteger(text) => format!("invalid integer {:?}", text),
            DiagnosticKind::UndefinedName(name) => format!("undefined: {}", name),
            DiagnosticKind::DomainError { op, detail } => format!("{}: {}", op, detail),
            DiagnosticKind::ExprTooDeep(limit) => {
                format!("expression nested deeper than {}", limit)
            }

            DiagnosticKind::UnknownDirective(name) => format!("{}: not recognized", name),
            DiagnosticKind::IllegalOrigin => "illegal origin".into(),
            DiagnosticKind::NestedTooDeep(path) => format!("get {:?} nested too deep", path),
            DiagnosticKind::OpenFailed { path, reason } => format!("open {}: {}", path, reason),

            DiagnosticKind::Raw(s) => s.clone(),
        }
    }

    pub fn format(kind: &DiagnosticKind) -> String {
        Self::format_en(kind)
    }
}
