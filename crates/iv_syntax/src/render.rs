use crate::Diagnostic;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Append `= help:` lines.
    pub help: bool,
    /// Show the diagnostic code after the message.
    pub codes: bool,
}

impl RenderOptions {
    pub fn verbose() -> Self {
        Self {
            help: true,
            codes: true,
        }
    }
}

pub fn render_diagnostic_with_options(diag: &Diagnostic, opts: RenderOptions) -> String {
    let mut out = diag.to_string();
    if opts.codes {
        if let Some(code) = diag.code {
            out.push_str(&format!(" [{code}]"));
        }
    }
    if opts.help {
        if let Some(h) = &diag.help {
            out.push('\n');
            out.push_str("  = help: ");
            out.push_str(h);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiagnosticKind, Location, codes};

    fn unknown() -> Diagnostic {
        Diagnostic::new(
            DiagnosticKind::UnknownDirective("fromat".into()),
            Some(Location::new("<stdin>", 1)),
        )
        .with_code(codes::UNKNOWN_DIRECTIVE)
        .with_help("did you mean )format?")
    }

    #[test]
    fn default_render_is_one_line() {
        let out = render_diagnostic_with_options(&unknown(), RenderOptions::default());
        assert_eq!(out, "<stdin>:1: fromat: not recognized");
    }

    #[test]
    fn verbose_render_adds_code_and_help() {
        let out = render_diagnostic_with_options(&unknown(), RenderOptions::verbose());
        assert_eq!(
            out,
            "<stdin>:1: fromat: not recognized [E0001]\n  = help: did you mean )format?"
        );
    }
}
