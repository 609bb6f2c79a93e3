use tower_lsp::lsp_types::{
    Diagnostic, DiagnosticRelatedInformation, DiagnosticSeverity, Location, Range, Url,
};

use logicaffeine_base::Interner;
use logicaffeine_language::error::{ParseError, ParseErrorKind, socratic_explanation};
use logicaffeine_language::token::{Token, TokenType};

use crate::index::{find_token_span_for_name_pub, find_keyword_span_before_name};
use crate::line_index::LineIndex;
use crate::pipeline::AnalysisError;

/// Convert a list of parse errors to LSP diagnostics.
pub fn convert_errors(
    errors: &[ParseError],
    interner: &Interner,
    line_index: &LineIndex,
) -> Vec<Diagnostic> {
    errors
        .iter()
        .map(|e| error_to_diagnostic(e, interner, line_index))
        .collect()
}

fn error_to_diagnostic(
    error: &ParseError,
    interner: &Interner,
    line_index: &LineIndex,
) -> Diagnostic {
    let start = line_index.position(error.span.start);
    let end = line_index.position(error.span.end.max(error.span.start + 1));

    let message = socratic_explanation(error, interner);
    let severity = severity_for_kind(&error.kind);
    let code = diagnostic_code_for_kind(&error.kind);

    Diagnostic {
        range: Range { start, end },
        severity: Some(severity),
        code,
        source: Some("logicaffeine".to_string()),
        message,
        ..Default::default()
    }
}

/// Convert analysis errors (escape/ownership) to LSP diagnostics.
///
/// The `uri` parameter is used for `DiagnosticRelatedInformation` locations.
/// Pass `None` to omit related information (e.g., in tests without a real URI).
pub fn convert_analysis_errors(
    errors: &[AnalysisError],
    tokens: &[Token],
    interner: &Interner,
    line_index: &LineIndex,
    uri: Option<&Url>,
) -> Vec<Diagnostic> {
    errors
        .iter()
        .map(|e| analysis_error_to_diagnostic(e, tokens, interner, line_index, uri))
        .collect()
}

fn analysis_error_to_diagnostic(
    error: &AnalysisError,
    tokens: &[Token],
    interner: &Interner,
    line_index: &LineIndex,
    uri: Option<&Url>,
) -> Diagnostic {
    // Resolve the variable name to a span in the token stream
    let (start, end) = if let Some(span) = find_token_span_for_name_pub(tokens, &error.variable, interner) {
        (line_index.position(span.start), line_index.position(span.end))
    } else {
        // Fallback: point to start of document
        let zero = tower_lsp::lsp_types::Position { line: 0, character: 0 };
        (zero, zero)
    };

    // Build related information pointing to the cause (Give statement, Zone entry, etc.)
    let related_information = uri.and_then(|u| build_related_information(error, tokens, interner, line_index, u));

    Diagnostic {
        range: Range { start, end },
        severity: Some(DiagnosticSeverity::ERROR),
        code: Some(tower_lsp::lsp_types::NumberOrString::String(error.code.to_string())),
        source: Some("logicaffeine".to_string()),
        message: error.message.clone(),
        related_information,
        ..Default::default()
    }
}

/// Build `DiagnosticRelatedInformation` linking the error to its cause.
fn build_related_information(
    error: &AnalysisError,
    tokens: &[Token],
    interner: &Interner,
    line_index: &LineIndex,
    uri: &Url,
) -> Option<Vec<DiagnosticRelatedInformation>> {
    let cause_message = error.cause_context.as_ref()?;

    // Determine which keyword token to search for based on error code
    let keyword = match error.code {
        "use-after-move" | "double-move" | "maybe-moved" => TokenType::Give,
        "escape-return" | "escape-assignment" => TokenType::Zone,
        _ => return None,
    };

    let cause_span = find_keyword_span_before_name(tokens, keyword, &error.variable, interner)?;
    let cause_start = line_index.position(cause_span.start);
    let cause_end = line_index.position(cause_span.end);

    Some(vec![DiagnosticRelatedInformation {
        location: Location {
            uri: uri.clone(),
            range: Range {
                start: cause_start,
                end: cause_end,
            },
        },
        message: cause_message.clone(),
    }])
}

/// Return a stable diagnostic code for error kinds that code actions match on.
fn diagnostic_code_for_kind(kind: &ParseErrorKind) -> Option<tower_lsp::lsp_types::NumberOrString> {
    let code = match kind {
        ParseErrorKind::IsValueEquality { .. } => "is-value-equality",
        ParseErrorKind::UseAfterMove { .. } => "use-after-move",
        ParseErrorKind::ZeroIndex => "zero-index",
        ParseErrorKind::GrammarError(_) => "grammar-error",
        ParseErrorKind::UndefinedVariable { .. } => "undefined-variable",
        ParseErrorKind::TypeMismatch { .. } => "type-mismatch",
        _ => return None,
    };
    Some(tower_lsp::lsp_types::NumberOrString::String(code.to_string()))
}

fn severity_for_kind(kind: &ParseErrorKind) -> DiagnosticSeverity {
    match kind {
        // Warnings: style issues that don't prevent compilation
        ParseErrorKind::IsValueEquality { .. } | ParseErrorKind::GrammarError(_) => {
            DiagnosticSeverity::WARNING
        }
        // Information: hints about idiomatic usage
        ParseErrorKind::ZeroIndex => DiagnosticSeverity::INFORMATION,
        // Everything else is an error
        _ => DiagnosticSeverity::ERROR,
    }
}
