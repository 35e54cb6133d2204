//! Unit tests for the plugin-side registry.

use std::path::PathBuf;

use rstest::rstest;

use prolint_plugins::protocol::WireSeverity;
use prolint_rule::{Failure, Position, RuleError};
use prolint_syntax::SyntaxError;

use super::*;

/// A rule reporting one fixed failure at a fixed position.
#[derive(Debug)]
struct StaticRule {
    id: &'static str,
    severity: Severity,
    message: String,
    pos: Position,
}

impl StaticRule {
    fn new(id: &'static str, message: &str) -> Self {
        Self {
            id,
            severity: Severity::Error,
            message: message.to_owned(),
            pos: Position::new(0, 1, 1),
        }
    }

    const fn at(mut self, pos: Position) -> Self {
        self.pos = pos;
        self
    }
}

impl Rule for StaticRule {
    fn id(&self) -> &str {
        self.id
    }

    fn purpose(&self) -> &str {
        "A static test rule."
    }

    fn is_official(&self) -> bool {
        true
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn apply(&self, proto: &Proto) -> Result<Vec<Failure>, RuleError> {
        Ok(vec![Failure::new(
            proto.filename.clone(),
            self.pos,
            self.id,
            self.severity,
            self.message.clone(),
        )])
    }
}

/// A generated rule echoing the flags it was resolved with.
#[derive(Debug)]
struct FlagRule {
    severity: Severity,
    verbose: bool,
    fix_mode: bool,
}

impl Rule for FlagRule {
    fn id(&self) -> &str {
        "FLAG_RULE"
    }

    fn purpose(&self) -> &str {
        "Echoes resolution flags."
    }

    fn is_official(&self) -> bool {
        true
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn apply(&self, proto: &Proto) -> Result<Vec<Failure>, RuleError> {
        Ok(vec![Failure::new(
            proto.filename.clone(),
            Position::default(),
            self.id(),
            self.severity,
            format!("verbose={}, fix_mode={}", self.verbose, self.fix_mode),
        )])
    }
}

fn flag_generator() -> RuleEntry {
    RuleEntry::generator(|severity, verbose, fix_mode| {
        Box::new(FlagRule {
            severity,
            verbose,
            fix_mode,
        })
    })
}

fn parsing_stub() -> MockProtoParse {
    let mut parser = MockProtoParse::new();
    parser
        .expect_parse()
        .returning(|path| Ok(Proto::new(path.to_path_buf())));
    parser
}

fn list(registry: &RuleSetRegistry<MockProtoParse>, verbose: bool) -> Vec<RuleMeta> {
    registry.list_rules(&ListRulesRequest {
        verbose,
        fix_mode: false,
    })
}

fn apply(
    registry: &RuleSetRegistry<MockProtoParse>,
    id: &str,
) -> Result<Vec<WireFailure>, RegistryError> {
    registry.apply(&ApplyRequest {
        id: id.to_owned(),
        path: PathBuf::from("/abs/foo.proto"),
    })
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[test]
fn lists_declared_metadata() {
    let registry = RuleSetRegistry::with_parser(
        vec![RuleEntry::rule(StaticRule::new("ALPHA", "alpha failed"))],
        parsing_stub(),
    );
    let metas = list(&registry, false);
    let meta = metas.first().expect("one rule");
    assert_eq!(meta.id, "ALPHA");
    assert_eq!(meta.purpose, "A static test rule.");
    assert_eq!(meta.severity, WireSeverity::Error);
}

#[test]
fn generators_receive_the_default_severity() {
    let registry = RuleSetRegistry::with_parser(vec![flag_generator()], parsing_stub())
        .with_default_severity(Severity::Warning);
    let metas = list(&registry, false);
    assert_eq!(
        metas.first().expect("one rule").severity,
        WireSeverity::Warning
    );
}

// ---------------------------------------------------------------------------
// Generator resolution cycles
// ---------------------------------------------------------------------------

#[test]
fn generator_resolves_with_request_flags() {
    let registry = RuleSetRegistry::with_parser(vec![flag_generator()], parsing_stub());
    list(&registry, true);
    let failures = apply(&registry, "FLAG_RULE").expect("apply");
    assert_eq!(
        failures.first().expect("one failure").message,
        "verbose=true, fix_mode=false"
    );
}

#[test]
fn each_listing_cycle_resolves_afresh() {
    let registry = RuleSetRegistry::with_parser(vec![flag_generator()], parsing_stub());

    list(&registry, true);
    let verbose = apply(&registry, "FLAG_RULE").expect("apply");
    assert!(
        verbose
            .first()
            .expect("one failure")
            .message
            .contains("verbose=true")
    );

    list(&registry, false);
    let terse = apply(&registry, "FLAG_RULE").expect("apply");
    assert!(
        terse
            .first()
            .expect("one failure")
            .message
            .contains("verbose=false")
    );
}

// ---------------------------------------------------------------------------
// Apply
// ---------------------------------------------------------------------------

#[test]
fn apply_before_any_listing_is_not_found() {
    let registry = RuleSetRegistry::with_parser(
        vec![RuleEntry::rule(StaticRule::new("ALPHA", "alpha failed"))],
        parsing_stub(),
    );
    let err = apply(&registry, "ALPHA").expect_err("must miss");
    assert_eq!(err.to_string(), "not found rule=ALPHA");
}

#[test]
fn apply_with_an_unlisted_id_is_not_found() {
    let registry = RuleSetRegistry::with_parser(
        vec![RuleEntry::rule(StaticRule::new("ALPHA", "alpha failed"))],
        parsing_stub(),
    );
    list(&registry, false);
    let err = apply(&registry, "MISSING").expect_err("must miss");
    assert!(matches!(err, RegistryError::RuleNotFound { id } if id == "MISSING"));
}

#[test]
fn apply_copies_positions_verbatim() {
    let registry = RuleSetRegistry::with_parser(
        vec![RuleEntry::rule(
            StaticRule::new("ALPHA", "alpha failed").at(Position::new(19, 3, 4)),
        )],
        parsing_stub(),
    );
    list(&registry, false);
    let failures = apply(&registry, "ALPHA").expect("apply");
    let pos = failures.first().expect("one failure").pos;
    assert_eq!((pos.offset, pos.line, pos.column), (19, 3, 4));
}

#[test]
fn parse_failure_propagates_without_partial_results() {
    let mut parser = MockProtoParse::new();
    parser.expect_parse().returning(|path| {
        Err(SyntaxError::Read {
            path: path.to_path_buf(),
            source: std::io::Error::other("unreadable"),
        })
    });
    let registry = RuleSetRegistry::with_parser(
        vec![RuleEntry::rule(StaticRule::new("ALPHA", "alpha failed"))],
        parser,
    );
    list(&registry, false);
    let err = apply(&registry, "ALPHA").expect_err("must fail");
    assert!(matches!(err, RegistryError::Parse(_)));
}

// ---------------------------------------------------------------------------
// The on-disk parse collaborator
// ---------------------------------------------------------------------------

#[test]
fn file_parser_parses_real_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("sample.proto");
    std::fs::write(&path, "enum sample { A = 0; }\n").expect("write");

    let proto = FileParser.parse(&path).expect("parse");
    assert_eq!(proto.enums.len(), 1);
    assert_eq!(proto.filename, path);
}

#[test]
fn file_parser_surfaces_read_errors() {
    let result = FileParser.parse(Path::new("/nonexistent/missing.proto"));
    assert!(matches!(result, Err(SyntaxError::Read { .. })));
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[rstest]
#[case::list_rules(
    RuleSetRequest::ListRules(ListRulesRequest { verbose: false, fix_mode: false })
)]
fn dispatch_answers_listing(#[case] request: RuleSetRequest) {
    let registry = RuleSetRegistry::with_parser(
        vec![RuleEntry::rule(StaticRule::new("ALPHA", "alpha failed"))],
        parsing_stub(),
    );
    match registry.dispatch(&request) {
        RuleSetResponse::Rules { rules } => assert_eq!(rules.len(), 1),
        other => panic!("expected rules, got {other:?}"),
    }
}

#[test]
fn dispatch_encodes_call_errors_as_error_replies() {
    let registry = RuleSetRegistry::with_parser(
        vec![RuleEntry::rule(StaticRule::new("ALPHA", "alpha failed"))],
        parsing_stub(),
    );
    let response = registry.dispatch(&RuleSetRequest::Apply(ApplyRequest {
        id: "MISSING".into(),
        path: PathBuf::from("/abs/foo.proto"),
    }));
    match response {
        RuleSetResponse::Error { message } => {
            assert_eq!(message, "not found rule=MISSING");
        }
        other => panic!("expected error, got {other:?}"),
    }
}
