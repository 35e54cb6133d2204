//! Unit tests for the remote rule adapter.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rstest::rstest;

use prolint_rule::{Rule, Severity};
use prolint_syntax::Proto;

use super::*;
use crate::channel::RuleSetChannel;
use crate::error::PluginError;
use crate::protocol::{ListRulesRequest, WireFailure, WirePosition, WireSeverity};

/// Channel double returning canned replies and recording apply calls.
#[derive(Debug)]
struct ScriptedChannel {
    failures: Result<Vec<WireFailure>, String>,
    applied: Mutex<Vec<ApplyRequest>>,
}

impl ScriptedChannel {
    fn with_failures(failures: Vec<WireFailure>) -> Self {
        Self {
            failures: Ok(failures),
            applied: Mutex::new(Vec::new()),
        }
    }

    fn with_error(message: &str) -> Self {
        Self {
            failures: Err(message.to_owned()),
            applied: Mutex::new(Vec::new()),
        }
    }

    fn applied(&self) -> Vec<ApplyRequest> {
        self.applied.lock().expect("lock").clone()
    }
}

impl RuleSetChannel for ScriptedChannel {
    fn list_rules(&self, _request: &ListRulesRequest) -> Result<Vec<RuleMeta>, PluginError> {
        Ok(Vec::new())
    }

    fn apply(&self, request: &ApplyRequest) -> Result<Vec<WireFailure>, PluginError> {
        self.applied.lock().expect("lock").push(request.clone());
        match &self.failures {
            Ok(failures) => Ok(failures.clone()),
            Err(message) => Err(PluginError::Remote {
                name: "scripted".into(),
                message: message.clone(),
            }),
        }
    }
}

fn meta(id: &str, severity: WireSeverity) -> RuleMeta {
    RuleMeta {
        id: id.to_owned(),
        purpose: "A scripted rule.".to_owned(),
        severity,
    }
}

fn boom_failure() -> WireFailure {
    WireFailure {
        message: "boom".into(),
        pos: WirePosition {
            offset: 5,
            line: 2,
            column: 3,
        },
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

#[test]
fn metadata_is_captured_at_construction() {
    let channel = Arc::new(ScriptedChannel::with_failures(vec![]));
    let rule = ExternalRule::new(&meta("REMOTE_RULE", WireSeverity::Note), channel);
    assert_eq!(rule.id(), "REMOTE_RULE");
    assert_eq!(rule.purpose(), "A scripted rule.");
    assert_eq!(rule.severity(), Severity::Note);
}

#[rstest]
#[case::error(WireSeverity::Error)]
#[case::warning(WireSeverity::Warning)]
#[case::note(WireSeverity::Note)]
#[case::unknown(WireSeverity::Unknown)]
fn is_official_is_unconditionally_true(#[case] severity: WireSeverity) {
    let channel = Arc::new(ScriptedChannel::with_failures(vec![]));
    let rule = ExternalRule::new(&meta("REMOTE_RULE", severity), channel);
    assert!(rule.is_official());
}

#[test]
fn unknown_wire_severity_becomes_error() {
    let channel = Arc::new(ScriptedChannel::with_failures(vec![]));
    let rule = ExternalRule::new(&meta("REMOTE_RULE", WireSeverity::Unknown), channel);
    assert_eq!(rule.severity(), Severity::Error);
}

// ---------------------------------------------------------------------------
// Apply
// ---------------------------------------------------------------------------

#[test]
fn apply_sends_absolute_path_and_keeps_local_filename() {
    let channel = Arc::new(ScriptedChannel::with_failures(vec![boom_failure()]));
    let rule = ExternalRule::new(&meta("REMOTE_RULE", WireSeverity::Warning), channel.clone());

    let proto = Proto::new(PathBuf::from("dir/foo.proto"));
    let failures = rule.apply(&proto).expect("apply");

    let sent = channel.applied();
    let request = sent.first().expect("one apply call");
    assert_eq!(request.id, "REMOTE_RULE");
    assert!(request.path.is_absolute(), "path {:?}", request.path);
    assert!(request.path.ends_with("dir/foo.proto"));

    let failure = failures.first().expect("one failure");
    assert_eq!(failure.filename(), PathBuf::from("dir/foo.proto"));
    assert_eq!(failure.message(), "boom");
    assert_eq!(failure.rule_id(), "REMOTE_RULE");
    assert_eq!(failure.severity(), Severity::Warning);
}

#[test]
fn apply_copies_remote_positions_verbatim() {
    let channel = Arc::new(ScriptedChannel::with_failures(vec![boom_failure()]));
    let rule = ExternalRule::new(&meta("REMOTE_RULE", WireSeverity::Error), channel);

    let proto = Proto::new(PathBuf::from("foo.proto"));
    let failures = rule.apply(&proto).expect("apply");
    let pos = failures.first().expect("one failure").pos();
    assert_eq!(pos.offset, 5);
    assert_eq!(pos.line, 2);
    assert_eq!(pos.column, 3);
}

#[test]
fn remote_call_error_propagates() {
    let channel = Arc::new(ScriptedChannel::with_error("not found rule=REMOTE_RULE"));
    let rule = ExternalRule::new(&meta("REMOTE_RULE", WireSeverity::Error), channel);

    let proto = Proto::new(PathBuf::from("foo.proto"));
    let err = rule.apply(&proto).expect_err("apply should fail");
    assert!(err.to_string().contains("REMOTE_RULE"));
    assert!(err.to_string().contains("not found"));
}

#[test]
fn path_resolution_failure_skips_the_remote_call() {
    let channel = Arc::new(ScriptedChannel::with_failures(vec![boom_failure()]));
    let rule = ExternalRule::new(
        &meta("REMOTE_RULE", WireSeverity::Error),
        channel.clone(),
    );

    // An empty filename cannot be made absolute.
    let proto = Proto::new(PathBuf::new());
    let err = rule.apply(&proto).expect_err("apply should fail");
    assert!(err.to_string().contains("REMOTE_RULE"));
    assert!(channel.applied().is_empty(), "no remote call must be issued");
}
