//! Method Tests
//!
//! Numeric coercion methods evaluated inside parsed requests.

use crate::common::*;
use orbisdb::{
    CommandContext, CommandRequest, Error, Expression, MethodNode, MethodRegistry, Parameters,
    Value,
};

#[test]
fn coercions_in_set_clause() {
    let (session, _) = admin_session();
    let text = "CREATE VERTEX Reading SET a = '42'.asInteger(), b = ' 7 '.asLong(), \
                c = '1.5'.asFloat(), d = 3.asDouble()";
    let vertex = extract_record(create_executor().execute(&session, &CommandRequest::new(text)).unwrap());
    assert_eq!(vertex.field("a"), Some(&Value::Integer(42)));
    assert_eq!(vertex.field("b"), Some(&Value::Long(7)));
    assert_eq!(vertex.field("c"), Some(&Value::Float(1.5)));
    assert_eq!(vertex.field("d"), Some(&Value::Double(3.0)));
}

#[test]
fn coercion_of_parameter_and_null() {
    let (session, _) = admin_session();
    let request = CommandRequest::new("CREATE VERTEX SET weight = ?.asFloat(), missing = null.asFloat()")
        .with_parameter("2.25");
    let vertex = extract_record(create_executor().execute(&session, &request).unwrap());
    assert_eq!(vertex.field("weight"), Some(&Value::Float(2.25)));
    assert_eq!(vertex.field("missing"), Some(&Value::Null));
}

#[test]
fn unparsable_text_fails_the_command() {
    let (session, storage) = admin_session();
    let err = create_executor()
        .execute(&session, &CommandRequest::new("CREATE VERTEX SET n = 'abc'.asFloat()"))
        .unwrap_err();
    assert_eq!(
        err,
        Error::Parse {
            input: "abc".into(),
            target: "float".into()
        }
    );
    assert!(storage.is_empty());
}

#[test]
fn unknown_method_is_a_syntax_error() {
    let (session, _) = admin_session();
    let err = create_executor()
        .execute(&session, &CommandRequest::new("CREATE VERTEX SET n = '1'.asDecimal()"))
        .unwrap_err();
    assert!(matches!(err, Error::Syntax { position: Some(_), .. }));
}

#[test]
fn copied_node_evaluates_independently() {
    let registry = MethodRegistry::builtin();
    let function = registry.get("ASFLOAT").unwrap();
    let node = MethodNode::new(function, Expression::Literal(Value::from("0.5")));
    let mut copy = node.copy();
    copy.set_alias(Some("half".into()));

    let ctx = CommandContext::new(Parameters::new());
    assert_eq!(node.evaluate_now(&ctx, None).unwrap(), Value::Float(0.5));
    assert_eq!(copy.evaluate_now(&ctx, None).unwrap(), Value::Float(0.5));
    assert_eq!(node.alias(), None);
    assert_eq!(copy.to_string(), "'0.5'.asFloat() AS half");
}

#[test]
fn deferred_evaluation_runs_once_on_demand() {
    let registry = MethodRegistry::builtin();
    let node = MethodNode::new(
        registry.get("asLong").unwrap(),
        Expression::Literal(Value::Double(9.9)),
    );
    let ctx = CommandContext::new(Parameters::new());
    let deferred = node.defer(&ctx, None);
    assert!(!deferred.is_evaluated());
    assert_eq!(deferred.get().unwrap(), &Value::Long(9));
    assert!(deferred.is_evaluated());
}
