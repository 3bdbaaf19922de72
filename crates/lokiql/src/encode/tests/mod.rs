
use crate::{
    config::EncoderConfig,
    encode::{CompiledJoin, EncodeContext, FieldOp, QueryEncoder, RawQuery, encode_query},
    error::{EncodeError, QueryFeature},
    obs::{EncodeTraceEvent, EncodeTraceSink, NoopTraceSink},
    query::{
        AssociationInfo, Clause, ColumnName, Comparison, Operator, QueryAssociation,
        QueryDescription, SerializedQuery, SortBy, SortOrder, TableName,
    },
    value::Value,
};
use serde_json::json;
use std::sync::Mutex;

///
/// Helpers
///

fn query(conditions: Vec<Clause>) -> SerializedQuery {
    SerializedQuery::new("tasks", QueryDescription::new(conditions))
}

fn encode_clause(clause: &Clause, associations: &[QueryAssociation]) -> Result<RawQuery, EncodeError> {
    let config = EncoderConfig::default();
    let cx = EncodeContext {
        config: &config,
        associations,
        trace: &NoopTraceSink,
    };

    cx.encode_clause(clause)
}

fn compare(column: &str, operator: Operator, value: impl Into<Value>) -> Clause {
    Clause::where_(column, Comparison::value(operator, value))
}

fn always_true() -> RawQuery {
    RawQuery::always_true(&EncoderConfig::default())
}

///
/// RecordingSink
///

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<String>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl EncodeTraceSink for RecordingSink {
    fn on_event(&self, event: EncodeTraceEvent<'_>) {
        self.events.lock().unwrap().push(event.to_string());
    }
}

///
/// Where
///

#[test]
fn string_eq_compiles_to_strict_equality() {
    let encoded = encode_clause(&Clause::eq("status", "active"), &[]).unwrap();

    assert_eq!(
        encoded,
        RawQuery::field("status", FieldOp::Eq(Value::from("active")))
    );
    assert_eq!(encoded.to_json().unwrap(), json!({ "status": { "$eq": "active" } }));
}

#[test]
fn gt_compiles_without_null_exclusion() {
    let encoded = encode_clause(&compare("score", Operator::Gt, 5), &[]).unwrap();

    assert_eq!(encoded.to_json().unwrap(), json!({ "score": { "$gt": 5 } }));
}

#[test]
fn column_comparison_is_deferred_as_always_true() {
    let clause = Clause::where_("author_id", Comparison::column(Operator::Eq, "id"));

    assert_eq!(encode_clause(&clause, &[]).unwrap(), always_true());
}

#[test]
fn non_string_like_matches_every_record() {
    let encoded = encode_clause(&compare("title", Operator::Like, 3), &[]).unwrap();

    assert!(encoded.is_always_true());
}

#[test]
fn operand_shape_mismatch_fails() {
    let clause = Clause::where_("tag", Comparison::value(Operator::OneOf, "a"));
    let err = encode_clause(&clause, &[]).unwrap_err();

    assert!(matches!(
        err,
        EncodeError::InvalidOperand {
            operator: Operator::OneOf,
            ..
        }
    ));
}

///
/// And / Or
///

#[test]
fn and_wraps_children_in_order() {
    let clause = Clause::and(vec![Clause::eq("a", 1), Clause::eq("b", 2)]);
    let encoded = encode_clause(&clause, &[]).unwrap();

    assert_eq!(
        encoded.to_json().unwrap(),
        json!({ "$and": [{ "a": { "$aeq": 1 } }, { "b": { "$aeq": 2 } }] })
    );
}

#[test]
fn single_child_and_is_unwrapped() {
    let clause = Clause::and(vec![Clause::eq("a", 1)]);

    assert_eq!(
        encode_clause(&clause, &[]).unwrap(),
        RawQuery::field("a", FieldOp::Aeq(Value::Int(1)))
    );
}

#[test]
fn or_wraps_children_and_keeps_nested_and() {
    let clause = Clause::or(vec![
        Clause::eq("a", 1),
        Clause::and(vec![Clause::eq("b", "x"), compare("c", Operator::Lt, 3)]),
    ]);
    let encoded = encode_clause(&clause, &[]).unwrap();

    assert_eq!(
        encoded.to_json().unwrap(),
        json!({
            "$or": [
                { "a": { "$aeq": 1 } },
                { "$and": [
                    { "b": { "$eq": "x" } },
                    { "c": { "$and": [{ "$lt": 3 }, { "$not": { "$aeq": null } }] } },
                ] },
            ],
        })
    );
}

#[test]
fn empty_combinator_is_rejected() {
    let err = encode_clause(&Clause::or(Vec::new()), &[]).unwrap_err();

    assert_eq!(
        err,
        EncodeError::InvalidClause {
            kind: "or".to_string(),
            reason: "conditions must not be empty".to_string(),
        }
    );
}

#[test]
fn raw_passthrough_is_returned_unchanged() {
    let expr = json!({ "$where": "custom" });
    let encoded = encode_clause(&Clause::raw(expr.clone()), &[]).unwrap();

    assert_eq!(encoded, RawQuery::Raw(expr));
}

///
/// Joins
///

#[test]
fn belongs_to_join_maps_identity_to_key() {
    let conditions = vec![Clause::where_(
        "author_id",
        Comparison::column(Operator::Eq, "id"),
    )];
    let clause = Clause::on("authors", conditions.clone());
    let associations = [QueryAssociation::new(
        "authors",
        AssociationInfo::belongs_to("author_id"),
    )];

    let encoded = encode_clause(&clause, &associations).unwrap();

    assert_eq!(
        encoded,
        RawQuery::Join(Box::new(CompiledJoin {
            table: TableName::from("authors"),
            predicate: Some(always_true()),
            original_conditions: conditions,
            map_key: ColumnName::from("id"),
            join_key: ColumnName::from("author_id"),
        }))
    );
}

#[test]
fn has_many_join_maps_foreign_key_to_identity() {
    let clause = Clause::on("comments", vec![Clause::eq("is_spam", false)]);
    let associations = [QueryAssociation::new(
        "comments",
        AssociationInfo::has_many("post_id"),
    )];

    let encoded = encode_clause(&clause, &associations).unwrap();

    assert_eq!(
        encoded.to_json().unwrap(),
        json!({
            "$join": {
                "table": "comments",
                "query": { "is_spam": { "$aeq": false } },
                "originalConditions": [{
                    "type": "where",
                    "left": "is_spam",
                    "comparison": { "operator": "eq", "right": { "value": false } },
                }],
                "mapKey": "post_id",
                "joinKey": "id",
            },
        })
    );
}

#[test]
fn join_with_multiple_conditions_conjoins_them() {
    let clause = Clause::on(
        "comments",
        vec![Clause::eq("is_spam", false), compare("likes", Operator::Gte, 10)],
    );
    let associations = [QueryAssociation::new(
        "comments",
        AssociationInfo::has_many("post_id"),
    )];

    let RawQuery::Join(join) = encode_clause(&clause, &associations).unwrap() else {
        panic!("expected a join");
    };

    assert_eq!(
        join.predicate,
        Some(RawQuery::And(vec![
            RawQuery::field("is_spam", FieldOp::Aeq(Value::Bool(false))),
            RawQuery::field("likes", FieldOp::Gte(Value::Int(10))),
        ]))
    );
}

#[test]
fn join_without_conditions_has_no_predicate() {
    let clause = Clause::on("comments", Vec::new());
    let associations = [QueryAssociation::new(
        "comments",
        AssociationInfo::has_many("post_id"),
    )];

    let encoded = encode_clause(&clause, &associations).unwrap();
    let json = encoded.to_json().unwrap();

    assert!(json["$join"].get("query").is_none());
}

#[test]
fn nested_join_without_association_fails() {
    let clause = Clause::or(vec![
        Clause::eq("a", 1),
        Clause::on("projects", vec![Clause::eq("is_active", true)]),
    ]);

    let err = encode_clause(&clause, &[]).unwrap_err();

    assert_eq!(
        err,
        EncodeError::MissingAssociation {
            table: TableName::from("projects"),
        }
    );
    assert!(err.to_string().contains("Q.experimentalJoinTables"));
}

#[test]
fn duplicate_association_is_ambiguous() {
    let clause = Clause::on("projects", vec![Clause::eq("is_active", true)]);
    let associations = [
        QueryAssociation::new("projects", AssociationInfo::belongs_to("project_id")),
        QueryAssociation::new("projects", AssociationInfo::has_many("task_id")),
    ];

    let err = encode_clause(&clause, &associations).unwrap_err();

    assert_eq!(
        err,
        EncodeError::AmbiguousAssociation {
            table: TableName::from("projects"),
            count: 2,
        }
    );
}

#[test]
fn join_honors_configured_identity_column() {
    let config = EncoderConfig {
        identity_column: ColumnName::from("uuid"),
        ..EncoderConfig::default()
    };
    let associations = [QueryAssociation::new(
        "authors",
        AssociationInfo::belongs_to("author_id"),
    )];
    let cx = EncodeContext {
        config: &config,
        associations: &associations,
        trace: &NoopTraceSink,
    };

    let RawQuery::Join(join) = cx
        .encode_clause(&Clause::on("authors", Vec::new()))
        .unwrap()
    else {
        panic!("expected a join");
    };

    assert_eq!(join.map_key, ColumnName::from("uuid"));
    assert_eq!(join.join_key, ColumnName::from("author_id"));
}

///
/// Root
///

#[test]
fn empty_root_has_no_predicate() {
    let compiled = encode_query(&query(Vec::new())).unwrap();

    assert_eq!(compiled.predicate, None);
    assert!(!compiled.has_joins);
    assert_eq!(
        compiled.to_json().unwrap(),
        json!({ "table": "tasks", "hasJoins": false })
    );
}

#[test]
fn single_root_condition_is_unwrapped() {
    let compiled = encode_query(&query(vec![Clause::eq("a", 1)])).unwrap();

    assert_eq!(
        compiled.predicate,
        Some(RawQuery::field("a", FieldOp::Aeq(Value::Int(1))))
    );
}

#[test]
fn multiple_root_conditions_are_conjoined() {
    let compiled =
        encode_query(&query(vec![Clause::eq("a", 1), Clause::eq("b", "x")])).unwrap();

    assert_eq!(
        compiled.to_json().unwrap(),
        json!({
            "table": "tasks",
            "query": { "$and": [{ "a": { "$aeq": 1 } }, { "b": { "$eq": "x" } }] },
            "hasJoins": false,
        })
    );
}

#[test]
fn root_join_with_declared_table_succeeds() {
    let description = QueryDescription::new(vec![Clause::on(
        "projects",
        vec![Clause::eq("is_active", true)],
    )])
    .with_join_tables([TableName::from("projects")]);
    let query = SerializedQuery::new("tasks", description).with_associations([
        QueryAssociation::new("projects", AssociationInfo::belongs_to("project_id")),
    ]);

    let compiled = encode_query(&query).unwrap();

    assert!(compiled.has_joins);
    assert!(matches!(compiled.predicate, Some(RawQuery::Join(_))));
}

#[test]
fn sort_by_is_rejected() {
    let mut query = query(vec![Clause::eq("a", 1)]);
    query.description.sort_by.push(SortBy {
        sort_column: ColumnName::from("a"),
        sort_order: SortOrder::Asc,
    });

    assert_eq!(
        encode_query(&query).unwrap_err(),
        EncodeError::UnsupportedFeature {
            feature: QueryFeature::SortBy,
        }
    );
}

#[test]
fn take_and_skip_are_rejected() {
    let mut take = query(Vec::new());
    take.description.take = Some(10);
    let mut skip = query(Vec::new());
    skip.description.skip = Some(0);

    assert_eq!(
        encode_query(&take).unwrap_err(),
        EncodeError::UnsupportedFeature {
            feature: QueryFeature::Take,
        }
    );
    assert_eq!(
        encode_query(&skip).unwrap_err(),
        EncodeError::UnsupportedFeature {
            feature: QueryFeature::Skip,
        }
    );
}

#[test]
fn failure_deep_in_tree_fails_whole_encode() {
    let query = query(vec![
        Clause::eq("a", 1),
        Clause::and(vec![
            Clause::eq("b", 2),
            Clause::where_("c", Comparison::value(Operator::Between, 1)),
        ]),
    ]);

    assert!(matches!(
        encode_query(&query),
        Err(EncodeError::InvalidOperand {
            operator: Operator::Between,
            ..
        })
    ));
}

#[test]
fn trace_sink_observes_encode_without_changing_output() {
    let sink = RecordingSink::default();
    let description = QueryDescription::new(vec![
        Clause::eq("a", 1),
        Clause::on(
            "projects",
            vec![Clause::where_(
                "owner_id",
                Comparison::column(Operator::Eq, "user_id"),
            )],
        ),
    ])
    .with_join_tables([TableName::from("projects")]);
    let query = SerializedQuery::new("tasks", description).with_associations([
        QueryAssociation::new("projects", AssociationInfo::belongs_to("project_id")),
    ]);

    let traced = QueryEncoder::default().with_trace(&sink).encode(&query).unwrap();
    let untraced = encode_query(&query).unwrap();

    assert_eq!(traced, untraced);
    assert_eq!(
        sink.events(),
        vec![
            "start table=tasks conditions=2".to_string(),
            "deferred column=owner_id compared_to=user_id".to_string(),
            "join table=projects map_key=id join_key=project_id".to_string(),
            "finish table=tasks predicate=true joins=true".to_string(),
        ]
    );
}
