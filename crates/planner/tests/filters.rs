use expression_engine::{CompileError, StructuralError, compile};
use model::{FilterExpr, LookupError, LookupKind, Term};
use planner::{
    Condition, ConditionBuilder, FilterPlan, ModelRegistry, ModelSchema, PlannerError,
    query::{MySql, Postgres},
};
use serde_json::{Value as JsonValue, json};
use tracing_test::traced_test;

const REGISTRY: &str = r#"{
    "models": [
        {
            "app": "helpdesk",
            "name": "ticket",
            "table": "helpdesk_ticket",
            "fields": [
                "status", "priority", "-",
                "title|summary", "assignee__name",
                "closed_at", "created_date", "escalated", "hours"
            ],
            "relations": [
                {"name": "assignee", "table": "auth_user", "local_key": "assignee_id"}
            ]
        }
    ]
}"#;

fn tickets() -> Vec<JsonValue> {
    vec![
        json!({"id": 1, "status": "open", "priority": "high", "title": "Printer on fire",
               "summary": "", "assignee": {"name": "Ada"}, "closed_at": null,
               "created_date": "2024-01-05", "escalated": true, "hours": 4}),
        json!({"id": 2, "status": "open", "priority": "low", "title": "Draft: new laptop",
               "summary": "needs budget", "assignee": {"name": "Linus"}, "closed_at": null,
               "created_date": "2024-02-10", "escalated": false, "hours": 1.5}),
        json!({"id": 3, "status": "closed", "priority": "high", "title": "VPN down",
               "summary": "draft postmortem", "assignee": null, "closed_at": "2024-03-01",
               "created_date": "2024-02-28", "escalated": false, "hours": 12}),
        json!({"id": 4, "status": "pending", "priority": "medium", "title": "Password reset",
               "summary": "", "assignee": {"name": "Ada"}, "closed_at": null,
               "created_date": "2023-12-24", "escalated": false, "hours": 0.25}),
    ]
}

fn ids(condition: &Condition) -> Vec<i64> {
    condition
        .filter(&tickets())
        .into_iter()
        .filter_map(|t| t["id"].as_i64())
        .collect()
}

fn run(terms: &[Term]) -> Vec<i64> {
    let condition = compile(&ConditionBuilder::new(), terms).unwrap();
    ids(&condition)
}

fn eq(field: &str, value: &str) -> Term {
    Term::atomic(field, LookupKind::Equals, Some(value))
}

#[test]
fn empty_filter_selects_everything() {
    assert_eq!(run(&[]), vec![1, 2, 3, 4]);
}

#[test]
fn implicit_and_between_adjacent_terms() {
    assert_eq!(run(&[eq("status", "open"), eq("priority", "high")]), vec![1]);
}

#[test]
fn and_binds_tighter_than_or() {
    // status=closed OR (status=open AND priority=low)
    let terms = [
        eq("status", "closed"),
        Term::or(),
        eq("status", "open"),
        Term::and(),
        eq("priority", "low"),
    ];
    assert_eq!(run(&terms), vec![2, 3]);
}

#[test]
fn parentheses_regroup() {
    // (status=closed OR status=open) AND priority=high
    let terms = [
        Term::open(),
        eq("status", "closed"),
        Term::or(),
        eq("status", "open"),
        Term::close(),
        eq("priority", "high"),
    ];
    assert_eq!(run(&terms), vec![1, 3]);
}

#[test]
fn negated_multi_field_term_excludes_any_match() {
    let terms = [Term::negated("title|summary", LookupKind::Contains, Some("draft"))];
    assert_eq!(run(&terms), vec![1, 4]);
}

#[test]
fn empty_groups_and_doubled_operators_are_neutral() {
    let terms = [
        eq("status", "open"),
        Term::and(),
        Term::and(),
        Term::open(),
        Term::close(),
        Term::or(),
    ];
    // status=open AND TRUE AND TRUE OR TRUE
    assert_eq!(run(&terms), vec![1, 2, 3, 4]);

    let terms = [Term::open(), Term::close(), eq("status", "pending")];
    assert_eq!(run(&terms), vec![4]);
}

#[test]
fn value_lookups_cover_dates_numbers_and_flags() {
    assert_eq!(
        run(&[Term::atomic("created_date", LookupKind::DateRange, Some("01/02/2024, 29/02/2024"))]),
        vec![2, 3]
    );
    assert_eq!(run(&[Term::atomic("created_date", LookupKind::Year, Some("2023"))]), vec![4]);
    assert_eq!(run(&[Term::atomic("hours", LookupKind::Gte, Some("4"))]), vec![1, 3]);
    assert_eq!(run(&[Term::atomic("closed_at", LookupKind::IsNotNull, None)]), vec![3]);
    assert_eq!(run(&[Term::atomic("escalated", LookupKind::IsTrue, None)]), vec![1]);
    assert_eq!(
        run(&[Term::atomic("priority", LookupKind::In, Some("medium, low"))]),
        vec![2, 4]
    );
    assert_eq!(
        run(&[Term::atomic("assignee__name", LookupKind::StartsWith, Some("a"))]),
        vec![1, 4]
    );
}

#[test]
fn ordering_on_text_fields_compares_text() {
    // "medium" sorts after "m".
    assert_eq!(run(&[Term::atomic("priority", LookupKind::Lt, Some("m"))]), vec![1, 2, 3]);
    assert_eq!(run(&[Term::atomic("title", LookupKind::Gte, Some("P"))]), vec![1, 3, 4]);
}

#[test]
fn unbalanced_filters_fail_before_matching() {
    let err = compile(&ConditionBuilder::new(), &[Term::open(), eq("status", "open")]).unwrap_err();
    assert!(matches!(
        err,
        CompileError::Structural(StructuralError::UnclosedOpen { depth: 1 })
    ));
}

#[test]
fn plan_renders_sql_for_saved_filter() {
    let registry = ModelRegistry::from_json(REGISTRY).unwrap();
    let filter = FilterExpr::from_json(
        r#"{
            "name": "Ada's open work",
            "model": "helpdesk.Ticket",
            "terms": [
                {"fields": ["assignee__name"], "lookup": "=", "value": "Ada", "order": 0},
                {"operator": "&", "order": 1},
                {"operator": "!", "fields": ["status"], "lookup": "in", "value": "closed,pending", "order": 2}
            ],
            "columns": [{"field": "title", "order": 1}, {"field": "id", "order": 0}],
            "sort_orders": [{"field": "-created_date"}]
        }"#,
    )
    .unwrap();

    let plan = FilterPlan::build(&registry, &filter).unwrap();
    assert_eq!(plan.model, "helpdesk.Ticket");
    assert_eq!(
        plan.condition.to_string(),
        "assignee__name == 'Ada' AND NOT(status__in == ['closed', 'pending'])"
    );
    assert_eq!(ids(&plan.condition), vec![1]);

    let rendered = plan.render(&Postgres);
    assert_eq!(
        rendered.sql,
        concat!(
            r#"SELECT "helpdesk_ticket"."id", "helpdesk_ticket"."title" FROM "helpdesk_ticket" "#,
            r#"LEFT JOIN "auth_user" AS "assignee" ON "helpdesk_ticket"."assignee_id" = "assignee"."id" "#,
            r#"WHERE ("assignee"."name" = $1 AND NOT ("helpdesk_ticket"."status" IN ($2, $3))) "#,
            r#"ORDER BY "helpdesk_ticket"."created_date" DESC"#
        )
    );
    assert_eq!(rendered.params.len(), 3);

    let rendered = plan.render(&MySql);
    assert!(rendered.sql.contains(
        "WHERE (`assignee`.`name` = ? AND NOT (`helpdesk_ticket`.`status` IN (?, ?)))"
    ));
    assert_eq!(rendered.dialect, "MySQL");
}

#[test]
fn plan_rejects_fields_outside_the_schema() {
    let registry = ModelRegistry::from_json(REGISTRY).unwrap();
    let filter = FilterExpr::new("bad", "helpdesk.ticket").with_terms(vec![eq("password", "x")]);

    match FilterPlan::build(&registry, &filter).unwrap_err() {
        PlannerError::Compile(CompileError::Lookup { position, source }) => {
            assert_eq!(position, 0);
            assert_eq!(
                source,
                LookupError::UnknownField {
                    model: "helpdesk.Ticket".into(),
                    field: "password".into()
                }
            );
        }
        other => panic!("expected a lookup error, got {other:?}"),
    }
}

#[test]
fn plan_qualifies_base_columns_when_joined() {
    let registry = ModelRegistry::from_json(REGISTRY).unwrap();
    let filter = FilterExpr::from_json(
        r#"{
            "name": "by assignee",
            "model": "helpdesk.ticket",
            "terms": [{"fields": ["assignee__name"], "lookup": "=", "value": "Ada"}],
            "columns": [{"field": "id"}],
            "sort_orders": [{"field": "-id"}]
        }"#,
    )
    .unwrap();

    let sql = FilterPlan::build(&registry, &filter).unwrap().render(&Postgres).sql;
    assert_eq!(
        sql,
        concat!(
            r#"SELECT "helpdesk_ticket"."id" FROM "helpdesk_ticket" "#,
            r#"LEFT JOIN "auth_user" AS "assignee" ON "helpdesk_ticket"."assignee_id" = "assignee"."id" "#,
            r#"WHERE "assignee"."name" = $1 ORDER BY "helpdesk_ticket"."id" DESC"#
        )
    );
}

#[test]
fn plan_rejects_paths_without_a_relation() {
    let mut registry = ModelRegistry::new();
    registry
        .register(
            ModelSchema::new("shop", "order", "shop_order").with_fields(&["status", "customer__name"]),
        )
        .unwrap();
    let filter = FilterExpr::new("x", "shop.Order").with_terms(vec![eq("customer__name", "Ada")]);

    match FilterPlan::build(&registry, &filter).unwrap_err() {
        PlannerError::MissingRelation { model, path } => {
            assert_eq!(model, "shop.Order");
            assert_eq!(path, "customer__name");
        }
        other => panic!("expected a missing relation, got {other:?}"),
    }

    let unjoined = FilterExpr::new("y", "shop.Order").with_terms(vec![eq("status", "paid")]);
    assert!(FilterPlan::build(&registry, &unjoined).is_ok());
}

#[test]
fn plan_rejects_unknown_models() {
    let registry = ModelRegistry::from_json(REGISTRY).unwrap();
    let err = FilterPlan::build(&registry, &FilterExpr::new("x", "shop.Order")).unwrap_err();
    assert!(matches!(err, PlannerError::UnknownModel(_)));
}

#[test]
#[traced_test]
fn planning_is_logged() {
    let registry = ModelRegistry::from_json(REGISTRY).unwrap();
    let filter = FilterExpr::new("all", "helpdesk.Ticket");
    let plan = FilterPlan::build(&registry, &filter).unwrap();
    assert_eq!(plan.condition, Condition::True);
    assert_eq!(
        plan.render(&Postgres).sql,
        r#"SELECT "helpdesk_ticket".* FROM "helpdesk_ticket""#
    );
    assert!(logs_contain("Planned 'all' on helpdesk.Ticket with 0 join(s)"));
}
