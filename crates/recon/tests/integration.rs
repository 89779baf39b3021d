use ordermatch_recon::config::ReconConfig;
use ordermatch_recon::engine::{inspect_headers, run};
use ordermatch_recon::model::{Advisory, CellValue, MatchState, RawTable, Source};
use ordermatch_recon::ReconError;

fn official_table() -> RawTable {
    RawTable::from_rows(
        &["快手订单编号", "订单状态", "订单商品名称", "商家实收"],
        vec![vec!["A1".into(), "交易成功".into(), "杯子".into(), 100.0.into()]],
    )
}

fn service_table() -> RawTable {
    RawTable::from_rows(
        &["订单号", "商品名称", "金额", "成本"],
        vec![
            vec!["A1".into(), "杯子".into(), 100.0.into(), 40.0.into()],
            vec!["B2".into(), "盘子".into(), 50.0.into(), 60.0.into()],
        ],
    )
}

// -------------------------------------------------------------------------
// End-to-end
// -------------------------------------------------------------------------

#[test]
fn end_to_end_reference_scenario() {
    let official = RawTable::from_rows(
        &["订单号", "订单状态", "金额", "成本"],
        vec![vec!["A1".into(), "交易成功".into(), 100.0.into(), 40.0.into()]],
    );
    let service = service_table();
    let report = run(&ReconConfig::default(), &official, &service).unwrap();

    assert_eq!(report.rows.len(), 2);

    let a1 = &report.rows[0];
    assert_eq!(a1.serial, 1);
    assert_eq!(a1.order_no, "A1");
    assert_eq!(a1.source, Source::Both);
    assert_eq!(a1.matched, MatchState::Matched);
    assert_eq!(a1.profit, 60.0);
    assert!(!a1.is_loss);

    let b2 = &report.rows[1];
    assert_eq!(b2.serial, 2);
    assert_eq!(b2.order_no, "B2");
    assert_eq!(b2.source, Source::ServiceOnly);
    assert_eq!(b2.matched, MatchState::Discrepancy);
    assert_eq!(b2.profit, -10.0);
    assert!(b2.is_loss);
    assert!(b2.is_missing);

    let s = &report.summary;
    assert_eq!(s.compared, 2);
    assert_eq!(s.matched, 1);
    assert_eq!(s.missing, 1);
    assert_eq!(s.total_revenue, 150.0);
    assert_eq!(s.total_cost, 100.0);
    assert_eq!(s.total_profit, 50.0);
    assert_eq!(s.loss_orders, 1);

    // Only the service ledger lacks a status column.
    assert_eq!(
        report.advisories,
        vec![Advisory::StatusColumnMissing { ledger: "客服表".into() }]
    );
}

#[test]
fn default_cost_applies_to_ledger_without_cost_column() {
    let config = ReconConfig { default_cost: 30.0, ..ReconConfig::default() };
    let report = run(&config, &official_table(), &RawTable::default()).unwrap();
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].cost, 30.0);
    assert_eq!(report.rows[0].profit, 70.0);
    assert_eq!(report.rows[0].source, Source::OfficialOnly);
    assert_eq!(report.meta.default_cost, 30.0);
}

#[test]
fn merged_product_names_across_ledgers() {
    let official = RawTable::from_rows(
        &["订单号", "商品名称"],
        vec![vec!["A1".into(), "杯子".into()]],
    );
    let service = RawTable::from_rows(
        &["订单号", "产品名称"],
        vec![vec!["A1".into(), "马克杯".into()]],
    );
    let report = run(&ReconConfig::default(), &official, &service).unwrap();
    assert_eq!(report.rows[0].product_name, "杯子 / 马克杯");
}

#[test]
fn fractional_amounts_keep_profit_equal_to_revenue_minus_cost() {
    let service = RawTable::from_rows(
        &["订单号", "金额", "成本"],
        vec![
            vec!["S1".into(), 0.1.into(), 0.3.into()],
            vec!["S2".into(), 0.2.into(), 0.0.into()],
            vec!["S3".into(), "19.99".into(), "7.37".into()],
            vec!["S4".into(), "¥3.33".into(), 1.11.into()],
        ],
    );
    let report = run(&ReconConfig::default(), &RawTable::default(), &service).unwrap();
    let s = &report.summary;

    assert_eq!(s.total_revenue, 23.62);
    assert_eq!(s.total_cost, 8.78);
    assert_eq!(s.total_profit, s.total_revenue - s.total_cost);
    assert_eq!(format!("{:.2}", s.total_profit), "14.84");
    assert_eq!(s.loss_orders, 1);
}

// -------------------------------------------------------------------------
// Status filtering
// -------------------------------------------------------------------------

#[test]
fn status_filter_drops_cancelled_orders_before_join() {
    let official = RawTable::from_rows(
        &["订单号", "订单状态", "金额"],
        vec![
            vec!["A1".into(), "交易成功".into(), 10.0.into()],
            vec!["A2".into(), "已取消".into(), 20.0.into()],
            vec!["A3".into(), "部分已发货已签收".into(), 30.0.into()],
        ],
    );
    let service = RawTable::from_rows(
        &["订单号", "订单状态", "金额"],
        vec![vec!["A2".into(), "交易成功".into(), 20.0.into()]],
    );
    let report = run(&ReconConfig::default(), &official, &service).unwrap();

    let ids: Vec<&str> = report.rows.iter().map(|r| r.order_no.as_str()).collect();
    assert_eq!(ids, vec!["A1", "A3", "A2"]);
    // A2 was filtered out of the official ledger, so it is service-only.
    assert_eq!(report.rows[2].source, Source::ServiceOnly);
    assert!(report.advisories.is_empty());
    assert_eq!(report.ledgers.official.normalized_rows, 3);
    assert_eq!(report.ledgers.official.filtered_rows, 2);
    assert!(report.ledgers.official.status_filtered);
}

#[test]
fn advisory_emitted_once_per_ledger_without_status() {
    let official = RawTable::from_rows(
        &["订单号", "金额"],
        vec![
            vec!["A1".into(), 1.0.into()],
            vec!["A2".into(), 2.0.into()],
            vec!["A3".into(), 3.0.into()],
        ],
    );
    let service = RawTable::from_rows(&["订单号"], vec![vec!["A1".into()]]);
    let report = run(&ReconConfig::default(), &official, &service).unwrap();

    assert_eq!(report.rows.len(), 3);
    assert_eq!(report.advisories.len(), 2);
    assert!(report
        .advisories
        .contains(&Advisory::StatusColumnMissing { ledger: "官方表".into() }));
    assert!(report
        .advisories
        .contains(&Advisory::StatusColumnMissing { ledger: "客服表".into() }));
}

#[test]
fn custom_keywords_and_aliases_replace_defaults() {
    let config = ReconConfig::from_toml(
        r#"
status_keywords = ["completed"]

[aliases]
order_no = ["order id"]
status = ["status"]
"#,
    )
    .unwrap();
    let official = RawTable::from_rows(
        &["Order ID", "Status"],
        vec![
            vec!["X1".into(), "completed".into()],
            vec!["X2".into(), "交易成功".into()],
        ],
    );
    let report = run(&config, &official, &RawTable::default()).unwrap();
    let ids: Vec<&str> = report.rows.iter().map(|r| r.order_no.as_str()).collect();
    assert_eq!(ids, vec!["X1"]);
}

#[test]
fn configured_ledger_labels_reach_meta_and_advisories() {
    let config = ReconConfig::from_toml(
        r#"
[ledgers]
official = "快手后台"
service = "客服登记"
"#,
    )
    .unwrap();
    let report = run(&config, &official_table(), &service_table()).unwrap();
    assert_eq!(report.meta.official_label, "快手后台");
    assert_eq!(report.meta.service_label, "客服登记");
    assert_eq!(report.ledgers.service.label, "客服登记");
    assert_eq!(
        report.advisories,
        vec![Advisory::StatusColumnMissing { ledger: "客服登记".into() }]
    );
}

// -------------------------------------------------------------------------
// Duplicates + identifiers
// -------------------------------------------------------------------------

#[test]
fn duplicate_identifier_keeps_first_row() {
    let official = RawTable::from_rows(
        &["订单号", "金额"],
        vec![
            vec!["A1".into(), 10.0.into()],
            vec!["A1".into(), 20.0.into()],
        ],
    );
    let report = run(&ReconConfig::default(), &official, &RawTable::default()).unwrap();
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].revenue, 10.0);
    assert_eq!(report.ledgers.official.duplicates_dropped, 1);
    assert_eq!(report.ledgers.official.unique_orders, 1);
}

#[test]
fn identifiers_match_after_trimming_only() {
    let official = RawTable::from_rows(&["订单号"], vec![vec![" A1 ".into()], vec!["a1".into()]]);
    let service = RawTable::from_rows(&["订单号"], vec![vec!["A1".into()]]);
    let report = run(&ReconConfig::default(), &official, &service).unwrap();
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].source, Source::Both);
    assert_eq!(report.rows[1].order_no, "a1");
    assert_eq!(report.rows[1].source, Source::OfficialOnly);
}

#[test]
fn numeric_and_text_identifiers_join() {
    let official = RawTable::from_rows(&["订单号"], vec![vec![CellValue::Number(240001.0)]]);
    let service = RawTable::from_rows(&["订单号"], vec![vec!["240001".into()]]);
    let report = run(&ReconConfig::default(), &official, &service).unwrap();
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].source, Source::Both);
}

// -------------------------------------------------------------------------
// Errors
// -------------------------------------------------------------------------

#[test]
fn missing_identifier_column_names_the_ledger() {
    let service = RawTable::from_rows(&["客户", "金额"], vec![vec!["张三".into(), 5.0.into()]]);
    let err = run(&ReconConfig::default(), &official_table(), &service).unwrap_err();
    match &err {
        ReconError::MissingIdentifierColumn { ledger } => assert_eq!(ledger, "客服表"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("客服表"));
}

#[test]
fn missing_identifier_in_official_aborts_first() {
    let official = RawTable::from_rows(&["客户"], vec![vec!["x".into()]]);
    let service = RawTable::from_rows(&["客户"], vec![vec!["y".into()]]);
    let err = run(&ReconConfig::default(), &official, &service).unwrap_err();
    assert!(matches!(
        err,
        ReconError::MissingIdentifierColumn { ref ledger } if ledger == "官方表"
    ));
}

#[test]
fn empty_ledgers_yield_empty_report() {
    let report = run(&ReconConfig::default(), &RawTable::default(), &RawTable::default()).unwrap();
    assert!(report.rows.is_empty());
    assert_eq!(report.summary.compared, 0);
    assert_eq!(report.summary.total_profit, 0.0);
    assert_eq!(report.advisories.len(), 2);
}

// -------------------------------------------------------------------------
// Header inspection + serialization
// -------------------------------------------------------------------------

#[test]
fn inspect_reports_fuzzy_headers() {
    let headers: Vec<String> = ["订单编号(唯一)", " 交易 状态 ", "实付金额(元)"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let mapping = inspect_headers(&ReconConfig::default(), &headers);
    assert_eq!(mapping.order_no.as_deref(), Some("订单编号(唯一)"));
    assert_eq!(mapping.status.as_deref(), Some(" 交易 状态 "));
    assert_eq!(mapping.revenue.as_deref(), Some("实付金额(元)"));
    assert_eq!(mapping.cost, None);
}

#[test]
fn report_serializes_to_json() {
    let report = run(&ReconConfig::default(), &official_table(), &service_table()).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["summary"]["compared"], 2);
    assert_eq!(json["rows"][0]["source"], "both");
    assert_eq!(json["rows"][1]["matched"], "discrepancy");
    assert_eq!(json["advisories"][0]["kind"], "status_column_missing");
    assert_eq!(json["ledgers"]["official"]["mapping"]["order_no"], "快手订单编号");
    assert_eq!(json["meta"]["official_label"], "官方表");
    assert_eq!(json["meta"]["service_label"], "客服表");
}
