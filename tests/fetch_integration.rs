use std::net::SocketAddr;

use axum::extract::Json;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use suiscan::client::{FetchError, SuiDataFetcher};
use suiscan::config::{Config, Credentials};
use suiscan::executor::ExecutorError;

const GOOD_TOKEN: &str = "test-token";
const TX_BASE_MS: i64 = 1_700_000_000_000;

#[tokio::test]
async fn recent_transactions_match_window_scenario() {
    let (fetcher, handle) = spawn_fetcher(GOOD_TOKEN).await;

    let txns = fetcher.recent_transactions(7.0, 20).await.unwrap();
    assert_eq!(txns.len(), 20);

    let successful = txns.iter().filter(|t| t.success == Some(true)).count();
    let failed = txns.iter().filter(|t| t.success == Some(false)).count();
    assert_eq!(successful, 15);
    assert_eq!(failed, 5);

    for pair in txns.windows(2) {
        assert!(pair[0].timestamp_ms >= pair[1].timestamp_ms);
    }
    // decoded timestamp mirrors the raw column
    assert_eq!(txns[0].timestamp.timestamp_millis(), txns[0].timestamp_ms);

    handle.abort();
}

#[tokio::test]
async fn transaction_rows_respect_limit() {
    let (fetcher, handle) = spawn_fetcher(GOOD_TOKEN).await;
    let txns = fetcher.recent_transactions(7.0, 5).await.unwrap();
    assert_eq!(txns.len(), 5);
    handle.abort();
}

#[tokio::test]
async fn identical_calls_return_identical_tables() {
    let (fetcher, handle) = spawn_fetcher(GOOD_TOKEN).await;
    let a = fetcher.recent_transactions(7.0, 20).await.unwrap();
    let b = fetcher.recent_transactions(7.0, 20).await.unwrap();
    assert_eq!(a, b);
    handle.abort();
}

#[tokio::test]
async fn single_address_balance_converts_to_sui() {
    let (fetcher, handle) = spawn_fetcher(GOOD_TOKEN).await;
    let addrs = vec!["0xabc".to_string()];
    let rows = fetcher.wallet_balances(Some(&addrs), 50).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].owner, "0xabc");
    assert_eq!(rows[0].balance_raw, 5_000_000_000);
    assert_eq!(rows[0].balance_sui, 5.0);

    handle.abort();
}

#[tokio::test]
async fn top_balances_exclude_other_coin_types() {
    let (fetcher, handle) = spawn_fetcher(GOOD_TOKEN).await;
    let rows = fetcher.wallet_balances(None, 50).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.coin_type == "0x2::sui::SUI"));
    assert!(rows[0].balance_raw >= rows[1].balance_raw);

    handle.abort();
}

#[tokio::test]
async fn summary_handles_zero_transaction_day() {
    let (fetcher, handle) = spawn_fetcher(GOOD_TOKEN).await;
    let days = fetcher.transaction_summary(7.0).await.unwrap();

    assert_eq!(days.len(), 2);
    assert!((days[0].success_rate_pct.unwrap() - 75.0).abs() < 1e-9);
    assert_eq!(days[1].transaction_count, 0);
    assert_eq!(days[1].success_rate_pct, None);
    assert!(days[0].date > days[1].date);

    handle.abort();
}

#[tokio::test]
async fn auth_failure_surfaces_verbatim() {
    let (fetcher, handle) = spawn_fetcher("wrong-token").await;
    let err = fetcher.recent_transactions(7.0, 20).await.unwrap_err();
    match err {
        FetchError::Executor(ExecutorError::AuthRejected { status, message }) => {
            assert_eq!(status, 401);
            assert!(message.contains("token"));
        }
        other => panic!("expected auth rejection, got {other:?}"),
    }
    handle.abort();
}

#[tokio::test]
async fn unknown_table_is_a_query_rejection() {
    let (fetcher, handle) = spawn_fetcher_with_dataset(GOOD_TOKEN, "no.such.dataset").await;
    let err = fetcher.recent_transactions(7.0, 20).await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::Executor(ExecutorError::QueryRejected { status: 400, .. })
    ));
    handle.abort();
}

async fn spawn_fetcher(token: &str) -> (SuiDataFetcher, JoinHandle<()>) {
    spawn_fetcher_with_dataset(token, "ds.test").await
}

async fn spawn_fetcher_with_dataset(
    token: &str,
    dataset: &str,
) -> (SuiDataFetcher, JoinHandle<()>) {
    let app = Router::new().route("/query", post(query_handler));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let server = axum::serve(listener, app);
    let handle = tokio::spawn(async move {
        let _ = server.await;
    });

    let config = Config {
        query_url: format!("http://{}", addr),
        dataset_id: dataset.to_string(),
        credentials: Credentials {
            token: token.to_string(),
            project_id: None,
        },
    };
    (SuiDataFetcher::new(&config).unwrap(), handle)
}

/// Mock of the remote tabular query service with a small fixed dataset.
async fn query_handler(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {GOOD_TOKEN}"))
        .unwrap_or(false);
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "invalid or missing token").into_response();
    }

    let sql = body["query"].as_str().unwrap_or_default().to_string();
    let params = &body["parameters"];

    if !sql.contains("`ds.test.") {
        return (StatusCode::BAD_REQUEST, "table not found").into_response();
    }

    if sql.contains(".transactions`") && sql.contains("GROUP BY") {
        Json(summary_result()).into_response()
    } else if sql.contains(".transactions`") {
        let limit = param_i64(params, "row_limit").unwrap_or(100) as usize;
        Json(transactions_result(limit)).into_response()
    } else if sql.contains(".objects`") {
        Json(balances_result(params)).into_response()
    } else {
        (StatusCode::BAD_REQUEST, "unrecognized query shape").into_response()
    }
}

fn param_i64(params: &Value, name: &str) -> Option<i64> {
    params
        .as_array()?
        .iter()
        .find(|p| p["name"] == name)?["value"]
        .as_i64()
}

fn param_strings(params: &Value, name: &str) -> Option<Vec<String>> {
    let values = params
        .as_array()?
        .iter()
        .find(|p| p["name"] == name)?["value"]
        .as_array()?
        .iter()
        .filter_map(|v| v.as_str().map(String::from))
        .collect();
    Some(values)
}

fn transactions_result(limit: usize) -> Value {
    // 20 transactions, newest first; every fourth one failed (15 ok / 5 not).
    let rows: Vec<Value> = (0..20.min(limit))
        .map(|i| {
            let failed = i % 4 == 3;
            json!([
                format!("digest{i}"),
                TX_BASE_MS - (i as i64) * 1000,
                format!("0xsender{}", i % 6),
                format!("{}", 500_000 + i * 400_000),
                "1000",
                !failed,
                if failed { "FAILURE" } else { "SUCCESS" },
                9000 + i,
            ])
        })
        .collect();

    json!({
        "schema": {"columns": [
            {"name": "transaction_digest", "type": "STRING"},
            {"name": "timestamp_ms", "type": "INT64"},
            {"name": "sender", "type": "STRING"},
            {"name": "gas_used", "type": "STRING"},
            {"name": "gas_price", "type": "STRING"},
            {"name": "success", "type": "BOOL"},
            {"name": "effects_status", "type": "STRING"},
            {"name": "checkpoint_sequence_number", "type": "INT64"},
        ]},
        "rows": rows
    })
}

fn balances_result(params: &Value) -> Value {
    let all = [
        ("0xabc", "0x2::sui::SUI", "5000000000", "0xobj1"),
        ("0xdef", "0x2::sui::SUI", "1500000000", "0xobj2"),
        ("0x999", "0xother::coin::X", "7000000000", "0xobj3"),
    ];

    let rows: Vec<Value> = match param_strings(params, "addresses") {
        Some(addrs) => all
            .iter()
            .filter(|(owner, ..)| addrs.iter().any(|a| a == owner))
            .map(row_json)
            .collect(),
        None => all
            .iter()
            .filter(|(_, coin, ..)| *coin == "0x2::sui::SUI")
            .map(row_json)
            .collect(),
    };

    json!({
        "schema": {"columns": [
            {"name": "owner", "type": "STRING"},
            {"name": "coin_type", "type": "STRING"},
            {"name": "balance", "type": "STRING"},
            {"name": "object_id", "type": "STRING"},
        ]},
        "rows": rows
    })
}

fn row_json(row: &(&str, &str, &str, &str)) -> Value {
    json!([row.0, row.1, row.2, row.3])
}

fn summary_result() -> Value {
    json!({
        "schema": {"columns": [
            {"name": "date", "type": "DATE"},
            {"name": "transaction_count", "type": "INT64"},
            {"name": "unique_senders", "type": "INT64"},
            {"name": "avg_gas_used", "type": "FLOAT64"},
            {"name": "successful_txns", "type": "INT64"},
            {"name": "failed_txns", "type": "INT64"},
        ]},
        "rows": [
            ["2026-08-20", 200, 50, 123456.5, 150, 50],
            ["2026-08-19", 0, 0, 0.0, 0, 0],
        ]
    })
}
