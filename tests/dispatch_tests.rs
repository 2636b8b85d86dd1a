//! End-to-end dispatch tests against a local mock of the e-Stat endpoints.
//!
//! The mock echoes what it received (method, operation, raw query, content
//! type, body) inside a document shaped like an e-Stat response, so each test
//! can check exactly what went over the wire.

use axum::{
    extract::{Path, RawQuery},
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use estat::{
    Axis, Config, DataSelector, EstatError, GetDataCatalogParams, GetMetaInfoParams,
    GetStatsDataParams, GetStatsListParams, Lang, Narrowing, Options, Param, PostDatasetParams,
    RefDatasetParams,
};
use serde_json::{json, Value};

fn app() -> Router {
    Router::new().route("/rest/3.0/app/json/{operation}", any(echo))
}

async fn echo(
    method: Method,
    Path(operation): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: String,
) -> Response {
    match operation.as_str() {
        "fail" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        "html" => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        _ => {
            let root = format!("ECHO_{}", operation);
            let content_type = headers
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());
            let mut document = serde_json::Map::new();
            document.insert(
                root,
                json!({
                    "RESULT": {"STATUS": 0, "ERROR_MSG": "ok"},
                    "REQUEST": {
                        "method": method.as_str(),
                        "operation": operation,
                        "query": query,
                        "content_type": content_type,
                        "body": body,
                    },
                    "DATALIST_INF": {"RESULT_INF": {"NEXT_KEY": 11}}
                }),
            );
            Json(Value::Object(document)).into_response()
        }
    }
}

/// Start the mock on a random port in a background thread and return its
/// endpoint URL.
fn start_mock_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            axum::serve(listener, app()).await
        })
        .unwrap();
    });

    format!("http://{addr}/rest/")
}

fn config(endpoint: &str) -> Config {
    Config::resolve(
        Options::new()
            .with_app_id("test-app")
            .with_endpoint(endpoint)
            .with_debug(true),
        |_| None,
    )
    .unwrap()
}

fn request_of(response: &estat::Response) -> &Value {
    let root = response.root_key().unwrap();
    &response.raw()[root]["REQUEST"]
}

#[cfg(feature = "blocking")]
mod blocking {
    use super::*;
    use estat::Client;

    fn client() -> Client {
        Client::with_config(config(&start_mock_server())).unwrap()
    }

    #[test]
    fn get_stats_list_sends_limit_field_after_configured_limit() {
        let client = client();
        let params = GetStatsListParams {
            limit: Some(1),
            lang: Some(Lang::English),
            ..Default::default()
        };
        let response = client.get_stats_list(&params).unwrap();

        assert_eq!(response.root_key(), Some("ECHO_getStatsList"));
        let request = request_of(&response);
        assert_eq!(request["method"], "GET");
        assert_eq!(request["query"], "appId=test-app&limit=10&lang=E&limit=1");
        assert_eq!(request["content_type"], Value::Null);
        assert_eq!(response.status(), Some(0));
        assert_eq!(response.next_key(), Some(11));
    }

    #[test]
    fn get_meta_info_uses_configured_limit() {
        let client = client();
        let response = client
            .get_meta_info(&GetMetaInfoParams::new("0003001568"))
            .unwrap();
        let request = request_of(&response);
        assert_eq!(request["operation"], "getMetaInfo");
        assert_eq!(
            request["query"],
            "appId=test-app&limit=10&statsDataId=0003001568"
        );
    }

    #[test]
    fn get_stats_data_with_narrowings() {
        let client = client();
        let params = GetStatsDataParams::data_set("my-dataset")
            .narrow(Axis::Area, Narrowing::code("13000,14000"));
        let response = client.get_stats_data(&params).unwrap();
        let request = request_of(&response);
        assert_eq!(request["operation"], "getStatsData");
        assert_eq!(
            request["query"],
            "appId=test-app&limit=10&dataSetId=my-dataset&cdArea=13000%2C14000"
        );
    }

    #[test]
    fn post_dataset_is_form_post_with_fixed_limit() {
        let client = client();
        let mut params = PostDatasetParams::new(DataSelector::StatsDataId("0003001568".into()));
        params.data_set_name = Some("population".to_string());
        let response = client.post_dataset(&params).unwrap();
        let request = request_of(&response);
        assert_eq!(request["method"], "POST");
        assert_eq!(request["content_type"], "application/x-www-form-urlencoded");
        assert_eq!(
            request["query"],
            "appId=test-app&limit=1000&statsDataId=0003001568&dataSetName=population"
        );
        assert_eq!(request["body"], "");
    }

    #[test]
    fn ref_dataset_and_catalog() {
        let client = client();
        let response = client.ref_dataset(&RefDatasetParams::default()).unwrap();
        assert_eq!(request_of(&response)["query"], "appId=test-app&limit=10");

        let params = GetDataCatalogParams {
            data_type: Some("CSV,XLS".to_string()),
            start_position: Some(101),
            ..Default::default()
        };
        let response = client.get_data_catalog(&params).unwrap();
        assert_eq!(
            request_of(&response)["query"],
            "appId=test-app&limit=10&dataType=CSV%2CXLS&startPosition=101"
        );
    }

    #[test]
    fn response_is_passed_through_unmodified() {
        let client = client();
        let response = client.ref_dataset(&RefDatasetParams::default()).unwrap();
        let raw = response.into_inner();
        assert_eq!(raw["ECHO_refDataset"]["RESULT"]["ERROR_MSG"], "ok");
        assert_eq!(raw.as_object().unwrap().len(), 1);
    }

    #[test]
    fn call_raw_sends_every_defined_field() {
        let client = client();
        let mut params = Param::new();
        params.insert("limit".to_string(), json!(1));
        params.insert("statsCode".to_string(), json!("00200521"));
        let response = client
            .call_raw("getStatsList", estat::Method::Get, &params)
            .unwrap();
        assert_eq!(
            request_of(&response)["query"],
            "appId=test-app&limit=10&limit=1&statsCode=00200521"
        );
    }

    #[test]
    fn non_2xx_status_is_an_error() {
        let client = client();
        let err = client
            .call_raw("fail", estat::Method::Get, &Param::new())
            .unwrap_err();
        match err {
            EstatError::Http { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected EstatError::Http, got {:?}", other),
        }
    }

    #[test]
    fn non_json_body_is_an_error() {
        let client = client();
        let err = client
            .call_raw("html", estat::Method::Get, &Param::new())
            .unwrap_err();
        assert!(matches!(err, EstatError::Json(_)), "got {:?}", err);
    }

    #[test]
    fn unreachable_endpoint_is_a_transport_error() {
        // Bind then drop to get a port nothing listens on
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = Client::with_config(config(&format!("http://127.0.0.1:{port}/rest/"))).unwrap();
        let err = client.ref_dataset(&RefDatasetParams::default()).unwrap_err();
        assert!(matches!(err, EstatError::Reqwest(_)), "got {:?}", err);
    }

    #[test]
    fn clients_do_not_share_configuration() {
        let endpoint = start_mock_server();
        let first = Client::new(
            Options::new().with_app_id("first").with_endpoint(endpoint.clone()),
        )
        .unwrap();
        let second = Client::new(
            Options::new().with_app_id("second").with_endpoint(endpoint),
        )
        .unwrap();
        assert_eq!(first.config().app_id(), "first");
        assert_eq!(second.config().app_id(), "second");

        let response = second.ref_dataset(&RefDatasetParams::default()).unwrap();
        assert_eq!(request_of(&response)["query"], "appId=second&limit=10");
        let response = first.ref_dataset(&RefDatasetParams::default()).unwrap();
        assert_eq!(request_of(&response)["query"], "appId=first&limit=10");
    }
}

#[cfg(feature = "async")]
mod nonblocking {
    use super::*;
    use estat::AsyncClient;

    async fn client() -> AsyncClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app()).await });
        AsyncClient::with_config(config(&format!("http://{addr}/rest/"))).unwrap()
    }

    #[tokio::test]
    async fn get_stats_data_round_trip() {
        let client = client().await;
        let response = client
            .get_stats_data(&GetStatsDataParams::stats_data("0003001568"))
            .await
            .unwrap();
        let request = request_of(&response);
        assert_eq!(request["method"], "GET");
        assert_eq!(
            request["query"],
            "appId=test-app&limit=10&statsDataId=0003001568"
        );
    }

    #[tokio::test]
    async fn post_dataset_round_trip() {
        let client = client().await;
        let params = PostDatasetParams::new(DataSelector::DataSetId("ds".into()));
        let response = client.post_dataset(&params).await.unwrap();
        let request = request_of(&response);
        assert_eq!(request["method"], "POST");
        assert_eq!(request["content_type"], "application/x-www-form-urlencoded");
        assert_eq!(request["query"], "appId=test-app&limit=1000&dataSetId=ds");
    }

    #[tokio::test]
    async fn concurrent_calls_share_one_client() {
        let client = client().await;
        let list = GetStatsListParams::default();
        let catalog = GetDataCatalogParams::default();
        let (a, b) = tokio::join!(client.get_stats_list(&list), client.get_data_catalog(&catalog));
        assert_eq!(a.unwrap().root_key(), Some("ECHO_getStatsList"));
        assert_eq!(b.unwrap().root_key(), Some("ECHO_getDataCatalog"));
    }

    #[tokio::test]
    async fn error_status_propagates() {
        let client = client().await;
        let err = client
            .call_raw("fail", estat::Method::Post, &Param::new())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(500));
    }
}
