mod common;

mod tests {
    use crate::common::{
        address, build_app, get, initialize_logging,
        mock_node::{MockNode, NodeCall, raw_utxo},
    };
    use axum::http::StatusCode;
    use insight_platform::{errors::NodeError, node::{RawSummary, SummaryOptions}};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn summary() -> RawSummary {
        RawSummary {
            balance: 150_000_000,
            total_received: 1_000_000_000,
            total_spent: 850_000_000,
            unconfirmed_balance: 20_000,
            unconfirmed_appearances: 1,
            appearances: 7,
            txids: Some(vec!["t1".to_string(), "t2".to_string()]),
        }
    }

    #[tokio::test]
    async fn test_route_addr_summary() {
        initialize_logging();

        let addr = address(1);
        let node = MockNode::new().with_summary(Ok(summary()));
        let app = build_app(&node);

        let (status, body) = get(&app, &format!("/insight-api/addr/{addr}")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "addrStr": addr,
                "balance": 1.5,
                "balanceSat": 150_000_000,
                "totalReceived": 10.0,
                "totalReceivedSat": 1_000_000_000,
                "totalSent": 8.5,
                "totalSentSat": 850_000_000,
                "unconfirmedBalance": 0.0002,
                "unconfirmedBalanceSat": 20_000,
                "unconfirmedTxApperances": 1,
                "txApperances": 7,
                "transactions": ["t1", "t2"]
            })
        );
    }

    #[rstest]
    #[case("", SummaryOptions { no_tx_list: false, from: None, to: None })]
    #[case("?noTxList=1", SummaryOptions { no_tx_list: true, from: None, to: None })]
    #[case("?from=0&to=5", SummaryOptions { no_tx_list: false, from: Some(0), to: Some(5) })]
    #[case("?from=5", SummaryOptions { no_tx_list: false, from: None, to: None })]
    #[tokio::test]
    async fn test_route_addr_summary_options(#[case] query: &str, #[case] expected: SummaryOptions) {
        let addr = address(2);
        let node = MockNode::new();
        let app = build_app(&node);

        let (status, _) = get(&app, &format!("/insight-api/addr/{addr}{query}")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(node.calls(), vec![NodeCall::Summary(addr, expected)]);
    }

    #[rstest]
    #[case("balance", json!(150_000_000))]
    #[case("totalReceived", json!(1_000_000_000))]
    #[case("totalSent", json!(850_000_000))]
    #[case("unconfirmedBalance", json!(20_000))]
    #[tokio::test]
    async fn test_route_addr_amounts(#[case] route: &str, #[case] expected: serde_json::Value) {
        let node = MockNode::new().with_summary(Ok(summary()));
        let app = build_app(&node);

        let (status, body) = get(&app, &format!("/insight-api/addr/{}/{route}", address(3))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, expected);
    }

    #[tokio::test]
    async fn test_route_addr_invalid_address() {
        let node = MockNode::new();
        let app = build_app(&node);

        let (status, body) = get(&app, "/insight-api/addr/not-an-address").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!(1));
        assert_eq!(body["status_code"], json!(400));
        assert!(
            body["message"]
                .as_str()
                .unwrap()
                .starts_with("Invalid address: ")
        );
        assert!(body["message"].as_str().unwrap().ends_with(". Code:1"));
        assert!(node.calls().is_empty());
    }

    #[tokio::test]
    async fn test_route_addr_wrong_network() {
        let mut payload = vec![140u8];
        payload.extend([1u8; 20]);
        let testnet_address = bs58::encode(payload).with_check().into_string();

        let node = MockNode::new();
        let app = build_app(&node);

        let (status, body) = get(&app, &format!("/insight-api/addr/{testnet_address}")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            json!("Invalid address: Address has mismatched network type.. Code:1")
        );
    }

    #[rstest]
    #[case(NodeError::new(-5, "No information available for address"), StatusCode::NOT_FOUND, "No information available for address")]
    #[case(NodeError::new(-8, "Invalid range"), StatusCode::BAD_REQUEST, "Invalid range. Code:-8")]
    #[case(NodeError::transport("Node request failed: connection refused"), StatusCode::SERVICE_UNAVAILABLE, "Node request failed: connection refused")]
    #[tokio::test]
    async fn test_route_addr_node_errors(
        #[case] err: NodeError,
        #[case] expected_status: StatusCode,
        #[case] expected_message: &str,
    ) {
        let node = MockNode::new().with_summary(Err(err));
        let app = build_app(&node);

        let (status, body) = get(&app, &format!("/insight-api/addr/{}", address(4))).await;

        assert_eq!(status, expected_status);
        assert_eq!(body["message"], json!(expected_message));
        assert_eq!(body["status_code"], json!(expected_status.as_u16()));
    }

    #[tokio::test]
    async fn test_route_addr_utxo() {
        let addr = address(5);
        let node = MockNode::new()
            .with_height(Ok(200))
            .with_utxos(Ok(vec![raw_utxo(&addr, "t1", Some(190), 250_000_000)]));
        let app = build_app(&node);

        let (status, body) = get(&app, &format!("/insight-api/addr/{addr}/utxo/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{
                "address": addr,
                "txid": "t1",
                "vout": 0,
                "scriptPubKey": "76a914",
                "amount": 2.5,
                "satoshis": 250_000_000,
                "height": 190,
                "confirmations": 11
            }])
        );
    }

    #[tokio::test]
    async fn test_route_addr_utxo_not_found_is_an_error() {
        let node = MockNode::new().with_utxos(Err(NodeError::new(-5, "No information available")));
        let app = build_app(&node);

        let (status, _) = get(&app, &format!("/insight-api/addr/{}/utxo", address(6))).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
