use crate::fixtures::TestNet;
use iou_core::foundation::{ErrorCode, IouError};
use iou_core::infrastructure::config::ProtocolConfig;
use iou_core::infrastructure::transport::mock::MockTransport;
use iou_core::infrastructure::transport::{Session, SessionMessage, SessionTransport};
use std::sync::Arc;

fn rejection(reason: &str) -> SessionMessage {
    SessionMessage::Rejection { code: ErrorCode::Message, reason: reason.to_string(), rejecting_party: "bob".into() }
}

#[tokio::test]
async fn messages_arrive_in_send_order() {
    let net = TestNet::new();
    let config = ProtocolConfig::default();
    let borrower_end = net.borrower_transport(&config);
    let lender_end = Arc::new(MockTransport::new(net.hub.clone(), net.lender.id.clone(), config.session_buffer));

    let mut outbound = lender_end.open_session(&net.borrower.id).await.expect("open");
    outbound.send(rejection("one")).await.expect("send one");
    outbound.send(rejection("two")).await.expect("send two");

    let mut inbound = borrower_end.accept_session().await.expect("accept");
    assert_eq!(inbound.counterparty(), &net.lender.id);
    assert_eq!(inbound.receive().await.expect("first"), rejection("one"));
    assert_eq!(inbound.receive().await.expect("second"), rejection("two"));
}

#[tokio::test]
async fn opening_a_session_to_an_unregistered_party_fails() {
    let net = TestNet::new();
    let config = ProtocolConfig::default();
    let lender_end = Arc::new(MockTransport::new(net.hub.clone(), net.lender.id.clone(), config.session_buffer));

    let err = lender_end.open_session(&"nobody".into()).await.expect_err("no such party");
    assert!(matches!(err, IouError::Transport(_)));
}

#[tokio::test]
async fn dropped_counterparty_surfaces_as_transport_failure() {
    let net = TestNet::new();
    let config = ProtocolConfig::default();
    let borrower_end = net.borrower_transport(&config);
    let lender_end = Arc::new(MockTransport::new(net.hub.clone(), net.lender.id.clone(), config.session_buffer));

    let outbound = lender_end.open_session(&net.borrower.id).await.expect("open");
    let mut inbound = borrower_end.accept_session().await.expect("accept");
    drop(outbound);

    let err = inbound.receive().await.expect_err("closed session");
    assert!(matches!(err, IouError::Transport(_)));
}
