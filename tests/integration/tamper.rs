use crate::fixtures::{test_secret, TestNet, TEST_BORROWER_SEED};
use iou_core::domain::hashes::proposal_hash;
use iou_core::domain::ProtocolOutcome;
use iou_core::foundation::ErrorCode;
use iou_core::infrastructure::config::ProtocolConfig;
use iou_core::infrastructure::transport::{Session, SessionMessage, SessionTransport};
use secp256k1::{Message, Secp256k1};

/// A responder that signs a subtly different proposal than the one it was sent
/// must be caught by the initiator's verification step, never committed.
#[tokio::test]
async fn tampered_counterparty_signature_yields_signature_mismatch() {
    let net = TestNet::new();
    let config = ProtocolConfig::default();
    let transport = net.borrower_transport(&config);
    let borrower_key = net.borrower.key.clone();

    tokio::spawn(async move {
        let mut session = transport.accept_session().await.expect("accept");
        let SessionMessage::SignatureRequest { proposal, .. } = session.receive().await.expect("request") else {
            panic!("expected signature request");
        };

        // Sign an altered copy: value inflated after validation.
        let mut tampered = proposal;
        tampered.produced_outputs[0].value = 5_000;
        let tampered_hash = proposal_hash(&tampered).expect("hash");
        let secp = Secp256k1::new();
        let signature = secp
            .sign_ecdsa(&Message::from_digest(tampered_hash), &test_secret(TEST_BORROWER_SEED))
            .serialize_compact()
            .to_vec();

        session
            .send(SessionMessage::SignatureResponse { signer: borrower_key, signature })
            .await
            .expect("send");
    });

    let (initiator, _store) = net.initiator(config);
    let outcome = initiator.propose_iou(50, &net.borrower.id).await.expect("protocol run");

    let ProtocolOutcome::Rejected { code, .. } = outcome else {
        panic!("expected rejected outcome, got {:?}", outcome);
    };
    assert_eq!(code, ErrorCode::SignatureMismatch);
    assert_eq!(net.ledger.committed_count(), 0);
}

/// A signature from a key other than the borrower's is a mismatch even if it
/// verifies over the right bytes.
#[tokio::test]
async fn signature_from_wrong_key_is_rejected() {
    let net = TestNet::new();
    let config = ProtocolConfig::default();
    let transport = net.borrower_transport(&config);

    tokio::spawn(async move {
        let mut session = transport.accept_session().await.expect("accept");
        let SessionMessage::SignatureRequest { proposal_hash, .. } = session.receive().await.expect("request") else {
            panic!("expected signature request");
        };

        let secp = Secp256k1::new();
        let outsider = test_secret(9);
        let signature = secp
            .sign_ecdsa(&Message::from_digest(proposal_hash), &outsider)
            .serialize_compact()
            .to_vec();
        let outsider_key =
            iou_core::foundation::PublicKeyBytes::from_public_key(&outsider.public_key(&secp));

        session
            .send(SessionMessage::SignatureResponse { signer: outsider_key, signature })
            .await
            .expect("send");
    });

    let (initiator, _store) = net.initiator(config);
    let outcome = initiator.propose_iou(50, &net.borrower.id).await.expect("protocol run");

    let ProtocolOutcome::Rejected { code, .. } = outcome else {
        panic!("expected rejected outcome, got {:?}", outcome);
    };
    assert_eq!(code, ErrorCode::SignatureMismatch);
    assert_eq!(net.ledger.committed_count(), 0);
}
