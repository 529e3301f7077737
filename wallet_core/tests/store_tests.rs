//! Wallet store commands against the nullable backend.

use std::sync::Arc;

use dompet_gateway::Gateway;
use dompet_nullables::{NullHttp, NullTokenStore};
use dompet_transport::{Channel, CredentialVault, Method, TransportError};
use dompet_types::{Balance, Credential, OperationStatus, ProfileImage, TopUpAmount};
use dompet_wallet_core::{Operation, StoreOptions, WalletError, WalletStore};
use serde_json::{json, Value};

struct Harness {
    http: Arc<NullHttp>,
    vault: Arc<CredentialVault>,
    store: WalletStore,
}

fn harness_with(options: StoreOptions) -> Harness {
    let http = Arc::new(NullHttp::new());
    let tokens = Arc::new(NullTokenStore::with_token("tok"));
    let vault = Arc::new(CredentialVault::open(tokens).unwrap());
    let gateway = Gateway::new(Channel::new(http.clone(), vault.clone()));
    Harness {
        http,
        vault,
        store: WalletStore::new(gateway, options),
    }
}

fn harness() -> Harness {
    harness_with(StoreOptions::default())
}

fn profile(first: &str) -> Value {
    json!({
        "email": "user@nutech-integrasi.com",
        "first_name": first,
        "last_name": "Nutech",
        "profile_image": "https://minio.nutech-integrasi.com/take-home-test/null"
    })
}

fn records(prefix: &str, n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            json!({
                "invoice_number": format!("{prefix}{i}"),
                "transaction_type": "PAYMENT",
                "description": "Prabayar PLN",
                "total_amount": 10000,
                "created_on": "2023-08-17T10:10:10.885Z"
            })
        })
        .collect()
}

fn history(offset: u64, limit: u64, records: Vec<Value>) -> Value {
    json!({ "offset": offset, "limit": limit, "records": records })
}

fn receipt() -> Value {
    json!({
        "invoice_number": "INV17082023-001",
        "service_code": "PLN",
        "service_name": "Listrik",
        "transaction_type": "PAYMENT",
        "total_amount": 10000,
        "created_on": "2023-08-17T10:10:10.885Z"
    })
}

// ---------------------------------------------------------------------------
// Balance-affecting commands
// ---------------------------------------------------------------------------

#[tokio::test]
async fn top_up_adopts_server_balance() {
    let h = harness();
    h.http.respond_ok(Method::Get, "/balance", json!({ "balance": 100000 }));
    h.http.respond_ok(Method::Post, "/topup", json!({ "balance": 149000 }));

    h.store.fetch_balance().await.unwrap();
    let balance = h.store.top_up(TopUpAmount::new(50000).unwrap()).await.unwrap();

    // Not 100000 + 50000: the server's figure wins.
    assert_eq!(balance, Balance::new(149000));
    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.balance, Some(Balance::new(149000)));
    assert_eq!(snapshot.status(Operation::TopUp), &OperationStatus::Fulfilled(()));
    assert_eq!(snapshot.message.as_deref(), Some("Top up succeeded"));
    assert!(!snapshot.is_error);
}

#[tokio::test]
async fn payment_refreshes_balance_exactly_once() {
    let h = harness();
    h.http.respond_ok(Method::Post, "/transaction", receipt());
    h.http.respond_ok(Method::Get, "/balance", json!({ "balance": 90000 }));

    let outcome = h.store.make_transaction("PLN").await.unwrap();

    assert_eq!(outcome.balance, Balance::new(90000));
    assert_eq!(outcome.receipt.invoice_number, "INV17082023-001");
    assert_eq!(h.http.count(Method::Get, "/balance"), 1);

    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.balance, Some(Balance::new(90000)));
    assert_eq!(snapshot.last_payment, Some(outcome));
    assert_eq!(snapshot.message.as_deref(), Some("Payment succeeded"));
}

#[tokio::test]
async fn failed_payment_skips_refresh_and_keeps_balance() {
    let h = harness();
    h.http.respond_ok(Method::Get, "/balance", json!({ "balance": 5000 }));
    h.store.fetch_balance().await.unwrap();
    h.http
        .respond_error(Method::Post, "/transaction", 400, "Saldo tidak mencukupi");

    let err = h.store.make_transaction("PLN").await.unwrap_err();

    assert_eq!(err.message(), "Saldo tidak mencukupi");
    assert_eq!(h.http.count(Method::Get, "/balance"), 1);
    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.balance, Some(Balance::new(5000)));
    assert_eq!(
        snapshot.status(Operation::Transaction),
        &OperationStatus::Rejected("Saldo tidak mencukupi".into())
    );
    assert_eq!(snapshot.last_payment, None);
}

#[tokio::test]
async fn refresh_failure_after_payment_rejects_without_balance_change() {
    let h = harness();
    h.http.respond_ok(Method::Get, "/balance", json!({ "balance": 5000 }));
    h.store.fetch_balance().await.unwrap();
    h.http.respond_ok(Method::Post, "/transaction", receipt());
    h.http.fail(
        Method::Get,
        "/balance",
        TransportError::Network("connection reset".into()),
    );

    let err = h.store.make_transaction("PLN").await.unwrap_err();

    assert_eq!(err.message(), "Payment failed");
    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.balance, Some(Balance::new(5000)));
    assert!(snapshot.status(Operation::Transaction).is_rejected());
}

// ---------------------------------------------------------------------------
// Stale-while-revalidate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rejected_refresh_keeps_cached_profile() {
    let h = harness();
    h.http.respond_ok(Method::Get, "/profile", profile("User"));
    h.store.fetch_profile().await.unwrap();
    h.http.fail(
        Method::Get,
        "/profile",
        TransportError::Network("offline".into()),
    );

    let err = h.store.fetch_profile().await.unwrap_err();

    assert!(matches!(
        err,
        WalletError::Rejected {
            operation: Operation::Profile,
            ..
        }
    ));
    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.profile.unwrap().first_name, "User");
    assert!(snapshot.is_error);
    assert_eq!(snapshot.message.as_deref(), Some("Failed to load profile"));
}

#[tokio::test]
async fn pending_refresh_keeps_cached_balance_visible() {
    let h = harness();
    h.http.respond_ok(Method::Get, "/balance", json!({ "balance": 1000 }));
    h.store.fetch_balance().await.unwrap();
    let slow = h.http.defer(Method::Get, "/balance");

    let (result, ()) = tokio::join!(h.store.fetch_balance(), async {
        let snapshot = h.store.snapshot();
        assert!(snapshot.is_loading());
        assert!(snapshot.status(Operation::Balance).is_pending());
        assert_eq!(snapshot.balance, Some(Balance::new(1000)));
        slow.ok(json!({ "balance": 2000 }));
    });

    assert_eq!(result.unwrap(), Balance::new(2000));
    assert!(!h.store.snapshot().is_loading());
}

#[tokio::test]
async fn unauthorized_response_clears_credential() {
    let h = harness();
    h.http
        .respond_error(Method::Get, "/balance", 401, "Token tidak valid atau kadaluwarsa");

    let err = h.store.fetch_balance().await.unwrap_err();

    assert!(err.transport().unwrap().is_unauthorized());
    assert!(h.vault.current().is_none());
    assert_eq!(
        h.store.snapshot().message.as_deref(),
        Some("Token tidak valid atau kadaluwarsa")
    );
}

// ---------------------------------------------------------------------------
// Out-of-order responses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stale_response_does_not_overwrite_newer_balance() {
    let h = harness();
    let slow = h.http.defer(Method::Get, "/balance");
    h.http.respond_ok(Method::Get, "/balance", json!({ "balance": 2000 }));

    let (first, ()) = tokio::join!(h.store.fetch_balance(), async {
        h.store.fetch_balance().await.unwrap();
        slow.ok(json!({ "balance": 1000 }));
    });

    // The late response still settles its own call.
    assert_eq!(first.unwrap(), Balance::new(1000));
    assert_eq!(h.store.snapshot().balance, Some(Balance::new(2000)));
}

#[tokio::test]
async fn disabled_guard_lets_last_response_win() {
    let h = harness_with(StoreOptions {
        discard_stale_responses: false,
    });
    let slow = h.http.defer(Method::Get, "/balance");
    h.http.respond_ok(Method::Get, "/balance", json!({ "balance": 2000 }));

    let (first, ()) = tokio::join!(h.store.fetch_balance(), async {
        h.store.fetch_balance().await.unwrap();
        slow.ok(json!({ "balance": 1000 }));
    });

    first.unwrap();
    assert_eq!(h.store.snapshot().balance, Some(Balance::new(1000)));
}

#[tokio::test]
async fn clear_ignores_in_flight_responses() {
    let h = harness();
    let slow = h.http.defer(Method::Get, "/profile");

    let (result, ()) = tokio::join!(h.store.fetch_profile(), async {
        h.store.clear();
        slow.ok(profile("Late"));
    });

    assert!(result.is_ok());
    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.profile, None);
    assert!(snapshot.status(Operation::Profile).is_idle());
}

#[tokio::test]
async fn top_up_balance_survives_a_later_fetch_settling_first() {
    let h = harness();
    let top_up = h.http.defer(Method::Post, "/topup");
    h.http.respond_ok(Method::Get, "/balance", json!({ "balance": 100000 }));

    let (result, ()) = tokio::join!(h.store.top_up(TopUpAmount::new(50000).unwrap()), async {
        h.store.fetch_balance().await.unwrap();
        top_up.ok(json!({ "balance": 150000 }));
    });

    assert_eq!(result.unwrap(), Balance::new(150000));
    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.balance, Some(Balance::new(150000)));
    assert!(snapshot.status(Operation::TopUp).is_fulfilled());
}

#[tokio::test]
async fn fetch_dispatched_before_top_up_cannot_undo_it() {
    let h = harness();
    let fetch = h.http.defer(Method::Get, "/balance");
    h.http.respond_ok(Method::Post, "/topup", json!({ "balance": 150000 }));

    let (result, ()) = tokio::join!(h.store.fetch_balance(), async {
        h.store.top_up(TopUpAmount::new(50000).unwrap()).await.unwrap();
        fetch.ok(json!({ "balance": 100000 }));
    });

    result.unwrap();
    assert_eq!(h.store.snapshot().balance, Some(Balance::new(150000)));
}

#[tokio::test]
async fn profile_update_survives_a_later_fetch_settling_first() {
    let h = harness();
    let update = h.http.defer(Method::Put, "/profile/update");
    h.http.respond_ok(Method::Get, "/profile", profile("Before"));

    let (result, ()) = tokio::join!(h.store.update_profile("After", "Nutech"), async {
        h.store.fetch_profile().await.unwrap();
        update.ok(profile("After"));
    });

    result.unwrap();
    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.profile.unwrap().first_name, "After");
    assert_eq!(snapshot.message.as_deref(), Some("Profile updated"));
}

#[tokio::test]
async fn fetch_dispatched_before_profile_update_cannot_undo_it() {
    let h = harness();
    let fetch = h.http.defer(Method::Get, "/profile");
    h.http.respond_ok(Method::Put, "/profile/update", profile("After"));

    let (result, ()) = tokio::join!(h.store.fetch_profile(), async {
        h.store.update_profile("After", "Nutech").await.unwrap();
        fetch.ok(profile("Before"));
    });

    result.unwrap();
    assert_eq!(h.store.snapshot().profile.unwrap().first_name, "After");
}

#[tokio::test]
async fn forced_sign_out_drops_cached_data() {
    let h = harness();
    h.http.respond_ok(Method::Get, "/balance", json!({ "balance": 777000 }));
    h.http
        .respond_error(Method::Get, "/profile", 401, "Token tidak valid atau kadaluwarsa");
    h.store.fetch_balance().await.unwrap();

    h.store.fetch_profile().await.unwrap_err();

    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.balance, None);
    assert!(snapshot.ledger.is_empty());
    assert!(snapshot.status(Operation::Profile).is_rejected());
    assert!(snapshot.is_error);
}

#[tokio::test]
async fn unauthorized_for_superseded_token_keeps_cache() {
    let h = harness();
    let slow = h.http.defer(Method::Get, "/profile");
    h.http.respond_ok(Method::Get, "/balance", json!({ "balance": 5000 }));

    let (result, ()) = tokio::join!(h.store.fetch_profile(), async {
        h.vault.replace(Credential::new("fresh")).unwrap();
        h.store.fetch_balance().await.unwrap();
        slow.error(401, "Token tidak valid atau kadaluwarsa");
    });

    assert!(result.unwrap_err().transport().unwrap().is_unauthorized());
    assert!(h.vault.is_authenticated());
    assert_eq!(h.store.snapshot().balance, Some(Balance::new(5000)));
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

#[tokio::test]
async fn five_then_three_accumulates_eight() {
    let h = harness();
    h.http.respond_ok(Method::Get, "/transaction/history", history(0, 5, records("A", 5)));
    h.http.respond_ok(Method::Get, "/transaction/history", history(5, 5, records("B", 3)));

    h.store.fetch_history_page(0, 5).await.unwrap();
    let cursor = h.store.snapshot().ledger.cursor();
    assert_eq!(cursor.offset, 5);
    assert!(cursor.has_more);

    h.store.fetch_history_page(5, 5).await.unwrap();
    let ledger = h.store.snapshot().ledger;
    assert_eq!(ledger.len(), 8);
    assert_eq!(ledger.offset(), 8);
    assert!(!ledger.has_more());

    let sent = h.http.requests_to(Method::Get, "/transaction/history");
    assert_eq!(sent[1].query_param("offset"), Some("5"));
    assert_eq!(sent[1].query_param("limit"), Some("5"));
}

#[tokio::test]
async fn first_page_after_reset_has_no_residue() {
    let h = harness();
    h.http.respond_ok(Method::Get, "/transaction/history", history(0, 5, records("OLD", 5)));
    h.http.respond_ok(Method::Get, "/transaction/history", history(5, 5, records("OLD-", 5)));
    h.http.respond_ok(Method::Get, "/transaction/history", history(0, 5, records("NEW", 2)));

    h.store.fetch_history_page(0, 5).await.unwrap();
    h.store.fetch_history_page(5, 5).await.unwrap();
    let page = h.store.load_first_page(5).await.unwrap();

    let ledger = h.store.snapshot().ledger;
    assert_eq!(ledger.records(), page.records.as_slice());
    assert_eq!(ledger.len(), 2);
    assert!(!ledger.has_more());
}

#[tokio::test]
async fn reset_ledger_rewinds_cursor() {
    let h = harness();
    h.http.respond_ok(Method::Get, "/transaction/history", history(0, 5, records("A", 3)));
    h.store.fetch_history_page(0, 5).await.unwrap();

    h.store.reset_ledger();

    let ledger = h.store.snapshot().ledger;
    assert!(ledger.is_empty());
    assert_eq!(ledger.offset(), 0);
    assert!(ledger.has_more());
}

#[tokio::test]
async fn zero_limit_is_rejected_without_network() {
    let h = harness();

    let err = h.store.fetch_history_page(0, 0).await.unwrap_err();

    assert_eq!(err, WalletError::InvalidPageSize);
    assert!(h.http.requests().is_empty());
    assert!(h.store.snapshot().status(Operation::History).is_rejected());
}

#[tokio::test]
async fn next_page_follows_cursor_until_short_page() {
    let h = harness();
    h.http.respond_ok(Method::Get, "/transaction/history", history(0, 2, records("A", 2)));
    h.http.respond_ok(Method::Get, "/transaction/history", history(2, 2, records("B", 1)));

    h.store.load_first_page(2).await.unwrap();
    assert!(h.store.load_next_page(2).await.unwrap());
    assert!(!h.store.load_next_page(2).await.unwrap());

    assert_eq!(h.http.count(Method::Get, "/transaction/history"), 2);
    assert_eq!(h.store.snapshot().ledger.len(), 3);
}

#[tokio::test]
async fn next_page_is_not_dispatched_while_a_page_is_pending() {
    let h = harness();
    let slow = h.http.defer(Method::Get, "/transaction/history");

    let (first, ()) = tokio::join!(h.store.load_first_page(5), async {
        assert!(!h.store.load_next_page(5).await.unwrap());
        slow.ok(history(0, 5, records("A", 5)));
    });

    first.unwrap();
    assert_eq!(h.http.count(Method::Get, "/transaction/history"), 1);
    assert_eq!(h.store.snapshot().ledger.len(), 5);
}

#[tokio::test]
async fn failed_page_keeps_accumulated_records() {
    let h = harness();
    h.http.respond_ok(Method::Get, "/transaction/history", history(0, 5, records("A", 5)));
    h.http.fail(
        Method::Get,
        "/transaction/history",
        TransportError::Network("offline".into()),
    );

    h.store.fetch_history_page(0, 5).await.unwrap();
    h.store.fetch_history_page(5, 5).await.unwrap_err();

    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.ledger.len(), 5);
    assert_eq!(snapshot.ledger.offset(), 5);
    assert_eq!(
        snapshot.message.as_deref(),
        Some("Failed to load transaction history")
    );
}

// ---------------------------------------------------------------------------
// Home, profile edits, acknowledgment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_home_fills_every_slot() {
    let h = harness();
    h.http.respond_ok(Method::Get, "/profile", profile("User"));
    h.http.respond_ok(Method::Get, "/balance", json!({ "balance": 0 }));
    h.http.respond_ok(
        Method::Get,
        "/services",
        json!([{ "service_code": "PLN", "service_name": "Listrik", "service_icon": "https://x/pln.png", "service_tariff": 10000 }]),
    );
    h.http.respond_ok(
        Method::Get,
        "/banner",
        json!([{ "banner_name": "Banner 1", "banner_image": "https://x/b1.png", "description": "Lorem" }]),
    );

    h.store.load_home().await.unwrap();

    let snapshot = h.store.snapshot();
    assert!(snapshot.profile.is_some());
    assert_eq!(snapshot.balance, Some(Balance::ZERO));
    assert_eq!(snapshot.service("PLN").unwrap().service_tariff, 10000);
    assert_eq!(snapshot.banners.len(), 1);
    assert!(!snapshot.is_loading());
}

#[tokio::test]
async fn load_home_failure_does_not_block_other_slots() {
    let h = harness();
    h.http.respond_ok(Method::Get, "/profile", profile("User"));
    h.http.respond_ok(Method::Get, "/balance", json!({ "balance": 7 }));
    h.http.respond_error(Method::Get, "/services", 500, "Internal error");
    h.http.respond_ok(Method::Get, "/banner", json!([]));

    let err = h.store.load_home().await.unwrap_err();

    assert_eq!(err.message(), "Internal error");
    let snapshot = h.store.snapshot();
    assert!(snapshot.status(Operation::Profile).is_fulfilled());
    assert!(snapshot.status(Operation::Services).is_rejected());
    assert!(snapshot.status(Operation::Banners).is_fulfilled());
    assert_eq!(snapshot.balance, Some(Balance::new(7)));
}

#[tokio::test]
async fn profile_edits_replace_cached_profile() {
    let h = harness();
    h.http.respond_ok(Method::Put, "/profile/update", profile("Edited"));
    h.http.respond_ok(Method::Put, "/profile/image", profile("Edited"));

    h.store.update_profile("Edited", "Nutech").await.unwrap();
    assert_eq!(h.store.snapshot().message.as_deref(), Some("Profile updated"));

    let png = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0];
    let image = ProfileImage::new("me.png", png.to_vec()).unwrap();
    h.store.upload_image(&image).await.unwrap();

    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.profile.unwrap().first_name, "Edited");
    assert_eq!(snapshot.message.as_deref(), Some("Profile image updated"));
}

#[tokio::test]
async fn reset_operation_status_acknowledges_everything() {
    let h = harness();
    h.http.respond_error(Method::Post, "/topup", 400, "Parameter amount hanya boleh angka");
    h.store.top_up(TopUpAmount::new(1).unwrap()).await.unwrap_err();
    assert!(h.store.snapshot().is_error);

    h.store.reset_operation_status();

    let snapshot = h.store.snapshot();
    assert!(snapshot.status(Operation::TopUp).is_idle());
    assert!(!snapshot.is_error);
    assert_eq!(snapshot.message, None);
}

#[tokio::test]
async fn reset_operation_touches_one_family() {
    let h = harness();
    h.http.fail(Method::Get, "/banner", TransportError::Network("x".into()));
    h.http.fail(Method::Get, "/services", TransportError::Network("x".into()));
    h.store.fetch_banners().await.unwrap_err();
    h.store.fetch_services().await.unwrap_err();

    h.store.reset_operation(Operation::Banners);

    let snapshot = h.store.snapshot();
    assert!(snapshot.status(Operation::Banners).is_idle());
    assert!(snapshot.status(Operation::Services).is_rejected());
}

#[tokio::test]
async fn subscribers_see_every_transition() {
    let h = harness();
    let mut rx = h.store.subscribe();
    h.http.respond_ok(Method::Get, "/balance", json!({ "balance": 42 }));

    h.store.fetch_balance().await.unwrap();

    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().balance, Some(Balance::new(42)));
}
