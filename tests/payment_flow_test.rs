//! End-to-end flow over the public API: initialize a charge, receive the
//! signed webhook, dispatch it, and verify the transaction — all against a
//! scripted transport.

use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use paystack_client::{
    ApiRequest, EventDispatcher, PaystackClient, PaystackConfig, PaystackError, RawResponse,
    Transport, WebhookHandler,
};
use serde_json::json;

/// Shared handle into a [`ScriptedTransport`]: the test keeps one clone to
/// queue responses and inspect requests after the transport moves into the
/// client.
#[derive(Clone, Default)]
struct Script {
    responses: Arc<Mutex<VecDeque<RawResponse>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl Script {
    fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push_response(RawResponse {
            status,
            body: body.to_string().into_bytes(),
            headers: vec![],
        });
    }

    fn push_response(&self, response: RawResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    fn request(&self, index: usize) -> ApiRequest {
        self.requests.lock().unwrap()[index].clone()
    }
}

struct ScriptedTransport {
    script: Script,
}

impl Transport for ScriptedTransport {
    async fn execute<'a>(
        &'a self,
        request: &'a ApiRequest,
    ) -> paystack_client::Result<RawResponse> {
        self.script.requests.lock().unwrap().push(request.clone());
        self.script
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| PaystackError::Config("script exhausted".to_owned()))
    }
}

fn scripted_client() -> (PaystackClient<ScriptedTransport>, Script) {
    let script = Script::default();
    let client = PaystackClient::with_transport(
        PaystackConfig::new("sk_test_integration"),
        ScriptedTransport { script: script.clone() },
    )
    .unwrap();
    (client, script)
}

#[tokio::test]
async fn charge_webhook_verify_round_trip() {
    let reference = "PS_1700000000_order42";
    let (client, script) = scripted_client();
    script.push_json(
        200,
        json!({
            "status": true,
            "message": "Authorization URL created",
            "data": {
                "authorization_url": "https://checkout.paystack.com/abc",
                "reference": reference
            }
        }),
    );
    script.push_json(
        200,
        json!({
            "status": true,
            "message": "Verification successful",
            "data": { "reference": reference, "status": "success", "amount": 10050 }
        }),
    );

    // 1. Initialize: 100.50 NGN goes out as 10050 kobo.
    let init = client
        .transactions()
        .initialize(json!({
            "email": "customer@example.com",
            "amount": 100.50,
            "reference": reference
        }))
        .await
        .unwrap();
    assert_eq!(init.data["authorization_url"], "https://checkout.paystack.com/abc");

    let outbound = script.request(0);
    assert_eq!(outbound.path, "/transaction/initialize");
    assert_eq!(outbound.body.unwrap()["amount"], json!(10050));

    // 2. Paystack delivers the signed charge.success webhook.
    let webhook_body = json!({
        "event": "charge.success",
        "data": { "reference": reference, "amount": 10050, "currency": "NGN" }
    })
    .to_string();
    let handler = WebhookHandler::new("sk_test_integration").unwrap();
    let signature = handler.sign(webhook_body.as_bytes());

    let payload = handler.parse(webhook_body.as_bytes(), Some(&signature)).unwrap();
    assert!(payload.is_event("charge.success"));

    let fulfilled = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&fulfilled);
    let dispatcher = EventDispatcher::new().on("charge.success", move |payload| {
        assert_eq!(payload.data["reference"], "PS_1700000000_order42");
        seen.fetch_add(1, Ordering::SeqCst);
    });
    assert!(dispatcher.dispatch(&payload));
    assert_eq!(fulfilled.load(Ordering::SeqCst), 1);

    // 3. Confirm server-side before fulfilment.
    let verified = client.transactions().verify(reference).await.unwrap();
    assert_eq!(verified.data["status"], "success");
    assert_eq!(verified.data["amount"], json!(10050));
}

#[tokio::test]
async fn tampered_webhook_never_reaches_handlers() {
    let handler = WebhookHandler::new("sk_test_integration").unwrap();
    let body = json!({ "event": "charge.success", "data": { "amount": 10050 } }).to_string();
    let signature = handler.sign(body.as_bytes());

    let tampered = body.replace("10050", "99999");
    let err = handler.parse(tampered.as_bytes(), Some(&signature)).unwrap_err();
    assert!(matches!(err, PaystackError::InvalidWebhookSignature));
}

#[tokio::test]
async fn rate_limited_call_reports_retry_guidance() {
    let (client, script) = scripted_client();
    script.push_response(RawResponse {
        status: 429,
        body: json!({ "status": false, "message": "Too many requests" })
            .to_string()
            .into_bytes(),
        headers: vec![
            ("Retry-After".to_owned(), "90".to_owned()),
            ("x-ratelimit-remaining".to_owned(), "0".to_owned()),
        ],
    });

    let err = client.transactions().verify("PS_x").await.unwrap_err();
    assert!(err.should_retry());
    assert_eq!(err.user_message(), "Rate limit exceeded. Please try again in 2 minute(s).");
}

#[tokio::test]
async fn reference_data_is_served_from_cache() {
    let (client, script) = scripted_client();
    script.push_json(
        200,
        json!({ "status": true, "message": "Banks retrieved", "data": [{ "code": "058" }] }),
    );

    let first = client.miscellaneous().list_banks(json!({ "country": "nigeria" })).await.unwrap();
    let second = client.miscellaneous().list_banks(json!({ "country": "nigeria" })).await.unwrap();

    assert_eq!(first.data, second.data);
    assert_eq!(script.requests.lock().unwrap().len(), 1);
}
