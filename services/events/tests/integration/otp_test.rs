use chrono::{Duration, Utc};

use ovation_events::domain::types::OTP_LEN;
use ovation_events::error::EventsServiceError;
use ovation_events::usecase::otp::{RequestOtpUseCase, VerifyOtpUseCase};
use ovation_testing::phones::{ADMIN_PHONE, VOTER_PHONE};

use crate::helpers::{MockOtpRepo, MockSms, MockThrottle, test_otp};

fn admin_phones() -> Vec<String> {
    vec![ADMIN_PHONE.to_owned()]
}

// ── Request ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_store_and_send_code() {
    let otps = MockOtpRepo::default();
    let sms = MockSms::default();
    let sent = sms.sent_handle();

    RequestOtpUseCase {
        otps: otps.clone(),
        throttle: MockThrottle::default(),
        sms,
        admin_phones: admin_phones(),
    }
    .execute("+91 99999 99999")
    .await
    .unwrap();

    let stored = otps.otps_handle().lock().unwrap().clone();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].phone, VOTER_PHONE);
    assert_eq!(stored[0].code.len(), OTP_LEN);
    assert!(stored[0].expires_at > Utc::now());

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, VOTER_PHONE);
    assert!(sent[0].1.contains(&stored[0].code));
}

#[tokio::test]
async fn should_rate_limit_second_request_within_cooldown() {
    let sms = MockSms::default();
    let sent = sms.sent_handle();
    let usecase = RequestOtpUseCase {
        otps: MockOtpRepo::default(),
        throttle: MockThrottle::default(),
        sms,
        admin_phones: admin_phones(),
    };

    usecase.execute(VOTER_PHONE).await.unwrap();
    let second = usecase.execute(VOTER_PHONE).await;

    assert!(
        matches!(second, Err(EventsServiceError::RateLimited)),
        "expected RateLimited, got {second:?}"
    );
    assert_eq!(sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_release_cooldown_when_code_cannot_be_stored() {
    let throttle = MockThrottle::default();
    let sms = MockSms::default();
    let sent = sms.sent_handle();

    let failed = RequestOtpUseCase {
        otps: MockOtpRepo::failing(),
        throttle: throttle.clone(),
        sms: sms.clone(),
        admin_phones: admin_phones(),
    }
    .execute(VOTER_PHONE)
    .await;
    assert!(
        matches!(failed, Err(EventsServiceError::Internal(_))),
        "expected Internal, got {failed:?}"
    );
    assert!(sent.lock().unwrap().is_empty());

    RequestOtpUseCase {
        otps: MockOtpRepo::default(),
        throttle,
        sms,
        admin_phones: admin_phones(),
    }
    .execute(VOTER_PHONE)
    .await
    .unwrap();
    assert_eq!(sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_skip_admin_phone_without_sending() {
    let otps = MockOtpRepo::default();
    let sms = MockSms::default();
    let sent = sms.sent_handle();

    RequestOtpUseCase {
        otps: otps.clone(),
        throttle: MockThrottle::default(),
        sms,
        admin_phones: admin_phones(),
    }
    .execute(ADMIN_PHONE)
    .await
    .unwrap();

    assert!(otps.otps_handle().lock().unwrap().is_empty());
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_report_send_failure() {
    let result = RequestOtpUseCase {
        otps: MockOtpRepo::default(),
        throttle: MockThrottle::default(),
        sms: MockSms::failing(),
        admin_phones: admin_phones(),
    }
    .execute(VOTER_PHONE)
    .await;

    assert!(
        matches!(result, Err(EventsServiceError::SendFailed)),
        "expected SendFailed, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_short_phone() {
    let result = RequestOtpUseCase {
        otps: MockOtpRepo::default(),
        throttle: MockThrottle::default(),
        sms: MockSms::default(),
        admin_phones: admin_phones(),
    }
    .execute("555-1234")
    .await;

    assert!(
        matches!(result, Err(EventsServiceError::Validation(_))),
        "expected Validation, got {result:?}"
    );
}

// ── Verify ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_verify_matching_code_once() {
    let otps = MockOtpRepo::new(vec![test_otp(
        VOTER_PHONE,
        "123456",
        Utc::now() + Duration::minutes(5),
    )]);
    let usecase = VerifyOtpUseCase {
        otps,
        admin_phones: admin_phones(),
    };

    usecase.execute(VOTER_PHONE, " 123456 ").await.unwrap();
    let again = usecase.execute(VOTER_PHONE, "123456").await;

    assert!(
        matches!(again, Err(EventsServiceError::InvalidOrExpired)),
        "expected InvalidOrExpired, got {again:?}"
    );
}

#[tokio::test]
async fn should_reject_expired_code() {
    let otps = MockOtpRepo::new(vec![test_otp(
        VOTER_PHONE,
        "123456",
        Utc::now() - Duration::seconds(1),
    )]);

    let result = VerifyOtpUseCase {
        otps,
        admin_phones: admin_phones(),
    }
    .execute(VOTER_PHONE, "123456")
    .await;

    assert!(
        matches!(result, Err(EventsServiceError::InvalidOrExpired)),
        "expected InvalidOrExpired, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_wrong_code() {
    let otps = MockOtpRepo::new(vec![test_otp(
        VOTER_PHONE,
        "123456",
        Utc::now() + Duration::minutes(5),
    )]);

    let result = VerifyOtpUseCase {
        otps,
        admin_phones: admin_phones(),
    }
    .execute(VOTER_PHONE, "654321")
    .await;

    assert!(
        matches!(result, Err(EventsServiceError::InvalidOrExpired)),
        "expected InvalidOrExpired, got {result:?}"
    );
}

#[tokio::test]
async fn should_accept_admin_phone_without_code() {
    VerifyOtpUseCase {
        otps: MockOtpRepo::default(),
        admin_phones: admin_phones(),
    }
    .execute(ADMIN_PHONE, "")
    .await
    .unwrap();
}

#[tokio::test]
async fn should_replace_previous_code_on_new_request() {
    let otps = MockOtpRepo::new(vec![test_otp(
        VOTER_PHONE,
        "111111",
        Utc::now() + Duration::minutes(5),
    )]);

    RequestOtpUseCase {
        otps: otps.clone(),
        throttle: MockThrottle::default(),
        sms: MockSms::default(),
        admin_phones: admin_phones(),
    }
    .execute(VOTER_PHONE)
    .await
    .unwrap();

    let stored = otps.otps_handle().lock().unwrap().clone();
    assert_eq!(stored.len(), 1);
    assert!(!stored[0].verified);
}
