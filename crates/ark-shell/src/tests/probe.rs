use crate::tests::fakes::{HangingTransport, ScriptedTransport};
use crate::{ProbeOutcome, ProbePolicy, ProbeScheme, ProbeTarget, ReadinessProber, ShellError};

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use googletest::assert_that;
use googletest::prelude::{eq, ge, le, ok};
use tokio::time::Instant;
use url::Url;

fn local_target() -> ProbeTarget {
    ProbeTarget::new(ProbeScheme::Http, "127.0.0.1", 3000, "/")
}

fn policy(max_attempts: u32, delay_ms: u64) -> ProbePolicy {
    ProbePolicy {
        max_attempts,
        retry_delay: Duration::from_millis(delay_ms),
        attempt_timeout: None,
    }
}

// =========================================================================
// Target parsing
// =========================================================================

#[test]
fn given_http_url_without_port_when_from_url_then_uses_port_80() {
    let url = Url::parse("http://localhost/cards").unwrap();

    let target = ProbeTarget::from_url(&url).unwrap();

    assert_eq!(target.scheme(), ProbeScheme::Http);
    assert_eq!(target.host(), "localhost");
    assert_eq!(target.port(), 80);
    assert_eq!(target.path(), "/cards");
}

#[test]
fn given_https_url_when_from_url_then_selects_tls_transport_and_port_443() {
    let url = Url::parse("https://companion.example/").unwrap();

    let target = ProbeTarget::from_url(&url).unwrap();

    assert_eq!(target.scheme(), ProbeScheme::Https);
    assert_eq!(target.port(), 443);
    assert_eq!(target.url(), "https://companion.example:443/");
}

#[test]
fn given_query_string_when_from_url_then_probe_uses_path_only() {
    let url = Url::parse("http://127.0.0.1:3000/maps?lang=de#top").unwrap();

    let target = ProbeTarget::from_url(&url).unwrap();

    assert_eq!(target.url(), "http://127.0.0.1:3000/maps");
}

#[test]
fn given_file_url_when_from_url_then_invalid_target() {
    let url = Url::parse("file:///tmp/index.html").unwrap();

    let result = ProbeTarget::from_url(&url);

    assert!(matches!(result, Err(ShellError::InvalidTarget { .. })));
}

// =========================================================================
// Attempt counting
// =========================================================================

#[tokio::test(start_paused = true)]
async fn given_target_ready_on_third_attempt_when_probe_then_exactly_three_calls() {
    // Given
    let transport = ScriptedTransport::ready_on(3, 200);
    let prober = ReadinessProber::new(transport.clone());

    // When
    let outcome = prober.probe(&local_target(), &policy(30, 500)).await;

    // Then
    assert_eq!(
        outcome,
        ProbeOutcome::Ready {
            attempts: 3,
            status: 200
        }
    );
    assert_eq!(transport.calls(), 3);

    // No stray attempts after success
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(transport.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn given_error_status_when_probe_then_still_ready() {
    for status in [404, 500, 503] {
        let transport = ScriptedTransport::ready_on(1, status);
        let prober = ReadinessProber::new(transport.clone());

        let outcome = prober.probe(&local_target(), &policy(5, 100)).await;

        assert_eq!(
            outcome,
            ProbeOutcome::Ready {
                attempts: 1,
                status
            }
        );
        assert_eq!(transport.calls(), 1);
    }
}

#[tokio::test(start_paused = true)]
async fn given_unreachable_target_when_probe_then_exactly_n_attempts() {
    for n in [1, 2, 7] {
        let transport = ScriptedTransport::unreachable();
        let prober = ReadinessProber::new(transport.clone());

        let outcome = prober.probe(&local_target(), &policy(n, 50)).await;

        assert!(!outcome.is_ready());
        assert_eq!(outcome.attempts(), n);
        assert_eq!(transport.calls(), n);
    }
}

#[tokio::test(start_paused = true)]
async fn given_unreachable_target_when_probe_then_exhausted_carries_last_error() {
    let transport = ScriptedTransport::unreachable();
    let prober = ReadinessProber::new(transport);

    let outcome = prober.probe(&local_target(), &policy(4, 10)).await;

    assert_eq!(
        outcome,
        ProbeOutcome::Exhausted {
            attempts: 4,
            last_error: "connection refused (call 4)".into(),
        }
    );
}

#[tokio::test(start_paused = true)]
async fn given_zero_attempts_when_probe_then_makes_one_attempt() {
    let transport = ScriptedTransport::unreachable();
    let prober = ReadinessProber::new(transport.clone());

    let outcome = prober.probe(&local_target(), &policy(0, 10)).await;

    assert_eq!(outcome.attempts(), 1);
    assert_eq!(transport.calls(), 1);
}

// =========================================================================
// Timing (paused clock)
// =========================================================================

#[tokio::test(start_paused = true)]
async fn given_default_policy_and_unreachable_target_when_probe_then_exhausted_after_fourteen_and_a_half_seconds()
 {
    // Given
    let transport = ScriptedTransport::unreachable();
    let prober = ReadinessProber::new(transport.clone());
    let policy = ProbePolicy::default();
    let start = Instant::now();

    // When
    let outcome = prober.probe(&local_target(), &policy).await;

    // Then
    let elapsed = start.elapsed();
    assert!(!outcome.is_ready());
    assert_eq!(transport.calls(), 30);
    assert_that!(elapsed, ge(Duration::from_millis(14_500)));
    assert_that!(elapsed, le(Duration::from_millis(15_000)));
}

#[tokio::test(start_paused = true)]
async fn given_retry_delay_when_probe_then_attempts_are_spaced_by_delay() {
    let transport = ScriptedTransport::unreachable();
    let prober = ReadinessProber::new(transport.clone());

    prober.probe(&local_target(), &policy(5, 250)).await;

    let times = transport.call_times();
    assert_eq!(times.len(), 5);
    for pair in times.windows(2) {
        let gap = pair[1] - pair[0];
        assert_that!(gap, ge(Duration::from_millis(250)));
        assert_that!(gap, le(Duration::from_millis(251)));
    }
}

#[tokio::test(start_paused = true)]
async fn given_zero_delay_when_probe_then_no_time_passes() {
    let transport = ScriptedTransport::unreachable();
    let prober = ReadinessProber::new(transport);
    let start = Instant::now();

    prober.probe(&local_target(), &policy(10, 0)).await;

    assert_that!(start.elapsed(), le(Duration::from_millis(1)));
}

#[tokio::test(start_paused = true)]
async fn given_hanging_transport_when_attempt_timeout_set_then_each_attempt_is_bounded() {
    // Given
    let transport = Arc::new(HangingTransport {
        calls: AtomicU32::new(0),
    });
    let prober = ReadinessProber::new(transport.clone());
    let policy = ProbePolicy {
        max_attempts: 3,
        retry_delay: Duration::from_millis(500),
        attempt_timeout: Some(Duration::from_secs(2)),
    };
    let start = Instant::now();

    // When
    let outcome = prober.probe(&local_target(), &policy).await;

    // Then
    assert_eq!(transport.calls.load(Ordering::SeqCst), 3);
    assert!(matches!(
        outcome,
        ProbeOutcome::Exhausted { attempts: 3, ref last_error } if last_error.contains("2000ms")
    ));
    let worst_case = policy.worst_case().unwrap();
    assert_that!(start.elapsed(), ge(worst_case));
    assert_that!(start.elapsed(), le(worst_case + Duration::from_millis(5)));
}

// =========================================================================
// wait_ready
// =========================================================================

#[tokio::test(start_paused = true)]
async fn given_ready_target_when_wait_ready_then_ok_with_attempts() {
    let transport = ScriptedTransport::ready_on(2, 204);
    let prober = ReadinessProber::new(transport);

    let result = prober.wait_ready(&local_target(), &policy(3, 100)).await;

    assert_that!(result, ok(eq(&2)));
}

#[tokio::test(start_paused = true)]
async fn given_unreachable_target_when_wait_ready_then_readiness_exhausted_error() {
    let transport = ScriptedTransport::unreachable();
    let prober = ReadinessProber::new(transport);

    let result = prober.wait_ready(&local_target(), &policy(3, 100)).await;

    let err = result.unwrap_err();
    assert!(err.is_transient());
    match err {
        ShellError::ReadinessExhausted {
            target, attempts, ..
        } => {
            assert_eq!(target, "http://127.0.0.1:3000/");
            assert_eq!(attempts, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn given_default_policy_when_worst_case_then_includes_timeouts_and_delays() {
    let policy = ProbePolicy::default();

    assert_eq!(policy.total_retry_delay(), Duration::from_millis(14_500));
    assert_eq!(policy.worst_case(), Some(Duration::from_millis(74_500)));
}
