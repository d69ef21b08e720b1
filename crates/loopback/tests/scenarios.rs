//! End-to-end loopback scenarios: button events, sampler ticks, drain and
//! playback driven through the public API only.
// Integration test file: expect/unwrap/panic are intentional test mechanisms.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::indexing_slicing
)]
//!
//! Run with: cargo test -p loopback --test scenarios

use embassy_time::Instant;
use loopback::{
    DrainRestartPolicy, IgnoreReason, Loopback, LoopbackConfig, LoopbackError, PlaybackPosition,
    Player, RecordEvent, RecordingState, RecordingStateMachine, Sampler, Transition,
};
use platform::audio_types::AdcResolution;
use platform::config::BUFFER_LEN;
use platform::mocks::{MockAdc, MockPwm, MockTimer};
use platform::{SampleTimer, TimerError};

/// ADC whose raw codes equal the stored samples: 1, 2, …, 64, 1, 2, …
fn ramp_adc() -> MockAdc {
    let mut script = heapless::Vec::new();
    for code in 1..=64u16 {
        script.push(code).unwrap();
    }
    MockAdc::with_script(script).with_resolution(AdcResolution::new(8).unwrap())
}

fn ramp_value(tick: usize) -> u8 {
    (tick % 64 + 1) as u8
}

fn t(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

/// Run the player until it reports completion, collecting every level.
fn drain_player<const N: usize>(player: &mut Player<'_, MockPwm, N>, lb: &Loopback<N>) -> Vec<u16> {
    let mut levels = Vec::with_capacity(N * 8);
    while lb.playback_pending() {
        levels.push(player.on_wrap());
        assert!(levels.len() <= N * 8, "player never finished");
    }
    levels
}

#[test]
fn short_recording_replays_in_order_then_idles() {
    let lb: Loopback<BUFFER_LEN> = Loopback::new();
    let mut sm = RecordingStateMachine::new(&lb, MockTimer::new(), LoopbackConfig::default());
    let mut sampler = Sampler::new(&lb, ramp_adc());
    let mut player = Player::new(&lb, MockPwm::default());
    player.arm();

    assert_eq!(
        sm.handle(RecordEvent::StartRecording, t(0)).unwrap(),
        Transition::RecordingStarted
    );
    for _ in 0..1_500 {
        sampler.on_tick();
    }
    assert_eq!(
        sm.handle(RecordEvent::StopRecording, t(136)).unwrap(),
        Transition::DrainStarted
    );
    // The sampler keeps capturing through the drain.
    for _ in 0..500 {
        sampler.on_tick();
    }
    assert_eq!(sm.poll(t(635)), None);
    assert_eq!(sm.poll(t(636)), Some(Transition::PlaybackStarted));

    // Ticks already pending after the timer was disarmed store nothing.
    assert_eq!(sampler.on_tick(), None);

    let view: Vec<u8> = lb.recorded().collect();
    assert_eq!(view.len(), BUFFER_LEN);
    assert!(view[..BUFFER_LEN - 2_000].iter().all(|&s| s == 0));
    for (k, &s) in view[BUFFER_LEN - 2_000..].iter().enumerate() {
        assert_eq!(s, ramp_value(k), "chronological slot {k}");
    }

    let levels = drain_player(&mut player, &lb);
    assert_eq!(levels.len(), BUFFER_LEN * 8);
    for k in 0..2_000 {
        let expected = u16::from(ramp_value(k));
        assert!(
            levels[k * 8..k * 8 + 8].iter().all(|&l| l == expected),
            "sample {k} not held for 8 wraps"
        );
    }
    assert!(levels[2_000 * 8..].iter().all(|&l| l == 0));

    assert_eq!(sm.poll(t(5_000)), Some(Transition::PlaybackFinished));
    assert_eq!(sm.state(), RecordingState::Idle);
}

#[test]
fn playback_emits_exactly_8n_minus_1_levels() {
    const N: usize = 16;
    let lb: Loopback<N> = Loopback::new();
    let mut sm = RecordingStateMachine::new(&lb, MockTimer::new(), LoopbackConfig::default());
    let mut sampler = Sampler::new(&lb, ramp_adc());
    let mut player = Player::new(&lb, MockPwm::default());

    sm.handle(RecordEvent::StartRecording, t(0)).unwrap();
    for _ in 0..N {
        sampler.on_tick();
    }
    sm.handle(RecordEvent::StopRecording, t(0)).unwrap();
    sm.poll(t(500));

    let levels = drain_player(&mut player, &lb);
    // 8N - 1 sample levels, then the zero of the stop-and-reset branch.
    assert_eq!(levels.len() as u32, PlaybackPosition::<N>::LAST + 1);
    let last = u16::from(ramp_value(N - 1));
    assert_eq!(levels.iter().filter(|&&l| l == last).count(), 7);
    assert_eq!(levels.last(), Some(&0));
    assert_eq!(player.position().ticks(), 0);
}

#[test]
fn wrapped_recording_keeps_last_n_and_replays_oldest_first() {
    const N: usize = 50;
    let lb: Loopback<N> = Loopback::new();
    let mut sm = RecordingStateMachine::new(&lb, MockTimer::new(), LoopbackConfig::default());
    let mut sampler = Sampler::new(&lb, ramp_adc());
    let mut player = Player::new(&lb, MockPwm::default());

    sm.handle(RecordEvent::StartRecording, t(0)).unwrap();
    let total = 137;
    for _ in 0..total {
        sampler.on_tick();
    }
    sm.handle(RecordEvent::StopRecording, t(0)).unwrap();
    sm.poll(t(500));

    let expected: Vec<u8> = (total - N..total).map(ramp_value).collect();
    let view: Vec<u8> = lb.recorded().collect();
    assert_eq!(view, expected);

    let levels = drain_player(&mut player, &lb);
    let replayed: Vec<u8> = levels.chunks(8).map(|c| c[0] as u8).take(N).collect();
    assert_eq!(replayed, expected);
}

#[test]
fn session_without_ticks_replays_from_slot_zero() {
    const N: usize = 4;
    let lb: Loopback<N> = Loopback::new();
    let mut sm = RecordingStateMachine::new(&lb, MockTimer::new(), LoopbackConfig::default());
    let mut sampler = Sampler::new(&lb, ramp_adc());
    let mut player = Player::new(&lb, MockPwm::default());

    // Six ticks on four slots: the ring wraps, cursor at slot 2.
    sm.handle(RecordEvent::StartRecording, t(0)).unwrap();
    for _ in 0..6 {
        sampler.on_tick();
    }
    sm.handle(RecordEvent::StopRecording, t(1)).unwrap();
    sm.poll(t(501));
    assert_eq!(lb.play_origin(), 2);
    drain_player(&mut player, &lb);
    assert_eq!(sm.poll(t(502)), Some(Transition::PlaybackFinished));

    // A second session that ends before the sampler ever ticks.
    sm.handle(RecordEvent::StartRecording, t(600)).unwrap();
    assert_eq!(lb.write_cursor().slot(), 0);
    assert!(!lb.write_cursor().has_wrapped());
    sm.handle(RecordEvent::StopRecording, t(601)).unwrap();
    assert_eq!(sm.poll(t(1_101)), Some(Transition::PlaybackStarted));

    assert_eq!(lb.play_origin(), 0);
    let view: Vec<u8> = lb.recorded().collect();
    assert_eq!(view, [ramp_value(4), ramp_value(5), ramp_value(2), ramp_value(3)]);
    assert_eq!(player.on_wrap(), u16::from(ramp_value(4)));
}

#[test]
fn stop_when_idle_leaves_idle() {
    let lb: Loopback<8> = Loopback::new();
    let mut sm = RecordingStateMachine::new(&lb, MockTimer::new(), LoopbackConfig::default());
    for ms in 0..3 {
        assert_eq!(
            sm.handle(RecordEvent::StopRecording, t(ms)).unwrap(),
            Transition::Ignored(IgnoreReason::NotRecording)
        );
    }
    assert_eq!(sm.state(), RecordingState::Idle);
    assert_eq!(sm.timer().arm_count(), 0);
}

#[test]
fn start_during_drain_is_ignored_by_default() {
    let lb: Loopback<8> = Loopback::new();
    let mut sm = RecordingStateMachine::new(&lb, MockTimer::new(), LoopbackConfig::default());
    sm.handle(RecordEvent::StartRecording, t(0)).unwrap();
    sm.handle(RecordEvent::StopRecording, t(100)).unwrap();

    assert_eq!(
        sm.handle(RecordEvent::StartRecording, t(200)).unwrap(),
        Transition::Ignored(IgnoreReason::Draining)
    );
    assert_eq!(sm.poll(t(600)), Some(Transition::PlaybackStarted));
}

#[test]
fn start_during_drain_restarts_under_restart_policy() {
    let lb: Loopback<8> = Loopback::new();
    let config = LoopbackConfig {
        drain_restart: DrainRestartPolicy::Restart,
        ..LoopbackConfig::default()
    };
    let mut sm = RecordingStateMachine::new(&lb, MockTimer::new(), config);
    let mut sampler = Sampler::new(&lb, ramp_adc());

    sm.handle(RecordEvent::StartRecording, t(0)).unwrap();
    for _ in 0..5 {
        sampler.on_tick();
    }
    sm.handle(RecordEvent::StopRecording, t(100)).unwrap();
    assert_eq!(
        sm.handle(RecordEvent::StartRecording, t(200)).unwrap(),
        Transition::RecordingRestarted
    );
    assert!(sm.timer().is_armed());

    sampler.on_tick();
    assert_eq!(sampler.index().slot(), 1, "restart opens a fresh session");
}

#[test]
fn timer_arm_failure_returns_to_idle() {
    let lb: Loopback<8> = Loopback::new();
    let mut timer = MockTimer::new();
    timer.fail_next_arm(TimerError::NotRunning);
    let mut sm = RecordingStateMachine::new(&lb, timer, LoopbackConfig::default());
    let mut sampler = Sampler::new(&lb, ramp_adc());

    let err = sm.handle(RecordEvent::StartRecording, t(0)).unwrap_err();
    assert_eq!(err, LoopbackError::TimerArm(TimerError::NotRunning));
    assert_eq!(sm.state(), RecordingState::Idle);
    assert_eq!(sampler.on_tick(), None);

    // The next press works.
    assert_eq!(
        sm.handle(RecordEvent::StartRecording, t(10)).unwrap(),
        Transition::RecordingStarted
    );
}

#[test]
fn pressing_during_playback_cancels_it() {
    let lb: Loopback<8> = Loopback::new();
    let mut sm = RecordingStateMachine::new(&lb, MockTimer::new(), LoopbackConfig::default());
    let mut sampler = Sampler::new(&lb, ramp_adc());
    let mut player = Player::new(&lb, MockPwm::default());

    sm.handle(RecordEvent::StartRecording, t(0)).unwrap();
    for _ in 0..8 {
        sampler.on_tick();
    }
    sm.handle(RecordEvent::StopRecording, t(0)).unwrap();
    sm.poll(t(500));
    assert_eq!(player.on_wrap(), 1);

    sm.handle(RecordEvent::StartRecording, t(501)).unwrap();
    assert_eq!(player.on_wrap(), 0);
    assert!(!lb.playback_pending());
    assert_eq!(sm.state(), RecordingState::Recording);
}
