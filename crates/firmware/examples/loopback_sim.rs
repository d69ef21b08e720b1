//! Echo Loop host simulator
//!
//! Runs the real sample clock, state machine and control tasks on the host
//! with a synthetic 440 Hz triangle tone as the microphone. A virtual button
//! is held for one second, then the player is driven until playback ends.
//!
//! Run with: cargo run --example loopback_sim --features simulator
//! Verbose:  RUST_LOG=debug cargo run --example loopback_sim --features simulator

// Host-only demo: counters and tone math are not interrupt paths.
#![allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]

use embassy_futures::select::{select4, Either4};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Instant, Timer};
use tracing_subscriber::EnvFilter;

use firmware::{
    boot, microphone_control, playback_control, ClockTimer, SampleClock, SharedMachine,
    RECORD_EVENTS,
};
use loopback::{
    DeviceLoopback, LoopbackConfig, Player, RecordEvent, RecordingState, RecordingStateMachine,
    Sampler,
};
use platform::audio_types::AdcResolution;
use platform::clock_config::SAMPLE_RATE_HZ;
use platform::config::BUFFER_LEN;
use platform::mocks::MockPwm;
use platform::AdcInput;

/// How long the virtual button is held.
const HOLD: Duration = Duration::from_millis(1_000);

/// Triangle wave on the 12-bit ADC scale.
struct ToneAdc {
    phase: u32,
    period: u32,
}

impl ToneAdc {
    fn new(freq_hz: u32) -> Self {
        Self {
            phase: 0,
            period: (SAMPLE_RATE_HZ / freq_hz).max(2),
        }
    }
}

impl AdcInput for ToneAdc {
    fn convert(&mut self) -> u16 {
        let half = self.period / 2;
        let pos = self.phase % self.period;
        self.phase = self.phase.wrapping_add(1);
        let ramp = if pos < half { pos } else { self.period - pos };
        let max = AdcResolution::RP2040.max_code();
        (ramp * max / half.max(1)).min(max) as u16
    }

    fn resolution(&self) -> AdcResolution {
        AdcResolution::RP2040
    }
}

static LOOPBACK: DeviceLoopback = DeviceLoopback::new();
static SAMPLE_CLOCK: SampleClock = SampleClock::new();

type Machine = SharedMachine<'static, CriticalSectionRawMutex, ClockTimer<'static>, BUFFER_LEN>;

async fn wait_for(machine: &Machine, state: RecordingState) {
    while machine.lock().await.state() != state {
        Timer::after(Duration::from_millis(10)).await;
    }
}

/// Press, hold, release, then stand in for the PWM wrap interrupt.
async fn session(machine: &Machine) {
    let pressed = Instant::now();
    RECORD_EVENTS.send(RecordEvent::StartRecording).await;
    Timer::after(HOLD).await;
    RECORD_EVENTS.send(RecordEvent::StopRecording).await;

    wait_for(machine, RecordingState::Playing).await;
    let cursor = LOOPBACK.write_cursor();
    tracing::info!(
        samples = SAMPLE_CLOCK.ticks(),
        stored = cursor.recorded_len(),
        wrapped = cursor.has_wrapped(),
        held_ms = pressed.elapsed().as_millis(),
        "recording captured"
    );

    let mut player = Player::new(&LOOPBACK, MockPwm::default());
    let (mut wraps, mut peak, mut non_zero) = (0u32, 0u16, 0u32);
    while LOOPBACK.playback_pending() {
        let level = player.on_wrap();
        wraps += 1;
        peak = peak.max(level);
        if level > 0 {
            non_zero += 1;
        }
        if wraps % 4_096 == 0 {
            // Let the control tasks run between bursts.
            Timer::after(Duration::from_micros(100)).await;
        }
    }
    tracing::info!(wraps, peak, non_zero, "playback drained");

    wait_for(machine, RecordingState::Idle).await;
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    boot::log_banner();

    let machine: Machine = Mutex::new(RecordingStateMachine::new(
        &LOOPBACK,
        ClockTimer::new(&SAMPLE_CLOCK),
        LoopbackConfig::default(),
    ));
    let mut sampler = Sampler::new(&LOOPBACK, ToneAdc::new(440));

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    rt.block_on(async {
        match select4(
            SAMPLE_CLOCK.run(&mut sampler),
            microphone_control(&machine, RECORD_EVENTS.receiver()),
            playback_control(&machine),
            session(&machine),
        )
        .await
        {
            Either4::Fourth(()) => {}
            Either4::First(never) | Either4::Second(never) | Either4::Third(never) => {
                match never {}
            }
        }
    });

    tracing::info!("simulation complete");
    Ok(())
}
