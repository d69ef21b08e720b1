//! The two cooperative control tasks.
//!
//! Both share one [`RecordingStateMachine`] behind an async mutex and run on
//! the thread-mode executor at equal priority:
//!
//! - [`microphone_control`] applies button events and ends the drain delay.
//! - [`playback_control`] polls for playback completion.
//!
//! Embassy tasks cannot be generic, so these are plain async functions; the
//! binary wraps them in concrete `#[embassy_executor::task]`s.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Instant, Ticker, Timer};

use loopback::{LoopbackError, RecordEvent, RecordingStateMachine, Transition};
use platform::config::{EVENT_CHANNEL_DEPTH, PLAYBACK_POLL_MS};
use platform::SampleTimer;

/// State machine shared by the control tasks.
pub type SharedMachine<'a, M, T, const N: usize> = Mutex<M, RecordingStateMachine<'a, T, N>>;

/// Receiver half of the record-event channel.
pub type EventReceiver<'a, M> = Receiver<'a, M, RecordEvent, EVENT_CHANNEL_DEPTH>;

/// Microphone control: wait for a button event or the end of the drain,
/// whichever comes first, and apply it.
///
/// Never returns.
pub async fn microphone_control<M, T, const N: usize>(
    machine: &SharedMachine<'_, M, T, N>,
    events: EventReceiver<'_, M>,
) -> !
where
    M: RawMutex,
    T: SampleTimer,
{
    loop {
        let deadline = machine.lock().await.drain_deadline();
        let event = match deadline {
            Some(at) => match select(events.receive(), Timer::at(at)).await {
                Either::First(event) => Some(event),
                Either::Second(()) => None,
            },
            None => Some(events.receive().await),
        };

        let mut sm = machine.lock().await;
        let now = Instant::now();
        match event {
            Some(event) => match sm.handle(event, now) {
                Ok(transition) => report_transition(transition),
                Err(e) => report_error(e),
            },
            None => {
                if let Some(transition) = sm.poll_drain(now) {
                    report_transition(transition);
                }
            }
        }
    }
}

/// Playback control: every [`PLAYBACK_POLL_MS`], return the machine to Idle
/// once the player reports completion.
///
/// Never returns.
pub async fn playback_control<M, T, const N: usize>(machine: &SharedMachine<'_, M, T, N>) -> !
where
    M: RawMutex,
    T: SampleTimer,
{
    let mut ticker = Ticker::every(Duration::from_millis(PLAYBACK_POLL_MS));
    loop {
        ticker.next().await;
        if let Some(transition) = machine.lock().await.poll_playback() {
            report_transition(transition);
        }
    }
}

/// Log a state machine outcome.
pub fn report_transition(transition: Transition) {
    match transition {
        Transition::Ignored(reason) => {
            #[cfg(feature = "defmt")]
            defmt::debug!("event ignored: {=str}", reason.as_str());
            #[cfg(feature = "simulator")]
            tracing::debug!(reason = reason.as_str(), "event ignored");
            #[cfg(not(any(feature = "defmt", feature = "simulator")))]
            let _ = reason;
        }
        other => {
            #[cfg(feature = "defmt")]
            defmt::info!("{=str}", other.as_str());
            #[cfg(feature = "simulator")]
            tracing::info!("{}", other.as_str());
            #[cfg(not(any(feature = "defmt", feature = "simulator")))]
            let _ = other;
        }
    }
}

/// Log a state machine failure.
pub fn report_error(error: LoopbackError) {
    #[cfg(feature = "defmt")]
    defmt::error!("{=str}: {}", error.as_str(), error);
    #[cfg(feature = "simulator")]
    tracing::error!(%error, "recording not started");
    #[cfg(not(any(feature = "defmt", feature = "simulator")))]
    let _ = error;
}
