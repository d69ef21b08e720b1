//! Record button → state machine event path.
//!
//! # Architecture
//!
//! A single static [`Channel`] carries [`RecordEvent`]s from the button loop
//! to the microphone-control task. The button loop is generic over any
//! `embedded-hal` input pin that can also await edges, so the same code runs
//! on the RP2040 GPIO and on [`platform::mocks::MockButton`].
//!
//! # Overflow handling
//!
//! [`try_send_event`] never awaits. If the microphone-control task stalls and
//! the channel reaches [`EVENT_CHANNEL_DEPTH`], further events are dropped
//! with a warning rather than blocking edge detection.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Sender};
use embassy_time::Timer;
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;

use loopback::{ButtonMonitor, RecordEvent};
use platform::config::EVENT_CHANNEL_DEPTH;
use platform::{Edge, PinState};

/// Sender half of the record-event channel.
pub type EventSender<'a> = Sender<'a, CriticalSectionRawMutex, RecordEvent, EVENT_CHANNEL_DEPTH>;

/// Record-event channel type.
pub type EventChannel = Channel<CriticalSectionRawMutex, RecordEvent, EVENT_CHANNEL_DEPTH>;

// CriticalSectionRawMutex: every queue operation is a few instructions with
// interrupts masked, far below the 16 µs PWM wrap period.
/// Global event channel shared between the button loop and microphone control.
pub static RECORD_EVENTS: EventChannel = Channel::new();

/// Attempt to send a [`RecordEvent`] without blocking.
///
/// Returns `true` if the event was enqueued, `false` if the channel was full
/// and the event was dropped.
pub fn try_send_event(tx: &EventSender<'_>, event: RecordEvent) -> bool {
    tx.try_send(event).is_ok()
}

/// Button loop (active-low, internal pull-up, both edges).
///
/// With debounce off, every edge becomes an event; the edge direction is
/// taken from the level read right after it. With a settle time, the loop
/// waits that long after each edge and reports the settled level only if it
/// changed. A level that moved again before the edge wait re-armed is settled
/// without waiting for an edge, since that edge was never seen.
pub async fn button_loop<P>(pin: &mut P, monitor: &mut ButtonMonitor, tx: EventSender<'_>)
where
    P: InputPin + Wait,
{
    let mut resettle = false;
    loop {
        if !resettle && pin.wait_for_any_edge().await.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("button: edge wait failed");
            continue;
        }

        let event = match monitor.settle_time() {
            None => read_level(pin).map(|level| monitor.on_edge(Edge::into_level(level))),
            Some(settle) => {
                Timer::after(settle).await;
                read_level(pin).and_then(|level| monitor.on_settled(level))
            }
        };

        if let Some(event) = event {
            #[cfg(feature = "defmt")]
            defmt::debug!("button: {=str}", event.as_str());
            if !try_send_event(&tx, event) {
                #[cfg(feature = "defmt")]
                defmt::warn!("record event channel full, dropped {=str}", event.as_str());
                #[cfg(feature = "simulator")]
                tracing::warn!(event = event.as_str(), "record event channel full, dropped");
            }
        }

        resettle = monitor.settle_time().is_some()
            && read_level(pin).is_some_and(|level| level != monitor.reported_level());
    }
}

fn read_level<P: InputPin>(pin: &mut P) -> Option<PinState> {
    pin.is_high().ok().map(PinState::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_send_returns_false_when_full() {
        static CHANNEL: EventChannel = Channel::new();
        let tx = CHANNEL.sender();
        for _ in 0..EVENT_CHANNEL_DEPTH {
            assert!(try_send_event(&tx, RecordEvent::StartRecording));
        }
        assert!(!try_send_event(&tx, RecordEvent::StopRecording));
        assert_eq!(CHANNEL.len(), EVENT_CHANNEL_DEPTH);
    }

    #[test]
    fn test_channel_depth_is_documented_value() {
        assert_eq!(EVENT_CHANNEL_DEPTH, 8);
    }
}
