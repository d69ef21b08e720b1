//! Echo Loop firmware - Main Entry Point
//!
//! Hardware-only entry point for the RP2040 (Raspberry Pi Pico).

#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;

use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::InterruptExt;
use embassy_rp::peripherals::{ADC, PIN_26};
use embassy_rp::watchdog::Watchdog;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Ticker};
use static_cell::StaticCell;

use firmware::boot::{self, SAMPLE_CLOCK_IRQ_PRIORITY, WATCHDOG_TIMEOUT_MS};
use firmware::hardware::{self, nvic_priority, RpAdc, RpPwm};
use firmware::{
    button_loop, microphone_control, playback_control, ClockTimer, SampleClock, SharedMachine,
    RECORD_EVENTS,
};
use loopback::{
    ButtonMonitor, DeviceLoopback, LoopbackConfig, Player, RecordingStateMachine, Sampler,
};
use platform::config::{BUFFER_LEN, HEARTBEAT_MS};

type Machine = SharedMachine<'static, CriticalSectionRawMutex, ClockTimer<'static>, BUFFER_LEN>;

// Audio buffer and session flags; 33 KB, must not live on a stack.
static LOOPBACK: DeviceLoopback = DeviceLoopback::new();
static SAMPLE_CLOCK: SampleClock = SampleClock::new();
static EXECUTOR_AUDIO: InterruptExecutor = InterruptExecutor::new();
static MACHINE: StaticCell<Machine> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    // SAFETY: SWI_IRQ_1 is reserved for EXECUTOR_AUDIO, started in main.
    unsafe { EXECUTOR_AUDIO.on_interrupt() }
}

#[interrupt]
fn PWM_IRQ_WRAP() {
    hardware::on_pwm_wrap();
}

#[embassy_executor::task]
async fn sample_clock_task(adc: ADC, pin: PIN_26) {
    let mut sampler = Sampler::new(&LOOPBACK, RpAdc::new(adc, pin));
    SAMPLE_CLOCK.run(&mut sampler).await
}

#[embassy_executor::task]
async fn button_task(mut pin: Input<'static>) {
    let mut monitor = ButtonMonitor::default();
    button_loop(&mut pin, &mut monitor, RECORD_EVENTS.sender()).await;
}

#[embassy_executor::task]
async fn microphone_task(machine: &'static Machine) {
    microphone_control(machine, RECORD_EVENTS.receiver()).await
}

#[embassy_executor::task]
async fn playback_task(machine: &'static Machine) {
    playback_control(machine).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // Step 1: clocks (sys 125 MHz) and the 1 MHz TIMER time driver.
    let p = embassy_rp::init(embassy_rp::config::Config::default());
    boot::log_banner();

    // Step 2: watchdog. Fed by the heartbeat loop below.
    let mut watchdog = Watchdog::new(p.WATCHDOG);
    watchdog.start(Duration::from_millis(WATCHDOG_TIMEOUT_MS));
    defmt::info!("watchdog armed: timeout={=u64}ms", WATCHDOG_TIMEOUT_MS);

    // Steps 3-4: sample clock on the interrupt executor; the ADC is created
    // inside the task so the sampler never crosses executors.
    interrupt::SWI_IRQ_1.set_priority(nvic_priority(SAMPLE_CLOCK_IRQ_PRIORITY));
    let audio_spawner = EXECUTOR_AUDIO.start(interrupt::SWI_IRQ_1);
    if audio_spawner.spawn(sample_clock_task(p.ADC, p.PIN_26)).is_err() {
        defmt::error!("failed to spawn sample clock task");
    }

    // Step 5: PWM output, player installed before the wrap IRQ is unmasked.
    hardware::install_player(Player::new(&LOOPBACK, RpPwm::new(p.PWM_SLICE0, p.PIN_0)));

    // Step 6: button and control tasks.
    let machine: &'static Machine = MACHINE.init(Mutex::new(RecordingStateMachine::new(
        &LOOPBACK,
        ClockTimer::new(&SAMPLE_CLOCK),
        LoopbackConfig::default(),
    )));

    let button = Input::new(p.PIN_15, Pull::Up);
    if spawner.spawn(button_task(button)).is_err() {
        defmt::error!("failed to spawn button task");
    }
    if spawner.spawn(microphone_task(machine)).is_err() {
        defmt::error!("failed to spawn microphone task");
    }
    if spawner.spawn(playback_task(machine)).is_err() {
        defmt::error!("failed to spawn playback task");
    }

    defmt::info!("Entering main loop");
    let mut ticker = Ticker::every(Duration::from_millis(HEARTBEAT_MS));
    let mut counter = 0u32;
    loop {
        ticker.next().await;
        counter = counter.wrapping_add(1);
        let state = machine.lock().await.state();
        defmt::debug!(
            "Heartbeat tick={=u32} state={=str} samples={=u32}",
            counter,
            state.as_str(),
            SAMPLE_CLOCK.ticks()
        );
        watchdog.feed();
    }
}
