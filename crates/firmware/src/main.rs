//! Kite DAP Firmware - Main Entry Point
//!
//! Hardware-only entry point for STM32H743ZI.

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_stm32::exti::{Channel, ExtiInput};
use embassy_stm32::gpio::{AnyPin, Input, Level, Output, Pull, Speed};
use embassy_time::Timer;

use firmware::audio::amp::aw8736::Aw8736;
use firmware::audio::amp::control::AmpController;
use firmware::config;
use firmware::power::AmpStateObserver;
use notifier::StateNotifier;

// Panic handler + defmt transport
use defmt_rtt as _;
use panic_probe as _;

/// Device suspend/resume notifier.  Shared between the button loop (requests)
/// and the worker task (deferred actions).
static NOTIFIER: StateNotifier = StateNotifier::new();

/// Speaker amplifier command queue, fed by the state observer.
static AMP_CONTROLLER: AmpController = AmpController::new();

/// Bridges notifier broadcasts to amplifier power commands.
static AMP_OBSERVER: AmpStateObserver = AmpStateObserver::new(&AMP_CONTROLLER);

/// Notifier worker — the single context all suspend/resume bodies run on.
#[embassy_executor::task]
async fn notifier_task() {
    NOTIFIER.run().await
}

/// Amplifier control task — owns the AW8736 for the lifetime of the program.
#[embassy_executor::task]
async fn amp_task(mut amp: Aw8736<Output<'static, AnyPin>>) {
    AMP_CONTROLLER.run(&mut amp).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    defmt::info!("{=str} {=str} firmware v{=str}", config::APP_NAME, config::APP_TYPE, config::APP_VERSION);

    let p = embassy_stm32::init(Default::default());

    // AW8736 CTRL pin — PB14, push-pull, driven low (amp off) at init.
    let amp = Aw8736::new(Output::new(p.PB14, Level::Low, Speed::Low).degrade());

    // Speaker power follows the device suspend state.
    if NOTIFIER.register_observer(&AMP_OBSERVER).is_err() {
        defmt::error!("amp observer registration failed");
    }

    // Product tuning for the suspend defer window.
    if let Err(e) = NOTIFIER.set_defer_time(config::SUSPEND_DEFER_SECS) {
        defmt::warn!("suspend defer tuning rejected: {}", e);
    }
    defmt::info!(
        "suspend defer window: {=u32}s",
        NOTIFIER.defer_time()
    );

    spawner
        .spawn(notifier_task())
        .expect("failed to spawn notifier_task");
    spawner.spawn(amp_task(amp)).expect("failed to spawn amp_task");

    // -----------------------------------------------------------------------
    // Power button — PC13, active-low, internal pull-up, EXTI13.
    //
    // A press while awake requests the deferred suspend; a press while
    // suspending or suspended wakes the device back up.
    // -----------------------------------------------------------------------
    let mut power_btn: ExtiInput<'static, AnyPin> =
        ExtiInput::new(Input::new(p.PC13, Pull::Up).degrade(), p.EXTI13.degrade());

    loop {
        power_btn.wait_for_falling_edge().await;
        Timer::after_millis(config::POWER_BUTTON_DEBOUNCE_MS).await; // debounce
        if power_btn.is_low() {
            if NOTIFIER.is_suspended() || NOTIFIER.suspend_pending() {
                NOTIFIER.request_resume();
            } else {
                NOTIFIER.request_suspend();
            }
            power_btn.wait_for_rising_edge().await;
            Timer::after_millis(config::POWER_BUTTON_DEBOUNCE_MS).await; // debounce release
        }
    }
}
