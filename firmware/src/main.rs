#![no_main]
#![no_std]
#![allow(clippy::assertions_on_constants, clippy::let_and_return)]
#![warn(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::ptr_as_ptr
)]

use defmt_rtt as _; // global logger
use stm32f1xx_hal as _; // memory layout

use panic_probe as _; // panicking-behavior

// same panicking *behavior* as `panic-probe` but doesn't print a panic message
// this prevents the panic message being printed *twice* when `defmt::panic` is invoked
#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}

mod board;
mod config;
mod hal;
mod time;
mod usb;

#[rtic::app(
    device = stm32f1xx_hal::pac,
    peripherals = true,
    dispatchers = [USART1]
)]
mod app {
    use crate::board::Board;
    use crate::config;
    use crate::hal::mco::ClockOut;
    use crate::hal::pins;
    use crate::hal::tim::InputCounter;
    use crate::time::Instant;
    use crate::usb::{self, UsbTransport};
    use dwt_systick_monotonic::DwtSystick;
    use freqmeter::{Console, Scheduler, State, WideCounter};
    use stm32f1xx_hal::gpio::PinState;
    use stm32f1xx_hal::prelude::*;
    use stm32f1xx_hal::usb::{Peripheral, UsbBus, UsbBusType};
    use usb_device::bus::UsbBusAllocator;

    static STATE: State = State::new();

    #[shared]
    struct Shared {
        wide: WideCounter<InputCounter>,
        usb_dev: usb::Device,
        serial: usb::Serial,
    }

    #[local]
    struct Local {
        scheduler: Scheduler,
        clock_out: ClockOut,
        status_led: pins::B1_STATUS_LED,
        usb_disc: pins::B9_USB_DISC,
    }

    #[init(local = [usb_bus: Option<UsbBusAllocator<UsbBusType>> = None])]
    fn init(mut cx: init::Context) -> (Shared, Local, init::Monotonics) {
        defmt::info!("Dumping config...");

        config::dump_to_log();

        defmt::info!("Starting init...");

        let mut flash = cx.device.FLASH.constrain();
        let mut gpioa = cx.device.GPIOA.split();
        let mut gpiob = cx.device.GPIOB.split();
        let rcc = cx.device.RCC.constrain();

        defmt::info!("Configuring clocks...");

        let clocks = rcc
            .cfgr
            .use_hse(config::clk::HSE_FREQ)
            .sysclk(config::clk::SYSCLK)
            .pclk1(config::clk::PCLK1)
            .pclk2(config::clk::PCLK2)
            .freeze(&mut flash.acr);

        assert!(config::clk::SYSCLK == clocks.sysclk());
        assert!(config::clk::PCLK1 == clocks.pclk1());
        assert!(config::clk::PCLK2 == clocks.pclk2());
        assert!(clocks.usbclk_valid());

        defmt::info!("Configuring status LED...");

        let status_led: pins::B1_STATUS_LED = gpiob
            .pb1
            .into_push_pull_output_with_state(&mut gpiob.crl, PinState::High);

        defmt::info!("Configuring input counter...");

        let etr: pins::A0_TIM2_ETR = gpioa.pa0;
        let wide = WideCounter::new(InputCounter::new(cx.device.TIM2, etr));

        defmt::info!("Configuring clock output...");

        let mco: pins::A8_MCO = gpioa.pa8.into_alternate_push_pull(&mut gpioa.crh);
        let clock_out = ClockOut::new(mco);

        defmt::info!("Configuring USB...");

        // enable the D+ pull-up, so the host sees us attach
        let usb_disc: pins::B9_USB_DISC = gpiob
            .pb9
            .into_open_drain_output_with_state(&mut gpiob.crh, PinState::Low);

        let usb_bus = cx.local.usb_bus.insert(UsbBus::new(Peripheral {
            usb: cx.device.USB,
            pin_dm: gpioa.pa11,
            pin_dp: gpioa.pa12,
        }));
        let (usb_dev, serial) = usb::device(usb_bus);

        defmt::info!("Configuring monotonic timer...");

        let mono = DwtMono::new(
            &mut cx.core.DCB,
            cx.core.DWT,
            cx.core.SYST,
            clocks.sysclk().to_Hz(),
        );

        defmt::info!("Starting window tick...");

        let start = Instant::from_ticks(0) + config::tick::PERIOD;
        if tick::spawn_at(start, start).is_err() {
            defmt::panic!("Failed to start window tick");
        }

        defmt::info!("Finished init.");

        (
            Shared {
                wide,
                usb_dev,
                serial,
            },
            Local {
                scheduler: Scheduler::new(),
                clock_out,
                status_led,
                usb_disc,
            },
            init::Monotonics(mono),
        )
    }

    // Task priorities
    //
    // Prio | Task           | Description
    //    2 | DwtMono        | monotonic timer interrupt
    //    2 | counter_update | accumulates hardware counter overflows
    //    2 | tick           | ends measurement windows
    //    1 | usb_*          | polls the USB device
    //    0 | idle           | commands and status lines
    //
    // `counter_update` and `tick` must not preempt each other, so an overflow is never
    // counted into the wrong window.

    /// This provides a monotonic timer used to trigger scheduled tasks.
    #[monotonic(
        binds = SysTick,
        priority = 2,
        default = true
    )]
    type DwtMono = DwtSystick<{ config::clk::SYSCLK_HZ }>;

    #[task(
        binds = TIM2,
        shared = [
            wide,
        ],
        priority = 2,
    )]
    fn counter_update(mut cx: counter_update::Context) {
        cx.shared.wide.lock(|wide| wide.on_overflow());
    }

    /// This task ends a measurement window every thousand runs.
    ///
    /// Rescheduled at absolute instants, so latency doesn't accumulate into drift.
    #[task(
        shared = [
            wide,
        ],
        local = [
            scheduler,
            status_led,
        ],
        priority = 2,
    )]
    fn tick(mut cx: tick::Context, at: Instant) {
        let next = at + config::tick::PERIOD;
        if tick::spawn_at(next, next).is_err() {
            defmt::warn!("Window tick schedule overrun");
        }

        let scheduler = cx.local.scheduler;
        let boundary = cx.shared.wide.lock(|wide| scheduler.tick(wide, &STATE));

        if let Some(boundary) = boundary {
            cx.local.status_led.toggle();

            if config::debug::LOG_WINDOWS {
                defmt::println!(
                    "Window {}: {} events, published {}",
                    boundary.window,
                    boundary.count,
                    boundary.published
                );
            }
        }
    }

    #[task(
        binds = USB_HP_CAN_TX,
        shared = [
            usb_dev,
            serial,
        ],
        priority = 1,
    )]
    fn usb_tx(cx: usb_tx::Context) {
        (cx.shared.usb_dev, cx.shared.serial).lock(|usb_dev, serial| {
            usb_dev.poll(&mut [serial]);
        });
    }

    #[task(
        binds = USB_LP_CAN_RX0,
        shared = [
            usb_dev,
            serial,
        ],
        priority = 1,
    )]
    fn usb_rx0(cx: usb_rx0::Context) {
        (cx.shared.usb_dev, cx.shared.serial).lock(|usb_dev, serial| {
            usb_dev.poll(&mut [serial]);
        });
    }

    #[idle(
        shared = [
            wide,
            serial,
        ],
        local = [
            clock_out,
            usb_disc,
        ],
    )]
    fn idle(cx: idle::Context) -> ! {
        // held for as long as we run, keeping the D+ pull-up enabled
        let _usb_disc = cx.local.usb_disc;

        let mut board = Board::new(cx.shared.wide, cx.local.clock_out);
        STATE.conditioning.apply(&mut board);

        let mut transport = UsbTransport::new(cx.shared.serial);
        let mut console = Console::new();

        loop {
            console.poll(&STATE, &mut transport, &mut board);
        }
    }
}
