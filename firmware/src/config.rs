pub fn dump_to_log() {
    defmt::info!(
        "\n\
        Debugging flags:\n\
        - LOG_WINDOWS: {}\n\
        Clocks:\n\
        - HSE_FREQ: {} Hz\n\
        - SYSCLK:   {} Hz\n\
        - PCLK1:    {} Hz\n\
        - PCLK2:    {} Hz\n\
        Tick:\n\
        - PERIOD: {} us\n\
        Measurement:\n\
        - COUNTER_BITS: {}\n\
        - WINDOW_TICKS: {}\n\
        - WARM_UP:      {} windows\n\
        - REPORT_INTERVAL: {} ms\n\
        USB:\n\
        - VID:PID: {=u16:04x}:{=u16:04x}\n\
        - MAX_PACKET_SIZE: {}\n\
        ",
        debug::LOG_WINDOWS,
        clk::HSE_FREQ.to_Hz(),
        clk::SYSCLK.to_Hz(),
        clk::PCLK1.to_Hz(),
        clk::PCLK2.to_Hz(),
        tick::PERIOD.to_micros(),
        freqmeter::config::counter::BITS,
        freqmeter::config::window::TICKS,
        freqmeter::config::window::WARM_UP,
        freqmeter::config::report::INTERVAL.to_millis(),
        usb::VID,
        usb::PID,
        usb::MAX_PACKET_SIZE,
    );
}

/// Debugging flags
pub mod debug {
    /// Log the raw count of every finalized window.
    pub const LOG_WINDOWS: bool = false;
}

/// Clock configuration
///
/// See clock tree in https://www.st.com/resource/en/datasheet/stm32f103c8.pdf
/// Rough layout:
///
///   HSE -> PLL -> SYSCLK -> AHB prescaler -> APB1 prescaler -> PCLK1 -> x2 -> TIM2CLK
///           |               / 1,2..512    |   / 1,2,4,8,16
///           |                             |
///           |                             -> APB2 prescaler -> PCLK2
///           |                                 / 1,2,4,8,16
///           |
///           -> USB prescaler -> USBCLK
///               / 1, 1.5
pub mod clk {
    use fugit::Rate;

    /// Maple Mini crystal (required to get max 72MHz sysclk, and a 48MHz USB clock)
    pub const HSE_FREQ: Rate<u32, 1, 1> = Rate::<u32, 1, 1>::MHz(8);

    /// PLLMUL @ x9 (max 72MHz), USB prescaler @ /1.5
    pub const SYSCLK: Rate<u32, 1, 1> = Rate::<u32, 1, 1>::MHz(72);
    pub const SYSCLK_HZ: u32 = SYSCLK.to_Hz();

    /// APB1 prescaler @ /2 (max 36MHz)
    ///
    /// The input filter samples at TIM2CLK = 2 * PCLK1 = 72MHz.
    pub const PCLK1: Rate<u32, 1, 1> = Rate::<u32, 1, 1>::MHz(36);
    /// APB2 prescaler @ /1 (max 72MHz)
    pub const PCLK2: Rate<u32, 1, 1> = Rate::<u32, 1, 1>::MHz(72);
}

/// Window tick configuration
pub mod tick {
    use crate::time::Duration;

    /// Period of the tick driving the window scheduler
    pub const PERIOD: Duration =
        Duration::from_ticks(super::clk::SYSCLK_HZ / freqmeter::config::window::TICK_HZ);

    const _: () = assert!(
        super::clk::SYSCLK_HZ % freqmeter::config::window::TICK_HZ == 0,
        "tick period must be a whole number of cycles"
    );
}

/// USB CDC-ACM configuration
pub mod usb {
    /// STMicroelectronics virtual COM port
    pub const VID: u16 = 0x0483;
    pub const PID: u16 = 0x5740;

    pub const MANUFACTURER: &str = "freqmeter";
    pub const PRODUCT: &str = "STM32 Frequency Meter";
    pub const SERIAL_NUMBER: &str = "0001";

    /// Full speed bulk endpoint size
    pub const MAX_PACKET_SIZE: usize = 64;
}
