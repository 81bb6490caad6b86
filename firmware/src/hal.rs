//! Extensions to the `stm32f1xx-hal` Hardware Abstraction Layer.

pub mod mco;
pub mod tim;

#[allow(non_camel_case_types)]
pub mod pins {
    use stm32f1xx_hal::gpio::{Alternate, Floating, Input, OpenDrain, Output, Pin, PushPull};

    /// Signal under test, external trigger of TIM2
    pub type A0_TIM2_ETR = Pin<'A', 0, Input<Floating>>;

    /// Calibration clock output
    pub type A8_MCO = Pin<'A', 8, Alternate<PushPull>>;

    /// Status LED, toggled at every window boundary (Maple Mini)
    pub type B1_STATUS_LED = Pin<'B', 1, Output<PushPull>>;

    /// D+ pull-up enable, active low (Maple Mini `USB_DISC`)
    pub type B9_USB_DISC = Pin<'B', 9, Output<OpenDrain>>;
}
