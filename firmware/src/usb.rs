//! USB CDC-ACM serial port, carrying status lines out and commands in.

use crate::config;
use freqmeter::transport::Transport;
use rtic::Mutex;
use stm32f1xx_hal::usb::UsbBusType;
use usb_device::bus::UsbBusAllocator;
use usb_device::device::{UsbDevice, UsbDeviceBuilder, UsbVidPid};
use usb_device::UsbError;
use usbd_serial::SerialPort;

pub type Serial = SerialPort<'static, UsbBusType>;
pub type Device = UsbDevice<'static, UsbBusType>;

pub fn device(bus: &'static UsbBusAllocator<UsbBusType>) -> (Device, Serial) {
    // the class must be allocated before the device is built
    let serial = SerialPort::new(bus);

    let device = UsbDeviceBuilder::new(bus, UsbVidPid(config::usb::VID, config::usb::PID))
        .manufacturer(config::usb::MANUFACTURER)
        .product(config::usb::PRODUCT)
        .serial_number(config::usb::SERIAL_NUMBER)
        .device_class(usbd_serial::USB_CLASS_CDC)
        .max_packet_size_0(64)
        .build();

    (device, serial)
}

/// The serial port, as seen from a lower priority than the USB interrupts.
pub struct UsbTransport<M> {
    serial: M,
}

impl<M: Mutex<T = Serial>> UsbTransport<M> {
    pub fn new(serial: M) -> Self {
        Self { serial }
    }
}

impl<M: Mutex<T = Serial>> Transport for UsbTransport<M> {
    const MAX_PACKET_SIZE: usize = config::usb::MAX_PACKET_SIZE;

    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0; 1];
        match self.serial.lock(|serial| serial.read(&mut byte)) {
            Ok(1) => Some(byte[0]),
            Ok(_) | Err(UsbError::WouldBlock) => None,
            Err(e) => {
                defmt::warn!("USB read failed: {}", defmt::Debug2Format(&e));
                None
            }
        }
    }

    fn write(&mut self, buf: &[u8]) -> usize {
        match self.serial.lock(|serial| serial.write(buf)) {
            Ok(written) => written,
            Err(UsbError::WouldBlock) => 0,
            Err(e) => {
                defmt::warn!("USB write failed: {}", defmt::Debug2Format(&e));
                0
            }
        }
    }
}
